#![warn(missing_docs)]

//! Uniform-grid ray-tracing acceleration for static triangle scenes.
//!
//! Partitions the scene's bounding box into a regular voxel grid (uniform
//! domain division) and walks that grid along each ray with a 3D digital
//! differential analyzer, so a query touches only the triangles near the
//! ray instead of the whole scene.
//!
//! # Architecture
//!
//! - [`Ray`] / [`RayHit`] - ray representation and intersection result
//! - [`UniformGrid`] - grid sizing and conservative triangle-to-voxel
//!   assignment
//! - [`UniformGrid::entry_voxel`] - where a ray first enters the domain
//! - [`UniformGrid::trace_closest`] - front-to-back DDA walk returning the
//!   nearest hit
//! - [`intersect_triangle`] - the ray-triangle kernel the walk revalidates
//!   voxel candidates with
//!
//! The grid is built once per scene, then queried concurrently without
//! synchronization.

mod error;
mod grid;
mod intersect;
mod ray;
mod traverse;

pub use error::{BuildError, Result};
pub use grid::{GridStats, UniformGrid, Voxel};
pub use intersect::intersect_triangle;
pub use ray::{Ray, RayHit};
