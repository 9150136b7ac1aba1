#![warn(missing_docs)]

//! Math types for the trigrid ray-tracing core.
//!
//! Thin wrappers around nalgebra providing the single-precision points,
//! vectors, and unit directions the grid and traversal code work in, plus
//! the tolerance constants shared across the workspace.

use nalgebra::{Unit, Vector3};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f32>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f32>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f32>>;

/// Permanent inflation applied to scene bounds at grid-build time.
///
/// Keeps every triangle vertex strictly interior to the domain, so
/// truncating a vertex position to voxel indices cannot fall outside the
/// grid even under floating-point rounding at the boundary.
pub const BOUNDS_EPSILON: f32 = 1e-3;

/// Maximum deviation of a vertex from its triangle's supporting plane,
/// relative to scene extent.
pub const PLANE_TOLERANCE: f32 = 1e-5;

/// Determinant cutoff below which a ray counts as parallel to a triangle.
pub const INTERSECT_EPSILON: f32 = 1e-6;
