#![warn(missing_docs)]

//! trigrid: uniform-grid ray-tracing acceleration for triangle meshes.
//!
//! Builds a voxel grid (uniform domain division) over a static triangle
//! scene once, then answers nearest-hit ray queries by walking the grid
//! front to back with a 3D-DDA.
//!
//! # Example
//!
//! ```
//! use trigrid::{Point3, Ray, Scene, TracedScene, Vec3};
//!
//! let soup = [[
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ]];
//! let observer = Point3::new(0.25, 0.25, 1.0);
//! let scene = Scene::from_triangles(soup, observer).unwrap();
//! let traced = TracedScene::build(scene).unwrap();
//!
//! let ray = Ray::new(observer, Vec3::new(0.0, 0.0, -1.0));
//! let hit = traced.cast(&ray).unwrap();
//! assert!(hit.point.z.abs() < 1e-4);
//! ```

use rayon::prelude::*;

pub use trigrid_math::{Dir3, Point3, Vec3};
pub use trigrid_raytrace::{
    intersect_triangle, BuildError, GridStats, Ray, RayHit, UniformGrid, Voxel,
};
pub use trigrid_scene::{Aabb3, Scene, SceneError, Triangle, TriangleId};

/// A scene bundled with its voxel grid, ready for ray queries.
///
/// Building consumes the scene (its bounds are permanently inflated by the
/// grid); the preprocessed scene stays reachable through
/// [`TracedScene::scene`]. Queries are read-only and may run from any
/// number of threads.
pub struct TracedScene {
    grid: UniformGrid,
}

impl TracedScene {
    /// Build the acceleration grid for `scene`.
    pub fn build(scene: Scene) -> Result<Self, BuildError> {
        Ok(Self {
            grid: UniformGrid::build(scene)?,
        })
    }

    /// The underlying scene, with inflated bounds.
    #[inline]
    pub fn scene(&self) -> &Scene {
        self.grid.scene()
    }

    /// The underlying grid, for diagnostics and direct traversal.
    #[inline]
    pub fn grid(&self) -> &UniformGrid {
        &self.grid
    }

    /// Cast a primary ray, returning the nearest hit.
    #[inline]
    pub fn cast(&self, ray: &Ray) -> Option<RayHit> {
        self.grid.trace_closest(ray, None)
    }

    /// Cast a secondary ray leaving the surface of `current`, which is
    /// excluded from the search.
    #[inline]
    pub fn cast_from(&self, ray: &Ray, current: TriangleId) -> Option<RayHit> {
        self.grid.trace_closest(ray, Some(current))
    }

    /// Cast many independent rays in parallel.
    ///
    /// Results line up with the input slice. Equivalent to calling
    /// [`TracedScene::cast`] per ray; the grid is shared read-only across
    /// the worker threads.
    pub fn cast_batch(&self, rays: &[Ray]) -> Vec<Option<RayHit>> {
        rays.par_iter().map(|ray| self.cast(ray)).collect()
    }
}
