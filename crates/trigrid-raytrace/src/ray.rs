//! Ray representation.

use trigrid_math::{Dir3, Point3, Vec3};
use trigrid_scene::TriangleId;

/// A ray in 3D space defined by origin and unit direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Point3,
    /// Unit direction of the ray.
    pub direction: Dir3,
}

impl Ray {
    /// Create a new ray from origin and direction.
    ///
    /// The direction will be normalized. A zero direction is a caller
    /// precondition violation and is not detected.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: Dir3::new_normalize(direction),
        }
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f32) -> Point3 {
        self.origin + t * self.direction.as_ref()
    }
}

/// Result of a ray-scene intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Parameter along the ray where the intersection occurs.
    pub t: f32,
    /// 3D intersection point.
    pub point: Point3,
    /// Triangle that was hit.
    pub triangle: TriangleId,
}
