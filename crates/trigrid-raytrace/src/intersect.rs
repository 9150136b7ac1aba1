//! Ray-triangle intersection kernel (Möller–Trumbore).
//!
//! The traverser treats this as a black-box predicate: pure, allocation
//! free, and safe to call from any number of threads on immutable
//! triangles. It is public so callers can reuse it in brute-force
//! reference paths.

use crate::Ray;
use trigrid_math::INTERSECT_EPSILON;
use trigrid_scene::Triangle;

/// Intersect a ray with a triangle.
///
/// Returns `Some(t)` with the parametric distance along the ray if the ray
/// crosses the triangle's interior at `t > 0`, or `None` if the ray is
/// parallel to the triangle, hits outside its edges, or hits behind the
/// origin.
pub fn intersect_triangle(ray: &Ray, triangle: &Triangle) -> Option<f32> {
    let ij = triangle.j - triangle.i;
    let ik = triangle.k - triangle.i;

    let pvec = ray.direction.as_ref().cross(&ik);
    let det = ij.dot(&pvec);
    if det.abs() < INTERSECT_EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let tvec = ray.origin - triangle.i;
    let u = tvec.dot(&pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(&ij);
    let v = ray.direction.as_ref().dot(&qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = ik.dot(&qvec) * inv_det;
    if t <= 0.0 {
        return None;
    }
    Some(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trigrid_math::{Point3, Vec3};
    use trigrid_scene::{Scene, TriangleId};

    fn unit_triangle_scene() -> Scene {
        Scene::from_triangles(
            [[
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ]],
            Point3::new(0.0, 0.0, 5.0),
        )
        .unwrap()
    }

    #[test]
    fn test_hit_interior() {
        let scene = unit_triangle_scene();
        let ray = Ray::new(Point3::new(0.25, 0.25, 1.0), Vec3::new(0.0, 0.0, -1.0));
        let t = intersect_triangle(&ray, scene.triangle(TriangleId(0)));
        assert!((t.unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_miss_outside_edges() {
        let scene = unit_triangle_scene();
        // Beyond the hypotenuse: u + v > 1.
        let ray = Ray::new(Point3::new(0.8, 0.8, 1.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(intersect_triangle(&ray, scene.triangle(TriangleId(0))).is_none());
    }

    #[test]
    fn test_parallel_ray() {
        let scene = unit_triangle_scene();
        let ray = Ray::new(Point3::new(0.25, 0.25, 1.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(intersect_triangle(&ray, scene.triangle(TriangleId(0))).is_none());
    }

    #[test]
    fn test_hit_behind_origin() {
        let scene = unit_triangle_scene();
        let ray = Ray::new(Point3::new(0.25, 0.25, 1.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(intersect_triangle(&ray, scene.triangle(TriangleId(0))).is_none());
    }

    #[test]
    fn test_angled_hit_distance() {
        let scene = unit_triangle_scene();
        // 45 degree approach: travels sqrt(2) per unit of z.
        let ray = Ray::new(Point3::new(-0.75, 0.25, 1.0), Vec3::new(1.0, 0.0, -1.0));
        let t = intersect_triangle(&ray, scene.triangle(TriangleId(0))).unwrap();
        assert!((t - 2.0_f32.sqrt()).abs() < 1e-5);
    }
}
