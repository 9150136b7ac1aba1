#![warn(missing_docs)]

//! Immutable triangle-scene view for the trigrid ray-tracing core.
//!
//! A [`Scene`] owns the triangle array and the axis-aligned domain bounds.
//! Construction precomputes, per triangle, a unit plane normal oriented
//! toward the observer and the plane offset `d` satisfying `n·i + d = 0`
//! at every vertex. After construction the scene is read-only; the grid
//! refers to triangles by [`TriangleId`] index and never owns them.

mod bounds;

pub use bounds::Aabb3;

use nalgebra::Unit;
use thiserror::Error;
use trigrid_math::{Dir3, Point3};

/// Errors that can occur while building a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    /// Triangle whose edge cross product has zero length.
    #[error("triangle {index} is degenerate (zero area)")]
    DegenerateTriangle {
        /// Position of the offending triangle in the input.
        index: usize,
    },
}

/// Result type for scene construction.
pub type Result<T> = std::result::Result<T, SceneError>;

/// Stable identity of a triangle: its index in the scene's triangle array.
///
/// Voxels store these instead of pointers, so the grid's lifetime is
/// decoupled from the scene's memory layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriangleId(pub u32);

impl TriangleId {
    /// The id as a `usize` array index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A triangle with its precomputed supporting plane.
#[derive(Debug, Clone)]
pub struct Triangle {
    /// First vertex.
    pub i: Point3,
    /// Second vertex.
    pub j: Point3,
    /// Third vertex.
    pub k: Point3,
    /// Unit plane normal, oriented toward the observer.
    pub normal: Dir3,
    /// Plane offset `d` such that `normal · x + d = 0` for points on the plane.
    pub d: f32,
}

impl Triangle {
    /// Build a triangle from its vertices, orienting the normal toward
    /// `observer`. Returns `None` for zero-area triangles.
    fn from_vertices(i: Point3, j: Point3, k: Point3, observer: &Point3) -> Option<Self> {
        let ij = j - i;
        let ik = k - i;
        let mut normal = Unit::try_new(ij.cross(&ik), 1e-12)?;
        if (i - *observer).dot(normal.as_ref()) > 0.0 {
            normal = Unit::new_unchecked(-normal.into_inner());
        }
        let d = -normal.as_ref().dot(&i.coords);
        Some(Self { i, j, k, normal, d })
    }

    /// The supporting plane as `(unit normal, offset)`.
    #[inline]
    pub fn plane(&self) -> (Dir3, f32) {
        (self.normal, self.d)
    }

    /// Signed distance from `p` to the supporting plane.
    ///
    /// Zero on the plane, positive on the normal side. The voxelizer keeps
    /// any voxel whose corners do not all agree on this sign.
    #[inline]
    pub fn signed_distance(&self, p: &Point3) -> f32 {
        self.normal.as_ref().dot(&p.coords) + self.d
    }

    /// Axis-aligned box of the three vertices.
    pub fn vertex_aabb(&self) -> Aabb3 {
        let mut aabb = Aabb3::empty();
        aabb.include_point(&self.i);
        aabb.include_point(&self.j);
        aabb.include_point(&self.k);
        aabb
    }
}

/// A read-only triangle scene with its axis-aligned domain bounds.
#[derive(Debug, Clone)]
pub struct Scene {
    triangles: Vec<Triangle>,
    bounds: Aabb3,
}

impl Scene {
    /// Build a scene from raw vertex triples.
    ///
    /// For each triangle this computes the unit normal from the edge cross
    /// product, flips it to face `observer`, and derives the plane offset
    /// `d = -n·i`. Domain bounds accumulate every vertex.
    pub fn from_triangles(
        triangles: impl IntoIterator<Item = [Point3; 3]>,
        observer: Point3,
    ) -> Result<Self> {
        let mut out = Vec::new();
        let mut bounds = Aabb3::empty();
        for (index, [i, j, k]) in triangles.into_iter().enumerate() {
            let triangle = Triangle::from_vertices(i, j, k, &observer)
                .ok_or(SceneError::DegenerateTriangle { index })?;
            bounds.include_point(&triangle.i);
            bounds.include_point(&triangle.j);
            bounds.include_point(&triangle.k);
            out.push(triangle);
        }
        if out.is_empty() {
            // The grid still needs a finite domain to size itself from.
            bounds = Aabb3::new(Point3::origin(), Point3::origin());
        }
        Ok(Self {
            triangles: out,
            bounds,
        })
    }

    /// All triangles, indexed by [`TriangleId`].
    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Look up a triangle by id.
    #[inline]
    pub fn triangle(&self, id: TriangleId) -> &Triangle {
        &self.triangles[id.index()]
    }

    /// The axis-aligned domain bounds.
    #[inline]
    pub fn bounds(&self) -> &Aabb3 {
        &self.bounds
    }

    /// Mutable access to the bounds, for the grid's one-time inflation.
    #[inline]
    pub fn bounds_mut(&mut self) -> &mut Aabb3 {
        &mut self.bounds
    }

    /// Number of triangles.
    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the scene holds no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trigrid_math::PLANE_TOLERANCE;

    fn unit_triangle() -> [Point3; 3] {
        [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_plane_from_vertices() {
        let scene =
            Scene::from_triangles([unit_triangle()], Point3::new(0.25, 0.25, 1.0)).unwrap();
        let t = scene.triangle(TriangleId(0));
        assert!((t.normal.as_ref().z - 1.0).abs() < 1e-6);
        assert!(t.d.abs() < 1e-6);
    }

    #[test]
    fn test_normal_faces_observer() {
        // Observer below the XY plane flips the normal to -Z.
        let scene =
            Scene::from_triangles([unit_triangle()], Point3::new(0.25, 0.25, -1.0)).unwrap();
        let t = scene.triangle(TriangleId(0));
        assert!((t.normal.as_ref().z + 1.0).abs() < 1e-6);
        assert!(t.d.abs() < 1e-6);
    }

    #[test]
    fn test_plane_invariant_all_vertices() {
        let verts = [
            Point3::new(0.3, -1.2, 4.0),
            Point3::new(2.5, 0.7, -0.5),
            Point3::new(-1.0, 3.0, 1.5),
        ];
        let scene = Scene::from_triangles([verts], Point3::new(0.0, 0.0, 10.0)).unwrap();
        let t = scene.triangle(TriangleId(0));
        let extent = scene.bounds().extent().norm();
        for v in [&t.i, &t.j, &t.k] {
            assert!(t.signed_distance(v).abs() <= PLANE_TOLERANCE * extent.max(1.0));
        }
    }

    #[test]
    fn test_degenerate_triangle_rejected() {
        let collinear = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 2.0, 2.0),
        ];
        let err = Scene::from_triangles([collinear], Point3::origin()).unwrap_err();
        assert!(matches!(err, SceneError::DegenerateTriangle { index: 0 }));
    }

    #[test]
    fn test_bounds_accumulate_vertices() {
        let a = [
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ];
        let b = [
            Point3::new(0.0, 0.0, -3.0),
            Point3::new(1.0, 0.0, 5.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let scene = Scene::from_triangles([a, b], Point3::new(0.0, 0.0, 10.0)).unwrap();
        assert_eq!(scene.bounds().min, Point3::new(-1.0, 0.0, -3.0));
        assert_eq!(scene.bounds().max, Point3::new(1.0, 2.0, 5.0));
    }

    #[test]
    fn test_empty_scene_has_finite_bounds() {
        let scene = Scene::from_triangles([], Point3::origin()).unwrap();
        assert!(scene.is_empty());
        assert_eq!(scene.bounds().min, Point3::origin());
        assert_eq!(scene.bounds().max, Point3::origin());
    }

    #[test]
    fn test_vertex_aabb() {
        let scene =
            Scene::from_triangles([unit_triangle()], Point3::new(0.0, 0.0, 1.0)).unwrap();
        let aabb = scene.triangle(TriangleId(0)).vertex_aabb();
        assert_eq!(aabb.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(aabb.max, Point3::new(1.0, 1.0, 0.0));
    }
}
