//! Uniform domain division: grid sizing and triangle-to-voxel assignment.
//!
//! The domain is the scene's bounding box, permanently inflated by
//! [`BOUNDS_EPSILON`] so every vertex is strictly interior. Resolution
//! follows a cube-root heuristic targeting roughly one triangle per voxel
//! by volume, which keeps expected traversal cost near `O(N^(1/3))` per
//! ray for uniformly distributed triangles.
//!
//! Triangle assignment is conservative: a candidate voxel is kept unless
//! all eight of its corners lie strictly on one side of the triangle's
//! supporting plane. False positives cost extra intersection tests during
//! traversal, never correctness.

use std::sync::Arc;

use crate::error::Result;
use trigrid_math::{Point3, Vec3, BOUNDS_EPSILON};
use trigrid_scene::{Scene, Triangle, TriangleId};

/// Triangle slots added to a voxel list per allocation step.
///
/// Additive growth matches the small per-voxel counts the cube-root sizing
/// produces; lists stay within a chunk or two of their final size.
const VOXEL_CHUNK: usize = 10;

/// A grid cell holding the triangles assigned to it.
#[derive(Debug, Clone, Default)]
pub struct Voxel {
    triangles: Vec<TriangleId>,
}

impl Voxel {
    /// Triangles assigned to this voxel, in insertion order.
    #[inline]
    pub fn triangles(&self) -> &[TriangleId] {
        &self.triangles
    }

    /// Whether no triangle was assigned to this voxel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Append a triangle, growing the list by a fixed additive chunk.
    fn push(&mut self, id: TriangleId) -> Result<()> {
        if self.triangles.len() == self.triangles.capacity() {
            self.triangles.try_reserve_exact(VOXEL_CHUNK)?;
        }
        self.triangles.push(id);
        Ok(())
    }
}

/// Occupancy diagnostics recorded while the grid is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStats {
    /// Grid resolution per axis.
    pub resolution: [usize; 3],
    /// Total number of voxels.
    pub voxel_count: usize,
    /// Voxels holding at least one triangle.
    pub occupied_voxels: usize,
    /// Largest per-voxel triangle count.
    pub max_triangles: usize,
    /// Total triangle references stored across all voxels.
    pub assignments: usize,
}

/// Uniform voxel grid over a triangle scene.
///
/// Built once, then read-only; queries from any number of threads need no
/// synchronization. The scene is held behind an [`Arc`] so query threads
/// share it without copying.
#[derive(Debug, Clone)]
pub struct UniformGrid {
    nv: [usize; 3],
    s: Vec3,
    dmin: Point3,
    voxels: Vec<Voxel>,
    scene: Arc<Scene>,
}

impl UniformGrid {
    /// Build the grid for `scene` and assign every triangle to the voxels
    /// it may overlap.
    ///
    /// The scene bounds are inflated by [`BOUNDS_EPSILON`] per axis as a
    /// permanent side effect, visible through [`UniformGrid::scene`].
    pub fn build(mut scene: Scene) -> Result<Self> {
        scene.bounds_mut().expand(BOUNDS_EPSILON);
        let bounds = *scene.bounds();
        let ds = bounds.extent().add_scalar(BOUNDS_EPSILON);

        // Cube-root density heuristic, biased slightly toward finer grids.
        let density =
            (scene.len() as f32 / (ds.x * ds.y * ds.z)).cbrt() + BOUNDS_EPSILON;
        let mut nv = [0usize; 3];
        let mut s = Vec3::zeros();
        for a in 0..3 {
            let cells = (ds[a] * density).ceil().max(1.0);
            nv[a] = cells as usize;
            s[a] = ds[a] / cells;
        }

        let count = nv[0] * nv[1] * nv[2];
        let mut voxels = Vec::new();
        voxels.try_reserve_exact(count)?;
        voxels.resize_with(count, Voxel::default);

        let mut grid = Self {
            nv,
            s,
            dmin: bounds.min,
            voxels,
            scene: Arc::new(scene),
        };
        grid.voxelize()?;
        Ok(grid)
    }

    /// Grid resolution per axis.
    #[inline]
    pub fn resolution(&self) -> [usize; 3] {
        self.nv
    }

    /// Size of a single voxel per axis.
    #[inline]
    pub fn voxel_size(&self) -> Vec3 {
        self.s
    }

    /// Minimum corner of the (inflated) domain.
    #[inline]
    pub fn origin(&self) -> Point3 {
        self.dmin
    }

    /// The scene this grid was built over, with inflated bounds.
    #[inline]
    pub fn scene(&self) -> &Arc<Scene> {
        &self.scene
    }

    /// Linearized offset of voxel `(i, j, k)`.
    #[inline]
    pub fn voxel_index(&self, i: usize, j: usize, k: usize) -> usize {
        (i * self.nv[1] + j) * self.nv[2] + k
    }

    /// The voxel at grid coordinates `(i, j, k)`.
    #[inline]
    pub fn voxel(&self, i: usize, j: usize, k: usize) -> &Voxel {
        &self.voxels[self.voxel_index(i, j, k)]
    }

    /// Grid coordinates of the voxel containing `p`, or `None` when `p`
    /// lies outside the domain.
    ///
    /// Indices truncate toward zero; points below `dmin` are rejected
    /// explicitly so they cannot fold into slice 0.
    pub fn voxel_of(&self, p: &Point3) -> Option<[usize; 3]> {
        let mut cell = [0usize; 3];
        for a in 0..3 {
            let f = (p[a] - self.dmin[a]) / self.s[a];
            if f < 0.0 {
                return None;
            }
            let idx = f as usize;
            if idx >= self.nv[a] {
                return None;
            }
            cell[a] = idx;
        }
        Some(cell)
    }

    /// Occupancy diagnostics.
    pub fn stats(&self) -> GridStats {
        let mut occupied = 0;
        let mut max_triangles = 0;
        let mut assignments = 0;
        for voxel in &self.voxels {
            let n = voxel.triangles.len();
            if n > 0 {
                occupied += 1;
            }
            max_triangles = max_triangles.max(n);
            assignments += n;
        }
        GridStats {
            resolution: self.nv,
            voxel_count: self.voxels.len(),
            occupied_voxels: occupied,
            max_triangles,
            assignments,
        }
    }

    /// Vertex position to grid coordinates, clamped into range.
    ///
    /// Used only for voxelization candidates: vertices are strictly
    /// interior after inflation, the clamp merely absorbs rounding at the
    /// last slice.
    fn clamped_cell(&self, p: &Point3) -> [usize; 3] {
        let mut cell = [0usize; 3];
        for a in 0..3 {
            let f = (p[a] - self.dmin[a]) / self.s[a];
            cell[a] = (f.max(0.0) as usize).min(self.nv[a] - 1);
        }
        cell
    }

    /// Assign every scene triangle to the voxels it may overlap.
    fn voxelize(&mut self) -> Result<()> {
        let scene = Arc::clone(&self.scene);
        for (index, triangle) in scene.triangles().iter().enumerate() {
            let id = TriangleId(index as u32);

            // Candidate range: the componentwise vertex index box.
            let ci = self.clamped_cell(&triangle.i);
            let cj = self.clamped_cell(&triangle.j);
            let ck = self.clamped_cell(&triangle.k);
            let mut lo = [0usize; 3];
            let mut hi = [0usize; 3];
            for a in 0..3 {
                lo[a] = ci[a].min(cj[a]).min(ck[a]);
                hi[a] = ci[a].max(cj[a]).max(ck[a]);
            }

            // Single-voxel triangles skip the corner tests entirely.
            if lo == hi {
                let idx = self.voxel_index(lo[0], lo[1], lo[2]);
                self.voxels[idx].push(id)?;
                continue;
            }

            for i in lo[0]..=hi[0] {
                for j in lo[1]..=hi[1] {
                    for k in lo[2]..=hi[2] {
                        let min = Point3::new(
                            self.dmin.x + i as f32 * self.s.x,
                            self.dmin.y + j as f32 * self.s.y,
                            self.dmin.z + k as f32 * self.s.z,
                        );
                        let max = min + self.s;
                        if plane_separates(triangle, &min, &max) {
                            continue;
                        }
                        let idx = self.voxel_index(i, j, k);
                        self.voxels[idx].push(id)?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// True when all eight corners of the box `[min, max]` lie strictly on one
/// side of the triangle's supporting plane, i.e. the plane cannot cross
/// the voxel. A corner exactly on the plane keeps the voxel.
fn plane_separates(triangle: &Triangle, min: &Point3, max: &Point3) -> bool {
    let corners = [
        Point3::new(min.x, min.y, min.z),
        Point3::new(max.x, min.y, min.z),
        Point3::new(min.x, min.y, max.z),
        Point3::new(max.x, min.y, max.z),
        Point3::new(min.x, max.y, min.z),
        Point3::new(max.x, max.y, min.z),
        Point3::new(min.x, max.y, max.z),
        Point3::new(max.x, max.y, max.z),
    ];
    let first = triangle.signed_distance(&corners[0]);
    corners[1..]
        .iter()
        .all(|c| first * triangle.signed_distance(c) > 0.0)
}
