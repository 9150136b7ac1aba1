//! Grid traversal: ray-entry location and front-to-back 3D-DDA stepping.
//!
//! The traverser visits voxels in strict front-to-back order along the
//! ray, so the first accepted hit is the globally nearest one. A hit is
//! accepted only if its distance does not exceed the current voxel's
//! parametric exit; anything beyond that belongs to a later voxel and
//! will be found when that voxel is visited.

use crate::grid::UniformGrid;
use crate::intersect::intersect_triangle;
use crate::ray::{Ray, RayHit};
use trigrid_scene::TriangleId;

impl UniformGrid {
    /// Grid coordinates of the first voxel `ray` enters, or `None` when
    /// the ray never reaches the domain.
    ///
    /// A ray entering an axis-aligned box crosses exactly two of its six
    /// bounding planes. Both of the two smallest positive crossings are
    /// tested, because rounding can push the point at the smaller one just
    /// outside an adjacent face.
    pub fn entry_voxel(&self, ray: &Ray) -> Option<[usize; 3]> {
        if let Some(cell) = self.voxel_of(&ray.origin) {
            return Some(cell);
        }

        let bounds = self.scene().bounds();
        let o = &ray.origin;
        let r = ray.direction.as_ref();

        let mut t1 = f32::MAX;
        let mut t2 = f32::MAX;
        for a in 0..3 {
            if r[a] == 0.0 {
                continue;
            }
            for wall in [bounds.min[a], bounds.max[a]] {
                let t = (wall - o[a]) / r[a];
                if t > 0.0 {
                    if t < t1 {
                        t2 = t1;
                        t1 = t;
                    } else if t < t2 {
                        t2 = t;
                    }
                }
            }
        }

        if t1 == f32::MAX {
            return None;
        }
        if let Some(cell) = self.voxel_of(&ray.at(t1)) {
            return Some(cell);
        }
        if t2 == f32::MAX {
            return None;
        }
        self.voxel_of(&ray.at(t2))
    }

    /// Walk voxels along `ray` front to back and return the nearest
    /// intersected triangle, or `None` when the ray misses the domain or
    /// crosses it without a hit.
    ///
    /// `current` excludes the triangle a secondary ray originates from.
    pub fn trace_closest(&self, ray: &Ray, current: Option<TriangleId>) -> Option<RayHit> {
        let entry = self.entry_voxel(ray)?;
        let mut cell = [entry[0] as isize, entry[1] as isize, entry[2] as isize];

        let o = &ray.origin;
        let r = ray.direction.as_ref();
        let dmin = self.origin();
        let size = self.voxel_size();

        // Per-axis crossing parameters at the entry voxel's faces: `t[a]`
        // is the nearer crossing, `dt[a]` the parametric width of a voxel.
        // Axes the ray never crosses get an infinite width.
        let mut t = [0.0f32; 3];
        let mut dt = [0.0f32; 3];
        let mut step = [0isize; 3];
        for a in 0..3 {
            step[a] = if r[a] > 0.0 { 1 } else { -1 };
            if r[a] == 0.0 {
                t[a] = 0.0;
                dt[a] = f32::INFINITY;
            } else {
                let lo = dmin[a] + cell[a] as f32 * size[a];
                let t_lo = (lo - o[a]) / r[a];
                let t_hi = (lo + size[a] - o[a]) / r[a];
                t[a] = t_lo.min(t_hi);
                dt[a] = (t_hi - t_lo).abs();
            }
        }

        loop {
            let next = [t[0] + dt[0], t[1] + dt[1], t[2] + dt[2]];
            let t_exit = next[0].min(next[1]).min(next[2]);

            let voxel = self.voxel(cell[0] as usize, cell[1] as usize, cell[2] as usize);
            if !voxel.is_empty() {
                let mut nearest: Option<(f32, TriangleId)> = None;
                for &id in voxel.triangles() {
                    if current == Some(id) {
                        continue;
                    }
                    if let Some(d) = intersect_triangle(ray, self.scene().triangle(id)) {
                        // Hits past the voxel's exit belong to later
                        // voxels; accepting them here would break
                        // front-to-back ordering.
                        if d <= t_exit && nearest.is_none_or(|(best, _)| d < best) {
                            nearest = Some((d, id));
                        }
                    }
                }
                if let Some((d, id)) = nearest {
                    return Some(RayHit {
                        t: d,
                        point: ray.at(d),
                        triangle: id,
                    });
                }
            }

            // Step across the nearest upcoming plane; ties favor x, then y.
            let mut axis = 0;
            if next[1] < next[axis] {
                axis = 1;
            }
            if next[2] < next[axis] {
                axis = 2;
            }
            t[axis] = next[axis];
            cell[axis] += step[axis];
            if cell[axis] < 0 || cell[axis] >= self.nv_isize(axis) {
                return None;
            }
        }
    }

    #[inline]
    fn nv_isize(&self, axis: usize) -> isize {
        self.resolution()[axis] as isize
    }
}
