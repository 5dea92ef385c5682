use super::{Aabb, Axis, FloatType, Ray};

impl Aabb {
    /// Slab test of the ray against the box.
    ///
    /// Zero direction components divide into +-infinity, which the interval logic handles.
    /// A ray starting exactly on a slab plane while parallel to it produces NaN and is rejected.
    /// Boxes lying entirely behind the ray origin are rejected too.
    pub fn intersects(&self, ray: &Ray) -> bool {
        let mut t_min = FloatType::NEG_INFINITY;
        let mut t_max = FloatType::INFINITY;

        for axis in Axis::ALL {
            let i = axis.index();
            let mut axis_min = (self.min[i] - ray.origin[i]) / ray.direction[i];
            let mut axis_max = (self.max[i] - ray.origin[i]) / ray.direction[i];
            if axis_min > axis_max {
                std::mem::swap(&mut axis_min, &mut axis_max);
            }

            // Written so that comparisons with NaN fall through to the rejection
            let overlaps = t_min <= axis_max && axis_min <= t_max;
            if !overlaps {
                return false;
            }

            t_min = t_min.max(axis_min);
            t_max = t_max.min(axis_max);
        }

        t_max >= 0.0
    }
}
