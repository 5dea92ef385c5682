use std::borrow::Borrow;

use super::{FloatType, WorldPoint, WorldVector};

/// Axis aligned bounding box.
///
/// `center` is a representative sample location of whatever the box was built from
/// (mean of the contributing box centers or points), not the midpoint of `min` and `max`.
/// BVH splitting depends on this.
#[derive(Clone, Debug, PartialEq)]
pub struct Aabb {
    pub center: WorldPoint,
    pub min: WorldPoint,
    pub max: WorldPoint,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl Aabb {
    pub fn new(center: WorldPoint, min: WorldPoint, max: WorldPoint) -> Aabb {
        Aabb { center, min, max }
    }

    /// Smallest box containing all the given boxes, centered at the mean of their centers.
    /// Returns None for empty input.
    pub fn from_boxes<B: Borrow<Aabb>>(boxes: impl IntoIterator<Item = B>) -> Option<Aabb> {
        let mut iter = boxes.into_iter();
        let first = iter.next()?;
        let first = first.borrow();

        let mut ret = first.clone();
        let mut center_sum = first.center.coords;
        let mut count = 1usize;

        for b in iter {
            let b = b.borrow();
            ret.min = ret.min.inf(&b.min);
            ret.max = ret.max.sup(&b.max);
            center_sum += b.center.coords;
            count += 1;
        }

        ret.center = WorldPoint::from(center_sum / count as FloatType);
        Some(ret)
    }

    /// Smallest box containing all the given points, centered at their mean.
    /// Returns None for empty input.
    pub fn from_points<P: Borrow<WorldPoint>>(points: impl IntoIterator<Item = P>) -> Option<Aabb> {
        let mut iter = points.into_iter();
        let first = *iter.next()?.borrow();

        let mut min = first;
        let mut max = first;
        let mut sum = first.coords;
        let mut count = 1usize;

        for p in iter {
            let p = p.borrow();
            min = min.inf(p);
            max = max.sup(p);
            sum += p.coords;
            count += 1;
        }

        Some(Aabb {
            center: WorldPoint::from(sum / count as FloatType),
            min,
            max,
        })
    }

    pub fn size(&self) -> WorldVector {
        self.max - self.min
    }

    /// Axis with the largest extent.
    /// Y and Z only win when strictly larger than both other axes, all ties go to X.
    pub fn dominant_axis(&self) -> Axis {
        let size = self.size();
        if size.y > size.x && size.y > size.z {
            Axis::Y
        } else if size.z > size.x && size.z > size.y {
            Axis::Z
        } else {
            Axis::X
        }
    }

    pub fn contains_point(&self, point: &WorldPoint) -> bool {
        Axis::ALL.iter().all(|axis| {
            let i = axis.index();
            self.min[i] <= point[i] && point[i] <= self.max[i]
        })
    }

    /// Checks the extents only, centers are ignored.
    pub fn contains(&self, other: &Aabb) -> bool {
        self.contains_point(&other.min) && self.contains_point(&other.max)
    }
}
