pub mod bvh;
pub mod primitives;

use crate::geometry::{Aabb, HitRecord, Ray, Transform};

pub use bvh::{BuildError, Bvh, BvhSettings, BvhStatistics};
pub use primitives::{Shape, Sphere, Triangle, Vertex};

/// Geometry that can be placed into a BVH and intersected with rays.
pub trait Primitive {
    fn transform(&self) -> &Transform;

    /// World space bounding box, fixed when the primitive is created.
    fn bounding_box(&self) -> &Aabb;

    /// Exact intersection of the ray with the primitive.
    fn intersect(&self, ray: &Ray) -> Option<HitRecord>;
}
