mod aabb;
mod ray_box_intersection;
mod ray_triangle_intersection;
mod transform;
mod triangle;

pub use aabb::{Aabb, Axis};
pub use ray_triangle_intersection::FaceCulling;
pub use transform::Transform;
pub use triangle::{BarycentricCoordinates, Triangle};

pub type FloatType = f32;
pub type WorldPoint = nalgebra::Point3<FloatType>;
pub type WorldVector = nalgebra::Vector3<FloatType>;
pub type WorldRotation = nalgebra::UnitQuaternion<FloatType>;
pub type WorldMatrix = nalgebra::Matrix4<FloatType>;
pub type TexturePoint = nalgebra::Point2<FloatType>;

/// Determinant threshold of the ray-triangle test
pub const EPSILON: FloatType = 1e-8;

#[derive(Copy, Clone, Debug)]
pub struct Ray {
    pub origin: WorldPoint,
    /// Direction of the ray, expected to be normalized.
    /// Rays created with `Ray::new` always are, the intersection code never checks.
    pub direction: WorldVector,
}

impl Ray {
    pub fn new(origin: WorldPoint, direction: WorldVector) -> Ray {
        Ray {
            origin,
            direction: direction.normalize(),
        }
    }

    pub fn point_at(&self, distance: FloatType) -> WorldPoint {
        self.origin + self.direction * distance
    }
}

/// Result of a narrow phase intersection test
#[derive(Clone, Debug, PartialEq)]
pub struct HitRecord {
    /// Distance along the ray
    pub distance: FloatType,
    pub point: WorldPoint,
    /// Surface normal at the hit point.
    /// Not necessarily unit length, triangles blend vertex normals without renormalizing.
    pub normal: WorldVector,
    pub texture_coordinates: Option<TexturePoint>,
    pub tangent: Option<WorldVector>,
}
