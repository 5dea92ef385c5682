mod sphere;
mod triangle;

pub use sphere::Sphere;
pub use triangle::{Triangle, Vertex};

use crate::geometry::{Aabb, HitRecord, Ray, Transform};

use super::Primitive;

/// Any of the supported primitives
#[derive(Clone, Debug)]
pub enum Shape {
    Sphere(Sphere),
    Triangle(Triangle),
}

impl Primitive for Shape {
    fn transform(&self) -> &Transform {
        match self {
            Shape::Sphere(s) => s.transform(),
            Shape::Triangle(t) => t.transform(),
        }
    }

    fn bounding_box(&self) -> &Aabb {
        match self {
            Shape::Sphere(s) => s.bounding_box(),
            Shape::Triangle(t) => t.bounding_box(),
        }
    }

    fn intersect(&self, ray: &Ray) -> Option<HitRecord> {
        match self {
            Shape::Sphere(s) => s.intersect(ray),
            Shape::Triangle(t) => t.intersect(ray),
        }
    }
}

impl From<Sphere> for Shape {
    fn from(value: Sphere) -> Self {
        Shape::Sphere(value)
    }
}

impl From<Triangle> for Shape {
    fn from(value: Triangle) -> Self {
        Shape::Triangle(value)
    }
}
