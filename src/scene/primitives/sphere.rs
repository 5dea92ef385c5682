use std::f32::consts::PI;

use assert2::assert;
use bon::bon;

use crate::{
    geometry::{
        Aabb, FloatType, HitRecord, Ray, TexturePoint, Transform, WorldPoint, WorldRotation,
        WorldVector,
    },
    scene::Primitive,
};

#[derive(Clone, Debug)]
pub struct Sphere {
    transform: Transform,
    radius: FloatType,
    bounding_box: Aabb,
}

#[bon]
impl Sphere {
    #[builder]
    pub fn new(
        center: WorldPoint,
        #[builder(default = WorldRotation::identity())] rotation: WorldRotation,
        radius: FloatType,
    ) -> Self {
        assert!(radius >= 0.0, "Sphere radius must be non-negative");

        let transform = Transform::builder()
            .position(center.coords)
            .rotation(rotation)
            .build();

        let origin = transform.origin();
        let r_vec = WorldVector::repeat(radius);
        let bounding_box = Aabb::new(origin, origin - r_vec, origin + r_vec);

        Sphere {
            transform,
            radius,
            bounding_box,
        }
    }
}

impl Sphere {
    pub fn center(&self) -> WorldPoint {
        self.transform.origin()
    }

    pub fn radius(&self) -> FloatType {
        self.radius
    }

    /// Moving the sphere does not update its bounding box.
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}

impl Primitive for Sphere {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn bounding_box(&self) -> &Aabb {
        &self.bounding_box
    }

    fn intersect(&self, ray: &Ray) -> Option<HitRecord> {
        let center = self.center();
        let delta = center - ray.origin;
        let adj = delta.dot(&ray.direction);

        // Squared distance between the center and the ray line
        let d2 = delta.dot(&delta) - adj * adj;
        let radius_squared = self.radius * self.radius;
        // Written so that a NaN ray misses
        let hits_line = d2 <= radius_squared;
        if !hits_line {
            return None;
        }

        let thickness = (radius_squared - d2).sqrt();
        let t0 = adj - thickness;
        let t1 = adj + thickness;

        let distance = if t0 < 0.0 && t1 < 0.0 {
            return None;
        } else if t0 < 0.0 {
            t1
        } else if t1 < 0.0 {
            t0
        } else {
            t0.min(t1)
        };

        let point = ray.point_at(distance);
        let normal = (point - center).normalize();

        let local = self.transform.rotation().inverse_transform_vector(&(point - center));
        let texture_coordinates = TexturePoint::new(
            0.5 * (1.0 + local.z.atan2(local.x) / PI),
            (local.y / self.radius).clamp(-1.0, 1.0).acos() / PI,
        );

        Some(HitRecord {
            distance,
            point,
            normal,
            texture_coordinates: Some(texture_coordinates),
            tangent: None,
        })
    }
}
