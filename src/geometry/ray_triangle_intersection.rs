use super::{BarycentricCoordinates, EPSILON, FloatType, Ray, Triangle, WorldPoint};

/// Which triangle faces the ray-triangle test ignores.
/// Front face is the one where the vertices appear counter-clockwise.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FaceCulling {
    /// Rays hitting the back face miss
    #[default]
    Back,
    /// Both faces can be hit
    Disabled,
}

impl Triangle<WorldPoint> {
    /// Calculates ray intersection with the triangle.
    /// Returns signed distance along the ray and barycentric uv coordinates of the hit.
    /// The distance is not checked against zero, hits behind the ray origin are reported too.
    ///
    /// Adapted from
    /// <https://en.wikipedia.org/wiki/M%C3%B6ller%E2%80%93Trumbore_intersection_algorithm>
    pub fn intersect(
        &self,
        ray: &Ray,
        culling: FaceCulling,
    ) -> Option<(FloatType, BarycentricCoordinates)> {
        let [e1, e2] = self.edges();

        let ray_cross_e2 = ray.direction.cross(&e2);
        let det = e1.dot(&ray_cross_e2);

        // Also rejects NaN determinants
        let det_ok = match culling {
            FaceCulling::Back => det >= EPSILON,
            FaceCulling::Disabled => det.abs() >= EPSILON,
        };
        if !det_ok {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = ray.origin - self[0];
        let u = inv_det * s.dot(&ray_cross_e2);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let s_cross_e1 = s.cross(&e1);
        let v = inv_det * ray.direction.dot(&s_cross_e1);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = inv_det * e2.dot(&s_cross_e1);
        Some((t, BarycentricCoordinates { u, v }))
    }
}
