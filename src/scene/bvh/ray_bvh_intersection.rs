use crate::geometry::Ray;

use super::{Bvh, NodeContent};

impl<P> Bvh<P> {
    /// Collects every primitive stored in a leaf whose bounding box (and all its
    /// ancestors' boxes) the ray crosses.
    ///
    /// The candidates come in leaf order, left subtrees first. Returns None if there
    /// are no candidates. The traversal is exhaustive, finding candidates does not
    /// prune anything.
    pub fn trace(&self, ray: &Ray) -> Option<Vec<&P>> {
        let mut candidates = Vec::new();
        let mut stack = vec![self.root];

        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            if !node.bounding_box.intersects(ray) {
                continue;
            }

            match &node.content {
                NodeContent::Leaf { primitives } => {
                    candidates.extend(self.primitives[primitives.into_range()].iter());
                }
                NodeContent::Inner { children } => {
                    // Reversed, so that the left child is popped first
                    stack.extend(children.iter().rev());
                }
            }
        }

        if candidates.is_empty() {
            None
        } else {
            Some(candidates)
        }
    }
}

#[cfg(test)]
mod test {
    use assert2::{assert, let_assert};
    use proptest::prelude::any;
    use test_strategy::proptest;

    use crate::{
        geometry::{
            FaceCulling, FloatType, HitRecord, Ray, WorldPoint, WorldVector,
            test::{NonzeroWorldVectorWrapper, RadiusWrapper, WorldPointWrapper},
        },
        scene::{Bvh, BvhSettings, Primitive, Shape, Sphere, Triangle, Vertex},
    };

    fn vertex(x: FloatType, y: FloatType, z: FloatType) -> Vertex {
        Vertex::builder().coord(WorldPoint::new(x, y, z)).build()
    }

    /// Row of unit spheres along x, 3 units apart, and a triangle far along +y.
    fn scene() -> Vec<Shape> {
        let mut shapes: Vec<Shape> = (0..10)
            .map(|i| {
                Sphere::builder()
                    .center(WorldPoint::new(3.0 * i as FloatType, 0.0, 0.0))
                    .radius(1.0)
                    .build()
                    .into()
            })
            .collect();
        shapes.push(
            Triangle::new(
                vertex(0.0, 100.0, 0.0),
                vertex(1.0, 100.0, 0.0),
                vertex(0.0, 101.0, 0.0),
            )
            .with_culling(FaceCulling::Disabled)
            .into(),
        );
        shapes
    }

    /// Narrow phase the way a caller would do it
    fn nearest_hit<'a>(candidates: &[&'a Shape], ray: &Ray) -> Option<(&'a Shape, HitRecord)> {
        candidates
            .iter()
            .filter_map(|shape| shape.intersect(ray).map(|hit| (*shape, hit)))
            .filter(|(_, hit)| hit.distance >= 0.0)
            .min_by(|a, b| a.1.distance.total_cmp(&b.1.distance))
    }

    #[test]
    fn trace_finds_hit_sphere() {
        let bvh = Bvh::build(scene(), BvhSettings::default()).unwrap();
        let ray = Ray::new(
            WorldPoint::new(9.0, 0.0, -5.0),
            WorldVector::new(0.0, 0.0, 1.0),
        );

        let_assert!(Some(candidates) = bvh.trace(&ray));
        let_assert!(Some((Shape::Sphere(sphere), hit)) = nearest_hit(&candidates, &ray));
        assert!(sphere.center() == WorldPoint::new(9.0, 0.0, 0.0));
        assert!((hit.distance - 4.0).abs() < 1e-5);
    }

    #[test]
    fn trace_finds_triangle() {
        let bvh = Bvh::build(scene(), BvhSettings::default()).unwrap();
        let ray = Ray::new(
            WorldPoint::new(0.25, 100.25, -5.0),
            WorldVector::new(0.0, 0.0, 1.0),
        );

        let_assert!(Some(candidates) = bvh.trace(&ray));
        let_assert!(Some((Shape::Triangle(_), hit)) = nearest_hit(&candidates, &ray));
        assert!((hit.distance - 5.0).abs() < 1e-5);
        assert!(hit.normal == WorldVector::zeros());
        assert!(hit.texture_coordinates.is_none());
    }

    #[test]
    fn ray_along_row_collects_every_sphere() {
        let bvh = Bvh::build(scene(), BvhSettings::default()).unwrap();
        let ray = Ray::new(
            WorldPoint::new(-10.0, 0.0, 0.0),
            WorldVector::new(1.0, 0.0, 0.0),
        );

        let_assert!(Some(candidates) = bvh.trace(&ray));
        let spheres = candidates
            .iter()
            .filter(|shape| matches!(shape, Shape::Sphere(_)))
            .count();
        assert!(spheres == 10);

        let_assert!(Some((Shape::Sphere(sphere), hit)) = nearest_hit(&candidates, &ray));
        assert!(sphere.center() == WorldPoint::origin());
        assert!((hit.distance - 9.0).abs() < 1e-5);
    }

    #[test]
    fn reversed_rays_miss() {
        let bvh = Bvh::build(scene(), BvhSettings::default()).unwrap();

        let sphere_ray = Ray::new(
            WorldPoint::new(9.0, 0.0, -5.0),
            WorldVector::new(0.0, 0.0, -1.0),
        );
        assert!(bvh.trace(&sphere_ray).is_none());

        let triangle_ray = Ray::new(
            WorldPoint::new(0.25, 100.25, -5.0),
            WorldVector::new(0.0, 0.0, -1.0),
        );
        assert!(bvh.trace(&triangle_ray).is_none());
    }

    #[test]
    fn ray_beside_scene_misses() {
        let bvh = Bvh::build(scene(), BvhSettings::default()).unwrap();
        let ray = Ray::new(
            WorldPoint::new(-5.0, 0.0, -5.0),
            WorldVector::new(0.0, 0.0, 1.0),
        );
        assert!(bvh.trace(&ray).is_none());
    }

    #[test]
    fn coincident_spheres_are_all_candidates() {
        let spheres = (0..7).map(|_| {
            Sphere::builder()
                .center(WorldPoint::new(1.0, 1.0, 1.0))
                .radius(0.5)
                .build()
        });
        let bvh = Bvh::build(spheres, BvhSettings::default()).unwrap();
        let ray = Ray::new(
            WorldPoint::new(1.0, 1.0, -5.0),
            WorldVector::new(0.0, 0.0, 1.0),
        );

        let_assert!(Some(candidates) = bvh.trace(&ray));
        assert!(candidates.len() == 7);
    }

    #[proptest]
    fn traced_candidates_contain_hit_sphere(
        #[strategy(proptest::collection::vec(
            (any::<WorldPointWrapper>(), any::<RadiusWrapper>()),
            1..60
        ))]
        spheres: Vec<(WorldPointWrapper, RadiusWrapper)>,
        #[strategy(0..#spheres.len())] target: usize,
        direction: NonzeroWorldVectorWrapper,
        #[strategy(1.0f32..50.0)] distance: f32,
    ) {
        let (center, radius) = spheres[target];
        let shapes = spheres
            .iter()
            .map(|(center, radius)| Sphere::builder().center(**center).radius(**radius).build());
        let bvh = Bvh::build(shapes, BvhSettings::default()).unwrap();

        let direction = direction.normalize();
        let origin = *center - direction * (*radius + distance);
        let ray = Ray::new(origin, direction);

        let_assert!(Some(candidates) = bvh.trace(&ray));
        assert!(
            candidates
                .iter()
                .any(|s| s.center() == *center && s.radius() == *radius)
        );
    }

    #[proptest]
    fn every_hit_is_a_candidate(
        #[strategy(proptest::collection::vec(
            (any::<WorldPointWrapper>(), any::<RadiusWrapper>()),
            1..60
        ))]
        spheres: Vec<(WorldPointWrapper, RadiusWrapper)>,
        origin: WorldPointWrapper,
        direction: NonzeroWorldVectorWrapper,
    ) {
        let spheres = spheres
            .iter()
            .map(|(center, radius)| Sphere::builder().center(**center).radius(**radius).build())
            .collect::<Vec<_>>();
        let bvh = Bvh::build(spheres.iter().cloned(), BvhSettings::default()).unwrap();
        let ray = Ray::new(*origin, *direction);

        let candidates = bvh.trace(&ray).unwrap_or_default();
        for sphere in &spheres {
            // Only hits that are clearly inside the sphere's box and in front of the origin
            let Some(hit) = sphere.intersect(&ray) else {
                continue;
            };
            let near_box_face = (hit.point - sphere.center()).abs().max() > 0.9 * sphere.radius();
            if near_box_face || hit.distance < 0.1 {
                continue;
            }
            assert!(
                candidates
                    .iter()
                    .any(|c| c.center() == sphere.center() && c.radius() == sphere.radius())
            );
        }
    }
}
