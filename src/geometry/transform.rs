use std::sync::OnceLock;

use bon::bon;

use super::{WorldMatrix, WorldPoint, WorldRotation, WorldVector};

/// Placement of a primitive in the world: position, rotation and scale.
///
/// The composed matrix is computed on first use and cached until one of the components
/// changes.
#[derive(Clone, Debug)]
pub struct Transform {
    position: WorldVector,
    rotation: WorldRotation,
    scale: WorldVector,

    matrix: OnceLock<WorldMatrix>,
}

#[bon]
impl Transform {
    #[builder]
    pub fn new(
        #[builder(default = WorldVector::zeros())] position: WorldVector,
        #[builder(default = WorldRotation::identity())] rotation: WorldRotation,
        #[builder(default = WorldVector::repeat(1.0))] scale: WorldVector,
    ) -> Self {
        Transform {
            position,
            rotation,
            scale,
            matrix: OnceLock::new(),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::builder().build()
    }
}

impl Transform {
    pub fn position(&self) -> &WorldVector {
        &self.position
    }

    pub fn rotation(&self) -> &WorldRotation {
        &self.rotation
    }

    pub fn scale(&self) -> &WorldVector {
        &self.scale
    }

    pub fn set_position(&mut self, position: WorldVector) {
        self.position = position;
        self.matrix.take();
    }

    pub fn set_rotation(&mut self, rotation: WorldRotation) {
        self.rotation = rotation;
        self.matrix.take();
    }

    pub fn set_scale(&mut self, scale: WorldVector) {
        self.scale = scale;
        self.matrix.take();
    }

    /// World matrix, translation * (rotation * scale)
    pub fn matrix(&self) -> &WorldMatrix {
        self.matrix.get_or_init(|| {
            let rotation_scale =
                self.rotation.to_homogeneous() * WorldMatrix::new_nonuniform_scaling(&self.scale);
            WorldMatrix::new_translation(&self.position) * rotation_scale
        })
    }

    pub fn transform_point(&self, point: &WorldPoint) -> WorldPoint {
        self.matrix().transform_point(point)
    }

    /// Local origin mapped to world space
    pub fn origin(&self) -> WorldPoint {
        self.transform_point(&WorldPoint::origin())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert2::assert;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn default_is_identity() {
        let t = Transform::default();
        assert!(*t.matrix() == WorldMatrix::identity());
        assert!(t.origin() == WorldPoint::origin());
    }

    #[test]
    fn scale_then_rotate_then_translate() {
        let t = Transform::builder()
            .position(WorldVector::new(10.0, 0.0, 0.0))
            .rotation(WorldRotation::from_axis_angle(&WorldVector::z_axis(), FRAC_PI_2))
            .scale(WorldVector::new(2.0, 1.0, 1.0))
            .build();

        // (1, 0, 0) -> scaled (2, 0, 0) -> rotated (0, 2, 0) -> translated (10, 2, 0)
        let p = t.transform_point(&WorldPoint::new(1.0, 0.0, 0.0));
        assert!((p - WorldPoint::new(10.0, 2.0, 0.0)).norm() < 1e-5);
        assert!(t.origin() == WorldPoint::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn setters_invalidate_cached_matrix() {
        let mut t = Transform::default();
        assert!(t.origin() == WorldPoint::origin());

        t.set_position(WorldVector::new(1.0, 2.0, 3.0));
        assert!(t.origin() == WorldPoint::new(1.0, 2.0, 3.0));

        t.set_scale(WorldVector::repeat(3.0));
        let p = t.transform_point(&WorldPoint::new(1.0, 0.0, 0.0));
        assert!((p - WorldPoint::new(4.0, 2.0, 3.0)).norm() < 1e-5);

        t.set_rotation(WorldRotation::from_axis_angle(&WorldVector::y_axis(), FRAC_PI_2));
        let p = t.transform_point(&WorldPoint::new(1.0, 0.0, 0.0));
        assert!((p - WorldPoint::new(1.0, 2.0, 0.0)).norm() < 1e-5);
    }
}
