/// Object-local transform parameters and the model matrix built from them
use nalgebra::{Matrix4, Rotation3, Vector3};

/// Snapshot of a model's uniform scale, Euler rotation and world offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelTransform {
    pub scale: f32,
    /// Euler angles in radians about X, Y and Z
    pub rotation: Vector3<f32>,
    pub translation: Vector3<f32>,
}

impl ModelTransform {
    /// Move by a world-space offset
    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.translation += Vector3::new(dx, dy, dz);
    }

    /// Add to the Euler angles (radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.rotation += Vector3::new(dx, dy, dz);
    }

    /// Change the scale by `delta`, never going below `min`
    pub fn rescale(&mut self, delta: f32, min: f32) {
        self.scale = (self.scale + delta).max(min);
    }

    /// Scale, then rotate about X, Y and Z in turn, then translate
    pub fn matrix(&self) -> Matrix4<f32> {
        let orientation = Rotation3::from_axis_angle(&Vector3::z_axis(), self.rotation.z)
            * Rotation3::from_axis_angle(&Vector3::y_axis(), self.rotation.y)
            * Rotation3::from_axis_angle(&Vector3::x_axis(), self.rotation.x);

        Matrix4::new_translation(&self.translation)
            * orientation.to_homogeneous()
            * Matrix4::new_scaling(self.scale)
    }
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotation: Vector3::zeros(),
            translation: Vector3::zeros(),
        }
    }
}
