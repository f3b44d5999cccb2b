//! Frame transform state and matrix builders
use nalgebra::{Matrix4, Vector3};

/// Smallest uniform scale a [`TransformState`] will accept.
pub const MIN_SCALE: f32 = 0.1;

/// Non-destructive model transform applied to a mesh every frame.
///
/// Angles are in degrees and accumulate without wraparound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    pub rot_x: f32,
    pub rot_y: f32,
    pub rot_z: f32,
    pub scale: f32,
    pub translation: Vector3<f32>,
}

impl TransformState {
    pub fn new(translation: Vector3<f32>) -> Self {
        Self {
            rot_x: 0.0,
            rot_y: 0.0,
            rot_z: 0.0,
            scale: 1.0,
            translation,
        }
    }

    pub fn identity() -> Self {
        Self::new(Vector3::zeros())
    }

    /// Rotate by delta amounts (in degrees)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.rot_x += dx;
        self.rot_y += dy;
        self.rot_z += dz;
    }

    pub fn translate(&mut self, delta: Vector3<f32>) {
        self.translation += delta;
    }

    /// Change the uniform scale, never going below [`MIN_SCALE`].
    pub fn scale_by(&mut self, delta: f32) {
        self.scale = (self.scale + delta).max(MIN_SCALE);
    }

    /// `T * S * Rx * Ry * Rz`: points are rotated about Z, Y then X, scaled,
    /// and finally moved into place.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Transform::translation_matrix(self.translation.x, self.translation.y, self.translation.z)
            * Transform::scale_matrix(self.scale, self.scale, self.scale)
            * self.rotation_matrix()
    }

    /// `T * Rx * Ry`, used to carry lights along with the model. Neither
    /// the scale nor the Z rotation reaches the lights.
    pub fn light_matrix(&self) -> Matrix4<f32> {
        Transform::translation_matrix(self.translation.x, self.translation.y, self.translation.z)
            * Transform::rotation_matrix(self.rot_x.to_radians(), self.rot_y.to_radians(), 0.0)
    }

    pub fn rotation_matrix(&self) -> Matrix4<f32> {
        Transform::rotation_matrix(
            self.rot_x.to_radians(),
            self.rot_y.to_radians(),
            self.rot_z.to_radians(),
        )
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::identity()
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// `Rx * Ry * Rz` from angles in radians.
    pub fn rotation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, z));

        rx * ry * rz
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Create a scale matrix
    pub fn scale_matrix(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        projection * view * model
    }
}
