//! Tunable step sizes and initial placement for the two viewers
use nalgebra::Point3;

/// Settings for the wireframe cube viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeConfig {
    pub center: Point3<f32>,
    pub side_length: f32,
    /// Planar and depth distance per move command.
    pub move_step: f32,
    /// Radians per rotate command.
    pub rotate_step: f32,
    /// Scale commands multiply by `1 ± scale_step`.
    pub scale_step: f32,
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            center: Point3::origin(),
            side_length: 60.0,
            move_step: 10.0,
            rotate_step: 0.1,
            scale_step: 0.1,
        }
    }
}

/// Settings for the lit mesh viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshConfig {
    /// Initial distance between the eye and the model center.
    pub distance: f32,
    /// Degrees per rotate command.
    pub rotate_step: f32,
    pub move_step: f32,
    pub scale_step: f32,
    /// Degrees per pixel of primary-button drag.
    pub drag_rotate: f32,
    /// Units per pixel of secondary-button drag.
    pub drag_pan: f32,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            distance: 105.0,
            rotate_step: 5.0,
            move_step: 2.0,
            scale_step: 0.1,
            drag_rotate: 0.5,
            drag_pan: 0.1,
        }
    }
}
