//! Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

use crate::transform::Transform;

/// Perspective camera used by the rasterizing backends.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 5.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect: aspect_ratio(width, height),
            near: 0.1,
            far: 100.0,
        }
    }

    /// Looks at the origin from +Z, far enough back for a 60 unit cube.
    pub fn wireframe(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 200.0),
            fov: 45f32.to_radians(),
            near: 1.0,
            far: 500.0,
            ..Self::new(width, height)
        }
    }

    /// Sits at the origin looking down -Z; the model is pushed away by its
    /// own transform instead.
    pub fn viewer(width: u32, height: u32) -> Self {
        Self {
            position: Point3::origin(),
            target: Point3::new(0.0, 0.0, -1.0),
            fov: 60f32.to_radians(),
            near: 1.0,
            far: 1000.0,
            ..Self::new(width, height)
        }
    }

    /// Adjust for a resized viewport.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Project a 3D point to screen space.
    ///
    /// Returns pixel x, pixel y and normalized depth in `[-1, 1]`. Points
    /// behind the eye or outside the depth range give `None`; points off
    /// the sides of the screen are still returned so callers can clip.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let mvp =
            Transform::mvp_matrix(model_matrix, &self.view_matrix(), &self.projection_matrix());
        self.project_with(&mvp, point, width, height)
    }

    /// Same as [`Camera::project_to_screen`] with a precomputed MVP matrix.
    pub fn project_with(
        &self,
        mvp: &Matrix4<f32>,
        point: &Point3<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let clip = mvp * point.to_homogeneous();

        // Behind (or on) the eye plane
        if clip.w < 1e-6 {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let depth = clip.z / clip.w;

        if !(-1.0..=1.0).contains(&depth) {
            return None;
        }

        // Convert to screen space
        let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

        Some((screen_x, screen_y, depth))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);

        // zero-height viewports must not divide by zero
        let camera = Camera::new(80, 0);
        assert!(camera.aspect.is_finite());
    }

    #[test]
    fn test_view_matrix() {
        let camera = Camera::new(800, 600);
        let view = camera.view_matrix();
        // View matrix should be non-zero
        assert!(view.norm() > 0.0);
    }

    #[test]
    fn test_target_projects_to_screen_center() {
        let camera = Camera::wireframe(800, 600);
        let (x, y, depth) = camera
            .project_to_screen(&Point3::origin(), &Matrix4::identity(), 800, 600)
            .unwrap();
        assert!((x - 400.0).abs() < 1e-3);
        assert!((y - 300.0).abs() < 1e-3);
        assert!(depth > -1.0 && depth < 1.0);
    }

    #[test]
    fn test_points_behind_viewer_are_rejected() {
        let camera = Camera::viewer(800, 600);
        let behind = Point3::new(0.0, 0.0, 10.0);
        assert!(camera
            .project_to_screen(&behind, &Matrix4::identity(), 800, 600)
            .is_none());

        let ahead = Point3::new(0.0, 0.0, -105.0);
        assert!(camera
            .project_to_screen(&ahead, &Matrix4::identity(), 800, 600)
            .is_some());
    }

    #[test]
    fn test_up_is_up_on_screen() {
        let camera = Camera::viewer(800, 600);
        let (_, y, _) = camera
            .project_to_screen(&Point3::new(0.0, 10.0, -100.0), &Matrix4::identity(), 800, 600)
            .unwrap();
        assert!(y < 300.0);
    }
}
