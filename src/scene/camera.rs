use crate::core::math::transform::TransformFactory;
use nalgebra::{Matrix4, Point3, Vector3};

/// Supplies the view and projection matrices for a frame.
///
/// The pipeline treats the camera as read-only input; whatever drives it
/// (keyboard/mouse controller, config file) updates the parameters and calls
/// [`Camera::update_matrices`] once per frame before rendering starts.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov_y_rad: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,

    view_matrix: Matrix4<f32>,
    projection_matrix: Matrix4<f32>,
}

impl Camera {
    #[allow(clippy::too_many_arguments)]
    pub fn new_perspective(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        fov_y_rad: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let mut cam = Self {
            position,
            target,
            up,
            fov_y_rad,
            aspect_ratio,
            near,
            far,
            view_matrix: Matrix4::identity(),
            projection_matrix: Matrix4::identity(),
        };
        cam.update_matrices();
        cam
    }

    /// Recalculates the cached view and projection matrices from the current
    /// parameters.
    pub fn update_matrices(&mut self) {
        self.view_matrix = TransformFactory::view(&self.position, &self.target, &self.up);
        self.projection_matrix = TransformFactory::perspective(
            self.aspect_ratio,
            self.fov_y_rad,
            self.near,
            self.far,
        );
    }

    /// Normalized look direction (world space).
    pub fn forward(&self) -> Vector3<f32> {
        (self.target - self.position).normalize()
    }

    /// Normalized right vector (world space).
    pub fn right(&self) -> Vector3<f32> {
        self.up.cross(&self.forward()).normalize()
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.view_matrix
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix
    }

    /// Combined view-projection transform for the current frame.
    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix * self.view_matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector4;

    fn test_camera() -> Camera {
        Camera::new_perspective(
            Point3::new(0.0, 0.0, -10.0),
            Point3::origin(),
            Vector3::new(0.0, 1.0, 0.0),
            60.0_f32.to_radians(),
            800.0 / 600.0,
            0.1,
            100.0,
        )
    }

    #[test]
    fn point_ahead_of_camera_projects_to_center() {
        let cam = test_camera();
        let clip = cam.view_projection() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(clip.x / clip.w, 0.0, epsilon = 1e-6);
        assert_relative_eq!(clip.y / clip.w, 0.0, epsilon = 1e-6);
        // The target is 10 units ahead: clip w carries the view depth.
        assert_relative_eq!(clip.w, 10.0, epsilon = 1e-4);
    }

    #[test]
    fn forward_and_right_are_orthonormal() {
        let cam = test_camera();
        assert_relative_eq!(cam.forward().norm(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(cam.forward().dot(&cam.right()), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn moving_camera_updates_matrices() {
        let mut cam = test_camera();
        let before = cam.view_matrix();
        cam.position = Point3::new(0.0, 0.0, -20.0);
        cam.update_matrices();
        assert_ne!(before, cam.view_matrix());
    }
}
