//! Perspective camera orbiting the scene origin, and screen-to-world rays.

use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

use crate::picking::Ray;

/// A perspective camera looking at a target point.
#[derive(Debug, Clone)]
pub struct Camera {
    /// World-space eye position.
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect_ratio: f32,
    /// Near clip plane distance (always positive).
    pub near: f32,
    /// Far clip plane distance (always positive, > near).
    pub far: f32,
}

impl Camera {
    /// Camera with the given vertical FOV in degrees, at the default vantage point.
    pub fn with_fov_degrees(fov_degrees: f32, width: u32, height: u32) -> Self {
        let mut camera = Self {
            fov_y: fov_degrees.to_radians(),
            ..Self::default()
        };
        camera.set_aspect_ratio(width as f32, height as f32);
        camera
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Right-handed perspective with depth in `[0, 1]`.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update the aspect ratio after a viewport resize. Zero-height viewports are ignored.
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        if height > 0.0 && width > 0.0 {
            self.aspect_ratio = width / height;
        }
    }

    /// World-space ray through a point in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection_matrix().inverse();
        let near = inverse * ndc.extend(0.0).extend(1.0);
        let far = inverse * ndc.extend(1.0).extend(1.0);
        let near = near.xyz() / near.w;
        let far = far.xyz() / far.w;
        Ray::new(near, far - near)
    }
}

/// Pixel position (origin top-left) to normalized device coordinates.
pub fn cursor_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new((x / width) * 2.0 - 1.0, -(y / height) * 2.0 + 1.0)
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(80.0, 60.0, 100.0),
            target: Vec3::ZERO,
            fov_y: 75.0_f32.to_radians(),
            aspect_ratio: 16.0 / 9.0,
            near: 0.1,
            far: 2000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_to_ndc_corners() {
        assert_eq!(cursor_to_ndc(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, 1.0));
        assert_eq!(cursor_to_ndc(800.0, 600.0, 800.0, 600.0), Vec2::new(1.0, -1.0));
        assert_eq!(cursor_to_ndc(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = Camera::default();
        let ray = camera.ray_from_ndc(Vec2::ZERO);
        let expected = (camera.target - camera.position).normalize();
        assert!(ray.direction.dot(expected) > 0.9999, "dir {}", ray.direction);
        assert!((ray.origin - camera.position).length() < 1.0);
    }

    #[test]
    fn test_aspect_ratio_update() {
        let mut camera = Camera::default();
        camera.set_aspect_ratio(1000.0, 500.0);
        assert!((camera.aspect_ratio - 2.0).abs() < 1e-6);
        camera.set_aspect_ratio(1000.0, 0.0);
        assert!((camera.aspect_ratio - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_with_fov_degrees() {
        let camera = Camera::with_fov_degrees(60.0, 1920, 1080);
        assert!((camera.fov_y - 60.0_f32.to_radians()).abs() < 1e-6);
        assert!((camera.aspect_ratio - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_origin_projects_to_screen_center() {
        let camera = Camera::default();
        let clip = camera.view_projection_matrix() * Vec3::ZERO.extend(1.0);
        let ndc = clip.xy() / clip.w;
        assert!(ndc.length() < 1e-5, "ndc {ndc}");
    }
}
