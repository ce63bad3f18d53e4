use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};
use serde::{Deserialize, Serialize};

use crate::systems::picking::Ray;

/// Camera settings supplied through `GameConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            position: [0.0, 25.0, 55.0],
            target: [0.0, 0.0, 0.0],
        }
    }
}

/// Result of projecting a world point onto the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Viewport position in pixels (origin top-left, Y down).
    pub pos: Vec2,
    /// Distance along the view axis (larger = farther).
    pub depth: f32,
    /// Pixels per world unit at this depth.
    pub scale: f32,
}

/// Perspective camera looking at a fixed target, Y up.
///
/// All viewport coordinates are in CSS pixels with the origin at the
/// top-left corner, matching pointer events from the host.
#[derive(Debug, Clone)]
pub struct Camera3D {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Viewport size in pixels.
    pub viewport: Vec2,
}

impl Camera3D {
    pub fn new(config: &CameraConfig, viewport_width: f32, viewport_height: f32) -> Self {
        let mut camera = Self {
            position: Vec3::from_array(config.position),
            target: Vec3::from_array(config.target),
            up: Vec3::Y,
            fov_y: config.fov_y_degrees.to_radians(),
            near: config.near,
            far: config.far,
            viewport: Vec2::ONE,
        };
        camera.resize(viewport_width, viewport_height);
        camera
    }

    /// Update the viewport size (e.g. on window resize).
    /// Non-positive or non-finite sizes are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            self.viewport = Vec2::new(width, height);
        } else {
            log::warn!("ignoring invalid viewport size {}x{}", width, height);
        }
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.x / self.viewport.y
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Right-handed perspective, depth mapped to [0, 1].
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect(), self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Convert a viewport pixel to normalized device coordinates.
    pub fn pixel_to_ndc(&self, pixel: Vec2) -> Vec2 {
        Vec2::new(
            pixel.x / self.viewport.x * 2.0 - 1.0,
            1.0 - pixel.y / self.viewport.y * 2.0,
        )
    }

    /// Convert normalized device coordinates to a viewport pixel.
    pub fn ndc_to_pixel(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        )
    }

    /// Project a world position. Returns `None` for points at or behind
    /// the near plane.
    pub fn project(&self, world: Vec3) -> Option<Projection> {
        let clip = self.view_projection() * world.extend(1.0);
        // For a perspective matrix, clip.w is the view-space depth.
        if clip.w <= self.near {
            return None;
        }
        let ndc = clip.xy() / clip.w;
        let focal = self.viewport.y * 0.5 / (self.fov_y * 0.5).tan();
        Some(Projection {
            pos: self.ndc_to_pixel(ndc),
            depth: clip.w,
            scale: focal / clip.w,
        })
    }

    /// Cast a ray from the camera through a viewport pixel.
    ///
    /// The pixel is unprojected onto the far plane with the inverse
    /// view-projection matrix; the ray starts at the camera position.
    pub fn ray_from_pixel(&self, pixel: Vec2) -> Option<Ray> {
        if !pixel.is_finite() {
            return None;
        }
        let ndc = self.pixel_to_ndc(pixel);
        let inverse = self.view_projection().inverse();
        let far = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(self.position, far - self.position)
    }
}

impl Default for Camera3D {
    fn default() -> Self {
        Self::new(&CameraConfig::default(), 800.0, 600.0)
    }
}
