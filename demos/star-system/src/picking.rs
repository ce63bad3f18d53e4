use glam::Vec2;
use orrery_engine::{pick_nearest, Camera3D};

use crate::bodies::BodyRegistry;

/// Resolve the body under a viewport pixel, if any.
///
/// Hover and click share this query; bodies are tested at their current
/// positions whether or not the simulation is paused.
pub fn body_at_pixel(camera: &Camera3D, bodies: &BodyRegistry, pixel: Vec2) -> Option<usize> {
    let ray = camera.ray_from_pixel(pixel)?;
    pick_nearest(&ray, bodies.pick_targets()).map(|hit| hit.key)
}
