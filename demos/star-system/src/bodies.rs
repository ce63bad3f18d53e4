/// Body registry: catalog data plus live orbit state for each body.
///
/// Indices are stable for the lifetime of the registry and match the
/// order of the catalog (and therefore the host's sliders).

use glam::Vec3;

use crate::catalog::BodyDescriptor;
use crate::orbit::{self, OrbitState};

#[derive(Debug, Clone)]
pub struct Body {
    pub desc: BodyDescriptor,
    pub state: OrbitState,
}

impl Body {
    pub fn new(desc: BodyDescriptor) -> Self {
        let state = OrbitState::new(desc.speed);
        Self { desc, state }
    }

    /// Current position, always derived from the current angle.
    pub fn world_position(&self) -> Vec3 {
        orbit::world_position(self.desc.distance, self.state.angle)
    }
}

#[derive(Debug, Clone, Default)]
pub struct BodyRegistry {
    bodies: Vec<Body>,
}

impl BodyRegistry {
    pub fn from_descriptors(descriptors: &[BodyDescriptor]) -> Self {
        Self {
            bodies: descriptors.iter().cloned().map(Body::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn get(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    #[cfg(test)]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.bodies.iter().position(|b| b.desc.name == name)
    }

    /// Change a body's angular speed. Takes effect on the next integration.
    /// Returns false (and logs) for an unknown index or non-finite speed.
    pub fn set_speed(&mut self, index: usize, speed: f64) -> bool {
        if !speed.is_finite() {
            log::warn!("ignoring non-finite speed for body {}", index);
            return false;
        }
        match self.bodies.get_mut(index) {
            Some(body) => {
                body.state.speed = speed;
                true
            }
            None => {
                log::warn!("ignoring speed for unknown body {}", index);
                false
            }
        }
    }

    /// Run the integrator on every body.
    pub fn advance_all(&mut self, dt: f64) {
        for body in &mut self.bodies {
            body.state = orbit::advance(body.state, dt);
        }
    }

    /// `(index, center, radius)` triples for picking.
    pub fn pick_targets(&self) -> impl Iterator<Item = (usize, Vec3, f32)> + '_ {
        self.bodies
            .iter()
            .enumerate()
            .map(|(i, b)| (i, b.world_position(), b.desc.radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BodyCatalog;

    fn registry() -> BodyRegistry {
        BodyRegistry::from_descriptors(&BodyCatalog::default().bodies)
    }

    #[test]
    fn bodies_start_at_angle_zero_with_catalog_speed() {
        let reg = registry();
        assert_eq!(reg.len(), 8);
        let earth = reg.get(reg.index_of("Earth").unwrap()).unwrap();
        assert_eq!(earth.state.angle, 0.0);
        assert_eq!(earth.state.speed, 0.01);
        assert_eq!(earth.world_position(), Vec3::new(12.0, 0.0, 0.0));
    }

    #[test]
    fn set_speed_validates_input() {
        let mut reg = registry();
        assert!(reg.set_speed(3, 0.0));
        assert_eq!(reg.get(3).unwrap().state.speed, 0.0);
        assert!(!reg.set_speed(42, 0.01));
        assert!(!reg.set_speed(0, f64::NAN));
        assert_eq!(reg.get(0).unwrap().state.speed, 0.02);
    }

    #[test]
    fn stopped_body_holds_while_others_move() {
        let mut reg = registry();
        reg.advance_all(1.0);
        let before: Vec<f64> = reg.iter().map(|b| b.state.angle).collect();

        let mars = reg.index_of("Mars").unwrap();
        reg.set_speed(mars, 0.0);
        reg.advance_all(0.016);

        for (i, body) in reg.iter().enumerate() {
            if i == mars {
                assert_eq!(body.state.angle, before[i]);
            } else {
                assert!(body.state.angle > before[i], "{} did not move", body.desc.name);
            }
        }
    }

    #[test]
    fn pick_targets_track_current_positions() {
        let mut reg = registry();
        reg.advance_all(50.0);
        for ((i, center, radius), body) in reg.pick_targets().zip(reg.iter()) {
            assert_eq!(center, body.world_position());
            assert_eq!(radius, body.desc.radius);
            assert_eq!(reg.get(i).unwrap().desc.name, body.desc.name);
        }
    }
}
