/// Circular orbit integration. Pure math, no engine dependencies.
///
/// Angles are kept in f64 since they grow without bound (never wrapped);
/// only the derived position is narrowed to f32 for the scene.

use glam::Vec3;

/// Self-rotation added on every running frame, independent of `dt`.
pub const SPIN_PER_FRAME: f64 = 0.01;

/// Mutable per-body orbit state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    /// Orbital phase in radians.
    pub angle: f64,
    /// Angular velocity in radians per second.
    pub speed: f64,
    /// Self-rotation angle in radians.
    pub spin: f64,
}

impl OrbitState {
    pub fn new(speed: f64) -> Self {
        Self { angle: 0.0, speed, spin: 0.0 }
    }
}

/// Advance one running frame by `dt` seconds.
///
/// `dt` is expected to be finite and non-negative already (the frame clock
/// guarantees it); anything else is treated as zero elapsed time.
pub fn advance(state: OrbitState, dt: f64) -> OrbitState {
    let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
    OrbitState {
        angle: state.angle + state.speed * dt,
        spin: state.spin + SPIN_PER_FRAME,
        ..state
    }
}

/// Position on the XZ plane for an orbit of radius `distance`.
pub fn world_position(distance: f32, angle: f64) -> Vec3 {
    let d = distance as f64;
    Vec3::new((d * angle.cos()) as f32, 0.0, (d * angle.sin()) as f32)
}

/// Sample `samples` evenly spaced points around an orbit.
pub fn ring_points(distance: f32, samples: usize) -> impl Iterator<Item = Vec3> {
    (0..samples).map(move |i| {
        let angle = i as f64 / samples as f64 * std::f64::consts::TAU;
        world_position(distance, angle)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hundred_seconds_at_earth_distance() {
        let state = advance(OrbitState::new(0.01), 100.0);
        assert!((state.angle - 1.0).abs() < 1e-9);

        let pos = world_position(12.0, state.angle);
        assert!((pos.x - 6.4836).abs() < 1e-3, "x = {}", pos.x);
        assert_eq!(pos.y, 0.0);
        assert!((pos.z - 10.0977).abs() < 1e-3, "z = {}", pos.z);
    }

    #[test]
    fn zero_dt_leaves_angle_and_position() {
        let start = OrbitState { angle: 2.5, speed: 0.03, spin: 0.0 };
        let next = advance(start, 0.0);
        assert_eq!(next.angle, start.angle);
        assert_eq!(world_position(9.0, next.angle), world_position(9.0, start.angle));
    }

    #[test]
    fn angle_follows_speed_times_dt() {
        for &(speed, dt) in &[(0.0, 0.5), (0.02, 0.016), (0.05, 0.1), (0.001, 3.0)] {
            let next = advance(OrbitState { angle: 0.3, speed, spin: 0.0 }, dt);
            assert!((next.angle - (0.3 + speed * dt)).abs() < 1e-12);
        }
    }

    #[test]
    fn spin_is_per_frame_not_per_second() {
        let a = advance(OrbitState::new(0.01), 0.0);
        let b = advance(OrbitState::new(0.01), 0.1);
        assert_eq!(a.spin, SPIN_PER_FRAME);
        assert_eq!(b.spin, SPIN_PER_FRAME);
    }

    #[test]
    fn invalid_dt_does_not_poison_state() {
        for dt in [f64::NAN, f64::INFINITY, -1.0] {
            let next = advance(OrbitState::new(0.02), dt);
            assert_eq!(next.angle, 0.0);
            assert!(world_position(6.0, next.angle).is_finite());
        }
    }

    #[test]
    fn position_stays_on_the_circle() {
        for i in 0..32 {
            let pos = world_position(28.0, i as f64 * 0.7);
            assert!((pos.length() - 28.0).abs() < 1e-3);
        }
        assert_eq!(ring_points(15.0, 64).count(), 64);
    }
}
