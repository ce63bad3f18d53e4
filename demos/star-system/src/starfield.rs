use glam::Vec3;
use orrery_engine::Rng;

pub const STAR_COUNT: usize = 1200;
/// Edge length of the cube the stars are scattered in, centred on the origin.
pub const STARFIELD_EXTENT: f32 = 200.0;
pub const STAR_RADIUS: f32 = 0.1;

/// Deterministic star positions for a given seed.
pub fn generate(seed: u64, count: usize) -> Vec<Vec3> {
    let mut rng = Rng::new(seed);
    let half = STARFIELD_EXTENT / 2.0;
    (0..count)
        .map(|_| {
            Vec3::new(
                rng.next_centered(half),
                rng.next_centered(half),
                rng.next_centered(half),
            )
        })
        .collect()
}
