use orrery_engine::{LightId, LightState};

/// Display theme. The host swaps CSS on the reported value; the game
/// adjusts the lighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Night,
    Day,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Night => Theme::Day,
            Theme::Day => Theme::Night,
        }
    }

    pub fn ambient_intensity(self) -> f32 {
        match self {
            Theme::Night => 0.2,
            Theme::Day => 0.6,
        }
    }

    pub fn sun_intensity(self) -> f32 {
        match self {
            Theme::Night => 1.5,
            Theme::Day => 2.5,
        }
    }

    /// Background gradient, top to bottom, as packed `0xRRGGBB`.
    pub fn background(self) -> (u32, u32) {
        match self {
            Theme::Night => (0x000011, 0x000000),
            Theme::Day => (0x87ceeb, 0xf0f8ff),
        }
    }

    /// Wire value reported to the host.
    pub fn as_f32(self) -> f32 {
        match self {
            Theme::Night => 0.0,
            Theme::Day => 1.0,
        }
    }

    pub fn apply(self, lights: &mut LightState, sun: LightId) {
        lights.set_ambient_intensity(self.ambient_intensity());
        if let Some(light) = lights.get_mut(sun) {
            light.intensity = self.sun_intensity();
        }
    }
}
