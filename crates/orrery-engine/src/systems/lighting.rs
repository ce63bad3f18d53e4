/// Point lights and ambient term for the SDF shading pass.
///
/// Lights are persistent and stay until explicitly removed.
/// Each frame the runner exposes the light array to the host, which
/// uploads it for the renderer's lighting pass.

use glam::Vec3;

/// A world-space point light.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, r, g, b, intensity, range]`
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct PointLight {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    /// Falloff distance in world units (0 = infinite).
    pub range: f32,
}

impl PointLight {
    pub const FLOATS: usize = crate::bridge::protocol::LIGHT_FLOATS;

    pub fn new(pos: Vec3, color: [f32; 3], intensity: f32, range: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            r: color[0],
            g: color[1],
            b: color[2],
            intensity,
            range,
        }
    }

    pub fn pos(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Handle to a light inside `LightState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightId(pub usize);

/// Active lights plus the ambient color/intensity.
pub struct LightState {
    lights: Vec<PointLight>,
    ambient_color: [f32; 3],
    ambient_intensity: f32,
}

impl LightState {
    pub fn with_capacity(max_lights: usize) -> Self {
        Self {
            lights: Vec::with_capacity(max_lights),
            ambient_color: [1.0, 1.0, 1.0],
            ambient_intensity: 1.0,
        }
    }

    /// Add a light. The returned id stays valid until `clear`.
    pub fn add(&mut self, light: PointLight) -> LightId {
        self.lights.push(light);
        LightId(self.lights.len() - 1)
    }

    pub fn get_mut(&mut self, id: LightId) -> Option<&mut PointLight> {
        self.lights.get_mut(id.0)
    }

    pub fn clear(&mut self) {
        self.lights.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.iter()
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }

    /// Set the ambient color (as authored, before intensity).
    pub fn set_ambient_color(&mut self, color: [f32; 3]) {
        self.ambient_color = color;
    }

    pub fn set_ambient_intensity(&mut self, intensity: f32) {
        self.ambient_intensity = intensity;
    }

    /// Ambient color premultiplied by intensity, as the shader consumes it.
    pub fn ambient(&self) -> [f32; 3] {
        let [r, g, b] = self.ambient_color;
        let i = self.ambient_intensity;
        [r * i, g * i, b * i]
    }

    pub fn ambient_intensity(&self) -> f32 {
        self.ambient_intensity
    }

    /// Pointer to the lights data for SAB serialization.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.lights.as_ptr() as *const f32
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::with_capacity(crate::bridge::protocol::DEFAULT_MAX_LIGHTS)
    }
}
