/// Wire formats and capacities of the buffers shared with the host.
///
/// Each section is exported as its own pointer plus element count
/// (`get_sdf_instances_ptr` / `get_sdf_instance_count`, and so on). The
/// host reads `count × FLOATS` floats from wasm memory after every tick:
/// ```text
/// SDF instances:   max_sdf_instances   × 12 floats
/// Vector vertices: max_vector_vertices × 6 floats
/// Events:          max_events          × 4 floats
/// Lights:          max_lights          × 8 floats
/// ```
/// Capacities come from `GameConfig` and are exported so the host can size
/// its GPU buffers once at init.

use crate::api::game::GameConfig;

/// Floats per SDF instance: x, y, radius, rotation, r, g, b, shininess, emissive, depth, pad×2.
pub const SDF_INSTANCE_FLOATS: usize = 12;

/// Floats per vector vertex: x, y, r, g, b, a.
pub const VECTOR_VERTEX_FLOATS: usize = 6;

/// Floats per game event: kind, a, b, c.
pub const EVENT_FLOATS: usize = 4;

/// Floats per point light: x, y, z, r, g, b, intensity, range.
pub const LIGHT_FLOATS: usize = 8;

/// Default light capacity.
pub const DEFAULT_MAX_LIGHTS: usize = 8;

/// Per-section capacities, in elements.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_sdf_instances: usize,
    pub max_vector_vertices: usize,
    pub max_events: usize,
    pub max_lights: usize,
}

impl ProtocolLayout {
    pub fn new(
        max_sdf_instances: usize,
        max_vector_vertices: usize,
        max_events: usize,
        max_lights: usize,
    ) -> Self {
        Self {
            max_sdf_instances,
            max_vector_vertices,
            max_events,
            max_lights,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.max_sdf_instances,
            config.max_vector_vertices,
            config.max_events,
            config.max_lights,
        )
    }
}
