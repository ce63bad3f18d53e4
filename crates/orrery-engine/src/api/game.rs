use crate::api::types::{EntityId, GameEvent};
use crate::bridge::protocol::DEFAULT_MAX_LIGHTS;
use crate::core::driver::FrameDriver;
use crate::core::scene::Scene;
use crate::core::time::DEFAULT_MAX_FRAME_DT;
use crate::input::queue::InputQueue;
use crate::renderer::camera::{Camera3D, CameraConfig};
use crate::systems::lighting::LightState;
#[cfg(feature = "vectors")]
use crate::systems::vector::VectorState;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Initial viewport width in pixels (updated by resize events).
    pub viewport_width: f32,
    /// Initial viewport height in pixels.
    pub viewport_height: f32,
    /// Largest frame delta handed to `Game::update`, in seconds.
    pub max_frame_dt: f32,
    /// Camera placement and projection.
    pub camera: CameraConfig,
    /// Maximum number of SDF instances per frame (default: 128).
    pub max_sdf_instances: usize,
    /// Maximum number of vector vertices per frame (default: 16384).
    pub max_vector_vertices: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Maximum number of point lights (default: 8).
    pub max_lights: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 600.0,
            max_frame_dt: DEFAULT_MAX_FRAME_DT,
            camera: CameraConfig::default(),
            max_sdf_instances: 128,
            max_vector_vertices: 16384,
            max_events: 32,
            max_lights: DEFAULT_MAX_LIGHTS,
        }
    }
}

/// The core contract every game must fulfill.
///
/// Per tick the runner calls `handle_input` (always), then `update` (only
/// while the frame driver is running), then `render` (always).
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure lights and camera.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Apply queued host input. Runs every tick, paused or not.
    fn handle_input(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Advance the simulation by `dt` seconds. Never called while paused.
    fn update(&mut self, ctx: &mut EngineContext, dt: f32);

    /// Optional read-only pass for overlay draw commands.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// Mutable access to engine state, passed to `Game::init`,
/// `Game::handle_input` and `Game::update`.
pub struct EngineContext {
    pub scene: Scene,
    pub camera: Camera3D,
    pub lights: LightState,
    pub driver: FrameDriver,
    pub events: Vec<GameEvent>,
    max_events: usize,
    next_id: u32,
}

impl EngineContext {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            scene: Scene::with_capacity(config.max_sdf_instances),
            camera: Camera3D::new(&config.camera, config.viewport_width, config.viewport_height),
            lights: LightState::with_capacity(config.max_lights),
            driver: FrameDriver::new(config.max_frame_dt),
            events: Vec::with_capacity(config.max_events),
            max_events: config.max_events,
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to TypeScript.
    /// Events beyond the configured capacity are dropped.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() < self.max_events {
            self.events.push(event);
        } else {
            log::warn!("event buffer full, dropping event kind {}", event.kind);
        }
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

/// Render context for overlay draw commands.
pub struct RenderContext<'a> {
    pub camera: &'a Camera3D,
    #[cfg(feature = "vectors")]
    pub vectors: &'a mut VectorState,
}
