pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::{EntityId, GameEvent};
pub use components::entity::Entity;
pub use components::mesh::{MeshComponent, SDFShape, SDFColor};
pub use crate::core::driver::{DriverState, FrameDriver};
pub use crate::core::rng::Rng;
pub use crate::core::scene::Scene;
pub use crate::core::time::FrameClock;
pub use renderer::camera::{Camera3D, CameraConfig, Projection};
pub use renderer::sdf_instance::{SDFInstance, SDFBuffer};
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::protocol::ProtocolLayout;
pub use bridge::protocol::{
    DEFAULT_MAX_LIGHTS, EVENT_FLOATS, LIGHT_FLOATS, SDF_INSTANCE_FLOATS, VECTOR_VERTEX_FLOATS,
};
pub use systems::lighting::{PointLight, LightId, LightState};
pub use systems::picking::{pick_nearest, PickHit, Ray};
pub use systems::sdf_render::build_sdf_buffer;

#[cfg(feature = "vectors")]
pub use systems::vector::{VectorState, VectorVertex, VectorColor};
