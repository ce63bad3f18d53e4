use orrery_engine::{
    build_sdf_buffer, DriverState, EngineContext, Game, GameConfig, InputEvent, InputQueue,
    ProtocolLayout, RenderContext, SDFBuffer,
};
#[cfg(feature = "vectors")]
use orrery_engine::VectorState;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    sdf_buffer: SDFBuffer,
    #[cfg(feature = "vectors")]
    vectors: VectorState,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    frame_counter: u64,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);

        Self {
            ctx: EngineContext::new(&config),
            input: InputQueue::new(),
            sdf_buffer: SDFBuffer::with_capacity(config.max_sdf_instances),
            #[cfg(feature = "vectors")]
            vectors: VectorState::with_capacity(config.max_vector_vertices),
            game,
            layout,
            config,
            initialized: false,
            frame_counter: 0,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
    }

    /// Push an input event into the queue. Applied on the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame tick. `now_ms` is the host's frame timestamp
    /// (`requestAnimationFrame` time, milliseconds).
    pub fn tick(&mut self, now_ms: f64) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        // Input first, so changes are visible to this frame's update
        self.game.handle_input(&mut self.ctx, &self.input);
        self.input.drain();

        if let Some(dt) = self.ctx.driver.tick(now_ms / 1000.0) {
            self.game.update(&mut self.ctx, dt);
        }

        // Draw the current state, paused or not
        build_sdf_buffer(self.ctx.scene.iter(), &self.ctx.camera, &mut self.sdf_buffer);

        #[cfg(feature = "vectors")]
        self.vectors.clear();
        {
            let mut render_ctx = RenderContext {
                camera: &self.ctx.camera,
                #[cfg(feature = "vectors")]
                vectors: &mut self.vectors,
            };
            self.game.render(&mut render_ctx);
        }

        self.frame_counter += 1;
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn is_paused(&self) -> bool {
        self.ctx.driver.state() == DriverState::Paused
    }

    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn sdf_instances_ptr(&self) -> *const f32 {
        self.sdf_buffer.instances_ptr()
    }

    pub fn sdf_instance_count(&self) -> u32 {
        self.sdf_buffer.instance_count() as u32
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertices_ptr(&self) -> *const f32 {
        self.vectors.buffer_ptr()
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertex_count(&self) -> u32 {
        self.vectors.vertex_count() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.ctx.lights.buffer_ptr()
    }

    pub fn light_count(&self) -> u32 {
        self.ctx.lights.count() as u32
    }

    pub fn ambient(&self) -> [f32; 3] {
        self.ctx.lights.ambient()
    }

    pub fn viewport_width(&self) -> f32 {
        self.ctx.camera.viewport.x
    }

    pub fn viewport_height(&self) -> f32 {
        self.ctx.camera.viewport.y
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_sdf_instances(&self) -> u32 {
        self.layout.max_sdf_instances as u32
    }

    pub fn max_vector_vertices(&self) -> u32 {
        self.layout.max_vector_vertices as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn max_lights(&self) -> u32 {
        self.layout.max_lights as u32
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::{Entity, GameEvent, MeshComponent, SDFColor};

    const TOGGLE: u32 = 1;

    /// Moves one entity along +X at 1 unit/s and counts updates.
    struct Mover {
        updates: u32,
        total_dt: f32,
        x: f32,
    }

    impl Mover {
        fn new() -> Self {
            Self { updates: 0, total_dt: 0.0, x: 0.0 }
        }
    }

    impl Game for Mover {
        fn init(&mut self, ctx: &mut EngineContext) {
            let id = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(id).with_mesh(MeshComponent::sphere(1.0, SDFColor::default())),
            );
        }

        fn handle_input(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
            for event in input.iter() {
                if let InputEvent::Custom { kind: TOGGLE, .. } = event {
                    ctx.driver.toggle();
                }
            }
            ctx.emit_event(GameEvent::new(1.0, self.x, 0.0, 0.0));
        }

        fn update(&mut self, ctx: &mut EngineContext, dt: f32) {
            self.updates += 1;
            self.total_dt += dt;
            self.x += dt;
            let x = self.x;
            if let Some(e) = ctx.scene.iter_mut().next() {
                e.pos.x = x;
            }
        }
    }

    fn toggle() -> InputEvent {
        InputEvent::Custom { kind: TOGGLE, a: 0.0, b: 0.0, c: 0.0 }
    }

    #[test]
    fn tick_before_init_is_ignored() {
        let mut runner = GameRunner::new(Mover::new());
        runner.tick(16.0);
        assert_eq!(runner.game().updates, 0);
        assert_eq!(runner.frame_counter(), 0);
    }

    #[test]
    fn running_ticks_update_and_draw() {
        let mut runner = GameRunner::new(Mover::new());
        runner.init();
        runner.tick(1000.0);
        runner.tick(1016.0);
        assert_eq!(runner.game().updates, 2);
        assert!((runner.game().total_dt - 0.016).abs() < 1e-5);
        assert_eq!(runner.sdf_instance_count(), 1);
        assert_eq!(runner.game_events_len(), 1);
    }

    #[test]
    fn paused_ticks_still_draw_but_skip_update() {
        let mut runner = GameRunner::new(Mover::new());
        runner.init();
        runner.tick(0.0);
        runner.push_input(toggle());
        runner.tick(16.0);
        assert!(runner.is_paused());
        runner.tick(32.0);
        assert_eq!(runner.game().updates, 1);
        assert_eq!(runner.sdf_instance_count(), 1);
        assert_eq!(runner.frame_counter(), 3);
    }

    #[test]
    fn resume_does_not_jump() {
        let mut runner = GameRunner::new(Mover::new());
        runner.init();
        runner.tick(0.0);
        runner.tick(16.0);
        let before = runner.game().x;

        runner.push_input(toggle());
        runner.tick(32.0);
        // Ten minutes pass with the tab hidden
        runner.push_input(toggle());
        runner.tick(600_000.0);
        runner.tick(600_016.0);

        let advanced = runner.game().x - before;
        assert!(advanced <= 0.016 + 1e-5, "advanced {}", advanced);
    }

    #[test]
    fn input_is_drained_each_tick() {
        let mut runner = GameRunner::new(Mover::new());
        runner.init();
        runner.push_input(toggle());
        runner.tick(0.0);
        runner.tick(16.0);
        // Toggle applied exactly once
        assert!(runner.is_paused());
    }

    #[test]
    fn layout_follows_config() {
        let runner = GameRunner::new(Mover::new());
        let config = GameConfig::default();
        assert_eq!(runner.max_sdf_instances() as usize, config.max_sdf_instances);
        assert_eq!(runner.max_events() as usize, config.max_events);
        assert_eq!(runner.max_lights() as usize, config.max_lights);
        assert_eq!(runner.max_vector_vertices() as usize, config.max_vector_vertices);
    }
}
