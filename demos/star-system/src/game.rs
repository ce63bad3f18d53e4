/// Star System: sun, circular planet orbits, speed sliders, hover/click
/// picking and a day/night theme.
///
/// SDF spheres for every body and star, vector strokes for orbit rings and
/// the selection outline. The host owns all DOM widgets and talks to the
/// game through custom events and game events.

use glam::{Vec2, Vec3};
use orrery_engine::*;

use crate::bodies::BodyRegistry;
use crate::catalog::{BodyCatalog, CatalogError};
use crate::orbit;
use crate::picking::body_at_pixel;
use crate::starfield::{self, STAR_COUNT, STAR_RADIUS};
use crate::theme::Theme;

// ── Custom event kinds from the host ────────────────────────────────

pub const CUSTOM_SET_SPEED: u32 = 1;
pub const CUSTOM_TOGGLE_PAUSE: u32 = 2;
pub const CUSTOM_TOGGLE_THEME: u32 = 3;
pub const CUSTOM_CLEAR_SELECTION: u32 = 4;
/// Viewport resize (sent by the host as kind=99).
pub const CUSTOM_RESIZE: u32 = 99;

// ── Game event kinds to the host ────────────────────────────────────

pub const EVENT_HOVER: f32 = 1.0;
pub const EVENT_SELECTION: f32 = 2.0;
pub const EVENT_STATE: f32 = 3.0;
pub const EVENT_BACKGROUND: f32 = 4.0;

// ── Visuals ─────────────────────────────────────────────────────────

const SUN_EMISSIVE: f32 = 2.0;
const SUN_LIGHT_RANGE: f32 = 200.0;
const PLANET_SHININESS: f32 = 30.0;
const STAR_EMISSIVE: f32 = 1.0;
const STAR_SEED: u64 = 0x5eed_2024;

#[cfg(feature = "vectors")]
const ORBIT_SAMPLES: usize = 64;
#[cfg(feature = "vectors")]
const ORBIT_LINE_WIDTH: f32 = 1.0;
#[cfg(feature = "vectors")]
const ORBIT_COLOR: VectorColor = VectorColor::GRAY;

#[cfg(feature = "vectors")]
const SELECT_RING_COLOR: VectorColor = VectorColor::new(1.0, 1.0, 1.0, 0.6);
#[cfg(feature = "vectors")]
const SELECT_RING_WIDTH: f32 = 1.5;
#[cfg(feature = "vectors")]
const SELECT_RING_PAD: f32 = 6.0;

/// Tooltip offset from the pointer, in pixels.
const TOOLTIP_OFFSET: f32 = 10.0;
/// Pointer travel (pixels) after which a press no longer counts as a click.
const DRAG_THRESHOLD: f32 = 5.0;

pub struct StarSystem {
    catalog: BodyCatalog,
    bodies: BodyRegistry,
    theme: Theme,

    /// Body under the pointer, from the last pointer move.
    hovered: Option<usize>,
    pointer: Vec2,
    /// Body shown in the info panel.
    selected: Option<usize>,
    /// Pointer-down position while a potential click is in progress.
    press: Option<Vec2>,

    // Entity IDs
    body_ids: Vec<EntityId>,
    sun_light: Option<LightId>,
}

impl StarSystem {
    pub fn new() -> Self {
        Self::with_catalog(BodyCatalog::default())
    }

    pub fn with_catalog(catalog: BodyCatalog) -> Self {
        let bodies = BodyRegistry::from_descriptors(&catalog.bodies);
        Self {
            catalog,
            bodies,
            theme: Theme::default(),
            hovered: None,
            pointer: Vec2::ZERO,
            selected: None,
            press: None,
            body_ids: Vec::new(),
            sun_light: None,
        }
    }

    /// Build from a host-supplied catalog, rejecting it if it fails validation.
    pub fn from_catalog_json(json: &str) -> Result<Self, CatalogError> {
        BodyCatalog::from_json(json).map(Self::with_catalog)
    }

    pub fn catalog(&self) -> &BodyCatalog {
        &self.catalog
    }

    pub fn bodies(&self) -> &BodyRegistry {
        &self.bodies
    }

    #[cfg(test)]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[cfg(test)]
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    #[cfg(test)]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    fn apply_custom(&mut self, ctx: &mut EngineContext, kind: u32, a: f32, b: f32) {
        match kind {
            CUSTOM_SET_SPEED => {
                // Slider index must be a whole number
                if a.is_finite() && a >= 0.0 && a.fract() == 0.0 {
                    self.bodies.set_speed(a as usize, b as f64);
                } else {
                    log::warn!("ignoring speed change for body index {}", a);
                }
            }
            CUSTOM_TOGGLE_PAUSE => {
                let state = ctx.driver.toggle();
                log::debug!("frame driver now {:?}", state);
            }
            CUSTOM_TOGGLE_THEME => {
                self.theme = self.theme.toggled();
                if let Some(sun) = self.sun_light {
                    self.theme.apply(&mut ctx.lights, sun);
                }
                log::debug!("theme now {:?}", self.theme);
            }
            CUSTOM_CLEAR_SELECTION => {
                self.selected = None;
            }
            CUSTOM_RESIZE => {
                ctx.camera.resize(a, b);
            }
            _ => {
                log::warn!("unknown custom event kind {}", kind);
            }
        }
    }

    fn pick(&self, camera: &Camera3D, pixel: Vec2) -> Option<usize> {
        body_at_pixel(camera, &self.bodies, pixel)
    }

    fn emit_events(&self, ctx: &mut EngineContext) {
        let (hover_idx, hover_x, hover_y) = match self.hovered {
            Some(i) => (i as f32, self.pointer.x + TOOLTIP_OFFSET, self.pointer.y + TOOLTIP_OFFSET),
            None => (-1.0, 0.0, 0.0),
        };
        ctx.emit_event(GameEvent::new(EVENT_HOVER, hover_idx, hover_x, hover_y));

        let selection = self
            .selected
            .and_then(|i| self.bodies.get(i).map(|body| (i, body)));
        let (sel_idx, sel_speed, sel_dist) = match selection {
            Some((i, body)) => (i as f32, body.state.speed as f32, body.desc.distance),
            None => (-1.0, 0.0, 0.0),
        };
        ctx.emit_event(GameEvent::new(EVENT_SELECTION, sel_idx, sel_speed, sel_dist));

        let paused = if ctx.driver.is_paused() { 1.0 } else { 0.0 };
        ctx.emit_event(GameEvent::new(EVENT_STATE, paused, self.theme.as_f32(), 0.0));

        let (top, bottom) = self.theme.background();
        ctx.emit_event(GameEvent::new(EVENT_BACKGROUND, top as f32, bottom as f32, 0.0));
    }

    /// Copy integrator state into the scene entities.
    fn sync_entities(&self, scene: &mut Scene) {
        for (body, id) in self.bodies.iter().zip(&self.body_ids) {
            if let Some(entity) = scene.get_mut(*id) {
                entity.pos = body.world_position();
                entity.rotation = body.state.spin as f32;
            }
        }
    }

    #[cfg(feature = "vectors")]
    fn draw_orbits(&self, camera: &Camera3D, vectors: &mut VectorState) {
        for body in self.bodies.iter() {
            let points: Option<Vec<Vec2>> = orbit::ring_points(body.desc.distance, ORBIT_SAMPLES)
                .map(|p| camera.project(p).map(|proj| proj.pos))
                .collect();
            // Rings crossing behind the camera are skipped whole
            if let Some(points) = points {
                vectors.stroke_polygon(&points, ORBIT_LINE_WIDTH, ORBIT_COLOR);
            }
        }
    }

    #[cfg(feature = "vectors")]
    fn draw_selection_ring(&self, camera: &Camera3D, vectors: &mut VectorState) {
        let Some(body) = self.selected.and_then(|i| self.bodies.get(i)) else {
            return;
        };
        if let Some(proj) = camera.project(body.world_position()) {
            let radius = body.desc.radius * proj.scale + SELECT_RING_PAD;
            vectors.stroke_circle(proj.pos, radius, SELECT_RING_WIDTH, SELECT_RING_COLOR);
        }
    }
}

impl Default for StarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for StarSystem {
    fn config(&self) -> GameConfig {
        GameConfig {
            // Stars + planets + sun, with headroom
            max_sdf_instances: STAR_COUNT + self.catalog.bodies.len() + 64,
            max_events: 16,
            max_lights: 4,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        // ── Sun ──────────────────────────────────────────────────────
        let sun_id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(sun_id)
                .with_tag("sun")
                .with_pos(Vec3::ZERO)
                .with_mesh(
                    MeshComponent::sphere(self.catalog.sun.radius, SDFColor::from_hex(self.catalog.sun.color))
                        .with_emissive(SUN_EMISSIVE),
                ),
        );

        // ── Planets ──────────────────────────────────────────────────
        self.body_ids.clear();
        for body in self.bodies.iter() {
            let id = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(id)
                    .with_tag(body.desc.name.as_str())
                    .with_pos(body.world_position())
                    .with_rotation(body.state.spin as f32)
                    .with_mesh(
                        MeshComponent::sphere(body.desc.radius, SDFColor::from_hex(body.desc.color))
                            .with_shininess(PLANET_SHININESS),
                    ),
            );
            self.body_ids.push(id);
        }

        // ── Starfield ────────────────────────────────────────────────
        for pos in starfield::generate(STAR_SEED, STAR_COUNT) {
            let id = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(id)
                    .with_tag("star")
                    .with_pos(pos)
                    .with_mesh(
                        MeshComponent::sphere(STAR_RADIUS, SDFColor::new(1.0, 1.0, 1.0))
                            .with_emissive(STAR_EMISSIVE),
                    ),
            );
        }

        // ── Lighting ─────────────────────────────────────────────────
        ctx.lights.set_ambient_color([1.0, 1.0, 1.0]);
        let sun_light = ctx.lights.add(PointLight::new(
            Vec3::ZERO,
            [1.0, 1.0, 1.0],
            self.theme.sun_intensity(),
            SUN_LIGHT_RANGE,
        ));
        self.theme.apply(&mut ctx.lights, sun_light);
        self.sun_light = Some(sun_light);

        log::info!(
            "star system: {} bodies, {} stars",
            self.bodies.len(),
            ctx.scene.count_tagged("star")
        );
    }

    fn handle_input(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::Custom { kind, a, b, .. } => self.apply_custom(ctx, kind, a, b),
                InputEvent::PointerMove { x, y } => {
                    let pos = Vec2::new(x, y);
                    self.pointer = pos;
                    self.hovered = self.pick(&ctx.camera, pos);
                    if let Some(start) = self.press {
                        if start.distance(pos) > DRAG_THRESHOLD {
                            self.press = None;
                        }
                    }
                }
                InputEvent::PointerDown { x, y } => {
                    self.press = Some(Vec2::new(x, y));
                }
                InputEvent::PointerUp { x, y } => {
                    if self.press.take().is_some() {
                        // A miss leaves the info panel as it was
                        if let Some(idx) = self.pick(&ctx.camera, Vec2::new(x, y)) {
                            self.selected = Some(idx);
                        }
                    }
                }
                InputEvent::PointerLeave => {
                    self.hovered = None;
                    self.press = None;
                }
            }
        }

        self.emit_events(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, dt: f32) {
        self.bodies.advance_all(dt as f64);
        self.sync_entities(&mut ctx.scene);
    }

    #[cfg(feature = "vectors")]
    fn render(&self, ctx: &mut RenderContext) {
        self.draw_orbits(ctx.camera, ctx.vectors);
        self.draw_selection_ring(ctx.camera, ctx.vectors);
    }
}
