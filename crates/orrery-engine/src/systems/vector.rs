//! Lyon-based vector overlay: orbit rings, selection outlines.
//!
//! Shapes are tessellated on the CPU in viewport pixel space and appended
//! to a flat triangle-list vertex buffer that the host renders via WebGPU.
//!
//! ```ignore
//! // In Game::render():
//! ctx.vectors.stroke_polygon(&ring_points, 1.0, VectorColor::new(0.53, 0.53, 0.53, 0.6));
//! ctx.vectors.stroke_circle(center, 12.0, 1.5, VectorColor::WHITE);
//! ```

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor,
    VertexBuffers,
};

/// Per-vertex data for vector rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    pub const FLOATS: usize = crate::bridge::protocol::VECTOR_VERTEX_FLOATS;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// RGBA color for vector drawing operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorColor {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Opaque color from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        Self::rgb(
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
        )
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const GRAY: Self = Self::rgb(0.533, 0.533, 0.533);
}

impl Default for VectorColor {
    fn default() -> Self {
        Self::WHITE
    }
}

struct StrokeVertexCtor {
    color: VectorColor,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        let c = self.color;
        VectorVertex { x: vertex.position().x, y: vertex.position().y, r: c.r, g: c.g, b: c.b, a: c.a }
    }
}

/// Stroke tessellator plus the per-frame output buffer.
/// Cleared at the start of each frame and refilled by draw calls.
pub struct VectorState {
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
    max_vertices: usize,
}

impl VectorState {
    pub fn with_capacity(max_vertices: usize) -> Self {
        Self {
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(max_vertices * VectorVertex::FLOATS),
            max_vertices,
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    pub fn max_vertices(&self) -> usize {
        self.max_vertices
    }

    /// Raw pointer to the flat float buffer (for SAB copy).
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    /// Expand indexed geometry into the flat triangle list.
    /// A shape that would overflow the buffer is dropped whole.
    fn flush_geometry(&mut self) {
        let needed = self.geometry.indices.len();
        if self.vertex_count() + needed <= self.max_vertices {
            for idx in &self.geometry.indices {
                let v = &self.geometry.vertices[*idx as usize];
                self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
            }
        } else {
            log::warn!("vector buffer full, dropping shape of {} vertices", needed);
        }
    }

    fn closed_path(points: &[Vec2]) -> Path {
        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(true);
        builder.build()
    }

    /// Tessellate a stroked closed polygon.
    pub fn stroke_polygon(&mut self, points: &[Vec2], width: f32, color: VectorColor) {
        if points.len() < 3 {
            return;
        }
        let path = Self::closed_path(points);
        self.stroke_path(&path, width, color);
    }

    /// Tessellate a stroked circle.
    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: VectorColor) {
        if radius <= 0.0 {
            return;
        }
        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, lyon::path::Winding::Positive);
        let path = builder.build();
        self.stroke_path(&path, width, color);
    }

    fn stroke_path(&mut self, path: &Path, width: f32, color: VectorColor) {
        // Scratch geometry holds one shape; a failed tessellation can leave partial output
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
        let result = self.stroke_tess.tessellate_path(
            path,
            &StrokeOptions::tolerance(0.5).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color }),
        );
        match result {
            Ok(()) => self.flush_geometry(),
            Err(e) => log::warn!("stroke tessellation failed: {:?}", e),
        }
    }
}

impl Default for VectorState {
    fn default() -> Self {
        Self::with_capacity(16384)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_vertex_is_24_bytes() {
        assert_eq!(std::mem::size_of::<VectorVertex>(), 24);
        assert_eq!(VectorVertex::STRIDE_BYTES, 24);
    }

    #[test]
    fn color_from_hex() {
        let c = VectorColor::from_hex(0xff8000).with_alpha(0.5);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 0.502).abs() < 0.01);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.a, 0.5);
    }

    #[test]
    fn stroke_polygon_produces_vertices() {
        let mut state = VectorState::default();
        let points = [Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), Vec2::new(50.0, 80.0)];
        state.stroke_polygon(&points, 1.0, VectorColor::GRAY);
        assert!(state.vertex_count() > 0);
        assert_eq!(state.vertex_count() % 3, 0);
    }

    #[test]
    fn degenerate_shapes_produce_nothing() {
        let mut state = VectorState::default();
        state.stroke_polygon(&[Vec2::ZERO, Vec2::ONE], 1.0, VectorColor::WHITE);
        state.stroke_circle(Vec2::ZERO, 0.0, 1.0, VectorColor::WHITE);
        state.stroke_circle(Vec2::ZERO, -1.0, 1.0, VectorColor::WHITE);
        assert_eq!(state.vertex_count(), 0);
    }

    #[test]
    fn overflowing_shape_is_dropped() {
        let mut state = VectorState::with_capacity(6);
        state.stroke_circle(Vec2::new(50.0, 50.0), 40.0, 1.0, VectorColor::WHITE);
        assert_eq!(state.vertex_count(), 0);
    }

    #[test]
    fn leftover_geometry_does_not_leak_into_next_shape() {
        let triangle = [Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), Vec2::new(50.0, 80.0)];
        let mut expected = VectorState::default();
        expected.stroke_polygon(&triangle, 1.0, VectorColor::GRAY);

        let mut state = VectorState::default();
        // Partial output of an aborted tessellation
        state.geometry.vertices.push(VectorVertex::default());
        state.geometry.vertices.push(VectorVertex::default());
        state.geometry.indices.extend_from_slice(&[0, 1, 0]);
        state.stroke_polygon(&triangle, 1.0, VectorColor::GRAY);
        assert_eq!(state.vertex_count(), expected.vertex_count());
        let gray = VectorColor::GRAY;
        assert!(state
            .buffer
            .chunks(VectorVertex::FLOATS)
            .all(|v| v[2..] == [gray.r, gray.g, gray.b, gray.a]));
    }

    #[test]
    fn consecutive_shapes_append_independently() {
        let mut circle_only = VectorState::default();
        circle_only.stroke_circle(Vec2::new(10.0, 10.0), 5.0, 1.0, VectorColor::WHITE);
        let mut both = VectorState::default();
        both.stroke_circle(Vec2::new(10.0, 10.0), 5.0, 1.0, VectorColor::WHITE);
        both.stroke_circle(Vec2::new(10.0, 10.0), 5.0, 1.0, VectorColor::WHITE);
        assert_eq!(both.vertex_count(), 2 * circle_only.vertex_count());
    }

    #[test]
    fn clear_resets_buffer() {
        let mut state = VectorState::default();
        state.stroke_circle(Vec2::new(10.0, 10.0), 5.0, 1.0, VectorColor::WHITE);
        assert!(state.vertex_count() > 0);
        state.clear();
        assert_eq!(state.vertex_count(), 0);
    }
}
