use bytemuck::{Pod, Zeroable};

/// Per-instance data for the screen-space SDF sphere pipeline.
/// Written to SharedArrayBuffer for the TypeScript SDF renderer.
/// 12 floats = 48 bytes per instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SDFInstance {
    /// Viewport position in pixels.
    pub x: f32,
    pub y: f32,
    /// Projected radius in pixels.
    pub radius: f32,
    /// Self-rotation in radians (drives surface shading offset).
    pub rotation: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub shininess: f32,
    pub emissive: f32,
    /// View depth, used by the renderer for fog and ordering checks.
    pub depth: f32,
    pub _pad0: f32,
    pub _pad1: f32,
}

impl SDFInstance {
    pub const FLOATS: usize = crate::bridge::protocol::SDF_INSTANCE_FLOATS;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Bounded buffer of SDF instances, rebuilt every frame.
pub struct SDFBuffer {
    instances: Vec<SDFInstance>,
    capacity: usize,
}

impl SDFBuffer {
    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
            capacity: max,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Append an instance. Returns `false` (and drops it) once full.
    pub fn push(&mut self, instance: SDFInstance) -> bool {
        if self.instances.len() >= self.capacity {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_slice(&self) -> &[SDFInstance] {
        &self.instances
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for SDFBuffer {
    fn default() -> Self {
        Self::with_capacity(128)
    }
}
