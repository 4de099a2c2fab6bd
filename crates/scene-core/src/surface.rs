//! The seam between the animator and whatever puts pixels on screen.

use crate::config::BlendMode;
use crate::error::SceneError;
use crate::mesh::MeshData;
use glam::{Mat4, Vec4};
use smallvec::SmallVec;

/// Output size in device pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }
}

/// Everything a surface needs to allocate its resources once.
pub struct SurfaceSetup<'a> {
    pub viewport: Viewport,
    pub meshes: &'a [MeshData],
    pub clear_color: [f32; 4],
    /// Number of draw items every frame will carry.
    pub object_count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawItem {
    pub mesh: usize,
    pub model: Mat4,
    pub color: Vec4,
    pub blend: BlendMode,
}

/// One frame's worth of draw data, in scene order.
pub struct Frame<'a> {
    pub view: Mat4,
    pub projection: Mat4,
    pub clear_color: [f32; 4],
    pub items: &'a SmallVec<[DrawItem; 16]>,
}

pub trait RenderSurface {
    /// Resize the output. Only called with a non-empty viewport that differs
    /// from the previous one.
    fn resize(&mut self, viewport: Viewport);

    /// Draw one frame. An error affects this frame only.
    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), SceneError>;

    /// Release GPU and platform resources. Called exactly once.
    fn release(&mut self);
}
