/// CommandList trait - for recording post-processing commands

use std::sync::Arc;
use crate::error::Result;
use crate::graphics_device::{Program, Texture};

/// Command list for recording full-screen passes and copies
///
/// Commands are recorded by the caller-owned list and submitted by the
/// caller once the frame is complete.
pub trait CommandList: Send + Sync {
    /// Begin a render pass writing to the given color targets
    ///
    /// # Arguments
    ///
    /// * `label` - Debug label (shows up in GPU captures)
    /// * `targets` - Color attachments, in output slot order
    fn begin_pass(&mut self, label: &str, targets: &[&dyn Texture]) -> Result<()>;

    /// End the current render pass
    fn end_pass(&mut self) -> Result<()>;

    /// Set the viewport
    fn set_viewport(&mut self, viewport: Viewport) -> Result<()>;

    /// Bind a full-screen program
    fn bind_program(&mut self, program: &Arc<dyn Program>) -> Result<()>;

    /// Bind a texture to a sampler slot of the bound program
    fn bind_texture(&mut self, slot: u32, texture: &dyn Texture) -> Result<()>;

    /// Push constants to the bound program
    ///
    /// # Arguments
    ///
    /// * `offset` - Offset in bytes into the push constant range
    /// * `data` - Data to push
    fn push_constants(&mut self, offset: u32, data: &[u8]) -> Result<()>;

    /// Draw vertices (3 for a full-screen triangle)
    fn draw(&mut self, vertex_count: u32, first_vertex: u32) -> Result<()>;

    /// Copy a region of `src` into `dst` (outside of any render pass)
    ///
    /// # Arguments
    ///
    /// * `src` - Source texture
    /// * `dst` - Destination texture
    /// * `region` - Destination rectangle; the whole source is scaled into it
    fn blit(&mut self, src: &dyn Texture, dst: &dyn Texture, region: Rect2D) -> Result<()>;
}

/// Viewport dimensions and depth range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    /// Viewport covering a whole `width` x `height` target
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width as f32,
            height: height as f32,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }
}

/// 2D rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect2D {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect2D {
    /// Rectangle anchored at the origin
    pub fn from_size(width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, width, height }
    }
}
