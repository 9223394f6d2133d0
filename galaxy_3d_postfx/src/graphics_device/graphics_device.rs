/// GraphicsDevice trait - GPU resource factory interface

use std::sync::Arc;
use crate::error::Result;
use crate::graphics_device::{Program, ProgramDesc, Texture, TextureDesc};

/// Graphics device statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphicsDeviceStats {
    /// Textures created since the device was opened
    pub textures_created: u64,
    /// Programs created since the device was opened
    pub programs_created: u64,
}

/// Graphics device trait
///
/// The narrow factory interface the post-processing framework needs from
/// a backend (Vulkan, Direct3D 12, ...). Command recording goes through
/// `CommandList`, which the caller owns.
pub trait GraphicsDevice: Send + Sync {
    /// Create a texture
    ///
    /// # Arguments
    ///
    /// * `desc` - Texture descriptor
    ///
    /// # Returns
    ///
    /// A shared pointer to the created texture
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>>;

    /// Create a full-screen program
    ///
    /// # Arguments
    ///
    /// * `desc` - Program descriptor
    fn create_program(&mut self, desc: &ProgramDesc) -> Result<Arc<dyn Program>>;

    /// Wait for all submitted GPU work to complete
    fn wait_idle(&self) -> Result<()>;

    /// Get statistics about the device
    fn stats(&self) -> GraphicsDeviceStats;
}
