/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Records created resources and recorded commands so the pass graph,
/// the surface pool and the leaf passes can be verified without a backend.

use std::sync::{Arc, Mutex};
use crate::error::Result;
use crate::engine_bail;
use crate::graphics_device::{
    texture_address, CommandList, GraphicsDevice, GraphicsDeviceStats, Program, ProgramDesc,
    Rect2D, Texture, TextureDesc, TextureFormat, TextureInfo, TextureUsage, Viewport,
};

// ============================================================================
// Mock Texture
// ============================================================================

#[derive(Debug)]
pub struct MockTexture {
    pub info: TextureInfo,
    pub name: String,
}

impl MockTexture {
    pub fn new(desc: &TextureDesc, name: String) -> Self {
        Self { info: TextureInfo::from_desc(desc), name }
    }
}

impl Texture for MockTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }
}

/// Standalone sampled + render target texture (scene color, destination...)
pub fn mock_texture(width: u32, height: u32, format: TextureFormat) -> Arc<dyn Texture> {
    let desc = TextureDesc {
        width,
        height,
        mip_levels: 1,
        array_layers: 1,
        format,
        sample_count: 1,
        usage: if format.is_depth() {
            TextureUsage::DepthStencil
        } else {
            TextureUsage::SampledAndRenderTarget
        },
    };
    Arc::new(MockTexture::new(&desc, format!("external_{}x{}", width, height)))
}

// ============================================================================
// Mock Program
// ============================================================================

#[derive(Debug)]
pub struct MockProgram {
    pub name: String,
}

impl Program for MockProgram {
    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Mock CommandList
// ============================================================================

/// One recorded command; textures are identified by `texture_address`
#[derive(Debug, Clone, PartialEq)]
pub enum MockCommand {
    BeginPass { label: String, targets: Vec<usize> },
    EndPass,
    SetViewport(Viewport),
    BindProgram(String),
    BindTexture { slot: u32, texture: usize },
    PushConstants { offset: u32, size: usize },
    Draw { vertex_count: u32 },
    Blit { src: usize, dst: usize, region: Rect2D },
}

#[derive(Debug, Default)]
pub struct MockCommandList {
    pub commands: Vec<MockCommand>,
}

impl MockCommandList {
    pub fn new() -> Self {
        Self { commands: Vec::new() }
    }

    /// Labels of every render pass, in recording order
    pub fn pass_labels(&self) -> Vec<String> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                MockCommand::BeginPass { label, .. } => Some(label.clone()),
                _ => None,
            })
            .collect()
    }

    /// (src, dst) of every blit, in recording order
    pub fn blits(&self) -> Vec<(usize, usize)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                MockCommand::Blit { src, dst, .. } => Some((*src, *dst)),
                _ => None,
            })
            .collect()
    }

    pub fn draw_count(&self) -> usize {
        self.commands.iter().filter(|c| matches!(c, MockCommand::Draw { .. })).count()
    }
}

impl CommandList for MockCommandList {
    fn begin_pass(&mut self, label: &str, targets: &[&dyn Texture]) -> Result<()> {
        self.commands.push(MockCommand::BeginPass {
            label: label.to_string(),
            targets: targets.iter().map(|t| texture_address(*t)).collect(),
        });
        Ok(())
    }

    fn end_pass(&mut self) -> Result<()> {
        self.commands.push(MockCommand::EndPass);
        Ok(())
    }

    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.commands.push(MockCommand::SetViewport(viewport));
        Ok(())
    }

    fn bind_program(&mut self, program: &Arc<dyn Program>) -> Result<()> {
        self.commands.push(MockCommand::BindProgram(program.name().to_string()));
        Ok(())
    }

    fn bind_texture(&mut self, slot: u32, texture: &dyn Texture) -> Result<()> {
        self.commands.push(MockCommand::BindTexture { slot, texture: texture_address(texture) });
        Ok(())
    }

    fn push_constants(&mut self, offset: u32, data: &[u8]) -> Result<()> {
        self.commands.push(MockCommand::PushConstants { offset, size: data.len() });
        Ok(())
    }

    fn draw(&mut self, vertex_count: u32, _first_vertex: u32) -> Result<()> {
        self.commands.push(MockCommand::Draw { vertex_count });
        Ok(())
    }

    fn blit(&mut self, src: &dyn Texture, dst: &dyn Texture, region: Rect2D) -> Result<()> {
        self.commands.push(MockCommand::Blit {
            src: texture_address(src),
            dst: texture_address(dst),
            region,
        });
        Ok(())
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

/// Mock device that tracks created resources without GPU
#[derive(Debug, Default)]
pub struct MockGraphicsDevice {
    /// Track created textures
    pub created_textures: Arc<Mutex<Vec<String>>>,
    /// Track created programs
    pub created_programs: Arc<Mutex<Vec<String>>>,
    /// Number of wait_idle() calls
    pub wait_idle_calls: Arc<Mutex<u32>>,
    /// When true, create_texture() fails
    pub fail_texture_creation: bool,
    /// When true, wait_idle() fails
    pub fail_wait_idle: bool,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_created_textures(&self) -> Vec<String> {
        self.created_textures.lock().unwrap().clone()
    }

    pub fn get_created_programs(&self) -> Vec<String> {
        self.created_programs.lock().unwrap().clone()
    }

    pub fn get_wait_idle_calls(&self) -> u32 {
        *self.wait_idle_calls.lock().unwrap()
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>> {
        if self.fail_texture_creation {
            engine_bail!("galaxy3d::mock", "create_texture: forced failure");
        }
        let name = format!("texture_{}x{}_{:?}", desc.width, desc.height, desc.format);
        self.created_textures.lock().unwrap().push(name.clone());
        Ok(Arc::new(MockTexture::new(&desc, name)))
    }

    fn create_program(&mut self, desc: &ProgramDesc) -> Result<Arc<dyn Program>> {
        self.created_programs.lock().unwrap().push(desc.name.to_string());
        Ok(Arc::new(MockProgram { name: desc.name.to_string() }))
    }

    fn wait_idle(&self) -> Result<()> {
        *self.wait_idle_calls.lock().unwrap() += 1;
        if self.fail_wait_idle {
            engine_bail!("galaxy3d::mock", "wait_idle: forced failure");
        }
        Ok(())
    }

    fn stats(&self) -> GraphicsDeviceStats {
        GraphicsDeviceStats {
            textures_created: self.created_textures.lock().unwrap().len() as u64,
            programs_created: self.created_programs.lock().unwrap().len() as u64,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
