/// FXAA anti-aliasing.

use crate::error::Result;
use crate::effect::FxaaParams;
use crate::graphics_device::ProgramDesc;
use crate::pool::SurfaceDescriptor;
use crate::render_graph::{InputBinding, PassContext, PassDescriptor, PassId, PassKind, PassNode};
use super::OutputSize;

pub const FXAA_PROGRAM: ProgramDesc = ProgramDesc {
    name: "postfx::fxaa",
    fragment_shader: "postfx/fxaa.frag",
    push_constant_size: std::mem::size_of::<FxaaConstants>() as u32,
};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FxaaConstants {
    /// 1 / frame size
    pub rcp_frame: [f32; 2],
    /// Preset, 0 to 6
    pub quality: u32,
    pub _padding: u32,
}

pub struct FxaaPass {
    descriptor: PassDescriptor,
    size: OutputSize,
    quality: u32,
}

impl FxaaPass {
    pub fn new(pass_id: PassId, input: InputBinding, fixed_size: Option<(u32, u32)>, params: FxaaParams) -> Self {
        Self {
            descriptor: PassDescriptor::new(pass_id, &[input], 1),
            size: OutputSize::or_fixed(OutputSize::MatchInput, fixed_size),
            quality: params.quality(),
        }
    }

    pub fn quality(&self) -> u32 {
        self.quality
    }
}

impl PassNode for FxaaPass {
    fn kind(&self) -> PassKind {
        PassKind::Fxaa
    }

    fn pass_descriptor(&self) -> &PassDescriptor {
        &self.descriptor
    }

    fn compute_output_descriptor(&self, _slot: usize, inputs: &[SurfaceDescriptor]) -> SurfaceDescriptor {
        self.size.descriptor(inputs, None)
    }

    fn process(&mut self, ctx: &mut PassContext<'_>) -> Result<()> {
        let info = *ctx.input(0)?.info();
        let constants = FxaaConstants {
            rcp_frame: [1.0 / info.width.max(1) as f32, 1.0 / info.height.max(1) as f32],
            quality: self.quality,
            _padding: 0,
        };
        ctx.draw_fullscreen(PassKind::Fxaa, &FXAA_PROGRAM, bytemuck::bytes_of(&constants), &[])
    }
}
