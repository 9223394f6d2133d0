/// Separable-kernel blur run in a single full-screen pass.

use crate::error::Result;
use crate::graphics_device::ProgramDesc;
use crate::pool::SurfaceDescriptor;
use crate::render_graph::{InputBinding, PassContext, PassDescriptor, PassId, PassKind, PassNode};
use super::OutputSize;

pub const BLUR_PROGRAM: ProgramDesc = ProgramDesc {
    name: "postfx::blur",
    fragment_shader: "postfx/blur.frag",
    push_constant_size: std::mem::size_of::<BlurConstants>() as u32,
};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BlurConstants {
    /// 1 / input size
    pub texel_size: [f32; 2],
    pub _padding: [f32; 2],
}

pub struct BlurPass {
    descriptor: PassDescriptor,
    size: OutputSize,
}

impl BlurPass {
    pub fn new(pass_id: PassId, input: InputBinding, fixed_size: Option<(u32, u32)>) -> Self {
        Self {
            descriptor: PassDescriptor::new(pass_id, &[input], 1),
            size: OutputSize::or_fixed(OutputSize::MatchInput, fixed_size),
        }
    }
}

impl PassNode for BlurPass {
    fn kind(&self) -> PassKind {
        PassKind::Blur
    }

    fn pass_descriptor(&self) -> &PassDescriptor {
        &self.descriptor
    }

    fn compute_output_descriptor(&self, _slot: usize, inputs: &[SurfaceDescriptor]) -> SurfaceDescriptor {
        self.size.descriptor(inputs, None)
    }

    fn process(&mut self, ctx: &mut PassContext<'_>) -> Result<()> {
        let info = *ctx.input(0)?.info();
        let constants = BlurConstants {
            texel_size: [1.0 / info.width.max(1) as f32, 1.0 / info.height.max(1) as f32],
            _padding: [0.0; 2],
        };
        ctx.draw_fullscreen(PassKind::Blur, &BLUR_PROGRAM, bytemuck::bytes_of(&constants), &[])
    }
}
