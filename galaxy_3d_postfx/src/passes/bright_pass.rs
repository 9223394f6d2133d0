/// Bloom bright pass: keeps what is above the threshold, at half resolution.

use crate::error::Result;
use crate::effect::BloomParams;
use crate::graphics_device::ProgramDesc;
use crate::pool::SurfaceDescriptor;
use crate::render_graph::{InputBinding, PassContext, PassDescriptor, PassId, PassKind, PassNode};
use super::OutputSize;

pub const BRIGHT_PASS_PROGRAM: ProgramDesc = ProgramDesc {
    name: "postfx::bright_pass",
    fragment_shader: "postfx/bright_pass.frag",
    push_constant_size: std::mem::size_of::<BrightPassConstants>() as u32,
};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BrightPassConstants {
    pub threshold: f32,
    pub exposure_scale: f32,
    pub _padding: [f32; 2],
}

pub struct BrightPass {
    descriptor: PassDescriptor,
    size: OutputSize,
    threshold: f32,
    exposure_scale: f32,
}

impl BrightPass {
    pub fn new(pass_id: PassId, input: InputBinding, fixed_size: Option<(u32, u32)>, params: &BloomParams) -> Self {
        Self {
            descriptor: PassDescriptor::new(pass_id, &[input], 1),
            size: OutputSize::or_fixed(OutputSize::Downscale(1), fixed_size),
            threshold: params.threshold(),
            exposure_scale: params.exposure_scale(),
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

impl PassNode for BrightPass {
    fn kind(&self) -> PassKind {
        PassKind::BrightPass
    }

    fn pass_descriptor(&self) -> &PassDescriptor {
        &self.descriptor
    }

    fn compute_output_descriptor(&self, _slot: usize, inputs: &[SurfaceDescriptor]) -> SurfaceDescriptor {
        self.size.descriptor(inputs, None)
    }

    fn process(&mut self, ctx: &mut PassContext<'_>) -> Result<()> {
        let constants = BrightPassConstants {
            threshold: self.threshold,
            exposure_scale: self.exposure_scale,
            _padding: [0.0; 2],
        };
        ctx.draw_fullscreen(PassKind::BrightPass, &BRIGHT_PASS_PROGRAM, bytemuck::bytes_of(&constants), &[])
    }
}
