/// Additive composite: base + overlay * intensity.
///
/// Used to merge bloom, light streaks and lens-flare ghosts back into the
/// full-resolution image. The overlay is upsampled by the sampler.

use crate::error::Result;
use crate::graphics_device::ProgramDesc;
use crate::pool::SurfaceDescriptor;
use crate::render_graph::{InputBinding, PassContext, PassDescriptor, PassId, PassKind, PassNode};
use super::OutputSize;

pub const COMPOSITE_PROGRAM: ProgramDesc = ProgramDesc {
    name: "postfx::composite",
    fragment_shader: "postfx/composite.frag",
    push_constant_size: std::mem::size_of::<CompositeConstants>() as u32,
};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CompositeConstants {
    pub intensity: f32,
    pub _padding: [f32; 3],
}

pub struct CompositePass {
    descriptor: PassDescriptor,
    size: OutputSize,
    intensity: f32,
}

impl CompositePass {
    /// # Arguments
    ///
    /// * `pass_id` - Position of the pass in the list
    /// * `base` - Full-resolution image (sizes the output)
    /// * `overlay` - Image added on top
    /// * `fixed_size` - Output size, or `None` to match `base`
    /// * `intensity` - Overlay weight
    pub fn new(
        pass_id: PassId,
        base: InputBinding,
        overlay: InputBinding,
        fixed_size: Option<(u32, u32)>,
        intensity: f32,
    ) -> Self {
        Self {
            descriptor: PassDescriptor::new(pass_id, &[base, overlay], 1),
            size: OutputSize::or_fixed(OutputSize::MatchInput, fixed_size),
            intensity,
        }
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }
}

impl PassNode for CompositePass {
    fn kind(&self) -> PassKind {
        PassKind::Composite
    }

    fn pass_descriptor(&self) -> &PassDescriptor {
        &self.descriptor
    }

    fn compute_output_descriptor(&self, _slot: usize, inputs: &[SurfaceDescriptor]) -> SurfaceDescriptor {
        self.size.descriptor(inputs, None)
    }

    fn process(&mut self, ctx: &mut PassContext<'_>) -> Result<()> {
        let constants = CompositeConstants {
            intensity: self.intensity,
            _padding: [0.0; 3],
        };
        ctx.draw_fullscreen(PassKind::Composite, &COMPOSITE_PROGRAM, bytemuck::bytes_of(&constants), &[])
    }
}
