/// Eye adaptation: reduces the image to its average luminance (1x1 by default).

use crate::error::Result;
use crate::graphics_device::{ProgramDesc, TextureFormat};
use crate::pool::SurfaceDescriptor;
use crate::render_graph::{InputBinding, PassContext, PassDescriptor, PassId, PassKind, PassNode};
use super::OutputSize;

pub const LUMINANCE_PROGRAM: ProgramDesc = ProgramDesc {
    name: "postfx::luminance",
    fragment_shader: "postfx/luminance.frag",
    push_constant_size: 0,
};

pub struct LuminancePass {
    descriptor: PassDescriptor,
    size: OutputSize,
    format: TextureFormat,
}

impl LuminancePass {
    /// # Arguments
    ///
    /// * `pass_id` - Position of the pass in the list
    /// * `input` - Image to measure
    /// * `fixed_size` - Output size, 1x1 when `None`
    /// * `format` - Single-channel float format of the result
    pub fn new(pass_id: PassId, input: InputBinding, fixed_size: Option<(u32, u32)>, format: TextureFormat) -> Self {
        Self {
            descriptor: PassDescriptor::new(pass_id, &[input], 1),
            size: OutputSize::or_fixed(OutputSize::Fixed { width: 1, height: 1 }, fixed_size),
            format,
        }
    }
}

impl PassNode for LuminancePass {
    fn kind(&self) -> PassKind {
        PassKind::Luminance
    }

    fn pass_descriptor(&self) -> &PassDescriptor {
        &self.descriptor
    }

    fn compute_output_descriptor(&self, _slot: usize, inputs: &[SurfaceDescriptor]) -> SurfaceDescriptor {
        self.size.descriptor(inputs, Some(self.format))
    }

    fn process(&mut self, ctx: &mut PassContext<'_>) -> Result<()> {
        ctx.draw_fullscreen(PassKind::Luminance, &LUMINANCE_PROGRAM, &[], &[])
    }
}
