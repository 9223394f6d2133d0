/// Lens-flare ghosts modulated by a caller-provided flare texture.

use std::sync::Arc;
use crate::error::Result;
use crate::effect::LensFlareParams;
use crate::graphics_device::{ProgramDesc, Texture};
use crate::pool::SurfaceDescriptor;
use crate::render_graph::{InputBinding, PassContext, PassDescriptor, PassId, PassKind, PassNode};
use super::OutputSize;

/// The flare texture is bound after the input, in sampler slot 1.
pub const LENS_FLARE_PROGRAM: ProgramDesc = ProgramDesc {
    name: "postfx::lens_flare",
    fragment_shader: "postfx/lens_flare.frag",
    push_constant_size: 0,
};

pub struct LensFlarePass {
    descriptor: PassDescriptor,
    size: OutputSize,
    flare_texture: Arc<dyn Texture>,
}

impl LensFlarePass {
    pub fn new(
        pass_id: PassId,
        input: InputBinding,
        fixed_size: Option<(u32, u32)>,
        params: &LensFlareParams,
    ) -> Self {
        Self {
            descriptor: PassDescriptor::new(pass_id, &[input], 1),
            size: OutputSize::or_fixed(OutputSize::Downscale(1), fixed_size),
            flare_texture: Arc::clone(params.flare_texture()),
        }
    }
}

impl PassNode for LensFlarePass {
    fn kind(&self) -> PassKind {
        PassKind::LensFlare
    }

    fn pass_descriptor(&self) -> &PassDescriptor {
        &self.descriptor
    }

    fn compute_output_descriptor(&self, _slot: usize, inputs: &[SurfaceDescriptor]) -> SurfaceDescriptor {
        self.size.descriptor(inputs, None)
    }

    fn process(&mut self, ctx: &mut PassContext<'_>) -> Result<()> {
        let flare = Arc::clone(&self.flare_texture);
        ctx.draw_fullscreen(PassKind::LensFlare, &LENS_FLARE_PROGRAM, &[], &[flare.as_ref()])
    }
}
