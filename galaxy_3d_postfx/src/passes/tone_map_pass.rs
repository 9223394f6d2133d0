/// HDR tone mapping to the display format.
///
/// With eye adaptation, the measured average luminance is bound as a
/// second input and the exposure acts as a bias.

use crate::error::Result;
use crate::effect::HdrParams;
use crate::graphics_device::{ProgramDesc, TextureFormat};
use crate::pool::SurfaceDescriptor;
use crate::render_graph::{InputBinding, PassContext, PassDescriptor, PassId, PassKind, PassNode};
use super::OutputSize;

pub const TONE_MAP_PROGRAM: ProgramDesc = ProgramDesc {
    name: "postfx::tone_map",
    fragment_shader: "postfx/tone_map.frag",
    push_constant_size: std::mem::size_of::<ToneMapConstants>() as u32,
};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ToneMapConstants {
    pub exposure: f32,
    pub gamma: f32,
    /// 1 when the luminance input is bound
    pub auto_expose: u32,
    pub _padding: u32,
}

pub struct ToneMapPass {
    descriptor: PassDescriptor,
    size: OutputSize,
    params: HdrParams,
    format: TextureFormat,
}

impl ToneMapPass {
    /// # Arguments
    ///
    /// * `pass_id` - Position of the pass in the list
    /// * `color` - HDR image
    /// * `luminance` - Average luminance, when eye adaptation is wired in
    /// * `fixed_size` - Output size, or `None` to match `color`
    /// * `params` - Exposure and gamma
    /// * `format` - Display (LDR) format of the output
    pub fn new(
        pass_id: PassId,
        color: InputBinding,
        luminance: Option<InputBinding>,
        fixed_size: Option<(u32, u32)>,
        params: HdrParams,
        format: TextureFormat,
    ) -> Self {
        let descriptor = match luminance {
            Some(luminance) => PassDescriptor::new(pass_id, &[color, luminance], 1),
            None => PassDescriptor::new(pass_id, &[color], 1),
        };
        Self {
            descriptor,
            size: OutputSize::or_fixed(OutputSize::MatchInput, fixed_size),
            params,
            format,
        }
    }

    /// Whether the pass reads a measured luminance
    pub fn is_adaptive(&self) -> bool {
        self.descriptor.input_count() > 1
    }
}

impl PassNode for ToneMapPass {
    fn kind(&self) -> PassKind {
        PassKind::ToneMap
    }

    fn pass_descriptor(&self) -> &PassDescriptor {
        &self.descriptor
    }

    fn compute_output_descriptor(&self, _slot: usize, inputs: &[SurfaceDescriptor]) -> SurfaceDescriptor {
        self.size.descriptor(inputs, Some(self.format))
    }

    fn process(&mut self, ctx: &mut PassContext<'_>) -> Result<()> {
        let constants = ToneMapConstants {
            exposure: self.params.exposure(),
            gamma: self.params.gamma(),
            auto_expose: self.is_adaptive() as u32,
            _padding: 0,
        };
        ctx.draw_fullscreen(PassKind::ToneMap, &TONE_MAP_PROGRAM, bytemuck::bytes_of(&constants), &[])
    }
}
