/// Static (camera-only) motion blur.
///
/// Reprojects every pixel with the previous frame's view-projection and
/// blurs along the screen-space velocity. Reads scene color and depth.

use crate::error::Result;
use crate::effect::MotionBlurParams;
use crate::graphics_device::ProgramDesc;
use crate::pool::SurfaceDescriptor;
use crate::render_graph::{InputBinding, PassContext, PassDescriptor, PassId, PassKind, PassNode};
use super::OutputSize;

pub const MOTION_BLUR_PROGRAM: ProgramDesc = ProgramDesc {
    name: "postfx::motion_blur",
    fragment_shader: "postfx/motion_blur.frag",
    push_constant_size: std::mem::size_of::<MotionBlurConstants>() as u32,
};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MotionBlurConstants {
    pub prev_view_proj: [f32; 16],
    pub view_proj_inverse: [f32; 16],
}

pub struct MotionBlurPass {
    descriptor: PassDescriptor,
    size: OutputSize,
    params: MotionBlurParams,
}

impl MotionBlurPass {
    /// # Arguments
    ///
    /// * `pass_id` - Position of the pass in the list
    /// * `color` - Image to blur
    /// * `depth` - Depth matching `color`
    /// * `fixed_size` - Output size, or `None` to match `color`
    /// * `params` - Camera matrices
    pub fn new(
        pass_id: PassId,
        color: InputBinding,
        depth: InputBinding,
        fixed_size: Option<(u32, u32)>,
        params: MotionBlurParams,
    ) -> Self {
        Self {
            descriptor: PassDescriptor::new(pass_id, &[color, depth], 1),
            size: OutputSize::or_fixed(OutputSize::MatchInput, fixed_size),
            params,
        }
    }

    pub fn params(&self) -> &MotionBlurParams {
        &self.params
    }
}

impl PassNode for MotionBlurPass {
    fn kind(&self) -> PassKind {
        PassKind::MotionBlur
    }

    fn pass_descriptor(&self) -> &PassDescriptor {
        &self.descriptor
    }

    fn compute_output_descriptor(&self, _slot: usize, inputs: &[SurfaceDescriptor]) -> SurfaceDescriptor {
        self.size.descriptor(inputs, None)
    }

    fn process(&mut self, ctx: &mut PassContext<'_>) -> Result<()> {
        let constants = MotionBlurConstants {
            prev_view_proj: self.params.prev_view_proj().to_cols_array(),
            view_proj_inverse: self.params.view_proj_inverse().to_cols_array(),
        };
        ctx.draw_fullscreen(PassKind::MotionBlur, &MOTION_BLUR_PROGRAM, bytemuck::bytes_of(&constants), &[])
    }
}
