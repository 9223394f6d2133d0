/// Light streaks: star-shaped glints around pixels above a luminance threshold.

use crate::error::Result;
use crate::effect::LightStreakerParams;
use crate::graphics_device::ProgramDesc;
use crate::pool::SurfaceDescriptor;
use crate::render_graph::{InputBinding, PassContext, PassDescriptor, PassId, PassKind, PassNode};
use super::OutputSize;

pub const LIGHT_STREAK_PROGRAM: ProgramDesc = ProgramDesc {
    name: "postfx::light_streak",
    fragment_shader: "postfx/light_streak.frag",
    push_constant_size: std::mem::size_of::<LightStreakConstants>() as u32,
};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightStreakConstants {
    pub lum_threshold: f32,
    pub start_level: u32,
    pub _padding: [u32; 2],
}

pub struct LightStreakPass {
    descriptor: PassDescriptor,
    size: OutputSize,
    params: LightStreakerParams,
}

impl LightStreakPass {
    /// Output is computed at downscale level `params.start_level()`.
    pub fn new(
        pass_id: PassId,
        input: InputBinding,
        fixed_size: Option<(u32, u32)>,
        params: LightStreakerParams,
    ) -> Self {
        Self {
            descriptor: PassDescriptor::new(pass_id, &[input], 1),
            size: OutputSize::or_fixed(OutputSize::Downscale(params.start_level()), fixed_size),
            params,
        }
    }
}

impl PassNode for LightStreakPass {
    fn kind(&self) -> PassKind {
        PassKind::LightStreak
    }

    fn pass_descriptor(&self) -> &PassDescriptor {
        &self.descriptor
    }

    fn compute_output_descriptor(&self, _slot: usize, inputs: &[SurfaceDescriptor]) -> SurfaceDescriptor {
        self.size.descriptor(inputs, None)
    }

    fn process(&mut self, ctx: &mut PassContext<'_>) -> Result<()> {
        let constants = LightStreakConstants {
            lum_threshold: self.params.lum_threshold(),
            start_level: self.params.start_level(),
            _padding: [0; 2],
        };
        ctx.draw_fullscreen(PassKind::LightStreak, &LIGHT_STREAK_PROGRAM, bytemuck::bytes_of(&constants), &[])
    }
}
