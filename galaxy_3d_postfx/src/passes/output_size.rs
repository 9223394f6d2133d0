/// Output sizing rules shared by the effect passes.

use crate::graphics_device::TextureFormat;
use crate::pool::SurfaceDescriptor;

/// How a pass sizes its output from its primary (first) input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSize {
    /// Same size as the primary input
    MatchInput,
    /// Primary input size shifted right by `n` (never below 1x1)
    Downscale(u32),
    /// Fixed size regardless of inputs
    Fixed { width: u32, height: u32 },
}

impl OutputSize {
    /// `default`, unless the caller asked for a fixed size
    pub fn or_fixed(default: OutputSize, fixed_size: Option<(u32, u32)>) -> Self {
        match fixed_size {
            Some((width, height)) => OutputSize::Fixed {
                width: width.max(1),
                height: height.max(1),
            },
            None => default,
        }
    }

    /// Output extent for an input of `width` x `height`
    pub fn extent(&self, width: u32, height: u32) -> (u32, u32) {
        match *self {
            OutputSize::MatchInput => (width, height),
            OutputSize::Downscale(shift) => {
                let shift = shift.min(31);
                ((width >> shift).max(1), (height >> shift).max(1))
            }
            OutputSize::Fixed { width, height } => (width, height),
        }
    }

    /// Single-sampled, single-mip output descriptor
    ///
    /// Uses the primary input's format unless `format` overrides it.
    pub fn descriptor(&self, inputs: &[SurfaceDescriptor], format: Option<TextureFormat>) -> SurfaceDescriptor {
        let primary = inputs
            .first()
            .copied()
            .unwrap_or_else(|| SurfaceDescriptor::new_2d(1, 1, TextureFormat::R16G16B16A16_SFLOAT));
        let (width, height) = self.extent(primary.width, primary.height);
        SurfaceDescriptor::new_2d(width, height, format.unwrap_or(primary.format))
    }
}
