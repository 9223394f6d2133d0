/// Surface descriptor: the key identifying interchangeable transient surfaces.

use crate::graphics_device::{TextureDesc, TextureFormat, TextureInfo, TextureUsage};

/// Shape and format of a pooled surface
///
/// Ordered lexicographically in field order (width, height, mip levels,
/// array size, format, sample count) so it can key an ordered
/// multi-collection. Two surfaces are interchangeable only when every
/// field matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceDescriptor {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Number of mip levels
    pub mip_levels: u32,
    /// Number of array layers
    pub array_size: u32,
    /// Pixel format
    pub format: TextureFormat,
    /// MSAA sample count
    pub sample_count: u32,
}

impl SurfaceDescriptor {
    /// Single-mip, single-layer, non-multisampled surface
    pub fn new_2d(width: u32, height: u32, format: TextureFormat) -> Self {
        Self {
            width,
            height,
            mip_levels: 1,
            array_size: 1,
            format,
            sample_count: 1,
        }
    }

    /// Descriptor matching an existing texture
    pub fn from_texture_info(info: &TextureInfo) -> Self {
        Self {
            width: info.width,
            height: info.height,
            mip_levels: info.mip_levels,
            array_size: info.array_layers,
            format: info.format,
            sample_count: info.sample_count,
        }
    }

    /// Same descriptor with another format
    pub fn with_format(&self, format: TextureFormat) -> Self {
        Self { format, ..*self }
    }

    /// Texture descriptor used when the pool has to allocate
    ///
    /// Transient surfaces are always written by one pass and sampled by
    /// the next ones.
    pub fn to_texture_desc(&self) -> TextureDesc {
        TextureDesc {
            width: self.width,
            height: self.height,
            mip_levels: self.mip_levels,
            array_layers: self.array_size,
            format: self.format,
            sample_count: self.sample_count,
            usage: if self.format.is_depth() {
                TextureUsage::DepthStencil
            } else {
                TextureUsage::SampledAndRenderTarget
            },
        }
    }

    /// Returns true when the texture was created for this exact descriptor
    pub fn matches(&self, info: &TextureInfo) -> bool {
        *self == Self::from_texture_info(info)
    }
}
