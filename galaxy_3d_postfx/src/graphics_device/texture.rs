/// Texture trait, texture descriptor, and texture info

/// Texture pixel format
///
/// Declaration order is significant: surface descriptors order by format
/// after their dimensions, so keep new formats appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    R8G8B8A8_UNORM,
    R8G8B8A8_SRGB,
    B8G8R8A8_UNORM,
    B8G8R8A8_SRGB,
    R16G16B16A16_SFLOAT,
    R32_SFLOAT,
    D16_UNORM,
    D32_FLOAT,
    D24_UNORM_S8_UINT,
}

impl TextureFormat {
    /// Returns true for depth and depth/stencil formats
    pub fn is_depth(&self) -> bool {
        matches!(
            self,
            TextureFormat::D16_UNORM | TextureFormat::D32_FLOAT | TextureFormat::D24_UNORM_S8_UINT
        )
    }
}

/// Texture usage flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureUsage {
    /// Texture can be sampled and rendered to
    SampledAndRenderTarget,
    /// Texture can be used as depth/stencil attachment
    DepthStencil,
}

// ===== TEXTURE DESC =====

/// Descriptor for creating a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureDesc {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Number of mip levels (1 = no mipmaps)
    pub mip_levels: u32,
    /// Number of array layers (1 = simple 2D texture)
    pub array_layers: u32,
    /// Pixel format
    pub format: TextureFormat,
    /// MSAA sample count (1 = no multisampling)
    pub sample_count: u32,
    /// Usage flags
    pub usage: TextureUsage,
}

// ===== TEXTURE INFO =====

/// Read-only properties of a created texture.
///
/// Returned by `Texture::info()` to query texture properties
/// without exposing backend-specific details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Number of mip levels
    pub mip_levels: u32,
    /// Number of array layers
    pub array_layers: u32,
    /// Pixel format
    pub format: TextureFormat,
    /// MSAA sample count
    pub sample_count: u32,
    /// Usage flags
    pub usage: TextureUsage,
}

impl TextureInfo {
    /// Build the info a backend reports for a texture created from `desc`
    pub fn from_desc(desc: &TextureDesc) -> Self {
        Self {
            width: desc.width,
            height: desc.height,
            mip_levels: desc.mip_levels,
            array_layers: desc.array_layers,
            format: desc.format,
            sample_count: desc.sample_count,
            usage: desc.usage,
        }
    }
}

// ===== TEXTURE TRAIT =====

/// Texture resource trait
///
/// Implemented by backend-specific texture types (e.g., VulkanTexture).
/// The texture is automatically destroyed when dropped.
pub trait Texture: Send + Sync {
    /// Get the read-only properties of this texture
    fn info(&self) -> &TextureInfo;
}

/// Identity of a texture object, stable for as long as it is alive
///
/// Two handles to the same texture (e.g. clones of one `Arc`) share the
/// same address.
pub fn texture_address(texture: &dyn Texture) -> usize {
    texture as *const dyn Texture as *const () as usize
}
