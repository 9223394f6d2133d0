/// Effect requests: one typed parameter set per effect kind.
///
/// Requests are totally ordered by kind, then by parameters. Floats compare
/// with IEEE total order so NaN parameters still give a stable order.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use glam::Mat4;
use crate::graphics_device::{texture_address, Texture};

/// Lowest accepted bloom bright-pass threshold
pub const MIN_BLOOM_THRESHOLD: f32 = 0.25;
/// Lowest accepted bloom composite intensity
pub const MIN_BLOOM_INTENSITY: f32 = 0.01;
/// Highest FXAA quality preset
pub const MAX_FXAA_QUALITY: u32 = 6;

// ===== EFFECT KIND =====

/// User-visible post-processing feature
///
/// Declaration order is the order in which the graph builder places the
/// effects in the pass list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EffectKind {
    MotionBlur,
    Bloom,
    LightStreaker,
    LensFlare,
    Hdr,
    Fxaa,
}

impl EffectKind {
    pub const ALL: [EffectKind; 6] = [
        EffectKind::MotionBlur,
        EffectKind::Bloom,
        EffectKind::LightStreaker,
        EffectKind::LensFlare,
        EffectKind::Hdr,
        EffectKind::Fxaa,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EffectKind::MotionBlur => "motion_blur",
            EffectKind::Bloom => "bloom",
            EffectKind::LightStreaker => "light_streaker",
            EffectKind::LensFlare => "lens_flare",
            EffectKind::Hdr => "hdr",
            EffectKind::Fxaa => "fxaa",
        }
    }
}

// ===== PARAMETERS =====

/// Camera matrices for static (camera-only) motion blur
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionBlurParams {
    prev_view_proj: Mat4,
    view_proj_inverse: Mat4,
}

impl MotionBlurParams {
    /// # Arguments
    ///
    /// * `prev_view_proj` - Previous frame's view-projection matrix
    /// * `view_proj_inverse` - Inverse of the current view-projection matrix
    pub fn new(prev_view_proj: Mat4, view_proj_inverse: Mat4) -> Self {
        Self { prev_view_proj, view_proj_inverse }
    }

    pub fn prev_view_proj(&self) -> Mat4 {
        self.prev_view_proj
    }

    pub fn view_proj_inverse(&self) -> Mat4 {
        self.view_proj_inverse
    }

    fn total_cmp(&self, other: &Self) -> Ordering {
        cmp_f32_slices(&self.prev_view_proj.to_cols_array(), &other.prev_view_proj.to_cols_array())
            .then_with(|| {
                cmp_f32_slices(
                    &self.view_proj_inverse.to_cols_array(),
                    &other.view_proj_inverse.to_cols_array(),
                )
            })
    }
}

/// Bloom bright-pass and composite settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloomParams {
    threshold: f32,
    exposure_scale: f32,
    intensity: f32,
}

impl BloomParams {
    /// Threshold is raised to `MIN_BLOOM_THRESHOLD`, intensity to
    /// `MIN_BLOOM_INTENSITY`.
    pub fn new(threshold: f32, exposure_scale: f32, intensity: f32) -> Self {
        Self {
            threshold: threshold.max(MIN_BLOOM_THRESHOLD),
            exposure_scale,
            intensity: intensity.max(MIN_BLOOM_INTENSITY),
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn exposure_scale(&self) -> f32 {
        self.exposure_scale
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    fn total_cmp(&self, other: &Self) -> Ordering {
        cmp_f32_slices(
            &[self.threshold, self.exposure_scale, self.intensity],
            &[other.threshold, other.exposure_scale, other.intensity],
        )
    }
}

/// Star-shaped streaks around bright spots
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightStreakerParams {
    lum_threshold: f32,
    start_level: u32,
}

impl LightStreakerParams {
    /// # Arguments
    ///
    /// * `lum_threshold` - Luminance above which pixels emit streaks
    /// * `start_level` - Downscale level the streaks are computed at (0 = full resolution)
    pub fn new(lum_threshold: f32, start_level: u32) -> Self {
        Self { lum_threshold, start_level }
    }

    pub fn lum_threshold(&self) -> f32 {
        self.lum_threshold
    }

    pub fn start_level(&self) -> u32 {
        self.start_level
    }

    fn total_cmp(&self, other: &Self) -> Ordering {
        self.lum_threshold
            .total_cmp(&other.lum_threshold)
            .then(self.start_level.cmp(&other.start_level))
    }
}

/// Lens dirt / ghost texture, compared by texture identity
#[derive(Clone)]
pub struct FlareTexture(Arc<dyn Texture>);

impl FlareTexture {
    pub fn new(texture: Arc<dyn Texture>) -> Self {
        Self(texture)
    }

    pub fn texture(&self) -> &Arc<dyn Texture> {
        &self.0
    }

    fn address(&self) -> usize {
        texture_address(self.0.as_ref())
    }
}

impl fmt::Debug for FlareTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = self.0.info();
        write!(f, "FlareTexture({:#x}, {}x{})", self.address(), info.width, info.height)
    }
}

impl PartialEq for FlareTexture {
    fn eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }
}

impl Eq for FlareTexture {}

/// Lens-flare ghosting settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LensFlareParams {
    flare_texture: FlareTexture,
}

impl LensFlareParams {
    pub fn new(flare_texture: Arc<dyn Texture>) -> Self {
        Self { flare_texture: FlareTexture::new(flare_texture) }
    }

    pub fn flare_texture(&self) -> &Arc<dyn Texture> {
        self.flare_texture.texture()
    }

    fn total_cmp(&self, other: &Self) -> Ordering {
        self.flare_texture.address().cmp(&other.flare_texture.address())
    }
}

/// HDR tone mapping settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HdrParams {
    auto_expose: bool,
    exposure: f32,
    gamma: f32,
}

impl HdrParams {
    /// # Arguments
    ///
    /// * `auto_expose` - Adapt exposure to the average scene luminance
    /// * `exposure` - Manual exposure (bias when `auto_expose` is set)
    /// * `gamma` - Output gamma
    pub fn new(auto_expose: bool, exposure: f32, gamma: f32) -> Self {
        Self { auto_expose, exposure, gamma }
    }

    pub fn auto_expose(&self) -> bool {
        self.auto_expose
    }

    pub fn exposure(&self) -> f32 {
        self.exposure
    }

    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    fn total_cmp(&self, other: &Self) -> Ordering {
        self.auto_expose
            .cmp(&other.auto_expose)
            .then_with(|| cmp_f32_slices(&[self.exposure, self.gamma], &[other.exposure, other.gamma]))
    }
}

/// FXAA settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FxaaParams {
    quality: u32,
}

impl FxaaParams {
    /// Quality is capped at `MAX_FXAA_QUALITY`.
    pub fn new(quality: u32) -> Self {
        Self { quality: quality.min(MAX_FXAA_QUALITY) }
    }

    pub fn quality(&self) -> u32 {
        self.quality
    }
}

// ===== EFFECT REQUEST =====

/// One requested effect with its parameters
#[derive(Debug, Clone)]
pub enum EffectRequest {
    StaticMotionBlur(MotionBlurParams),
    Bloom(BloomParams),
    LightStreaker(LightStreakerParams),
    LensFlare(LensFlareParams),
    Hdr(HdrParams),
    Fxaa(FxaaParams),
}

impl EffectRequest {
    pub fn kind(&self) -> EffectKind {
        match self {
            EffectRequest::StaticMotionBlur(_) => EffectKind::MotionBlur,
            EffectRequest::Bloom(_) => EffectKind::Bloom,
            EffectRequest::LightStreaker(_) => EffectKind::LightStreaker,
            EffectRequest::LensFlare(_) => EffectKind::LensFlare,
            EffectRequest::Hdr(_) => EffectKind::Hdr,
            EffectRequest::Fxaa(_) => EffectKind::Fxaa,
        }
    }
}

impl Ord for EffectRequest {
    fn cmp(&self, other: &Self) -> Ordering {
        use EffectRequest::*;
        match (self, other) {
            (StaticMotionBlur(a), StaticMotionBlur(b)) => a.total_cmp(b),
            (Bloom(a), Bloom(b)) => a.total_cmp(b),
            (LightStreaker(a), LightStreaker(b)) => a.total_cmp(b),
            (LensFlare(a), LensFlare(b)) => a.total_cmp(b),
            (Hdr(a), Hdr(b)) => a.total_cmp(b),
            (Fxaa(a), Fxaa(b)) => a.cmp(b),
            _ => self.kind().cmp(&other.kind()),
        }
    }
}

impl PartialOrd for EffectRequest {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for EffectRequest {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EffectRequest {}

/// Lexicographic IEEE total order over two float sequences
fn cmp_f32_slices(a: &[f32], b: &[f32]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| x.total_cmp(y))
        .find(|o| o.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

#[cfg(test)]
#[path = "effect_request_tests.rs"]
mod tests;
