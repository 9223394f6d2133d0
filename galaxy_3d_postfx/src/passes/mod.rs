//! Effect passes
//!
//! Concrete `PassNode`s for every effect, one full-screen program per
//! pass kind. Push constant blocks are `#[repr(C)]` and padded to 16 bytes.

mod output_size;
mod motion_blur_pass;
mod bright_pass;
mod blur_pass;
mod composite_pass;
mod light_streak_pass;
mod lens_flare_pass;
mod luminance_pass;
mod tone_map_pass;
mod fxaa_pass;

pub use output_size::OutputSize;
pub use motion_blur_pass::{MotionBlurConstants, MotionBlurPass, MOTION_BLUR_PROGRAM};
pub use bright_pass::{BrightPass, BrightPassConstants, BRIGHT_PASS_PROGRAM};
pub use blur_pass::{BlurConstants, BlurPass, BLUR_PROGRAM};
pub use composite_pass::{CompositeConstants, CompositePass, COMPOSITE_PROGRAM};
pub use light_streak_pass::{LightStreakConstants, LightStreakPass, LIGHT_STREAK_PROGRAM};
pub use lens_flare_pass::{LensFlarePass, LENS_FLARE_PROGRAM};
pub use luminance_pass::{LuminancePass, LUMINANCE_PROGRAM};
pub use tone_map_pass::{ToneMapConstants, ToneMapPass, TONE_MAP_PROGRAM};
pub use fxaa_pass::{FxaaConstants, FxaaPass, FXAA_PROGRAM};

#[cfg(test)]
#[path = "passes_tests.rs"]
mod tests;
