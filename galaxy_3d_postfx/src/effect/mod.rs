//! Effect requests module
//!
//! Typed per-effect parameters and the per-frame request set the
//! orchestrator diffs against the previous frame.

mod effect_request;
mod effect_request_set;

pub use effect_request::{
    BloomParams, EffectKind, EffectRequest, FlareTexture, FxaaParams, HdrParams,
    LensFlareParams, LightStreakerParams, MotionBlurParams, MAX_FXAA_QUALITY,
    MIN_BLOOM_INTENSITY, MIN_BLOOM_THRESHOLD,
};
pub use effect_request_set::{ActiveEffects, EffectRequestSet};
