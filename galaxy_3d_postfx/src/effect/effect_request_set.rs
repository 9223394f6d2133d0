/// Set of effects requested for one frame.

use std::collections::BTreeSet;
use bitflags::bitflags;
use super::effect_request::{
    BloomParams, EffectKind, EffectRequest, FxaaParams, HdrParams, LensFlareParams,
    LightStreakerParams, MotionBlurParams,
};

bitflags! {
    /// Shape of the pass graph implied by a request set
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ActiveEffects: u32 {
        const MOTION_BLUR    = 1 << 0;
        const BLOOM          = 1 << 1;
        const LIGHT_STREAKER = 1 << 2;
        const LENS_FLARE     = 1 << 3;
        const HDR            = 1 << 4;
        /// HDR tone mapping driven by the eye-adaptation pass
        const AUTO_EXPOSURE  = 1 << 5;
        const FXAA           = 1 << 6;
    }
}

impl ActiveEffects {
    /// Flag for one effect kind
    pub fn from_kind(kind: EffectKind) -> Self {
        match kind {
            EffectKind::MotionBlur => ActiveEffects::MOTION_BLUR,
            EffectKind::Bloom => ActiveEffects::BLOOM,
            EffectKind::LightStreaker => ActiveEffects::LIGHT_STREAKER,
            EffectKind::LensFlare => ActiveEffects::LENS_FLARE,
            EffectKind::Hdr => ActiveEffects::HDR,
            EffectKind::Fxaa => ActiveEffects::FXAA,
        }
    }
}

/// Ordered collection of effect requests with set semantics
///
/// Iteration order is the request order (kind, then parameters), never the
/// order in which requests were inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectRequestSet {
    requests: BTreeSet<EffectRequest>,
}

impl EffectRequestSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a request
    ///
    /// Returns false when an equal request was already present.
    pub fn insert(&mut self, request: EffectRequest) -> bool {
        self.requests.insert(request)
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EffectRequest> + '_ {
        self.requests.iter()
    }

    pub fn clear(&mut self) {
        self.requests.clear();
    }

    /// Whether at least one request of `kind` is present
    pub fn contains_kind(&self, kind: EffectKind) -> bool {
        self.first_of(kind).is_some()
    }

    /// First request of `kind` in set order
    pub fn first_of(&self, kind: EffectKind) -> Option<&EffectRequest> {
        self.requests.iter().find(|r| r.kind() == kind)
    }

    /// Number of requests of `kind`
    pub fn count_of(&self, kind: EffectKind) -> usize {
        self.requests.iter().filter(|r| r.kind() == kind).count()
    }

    pub fn motion_blur(&self) -> Option<&MotionBlurParams> {
        match self.first_of(EffectKind::MotionBlur) {
            Some(EffectRequest::StaticMotionBlur(params)) => Some(params),
            _ => None,
        }
    }

    pub fn bloom(&self) -> Option<&BloomParams> {
        match self.first_of(EffectKind::Bloom) {
            Some(EffectRequest::Bloom(params)) => Some(params),
            _ => None,
        }
    }

    pub fn light_streaker(&self) -> Option<&LightStreakerParams> {
        match self.first_of(EffectKind::LightStreaker) {
            Some(EffectRequest::LightStreaker(params)) => Some(params),
            _ => None,
        }
    }

    pub fn lens_flare(&self) -> Option<&LensFlareParams> {
        match self.first_of(EffectKind::LensFlare) {
            Some(EffectRequest::LensFlare(params)) => Some(params),
            _ => None,
        }
    }

    pub fn hdr(&self) -> Option<&HdrParams> {
        match self.first_of(EffectKind::Hdr) {
            Some(EffectRequest::Hdr(params)) => Some(params),
            _ => None,
        }
    }

    pub fn fxaa(&self) -> Option<&FxaaParams> {
        match self.first_of(EffectKind::Fxaa) {
            Some(EffectRequest::Fxaa(params)) => Some(params),
            _ => None,
        }
    }

    /// Effects that will be wired into the graph
    ///
    /// `AUTO_EXPOSURE` is set only when the HDR request that drives the
    /// graph asks for it.
    pub fn active_effects(&self) -> ActiveEffects {
        let mut active = self
            .requests
            .iter()
            .fold(ActiveEffects::empty(), |acc, r| acc | ActiveEffects::from_kind(r.kind()));
        if self.hdr().is_some_and(HdrParams::auto_expose) {
            active |= ActiveEffects::AUTO_EXPOSURE;
        }
        active
    }
}

impl FromIterator<EffectRequest> for EffectRequestSet {
    fn from_iter<I: IntoIterator<Item = EffectRequest>>(iter: I) -> Self {
        Self { requests: iter.into_iter().collect() }
    }
}

#[cfg(test)]
#[path = "effect_request_set_tests.rs"]
mod tests;
