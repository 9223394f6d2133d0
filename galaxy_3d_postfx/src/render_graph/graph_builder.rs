/// Builds the ordered pass list for a request set.
///
/// Effects are wired in a fixed order, each stage reading the previous
/// stage's output:
///
/// 1. Motion blur (scene color + depth)
/// 2. Bloom: bright pass, blur, composite
/// 3. Light streaks, lens flare and eye adaptation, all reading the image
///    as it leaves stage 2; streaks and ghosts are composited back in turn
/// 4. Tone mapping (reads the luminance when eye adaptation is on)
/// 5. FXAA
///
/// Every node only binds nodes pushed before it, so the list is always in
/// a valid execution order.

use crate::config::PostProcessConfig;
use crate::effect::{ActiveEffects, EffectKind, EffectRequestSet};
use crate::passes::{
    BlurPass, BrightPass, CompositePass, FxaaPass, LensFlarePass, LightStreakPass, LuminancePass,
    MotionBlurPass, ToneMapPass,
};
use super::pass::{ExternalInput, InputBinding, PassId};
use super::pass_arena::PassArena;
use super::pass_node::PassNode;

const SOURCE: &str = "galaxy3d::postfx::GraphBuilder";

/// Weight of light streaks and lens-flare ghosts when composited
const OVERLAY_INTENSITY: f32 = 1.0;

/// Fill an empty `arena` with the passes `requests` needs
///
/// When a kind is requested more than once, the first request in set
/// order drives the graph and the others are ignored.
///
/// Returns the effects that were wired in.
pub fn build_graph(requests: &EffectRequestSet, arena: &mut PassArena, config: &PostProcessConfig) -> ActiveEffects {
    debug_assert!(arena.is_empty(), "graph built into a non-empty arena");

    for kind in EffectKind::ALL {
        let count = requests.count_of(kind);
        if count > 1 {
            crate::engine_warn!(SOURCE,
                "{} {} requests this frame; only the first is used", count, kind.name());
        }
    }

    let mut color = InputBinding::external(ExternalInput::SceneColor);

    if let Some(params) = requests.motion_blur() {
        let depth = InputBinding::external(ExternalInput::SceneDepth);
        color = add(arena, |id| MotionBlurPass::new(id, color, depth, None, *params));
    }

    if let Some(params) = requests.bloom() {
        let bright = add(arena, |id| BrightPass::new(id, color, None, params));
        let blurred = add(arena, |id| BlurPass::new(id, bright, None));
        color = add(arena, |id| CompositePass::new(id, color, blurred, None, params.intensity()));
    }

    let stage_input = color;

    if let Some(params) = requests.light_streaker() {
        let streaks = add(arena, |id| LightStreakPass::new(id, stage_input, None, *params));
        color = add(arena, |id| CompositePass::new(id, color, streaks, None, OVERLAY_INTENSITY));
    }

    if let Some(params) = requests.lens_flare() {
        let ghosts = add(arena, |id| LensFlarePass::new(id, stage_input, None, params));
        color = add(arena, |id| CompositePass::new(id, color, ghosts, None, OVERLAY_INTENSITY));
    }

    let hdr = requests.hdr();
    let luminance = match hdr {
        Some(params) if params.auto_expose() => {
            Some(add(arena, |id| LuminancePass::new(id, stage_input, None, config.luminance_format)))
        }
        _ => None,
    };

    if let Some(params) = hdr {
        color = add(arena, |id| ToneMapPass::new(id, color, luminance, None, *params, config.ldr_format));
    }

    if let Some(params) = requests.fxaa() {
        add(arena, |id| FxaaPass::new(id, color, None, *params));
    }

    requests.active_effects()
}

/// Push the node built by `make` and return a binding to its first output
fn add<N: PassNode + 'static>(arena: &mut PassArena, make: impl FnOnce(PassId) -> N) -> InputBinding {
    let id = arena.next_pass_id();
    arena.push(Box::new(make(id)));
    InputBinding::output_of(id, 0)
}

#[cfg(test)]
#[path = "graph_builder_tests.rs"]
mod tests;
