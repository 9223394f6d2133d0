/// Post-processor: the public facade of the effect chain.
///
/// Owns the surface pool, the program cache and the orchestrator, and
/// shares the graphics device with the rest of the engine. Every frame
/// the caller registers the effects it wants, then calls `render()`.

use std::sync::{Arc, Mutex};
use glam::Mat4;
use crate::config::PostProcessConfig;
use crate::effect::{
    ActiveEffects, BloomParams, EffectRequest, FxaaParams, HdrParams, LensFlareParams,
    LightStreakerParams, MotionBlurParams,
};
use crate::engine_bail;
use crate::error::Result;
use crate::graphics_device::{CommandList, GraphicsDevice, Texture};
use crate::pool::SurfacePool;
use crate::render_graph::{
    ExecutionContext, ExecutionEvent, ExecutionReport, FrameInput, FramePlan, Orchestrator,
    PassKind, ProgramCache,
};

const SOURCE: &str = "galaxy3d::postfx::PostProcessor";

pub struct PostProcessor {
    device: Arc<Mutex<dyn GraphicsDevice>>,
    config: PostProcessConfig,
    pool: SurfacePool,
    programs: ProgramCache,
    orchestrator: Orchestrator,
    last_report: ExecutionReport,
    shut_down: bool,
}

impl PostProcessor {
    pub fn new(device: Arc<Mutex<dyn GraphicsDevice>>, config: PostProcessConfig) -> Self {
        let pool = SurfacePool::with_soft_limit(config.surface_soft_limit);
        crate::engine_debug!(SOURCE, "Post-processor created (soft limit {:?})",
            config.surface_soft_limit);
        Self {
            device,
            config,
            pool,
            programs: ProgramCache::new(),
            orchestrator: Orchestrator::new(),
            last_report: ExecutionReport::default(),
            shut_down: false,
        }
    }

    // ===== PER-FRAME REGISTRATION =====

    /// Request bloom for the coming frame
    ///
    /// `threshold` is clamped to at least 0.25 and `intensity` to at least 0.01.
    pub fn add_bloom(&mut self, threshold: f32, exposure_scale: f32, intensity: f32) -> bool {
        self.request(EffectRequest::Bloom(BloomParams::new(threshold, exposure_scale, intensity)))
    }

    /// Request FXAA; `quality` is clamped to at most 6
    pub fn add_fxaa(&mut self, quality: u32) -> bool {
        self.request(EffectRequest::Fxaa(FxaaParams::new(quality)))
    }

    pub fn add_static_motion_blur(&mut self, prev_view_proj: Mat4, view_proj_inverse: Mat4) -> bool {
        self.request(EffectRequest::StaticMotionBlur(MotionBlurParams::new(
            prev_view_proj,
            view_proj_inverse,
        )))
    }

    pub fn add_lens_flare(&mut self, flare_texture: Arc<dyn Texture>) -> bool {
        self.request(EffectRequest::LensFlare(LensFlareParams::new(flare_texture)))
    }

    pub fn add_light_streaker(&mut self, lum_threshold: f32, start_level: u32) -> bool {
        self.request(EffectRequest::LightStreaker(LightStreakerParams::new(lum_threshold, start_level)))
    }

    pub fn add_hdr(&mut self, auto_expose: bool, exposure: f32, gamma: f32) -> bool {
        self.request(EffectRequest::Hdr(HdrParams::new(auto_expose, exposure, gamma)))
    }

    /// Add an already built request
    ///
    /// Returns false if an equal request is already pending. Requests are
    /// consumed by the next `render()`.
    pub fn request(&mut self, request: EffectRequest) -> bool {
        self.orchestrator.request(request)
    }

    // ===== FRAME =====

    /// Run the effect chain for one frame
    ///
    /// Rebuilds the graph if this frame's requests differ from the last
    /// frame's, then records every pass into `commands` and writes the
    /// final image to `frame.destination`. With no effects the scene is
    /// copied straight through.
    ///
    /// # Errors
    ///
    /// Fails after `shutdown()`, on a missing frame input, an invalid
    /// graph, or any device or command list failure.
    pub fn render(&mut self, frame: &FrameInput, commands: &mut dyn CommandList) -> Result<FramePlan> {
        self.run_frame(frame, commands, None)
    }

    /// Same as `render()`, also appending each execution step to `trace`
    pub fn render_traced(
        &mut self,
        frame: &FrameInput,
        commands: &mut dyn CommandList,
        trace: &mut Vec<ExecutionEvent>,
    ) -> Result<FramePlan> {
        self.run_frame(frame, commands, Some(trace))
    }

    fn run_frame(
        &mut self,
        frame: &FrameInput,
        commands: &mut dyn CommandList,
        trace: Option<&mut Vec<ExecutionEvent>>,
    ) -> Result<FramePlan> {
        if self.shut_down {
            self.orchestrator.discard_pending();
            engine_bail!(SOURCE, "render() called after shutdown");
        }

        let mut device = match self.device.lock() {
            Ok(device) => device,
            Err(_) => {
                self.orchestrator.discard_pending();
                engine_bail!(SOURCE, "Graphics device lock poisoned");
            }
        };

        let plan = self.orchestrator.prepare(&mut self.pool, &mut *device, &self.config)?;
        if plan == FramePlan::Rebuild {
            Self::retire_unused_programs(&mut self.programs, &self.orchestrator);
        }

        let (arena, ledger) = self.orchestrator.graph_mut();
        let mut ctx = ExecutionContext::new(
            &mut self.pool,
            &mut *device,
            &mut self.programs,
            commands,
            frame,
        );
        if let Some(trace) = trace {
            ctx = ctx.with_trace(trace);
        }

        if arena.is_empty() {
            ctx.render_to(frame.scene_color.as_ref())?;
        } else {
            ctx.execute(arena, ledger)?;
            ctx.finalize(arena, ledger)?;
        }

        self.last_report = ctx.report();
        Ok(plan)
    }

    /// Shut down the programs of kinds the new graph no longer uses
    fn retire_unused_programs(programs: &mut ProgramCache, orchestrator: &Orchestrator) {
        for kind in PassKind::ALL {
            if !orchestrator.arena().contains_kind(kind) {
                programs.shut_down_kind(kind);
            }
        }
    }

    // ===== ACCESSORS =====

    pub fn config(&self) -> &PostProcessConfig {
        &self.config
    }

    pub fn pool(&self) -> &SurfacePool {
        &self.pool
    }

    pub fn programs(&self) -> &ProgramCache {
        &self.programs
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// Counters of the last rendered frame
    pub fn last_report(&self) -> ExecutionReport {
        self.last_report
    }

    pub fn active_effects(&self) -> ActiveEffects {
        self.orchestrator.active_effects()
    }

    pub fn rebuild_count(&self) -> u64 {
        self.orchestrator.rebuild_count()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    // ===== SHUTDOWN =====

    /// Tear down the graph, every pooled surface and every program
    ///
    /// Idempotent. Also run on drop.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;

        if let Ok(device) = self.device.lock() {
            if let Err(e) = device.wait_idle() {
                crate::engine_warn!(SOURCE, "wait_idle failed during shutdown: {}", e);
            }
        }

        self.orchestrator.reset(&mut self.pool);
        self.programs.shut_down_all();
        self.pool.shutdown();
        crate::engine_info!(SOURCE, "Post-processor shut down");
    }
}

impl Drop for PostProcessor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
#[path = "post_processor_tests.rs"]
mod tests;
