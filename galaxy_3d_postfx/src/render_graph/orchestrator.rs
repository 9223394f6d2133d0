/// Effect graph orchestrator.
///
/// Collects this frame's effect requests, compares them with the set the
/// current graph was built for, and either keeps the graph untouched or
/// rebuilds it from scratch. The graph is never patched incrementally.

use crate::config::PostProcessConfig;
use crate::effect::{ActiveEffects, EffectRequest, EffectRequestSet};
use crate::error::Result;
use crate::graphics_device::GraphicsDevice;
use crate::pool::SurfacePool;
use super::dependency_ledger::DependencyLedger;
use super::graph_builder::build_graph;
use super::pass_arena::PassArena;

const SOURCE: &str = "galaxy3d::postfx::Orchestrator";

/// What `prepare()` decided for the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePlan {
    /// No effects now nor last frame: copy the scene straight through
    Idle,
    /// Same requests as the previous frame: the existing graph runs as is
    Reuse,
    /// Requests changed: the graph was rebuilt (possibly to empty)
    Rebuild,
}

pub struct Orchestrator {
    /// Requests collected for the coming frame
    pending: EffectRequestSet,
    /// Requests the current graph was built for
    previous: EffectRequestSet,
    arena: PassArena,
    ledger: DependencyLedger,
    active: ActiveEffects,
    rebuild_count: u64,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self {
            pending: EffectRequestSet::new(),
            previous: EffectRequestSet::new(),
            arena: PassArena::new(),
            ledger: DependencyLedger::new(),
            active: ActiveEffects::empty(),
            rebuild_count: 0,
        }
    }

    /// Add a request for the coming frame
    ///
    /// Returns false if an equal request was already pending.
    pub fn request(&mut self, request: EffectRequest) -> bool {
        self.pending.insert(request)
    }

    pub fn pending(&self) -> &EffectRequestSet {
        &self.pending
    }

    /// Requests the current graph was built for
    pub fn current(&self) -> &EffectRequestSet {
        &self.previous
    }

    pub fn active_effects(&self) -> ActiveEffects {
        self.active
    }

    pub fn rebuild_count(&self) -> u64 {
        self.rebuild_count
    }

    pub fn arena(&self) -> &PassArena {
        &self.arena
    }

    pub fn ledger(&self) -> &DependencyLedger {
        &self.ledger
    }

    /// Arena and ledger, for the execution context
    pub fn graph_mut(&mut self) -> (&mut PassArena, &mut DependencyLedger) {
        (&mut self.arena, &mut self.ledger)
    }

    /// Diff the pending requests against the current graph
    ///
    /// On change, waits for the device to go idle, tears the old graph
    /// down (outstanding outputs go back to `pool`), builds the new one and
    /// recomputes the dependency counts. The pending set is consumed either
    /// way, including when this returns an error.
    ///
    /// # Errors
    ///
    /// Propagates `wait_idle` failures, and wiring violations when
    /// `config.validate_wiring` is set. A failed `wait_idle` leaves the
    /// previous graph in place; a wiring violation empties it.
    pub fn prepare(
        &mut self,
        pool: &mut SurfacePool,
        device: &mut dyn GraphicsDevice,
        config: &PostProcessConfig,
    ) -> Result<FramePlan> {
        // Consumed even when the rebuild below fails
        let pending = std::mem::take(&mut self.pending);
        if pending == self.previous {
            return Ok(if self.arena.is_empty() { FramePlan::Idle } else { FramePlan::Reuse });
        }

        if !self.arena.is_empty() {
            device.wait_idle()?;
        }
        self.arena.clear(pool);
        self.ledger.clear();

        self.active = build_graph(&pending, &mut self.arena, config);
        self.ledger.rebuild(&self.arena);

        if config.validate_wiring {
            if let Err(err) = self.arena.validate_wiring() {
                self.reset(pool);
                return Err(err);
            }
        }

        self.previous = pending;
        self.rebuild_count += 1;

        if config.log_graph_rebuilds {
            crate::engine_info!(SOURCE, "Rebuilt effect graph ({:?}): {} pass(es)",
                self.active, self.arena.len());
        } else {
            crate::engine_debug!(SOURCE, "Rebuilt effect graph ({:?}): {} pass(es)",
                self.active, self.arena.len());
        }
        crate::engine_debug!(SOURCE, "Pass order: {:?}", self.arena.kinds());

        Ok(FramePlan::Rebuild)
    }

    /// Forget the requests collected for the coming frame
    pub fn discard_pending(&mut self) {
        self.pending.clear();
    }

    /// Drop the graph and every request
    ///
    /// The next frame with effects rebuilds.
    pub fn reset(&mut self, pool: &mut SurfacePool) {
        self.arena.clear(pool);
        self.ledger.clear();
        self.pending.clear();
        self.previous.clear();
        self.active = ActiveEffects::empty();
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
