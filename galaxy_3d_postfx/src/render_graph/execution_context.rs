/// Execution context: runs one frame of the pass list.
///
/// Walks the arena in list order, resolves inputs, borrows output surfaces
/// from the pool, lets each node record its work, and hands surfaces back
/// as soon as their last reader has run.

use std::sync::Arc;
use crate::error::{Error, Result};
use crate::graphics_device::{CommandList, GraphicsDevice, Rect2D, Texture};
use crate::pool::{SurfaceDescriptor, SurfacePool};
use super::dependency_ledger::DependencyLedger;
use super::pass::{ExternalInput, InputBinding, PassId};
use super::pass_arena::PassArena;
use super::pass_node::PassContext;
use super::program_cache::ProgramCache;

const SOURCE: &str = "galaxy3d::postfx::ExecutionContext";

// ===== FRAME INPUT =====

/// Caller-owned surfaces of one frame
#[derive(Clone)]
pub struct FrameInput {
    /// Rendered scene image
    pub scene_color: Arc<dyn Texture>,
    /// Scene depth, needed by motion blur
    pub scene_depth: Option<Arc<dyn Texture>>,
    /// Surface receiving the final image
    pub destination: Arc<dyn Texture>,
    /// Area of `destination` to write
    pub viewport: Rect2D,
}

impl FrameInput {
    /// Frame writing the whole destination, without depth
    pub fn new(scene_color: Arc<dyn Texture>, destination: Arc<dyn Texture>) -> Self {
        let info = destination.info();
        let viewport = Rect2D::from_size(info.width, info.height);
        Self {
            scene_color,
            scene_depth: None,
            destination,
            viewport,
        }
    }

    pub fn with_depth(mut self, scene_depth: Arc<dyn Texture>) -> Self {
        self.scene_depth = Some(scene_depth);
        self
    }

    pub fn with_viewport(mut self, viewport: Rect2D) -> Self {
        self.viewport = viewport;
        self
    }
}

// ===== EXECUTION EVENTS =====

/// Observable step of a frame, in the order it happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionEvent {
    /// The pass recorded its work
    Processed(PassId),
    /// The pass's outputs went back to the pool
    Released(PassId),
    /// The pass's output was copied to the destination
    Finalized(PassId),
}

/// Counters of one executed frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    pub passes_executed: usize,
    pub releases: usize,
}

// ===== EXECUTION CONTEXT =====

pub struct ExecutionContext<'a> {
    pool: &'a mut SurfacePool,
    device: &'a mut dyn GraphicsDevice,
    programs: &'a mut ProgramCache,
    commands: &'a mut dyn CommandList,
    frame: &'a FrameInput,
    trace: Option<&'a mut Vec<ExecutionEvent>>,
    report: ExecutionReport,
}

impl<'a> ExecutionContext<'a> {
    pub fn new(
        pool: &'a mut SurfacePool,
        device: &'a mut dyn GraphicsDevice,
        programs: &'a mut ProgramCache,
        commands: &'a mut dyn CommandList,
        frame: &'a FrameInput,
    ) -> Self {
        Self {
            pool,
            device,
            programs,
            commands,
            frame,
            trace: None,
            report: ExecutionReport::default(),
        }
    }

    /// Record every processed/released/finalized event into `trace`
    pub fn with_trace(mut self, trace: &'a mut Vec<ExecutionEvent>) -> Self {
        self.trace = Some(trace);
        self
    }

    pub fn report(&self) -> ExecutionReport {
        self.report
    }

    /// Run every pass of `arena` once, in list order
    ///
    /// The terminal pass's output stays on loan; call `finalize()` next.
    ///
    /// # Errors
    ///
    /// Fails on a missing frame input, a wiring violation, or any device
    /// or command list failure. Surfaces still on loan are reclaimed at
    /// the start of the next frame.
    pub fn execute(&mut self, arena: &mut PassArena, ledger: &mut DependencyLedger) -> Result<()> {
        debug_assert_eq!(arena.len(), ledger.len(), "ledger out of date");

        arena.begin_frame(self.pool);
        ledger.begin_frame();

        for index in 0..arena.len() {
            self.run_pass(PassId::from_index(index), arena, ledger)?;
        }
        Ok(())
    }

    fn run_pass(&mut self, id: PassId, arena: &mut PassArena, ledger: &mut DependencyLedger) -> Result<()> {
        let descriptor = match arena.descriptor(id) {
            Some(descriptor) => *descriptor,
            None => return Err(Error::InvalidGraph(format!("pass {} is not in the arena", id))),
        };

        // Inputs
        let mut inputs = Vec::with_capacity(descriptor.input_count());
        let mut input_descriptors = Vec::with_capacity(descriptor.input_count());
        for binding in descriptor.inputs() {
            let texture = self.resolve_input(id, binding, arena)?;
            input_descriptors.push(SurfaceDescriptor::from_texture_info(texture.info()));
            inputs.push(texture);
        }

        // Outputs
        let output_descriptors: Vec<SurfaceDescriptor> = match arena.node(id) {
            Some(node) => (0..descriptor.output_count())
                .map(|slot| node.compute_output_descriptor(slot, &input_descriptors))
                .collect(),
            None => Vec::new(),
        };
        let mut outputs = Vec::with_capacity(output_descriptors.len());
        for (slot, output_descriptor) in output_descriptors.iter().enumerate() {
            let surface = self.pool.find_free_element(output_descriptor, &mut *self.device)?;
            outputs.push(Arc::clone(surface.texture()));
            arena.bind_output(id, slot, surface);
        }

        // Work
        if let Some(node) = arena.node_mut(id) {
            let mut ctx = PassContext::new(
                id,
                &inputs,
                &outputs,
                &mut *self.commands,
                &mut *self.programs,
                &mut *self.device,
            );
            node.process(&mut ctx)?;
            crate::engine_trace!(SOURCE, "Processed {}", node.label());
        }
        arena.mark_processed(id);
        self.report.passes_executed += 1;
        self.record(ExecutionEvent::Processed(id));

        // Producers this pass has finished reading
        for binding in descriptor.internal_inputs() {
            ledger.consume(binding.producer, |producer| self.release(producer, arena));
        }

        // Output nobody reads
        if ledger.fixed_count(id) == 0 {
            self.release(id, arena);
        }
        Ok(())
    }

    fn resolve_input(&self, consumer: PassId, binding: &InputBinding, arena: &PassArena) -> Result<Arc<dyn Texture>> {
        if binding.is_external() {
            return match ExternalInput::from_slot(binding.output_slot) {
                Some(ExternalInput::SceneColor) => Ok(Arc::clone(&self.frame.scene_color)),
                Some(ExternalInput::SceneDepth) => match &self.frame.scene_depth {
                    Some(depth) => Ok(Arc::clone(depth)),
                    None => {
                        crate::engine_error!(SOURCE, "Pass {} needs scene depth but the frame has none", consumer);
                        Err(Error::InvalidResource(format!(
                            "pass {} reads scene depth but no depth surface was provided", consumer)))
                    }
                },
                None => Err(Error::InvalidGraph(format!(
                    "pass {} reads unknown external input {}", consumer, binding.output_slot))),
            };
        }

        if !arena.is_processed(binding.producer) {
            debug_assert!(false, "pass {} reads pass {} before it ran", consumer, binding.producer);
            return Err(Error::InvalidGraph(format!(
                "pass {} reads pass {} before it ran", consumer, binding.producer)));
        }

        match arena.output(binding.producer, binding.output_slot as usize) {
            Some(surface) => Ok(Arc::clone(surface.texture())),
            None => Err(Error::InvalidGraph(format!(
                "pass {} reads output {} of pass {} which is not bound",
                consumer, binding.output_slot, binding.producer))),
        }
    }

    fn release(&mut self, id: PassId, arena: &mut PassArena) {
        let count = arena.release_resource(id, self.pool);
        self.report.releases += 1;
        self.record(ExecutionEvent::Released(id));
        crate::engine_trace!(SOURCE, "Released {} surface(s) of pass {}", count, id);
    }

    fn record(&mut self, event: ExecutionEvent) {
        if let Some(trace) = self.trace.as_deref_mut() {
            trace.push(event);
        }
    }

    /// Copy the terminal output to the destination and release it
    ///
    /// On an empty arena the scene color is copied instead.
    pub fn finalize(&mut self, arena: &mut PassArena, ledger: &mut DependencyLedger) -> Result<()> {
        let Some(terminal) = arena.terminal() else {
            let scene_color = Arc::clone(&self.frame.scene_color);
            return self.render_to(scene_color.as_ref());
        };

        let texture = match arena.output(terminal, 0) {
            Some(surface) => Arc::clone(surface.texture()),
            None => return Err(Error::InvalidGraph(format!(
                "terminal pass {} has no output to present", terminal))),
        };
        self.render_to(texture.as_ref())?;
        self.record(ExecutionEvent::Finalized(terminal));

        ledger.consume(terminal, |id| self.release(id, arena));
        Ok(())
    }

    /// Copy `source` into the frame destination without touching counts
    pub fn render_to(&mut self, source: &dyn Texture) -> Result<()> {
        self.commands.blit(source, self.frame.destination.as_ref(), self.frame.viewport)
    }
}

#[cfg(test)]
#[path = "execution_context_tests.rs"]
mod tests;
