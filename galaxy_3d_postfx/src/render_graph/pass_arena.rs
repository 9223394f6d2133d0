/// Pass arena: the ordered pass list of one graph instance.
///
/// Nodes are stored by `PassId` (their position in the list) together with
/// their per-frame runtime state. The arena is cleared and refilled
/// wholesale on every rebuild; nodes are never removed individually.

use crate::error::{Error, Result};
use crate::pool::{PooledSurface, SurfacePool};
use super::pass::{ExternalInput, PassDescriptor, PassId, MAX_PASS_OUTPUTS};
use super::pass_node::{PassKind, PassNode};

const SOURCE: &str = "galaxy3d::postfx::PassArena";

/// Per-frame state of one pass
#[derive(Debug, Default)]
pub struct RuntimePassState {
    /// Set once the pass has run this frame
    pub processed: bool,
    /// Surfaces bound to the output slots, on loan from the pool
    pub outputs: [Option<PooledSurface>; MAX_PASS_OUTPUTS],
}

impl RuntimePassState {
    fn has_outputs(&self) -> bool {
        self.outputs.iter().any(Option::is_some)
    }
}

struct PassSlot {
    node: Box<dyn PassNode>,
    state: RuntimePassState,
}

/// Ordered, `PassId`-indexed store of pass nodes
pub struct PassArena {
    slots: Vec<PassSlot>,
    generation: u64,
}

impl PassArena {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            generation: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Id the next pushed node must carry
    pub fn next_pass_id(&self) -> PassId {
        PassId::from_index(self.slots.len())
    }

    /// Append a node at the end of the list
    ///
    /// The node must carry `next_pass_id()` and may only bind outputs of
    /// nodes already in the arena.
    pub fn push(&mut self, node: Box<dyn PassNode>) -> PassId {
        let id = self.next_pass_id();
        debug_assert_eq!(node.pass_id(), id, "{} pushed at the wrong position", node.label());
        debug_assert!(
            node.pass_descriptor()
                .internal_inputs()
                .all(|b| b.producer < id),
            "{} binds a pass that is not earlier in the list",
            node.label()
        );
        self.append(node)
    }

    /// Append without the ordering assertions, to build broken lists
    #[cfg(test)]
    pub(crate) fn push_unchecked(&mut self, node: Box<dyn PassNode>) -> PassId {
        self.append(node)
    }

    fn append(&mut self, node: Box<dyn PassNode>) -> PassId {
        let id = self.next_pass_id();
        self.slots.push(PassSlot {
            node,
            state: RuntimePassState::default(),
        });
        id
    }

    /// Ids of every pass, in execution order
    pub fn ids(&self) -> impl DoubleEndedIterator<Item = PassId> {
        (0..self.slots.len()).map(PassId::from_index)
    }

    pub fn node(&self, id: PassId) -> Option<&dyn PassNode> {
        self.slots.get(id.index()).map(|s| s.node.as_ref())
    }

    pub fn node_mut(&mut self, id: PassId) -> Option<&mut (dyn PassNode + 'static)> {
        self.slots.get_mut(id.index()).map(|s| s.node.as_mut())
    }

    pub fn descriptor(&self, id: PassId) -> Option<&PassDescriptor> {
        self.node(id).map(|n| n.pass_descriptor())
    }

    pub fn state(&self, id: PassId) -> Option<&RuntimePassState> {
        self.slots.get(id.index()).map(|s| &s.state)
    }

    /// Kinds of the passes, in execution order
    pub fn kinds(&self) -> Vec<PassKind> {
        self.slots.iter().map(|s| s.node.kind()).collect()
    }

    pub fn contains_kind(&self, kind: PassKind) -> bool {
        self.slots.iter().any(|s| s.node.kind() == kind)
    }

    /// Last pass of the list, whose output goes to the caller
    pub fn terminal(&self) -> Option<PassId> {
        self.slots.len().checked_sub(1).map(PassId::from_index)
    }

    /// Bumped every time the arena is cleared
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_processed(&self, id: PassId) -> bool {
        self.state(id).is_some_and(|s| s.processed)
    }

    pub fn mark_processed(&mut self, id: PassId) {
        if let Some(slot) = self.slots.get_mut(id.index()) {
            slot.state.processed = true;
        }
    }

    /// Surface bound to output `slot` of pass `id`, if still on loan
    pub fn output(&self, id: PassId, slot: usize) -> Option<&PooledSurface> {
        self.state(id)?.outputs.get(slot)?.as_ref()
    }

    /// Bind a pool surface to output `slot` of pass `id`
    pub fn bind_output(&mut self, id: PassId, slot: usize, surface: PooledSurface) {
        let Some(target) = self
            .slots
            .get_mut(id.index())
            .and_then(|s| s.state.outputs.get_mut(slot))
        else {
            debug_assert!(false, "no output slot {} on pass {}", slot, id);
            return;
        };
        debug_assert!(target.is_none(), "output {} of pass {} bound twice", slot, id);
        *target = Some(surface);
    }

    /// Return every output surface of pass `id` to the pool
    ///
    /// Returns the number of surfaces handed back.
    pub fn release_resource(&mut self, id: PassId, pool: &mut SurfacePool) -> usize {
        let Some(slot) = self.slots.get_mut(id.index()) else {
            return 0;
        };
        let mut released = 0;
        for output in slot.state.outputs.iter_mut() {
            if let Some(surface) = output.take() {
                pool.free_unused_resource(surface);
                released += 1;
            }
        }
        released
    }

    /// Reset per-frame state before executing the list
    ///
    /// Outputs still on loan (left by an aborted frame) go back to the pool.
    pub fn begin_frame(&mut self, pool: &mut SurfacePool) {
        let mut reclaimed = 0;
        for index in 0..self.slots.len() {
            if self.slots[index].state.has_outputs() {
                reclaimed += self.release_resource(PassId::from_index(index), pool);
            }
            self.slots[index].state.processed = false;
        }
        if reclaimed > 0 {
            crate::engine_warn!(SOURCE,
                "Reclaimed {} surface(s) left on loan by an unfinished frame", reclaimed);
        }
    }

    /// Destroy every node, returning outstanding outputs to the pool
    pub fn clear(&mut self, pool: &mut SurfacePool) {
        for index in 0..self.slots.len() {
            self.release_resource(PassId::from_index(index), pool);
        }
        self.slots.clear();
        self.generation += 1;
    }

    /// Check that every binding names an earlier pass and an existing slot
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidGraph` describing the first violation.
    pub fn validate_wiring(&self) -> Result<()> {
        for (index, slot) in self.slots.iter().enumerate() {
            let node = slot.node.as_ref();
            let descriptor = node.pass_descriptor();
            if descriptor.pass_id().index() != index {
                return Err(invalid_graph(format!(
                    "{} sits at position {}", node.label(), index)));
            }

            for (input, binding) in descriptor.inputs().iter().enumerate() {
                if binding.is_external() {
                    if ExternalInput::from_slot(binding.output_slot).is_none() {
                        return Err(invalid_graph(format!(
                            "{} input {} names unknown external input {}",
                            node.label(), input, binding.output_slot)));
                    }
                    continue;
                }

                let producer = binding.producer.index();
                if producer >= index {
                    return Err(invalid_graph(format!(
                        "{} input {} reads pass {} which does not run earlier",
                        node.label(), input, binding.producer)));
                }
                let available = self.slots[producer].node.pass_descriptor().output_count();
                if binding.output_slot as usize >= available {
                    return Err(invalid_graph(format!(
                        "{} input {} reads output {} of pass {} which has {} output(s)",
                        node.label(), input, binding.output_slot, binding.producer, available)));
                }
            }
        }
        Ok(())
    }
}

impl Default for PassArena {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid_graph(message: String) -> Error {
    crate::engine_error!(SOURCE, "Invalid wiring: {}", message);
    Error::InvalidGraph(message)
}

#[cfg(test)]
#[path = "pass_arena_tests.rs"]
mod tests;
