/// Dependency ledger: per-pass consumer counts.
///
/// The fixed count of a pass is the number of input bindings, in later
/// passes, that read one of its outputs. The terminal pass gets at least
/// one more for the caller reading the final image. Remaining counts are
/// reset from the fixed counts every frame and only ever decrease.

use super::pass::PassId;
use super::pass_arena::PassArena;

#[derive(Debug, Default)]
pub struct DependencyLedger {
    fixed: Vec<u32>,
    remaining: Vec<u32>,
}

impl DependencyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute every fixed count from the arena's wiring
    ///
    /// Single backward scan over the list.
    pub fn rebuild(&mut self, arena: &PassArena) {
        self.fixed.clear();
        self.fixed.resize(arena.len(), 0);

        for id in arena.ids().rev() {
            let Some(descriptor) = arena.descriptor(id) else {
                continue;
            };
            for binding in descriptor.internal_inputs() {
                if let Some(count) = self.fixed.get_mut(binding.producer.index()) {
                    *count += 1;
                }
            }
        }

        // Implicit consumer of the final image
        if let Some(terminal) = self.fixed.last_mut() {
            *terminal = (*terminal).max(1);
        }

        self.remaining.clone_from(&self.fixed);
    }

    /// Reset remaining counts for a new frame
    pub fn begin_frame(&mut self) {
        self.remaining.clone_from(&self.fixed);
    }

    pub fn len(&self) -> usize {
        self.fixed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixed.is_empty()
    }

    pub fn fixed_count(&self, id: PassId) -> u32 {
        self.fixed.get(id.index()).copied().unwrap_or(0)
    }

    pub fn remaining_count(&self, id: PassId) -> u32 {
        self.remaining.get(id.index()).copied().unwrap_or(0)
    }

    /// Sum of all fixed counts
    pub fn total_fixed(&self) -> u64 {
        self.fixed.iter().map(|&c| c as u64).sum()
    }

    /// Record that one consumer of `id` has finished
    ///
    /// Calls `on_zero` exactly once, when the remaining count reaches zero.
    /// Returns true in that case.
    pub fn consume(&mut self, id: PassId, on_zero: impl FnOnce(PassId)) -> bool {
        let Some(count) = self.remaining.get_mut(id.index()) else {
            debug_assert!(false, "pass {} is not in the ledger", id);
            return false;
        };
        debug_assert!(*count > 0, "pass {} consumed more often than it is read", id);
        if *count == 0 {
            return false;
        }

        *count -= 1;
        if *count == 0 {
            on_zero(id);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.fixed.clear();
        self.remaining.clear();
    }
}

#[cfg(test)]
#[path = "dependency_ledger_tests.rs"]
mod tests;
