/// Per-kind shared program state.
///
/// All passes of one kind share a single program. Programs are created on
/// first use and live until their kind is shut down.

use std::sync::Arc;
use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::graphics_device::{GraphicsDevice, Program, ProgramDesc};
use super::pass_node::PassKind;

const SOURCE: &str = "galaxy3d::postfx::ProgramCache";

pub struct ProgramCache {
    programs: FxHashMap<PassKind, Arc<dyn Program>>,
}

impl ProgramCache {
    pub fn new() -> Self {
        Self {
            programs: FxHashMap::default(),
        }
    }

    /// Get the program of `kind`, creating it from `desc` on first use
    ///
    /// # Errors
    ///
    /// Propagates program creation failures from the device.
    pub fn get_or_create(
        &mut self,
        kind: PassKind,
        desc: &ProgramDesc,
        device: &mut dyn GraphicsDevice,
    ) -> Result<Arc<dyn Program>> {
        if let Some(program) = self.programs.get(&kind) {
            return Ok(Arc::clone(program));
        }

        let program = device.create_program(desc)?;
        crate::engine_debug!(SOURCE, "Created program '{}' for {} passes", desc.name, kind.name());
        self.programs.insert(kind, Arc::clone(&program));
        Ok(program)
    }

    pub fn contains(&self, kind: PassKind) -> bool {
        self.programs.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Tear down the shared state of one pass kind
    ///
    /// Returns true if the kind had a program. The next pass of that kind
    /// recreates it.
    pub fn shut_down_kind(&mut self, kind: PassKind) -> bool {
        let removed = self.programs.remove(&kind).is_some();
        if removed {
            crate::engine_debug!(SOURCE, "Shut down {} program", kind.name());
        }
        removed
    }

    /// Tear down every kind
    pub fn shut_down_all(&mut self) {
        for kind in PassKind::ALL {
            self.shut_down_kind(kind);
        }
    }
}

impl Default for ProgramCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "program_cache_tests.rs"]
mod tests;
