//! Render graph module
//!
//! The pass graph of the post-processing chain: wiring types, the pass
//! node contract, the arena holding the ordered pass list, the dependency
//! ledger, the per-frame execution context and the orchestrator deciding
//! between reuse and rebuild.

mod pass;
mod pass_node;
mod program_cache;
mod pass_arena;
mod dependency_ledger;
mod execution_context;
mod graph_builder;
mod orchestrator;

#[cfg(test)]
pub(crate) mod test_utils;

pub use pass::{ExternalInput, InputBinding, PassDescriptor, PassId, MAX_PASS_INPUTS, MAX_PASS_OUTPUTS};
pub use pass_node::{PassContext, PassKind, PassNode};
pub use program_cache::ProgramCache;
pub use pass_arena::{PassArena, RuntimePassState};
pub use dependency_ledger::DependencyLedger;
pub use execution_context::{ExecutionContext, ExecutionEvent, ExecutionReport, FrameInput};
pub use graph_builder::build_graph;
pub use orchestrator::{FramePlan, Orchestrator};
