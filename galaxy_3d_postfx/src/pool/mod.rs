//! Transient surface pool module
//!
//! Provides the descriptor type identifying interchangeable surfaces and
//! the pool lending them to passes.

mod surface_descriptor;
mod surface_pool;

pub use surface_descriptor::SurfaceDescriptor;
pub use surface_pool::{PoolStats, PooledSurface, SurfaceKey, SurfacePool};
