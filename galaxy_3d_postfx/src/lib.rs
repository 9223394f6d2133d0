/*!
# Galaxy 3D Post-Processing

Post-processing effect chain for the Galaxy 3D rendering engine.

Every frame the caller registers the effects it wants (bloom, light streaks,
lens flare, HDR tone mapping with eye adaptation, FXAA, static motion blur).
The framework compares that set with the previous frame's, keeps the pass
graph when nothing changed and rebuilds it from scratch otherwise, then runs
the passes in order with intermediate surfaces borrowed from a pool and
handed back as soon as their last reader has run.

## Architecture

- **GraphicsDevice**: Backend contract (textures, programs, idle wait)
- **CommandList**: Per-frame command recording trait
- **SurfacePool**: Reusable intermediate surfaces keyed by descriptor
- **EffectRequestSet**: Ordered set of typed effect requests
- **PassNode**: One rendering step of the graph
- **Orchestrator**: Reuse-or-rebuild decision and graph ownership
- **ExecutionContext**: Runs a frame, refcounting intermediate surfaces
- **PostProcessor**: Public facade tying the above together

Backend implementations provide concrete types that implement the device traits.
*/

// Internal modules
mod error;
mod engine;
mod config;
mod post_processor;
pub mod log;
pub mod graphics_device;
pub mod pool;
pub mod effect;
pub mod render_graph;
pub mod passes;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: engine_* macros are NOT re-exported here - they are internal only
    }

    // Render sub-module with the backend contract
    pub mod render {
        pub use crate::graphics_device::*;
    }

    // Post-processing sub-module
    pub mod postfx {
        pub use crate::config::PostProcessConfig;
        pub use crate::post_processor::PostProcessor;
        pub use crate::effect::{
            ActiveEffects, BloomParams, EffectKind, EffectRequest, EffectRequestSet, FxaaParams,
            HdrParams, LensFlareParams, LightStreakerParams, MotionBlurParams,
        };
        pub use crate::pool::{PoolStats, PooledSurface, SurfaceDescriptor, SurfaceKey, SurfacePool};
        pub use crate::render_graph::{
            ExecutionEvent, ExecutionReport, FrameInput, FramePlan, InputBinding, PassId, PassKind,
            PassNode,
        };
    }
}

// Re-export math library at crate root
pub use glam;
