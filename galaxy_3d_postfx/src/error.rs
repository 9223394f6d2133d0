//! Error types for the Galaxy3D post-processing framework
//!
//! This module defines the error types used throughout the framework,
//! including GPU backend failures, resource problems and invalid pass wiring.

use std::fmt;

/// Result type for post-processing operations
pub type Result<T> = std::result::Result<T, Error>;

/// Post-processing errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (Vulkan, DirectX, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (texture, program, missing frame input, etc.)
    InvalidResource(String),

    /// Initialization failed (engine, post processor, subsystems)
    InitializationFailed(String),

    /// A pass graph violates its wiring rules (forward reference, bad output slot)
    InvalidGraph(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidGraph(msg) => write!(f, "Invalid pass graph: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
