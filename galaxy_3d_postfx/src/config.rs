/// Post-processing configuration

use crate::graphics_device::TextureFormat;

/// Configuration of a `PostProcessor`
#[derive(Debug, Clone, PartialEq)]
pub struct PostProcessConfig {
    /// Warn once the surface pool holds more surfaces than this (never evicts)
    pub surface_soft_limit: Option<usize>,
    /// Log graph rebuilds at INFO instead of DEBUG
    pub log_graph_rebuilds: bool,
    /// Check pass wiring after every rebuild
    pub validate_wiring: bool,
    /// Output format of tone mapping
    pub ldr_format: TextureFormat,
    /// Output format of the eye-adaptation pass
    pub luminance_format: TextureFormat,
}

impl Default for PostProcessConfig {
    fn default() -> Self {
        Self {
            surface_soft_limit: Some(64),
            log_graph_rebuilds: true,
            validate_wiring: cfg!(debug_assertions),
            ldr_format: TextureFormat::R8G8B8A8_UNORM,
            luminance_format: TextureFormat::R32_SFLOAT,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
