/// Tests for PostProcessConfig

use super::*;

#[test]
fn test_default_config() {
    let config = PostProcessConfig::default();
    assert_eq!(config.surface_soft_limit, Some(64));
    assert!(config.log_graph_rebuilds);
    assert_eq!(config.validate_wiring, cfg!(debug_assertions));
    assert_eq!(config.ldr_format, TextureFormat::R8G8B8A8_UNORM);
    assert_eq!(config.luminance_format, TextureFormat::R32_SFLOAT);
}

#[test]
fn test_config_struct_update() {
    let config = PostProcessConfig {
        surface_soft_limit: None,
        ..PostProcessConfig::default()
    };
    assert_eq!(config.surface_soft_limit, None);
    assert!(config.log_graph_rebuilds);
}
