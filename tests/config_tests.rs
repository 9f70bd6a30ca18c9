// Host-side tests for per-container scene configuration.

use glam::Vec2;
use illustrations_core::*;

#[test]
fn defaults_match_an_unconfigured_container() {
    let config = SceneConfig::from_attributes(std::iter::empty());
    assert_eq!(config, SceneConfig::default());
    assert_eq!(config.center, Vec2::splat(0.5));
    assert_eq!(config.fill_ratio, 1.0);
    assert_eq!(config.frame_interval_ms(), None);
    assert_eq!(config.particles_or(48), 48);
}

#[test]
fn attributes_accept_bare_and_prefixed_keys() {
    let config = SceneConfig::from_attributes([
        ("data-center-x", "0.25"),
        ("center-y", " 0.75 "),
        ("data-fill", "1.5"),
        ("fps", "30"),
        ("data-particles", "12"),
        ("data-unrelated", "whatever"),
    ]);
    assert_eq!(config.center, Vec2::new(0.25, 0.75));
    assert_eq!(config.fill_ratio, 1.5);
    assert_eq!(config.target_fps, Some(30.0));
    assert!((config.frame_interval_ms().unwrap_or_default() - 1000.0 / 30.0).abs() < 1e-9);
    assert_eq!(config.particles_or(48), 12);
}

#[test]
fn out_of_range_values_clamp_or_fail() {
    let mut config = SceneConfig::default();
    config.apply("center-x", "4").expect("clamped");
    config.apply("center-y", "-1").expect("clamped");
    config.apply("fill", "0").expect("clamped");
    assert_eq!(config.center, Vec2::new(1.0, 0.0));
    assert_eq!(config.fill_ratio, 0.1);

    assert_eq!(
        config.apply("fps", "0"),
        Err(ConfigError::OutOfRange {
            key: "fps".to_string(),
            value: 0.0,
        })
    );
    assert!(config.apply("particles", "257").is_err());
    assert!(config.apply("particles", "-3").is_err());
    assert!(config.apply("particles", &MAX_PARTICLES.to_string()).is_ok());
}

#[test]
fn unparsable_values_keep_the_default() {
    let mut config = SceneConfig::default();
    assert_eq!(
        config.apply("data-fill", "lots"),
        Err(ConfigError::NotANumber {
            key: "data-fill".to_string(),
            value: "lots".to_string(),
        })
    );
    assert!(matches!(
        config.apply("fps", "inf"),
        Err(ConfigError::OutOfRange { .. })
    ));

    let config = SceneConfig::from_attributes([("data-fps", "fast"), ("data-center-x", "0.3")]);
    assert_eq!(config.target_fps, None);
    assert_eq!(config.center.x, 0.3);
}
