// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use illustrations_core::{
    SceneConfig, GOVERNOR_WINDOW, LOW_POWER_THRESHOLD_MS, MAX_DEVICE_PIXEL_RATIO, MAX_FRAME_DELTA_MS,
    POINTER_SMOOTHING, SCROLL_SETTLE_MS, VISIBILITY_THRESHOLD,
};

#[test]
#[allow(clippy::assertions_on_constants)]
fn frame_loop_constants_are_within_reasonable_bounds() {
    // A capped frame must still be slower than the low-power threshold
    assert!(MAX_FRAME_DELTA_MS > LOW_POWER_THRESHOLD_MS);
    assert!(LOW_POWER_THRESHOLD_MS > 1000.0 / 60.0);

    assert!(POINTER_SMOOTHING > 0.0 && POINTER_SMOOTHING <= 1.0);
    assert!(VISIBILITY_THRESHOLD > 0.0 && VISIBILITY_THRESHOLD < 1.0);
    assert!(MAX_DEVICE_PIXEL_RATIO >= 1.0);
    assert!(GOVERNOR_WINDOW > 1);
    assert!(SCROLL_SETTLE_MS > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn card_timings_are_ordered() {
    use illustrations_core::scenes::{pulses, speed};

    assert!(speed::FLIP_SWAP_MS < speed::FLIP_SETTLE_MS);
    let shortest_phase = speed::PHASES.iter().map(|(_, d)| *d).fold(f64::INFINITY, f64::min);
    assert!(speed::FLIP_SETTLE_MS < shortest_phase, "a flip settles before the next phase");
    assert!(pulses::PULSE_LIFETIME > 1.0);
}

#[test]
fn selectors_are_well_formed() {
    for selector in [
        CONTAINER_SELECTOR,
        SPEED_CARD_SELECTOR,
        CARD_TITLE_SELECTOR,
        CARD_BODY_SELECTOR,
        CARD_META_SELECTOR,
        CARD_STACK_SELECTOR,
    ] {
        assert!(selector.starts_with('.'), "{selector}");
        assert_eq!(selector.trim(), selector);
    }
    assert!(SCENE_ATTRIBUTE.starts_with(CONFIG_ATTRIBUTE_PREFIX));
    assert!(CARD_ID_ATTRIBUTE.starts_with(CONFIG_ATTRIBUTE_PREFIX));
    assert!(!FLIPPING_CLASS.contains(' '));
    assert!(MAX_STACKED_CARDS as usize >= illustrations_core::scenes::pulses::MAX_PULSES);
}

#[test]
fn config_keys_round_trip_through_the_attribute_prefix() {
    let mut config = SceneConfig::default();
    for key in ["center-x", "center-y", "fill", "fps", "particles"] {
        let attribute = format!("{CONFIG_ATTRIBUTE_PREFIX}{key}");
        assert!(config.apply(&attribute, "1").is_ok(), "{attribute}");
    }
    assert_eq!(config.particle_count, Some(1));
}
