// Host-side tests for palette color parsing.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod palette {
    include!("../src/render/palette.rs");
}

use palette::Rgb;

#[test]
fn parses_hex_colors() {
    assert_eq!(Rgb::parse("#00c46a"), Some(Rgb { r: 0, g: 196, b: 106 }));
    assert_eq!(Rgb::parse("  #fff "), Some(Rgb { r: 255, g: 255, b: 255 }));
    assert_eq!(Rgb::parse("#F59F66"), Some(Rgb { r: 245, g: 159, b: 102 }));
    assert_eq!(Rgb::parse("#12345"), None);
    assert_eq!(Rgb::parse("#ggg"), None);
}

#[test]
fn parses_functional_colors() {
    assert_eq!(Rgb::parse("rgb(10, 36, 54)"), Some(Rgb { r: 10, g: 36, b: 54 }));
    assert_eq!(Rgb::parse("rgba(10,36,54,0.5)"), Some(Rgb { r: 10, g: 36, b: 54 }));
    assert_eq!(Rgb::parse("rgb(10 36 54 / 50%)"), Some(Rgb { r: 10, g: 36, b: 54 }));
    assert_eq!(Rgb::parse("rgb(100%, 0%, 20%)"), Some(Rgb { r: 255, g: 0, b: 51 }));
    assert_eq!(Rgb::parse("rgb(300, -4, 12.6)"), Some(Rgb { r: 255, g: 0, b: 13 }));
}

#[test]
fn rejects_what_it_cannot_read() {
    for value in ["", "green", "rgb(1, 2)", "rgb(a, b, c)", "hsl(120 50% 50%)", "rgb(1, 2, 3) extra"] {
        assert_eq!(Rgb::parse(value), None, "{value}");
    }
}

#[test]
fn fallbacks_parse() {
    use constants::{GREEN_FALLBACK, INK_FALLBACK, ORANGE_FALLBACK};
    for fallback in [GREEN_FALLBACK, ORANGE_FALLBACK, INK_FALLBACK] {
        assert!(Rgb::parse(fallback).is_some(), "{fallback}");
    }
}

#[test]
fn rgba_clamps_alpha() {
    let ink = Rgb { r: 10, g: 36, b: 54 };
    assert_eq!(ink.rgba(0.5), "rgba(10, 36, 54, 0.5)");
    assert_eq!(ink.rgba(3.0), "rgba(10, 36, 54, 1)");
    assert_eq!(ink.rgba(-1.0), "rgba(10, 36, 54, 0)");
}
