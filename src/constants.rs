/// DOM selectors and browser-side tuning for the illustration front end.
///
/// Scene timing and motion constants live in `illustrations_core::constants`;
/// this module only holds what the page markup and browser APIs dictate.
// Containers that host an illustration; `data-scene` names the scene
pub const CONTAINER_SELECTOR: &str = ".canvas";
pub const SCENE_ATTRIBUTE: &str = "data-scene";
pub const CONFIG_ATTRIBUTE_PREFIX: &str = "data-";

// Fixed overlay card flipped by the order timeline
pub const SPEED_CARD_SELECTOR: &str = ".overlay--speed .card";
pub const CARD_TITLE_SELECTOR: &str = ".card-title";
pub const CARD_BODY_SELECTOR: &str = ".card-body";
pub const CARD_META_SELECTOR: &str = ".card-meta";
pub const FLIPPING_CLASS: &str = "is-flipping";

// Transient status cards spawned by visibility pulses
pub const CARD_STACK_SELECTOR: &str = ".overlay--visibility .card-stack";
pub const SPAWNED_CARD_CLASS: &str = "card visibility-card";
pub const CARD_ID_ATTRIBUTE: &str = "data-card-id";
pub const MAX_STACKED_CARDS: u32 = 16; // oldest cards are dropped beyond this

// Error surface shared by render faults and uncaught page errors
pub const DEBUG_OVERLAY_CLASS: &str = "debug-overlay";

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

// Palette fallbacks when the page does not define the CSS custom properties
pub const GREEN_FALLBACK: &str = "#00c46a";
pub const ORANGE_FALLBACK: &str = "#f59f66";
pub const INK_FALLBACK: &str = "#0a2436";
