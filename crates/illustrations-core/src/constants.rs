/// Runtime tuning constants.
///
/// These keep the magic numbers of the frame loop, governor and resize path in
/// one place. Scene-specific constants live next to each scene.
// Largest frame delta fed into scene clocks (ms); bigger gaps follow tab backgrounding
pub const MAX_FRAME_DELTA_MS: f64 = 60.0;

// Pointer smoothing gain applied once per tick
pub const POINTER_SMOOTHING: f32 = 0.08;

// Performance governor
pub const GOVERNOR_WINDOW: usize = 45;
pub const LOW_POWER_THRESHOLD_MS: f64 = 42.0; // mean frame time that latches low-power

// Scroll settling delay before motion resumes (ms)
pub const SCROLL_SETTLE_MS: f64 = 120.0;

// Backing store
pub const MAX_DEVICE_PIXEL_RATIO: f32 = 2.0;

// Fraction of a container that must be in view for its scene to run
pub const VISIBILITY_THRESHOLD: f64 = 0.15;
