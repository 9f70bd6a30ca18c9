//! Per-illustration tunables declared on the container element.
//!
//! | attribute        | field            | default            |
//! |------------------|------------------|--------------------|
//! | `data-center-x`  | `center.x`       | 0.5, clamped 0..1  |
//! | `data-center-y`  | `center.y`       | 0.5, clamped 0..1  |
//! | `data-fill`      | `fill_ratio`     | 1.0, clamped 0.1..2|
//! | `data-fps`       | `target_fps`     | every refresh      |
//! | `data-particles` | `particle_count` | scene default      |

use crate::error::ConfigError;
use glam::Vec2;

pub const MAX_PARTICLES: usize = 256;

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    /// Scene focal point as fractions of the container size.
    pub center: Vec2,
    /// How far the outermost structure reaches, relative to the scene default.
    pub fill_ratio: f32,
    /// Render at most this many frames per second of scene time.
    pub target_fps: Option<f32>,
    pub particle_count: Option<usize>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            center: Vec2::splat(0.5),
            fill_ratio: 1.0,
            target_fps: None,
            particle_count: None,
        }
    }
}

fn parse_number(key: &str, value: &str) -> Result<f64, ConfigError> {
    let n: f64 = value.trim().parse().map_err(|_| ConfigError::NotANumber {
        key: key.to_string(),
        value: value.to_string(),
    })?;
    if n.is_finite() {
        Ok(n)
    } else {
        Err(ConfigError::OutOfRange {
            key: key.to_string(),
            value: n,
        })
    }
}

impl SceneConfig {
    /// Apply one `data-*` attribute. Unknown keys are ignored.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "center-x" | "data-center-x" => {
                self.center.x = parse_number(key, value)?.clamp(0.0, 1.0) as f32;
            }
            "center-y" | "data-center-y" => {
                self.center.y = parse_number(key, value)?.clamp(0.0, 1.0) as f32;
            }
            "fill" | "data-fill" => {
                self.fill_ratio = parse_number(key, value)?.clamp(0.1, 2.0) as f32;
            }
            "fps" | "data-fps" => {
                let fps = parse_number(key, value)?;
                if fps <= 0.0 {
                    return Err(ConfigError::OutOfRange {
                        key: key.to_string(),
                        value: fps,
                    });
                }
                self.target_fps = Some(fps as f32);
            }
            "particles" | "data-particles" => {
                let n = parse_number(key, value)?;
                if n < 0.0 || n > MAX_PARTICLES as f64 {
                    return Err(ConfigError::OutOfRange {
                        key: key.to_string(),
                        value: n,
                    });
                }
                self.particle_count = Some(n as usize);
            }
            _ => {}
        }
        Ok(())
    }

    /// Build from attribute pairs; invalid values fall back to their defaults.
    pub fn from_attributes<'a>(attrs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut config = Self::default();
        for (key, value) in attrs {
            if let Err(e) = config.apply(key, value) {
                log::warn!("[config] {}; using default", e);
            }
        }
        config
    }

    /// Minimum scene time between rendered frames, if throttled.
    pub fn frame_interval_ms(&self) -> Option<f64> {
        self.target_fps.map(|fps| 1000.0 / fps as f64)
    }

    pub fn particles_or(&self, default: usize) -> usize {
        self.particle_count.unwrap_or(default)
    }
}
