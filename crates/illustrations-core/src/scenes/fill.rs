//! Capacity fill: a dot grid fills at a random ratio, then flies off to one
//! side depending on whether the load fit.

use super::{Frame, Layout, Render};
use crate::config::SceneConfig;
use crate::easing::{ease_in_out, lerp};
use crate::error::RenderError;
use crate::random::SceneRng;
use crate::surface::{Backdrop, Paint, Tone};
use glam::Vec2;
use std::f32::consts::TAU;

pub const FILL_MS: f64 = 1600.0;
pub const FLY_MS: f64 = 1000.0;
pub const CYCLE_MS: f64 = FILL_MS + FLY_MS;
const MIN_COLS: usize = 10;
const MIN_ROWS: usize = 6;

#[derive(Clone, Copy, Debug)]
struct GridDot {
    pos: Vec2,
    filled: bool,
    stagger: f32,
    phase: f32,
}

/// Per-cycle result of the fill draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FillOutcome {
    pub ratio: f32,
    /// +1 flies right, -1 flies left.
    pub direction: f32,
    pub tone: Tone,
}

impl FillOutcome {
    pub fn from_ratio(ratio: f32) -> Self {
        if ratio <= 0.5 {
            Self {
                ratio,
                direction: 1.0,
                tone: Tone::Primary,
            }
        } else {
            Self {
                ratio,
                direction: -1.0,
                tone: Tone::Accent,
            }
        }
    }
}

pub struct FillScene {
    dots: Vec<GridDot>,
    grid_size: Vec2,
    cycle_start: f64,
    cycles: u64,
    outcome: FillOutcome,
}

impl FillScene {
    pub fn new(_config: &SceneConfig) -> Self {
        Self {
            dots: Vec::new(),
            grid_size: Vec2::ZERO,
            cycle_start: 0.0,
            cycles: 0,
            outcome: FillOutcome::from_ratio(0.0),
        }
    }

    pub fn outcome(&self) -> FillOutcome {
        self.outcome
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn dot_count(&self) -> usize {
        self.dots.len()
    }

    fn build_grid(&mut self, size: Vec2) {
        let spacing = (size.x.min(size.y) * 0.085).clamp(18.0, 26.0);
        let cols = MIN_COLS.max((size.x / spacing) as usize + 1);
        let rows = MIN_ROWS.max((size.y / spacing) as usize + 1);
        let origin = (size - Vec2::new((cols - 1) as f32, (rows - 1) as f32) * spacing) * 0.5;
        self.dots = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| (r, c)))
            .map(|(r, c)| GridDot {
                pos: origin + Vec2::new(c as f32, r as f32) * spacing,
                filled: false,
                stagger: 0.0,
                phase: ((r * 37 + c * 23) % 100) as f32 / 100.0,
            })
            .collect();
        self.grid_size = size;
    }

    /// Start a new cycle with a fresh fill draw.
    fn reset_cycle(&mut self, now: f64) {
        self.cycle_start = now;
        self.cycles += 1;
        let mut rng = SceneRng::from_entropy();
        let probability = 0.25 + rng.next_f32() * 0.5;
        let mut filled = 0;
        for dot in &mut self.dots {
            dot.filled = rng.next_f32() < probability;
            dot.stagger = rng.next_f32() * 0.6;
            filled += dot.filled as usize;
        }
        let ratio = if self.dots.is_empty() {
            0.0
        } else {
            filled as f32 / self.dots.len() as f32
        };
        self.outcome = FillOutcome::from_ratio(ratio);
    }
}

impl Render for FillScene {
    fn on_resize(&mut self, layout: &Layout) {
        self.dots.clear();
        self.grid_size = Vec2::new(layout.width, layout.height);
    }

    fn render(&mut self, frame: &mut Frame<'_>) -> Result<(), RenderError> {
        let input = frame.input;
        let time = input.elapsed;
        frame.begin(Backdrop::at(0.55, 0.7))?;

        if self.dots.is_empty() || self.grid_size != input.size() {
            self.build_grid(input.size());
            self.reset_cycle(time);
        }
        let mut elapsed = time - self.cycle_start;
        if elapsed >= CYCLE_MS || elapsed < 0.0 {
            self.reset_cycle(time);
            elapsed = 0.0;
        }

        let filling = elapsed < FILL_MS;
        let fill = (elapsed / FILL_MS).clamp(0.0, 1.0) as f32;
        let fly = ease_in_out(((elapsed - FILL_MS) / FLY_MS).clamp(0.0, 1.0) as f32);
        let shift = Vec2::new(self.outcome.direction * input.width * 1.15 * fly, 0.0);
        let empty = Paint::secondary(0.22);
        let flying = Paint::new(self.outcome.tone, 0.95);

        for dot in &self.dots {
            let at = dot.pos + shift;
            if !filling {
                frame.surface.dot(at, 1.9, flying)?;
            } else if dot.filled {
                let appear = ease_in_out(((fill - dot.stagger) / 0.4).clamp(0.0, 1.0));
                let pulse = 0.6 + 0.4 * (time * 0.006 + (dot.phase * TAU) as f64).sin() as f32;
                let glow = 0.2 * appear * pulse;
                if glow > 0.01 {
                    frame.surface.dot(at, 4.2, Paint::secondary(glow))?;
                }
                frame
                    .surface
                    .dot(at, 1.9, Paint::secondary(lerp(0.2, 0.95, appear)))?;
            } else {
                frame.surface.dot(at, 1.9, empty)?;
            }
        }
        Ok(())
    }
}
