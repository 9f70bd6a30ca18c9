//! Four-phase order timeline (scan, collapse, dart, launch) with an overlay
//! card that flips to new text on every phase change.

use super::{CardAnchor, Frame, Layout, Render};
use crate::config::SceneConfig;
use crate::easing::{ease_in_out, lerp, lerp_point};
use crate::error::{RenderError, TimelineError};
use crate::overlay::{CardContent, OverlayCommand};
use crate::random::SceneRng;
use crate::surface::{Backdrop, Paint, Stroke, Tone};
use crate::tasks::TaskLane;
use crate::timeline::{Phase, Timeline};
use glam::Vec2;
use std::f32::consts::{PI, TAU};

const SEED: u64 = 24;
const FIELD_DOTS: usize = 48;
const BURST_PARTICLES: usize = 10;
const GRID_COLS: usize = 10;
const GRID_ROWS: usize = 6;

/// Card text swap happens this long into the flip.
pub const FLIP_SWAP_MS: f64 = 240.0;
/// Card settles this long after the flip began.
pub const FLIP_SETTLE_MS: f64 = 700.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeedPhase {
    Scan,
    Collapse,
    Dart,
    Launch,
}

pub const PHASES: [(SpeedPhase, f64); 4] = [
    (SpeedPhase::Scan, 1700.0),
    (SpeedPhase::Collapse, 1500.0),
    (SpeedPhase::Dart, 1800.0),
    (SpeedPhase::Launch, 1800.0),
];

pub const CARD_STATES: [CardContent; 4] = [
    CardContent::new("Placing Order", "Optimizing Route", "Generating Quote"),
    CardContent::new("Order placed", "Dispatch queued", "Tracking enabled"),
    CardContent::new("Current ETA", "01:42 PM", "On schedule"),
    CardContent::new("Current departed", "SAN -> PHX", ""),
];

#[derive(Clone, Copy, Debug)]
struct FieldDot {
    pos: Vec2,
    radius: f32,
    alpha: f32,
    phase: f32,
}

#[derive(Clone, Copy, Debug)]
struct GridDot {
    pos: Vec2,
    phase: f32,
    scan: f32,
}

#[derive(Clone, Copy, Debug)]
struct BurstParticle {
    angle: f32,
    speed: f32,
}

pub struct SpeedScene {
    rng: SceneRng,
    timeline: Timeline<SpeedPhase>,
    field: Vec<FieldDot>,
    burst: Vec<BurstParticle>,
    grid: Vec<GridDot>,
    grid_size: Vec2,
    anchor: Option<CardAnchor>,
    last_phase: Option<usize>,
}

impl SpeedScene {
    pub fn new(config: &SceneConfig) -> Result<Self, TimelineError> {
        let mut rng = SceneRng::new(SEED);
        let field = (0..config.particles_or(FIELD_DOTS))
            .map(|_| FieldDot {
                pos: Vec2::new(rng.next_f32(), rng.next_f32()),
                radius: rng.range(0.7, 2.3),
                alpha: rng.range(0.12, 0.32),
                phase: rng.angle(),
            })
            .collect();
        let burst = (0..BURST_PARTICLES)
            .map(|_| BurstParticle {
                angle: rng.angle(),
                speed: rng.range(0.6, 1.2),
            })
            .collect();
        let timeline = Timeline::new(PHASES.iter().map(|&(p, d)| Phase::new(p, d)))?;
        Ok(Self {
            rng,
            timeline,
            field,
            burst,
            grid: Vec::new(),
            grid_size: Vec2::ZERO,
            anchor: None,
            last_phase: None,
        })
    }

    pub fn timeline(&self) -> &Timeline<SpeedPhase> {
        &self.timeline
    }

    pub fn card_anchor(&self) -> Option<CardAnchor> {
        self.anchor
    }

    fn build_grid(&mut self, size: Vec2) {
        let (left, right) = (size.x * 0.12, size.x * 0.72);
        let (top, bottom) = (size.y * 0.2, size.y * 0.8);
        let mut grid = Vec::with_capacity(GRID_COLS * GRID_ROWS);
        for r in 0..GRID_ROWS {
            for c in 0..GRID_COLS {
                let u = c as f32 / (GRID_COLS - 1) as f32;
                let v = r as f32 / (GRID_ROWS - 1) as f32;
                grid.push(GridDot {
                    pos: Vec2::new(lerp(left, right, u), lerp(top, bottom, v)),
                    phase: self.rng.angle(),
                    scan: u * 0.7 + v * 0.3,
                });
            }
        }
        self.grid = grid;
        self.grid_size = size;
    }

    /// Queue the overlay card change for entering phase `index`.
    fn flip_card(&self, frame: &mut Frame<'_>, index: usize) {
        let content = CARD_STATES[index % CARD_STATES.len()];
        let overlay = &mut *frame.overlay;
        overlay.supersede(TaskLane::CardFlip);
        if self.last_phase.is_none() || frame.input.reduced_motion {
            overlay.now(OverlayCommand::EndFlip);
            overlay.now(OverlayCommand::ShowCard(content));
        } else {
            overlay.now(OverlayCommand::BeginFlip);
            overlay.after(TaskLane::CardFlip, FLIP_SWAP_MS, OverlayCommand::ShowCard(content));
            overlay.after(TaskLane::CardFlip, FLIP_SETTLE_MS, OverlayCommand::EndFlip);
        }
    }
}

impl Render for SpeedScene {
    fn on_resize(&mut self, layout: &Layout) {
        self.anchor = layout.card_anchor;
        self.build_grid(Vec2::new(layout.width, layout.height));
    }

    fn render(&mut self, frame: &mut Frame<'_>) -> Result<(), RenderError> {
        let input = frame.input;
        let (w, h) = (input.width, input.height);
        let time = input.elapsed;
        let pointer = input.pointer.as_vec2();
        frame.begin(Backdrop::at(0.48, 0.76).alpha(0.32))?;

        if self.grid.is_empty() || self.grid_size != input.size() {
            self.build_grid(input.size());
        }

        let state = self.timeline.at(time);
        let (index, progress, phase) = (state.index, state.progress, *state.label);
        if self.last_phase != Some(index) {
            self.flip_card(frame, index);
            self.last_phase = Some(index);
        }

        let anchor = self.anchor.unwrap_or_default();
        let card_left = if anchor.left_x.is_finite() && anchor.left_x > 0.0 {
            anchor.left_x
        } else {
            w * 0.64
        };
        let card_center_y = if anchor.center_y.is_finite() && anchor.center_y > 0.0 {
            anchor.center_y
        } else {
            h * 0.5
        };
        let beside_card = Vec2::new(card_left - w * 0.05, card_center_y + pointer.y * 4.0);
        let dart_target = Vec2::new(w * 0.12, h * 0.32 + pointer.y * 8.0);

        for dot in &self.field {
            let drift = Vec2::new(
                (time * 0.0004 + dot.phase as f64).sin() as f32 * 6.0,
                (time * 0.0003 + dot.phase as f64).cos() as f32 * 4.0,
            );
            frame
                .surface
                .dot(dot.pos * input.size() + drift, dot.radius, Paint::secondary(dot.alpha))?;
        }

        match phase {
            SpeedPhase::Scan => {
                let scan = (time * 0.0002).rem_euclid(1.0) as f32;
                for dot in &self.grid {
                    let p = dot.phase as f64;
                    let drift = Vec2::new(
                        (time * 0.001 + p).sin() as f32 * 2.0 + pointer.x * 4.0,
                        (time * 0.0011 + p).cos() as f32 * 2.0 + pointer.y * 3.0,
                    );
                    let boost = (1.0 - (dot.scan - scan).abs() * 4.0).max(0.0);
                    let pulse = ((time * 0.002 + p).sin() as f32 + 1.0) * 0.5;
                    frame.surface.dot(
                        dot.pos + drift,
                        1.2 + boost * 1.4,
                        Paint::secondary(0.18 + pulse * 0.2 + boost * 0.55),
                    )?;
                }
            }
            SpeedPhase::Collapse => {
                let collapse = ease_in_out(progress);
                for dot in &self.grid {
                    frame.surface.dot(
                        lerp_point(dot.pos, beside_card, collapse),
                        lerp(1.2, 2.8, collapse),
                        Paint::secondary(lerp(0.16, 0.92, collapse)),
                    )?;
                }
                frame
                    .surface
                    .glow(beside_card, 26.0, Tone::Secondary, 0.4 + 0.25 * collapse)?;
            }
            SpeedPhase::Dart => {
                let arc_height = h * 0.08;
                let dart_at = |t: f32| {
                    let base = lerp_point(beside_card, dart_target, ease_in_out(t));
                    base - Vec2::new(0.0, (t * PI).sin() * arc_height)
                };
                frame.surface.line(
                    beside_card,
                    dart_target,
                    &Stroke::new(Paint::secondary(0.25), 1.2),
                )?;
                for i in 0..6 {
                    let trail_t = (progress - i as f32 * 0.08).clamp(0.0, 1.0);
                    frame.surface.dot(
                        dart_at(trail_t),
                        2.4 - i as f32 * 0.2,
                        Paint::secondary(0.45 - i as f32 * 0.06),
                    )?;
                }
                let head = dart_at(progress);
                frame.surface.glow(head, 22.0, Tone::Secondary, 0.6)?;
                frame.surface.dot(head, 3.2, Paint::secondary(1.0))?;
            }
            SpeedPhase::Launch => {
                let launch = progress.powf(0.65);
                let exit = Vec2::new(w * 1.15, h * 0.12);
                let head = lerp_point(dart_target, exit, launch)
                    - Vec2::new(0.0, (progress * PI).sin() * h * 0.05);
                let shock = ease_in_out(progress);
                let min_dim = input.min_dim();
                frame.surface.circle(
                    dart_target,
                    shock * min_dim * 0.42,
                    &Stroke::new(Paint::secondary(0.4 * (1.0 - shock)), 1.4),
                )?;
                let shown = if input.low_power { self.burst.len() / 2 } else { self.burst.len() };
                for particle in self.burst.iter().take(shown) {
                    let distance = shock * min_dim * 0.22 * particle.speed;
                    let offset = Vec2::from_angle(particle.angle % TAU) * distance;
                    frame.surface.dot(
                        dart_target + offset,
                        1.6,
                        Paint::secondary(0.5 * (1.0 - shock)),
                    )?;
                }
                frame
                    .surface
                    .glow(head, 26.0, Tone::Secondary, 0.65 * (1.0 - progress))?;
                frame.surface.dot(head, 3.4, Paint::secondary(1.0))?;
            }
        }
        Ok(())
    }
}
