//! Visibility pulses: expanding rings at random spots, each spawning a few
//! short-lived status cards in the overlay stack.

use super::{Frame, Render};
use crate::config::SceneConfig;
use crate::easing::{lerp, wrapped};
use crate::error::RenderError;
use crate::overlay::{CardContent, OverlayCommand};
use crate::random::SceneRng;
use crate::surface::{Backdrop, Paint, Stroke, Tone};
use crate::tasks::TaskLane;
use glam::Vec2;
use std::collections::VecDeque;
use std::f32::consts::TAU;

const SEED: u64 = 52;
const FIELD_DOTS: usize = 64;
const LANES: usize = 6;
const LANE_DOTS: usize = 5;
const RINGS_PER_PULSE: usize = 3;

pub const MAX_PULSES: usize = 7;
pub const PULSE_DURATION_MS: f64 = 1500.0;
/// Pulses are dropped once their progress passes this multiple of the duration.
pub const PULSE_LIFETIME: f64 = 1.35;
const FIRST_PULSE_DELAY_MS: f64 = 300.0;
const CALM_INTERVAL_MS: f64 = 1800.0;

pub const CARDS: [CardContent; 6] = [
    CardContent::new("Live Update", "Status synced", "Just now"),
    CardContent::new("Drop Confirmed", "Location locked", "Realtime ping"),
    CardContent::new("Visibility", "Signal refreshed", "T+00:08"),
    CardContent::new("Tracking", "Route aligned", "Instant sync"),
    CardContent::new("Update", "New scan", "T+00:12"),
    CardContent::new("Status Pulse", "Package active", "Now"),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pulse {
    /// Fractions of the surface size.
    pub origin: Vec2,
    /// Scene time at spawn.
    pub start: f64,
    pub seed: f32,
}

impl Pulse {
    pub fn progress(&self, time: f64) -> f64 {
        (time - self.start) / PULSE_DURATION_MS
    }
}

/// Bounded FIFO of live pulses; the oldest is evicted past capacity.
#[derive(Clone, Debug)]
pub struct PulseSet {
    pulses: VecDeque<Pulse>,
    capacity: usize,
}

impl Default for PulseSet {
    fn default() -> Self {
        Self::with_capacity(MAX_PULSES)
    }
}

impl PulseSet {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pulses: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, pulse: Pulse) {
        self.pulses.push_back(pulse);
        while self.pulses.len() > self.capacity {
            self.pulses.pop_front();
        }
    }

    /// Drop pulses whose rings have fully faded at `time`.
    pub fn prune(&mut self, time: f64) {
        self.pulses.retain(|p| p.progress(time) <= PULSE_LIFETIME);
    }

    pub fn len(&self) -> usize {
        self.pulses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pulses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pulse> {
        self.pulses.iter()
    }
}

#[derive(Clone, Copy, Debug)]
struct FieldDot {
    pos: Vec2,
    radius: f32,
    alpha: f32,
    drift: f32,
}

pub struct PulseScene {
    rng: SceneRng,
    field: Vec<FieldDot>,
    pulses: PulseSet,
    next_pulse: Option<f64>,
    card_index: usize,
    next_card_id: u32,
}

impl PulseScene {
    pub fn new(config: &SceneConfig) -> Self {
        let mut rng = SceneRng::new(SEED);
        let field = (0..config.particles_or(FIELD_DOTS))
            .map(|_| FieldDot {
                pos: Vec2::new(rng.next_f32(), rng.next_f32()),
                radius: rng.range(0.7, 2.2),
                alpha: rng.range(0.08, 0.3),
                drift: rng.angle(),
            })
            .collect();
        Self {
            rng,
            field,
            pulses: PulseSet::default(),
            next_pulse: None,
            card_index: 0,
            next_card_id: 0,
        }
    }

    pub fn pulses(&self) -> &PulseSet {
        &self.pulses
    }

    fn spawn(&mut self, frame: &mut Frame<'_>, time: f64) {
        let origin = Vec2::new(self.rng.range(0.16, 0.84), self.rng.range(0.22, 0.78));
        let seed = self.rng.angle();
        self.pulses.push(Pulse { origin, start: time, seed });

        let input = frame.input;
        let count = if input.economize() { 1 } else { 2 + self.rng.index(3) };
        for i in 0..count {
            let content = CARDS[self.card_index % CARDS.len()];
            self.card_index += 1;
            let id = self.next_card_id;
            self.next_card_id = self.next_card_id.wrapping_add(1);

            let jitter = Vec2::new(self.rng.signed() * 60.0, self.rng.signed() * 40.0);
            let base = origin * input.size() + jitter;
            let position = Vec2::new(
                soft_clamp(base.x, 90.0, input.width - 90.0),
                soft_clamp(base.y, 50.0, input.height - 50.0),
            );
            let drift = Vec2::new(self.rng.signed() * 13.0, -18.0 - self.rng.next_f32() * 20.0);
            let delay_ms = if input.reduced_motion { 0.0 } else { i as f64 * 90.0 };
            let lifespan = if input.reduced_motion { 2200.0 } else { 1600.0 + delay_ms };

            frame.overlay.now(OverlayCommand::SpawnCard {
                id,
                content,
                position,
                drift,
                delay_ms,
            });
            frame
                .overlay
                .after(TaskLane::CardSpawn, lifespan, OverlayCommand::RemoveCard { id });
        }
    }
}

/// Clamp that tolerates an inverted range on surfaces narrower than the margins.
fn soft_clamp(v: f32, min: f32, max: f32) -> f32 {
    if min > max {
        (min + max) * 0.5
    } else {
        v.clamp(min, max)
    }
}

impl Render for PulseScene {
    fn render(&mut self, frame: &mut Frame<'_>) -> Result<(), RenderError> {
        let input = frame.input;
        let (w, h) = (input.width, input.height);
        let time = input.elapsed;
        frame.begin(Backdrop::at(0.45, 0.75))?;

        let lane = Stroke::new(Paint::primary(0.16), 1.0).dashed(2.0, 6.0, -wrapped(time, 0.04, 8.0));
        for i in 0..LANES {
            let y = lerp(h * 0.2, h * 0.82, i as f32 / (LANES - 1) as f32);
            frame
                .surface
                .line(Vec2::new(w * 0.12, y), Vec2::new(w * 0.88, y), &lane)?;
            for j in (0..LANE_DOTS).filter(|j| (i + j) % 2 == 0) {
                let x = lerp(w * 0.14, w * 0.86, j as f32 / (LANE_DOTS - 1) as f32);
                frame.surface.dot(Vec2::new(x, y), 1.6, Paint::primary(0.22))?;
            }
        }

        for dot in &self.field {
            let wobble = (time * 0.0005 + dot.drift as f64).sin() as f32 * 4.0;
            let at = Vec2::new(dot.pos.x * w + wobble, dot.pos.y * h);
            frame.surface.dot(at, dot.radius, Paint::primary(dot.alpha))?;
        }

        if !input.paused {
            let due = *self.next_pulse.get_or_insert(time + FIRST_PULSE_DELAY_MS);
            if time >= due {
                self.spawn(frame, time);
                let interval = if input.economize() {
                    CALM_INTERVAL_MS
                } else {
                    700.0 + self.rng.next_f32() as f64 * 500.0
                };
                self.next_pulse = Some(time + interval);
            }
        }

        self.pulses.prune(time);
        let max_radius = input.min_dim() * 0.42;
        for pulse in self.pulses.iter() {
            let progress = pulse.progress(time) as f32;
            let center = pulse.origin * input.size();
            for r in 0..RINGS_PER_PULSE {
                let ring_t = progress - r as f32 * 0.18;
                if !(0.0..=1.0).contains(&ring_t) {
                    continue;
                }
                let radius = ring_t * max_radius + r as f32 * 8.0;
                let alpha = ((1.0 - ring_t) * (0.32 - r as f32 * 0.05)).clamp(0.0, 0.35);
                frame
                    .surface
                    .circle(center, radius, &Stroke::new(Paint::secondary(alpha), 1.2))?;
                let tick = pulse.seed + ring_t * TAU * 0.35;
                frame
                    .surface
                    .dot(center + Vec2::from_angle(tick) * radius, 2.1, Paint::secondary(0.75))?;
            }
            if progress < 0.28 {
                let strength = 1.0 - progress / 0.28;
                frame
                    .surface
                    .glow(center, 32.0 + strength * 12.0, Tone::Secondary, 0.25 + strength * 0.25)?;
                frame.surface.dot(center, 3.4, Paint::secondary(1.0))?;
            }
        }
        Ok(())
    }
}
