//! Strain versus smooth: a stack of wave lines bunches toward the middle under
//! strain and relaxes to even spacing, on a four-segment loop.

use super::{Frame, Render};
use crate::config::SceneConfig;
use crate::easing::{angle, ease_in_out, lerp, warp};
use crate::error::{RenderError, TimelineError};
use crate::random::SceneRng;
use crate::surface::{Backdrop, Paint, Stroke, Tone};
use crate::timeline::{Phase, Timeline};
use glam::Vec2;
use std::f32::consts::TAU;

const SEED: u64 = 53;
const LINE_COUNT: usize = 20;
const STEPS: usize = 72;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Strain,
    Smooth,
}

impl Shape {
    fn strength(self) -> f32 {
        match self {
            Shape::Strain => 1.0,
            Shape::Smooth => 0.0,
        }
    }
}

/// `(from, to)` shape pairs; equal pairs are holds.
pub const SEGMENTS: [((Shape, Shape), f64); 4] = [
    ((Shape::Strain, Shape::Strain), 1800.0),
    ((Shape::Strain, Shape::Smooth), 1500.0),
    ((Shape::Smooth, Shape::Smooth), 2200.0),
    ((Shape::Smooth, Shape::Strain), 1500.0),
];

#[derive(Clone, Copy, Debug)]
struct WaveLine {
    offset: f32,
    amp: f32,
    freq: f32,
    phase: f32,
    speed: f32,
    drift: f32,
}

pub struct StrainScene {
    timeline: Timeline<(Shape, Shape)>,
    lines: Vec<WaveLine>,
}

impl StrainScene {
    pub fn new(_config: &SceneConfig) -> Result<Self, TimelineError> {
        let mut rng = SceneRng::new(SEED);
        let lines = (0..LINE_COUNT)
            .map(|i| WaveLine {
                offset: i as f32 / (LINE_COUNT - 1) as f32,
                amp: rng.range(0.018, 0.048),
                freq: rng.range(2.4, 5.6),
                phase: rng.angle(),
                speed: rng.range(0.00012, 0.00032),
                drift: rng.range(0.00008, 0.0002),
            })
            .collect();
        let timeline = Timeline::new(SEGMENTS.iter().map(|&(shapes, d)| Phase::new(shapes, d)))?;
        Ok(Self { timeline, lines })
    }

    /// Strain strength at `time`: 1 is fully strained, 0 fully smooth.
    pub fn intensity(&self, time: f64, reduced_motion: bool) -> f32 {
        if reduced_motion {
            return Shape::Smooth.strength();
        }
        let state = self.timeline.at(time);
        let (from, to) = *state.label;
        if from == to {
            from.strength()
        } else {
            lerp(from.strength(), to.strength(), ease_in_out(state.progress))
        }
    }
}

impl Render for StrainScene {
    fn render(&mut self, frame: &mut Frame<'_>) -> Result<(), RenderError> {
        let input = frame.input;
        let (w, h) = (input.width, input.height);
        let time = input.elapsed;
        let pointer = input.pointer.as_vec2();
        frame.begin(Backdrop::at(0.52, 0.7).alpha(0.3))?;

        let intensity = self.intensity(time, input.reduced_motion);
        let smoothness = 1.0 - intensity;
        if smoothness > 0.2 {
            frame
                .surface
                .glow(input.at(0.5, 0.52), input.min_dim() * 0.35, Tone::Primary, 0.16 * smoothness)?;
        }

        let (left, right) = (w * 0.08, w * 0.92);
        let (top, bottom) = (h * 0.18, h * 0.82);
        let amp_scale = lerp(0.45, 1.2, intensity);
        let mut points = Vec::with_capacity(STEPS);
        for line in &self.lines {
            let base_y = lerp(top, bottom, warp(line.offset, intensity));
            let drift = (time * line.drift as f64 + line.phase as f64).sin() as f32
                * h
                * line.amp
                * 0.35
                * intensity;
            let center_weight = 1.0 - (line.offset - 0.5).abs() * 1.8;
            let alpha = (0.18 + center_weight * 0.22 + smoothness * 0.08).clamp(0.15, 0.55);

            points.clear();
            for i in 0..STEPS {
                let t = i as f32 / (STEPS - 1) as f32;
                let wave = (t * TAU * line.freq + angle(time, line.speed as f64) + line.phase).sin()
                    * h
                    * line.amp
                    * amp_scale;
                points.push(Vec2::new(
                    lerp(left, right, t) + pointer.x * 3.0,
                    base_y + wave + drift + pointer.y * 2.5,
                ));
            }
            frame
                .surface
                .polyline(&points, &Stroke::new(Paint::primary(alpha), 1.1))?;
        }
        Ok(())
    }
}
