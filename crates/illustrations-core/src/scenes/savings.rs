//! Savings curve: a bundle of wiggling dashed lines converging onto an eased
//! base curve, with a pulse riding the curve at constant speed.

use super::{Frame, Render};
use crate::config::SceneConfig;
use crate::easing::{angle, ease_in_out, lerp, looping, wrapped, PathSampler};
use crate::error::RenderError;
use crate::random::SceneRng;
use crate::surface::{Backdrop, Paint, Stroke, Tone};
use glam::Vec2;
use std::f32::consts::TAU;

const SEED: u64 = 17;
const LINE_COUNT: usize = 22;
const STEPS: usize = 44;
const PULSE_SPEED: f64 = 0.00018;

#[derive(Clone, Copy, Debug)]
struct SavingsLine {
    spread: f32,
    amp: f32,
    amp2: f32,
    freq: f32,
    freq2: f32,
    phase: f32,
    phase2: f32,
    speed: f32,
    dash_offset: f32,
}

pub struct SavingsScene {
    lines: Vec<SavingsLine>,
}

impl SavingsScene {
    pub fn new(_config: &SceneConfig) -> Self {
        let mut rng = SceneRng::new(SEED);
        let lines = (0..LINE_COUNT)
            .map(|i| SavingsLine {
                spread: lerp(-1.0, 1.0, i as f32 / (LINE_COUNT - 1) as f32),
                amp: rng.range(0.02, 0.06),
                amp2: rng.range(0.015, 0.045),
                freq: rng.range(3.4, 6.6),
                freq2: rng.range(6.8, 11.4),
                phase: rng.angle(),
                phase2: rng.angle(),
                speed: rng.range(0.0002, 0.00055),
                dash_offset: rng.range(0.0, 18.0),
            })
            .collect();
        Self { lines }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Eased diagonal with a slow sway, in surface units.
fn base_curve(t: f32, h: f32) -> f32 {
    let slope = lerp(h * 0.3, h * 0.74, ease_in_out(t));
    slope + (t * TAU * 0.7 + 1.1).sin() * h * 0.015
}

impl Render for SavingsScene {
    fn render(&mut self, frame: &mut Frame<'_>) -> Result<(), RenderError> {
        let input = frame.input;
        let (w, h) = (input.width, input.height);
        let time = input.elapsed;
        frame.begin(Backdrop::at(0.52, 0.76))?;

        let (left, right) = (-w * 0.06, w * 0.9);
        let x_at = |t: f32| lerp(left, right, t);
        let step_t = |i: usize| i as f32 / (STEPS - 1) as f32;

        let mut points = Vec::with_capacity(STEPS);
        for line in &self.lines {
            let alpha = lerp(0.16, 0.42, 1.0 - line.spread.abs());
            let stroke = Stroke::new(Paint::primary(alpha), 1.1).dashed(
                3.0,
                7.0,
                -(wrapped(time, 0.04, 10.0) + line.dash_offset),
            );
            points.clear();
            for i in 0..STEPS {
                let t = step_t(i);
                let falloff = (1.0 - t).powf(1.7);
                let offset = line.spread * h * 0.12 * falloff;
                let wiggle = (t * line.freq + line.phase + angle(time, line.speed as f64)).sin()
                    * h
                    * line.amp
                    * falloff
                    + (t * line.freq2 + line.phase2).sin() * h * line.amp2 * falloff;
                points.push(Vec2::new(x_at(t), base_curve(t, h) + offset + wiggle));
            }
            frame.surface.polyline(&points, &stroke)?;
        }

        let base: Vec<Vec2> = (0..STEPS)
            .map(|i| Vec2::new(x_at(step_t(i)), base_curve(step_t(i), h)))
            .collect();
        frame
            .surface
            .polyline(&base, &Stroke::new(Paint::primary(0.75), 1.6))?;
        let tail_start = (STEPS as f32 * 0.6) as usize;
        frame
            .surface
            .polyline(&base[tail_start..], &Stroke::new(Paint::secondary(0.75), 2.0))?;

        let sampler = PathSampler::new(base);
        if let Some(pulse) = sampler.point_at(looping(time, PULSE_SPEED, 0.0)) {
            frame.surface.glow(pulse, 24.0, Tone::Secondary, 0.45)?;
            frame.surface.dot(pulse, 3.4, Paint::secondary(1.0))?;
        }

        let end = Vec2::new(right, base_curve(1.0, h));
        frame
            .surface
            .glow(Vec2::new(right - w * 0.02, end.y), 36.0, Tone::Primary, 0.3)?;
        frame
            .surface
            .dot(Vec2::new(left, base_curve(0.0, h)), 2.4, Paint::secondary(0.75))?;
        frame.surface.dot(end, 2.6, Paint::secondary(0.85))?;
        Ok(())
    }
}
