//! Bezier fans: driver curves converge on a hub, flight curves leave it, and
//! one chosen path lights up in a driver → flight → burst cycle.

use super::{Frame, Render};
use crate::config::SceneConfig;
use crate::easing::{ease_in_cubic, ease_out_quad, lerp, looping, CubicBezier};
use crate::error::{RenderError, TimelineError};
use crate::surface::{Backdrop, Paint, Stroke, Tone};
use crate::timeline::{Phase, Timeline};
use glam::Vec2;

const DRIVER_COUNT: usize = 18;
const FLIGHT_COUNT: usize = 16;
const DRIVER_PICK: usize = 7;
const FLIGHT_PICK: usize = 5;
/// Full driver → flight → burst cycle.
pub const CYCLE_MS: f64 = 3125.0;
const BURST_RAYS: usize = 30;
const CURVE_STEPS: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowPhase {
    Driver,
    Flight,
    Burst,
}

pub struct FlowScene {
    timeline: Timeline<FlowPhase>,
}

impl FlowScene {
    pub fn new(_config: &SceneConfig) -> Result<Self, TimelineError> {
        let timeline = Timeline::new([
            Phase::new(FlowPhase::Driver, CYCLE_MS * 0.3),
            Phase::new(FlowPhase::Flight, CYCLE_MS * 0.32),
            Phase::new(FlowPhase::Burst, CYCLE_MS * 0.38),
        ])?;
        Ok(Self { timeline })
    }

    pub fn timeline(&self) -> &Timeline<FlowPhase> {
        &self.timeline
    }
}

fn driver_curve(size: Vec2, hub: Vec2, i: usize) -> CubicBezier {
    let t = i as f32 / (DRIVER_COUNT - 1) as f32;
    let (w, h) = (size.x, size.y);
    CubicBezier::new(
        Vec2::new(w * 0.08, lerp(h * 0.2, h * 0.86, t)),
        Vec2::new(w * 0.24, lerp(h * 0.18, h * 0.82, t)),
        Vec2::new(w * 0.42, lerp(h * 0.22, h * 0.78, t)),
        hub,
    )
}

fn flight_curve(size: Vec2, hub: Vec2, i: usize) -> CubicBezier {
    let t = i as f32 / (FLIGHT_COUNT - 1) as f32;
    let (w, h) = (size.x, size.y);
    let end = Vec2::new(w * 0.92, lerp(h * 0.18, h * 0.72, t));
    CubicBezier::new(
        hub,
        Vec2::new(hub.x + w * 0.14, hub.y - h * 0.18 + t * h * 0.12),
        Vec2::new(end.x - w * 0.2, end.y - h * 0.08),
        end,
    )
}

impl Render for FlowScene {
    fn render(&mut self, frame: &mut Frame<'_>) -> Result<(), RenderError> {
        let input = frame.input;
        let size = input.size();
        let time = input.elapsed;
        frame.begin(Backdrop::at(0.48, 0.76))?;

        let hub = input.at(0.56, 0.42) + input.pointer.as_vec2() * 4.0;
        let state = self.timeline.at(time);
        let (phase, progress) = (*state.label, state.progress);
        // Earlier phases stay fully drawn while later ones run.
        let driver_phase = if phase == FlowPhase::Driver { progress } else { 1.0 };
        let flight_phase = match phase {
            FlowPhase::Driver => 0.0,
            FlowPhase::Flight => progress,
            FlowPhase::Burst => 1.0,
        };
        let burst_phase = if phase == FlowPhase::Burst { progress } else { 0.0 };
        let (driver_pulse_every, flight_pulse_every) = if input.low_power { (6, 8) } else { (3, 4) };

        let fan = Stroke::new(Paint::primary(0.35), 1.1);
        for i in 0..DRIVER_COUNT {
            let curve = driver_curve(size, hub, i);
            frame.surface.bezier(&curve, &fan)?;
            frame.surface.dot(curve.start, 2.0, Paint::primary(0.7))?;
            if i % driver_pulse_every == 0 {
                let pulse = curve.point(looping(time, 0.00008, i as f64 * 0.11));
                frame.surface.glow(pulse, 10.0, Tone::Primary, 0.2)?;
                frame.surface.dot(pulse, 2.2, Paint::primary(0.35))?;
            }
        }
        for i in 0..FLIGHT_COUNT {
            let curve = flight_curve(size, hub, i);
            frame.surface.bezier(&curve, &fan)?;
            frame.surface.dot(curve.end, 2.0, Paint::primary(0.7))?;
            if i % flight_pulse_every == 0 {
                let pulse = curve.point(looping(time, 0.00006, i as f64 * 0.17));
                frame.surface.glow(pulse, 9.0, Tone::Primary, 0.16)?;
                frame.surface.dot(pulse, 2.0, Paint::primary(0.3))?;
            }
        }

        let driver = driver_curve(size, hub, DRIVER_PICK.min(DRIVER_COUNT - 1));
        let flight = flight_curve(size, hub, FLIGHT_PICK.min(FLIGHT_COUNT - 1));
        let aura = 0.22 + 0.08 * (0.5 + 0.5 * (time * 0.0012).sin() as f32);
        frame.surface.glow(hub, 28.0, Tone::Secondary, aura)?;
        frame.surface.dot(hub, 3.6, Paint::secondary(1.0))?;
        frame.surface.glow(flight.end, 24.0, Tone::Secondary, aura * 0.7)?;

        if driver_phase > 0.0 {
            let eased = ease_in_cubic(driver_phase);
            frame.surface.polyline(
                &driver.partial(eased, CURVE_STEPS),
                &Stroke::new(Paint::secondary(0.9), 2.4),
            )?;
            let head = driver.point(eased);
            frame.surface.glow(head, 20.0, Tone::Secondary, 0.6)?;
            frame.surface.dot(head, 3.8, Paint::secondary(1.0))?;
        }

        if phase != FlowPhase::Driver {
            frame.surface.polyline(
                &flight.partial(ease_in_cubic(flight_phase), CURVE_STEPS),
                &Stroke::new(Paint::secondary(0.85), 2.2),
            )?;
            let since_driver = (time.rem_euclid(self.timeline.total()) - self.timeline.phase_start(1)) as f32;
            let shock = (since_driver / (CYCLE_MS as f32 * 0.25)).clamp(0.0, 1.0);
            frame.surface.circle(
                hub,
                input.diagonal() * 0.08 * shock,
                &Stroke::new(Paint::secondary(0.45 * (1.0 - shock)), 2.0),
            )?;
        }

        if burst_phase > 0.0 {
            let diag = input.diagonal();
            let launch = flight.end - hub;
            let launch_angle = launch.y.atan2(launch.x);
            let shock = (burst_phase / 0.45).clamp(0.0, 1.0);
            let rays = ((burst_phase - 0.25) / 0.75).clamp(0.0, 1.0);
            frame.surface.circle(
                flight.end,
                diag * 0.18 * shock,
                &Stroke::new(Paint::secondary(0.6 * (1.0 - shock)), 2.0),
            )?;

            let ray_count = if input.low_power { BURST_RAYS / 2 } else { BURST_RAYS };
            let ray = Stroke::new(Paint::secondary(0.25 + rays * 0.6), 1.4);
            let length = diag * (0.1 + 0.55 * ease_out_quad(rays));
            for i in 0..ray_count {
                let spread = lerp(-0.8, 0.8, i as f32 / (ray_count - 1).max(1) as f32);
                let tip = flight.end + Vec2::from_angle(launch_angle + spread) * length;
                frame.surface.line(flight.end, tip, &ray)?;
            }
            frame
                .surface
                .glow(flight.end, 34.0, Tone::Secondary, 0.2 + rays * 0.35)?;
            frame.surface.glow(hub, 34.0, Tone::Secondary, 0.2 + rays * 0.2)?;
        }
        Ok(())
    }
}
