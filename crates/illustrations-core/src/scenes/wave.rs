//! Precision ridge: a row of posts along a travelling sine, with a focus dot
//! sweeping back and forth.

use super::{Frame, Render};
use crate::config::SceneConfig;
use crate::easing::{angle, lerp, ping_pong};
use crate::error::RenderError;
use crate::surface::{Backdrop, Paint, Stroke, Tone};
use glam::Vec2;
use std::f32::consts::TAU;

pub const POST_COUNT: usize = 52;
const FOCUS_SPEED: f64 = 0.00022;

pub struct WaveScene {
    posts: usize,
}

impl WaveScene {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            posts: config.particles_or(POST_COUNT).max(2),
        }
    }

    pub fn posts(&self) -> usize {
        self.posts
    }
}

impl Render for WaveScene {
    fn render(&mut self, frame: &mut Frame<'_>) -> Result<(), RenderError> {
        let input = frame.input;
        let (w, h) = (input.width, input.height);
        let time = input.elapsed;
        frame.begin(Backdrop::at(0.55, 0.72))?;

        let (start_x, end_x) = (-w * 0.1, w * 1.1);
        let base_y = h * 0.62;
        let amplitude = h * 0.18;
        let travel = angle(time, 0.0006);
        let ridge = |t: f32| {
            Vec2::new(
                lerp(start_x, end_x, t),
                base_y - (t * TAU * 1.1 + travel).sin() * amplitude,
            )
        };

        let post = Stroke::new(Paint::primary(0.35), 1.0);
        let mut crest = Vec::with_capacity(self.posts);
        for i in 0..self.posts {
            let top = ridge(i as f32 / (self.posts - 1) as f32);
            frame
                .surface
                .line(top, top + Vec2::new(0.0, h * 0.28), &post)?;
            frame.surface.dot(top, 2.1, Paint::secondary(0.85))?;
            crest.push(top);
        }
        frame
            .surface
            .polyline(&crest, &Stroke::new(Paint::primary(0.6), 1.6))?;

        let focus = ridge(ping_pong(time, FOCUS_SPEED));
        frame.surface.glow(focus, 24.0, Tone::Secondary, 0.55)?;
        frame.surface.dot(focus, 3.4, Paint::secondary(1.0))?;
        Ok(())
    }
}
