//! Branching control paths: a traveler runs up a trunk to one of several
//! branches and back, choosing a different branch on every round trip.

use super::{Frame, Render};
use crate::config::SceneConfig;
use crate::easing::{ease_in_out, wrapped, CubicBezier};
use crate::error::RenderError;
use crate::random::SceneRng;
use crate::surface::{Backdrop, Paint, Stroke, Tone};
use glam::Vec2;

const SEED: u64 = 37;
pub const SEGMENT_MS: f64 = 1400.0;
pub const HOLD_MS: f64 = 180.0;

const BRANCH_TARGETS: [Vec2; 10] = [
    Vec2::new(0.76, 0.14),
    Vec2::new(0.8, 0.22),
    Vec2::new(0.84, 0.3),
    Vec2::new(0.87, 0.38),
    Vec2::new(0.9, 0.46),
    Vec2::new(0.9, 0.54),
    Vec2::new(0.87, 0.62),
    Vec2::new(0.84, 0.7),
    Vec2::new(0.8, 0.78),
    Vec2::new(0.76, 0.86),
];

pub struct BranchScene {
    rng: SceneRng,
    target: usize,
    outbound: bool,
    /// 0 is the trunk leg of the trip, 1 the branch leg.
    segment: usize,
    segment_timer: f64,
    last_time: Option<f64>,
}

impl BranchScene {
    pub fn new(_config: &SceneConfig) -> Self {
        let mut rng = SceneRng::new(SEED);
        let target = rng.index(BRANCH_TARGETS.len());
        Self {
            rng,
            target,
            outbound: true,
            segment: 0,
            segment_timer: 0.0,
            last_time: None,
        }
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn outbound(&self) -> bool {
        self.outbound
    }

    pub fn branch_count(&self) -> usize {
        BRANCH_TARGETS.len()
    }

    fn pick_next_target(&mut self) {
        let n = BRANCH_TARGETS.len();
        let mut next = self.rng.index(n);
        if next == self.target && n > 1 {
            next = (next + 1) % n;
        }
        self.target = next;
    }

    pub fn advance(&mut self, dt: f64) {
        let total = SEGMENT_MS + HOLD_MS;
        self.segment_timer += dt.max(0.0);
        while self.segment_timer >= total {
            self.segment_timer -= total;
            self.segment += 1;
            if self.segment >= 2 {
                self.segment = 0;
                if self.outbound {
                    self.outbound = false;
                } else {
                    self.outbound = true;
                    self.pick_next_target();
                }
            }
        }
    }
}

impl Render for BranchScene {
    fn render(&mut self, frame: &mut Frame<'_>) -> Result<(), RenderError> {
        let input = frame.input;
        let time = input.elapsed;
        frame.begin(Backdrop::at(0.5, 0.72))?;

        let pointer = input.pointer.as_vec2();
        let origin = input.at(0.2, 0.6) + Vec2::new(pointer.x * 6.0, pointer.y * 4.0);
        let fork = input.at(0.52, 0.48);
        let trunk = CubicBezier::along_chord(origin, fork, 0.35, 0.7);
        let branches: Vec<CubicBezier> = BRANCH_TARGETS
            .iter()
            .map(|t| CubicBezier::along_chord(fork, *t * input.size(), 0.4, 0.75))
            .collect();

        let path = Stroke::new(Paint::primary(0.55), 1.2).dashed(3.0, 7.0, -wrapped(time, 0.05, 10.0));
        frame.surface.bezier(&trunk, &path)?;
        for branch in &branches {
            frame.surface.bezier(branch, &path)?;
        }
        frame.surface.dot(origin, 3.2, Paint::primary(1.0))?;
        frame.surface.dot(fork, 3.2, Paint::primary(1.0))?;
        for branch in &branches {
            frame.surface.dot(branch.end, 3.1, Paint::primary(1.0))?;
        }

        let dt = self.last_time.map_or(0.0, |last| (time - last).max(0.0));
        self.last_time = Some(time);
        self.advance(dt);

        let branch = &branches[self.target.min(branches.len() - 1)];
        let (curve, reverse) = match (self.outbound, self.segment) {
            (true, 0) => (&trunk, false),
            (true, _) => (branch, false),
            (false, 0) => (branch, true),
            (false, _) => (&trunk, true),
        };
        let progress = ease_in_out((self.segment_timer / SEGMENT_MS) as f32);
        let head = curve.point_dir(progress, reverse);
        frame.surface.glow(head, 18.0, Tone::Secondary, 0.55)?;
        frame.surface.dot(head, 3.2, Paint::secondary(1.0))?;
        Ok(())
    }
}
