//! Grid routing: a packet hops across a lattice toward a fixed destination.

use super::{Frame, Render};
use crate::config::SceneConfig;
use crate::easing::{ease_in_out, lerp, lerp_point};
use crate::error::RenderError;
use crate::random::SceneRng;
use crate::surface::{Backdrop, Paint, Stroke, Tone};
use glam::Vec2;

const ROWS: usize = 6;
const COLS: usize = 10;
const MARGIN: Vec2 = Vec2::new(0.14, 0.2);
const SEED: u64 = 48;

const BURST_MS: f64 = 180.0;
const HOLD_MS: f64 = 90.0;

/// Regular lattice with points stored as fractions of the surface size.
#[derive(Clone, Debug)]
pub struct Lattice {
    rows: usize,
    cols: usize,
    points: Vec<Vec2>,
}

impl Lattice {
    pub fn new(rows: usize, cols: usize, margin: Vec2) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let frac = |i: usize, n: usize| if n == 1 { 0.5 } else { i as f32 / (n - 1) as f32 };
        let mut points = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                points.push(Vec2::new(
                    lerp(margin.x, 1.0 - margin.x, frac(c, cols)),
                    lerp(margin.y, 1.0 - margin.y, frac(r, rows)),
                ));
            }
        }
        Self { rows, cols, points }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    #[inline]
    pub fn row_col(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    pub fn point(&self, index: usize) -> Vec2 {
        self.points[index]
    }

    /// Index of the lattice point closest to `target`; first wins on ties.
    pub fn nearest(&self, target: Vec2) -> usize {
        let mut best = 0;
        let mut best_d = f32::INFINITY;
        for (i, p) in self.points.iter().enumerate() {
            let d = p.distance_squared(target);
            if d < best_d {
                best_d = d;
                best = i;
            }
        }
        best
    }

    /// Neighbours in the 8-connected sense (row and column differ by at most one).
    pub fn adjacent(&self, a: usize, b: usize) -> bool {
        let (ra, ca) = self.row_col(a);
        let (rb, cb) = self.row_col(b);
        a != b && ra.abs_diff(rb) <= 1 && ca.abs_diff(cb) <= 1
    }
}

/// Greedy walk from `start` to `dest`: each step moves the row and the column
/// one unit toward the destination by the sign of the remaining offset.
/// Stops at the destination or after `rows * cols` steps.
pub fn greedy_route(lattice: &Lattice, start: usize, dest: usize) -> Vec<usize> {
    let (tr, tc) = lattice.row_col(dest);
    let mut route = vec![start];
    let mut current = start;
    let mut guard = 0;
    while current != dest && guard < lattice.len() {
        let (r, c) = lattice.row_col(current);
        let step = |from: usize, to: usize| match to.cmp(&from) {
            std::cmp::Ordering::Greater => from + 1,
            std::cmp::Ordering::Less => from - 1,
            std::cmp::Ordering::Equal => from,
        };
        current = lattice.index(step(r, tr), step(c, tc));
        route.push(current);
        guard += 1;
    }
    route
}

pub struct RoutingScene {
    rng: SceneRng,
    lattice: Lattice,
    destination: usize,
    route: Vec<usize>,
    segment: usize,
    segment_timer: f64,
    last_time: Option<f64>,
}

impl RoutingScene {
    pub fn new(_config: &SceneConfig) -> Self {
        let lattice = Lattice::new(ROWS, COLS, MARGIN);
        let destination = lattice.nearest(Vec2::splat(0.5));
        let mut scene = Self {
            rng: SceneRng::new(SEED),
            lattice,
            destination,
            route: Vec::new(),
            segment: 0,
            segment_timer: 0.0,
            last_time: None,
        };
        scene.rebuild_route();
        scene
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn destination(&self) -> usize {
        self.destination
    }

    pub fn route(&self) -> &[usize] {
        &self.route
    }

    pub fn segment(&self) -> usize {
        self.segment
    }

    /// New route from a random start other than the destination.
    pub fn rebuild_route(&mut self) {
        let n = self.lattice.len();
        let mut start = self.rng.index(n);
        if start == self.destination && n > 1 {
            start = (start + 1) % n;
        }
        self.route = greedy_route(&self.lattice, start, self.destination);
        self.segment = 0;
        self.segment_timer = 0.0;
    }

    /// Move the packet along the route; rebuilds once the destination is reached.
    pub fn advance(&mut self, dt: f64) {
        let total = BURST_MS + HOLD_MS;
        self.segment_timer += dt.max(0.0);
        while self.segment_timer >= total {
            self.segment_timer -= total;
            self.segment += 1;
            if self.segment + 1 >= self.route.len() {
                self.rebuild_route();
                break;
            }
        }
    }

    /// Eased progress of the packet across the current segment.
    fn head_progress(&self) -> f32 {
        if self.segment_timer <= BURST_MS {
            ease_in_out((self.segment_timer / BURST_MS) as f32)
        } else {
            1.0
        }
    }
}

impl Render for RoutingScene {
    fn render(&mut self, frame: &mut Frame<'_>) -> Result<(), RenderError> {
        let input = frame.input;
        frame.begin(Backdrop {
            glow: Vec2::new(0.55, 0.62),
            glow_tone: Tone::Primary,
            glow_alpha: 0.18,
        })?;

        let shift = Vec2::new(input.pointer.x * 6.0, input.pointer.y * 5.0);
        let size = input.size();
        let place = |p: Vec2| p * size + shift;

        for (i, p) in self.lattice.points.iter().enumerate() {
            if i == self.destination {
                continue;
            }
            frame.surface.dot(place(*p), 2.1, Paint::primary(0.65))?;
        }

        let time = input.elapsed;
        let dt = self.last_time.map_or(0.0, |last| (time - last).max(0.0));
        self.last_time = Some(time);
        self.advance(dt);

        if self.route.len() > 1 {
            let from = place(self.lattice.point(self.route[self.segment]));
            let to = place(self.lattice.point(self.route[self.segment + 1]));
            let head = lerp_point(from, to, self.head_progress());

            let mut trail: Vec<Vec2> = self.route[..=self.segment]
                .iter()
                .map(|&i| place(self.lattice.point(i)))
                .collect();
            trail.push(head);
            frame
                .surface
                .polyline(&trail, &Stroke::new(Paint::secondary(0.5), 1.6))?;
            frame.surface.glow(head, 14.0, Tone::Secondary, 0.4)?;
            frame.surface.dot(head, 3.0, Paint::secondary(1.0))?;
        }

        let dest = place(self.lattice.point(self.destination));
        let pulse = 0.5 + 0.5 * (time * 0.0022).sin() as f32;
        frame
            .surface
            .glow(dest, 20.0 + pulse * 8.0, Tone::Secondary, 0.55)?;
        frame.surface.dot(dest, 3.6, Paint::secondary(1.0))?;
        Ok(())
    }
}
