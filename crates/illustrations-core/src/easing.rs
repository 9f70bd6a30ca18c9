//! Scalar interpolation, easing curves and curve sampling.

use glam::Vec2;

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_point(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

/// Quadratic ease-in-out, clamped to `[0, 1]`.
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[inline]
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

#[inline]
pub fn ease_in_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * t
}

/// Pulls `t` toward the middle of the unit interval.
///
/// `strength` 0 is the identity; 1 bunches values around 0.5 with a power of
/// 0.45 on each half. Endpoints and the midpoint are fixed.
pub fn warp(t: f32, strength: f32) -> f32 {
    if strength <= 0.0 {
        return t;
    }
    let k = lerp(1.0, 0.45, strength.min(1.0));
    if t < 0.5 {
        0.5 * (t / 0.5).powf(k)
    } else {
        1.0 - 0.5 * ((1.0 - t) / 0.5).powf(k)
    }
}

/// `(time * speed + offset) mod 1`, used for looping pulses.
#[inline]
pub fn looping(time: f64, speed: f64, offset: f64) -> f32 {
    (time * speed + offset).rem_euclid(1.0) as f32
}

/// `time * speed` reduced modulo `period` in `f64` before narrowing.
#[inline]
pub fn wrapped(time: f64, speed: f64, period: f64) -> f32 {
    (time * speed).rem_euclid(period) as f32
}

/// Angle `time * speed` reduced to one turn, for `sin` arguments.
#[inline]
pub fn angle(time: f64, speed: f64) -> f32 {
    wrapped(time, speed, std::f64::consts::TAU)
}

/// Triangle wave in `[0, 1]` with period 2 in `time * speed`.
#[inline]
pub fn ping_pong(time: f64, speed: f64) -> f32 {
    let t = (time * speed).rem_euclid(2.0) as f32;
    if t <= 1.0 {
        t
    } else {
        2.0 - t
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub start: Vec2,
    pub c1: Vec2,
    pub c2: Vec2,
    pub end: Vec2,
}

impl CubicBezier {
    pub fn new(start: Vec2, c1: Vec2, c2: Vec2, end: Vec2) -> Self {
        Self { start, c1, c2, end }
    }

    /// Control points placed at fractions `a` and `b` of the straight chord.
    pub fn along_chord(start: Vec2, end: Vec2, a: f32, b: f32) -> Self {
        Self::new(start, lerp_point(start, end, a), lerp_point(start, end, b), end)
    }

    pub fn point(&self, t: f32) -> Vec2 {
        let u = 1.0 - t;
        let tt = t * t;
        let uu = u * u;
        self.start * (uu * u) + self.c1 * (3.0 * uu * t) + self.c2 * (3.0 * u * tt) + self.end * (tt * t)
    }

    /// Point at `t`, walking the curve end-to-start when `reverse` is set.
    pub fn point_dir(&self, t: f32, reverse: bool) -> Vec2 {
        self.point(if reverse { 1.0 - t } else { t })
    }

    /// `steps + 1` samples covering the curve from 0 to `progress`.
    pub fn partial(&self, progress: f32, steps: usize) -> Vec<Vec2> {
        let steps = steps.max(1);
        (0..=steps)
            .map(|i| self.point(progress * i as f32 / steps as f32))
            .collect()
    }
}

/// Samples a polyline by arc length so motion along it has uniform speed.
#[derive(Clone, Debug)]
pub struct PathSampler {
    points: Vec<Vec2>,
    lengths: Vec<f32>,
    total: f32,
}

impl PathSampler {
    pub fn new(points: Vec<Vec2>) -> Self {
        let lengths: Vec<f32> = points.windows(2).map(|w| w[0].distance(w[1])).collect();
        let total = lengths.iter().sum();
        Self {
            points,
            lengths,
            total,
        }
    }

    pub fn total_length(&self) -> f32 {
        self.total
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn point_at(&self, t: f32) -> Option<Vec2> {
        let mut distance = t.clamp(0.0, 1.0) * self.total;
        for (i, &len) in self.lengths.iter().enumerate() {
            if distance <= len {
                let local = if len == 0.0 { 0.0 } else { distance / len };
                return Some(lerp_point(self.points[i], self.points[i + 1], local));
            }
            distance -= len;
        }
        self.points.last().copied()
    }
}
