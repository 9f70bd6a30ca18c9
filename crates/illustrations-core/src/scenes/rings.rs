//! Elastic rings: concentric circles make room for a focal dot that follows
//! the pointer, or an autopilot path when the pointer is away.

use super::{Frame, Layout, Render};
use crate::config::SceneConfig;
use crate::error::RenderError;
use crate::surface::{Backdrop, Paint, Stroke, Tone};
use glam::Vec2;

pub const RING_COUNT: usize = 9;
/// Fraction of the remaining distance each ring covers per frame.
pub const RELAXATION: f32 = 0.12;
const REACH: f32 = 0.18;

/// Size-derived ring parameters; rebuilt whenever the surface size changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingGeometry {
    pub size: Vec2,
    pub center: Vec2,
    pub min_radius: f32,
    pub ring_gap: f32,
    pub min_gap: f32,
    pub dot_padding: f32,
    pub influence_band: f32,
}

impl RingGeometry {
    pub fn new(size: Vec2, center_ratio: Vec2, fill_ratio: f32, count: usize) -> Self {
        let min_dim = size.x.min(size.y);
        let max_radius = size.x.hypot(size.y) * 0.5 * fill_ratio;
        let min_radius = min_dim * 0.08;
        let steps = count.saturating_sub(1).max(1) as f32;
        let ring_gap = ((max_radius - min_radius) / steps).max(1.0);
        Self {
            size,
            center: size * center_ratio,
            min_radius,
            ring_gap,
            min_gap: ring_gap * 0.65,
            dot_padding: ring_gap * 0.4 + 6.0,
            influence_band: ring_gap * 2.2,
        }
    }

    #[inline]
    pub fn base_radius(&self, i: usize) -> f32 {
        self.min_radius + self.ring_gap * i as f32
    }
}

/// Ring radii, innermost first. Every frame keeps
/// `radii[i] >= radii[i - 1] + min_gap`.
#[derive(Clone, Debug, Default)]
pub struct RingSet {
    radii: Vec<f32>,
}

impl RingSet {
    pub fn new(count: usize) -> Self {
        Self {
            radii: vec![0.0; count],
        }
    }

    pub fn radii(&self) -> &[f32] {
        &self.radii
    }

    pub fn reset(&mut self, geometry: &RingGeometry) {
        for (i, r) in self.radii.iter_mut().enumerate() {
            *r = geometry.base_radius(i);
        }
    }

    /// One relaxation step toward the per-ring targets for a focal point at
    /// `desired_dist` from the center.
    pub fn relax(&mut self, geometry: &RingGeometry, desired_dist: f32, time: f64) {
        let gap = geometry.ring_gap;
        for i in 0..self.radii.len() {
            let base = geometry.base_radius(i);
            let phase = i as f64;
            let float = (time * 0.0003 + phase * 1.4).sin() as f32 * gap * 0.08
                + (time * 0.00017 + phase * 0.9).cos() as f32 * gap * 0.05;
            let delta = desired_dist - base;
            let influence = (1.0 - delta.abs() / geometry.influence_band).clamp(0.0, 1.0);
            let mut target = base + float + delta * influence * 0.25;

            if i == 0 {
                target = target.max(desired_dist + geometry.dot_padding);
            } else {
                target = target.max(self.radii[i - 1] + geometry.min_gap);
            }
            self.radii[i] += (target - self.radii[i]) * RELAXATION;
            if i > 0 {
                self.radii[i] = self.radii[i].max(self.radii[i - 1] + geometry.min_gap);
            }
        }
    }

    pub fn is_ordered(&self, min_gap: f32) -> bool {
        self.radii
            .windows(2)
            .all(|w| w[1] >= w[0] + min_gap - min_gap.abs() * 1e-5)
    }

    /// Focal dot position: the desired point pulled inside the innermost ring.
    pub fn focal_point(&self, geometry: &RingGeometry, desired: Vec2) -> Vec2 {
        let offset = desired - geometry.center;
        let dist = offset.length();
        let inner = self.radii.first().copied().unwrap_or(0.0);
        let max_dist = (inner - geometry.dot_padding).max(0.0);
        if dist > 0.0 {
            geometry.center + offset * (dist.min(max_dist) / dist)
        } else {
            geometry.center
        }
    }
}

/// Lissajous drift used while the pointer is outside the container.
pub fn autopilot(time: f64) -> Vec2 {
    let phase = time * 0.0007;
    Vec2::new(
        (phase.sin() * 0.85) as f32,
        ((phase * 0.9 + 1.2).cos() * 0.7) as f32,
    )
}

pub struct RingsScene {
    rings: RingSet,
    geometry: Option<RingGeometry>,
    center_ratio: Vec2,
    fill_ratio: f32,
}

impl RingsScene {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            rings: RingSet::new(RING_COUNT),
            geometry: None,
            center_ratio: config.center,
            fill_ratio: config.fill_ratio,
        }
    }

    pub fn rings(&self) -> &RingSet {
        &self.rings
    }

    pub fn geometry(&self) -> Option<&RingGeometry> {
        self.geometry.as_ref()
    }

    fn layout(&mut self, size: Vec2) -> RingGeometry {
        let geometry = RingGeometry::new(size, self.center_ratio, self.fill_ratio, RING_COUNT);
        self.rings.reset(&geometry);
        self.geometry = Some(geometry);
        geometry
    }
}

impl Render for RingsScene {
    fn on_resize(&mut self, layout: &Layout) {
        self.layout(Vec2::new(layout.width, layout.height));
    }

    fn render(&mut self, frame: &mut Frame<'_>) -> Result<(), RenderError> {
        let input = frame.input;
        frame.begin(Backdrop::at(0.5, 0.62))?;

        let size = input.size();
        let geometry = match self.geometry {
            Some(g) if g.size == size => g,
            _ => self.layout(size),
        };

        let time = input.elapsed;
        let motion = if input.pointer.active {
            input.pointer.as_vec2()
        } else {
            autopilot(time)
        };
        let desired = geometry.center + motion * size * REACH;
        let desired_dist = desired.distance(geometry.center);

        self.rings.relax(&geometry, desired_dist, time);
        let dot = self.rings.focal_point(&geometry, desired);

        for (i, &radius) in self.rings.radii().iter().enumerate() {
            let alpha = (0.22 + i as f32 * 0.03).min(0.55);
            frame
                .surface
                .circle(geometry.center, radius, &Stroke::new(Paint::primary(alpha), 1.1))?;
        }

        let pulse = 0.5 + 0.5 * (time * 0.0012).sin() as f32;
        frame.surface.glow(dot, 46.0 + pulse * 8.0, Tone::Secondary, 0.22)?;
        frame.surface.dot(dot, 4.2, Paint::secondary(1.0))?;
        Ok(())
    }
}
