//! Drawing contract between scenes and the host canvas.
//!
//! The browser front end implements [`Surface`] over a 2D canvas context;
//! tests use [`RecordingSurface`]. Every call validates its geometry so a
//! scene that produces NaN or a negative radius fails its render instead of
//! drawing garbage.

use crate::error::SurfaceError;
use glam::Vec2;

/// Palette role; the host maps tones to concrete colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tone {
    /// Green structural lines and dots.
    Primary,
    /// Orange highlights, packets and pulses.
    Secondary,
    /// Pink alternate outcome color.
    Accent,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
    pub tone: Tone,
    pub alpha: f32,
}

impl Paint {
    pub const fn new(tone: Tone, alpha: f32) -> Self {
        Self { tone, alpha }
    }

    pub const fn primary(alpha: f32) -> Self {
        Self::new(Tone::Primary, alpha)
    }

    pub const fn secondary(alpha: f32) -> Self {
        Self::new(Tone::Secondary, alpha)
    }

    pub const fn accent(alpha: f32) -> Self {
        Self::new(Tone::Accent, alpha)
    }

    pub fn alpha_clamped(&self) -> f32 {
        self.alpha.clamp(0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dash {
    pub on: f32,
    pub off: f32,
    pub offset: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub paint: Paint,
    pub width: f32,
    pub dash: Option<Dash>,
}

impl Stroke {
    pub const fn new(paint: Paint, width: f32) -> Self {
        Self {
            paint,
            width,
            dash: None,
        }
    }

    pub const fn dashed(mut self, on: f32, off: f32, offset: f32) -> Self {
        self.dash = Some(Dash { on, off, offset });
        self
    }
}

/// Vertical sky gradient plus a radial glow placed at `glow` (fractions of the
/// surface size).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Backdrop {
    pub glow: Vec2,
    pub glow_tone: Tone,
    pub glow_alpha: f32,
}

impl Backdrop {
    pub const fn at(x: f32, y: f32) -> Self {
        Self {
            glow: Vec2::new(x, y),
            glow_tone: Tone::Primary,
            glow_alpha: 0.35,
        }
    }

    pub const fn alpha(mut self, alpha: f32) -> Self {
        self.glow_alpha = alpha;
        self
    }
}

pub trait Surface {
    /// Resize the backing store and reset the transform to `dpr` scaling.
    fn configure(&mut self, backing_width: u32, backing_height: u32, dpr: f32) -> Result<(), SurfaceError>;
    fn clear(&mut self, width: f32, height: f32);
    fn backdrop(&mut self, width: f32, height: f32, backdrop: &Backdrop) -> Result<(), SurfaceError>;
    fn dot(&mut self, center: Vec2, radius: f32, paint: Paint) -> Result<(), SurfaceError>;
    /// Radial glow fading from `alpha` at the center to transparent at `radius`.
    fn glow(&mut self, center: Vec2, radius: f32, tone: Tone, alpha: f32) -> Result<(), SurfaceError>;
    fn line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke) -> Result<(), SurfaceError>;
    fn polyline(&mut self, points: &[Vec2], stroke: &Stroke) -> Result<(), SurfaceError>;
    fn bezier(&mut self, curve: &crate::easing::CubicBezier, stroke: &Stroke) -> Result<(), SurfaceError>;
    fn circle(&mut self, center: Vec2, radius: f32, stroke: &Stroke) -> Result<(), SurfaceError>;
}

#[inline]
pub fn check_point(op: &'static str, p: Vec2) -> Result<(), SurfaceError> {
    if p.is_finite() {
        Ok(())
    } else {
        Err(SurfaceError::NonFinite(op))
    }
}

#[inline]
pub fn check_radius(op: &'static str, radius: f32) -> Result<(), SurfaceError> {
    if !radius.is_finite() {
        Err(SurfaceError::NonFinite(op))
    } else if radius < 0.0 {
        Err(SurfaceError::NegativeRadius { op, radius })
    } else {
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Configure { width: u32, height: u32, dpr: f32 },
    Clear,
    Backdrop(Backdrop),
    Dot { center: Vec2, radius: f32, paint: Paint },
    Glow { center: Vec2, radius: f32, tone: Tone, alpha: f32 },
    Line { from: Vec2, to: Vec2, stroke: Stroke },
    Polyline { points: Vec<Vec2>, stroke: Stroke },
    Bezier { curve: crate::easing::CubicBezier, stroke: Stroke },
    Circle { center: Vec2, radius: f32, stroke: Stroke },
}

/// In-memory surface that records validated draw calls.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    pub frames: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw commands issued since the most recent `clear`.
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear))
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.commands[start..]
    }

    pub fn circles(&self) -> impl Iterator<Item = (Vec2, f32)> + '_ {
        self.last_frame().iter().filter_map(|c| match c {
            DrawCommand::Circle { center, radius, .. } => Some((*center, *radius)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn configure(&mut self, backing_width: u32, backing_height: u32, dpr: f32) -> Result<(), SurfaceError> {
        self.commands.push(DrawCommand::Configure {
            width: backing_width,
            height: backing_height,
            dpr,
        });
        Ok(())
    }

    fn clear(&mut self, _width: f32, _height: f32) {
        self.frames += 1;
        self.commands.push(DrawCommand::Clear);
    }

    fn backdrop(&mut self, _width: f32, _height: f32, backdrop: &Backdrop) -> Result<(), SurfaceError> {
        check_point("backdrop", backdrop.glow)?;
        self.commands.push(DrawCommand::Backdrop(*backdrop));
        Ok(())
    }

    fn dot(&mut self, center: Vec2, radius: f32, paint: Paint) -> Result<(), SurfaceError> {
        check_point("dot", center)?;
        check_radius("dot", radius)?;
        self.commands.push(DrawCommand::Dot { center, radius, paint });
        Ok(())
    }

    fn glow(&mut self, center: Vec2, radius: f32, tone: Tone, alpha: f32) -> Result<(), SurfaceError> {
        check_point("glow", center)?;
        check_radius("glow", radius)?;
        self.commands.push(DrawCommand::Glow {
            center,
            radius,
            tone,
            alpha,
        });
        Ok(())
    }

    fn line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke) -> Result<(), SurfaceError> {
        check_point("line", from)?;
        check_point("line", to)?;
        self.commands.push(DrawCommand::Line {
            from,
            to,
            stroke: *stroke,
        });
        Ok(())
    }

    fn polyline(&mut self, points: &[Vec2], stroke: &Stroke) -> Result<(), SurfaceError> {
        for p in points {
            check_point("polyline", *p)?;
        }
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            stroke: *stroke,
        });
        Ok(())
    }

    fn bezier(&mut self, curve: &crate::easing::CubicBezier, stroke: &Stroke) -> Result<(), SurfaceError> {
        for p in [curve.start, curve.c1, curve.c2, curve.end] {
            check_point("bezier", p)?;
        }
        self.commands.push(DrawCommand::Bezier {
            curve: *curve,
            stroke: *stroke,
        });
        Ok(())
    }

    fn circle(&mut self, center: Vec2, radius: f32, stroke: &Stroke) -> Result<(), SurfaceError> {
        check_point("circle", center)?;
        check_radius("circle", radius)?;
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            stroke: *stroke,
        });
        Ok(())
    }
}
