use glam::Vec2;
use illustrations_core::easing::CubicBezier;
use illustrations_core::{check_point, check_radius, Backdrop, Paint, Stroke, Surface, SurfaceError, Tone};
use std::f64::consts::TAU;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

mod palette;

pub use palette::{Palette, Rgb};

/// [`Surface`] over a 2D canvas context.
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    palette: Rc<Palette>,
}

fn backend(op: &'static str, e: JsValue) -> SurfaceError {
    SurfaceError::Backend {
        op,
        message: format!("{:?}", e),
    }
}

impl CanvasSurface {
    /// Acquire the 2D context of `canvas`; `None` when the browser refuses.
    pub fn new(canvas: web::HtmlCanvasElement, palette: Rc<Palette>) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .ok()?;
        ctx.set_line_cap("round");
        ctx.set_line_join("round");
        Some(Self { canvas, ctx, palette })
    }

    #[inline]
    fn color(&self, tone: Tone, alpha: f32) -> JsValue {
        JsValue::from_str(&self.palette.tone(tone).rgba(alpha))
    }

    fn apply_stroke(&self, stroke: &Stroke) -> Result<(), SurfaceError> {
        self.ctx
            .set_stroke_style(&self.color(stroke.paint.tone, stroke.paint.alpha_clamped()));
        self.ctx.set_line_width(stroke.width as f64);
        let dash = js_sys::Array::new();
        if let Some(d) = stroke.dash {
            dash.push(&JsValue::from_f64(d.on as f64));
            dash.push(&JsValue::from_f64(d.off as f64));
            self.ctx.set_line_dash_offset(d.offset as f64);
        } else {
            self.ctx.set_line_dash_offset(0.0);
        }
        self.ctx
            .set_line_dash(&dash)
            .map_err(|e| backend("line dash", e))
    }

    fn fill_radial(&self, center: Vec2, radius: f32, tone: Tone, alpha: f32) -> Result<(), SurfaceError> {
        let (x, y, r) = (center.x as f64, center.y as f64, radius as f64);
        let gradient = self
            .ctx
            .create_radial_gradient(x, y, 0.0, x, y, r)
            .map_err(|e| backend("glow", e))?;
        let rgb = self.palette.tone(tone);
        gradient
            .add_color_stop(0.0, &rgb.rgba(alpha))
            .map_err(|e| backend("glow", e))?;
        gradient
            .add_color_stop(1.0, &rgb.rgba(0.0))
            .map_err(|e| backend("glow", e))?;
        self.ctx.set_fill_style(gradient.as_ref());
        self.ctx.begin_path();
        self.ctx
            .arc(x, y, r, 0.0, TAU)
            .map_err(|e| backend("glow", e))?;
        self.ctx.fill();
        Ok(())
    }
}

impl Surface for CanvasSurface {
    fn configure(&mut self, backing_width: u32, backing_height: u32, dpr: f32) -> Result<(), SurfaceError> {
        self.canvas.set_width(backing_width);
        self.canvas.set_height(backing_height);
        let d = dpr as f64;
        self.ctx
            .set_transform(d, 0.0, 0.0, d, 0.0, 0.0)
            .map_err(|e| backend("configure", e))?;
        // Resizing the backing store resets context state.
        self.ctx.set_line_cap("round");
        self.ctx.set_line_join("round");
        Ok(())
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn backdrop(&mut self, width: f32, height: f32, backdrop: &Backdrop) -> Result<(), SurfaceError> {
        check_point("backdrop", backdrop.glow)?;
        let (w, h) = (width as f64, height as f64);
        let sky = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
        sky.add_color_stop(0.0, &self.palette.sky_top.rgba(1.0))
            .map_err(|e| backend("backdrop", e))?;
        sky.add_color_stop(1.0, &self.palette.sky_bottom.rgba(1.0))
            .map_err(|e| backend("backdrop", e))?;
        self.ctx.set_fill_style(sky.as_ref());
        self.ctx.fill_rect(0.0, 0.0, w, h);

        let (gx, gy) = (w * backdrop.glow.x as f64, h * backdrop.glow.y as f64);
        let warm = self
            .ctx
            .create_radial_gradient(gx, gy, 0.0, gx, gy, h * 0.7)
            .map_err(|e| backend("backdrop", e))?;
        let rgb = self.palette.tone(backdrop.glow_tone);
        warm.add_color_stop(0.0, &rgb.rgba(backdrop.glow_alpha))
            .map_err(|e| backend("backdrop", e))?;
        warm.add_color_stop(1.0, &rgb.rgba(0.0))
            .map_err(|e| backend("backdrop", e))?;
        self.ctx.set_fill_style(warm.as_ref());
        self.ctx.fill_rect(0.0, 0.0, w, h);
        Ok(())
    }

    fn dot(&mut self, center: Vec2, radius: f32, paint: Paint) -> Result<(), SurfaceError> {
        check_point("dot", center)?;
        check_radius("dot", radius)?;
        self.ctx.set_fill_style(&self.color(paint.tone, paint.alpha_clamped()));
        self.ctx.begin_path();
        self.ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            .map_err(|e| backend("dot", e))?;
        self.ctx.fill();
        Ok(())
    }

    fn glow(&mut self, center: Vec2, radius: f32, tone: Tone, alpha: f32) -> Result<(), SurfaceError> {
        check_point("glow", center)?;
        check_radius("glow", radius)?;
        if radius == 0.0 {
            return Ok(());
        }
        self.fill_radial(center, radius, tone, alpha)
    }

    fn line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke) -> Result<(), SurfaceError> {
        check_point("line", from)?;
        check_point("line", to)?;
        self.apply_stroke(stroke)?;
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
        Ok(())
    }

    fn polyline(&mut self, points: &[Vec2], stroke: &Stroke) -> Result<(), SurfaceError> {
        for p in points {
            check_point("polyline", *p)?;
        }
        let Some((first, rest)) = points.split_first() else {
            return Ok(());
        };
        self.apply_stroke(stroke)?;
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.stroke();
        Ok(())
    }

    fn bezier(&mut self, curve: &CubicBezier, stroke: &Stroke) -> Result<(), SurfaceError> {
        for p in [curve.start, curve.c1, curve.c2, curve.end] {
            check_point("bezier", p)?;
        }
        self.apply_stroke(stroke)?;
        self.ctx.begin_path();
        self.ctx.move_to(curve.start.x as f64, curve.start.y as f64);
        self.ctx.bezier_curve_to(
            curve.c1.x as f64,
            curve.c1.y as f64,
            curve.c2.x as f64,
            curve.c2.y as f64,
            curve.end.x as f64,
            curve.end.y as f64,
        );
        self.ctx.stroke();
        Ok(())
    }

    fn circle(&mut self, center: Vec2, radius: f32, stroke: &Stroke) -> Result<(), SurfaceError> {
        check_point("circle", center)?;
        check_radius("circle", radius)?;
        self.apply_stroke(stroke)?;
        self.ctx.begin_path();
        self.ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            .map_err(|e| backend("circle", e))?;
        self.ctx.stroke();
        Ok(())
    }
}
