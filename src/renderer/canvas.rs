//! Canvas 2D backend

use glam::Vec2;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Surface, TextAlign};

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Grab the 2D context of `canvas`
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        ctx.set_image_smoothing_enabled(true);
        Ok(Self { ctx })
    }
}

impl Surface for CanvasSurface {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_vertical_gradient(&mut self, w: f32, h: f32, top: &str, bottom: &str) {
        let grad = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, h as f64);
        let _ = grad.add_color_stop(0.0, top);
        let _ = grad.add_color_stop(1.0, bottom);
        self.ctx.set_fill_style_canvas_gradient(&grad);
        self.ctx.fill_rect(0.0, 0.0, w as f64, h as f64);
    }

    fn stroke_polyline(&mut self, points: &[Vec2], color: &str, width: f32) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.set_line_width(width as f64);
        self.ctx.set_line_join("round");
        self.ctx.set_line_cap("round");
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.set_stroke_style_str(color);
        self.ctx.stroke();
    }

    fn fill_rotated_square(&mut self, center: Vec2, size: f32, angle: f32, color: &str) {
        let half = size as f64 / 2.0;
        self.ctx.save();
        let _ = self.ctx.translate(center.x as f64, center.y as f64);
        let _ = self.ctx.rotate(angle as f64);
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(-half, -half, size as f64, size as f64);
        self.ctx.restore();
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, color: &str, align: TextAlign) {
        self.ctx.save();
        self.ctx.set_text_align(match align {
            TextAlign::Left => "left",
            TextAlign::Right => "right",
        });
        self.ctx.set_text_baseline("bottom");
        self.ctx.set_font(font);
        self.ctx.set_fill_style_str(color);
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
        self.ctx.restore();
    }
}
