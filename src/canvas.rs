//! `Surface` backed by a browser 2d canvas context.

use glam::DVec2;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::render::{Rgba, Surface};

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    fn set_dash(&self, dash: &[f64]) {
        let pattern = js_sys::Array::new();
        for d in dash {
            pattern.push(&JsValue::from_f64(*d));
        }
        self.ctx.set_line_dash(&pattern).ok();
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, color: &str, size: DVec2) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(0.0, 0.0, size.x, size.y);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.ctx.begin_path();
        if self.ctx.arc(center.x, center.y, radius.max(0.0), 0.0, std::f64::consts::TAU).is_err() {
            return;
        }
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba, dash: &[f64]) {
        if !dash.is_empty() {
            self.set_dash(dash);
        }
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(width);
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
        if !dash.is_empty() {
            self.set_dash(&[]);
        }
    }
}
