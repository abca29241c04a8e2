//! Drawing seam between the simulation and the browser canvas.
//!
//! The field renders through [`Surface`] so the drawing rules can be checked
//! natively with [`Recording`]; the browser implementation lives in `canvas.rs`.

use glam::DVec2;

pub const BACKGROUND: &str = "#020617";

/// White at a given alpha; the whole scene is drawn in shades of white.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub fn white(alpha: f64) -> Self {
        Self { r: 255, g: 255, b: 255, a: alpha.clamp(0.0, 1.0) }
    }

    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

pub trait Surface {
    fn clear(&mut self, color: &str, size: DVec2);
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba);
    /// `dash` is a canvas line-dash pattern; empty means solid.
    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba, dash: &[f64]);
}

/// Draw call captured by [`Recording`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear { color: String },
    Circle { center: DVec2, radius: f64, color: Rgba },
    Line { from: DVec2, to: DVec2, width: f64, color: Rgba, dashed: bool },
}

/// In-memory surface that records what was drawn.
#[derive(Clone, Debug, Default)]
pub struct Recording {
    pub ops: Vec<DrawOp>,
}

impl Recording {
    pub fn circles(&self) -> impl Iterator<Item = (&DVec2, f64, &Rgba)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Circle { center, radius, color } => Some((center, *radius, color)),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawOp> + '_ {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Line { .. }))
    }
}

impl Surface for Recording {
    fn clear(&mut self, color: &str, _size: DVec2) {
        self.ops.push(DrawOp::Clear { color: color.to_string() });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.ops.push(DrawOp::Circle { center, radius, color });
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba, dash: &[f64]) {
        self.ops.push(DrawOp::Line { from, to, width, color, dashed: !dash.is_empty() });
    }
}
