//! Rendering module
//!
//! The painter emits a handful of 2D primitives through `Surface`; the
//! browser build backs it with `CanvasRenderingContext2d`.

pub mod painter;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use painter::{paint_brainwave, paint_obstacle_course, theme};

use glam::Vec2;

/// Horizontal anchor for text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Right,
}

/// Minimal 2D drawing target
pub trait Surface {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str);

    fn fill_vertical_gradient(&mut self, w: f32, h: f32, top: &str, bottom: &str);

    /// Stroke a connected line with round joins
    fn stroke_polyline(&mut self, points: &[Vec2], color: &str, width: f32);

    /// Square of edge `size` centred on `center`, rotated by `angle` radians
    fn fill_rotated_square(&mut self, center: Vec2, size: f32, angle: f32, color: &str);

    /// Text with its baseline at `y`
    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, color: &str, align: TextAlign);
}
