//! Canvas
//!
//! Stroke/fill drawing forwarded to a host surface.

use std::f64::consts::PI;

use crate::{Pixel, Surface};

/// A drawing canvas. Headless construction yields no surface; draw calls
/// then validate and no-op.
pub struct Canvas {
    width: u32,
    height: u32,
    surface: Option<Box<dyn Surface>>,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("interactive", &self.surface.is_some())
            .finish()
    }
}

impl Canvas {
    /// Create a canvas over `surface`. An interactive surface starts out
    /// cleared to white.
    pub fn new(width: u32, height: u32, surface: Option<Box<dyn Surface>>) -> Self {
        let mut canvas = Self {
            width,
            height,
            surface,
        };
        if let Some(surface) = canvas.surface.as_mut() {
            surface.clear_white();
        }
        canvas
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Draw a line from `(x1, y1)` to `(x2, y2)`.
    pub fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Pixel) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.set_stroke_color(&color.to_hex());
        surface.begin_path();
        surface.move_to(x1, y1);
        surface.line_to(x2, y2);
        surface.stroke();
    }

    /// Draw an arc centered at `(x, y)` from `start` to `end` radians.
    pub fn draw_arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64, color: Pixel) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.set_stroke_color(&color.to_hex());
        surface.begin_path();
        surface.arc(x, y, radius, start, end);
        surface.stroke();
    }

    /// Draw a full circle outline.
    pub fn draw_circle(&mut self, x: f64, y: f64, radius: f64, color: Pixel) {
        self.draw_arc(x, y, radius, 0.0, 2.0 * PI, color);
    }

    /// Draw a filled circle.
    pub fn draw_filled_circle(&mut self, x: f64, y: f64, radius: f64, color: Pixel) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.begin_path();
        surface.arc(x, y, radius, 0.0, 2.0 * PI);
        surface.set_fill_color(&color.to_hex());
        surface.fill();
    }

    /// Clear the canvas back to white.
    pub fn clear(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.clear_white();
    }
}
