//! Lumo Canvas
//!
//! Drawing and image types exposed to sandboxed student programs.
//!
//! Features:
//! - `Pixel`: unit-range RGB colors with strict validation
//! - `ImageData`: raw RGBA pixel storage
//! - `Image`: bounds-checked pixel access over an owned buffer
//! - `Canvas`: stroke/fill drawing forwarded to a host `Surface`

mod canvas;
mod image;
mod image_data;
mod pixel;
mod surface;

pub use canvas::Canvas;
pub use image::Image;
pub use image_data::ImageData;
pub use pixel::Pixel;
pub use surface::{Mount, Surface};

/// Canvas and image errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum CanvasError {
    /// A color value failed validation. The message carries the reason.
    #[error("{0}")]
    InvalidPixel(String),

    /// A pixel coordinate fell outside the image.
    #[error("Pixel coordinate ({x}, {y}) is invalid. The image has height {height} and width {width}.")]
    OutOfBounds {
        x: f64,
        y: f64,
        width: u32,
        height: u32,
    },

    /// Image construction was given unusable dimensions or a wrong-sized buffer.
    #[error("Failed to construct image: {0}")]
    InvalidDimensions(String),
}
