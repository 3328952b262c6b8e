//! Image
//!
//! Bounds-checked pixel access over an exclusively owned buffer.

use crate::{CanvasError, ImageData, Mount, Pixel};

/// An image with validated, bounds-checked pixel access. The backing
/// buffer is never shared: `copy` always yields independent storage.
#[derive(Debug, Clone)]
pub struct Image {
    data: ImageData,
}

impl Image {
    /// Wrap decoded or otherwise prepared ImageData.
    pub fn new(data: ImageData) -> Self {
        Self { data }
    }

    /// A zero-initialized (transparent black) image.
    pub fn blank(width: u32, height: u32) -> Result<Self, CanvasError> {
        Ok(Self {
            data: ImageData::new(width, height)?,
        })
    }

    /// An image with every pixel set to `fill`.
    pub fn filled(width: u32, height: u32, fill: Pixel) -> Result<Self, CanvasError> {
        let mut image = Self::blank(width, height)?;
        for x in 0..width {
            for y in 0..height {
                image.set_pixel(x, y, fill)?;
            }
        }
        Ok(image)
    }

    pub fn width(&self) -> u32 {
        self.data.width()
    }

    pub fn height(&self) -> u32 {
        self.data.height()
    }

    /// The backing buffer.
    pub fn data(&self) -> &ImageData {
        &self.data
    }

    fn check_bounds(&self, x: u32, y: u32) -> Result<(), CanvasError> {
        if x >= self.width() || y >= self.height() {
            return Err(CanvasError::OutOfBounds {
                x: f64::from(x),
                y: f64::from(y),
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(())
    }

    /// Read the pixel at `(x, y)`, converting stored bytes back to unit
    /// range.
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<Pixel, CanvasError> {
        self.check_bounds(x, y)?;
        let i = self.data.offset(x, y);
        let bytes = self.data.data();
        Ok(Pixel::from_bytes([bytes[i], bytes[i + 1], bytes[i + 2]]))
    }

    /// Write `pixel` at `(x, y)`. Alpha is forced to 255. Rejection never
    /// mutates the buffer.
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Pixel) -> Result<(), CanvasError> {
        self.check_bounds(x, y)?;
        let i = self.data.offset(x, y);
        let [r, g, b] = pixel.to_bytes();
        let bytes = self.data.data_mut();
        bytes[i] = r;
        bytes[i + 1] = g;
        bytes[i + 2] = b;
        bytes[i + 3] = 255;
        Ok(())
    }

    /// Deep-copy the image pixel by pixel. Copying goes through
    /// `get_pixel`/`set_pixel` rather than a raw byte copy, so the result
    /// round-trips the same validation and quantization as any other write.
    pub fn copy(&self) -> Result<Self, CanvasError> {
        let mut copied = Self::blank(self.width(), self.height())?;
        for x in 0..self.width() {
            for y in 0..self.height() {
                let pixel = self.get_pixel(x, y)?;
                copied.set_pixel(x, y, pixel)?;
            }
        }
        Ok(copied)
    }

    /// Blit the buffer onto the host's visual mount.
    pub fn show(&self, mount: &dyn Mount) {
        mount.blit(&self.data);
    }
}
