//! Image handle
//!
//! The hosted program's view of an image: method-style accessors over the
//! owned pixel buffer, checked at the dynamic boundary.

use std::sync::{Arc, Mutex};

use lumo_canvas::{CanvasError, Image, Mount};

use crate::contract::{method_arity, pixel_from_value};
use crate::{StdlibError, Value};

/// A shared image handle as held by the hosted program. The pixel buffer
/// itself is owned by exactly one image; `copy` yields a handle to fresh
/// storage.
#[derive(Clone)]
pub struct ImageValue {
    inner: Arc<Mutex<Image>>,
    mount: Option<Arc<dyn Mount>>,
}

impl std::fmt::Debug for ImageValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageValue")
            .field("image", &self.inner)
            .field("interactive", &self.mount.is_some())
            .finish()
    }
}

impl ImageValue {
    pub(crate) fn new(image: Image, mount: Option<Arc<dyn Mount>>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(image)),
            mount,
        }
    }

    fn lock(&self, func: &str) -> Result<std::sync::MutexGuard<'_, Image>, StdlibError> {
        self.inner
            .lock()
            .map_err(|_| StdlibError::contract(func, "image lock poisoned"))
    }

    pub fn width(&self) -> Result<u32, StdlibError> {
        Ok(self.lock("width")?.width())
    }

    pub fn height(&self) -> Result<u32, StdlibError> {
        Ok(self.lock("height")?.height())
    }

    /// `.getPixel(x, y)` at the dynamic boundary: exactly two arguments,
    /// integer coordinates inside the image.
    pub fn get_pixel(&self, args: &[Value]) -> Result<Value, StdlibError> {
        method_arity(".getPixel", args, 2)?;
        let image = self.lock(".getPixel")?;
        let (x, y) = coords(&args[0], &args[1], &image)?;
        let pixel = image.get_pixel(x, y)?;
        Ok(Value::array(
            pixel.channels().iter().map(|&c| Value::Number(c)).collect(),
        ))
    }

    /// `.setPixel(x, y, pixel)` at the dynamic boundary.
    pub fn set_pixel(&self, args: &[Value]) -> Result<Value, StdlibError> {
        method_arity(".setPixel", args, 3)?;
        let mut image = self.lock(".setPixel")?;
        let (x, y) = coords(&args[0], &args[1], &image)?;
        let pixel = pixel_from_value(".setPixel", &args[2])?;
        image.set_pixel(x, y, pixel)?;
        Ok(Value::Undefined)
    }

    /// Deep-copy into an independent handle.
    pub fn copy(&self) -> Result<Value, StdlibError> {
        let copied = self.lock("copy")?.copy()?;
        Ok(Value::Image(ImageValue::new(copied, self.mount.clone())))
    }

    /// Blit onto the visual mount. Headless handles no-op.
    pub fn show(&self) -> Result<(), StdlibError> {
        let Some(mount) = self.mount.as_ref() else {
            return Ok(());
        };
        self.lock("show")?.show(mount.as_ref());
        Ok(())
    }

}

/// Resolve a coordinate pair against the image bounds. Non-numeric or
/// fractional coordinates are invalid, not truncated.
fn coords(x: &Value, y: &Value, image: &Image) -> Result<(u32, u32), StdlibError> {
    let xf = x.as_number().unwrap_or(f64::NAN);
    let yf = y.as_number().unwrap_or(f64::NAN);
    let in_range = |v: f64, limit: u32| v.fract() == 0.0 && v >= 0.0 && v < f64::from(limit);
    if !in_range(xf, image.width()) || !in_range(yf, image.height()) {
        return Err(CanvasError::OutOfBounds {
            x: xf,
            y: yf,
            width: image.width(),
            height: image.height(),
        }
        .into());
    }
    Ok((xf as u32, yf as u32))
}
