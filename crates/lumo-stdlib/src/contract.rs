//! Argument contract
//!
//! Every public entry point declares an ordered schema of expected kinds;
//! a generic validator checks arity and per-position kind before the
//! operation body runs. Faults the operation itself raises pass through
//! untouched — only misuse of the call surface produces contract errors.

use lumo_canvas::{CanvasError, Pixel};

use crate::{StdlibError, Value};

/// Expected argument kind at one schema position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Number,
    Str,
    Object,
    Bool,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Number => "number",
            Kind::Str => "string",
            Kind::Object => "object",
            Kind::Bool => "boolean",
        }
    }
}

/// Check `args` against the ordered `expected` schema for `func`.
/// Arity is checked first, then each position's runtime kind.
pub fn arg_check(func: &str, args: &[Value], expected: &[Kind]) -> Result<(), StdlibError> {
    if args.len() != expected.len() {
        return Err(StdlibError::Arity {
            func: func.to_string(),
            required: expected.len(),
            given: args.len(),
        });
    }
    for (index, (arg, want)) in args.iter().zip(expected).enumerate() {
        let found = arg.kind_name();
        if found != want.name() {
            return Err(StdlibError::Type {
                func: func.to_string(),
                index,
                expected: want.name(),
                found,
            });
        }
    }
    Ok(())
}

/// Method-style arity check (image accessors, `setProperty`).
pub fn method_arity(func: &str, args: &[Value], required: usize) -> Result<(), StdlibError> {
    if args.len() != required {
        return Err(StdlibError::MethodArity {
            func: func.to_string(),
            required,
            given: args.len(),
        });
    }
    Ok(())
}

/// Extract a pixel from a hosted value, with the image-accessor error
/// messages. `func` names the caller in case validation itself faults.
pub fn pixel_from_value(func: &str, value: &Value) -> Result<Pixel, StdlibError> {
    let Some(items) = value.as_array() else {
        return Err(not_a_pixel());
    };
    let items = items
        .lock()
        .map_err(|_| StdlibError::contract(func, "pixel value lock poisoned"))?;
    if items.len() != 3 {
        return Err(not_a_pixel());
    }
    let mut channels = [0.0f64; 3];
    for (slot, item) in channels.iter_mut().zip(items.iter()) {
        // Non-numeric entries become NaN and fail channel validation.
        *slot = item.as_number().unwrap_or(f64::NAN);
    }
    Ok(Pixel::from_channels(&channels)?)
}

fn not_a_pixel() -> StdlibError {
    CanvasError::InvalidPixel("A pixel value must be a 3-element array".to_string()).into()
}

/// Extract a drawing color. Any malformed value reports the single
/// canvas-side message.
pub fn color_from_value(func: &str, value: &Value) -> Result<Pixel, StdlibError> {
    match pixel_from_value(func, value) {
        Ok(pixel) => Ok(pixel),
        Err(StdlibError::Contract { func, detail }) => {
            Err(StdlibError::Contract { func, detail })
        }
        Err(_) => Err(StdlibError::InvalidColor),
    }
}
