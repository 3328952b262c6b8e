//! Canvas handle
//!
//! The hosted program's view of a drawing canvas: contract-checked draw
//! calls forwarded to the typed canvas.

use std::sync::{Arc, Mutex};

use lumo_canvas::Canvas;

use crate::contract::{arg_check, color_from_value, Kind};
use crate::{StdlibError, Value};

/// A shared canvas handle as held by the hosted program.
#[derive(Clone)]
pub struct CanvasValue {
    inner: Arc<Mutex<Canvas>>,
}

impl std::fmt::Debug for CanvasValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasValue").finish_non_exhaustive()
    }
}

const LINE_SCHEMA: &[Kind] = &[
    Kind::Number,
    Kind::Number,
    Kind::Number,
    Kind::Number,
    Kind::Object,
];
const ARC_SCHEMA: &[Kind] = &[
    Kind::Number,
    Kind::Number,
    Kind::Number,
    Kind::Number,
    Kind::Number,
    Kind::Object,
];
const CIRCLE_SCHEMA: &[Kind] = &[Kind::Number, Kind::Number, Kind::Number, Kind::Object];

impl CanvasValue {
    pub(crate) fn new(canvas: Canvas) -> Self {
        Self {
            inner: Arc::new(Mutex::new(canvas)),
        }
    }

    fn lock(&self, func: &str) -> Result<std::sync::MutexGuard<'_, Canvas>, StdlibError> {
        self.inner
            .lock()
            .map_err(|_| StdlibError::contract(func, "canvas lock poisoned"))
    }

    pub fn width(&self) -> Result<u32, StdlibError> {
        Ok(self.lock("width")?.width())
    }

    pub fn height(&self) -> Result<u32, StdlibError> {
        Ok(self.lock("height")?.height())
    }

    pub fn draw_line(&self, args: &[Value]) -> Result<Value, StdlibError> {
        arg_check("drawLine", args, LINE_SCHEMA)?;
        let color = color_from_value("drawLine", &args[4])?;
        let [x1, y1, x2, y2] = numbers::<4>(args);
        self.lock("drawLine")?.draw_line(x1, y1, x2, y2, color);
        Ok(Value::Undefined)
    }

    pub fn draw_arc(&self, args: &[Value]) -> Result<Value, StdlibError> {
        arg_check("drawArc", args, ARC_SCHEMA)?;
        let color = color_from_value("drawArc", &args[5])?;
        let [x, y, radius, start, end] = numbers::<5>(args);
        self.lock("drawArc")?.draw_arc(x, y, radius, start, end, color);
        Ok(Value::Undefined)
    }

    pub fn draw_circle(&self, args: &[Value]) -> Result<Value, StdlibError> {
        arg_check("drawCircle", args, CIRCLE_SCHEMA)?;
        let color = color_from_value("drawCircle", &args[3])?;
        let [x, y, radius] = numbers::<3>(args);
        self.lock("drawCircle")?.draw_circle(x, y, radius, color);
        Ok(Value::Undefined)
    }

    pub fn draw_filled_circle(&self, args: &[Value]) -> Result<Value, StdlibError> {
        arg_check("drawFilledCircle", args, CIRCLE_SCHEMA)?;
        let color = color_from_value("drawFilledCircle", &args[3])?;
        let [x, y, radius] = numbers::<3>(args);
        self.lock("drawFilledCircle")?
            .draw_filled_circle(x, y, radius, color);
        Ok(Value::Undefined)
    }

    pub fn clear(&self, args: &[Value]) -> Result<Value, StdlibError> {
        arg_check("clear", args, &[])?;
        self.lock("clear")?.clear();
        Ok(Value::Undefined)
    }
}

/// The first `N` arguments as numbers. Callers run `arg_check` first, so
/// the positions are known to hold numbers.
fn numbers<const N: usize>(args: &[Value]) -> [f64; N] {
    let mut out = [0.0f64; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg.as_number().unwrap_or(f64::NAN);
    }
    out
}
