//! Values
//!
//! The dynamic value type crossing the hosted-program boundary. Sandbox
//! programs are untyped; every argument and result of the call surface is
//! one of these.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::{CanvasValue, ImageValue};

/// Shared object storage. Objects have reference semantics, as the hosted
/// language expects: `set_property` through one handle is visible through
/// every other.
pub type ObjectRef = Arc<Mutex<BTreeMap<String, Value>>>;

/// Shared array storage.
pub type ArrayRef = Arc<Mutex<Vec<Value>>>;

/// A value in the hosted program.
#[derive(Debug, Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Array(ArrayRef),
    Object(ObjectRef),
    Canvas(CanvasValue),
    Image(ImageValue),
}

impl Value {
    /// Build an object from key/value entries.
    pub fn object<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        Self::Object(Arc::new(Mutex::new(entries.into_iter().collect())))
    }

    /// Build an array from items.
    pub fn array(items: Vec<Value>) -> Self {
        Self::Array(Arc::new(Mutex::new(items)))
    }

    /// The hosted language's runtime kind name, as reported in contract
    /// errors. `Null` reports "object", as do arrays and the wrapped
    /// canvas/image handles.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Null
            | Value::Array(_)
            | Value::Object(_)
            | Value::Canvas(_)
            | Value::Image(_) => "object",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_canvas(&self) -> Option<&CanvasValue> {
        match self {
            Value::Canvas(canvas) => Some(canvas),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageValue> {
        match self {
            Value::Image(image) => Some(image),
            _ => None,
        }
    }

    /// Convert parsed JSON into a hosted value.
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::array(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Value::object(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from_json(value))),
            ),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}
