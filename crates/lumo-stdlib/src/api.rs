//! Call surface
//!
//! The library facade handed to the sandbox runner. Every entry point is
//! contract-checked; the suspending ones take the program's
//! [`RunnerHandle`] explicitly.

use std::sync::Arc;

use lumo_canvas::{Canvas, Image, Mount};
use lumo_net::{HttpTransport, Session, Transport};
use lumo_runtime::RunnerHandle;

use crate::adapters::{self, DEFAULT_IMAGE_SIZE};
use crate::contract::{arg_check, method_arity, pixel_from_value, Kind};
use crate::host::Host;
use crate::{CanvasValue, ImageValue, StdlibError, Value};

/// Library configuration: the resource-proxy base URL and the ambient
/// session identifiers.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub base_url: String,
    pub session: Option<Session>,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    base_url: String,
    session: Option<Session>,
}

impl ConfigBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn session(mut self, user: impl Into<String>, id: impl Into<String>) -> Self {
        self.session = Some(Session::new(user, id));
        self
    }

    pub fn build(self) -> Config {
        Config {
            base_url: self.base_url,
            session: self.session,
        }
    }
}

/// The standard library exposed to one sandbox session.
pub struct Library {
    config: Config,
    host: Option<Host>,
    transport: Arc<dyn Transport>,
}

impl Library {
    /// A library with the default HTTP transport and no interactive host
    /// (headless).
    pub fn new(config: Config) -> Self {
        Self {
            config,
            host: None,
            transport: Arc::new(HttpTransport::new()),
        }
    }

    /// Attach the interactive host surfaces.
    pub fn with_host(mut self, host: Host) -> Self {
        self.host = Some(host);
        self
    }

    /// Substitute the network transport.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    fn interactive(&self) -> bool {
        self.host.is_some()
    }

    fn mount(&self) -> Option<Arc<dyn Mount>> {
        self.host.as_ref().map(|host| host.mount.clone())
    }

    /// `newCanvas(width, height)` — a blank white canvas appended to the
    /// visual mount.
    pub fn new_canvas(&self, args: &[Value]) -> Result<Value, StdlibError> {
        arg_check("newCanvas", args, &[Kind::Number, Kind::Number])?;
        let width = dimension(&args[0]);
        let height = dimension(&args[1]);
        let surface = self
            .host
            .as_ref()
            .map(|host| host.mount.new_surface(width, height));
        Ok(Value::Canvas(CanvasValue::new(Canvas::new(
            width, height, surface,
        ))))
    }

    /// `createImage(width, height, fill)` — every pixel set to `fill`.
    /// The fill is validated before the buffer is allocated.
    pub fn create_image(&self, args: &[Value]) -> Result<Value, StdlibError> {
        arg_check(
            "createImage",
            args,
            &[Kind::Number, Kind::Number, Kind::Object],
        )?;
        let fill = pixel_from_value("createImage", &args[2])?;
        let image = Image::filled(dimension(&args[0]), dimension(&args[1]), fill)?;
        Ok(Value::Image(ImageValue::new(image, self.mount())))
    }

    /// `getProperty(object, key)` — `{found, value?}`.
    pub fn get_property(&self, args: &[Value]) -> Result<Value, StdlibError> {
        arg_check("getProperty", args, &[Kind::Object, Kind::Str])?;
        let key = args[1].as_str().unwrap_or_default();
        let looked_up = match &args[0] {
            Value::Object(map) => {
                let map = map
                    .lock()
                    .map_err(|_| StdlibError::contract("getProperty", "object lock poisoned"))?;
                map.get(key).cloned()
            }
            Value::Array(items) => {
                let items = items
                    .lock()
                    .map_err(|_| StdlibError::contract("getProperty", "object lock poisoned"))?;
                key.parse::<usize>().ok().and_then(|i| items.get(i).cloned())
            }
            _ => return Err(StdlibError::contract("getProperty", "value has no properties")),
        };
        Ok(match looked_up {
            Some(value) => Value::object(vec![
                ("found".to_string(), Value::Bool(true)),
                ("value".to_string(), value),
            ]),
            None => Value::object(vec![("found".to_string(), Value::Bool(false))]),
        })
    }

    /// `setProperty(object, key, value)`.
    pub fn set_property(&self, args: &[Value]) -> Result<Value, StdlibError> {
        method_arity("setProperty", args, 3)?;
        arg_check("setProperty", &args[..2], &[Kind::Object, Kind::Str])?;
        let key = args[1].as_str().unwrap_or_default();
        match &args[0] {
            Value::Object(map) => {
                let mut map = map
                    .lock()
                    .map_err(|_| StdlibError::contract("setProperty", "object lock poisoned"))?;
                map.insert(key.to_string(), args[2].clone());
            }
            Value::Array(items) => {
                let mut items = items
                    .lock()
                    .map_err(|_| StdlibError::contract("setProperty", "object lock poisoned"))?;
                match key.parse::<usize>().ok().filter(|&i| i < items.len()) {
                    Some(i) => items[i] = args[2].clone(),
                    None => {
                        return Err(StdlibError::contract(
                            "setProperty",
                            format!("index {key} is out of range"),
                        ))
                    }
                }
            }
            _ => return Err(StdlibError::contract("setProperty", "value has no properties")),
        }
        Ok(Value::Undefined)
    }

    /// `sleep(ms)` — suspends for the given duration. Headless execution
    /// returns immediately.
    pub fn sleep(&self, handle: &RunnerHandle, args: &[Value]) -> Result<Value, StdlibError> {
        arg_check("sleep", args, &[Kind::Number])?;
        if !self.interactive() {
            return Ok(Value::Undefined);
        }
        let millis = args[0].as_number().unwrap_or(0.0).max(0.0) as u64;
        adapters::sleep(handle, millis)?;
        Ok(Value::Undefined)
    }

    /// `input(message)` — suspends until the user answers the prompt.
    /// Headless execution yields a fixed reply.
    pub fn input(&self, handle: &RunnerHandle, args: &[Value]) -> Result<Value, StdlibError> {
        arg_check("input", args, &[Kind::Str])?;
        let Some(host) = self.host.as_ref() else {
            return Ok(Value::from("user input is disabled"));
        };
        let message = args[0].as_str().unwrap_or_default().to_string();
        let reply = adapters::input(handle, host.prompter.clone(), message)?;
        Ok(Value::Str(reply))
    }

    /// `loadImageFromURL(url)` — suspends for an authenticated fetch and
    /// decode. Headless execution yields the fixed default image.
    pub fn load_image_from_url(
        &self,
        handle: &RunnerHandle,
        args: &[Value],
    ) -> Result<Value, StdlibError> {
        arg_check("loadImageFromURL", args, &[Kind::Str])?;
        if !self.interactive() {
            tracing::debug!("headless image load; returning default image");
            let default = Image::blank(DEFAULT_IMAGE_SIZE, DEFAULT_IMAGE_SIZE)?;
            return Ok(Value::Image(ImageValue::new(default, None)));
        }
        let url = args[0].as_str().unwrap_or_default().to_string();
        let image = adapters::load_image(handle, self.transport.clone(), self.config.clone(), url)?;
        Ok(Value::Image(ImageValue::new(image, self.mount())))
    }

    /// `loadJSONFromURL(url)` — suspends for an authenticated fetch and
    /// parse. Headless execution yields the fixed sample payload.
    pub fn load_json_from_url(
        &self,
        handle: &RunnerHandle,
        args: &[Value],
    ) -> Result<Value, StdlibError> {
        arg_check("loadJSONFromURL", args, &[Kind::Str])?;
        if !self.interactive() {
            tracing::debug!("headless JSON load; returning sample payload");
            return Ok(adapters::default_json());
        }
        let url = args[0].as_str().unwrap_or_default().to_string();
        let value = adapters::load_json(handle, self.transport.clone(), self.config.clone(), url)?;
        Ok(value)
    }
}

/// Canvas and image dimensions arrive as untyped numbers; anything that
/// is not a positive integer collapses to zero and is rejected at
/// allocation.
fn dimension(value: &Value) -> u32 {
    let n = value.as_number().unwrap_or(0.0);
    if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) {
        n as u32
    } else {
        0
    }
}

impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("config", &self.config)
            .field("interactive", &self.interactive())
            .finish()
    }
}
