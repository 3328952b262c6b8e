//! Lumo Stdlib
//!
//! The standard library exposed to programs running in the Lumo sandbox.
//!
//! Features:
//! - Contract-checked call surface (`newCanvas`, `createImage`,
//!   `getProperty`/`setProperty`, `sleep`, `input`, URL loaders)
//! - Dynamic `Value` boundary between the untyped hosted program and the
//!   typed crates underneath
//! - The four asynchronous operations expressed as suspend/resume
//!   adapters, with fixed defaults for headless execution

mod adapters;
mod api;
mod canvas_api;
mod contract;
mod error;
mod host;
mod image_api;
mod value;

pub use api::{Config, ConfigBuilder, Library};
pub use canvas_api::CanvasValue;
pub use contract::{arg_check, Kind};
pub use error::StdlibError;
pub use host::{Host, Prompter};
pub use image_api::ImageValue;
pub use value::{ArrayRef, ObjectRef, Value};

pub use lumo_canvas::{Canvas, CanvasError, Image, ImageData, Mount, Pixel, Surface};
pub use lumo_net::{NetError, Response, Session, Transport};
pub use lumo_runtime::{Outcome, Resumer, RunnerHandle};
