//! Host surfaces
//!
//! The interactive host supplies a visual mount point and a line-input UI.
//! A library constructed without a host runs headless: drawing validates
//! and no-ops, suspending operations short-circuit to fixed defaults.

use std::sync::Arc;

use lumo_canvas::Mount;

/// Line-input UI. `None` means the user cancelled the prompt.
pub trait Prompter: Send + Sync {
    fn prompt(&self, message: &str) -> Option<String>;
}

/// The interactive host surfaces.
#[derive(Clone)]
pub struct Host {
    pub mount: Arc<dyn Mount>,
    pub prompter: Arc<dyn Prompter>,
}

impl Host {
    pub fn new(mount: Arc<dyn Mount>, prompter: Arc<dyn Prompter>) -> Self {
        Self { mount, prompter }
    }
}
