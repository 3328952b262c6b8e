//! External operation adapters
//!
//! The four asynchronous operations behind the call surface — delay,
//! prompt, image fetch-decode, JSON fetch-parse — expressed as completion
//! producers driven by the suspend/resume bridge. Each runs its external
//! work on a spawned thread and resumes the program with a tagged outcome.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use lumo_canvas::{Image, ImageData};
use lumo_net::{proxy_url, NetError, Response, Transport};
use lumo_runtime::{suspend, Outcome, Resumer, RunnerHandle};

use crate::api::Config;
use crate::host::Prompter;
use crate::{StdlibError, Value};

/// Side length of the square image handed out by headless image loads.
pub(crate) const DEFAULT_IMAGE_SIZE: u32 = 50;

/// Suspend until a one-shot timer fires.
pub(crate) fn sleep(handle: &RunnerHandle, millis: u64) -> Result<(), StdlibError> {
    suspend(handle, |resumer: Resumer<(), StdlibError>| {
        thread::Builder::new()
            .name("lumo-sleep".to_string())
            .spawn(move || {
                thread::sleep(Duration::from_millis(millis));
                resumer.resume(Outcome::Normal(()));
            })
            .ok();
    })
    .map_err(StdlibError::from)
}

/// Suspend until the host prompter yields a line. A cancelled prompt
/// substitutes the empty string.
pub(crate) fn input(
    handle: &RunnerHandle,
    prompter: Arc<dyn Prompter>,
    message: String,
) -> Result<String, StdlibError> {
    suspend(handle, move |resumer: Resumer<String, StdlibError>| {
        thread::Builder::new()
            .name("lumo-prompt".to_string())
            .spawn(move || {
                let reply = prompter.prompt(&message).unwrap_or_default();
                resumer.resume(Outcome::Normal(reply));
            })
            .ok();
    })
    .map_err(StdlibError::from)
}

/// Suspend until `url` has been fetched through the proxy and decoded
/// into an image.
pub(crate) fn load_image(
    handle: &RunnerHandle,
    transport: Arc<dyn Transport>,
    config: Config,
    url: String,
) -> Result<Image, StdlibError> {
    suspend(handle, move |resumer: Resumer<Image, StdlibError>| {
        thread::Builder::new()
            .name("lumo-load-image".to_string())
            .spawn(move || {
                resumer.resume(Outcome::from(fetch_image(transport.as_ref(), &config, &url)));
            })
            .ok();
    })
    .map_err(StdlibError::from)
}

/// Suspend until `url` has been fetched through the proxy and parsed as
/// JSON.
pub(crate) fn load_json(
    handle: &RunnerHandle,
    transport: Arc<dyn Transport>,
    config: Config,
    url: String,
) -> Result<Value, StdlibError> {
    suspend(handle, move |resumer: Resumer<Value, StdlibError>| {
        thread::Builder::new()
            .name("lumo-load-json".to_string())
            .spawn(move || {
                resumer.resume(Outcome::from(fetch_json(transport.as_ref(), &config, &url)));
            })
            .ok();
    })
    .map_err(StdlibError::from)
}

/// Authenticated proxy fetch shared by the two loaders. Missing session
/// identifiers and non-OK responses fail here, before any body decode.
fn fetch_proxied(
    transport: &dyn Transport,
    config: &Config,
    target: &str,
) -> Result<Response, StdlibError> {
    let Some(session) = config.session.as_ref() else {
        return Err(NetError::NotLoggedIn.into());
    };
    let proxied = proxy_url(&config.base_url, session, target)?;
    let response = transport.get(&proxied)?;
    if !response.ok() {
        tracing::debug!(status = response.status, "proxy answered non-OK");
        return Err(NetError::NotOk {
            status: response.status,
        }
        .into());
    }
    Ok(response)
}

fn fetch_image(
    transport: &dyn Transport,
    config: &Config,
    target: &str,
) -> Result<Image, StdlibError> {
    let response = fetch_proxied(transport, config, target)?;
    let decoded = image::load_from_memory(response.bytes())
        .map_err(|_| StdlibError::External("Image could not be loaded".to_string()))?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    let data = ImageData::from_data(rgba.into_raw(), width, height)?;
    Ok(Image::new(data))
}

fn fetch_json(
    transport: &dyn Transport,
    config: &Config,
    target: &str,
) -> Result<Value, StdlibError> {
    let response = fetch_proxied(transport, config, target)?;
    let parsed: serde_json::Value = response
        .json()
        .map_err(|_| StdlibError::External("JSON file could not be loaded".to_string()))?;
    Ok(Value::from_json(parsed))
}

/// Fixed payload returned by headless JSON loads.
pub(crate) fn default_json() -> Value {
    Value::from_json(serde_json::json!([
        {
            "name": "Back-Health Chiropractic",
            "city": "Phoenix",
            "state": "AZ",
            "stars": 5,
            "review_count": 19,
            "attributes": {
                "AcceptsInsurance": true,
                "ByAppointmentOnly": true,
                "BusinessAcceptsCreditCards": true
            },
            "categories": [
                "Chiropractors",
                "Health & Medical"
            ]
        },
        {
            "name": "TRUmatch",
            "city": "Scottsdale",
            "state": "AZ",
            "stars": 3,
            "review_count": 3,
            "attributes": {},
            "categories": [
                "Professional Services",
                "Matchmakers"
            ]
        }
    ]))
}
