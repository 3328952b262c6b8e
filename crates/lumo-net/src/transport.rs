//! Transport
//!
//! The network seam. Production uses a blocking reqwest client; tests
//! substitute a scripted transport.

use crate::{NetError, Response};

/// Issues GET requests on behalf of the resource loaders.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<Response, NetError>;
}

/// Blocking HTTP transport.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .user_agent("lumo/0.1")
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<Response, NetError> {
        tracing::info!("HTTP GET {}", url);

        let response = self.client.get(url).send().map_err(|e| NetError::Network {
            cause: e.to_string(),
        })?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| NetError::Network {
                cause: e.to_string(),
            })?
            .to_vec();

        Ok(Response { status, body })
    }
}
