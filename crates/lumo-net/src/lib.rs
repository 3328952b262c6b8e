//! Lumo Networking
//!
//! HTTP fetch and the authenticated resource-proxy URL builder.

mod proxy;
mod transport;

pub use proxy::{proxy_url, Session};
pub use transport::{HttpTransport, Transport};

/// HTTP Response
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    /// Check if the response is OK (2xx)
    pub fn ok(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Raw body bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Body parsed as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Body decoded as UTF-8 text
    pub fn text(&self) -> Result<String, NetError> {
        String::from_utf8(self.body.clone()).map_err(|e| NetError::Network {
            cause: e.to_string(),
        })
    }
}

/// Network error
#[derive(Debug, Clone, thiserror::Error)]
pub enum NetError {
    /// The proxy answered with a non-2xx status.
    #[error("Could not load from URL, URL may be invalid or redirected")]
    NotOk { status: u16 },

    /// The request never produced a response.
    #[error("Could not load from URL")]
    Network { cause: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A resource load was attempted without session identifiers.
    #[error("User is not logged in")]
    NotLoggedIn,
}
