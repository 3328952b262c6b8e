//! Resource proxy
//!
//! Student programs do not fetch arbitrary URLs directly; loads go through
//! the sandbox's proxy endpoint, authenticated with the ambient session
//! identifiers.

use url::form_urlencoded;

use crate::NetError;

/// Ambient session identifiers consumed when building authenticated
/// resource loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: String,
    pub id: String,
}

impl Session {
    pub fn new(user: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            id: id.into(),
        }
    }
}

/// Build the proxy URL for `target`:
/// `{base}geturl?url={target}&user={user}&session={id}`.
pub fn proxy_url(base_url: &str, session: &Session, target: &str) -> Result<String, NetError> {
    if base_url.is_empty() {
        return Err(NetError::InvalidUrl("empty base URL".to_string()));
    }
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("url", target)
        .append_pair("user", &session.user)
        .append_pair("session", &session.id)
        .finish();
    Ok(format!("{base_url}geturl?{query}"))
}
