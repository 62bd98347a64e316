//! Client for the model cockpit server endpoint.
//!
//! One request only:
//!
//!   GET {base}paperspace-model-cockpit/api/models  → catalog + install status
//!
//! The request is same-origin: the host's session cookie (when it has one)
//! is attached, no other authentication is done.

use reqwest::header::{ACCEPT, COOKIE};
use url::Url;

use crate::error::FetchError;
use crate::models::ModelsResponse;

/// Path of the models resource, relative to the host base URL
pub const MODELS_ENDPOINT: &str = "paperspace-model-cockpit/api/models";

/// Anything that can produce the model catalog.
///
/// Implementations block; callers run them off the UI thread.
pub trait ModelsSource: Send + Sync {
    fn fetch_models(&self) -> Result<ModelsResponse, FetchError>;
}

/// Thin blocking HTTP client for the models endpoint.
///
/// All calls block the calling thread; run them inside `std::thread::spawn`.
#[derive(Debug, Clone)]
pub struct ModelsClient {
    endpoint: Url,
    session_cookie: Option<String>,
}

impl ModelsClient {
    /// Client for an already resolved endpoint, normally
    /// `{base}` joined with [`MODELS_ENDPOINT`].
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            session_cookie: None,
        }
    }

    pub fn with_session_cookie(mut self, cookie: Option<String>) -> Self {
        self.session_cookie = cookie;
        self
    }
}

impl ModelsSource for ModelsClient {
    fn fetch_models(&self) -> Result<ModelsResponse, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let mut request = client.get(self.endpoint.clone()).header(ACCEPT, "application/json");
        if let Some(cookie) = &self.session_cookie {
            request = request.header(COOKIE, cookie.as_str());
        }

        let resp = request.send().map_err(|e| FetchError::Transport(e.to_string()))?;

        // Body is ignored on failure
        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status().as_u16()));
        }

        let bytes = resp.bytes().map_err(|e| FetchError::Transport(e.to_string()))?;
        let body: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|e| FetchError::Decode(e.to_string()))?;

        let response = ModelsResponse::from_value(&body);
        ::log::debug!("Fetched {} models from {}", response.len(), self.endpoint);
        Ok(response)
    }
}
