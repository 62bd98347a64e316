//! Host-side surfaces a plugin is allowed to touch.
//!
//! A plugin never sees the concrete host. During activation it gets a
//! [`HostApp`] (command registry + page configuration); when one of its
//! commands runs it gets the [`Shell`] layout to add panels to.

use url::Url;

use crate::commands::CommandRegistry;
use crate::error::HostError;
use crate::panel::{Panel, PanelKey};

/// Layout regions a panel can be added to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShellArea {
    Main,
    Left,
    Right,
    Bottom,
}

/// The layout surface of the host shell.
pub trait Shell {
    /// Add a panel to the given area. The host mounts it once it is attached.
    fn add(&mut self, panel: Box<dyn Panel>, area: ShellArea) -> Result<PanelKey, HostError>;
}

/// What a plugin receives during activation.
pub trait HostApp {
    fn commands(&mut self) -> &mut dyn CommandRegistry;

    fn page_config(&self) -> &PageConfig;
}

/// Page-level settings the host exposes to plugins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageConfig {
    /// Base URL of the companion server, always ending in `/`
    base_url: Url,
    /// Session cookie attached to same-origin requests
    session_cookie: Option<String>,
}

impl PageConfig {
    pub fn new(base_url: &str) -> Result<Self, HostError> {
        let invalid = |reason: String| HostError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };

        let mut url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(invalid("URL cannot be used as a base".to_string()));
        }
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }

        url.set_query(None);
        url.set_fragment(None);
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self {
            base_url: url,
            session_cookie: None,
        })
    }

    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        let cookie = cookie.into();
        self.session_cookie = if cookie.trim().is_empty() { None } else { Some(cookie) };
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session_cookie(&self) -> Option<&str> {
        self.session_cookie.as_deref()
    }

    /// Resolve a path relative to the base URL.
    pub fn endpoint(&self, relative: &str) -> Result<Url, HostError> {
        self.base_url
            .join(relative.trim_start_matches('/'))
            .map_err(|e| HostError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }
}
