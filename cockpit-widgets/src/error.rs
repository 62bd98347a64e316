use thiserror::Error;

use crate::host::ShellArea;
use crate::panel::PanelKey;

/// Errors raised by the host contracts (command registry, layout, plugin registry).
#[derive(Debug, Error)]
pub enum HostError {
    #[error("command '{0}' is already registered")]
    DuplicateCommand(String),

    #[error("no command registered under '{0}'")]
    UnknownCommand(String),

    #[error("plugin '{0}' is already registered")]
    DuplicatePlugin(String),

    #[error("shell area {0:?} is not available in this host")]
    UnsupportedArea(ShellArea),

    #[error("no panel with key {0}")]
    UnknownPanel(PanelKey),

    #[error("panel '{0}' is not closable")]
    NotClosable(String),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
