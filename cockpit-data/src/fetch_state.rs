use crate::error::FetchError;
use crate::models::ModelsResponse;

/// State of a panel's single models request.
///
/// Starts as `Loading`; settles exactly once into `Error` or `Ready`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState {
    #[default]
    Loading,
    Error(String),
    Ready(ModelsResponse),
}

impl FetchState {
    /// Map a fetch outcome onto its terminal state
    pub fn settle(result: Result<ModelsResponse, FetchError>) -> Self {
        match result {
            Ok(response) => Self::Ready(response),
            Err(e) => Self::Error(e.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// True once the request has resolved either way
    pub fn is_settled(&self) -> bool {
        !self.is_loading()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Error(_) => "error",
            Self::Ready(_) => "ready",
        }
    }
}
