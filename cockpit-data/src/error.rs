use thiserror::Error;

/// Why a models fetch did not produce a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Non-2xx response; the body was not read
    #[error("Request failed: {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),

    /// 2xx response whose body is not JSON
    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
}
