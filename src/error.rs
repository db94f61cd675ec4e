use thiserror::Error;

/// Ways a single instance's inventory request can fail.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid instance URL '{0}': {1}")]
    InvalidUrl(String, url::ParseError),

    /// Non-200 answer from the management port.
    #[error("{}", .0.as_u16())]
    Status(reqwest::StatusCode),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}
