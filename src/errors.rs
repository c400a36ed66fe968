use thiserror::Error;

/// Failure kinds for a single model request. The display strings double as
/// the messages shown in the chat surface, so they stay conversational.
///
/// Each variant is tagged at the point of failure; callers never have to
/// inspect message text to find out what went wrong.
#[derive(Debug, Error)]
pub enum SusanError {
    #[error("Response timed out. Susan might be thinking too hard! Please try again.")]
    Timeout,

    #[error("Unable to connect to Susan. Make sure the server is running and accessible.")]
    Connection(#[source] reqwest::Error),

    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),

    #[error("Empty response from server")]
    EmptyBody,

    /// Transport errors that are neither a timeout nor a connection failure.
    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl SusanError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        SusanError::Config(msg.into())
    }
}

pub type SusanResult<T> = Result<T, SusanError>;
