use thiserror::Error;

/// Failures that abort a dispatch.
///
/// Malformed records, surplus auto events and per-slot server errors are
/// deliberately absent: those are handled inside the engine (dropped,
/// discarded, or delivered as a failed slot state) and never escape.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("stream error: {0}")]
    Stream(String),
}

impl From<reqwest::Error> for DispatchError {
    fn from(err: reqwest::Error) -> Self {
        DispatchError::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DispatchError>;
