use thiserror::Error;

/// Failure of a single backend request.
///
/// Messages are captured as strings so the error can be cloned into UI state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{endpoint}: request failed: {message}")]
    Transport {
        endpoint: &'static str,
        message: String,
    },
    #[error("{endpoint}: backend answered HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },
    #[error("{endpoint}: unexpected payload: {message}")]
    Decode {
        endpoint: &'static str,
        message: String,
    },
}

impl ApiError {
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Transport { endpoint, .. }
            | Self::Status { endpoint, .. }
            | Self::Decode { endpoint, .. } => endpoint,
        }
    }
}
