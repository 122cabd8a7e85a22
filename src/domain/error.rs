use thiserror::Error;

use crate::domain::models::{REMOVE_ENDPOINT, STATE_ENDPOINT};

#[derive(Debug, Error)]
pub enum DomainError {
    /// The `state` request failed: transport, HTTP status, backend status or decoding.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// The `remove` request failed for the same classes of reasons.
    #[error("Remove error: {0}")]
    Remove(String),

    /// The backend answered with a non-`ok` status tag.
    #[error("{endpoint} rejected by backend: {status}")]
    Rejected {
        endpoint: &'static str,
        status: String,
        message: Option<String>,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    pub fn remove(msg: impl Into<String>) -> Self {
        Self::Remove(msg.into())
    }

    pub fn rejected(
        endpoint: &'static str,
        status: impl Into<String>,
        message: Option<String>,
    ) -> Self {
        Self::Rejected {
            endpoint,
            status: status.into(),
            message,
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn is_fetch_error(&self) -> bool {
        match self {
            Self::Fetch(_) => true,
            Self::Rejected { endpoint, .. } => *endpoint == STATE_ENDPOINT,
            _ => false,
        }
    }

    pub fn is_remove_error(&self) -> bool {
        match self {
            Self::Remove(_) => true,
            Self::Rejected { endpoint, .. } => *endpoint == REMOVE_ENDPOINT,
            _ => false,
        }
    }

    /// The bare description without the variant prefix, as shown on the status line.
    pub fn detail(&self) -> String {
        match self {
            Self::Fetch(msg)
            | Self::Remove(msg)
            | Self::InvalidInput(msg)
            | Self::Internal(msg) => msg.clone(),
            Self::Rejected {
                status, message, ..
            } => message.clone().unwrap_or_else(|| status.clone()),
            Self::IoError(err) => err.to_string(),
        }
    }
}
