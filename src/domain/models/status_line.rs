use std::fmt;

use serde::Serialize;

use crate::domain::DomainError;

use super::{ApiReply, Snapshot};

/// Endpoint names as they appear on the status line and in request paths.
pub const STATE_ENDPOINT: &str = "state";
pub const REMOVE_ENDPOINT: &str = "remove";

/// The single diagnostic line: `<endpoint>: <status> (<message>)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusLine {
    endpoint: String,
    status: String,
    message: String,
}

impl StatusLine {
    pub fn new(
        endpoint: impl Into<String>,
        status: impl Into<String>,
        message: Option<&str>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            status: status.into(),
            message: message.unwrap_or_default().to_string(),
        }
    }

    /// A backend rejection keeps the backend's own status tag and message; every
    /// other failure renders as `error` with its description.
    pub fn from_error(endpoint: impl Into<String>, error: &DomainError) -> Self {
        match error {
            DomainError::Rejected {
                status, message, ..
            } => Self::new(endpoint, status.clone(), message.as_deref()),
            other => Self {
                endpoint: endpoint.into(),
                status: "error".to_string(),
                message: other.detail(),
            },
        }
    }

    pub fn for_state(result: &Result<Snapshot, DomainError>) -> Self {
        match result {
            Ok(snapshot) => Self::new(STATE_ENDPOINT, snapshot.status(), snapshot.message()),
            Err(e) => Self::from_error(STATE_ENDPOINT, e),
        }
    }

    pub fn for_remove(result: &Result<ApiReply, DomainError>) -> Self {
        match result {
            Ok(reply) => Self::new(REMOVE_ENDPOINT, reply.status(), reply.message()),
            Err(e) => Self::from_error(REMOVE_ENDPOINT, e),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status != super::STATUS_OK
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.endpoint, self.status, self.message)
    }
}
