use serde::{Deserialize, Serialize};

use super::lenient;
use super::{REMOVE_ENDPOINT, STATUS_OK};
use crate::domain::DomainError;

/// The status envelope every backend command answers with. Any further payload
/// is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiReply {
    status: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    message: Option<String>,
}

impl ApiReply {
    pub fn new(status: impl Into<String>, message: Option<String>) -> Self {
        Self {
            status: status.into(),
            message,
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(STATUS_OK, Some(message.into()))
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new("error", Some(message.into()))
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Passes an `ok` remove reply through; any other status becomes a
    /// [`DomainError::Rejected`] carrying the backend's status and message.
    pub fn accepted(self) -> Result<Self, DomainError> {
        if self.is_ok() {
            Ok(self)
        } else {
            Err(DomainError::rejected(
                REMOVE_ENDPOINT,
                self.status,
                self.message,
            ))
        }
    }

    /// The message if the backend sent one, otherwise the status tag.
    pub fn describe(&self) -> &str {
        self.message.as_deref().unwrap_or(&self.status)
    }
}
