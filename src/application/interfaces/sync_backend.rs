use async_trait::async_trait;

use crate::domain::{ApiReply, DomainError, Snapshot};

/// The chunk sync service as seen by the operator view: one read of the full
/// tracked state and one removal command.
#[async_trait]
pub trait SyncBackend: Send + Sync {
    /// Full state snapshot. Every failure is a [`DomainError::Fetch`].
    async fn fetch_state(&self) -> Result<Snapshot, DomainError>;

    /// Ask the backend to stop tracking `uuid`. Every failure, including a
    /// backend answer with a non-`ok` status, is a [`DomainError::Remove`].
    async fn remove(&self, uuid: &str) -> Result<ApiReply, DomainError>;

    /// Where requests go, for headers and logs.
    fn describe(&self) -> String;
}
