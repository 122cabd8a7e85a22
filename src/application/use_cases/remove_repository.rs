use std::sync::Arc;

use tracing::{info, warn};

use crate::application::SyncBackend;
use crate::domain::{ApiReply, DomainError};

/// Use case for asking the backend to stop tracking a repository.
///
/// Fire-and-forget: nothing local is changed here. The repository disappears from
/// the view only once a later snapshot no longer contains it.
pub struct RemoveRepositoryUseCase {
    backend: Arc<dyn SyncBackend>,
}

impl RemoveRepositoryUseCase {
    pub fn new(backend: Arc<dyn SyncBackend>) -> Self {
        Self { backend }
    }

    pub async fn execute(&self, id: &str) -> Result<ApiReply, DomainError> {
        if id.is_empty() {
            return Err(DomainError::invalid_input("Repository id must not be empty"));
        }

        info!("Requesting removal of repository {}", id);

        match self.backend.remove(id).await {
            Ok(reply) => {
                info!("Removal of {} accepted: {}", id, reply.describe());
                Ok(reply)
            }
            Err(e) => {
                warn!("Removal of {} failed: {}", id, e);
                Err(e)
            }
        }
    }
}
