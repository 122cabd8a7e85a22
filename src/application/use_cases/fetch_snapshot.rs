use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::application::SyncBackend;
use crate::domain::{DomainError, Snapshot};

/// Use case for reading the current tracked state.
pub struct FetchSnapshotUseCase {
    backend: Arc<dyn SyncBackend>,
}

impl FetchSnapshotUseCase {
    pub fn new(backend: Arc<dyn SyncBackend>) -> Self {
        Self { backend }
    }

    pub async fn execute(&self) -> Result<Snapshot, DomainError> {
        let start_time = Instant::now();

        match self.backend.fetch_state().await {
            Ok(snapshot) => {
                debug!(
                    "Fetched state from {}: {} repositories in {:?}",
                    self.backend.describe(),
                    snapshot.repos().len(),
                    start_time.elapsed()
                );
                Ok(snapshot)
            }
            Err(e) => {
                warn!("State request to {} failed: {}", self.backend.describe(), e);
                Err(e)
            }
        }
    }
}
