use std::sync::Arc;

use crate::application::{sort_views, FetchSnapshotUseCase, SortOrder, SyncBackend};
use crate::domain::{aggregate, DomainError, RepoView};

/// Use case for a one-shot progress listing.
pub struct ListRepositoriesUseCase {
    fetch: FetchSnapshotUseCase,
}

impl ListRepositoriesUseCase {
    pub fn new(backend: Arc<dyn SyncBackend>) -> Self {
        Self {
            fetch: FetchSnapshotUseCase::new(backend),
        }
    }

    pub async fn execute(&self, order: SortOrder) -> Result<Vec<RepoView>, DomainError> {
        let snapshot = self.fetch.execute().await?;
        let mut views = aggregate(&snapshot);
        sort_views(&mut views, order);
        Ok(views)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<RepoView>, DomainError> {
        let views = self.execute(SortOrder::Snapshot).await?;
        Ok(views.into_iter().find(|v| v.id == id))
    }
}
