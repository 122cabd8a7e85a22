use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use crate::application::{ListRepositoriesUseCase, RemoveRepositoryUseCase, SyncBackend};
use crate::connector::{demo_snapshot, HttpSyncBackend, InMemorySyncBackend};

pub struct ContainerConfig {
    /// Backend base URL; `None` resolves through `CHUNKWATCH_URL` and the default.
    pub base_url: Option<String>,
    pub timeout: Duration,
    /// Serve a generated, slowly progressing state from memory instead of HTTP.
    pub mock_backend: bool,
}

pub struct Container {
    backend: Arc<dyn SyncBackend>,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let backend: Arc<dyn SyncBackend> = if config.mock_backend {
            debug!("Using in-memory mock backend");
            let seed = std::process::id() as u64;
            Arc::new(InMemorySyncBackend::new(demo_snapshot(seed)).with_progress(seed))
        } else {
            let base_url = HttpSyncBackend::resolve_base_url(config.base_url.as_deref());
            debug!("Using HTTP backend at {} (timeout {:?})", base_url, config.timeout);
            Arc::new(HttpSyncBackend::new(base_url, config.timeout)?)
        };

        Ok(Self { backend })
    }

    /// Wires an already constructed backend, e.g. one shared with a test.
    pub fn with_backend(backend: Arc<dyn SyncBackend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> Arc<dyn SyncBackend> {
        self.backend.clone()
    }

    pub fn list_use_case(&self) -> ListRepositoriesUseCase {
        ListRepositoriesUseCase::new(self.backend.clone())
    }

    pub fn remove_use_case(&self) -> RemoveRepositoryUseCase {
        RemoveRepositoryUseCase::new(self.backend.clone())
    }
}
