use std::sync::Arc;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::SyncBackend;
use crate::domain::{ApiReply, Chunk, DomainError, Snapshot};

/// Backend that keeps its tracked state in memory.
///
/// Used by `--mock-backend` and by tests. Removal drops the repository from the
/// state so later fetches reflect it, the way the real daemon does.
pub struct InMemorySyncBackend {
    state: Arc<Mutex<Snapshot>>,
    failures: Arc<Mutex<InjectedFailures>>,
    progress: Option<Arc<Mutex<rand::rngs::StdRng>>>,
}

#[derive(Default)]
struct InjectedFailures {
    fetch: Option<String>,
    remove: Option<String>,
}

impl InMemorySyncBackend {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            state: Arc::new(Mutex::new(snapshot)),
            failures: Arc::new(Mutex::new(InjectedFailures::default())),
            progress: None,
        }
    }

    /// Each `fetch_state` marks one random pending chunk as saved before answering.
    pub fn with_progress(mut self, seed: u64) -> Self {
        self.progress = Some(Arc::new(Mutex::new(rand::rngs::StdRng::seed_from_u64(seed))));
        self
    }

    pub async fn replace_state(&self, snapshot: Snapshot) {
        *self.state.lock().await = snapshot;
    }

    pub async fn current_state(&self) -> Snapshot {
        self.state.lock().await.clone()
    }

    /// Makes every following fetch fail with `message`; `None` clears it.
    pub async fn fail_fetches(&self, message: Option<&str>) {
        self.failures.lock().await.fetch = message.map(str::to_string);
    }

    /// Makes every following removal fail with `message`; `None` clears it.
    pub async fn fail_removals(&self, message: Option<&str>) {
        self.failures.lock().await.remove = message.map(str::to_string);
    }

    async fn advance(&self, snapshot: &mut Snapshot) {
        let Some(rng) = &self.progress else {
            return;
        };
        let mut rng = rng.lock().await;

        let mut pending: Vec<&mut Chunk> = snapshot
            .repos_mut()
            .iter_mut()
            .flat_map(|repo| repo.files_mut().iter_mut())
            .filter_map(|file| file.latest_version_mut())
            .flat_map(|version| version.chunks_mut().iter_mut())
            .filter(|chunk| !chunk.is_saved())
            .collect();

        if let Some(chunk) = pending.choose_mut(&mut *rng) {
            chunk.mark_saved();
            debug!("Mock backend saved a {} byte chunk", chunk.length());
        }
    }
}

impl Default for InMemorySyncBackend {
    fn default() -> Self {
        Self::new(Snapshot::default())
    }
}

#[async_trait]
impl SyncBackend for InMemorySyncBackend {
    async fn fetch_state(&self) -> Result<Snapshot, DomainError> {
        if let Some(message) = self.failures.lock().await.fetch.clone() {
            return Err(DomainError::fetch(message));
        }

        let mut state = self.state.lock().await;
        self.advance(&mut state).await;
        Ok(state.clone())
    }

    async fn remove(&self, uuid: &str) -> Result<ApiReply, DomainError> {
        if let Some(message) = self.failures.lock().await.remove.clone() {
            return Err(DomainError::remove(message));
        }

        let mut state = self.state.lock().await;
        let repos = state.repos_mut();
        match repos.iter().position(|r| r.uuid() == uuid) {
            Some(index) => {
                let removed = repos.remove(index);
                debug!("Mock backend removed {}", removed.name());
                Ok(ApiReply::ok(format!("Removed {}", removed.name())))
            }
            None => ApiReply::error("Can't find that repo").accepted(),
        }
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}
