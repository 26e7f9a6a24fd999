use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::schemas::quiz::QuizDraftSnapshot;

#[derive(Debug, Error)]
pub enum DraftStoreError {
    #[error("draft store unavailable: {0}")]
    Unavailable(String),
    #[error("stored draft is corrupt: {0}")]
    Corrupt(String),
}

/// Key-value snapshot store for local draft autosave. Implementations sit
/// outside the core (browser storage, disk, ...); failures must be tolerable
/// because autosave never interrupts the editing session.
#[async_trait]
pub trait DraftStore: Send + Sync {
    async fn put(&self, key: &str, snapshot: &QuizDraftSnapshot) -> Result<(), DraftStoreError>;
    async fn get(&self, key: &str) -> Result<Option<QuizDraftSnapshot>, DraftStoreError>;
}

/// Bundled store for tests and embedders without a host-provided one.
#[derive(Debug, Default)]
pub struct InMemoryDraftStore {
    entries: Mutex<HashMap<String, QuizDraftSnapshot>>,
}

impl InMemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DraftStore for InMemoryDraftStore {
    async fn put(&self, key: &str, snapshot: &QuizDraftSnapshot) -> Result<(), DraftStoreError> {
        self.entries.lock().await.insert(key.to_string(), snapshot.clone());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<QuizDraftSnapshot>, DraftStoreError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }
}
