use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use estude_core::model::UserId;

use crate::document::ProgressDocument;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for the per-user progress document.
///
/// The document store is keyed by user identity: read once at session start,
/// written back after mutations settle. Merge behavior on concurrent writes
/// belongs to the adapter (the original deployment leaned on the cloud
/// store's merge-write); the domain layer never resolves write conflicts.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch a user's persisted progress document.
    ///
    /// Returns `Ok(None)` when the user has no document yet — a normal first
    /// load, not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be reached.
    async fn load(&self, user: &UserId) -> Result<Option<ProgressDocument>, StorageError>;

    /// Write back a user's progress document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be stored.
    async fn save(&self, user: &UserId, document: &ProgressDocument) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    docs: Arc<Mutex<HashMap<UserId, ProgressDocument>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn load(&self, user: &UserId) -> Result<Option<ProgressDocument>, StorageError> {
        let guard = self.docs.lock().map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(guard.get(user).cloned())
    }

    async fn save(&self, user: &UserId, document: &ProgressDocument) -> Result<(), StorageError> {
        let mut guard = self.docs.lock().map_err(|e| StorageError::Io(e.to_string()))?;
        guard.insert(user.clone(), document.clone());
        Ok(())
    }
}
