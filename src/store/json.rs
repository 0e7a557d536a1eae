//! # JSON-file-backed subscriber store.
//!
//! Persists the membership as a JSON array of id strings, rewritten wholesale
//! on every mutation. Acceptable while subscriber counts are small; the
//! rewrite-everything behavior is a scalability limit, not a correctness one.
//!
//! ## Rules
//! - The file is the single source of truth: every operation re-reads it, so
//!   no in-memory copy can run ahead of a failed write.
//! - Mutations serialize on one async mutex (two racing subscribes cannot
//!   drop each other's update) and commit via temp-file write + rename, so a
//!   failed or interrupted write leaves the previous membership intact.
//! - A missing or unparseable file reads as the empty set; the next
//!   successful mutation rewrites a clean one.

use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::sync::Mutex;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::store::store::SubscriberStore;
use crate::store::subscriber::{SubscriberId, SubscriberSet};

/// File-backed [`SubscriberStore`] with atomic whole-file rewrites.
pub struct JsonFileStore {
    path: PathBuf,
    mutate: Mutex<()>,
}

impl JsonFileStore {
    /// Creates a store backed by the file at `path`.
    ///
    /// The file is not created until the first successful mutation; until
    /// then the membership reads as empty.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mutate: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the persisted set, treating missing/corrupt state as empty.
    async fn read_set(&self) -> SubscriberSet {
        match fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
            Err(_) => SubscriberSet::default(),
        }
    }

    /// Writes `set` via a temp sibling and an atomic rename.
    async fn write_set(&self, set: &SubscriberSet) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(set)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, &bytes).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl SubscriberStore for JsonFileStore {
    async fn add(&self, id: &SubscriberId) -> Result<bool, StoreError> {
        let _guard = self.mutate.lock().await;
        let mut set = self.read_set().await;
        if !set.insert(id.clone()) {
            return Ok(false);
        }
        self.write_set(&set).await?;
        Ok(true)
    }

    async fn remove(&self, id: &SubscriberId) -> Result<bool, StoreError> {
        let _guard = self.mutate.lock().await;
        let mut set = self.read_set().await;
        if !set.remove(id) {
            return Ok(false);
        }
        self.write_set(&set).await?;
        Ok(true)
    }

    async fn list(&self) -> SubscriberSet {
        self.read_set().await
    }
}
