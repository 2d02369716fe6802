//! # JsonFileStore
//!
//! Local filesystem implementation of `RecordStore`.
//! Each collection lives in its own JSON document:
//!
//! ```text
//! {root}/
//!   users.json
//!   games.json
//!   posts.json
//!   comments.json
//!   current_user.json
//! ```
//!
//! Writes go to a temp file next to the target and are renamed over it, so
//! a reader never sees a half-written document and a failed write leaves
//! the previous one in place.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use domains::{Collection, RecordStore, StoreError, StoreResult};
use tokio::fs;

pub struct JsonFileStore {
    /// Directory holding one document per collection (e.g., "./data")
    root_path: PathBuf,
    /// Distinguishes temp files of overlapping writes.
    write_seq: AtomicU64,
}

impl JsonFileStore {
    /// Opens the store, creating `root` if needed.
    pub async fn open(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let root_path = root.into();
        fs::create_dir_all(&root_path).await?;
        tracing::debug!(root = %root_path.display(), "json file store opened");
        Ok(Self {
            root_path,
            write_seq: AtomicU64::new(0),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root_path
    }

    fn collection_path(&self, collection: Collection) -> PathBuf {
        self.root_path.join(format!("{}.json", collection.key()))
    }

    fn temp_path(&self, collection: Collection, seq: u64) -> PathBuf {
        self.root_path
            .join(format!("{}.json.{}.tmp", collection.key(), seq))
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn exists(&self, collection: Collection) -> StoreResult<bool> {
        fs::try_exists(self.collection_path(collection))
            .await
            .map_err(|e| StoreError::io(collection, e))
    }

    async fn fetch(&self, collection: Collection) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.collection_path(collection)).await {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            // Not UTF-8, so not JSON either.
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                Err(StoreError::corrupt(collection, e.to_string()))
            }
            Err(e) => Err(StoreError::io(collection, e)),
        }
    }

    async fn put(&self, collection: Collection, payload: String) -> StoreResult<()> {
        let target = self.collection_path(collection);
        let temp = self.temp_path(collection, self.write_seq.fetch_add(1, Ordering::Relaxed));

        if let Err(e) = fs::write(&temp, payload.as_bytes()).await {
            let _ = fs::remove_file(&temp).await;
            return Err(StoreError::io(collection, e));
        }
        if let Err(e) = fs::rename(&temp, &target).await {
            let _ = fs::remove_file(&temp).await;
            return Err(StoreError::io(collection, e));
        }

        tracing::debug!(path = %target.display(), bytes = payload.len(), "collection file replaced");
        Ok(())
    }

    async fn remove(&self, collection: Collection) -> StoreResult<()> {
        match fs::remove_file(self.collection_path(collection)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(collection, e)),
        }
    }
}
