//! # Core Traits (Ports)
//!
//! Any adapter must implement these traits to be used by the binaries.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::StoreResult;
use crate::store::Collection;

/// Durable key-value medium holding one serialized collection per key.
///
/// Every write replaces the whole collection. Implementations must make a
/// write observably atomic: readers see either the previous payload or the
/// new one, never a partial document. There is no locking between
/// writers; the last write wins.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Whether the collection has ever been written.
    async fn exists(&self, collection: Collection) -> StoreResult<bool>;

    /// Raw serialized payload, `None` if the collection was never written.
    async fn fetch(&self, collection: Collection) -> StoreResult<Option<String>>;

    /// Replaces the collection's payload.
    async fn put(&self, collection: Collection, payload: String) -> StoreResult<()>;

    /// Drops the collection. Removing a missing collection is not an error.
    async fn remove(&self, collection: Collection) -> StoreResult<()>;
}

/// Source of creation timestamps.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
