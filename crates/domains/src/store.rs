//! Typed access to a [`RecordStore`].
//!
//! Adapters only move opaque payloads; this module owns the JSON
//! representation, so every adapter reports corruption the same way.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{StoreError, StoreResult};
use crate::models::Seed;
use crate::ports::RecordStore;

/// Fixed logical keys of the persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Games,
    Posts,
    Comments,
    /// Zero or one user: the persisted session.
    CurrentUser,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Users,
        Collection::Games,
        Collection::Posts,
        Collection::Comments,
        Collection::CurrentUser,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Games => "games",
            Collection::Posts => "posts",
            Collection::Comments => "comments",
            Collection::CurrentUser => "current_user",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Reads and deserializes a whole collection.
///
/// A collection that was never written reads as empty.
pub async fn read_collection<T, S>(store: &S, collection: Collection) -> StoreResult<Vec<T>>
where
    T: DeserializeOwned,
    S: RecordStore + ?Sized,
{
    match store.fetch(collection).await? {
        None => Ok(Vec::new()),
        Some(payload) => serde_json::from_str(&payload)
            .map_err(|e| StoreError::corrupt(collection, e.to_string())),
    }
}

/// Serializes and overwrites a whole collection.
pub async fn write_collection<T, S>(
    store: &S,
    collection: Collection,
    records: &[T],
) -> StoreResult<()>
where
    T: Serialize + Sync,
    S: RecordStore + ?Sized,
{
    let payload = serde_json::to_string_pretty(records)
        .map_err(|e| StoreError::corrupt(collection, e.to_string()))?;
    store.put(collection, payload).await?;
    tracing::debug!(%collection, count = records.len(), "collection written");
    Ok(())
}

/// Initialises every collection that is not persisted yet from `seed`.
///
/// Existing collections are left untouched, so repeated calls are no-ops
/// once initialised. Games are only written when the seed carries them.
/// Returns the collections that were initialised.
pub async fn load<S>(store: &S, seed: &Seed) -> StoreResult<Vec<Collection>>
where
    S: RecordStore + ?Sized,
{
    let mut initialised = Vec::new();

    if let Some(games) = &seed.games {
        if init_if_missing(store, Collection::Games, games).await? {
            initialised.push(Collection::Games);
        }
    }
    if init_if_missing(store, Collection::Users, &seed.users).await? {
        initialised.push(Collection::Users);
    }
    if init_if_missing(store, Collection::Posts, &seed.posts).await? {
        initialised.push(Collection::Posts);
    }
    if init_if_missing(store, Collection::Comments, &seed.comments).await? {
        initialised.push(Collection::Comments);
    }

    Ok(initialised)
}

async fn init_if_missing<T, S>(store: &S, collection: Collection, records: &[T]) -> StoreResult<bool>
where
    T: Serialize + Sync,
    S: RecordStore + ?Sized,
{
    if store.exists(collection).await? {
        return Ok(false);
    }
    write_collection(store, collection, records).await?;
    Ok(true)
}
