//! # seed
//!
//! Applies the seed document to the configured file store. Collections that
//! already exist are left untouched, so running it twice is harmless.

use anyhow::{bail, Context};
use configs::{Settings, StorageBackend};
use domains::{store, Seed};
use storage_adapters::JsonFileStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("loading settings")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log.level)),
        )
        .init();

    let storage = &settings.storage;
    if storage.backend != StorageBackend::File {
        bail!("seeding only makes sense for the file backend");
    }

    let raw = tokio::fs::read_to_string(&storage.seed_path)
        .await
        .with_context(|| format!("reading {}", storage.seed_path.display()))?;
    let seed: Seed = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", storage.seed_path.display()))?;

    let store = JsonFileStore::open(&storage.data_dir)
        .await
        .with_context(|| format!("opening data dir {}", storage.data_dir.display()))?;
    let initialised = store::load(&store, &seed)
        .await
        .context("writing seed collections")?;

    if initialised.is_empty() {
        info!(root = %store.root().display(), "store already seeded, nothing to do");
    } else {
        info!(root = %store.root().display(), ?initialised, "seeded collections");
    }
    Ok(())
}
