//! # GameHub Binary
//!
//! Assembles the forum from configuration and serves it over HTTP.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use api_adapters::{router, AppState};
use configs::{LogSettings, Settings, StorageBackend, StorageSettings};
use domains::{RecordStore, Seed, SystemClock};
use services::ForumService;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("loading settings")?;
    init_tracing(&settings.log);

    // 1. Record store
    let store = open_store(&settings.storage).await?;

    // 2. Seed and forum service
    let seed = read_seed(&settings.storage.seed_path).await;
    let forum = ForumService::open(store, Arc::new(SystemClock), &seed)
        .await
        .context("applying seed to the record store")?;

    // 3. HTTP
    let app = router(AppState::new(forum), &settings.server.static_dir);
    let address = settings.bind_addr();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {address}"))?;
    info!(%address, "GameHub listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;

    info!("GameHub stopped");
    Ok(())
}

fn init_tracing(log: &LogSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    if log.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn open_store(storage: &StorageSettings) -> anyhow::Result<Arc<dyn RecordStore>> {
    match storage.backend {
        #[cfg(feature = "store-file")]
        StorageBackend::File => {
            let store = storage_adapters::JsonFileStore::open(&storage.data_dir)
                .await
                .with_context(|| format!("opening data dir {}", storage.data_dir.display()))?;
            info!(root = %store.root().display(), "using JSON file store");
            Ok(Arc::new(store))
        }
        #[cfg(feature = "store-memory")]
        StorageBackend::Memory => {
            warn!("using in-memory store, nothing will survive a restart");
            Ok(Arc::new(storage_adapters::MemoryStore::new()))
        }
        #[allow(unreachable_patterns)]
        other => bail!("storage backend {other:?} is not compiled into this build"),
    }
}

/// The seed document, or an empty seed when it cannot be read.
async fn read_seed(path: &Path) -> Seed {
    let parsed = match tokio::fs::read_to_string(path).await {
        Ok(raw) => serde_json::from_str(&raw).map_err(anyhow::Error::from),
        Err(e) => Err(e.into()),
    };
    match parsed {
        Ok(seed) => seed,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "seed unavailable, starting empty");
            Seed::default()
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
