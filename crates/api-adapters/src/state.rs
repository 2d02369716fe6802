use std::sync::Arc;

use services::ForumService;

use crate::metrics::Metrics;

/// State shared across all request handlers.
pub struct AppState {
    pub forum: ForumService,
    pub metrics: Metrics,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(forum: ForumService) -> SharedState {
        Arc::new(Self {
            forum,
            metrics: Metrics::new(),
        })
    }
}
