//! # api-adapters
//!
//! The web routing and presentation layer for GameHub.

pub mod error;
pub mod forms;
pub mod metrics;
pub mod views;

#[cfg(feature = "web-axum")]
pub mod handlers;
#[cfg(feature = "web-axum")]
pub mod middleware;
#[cfg(feature = "web-axum")]
pub mod session;
#[cfg(feature = "web-axum")]
pub mod state;

pub use error::ApiError;
#[cfg(feature = "web-axum")]
pub use state::{AppState, SharedState};

#[cfg(feature = "web-axum")]
pub use router::router;

#[cfg(feature = "web-axum")]
mod router {
    use std::path::Path;

    use axum::routing::{get, post};
    use axum::Router;
    use tower_http::services::ServeDir;

    use crate::handlers::{self, auth, posts};
    use crate::middleware;
    use crate::state::SharedState;

    /// Builds the application router.
    ///
    /// `static_dir` is served under `/static`.
    pub fn router(state: SharedState, static_dir: impl AsRef<Path>) -> Router {
        let app = Router::new()
            .route("/", get(handlers::root))
            .route("/homepage", get(posts::homepage))
            .route("/posts", post(posts::create_post))
            .route("/posts/new", get(posts::new_post_form))
            .route(
                "/posts/{id}",
                get(posts::show_post)
                    .put(posts::update_post)
                    .delete(posts::delete_post),
            )
            .route("/posts/{id}/edit", get(posts::edit_post_form))
            .route("/posts/{id}/comments", post(posts::add_comment))
            .route("/login", get(auth::login_form).post(auth::login))
            .route("/logout", post(auth::logout))
            .route("/metrics", get(handlers::metrics))
            .nest_service("/static", ServeDir::new(static_dir.as_ref()))
            .with_state(state);

        middleware::apply(app)
    }
}
