//! # Handlers
//!
//! This module coordinates the flow between HTTP requests and the forum service.

pub mod auth;
pub mod posts;

use askama::Template;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::error::ApiError;
use crate::state::SharedState;

const OPENMETRICS_CONTENT_TYPE: &str = "application/openmetrics-text; version=1.0.0; charset=utf-8";

fn render(page: impl Template) -> Result<Html<String>, ApiError> {
    Ok(Html(page.render()?))
}

/// `GET /`
pub async fn root() -> Redirect {
    Redirect::to("/homepage")
}

/// `GET /metrics`
pub async fn metrics(State(state): State<SharedState>) -> Result<Response, ApiError> {
    let body = state.metrics.render()?;
    Ok(([(CONTENT_TYPE, OPENMETRICS_CONTENT_TYPE)], body).into_response())
}
