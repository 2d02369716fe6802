//! # ApiError
//!
//! Maps forum failures onto HTTP responses rendered as message pages.

use domains::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),

    #[error("metrics encoding failed")]
    Metrics(#[from] std::fmt::Error),
}

impl ApiError {
    /// Status code and page heading for this failure.
    pub fn status(&self) -> (u16, &'static str) {
        match self {
            ApiError::Domain(DomainError::NotFound(..)) => (404, "Not found"),
            ApiError::Domain(DomainError::Validation(_)) => (400, "Missing information"),
            ApiError::Domain(DomainError::Unauthorized(_)) => (401, "Not allowed"),
            ApiError::Domain(DomainError::Conflict(_)) => (409, "Already exists"),
            ApiError::Domain(DomainError::Store(_))
            | ApiError::Render(_)
            | ApiError::Metrics(_) => (500, "Something went wrong"),
        }
    }

    /// Text safe to show to the visitor. Internal failures stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Domain(DomainError::NotFound(entity, _)) => {
                format!("That {entity} does not exist.")
            }
            ApiError::Domain(DomainError::Validation(msg))
            | ApiError::Domain(DomainError::Unauthorized(msg))
            | ApiError::Domain(DomainError::Conflict(msg)) => msg.clone(),
            _ => "The request could not be completed. Please try again.".to_string(),
        }
    }
}

#[cfg(feature = "web-axum")]
mod response {
    use askama::Template;
    use axum::http::StatusCode;
    use axum::response::{Html, IntoResponse, Response};

    use super::ApiError;
    use crate::views::MessageTemplate;

    impl IntoResponse for ApiError {
        fn into_response(self) -> Response {
            let (code, heading) = self.status();
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

            if status.is_server_error() {
                tracing::error!(error = %self, "request failed");
            } else {
                tracing::debug!(error = %self, %status, "request rejected");
            }

            let page = MessageTemplate {
                current_user: None,
                heading: heading.to_string(),
                message: self.public_message(),
            };
            match page.render() {
                Ok(html) => (status, Html(html)).into_response(),
                Err(_) => (status, self.public_message()).into_response(),
            }
        }
    }
}
