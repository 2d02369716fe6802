//! Login, registration and logout.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use askama::Template;
use domains::DomainError;

use super::render;
use crate::error::ApiError;
use crate::forms::{LoginAction, LoginForm};
use crate::session::{login_cookie, logout_cookie, CurrentSession};
use crate::state::SharedState;
use crate::views::LoginTemplate;

/// `GET /login`
pub async fn login_form(session: CurrentSession) -> Result<Html<String>, ApiError> {
    render(LoginTemplate {
        current_user: session.username(),
        error: None,
        username: String::new(),
    })
}

/// `POST /login`: logs in, or registers first when `action=register`.
pub async fn login(
    State(state): State<SharedState>,
    CurrentSession(mut session): CurrentSession,
    Form(form): Form<LoginForm>,
) -> Result<Response, ApiError> {
    let (username, password) = match form.validate() {
        Ok(credentials) => credentials,
        Err(e) => return login_page(StatusCode::BAD_REQUEST, form.username.trim(), e),
    };

    if form.action == LoginAction::Register {
        match state.forum.register(username, password).await {
            Ok(_) => {
                state.metrics.registrations.inc();
            }
            Err(e @ DomainError::Conflict(_)) => {
                return login_page(StatusCode::CONFLICT, username, e)
            }
            Err(e) => return Err(e.into()),
        }
    }

    match state.forum.login(&mut session, username, password).await {
        Ok(user) => {
            state.metrics.logins_succeeded.inc();
            Ok((
                [(SET_COOKIE, login_cookie(user.id))],
                Redirect::to("/homepage"),
            )
                .into_response())
        }
        Err(e @ DomainError::Unauthorized(_)) => {
            state.metrics.logins_failed.inc();
            login_page(StatusCode::UNAUTHORIZED, username, e)
        }
        Err(e) => Err(e.into()),
    }
}

/// `POST /logout`
pub async fn logout(
    State(state): State<SharedState>,
    CurrentSession(mut session): CurrentSession,
) -> Response {
    state.forum.logout(&mut session);
    (
        [(SET_COOKIE, logout_cookie())],
        Redirect::to("/login"),
    )
        .into_response()
}

/// Re-renders the login form with the reason the attempt failed.
fn login_page(status: StatusCode, username: &str, error: DomainError) -> Result<Response, ApiError> {
    let message = match error {
        DomainError::Validation(msg) | DomainError::Unauthorized(msg) | DomainError::Conflict(msg) => msg,
        other => return Err(other.into()),
    };
    let page = LoginTemplate {
        current_user: None,
        error: Some(message),
        username: username.to_string(),
    };
    Ok((status, Html(page.render()?)).into_response())
}
