//! Request-scoped sessions.
//!
//! The server keeps no session table: the browser carries the user id in a
//! plain cookie and every request rebuilds its own [`Session`] from it.

use axum::extract::FromRequestParts;
use axum::http::header::{HeaderMap, COOKIE};
use axum::http::request::Parts;
use services::Session;

use crate::error::ApiError;
use crate::state::SharedState;

pub const SESSION_COOKIE: &str = "gamehub_user";

/// The user id carried by the session cookie, if any.
pub fn session_user_id(headers: &HeaderMap) -> Option<i64> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, id)| id.parse().ok())
}

pub fn login_cookie(user_id: i64) -> String {
    format!("{SESSION_COOKIE}={user_id}; Path=/; HttpOnly; SameSite=Lax")
}

pub fn logout_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Extracts the caller's session. A cookie naming an unknown user yields
/// an anonymous session.
pub struct CurrentSession(pub Session);

impl CurrentSession {
    pub fn username(&self) -> Option<String> {
        self.0.current_user().map(|u| u.username.clone())
    }

    /// Author id for new records; anonymous visitors post as the placeholder user.
    pub fn author_id(&self) -> i64 {
        self.0.current_user().map_or(0, |u| u.id)
    }
}

impl FromRequestParts<SharedState> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let Some(user_id) = session_user_id(&parts.headers) else {
            return Ok(Self(Session::new()));
        };

        let user = state.forum.get_user(user_id).await?;
        if user.is_unknown() {
            return Ok(Self(Session::new()));
        }
        Ok(Self(Session::with_user(user)))
    }
}
