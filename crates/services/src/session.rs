//! The currently authenticated user.
//!
//! A `Session` is a plain value owned by whoever drives the forum: one per
//! process for a single-user front end, one per request for the HTTP server.

use domains::User;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    current: Option<User>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(user: User) -> Self {
        Self {
            current: Some(user),
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn set_current_user(&mut self, user: User) {
        self.current = Some(user);
    }

    pub fn clear_current_user(&mut self) {
        self.current = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }
}
