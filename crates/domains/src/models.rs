//! # Domain Models
//!
//! These structs represent the core entities of GameHub.
//! Ids are integers derived from creation time (see `services::ids`).
//! Field names serialize in camelCase to match the seed document format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Username shown for references to users that no longer resolve.
pub const UNKNOWN_USERNAME: &str = "unknown user";

/// A registered forum member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Stored and compared as-is.
    pub password: String,
}

impl User {
    /// The stand-in returned when a user lookup misses.
    pub fn unknown() -> Self {
        Self {
            id: 0,
            username: UNKNOWN_USERNAME.to_string(),
            password: String::new(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.id == 0 && self.username == UNKNOWN_USERNAME
    }
}

/// A game that posts are filed under. Seed data only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    pub title: String,
}

/// A discussion thread opener.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub game_id: i64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(alias = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// A reply attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub content: String,
    #[serde(alias = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Fields a caller may change on an existing post.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostChanges {
    pub game_id: i64,
    pub content: String,
    /// Keeps the current title when `None`.
    pub title: Option<String>,
    /// Keeps the current tags when `None`.
    pub tags: Option<Vec<String>>,
}

/// The initial data document (`data.json`).
///
/// Every collection is optional; omitted ones start empty. `games` stays
/// `None` when absent so an existing games collection is never blanked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub games: Option<Vec<Game>>,
    /// Global tag vocabulary. Held in memory, never persisted.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Drops repeated tags, keeping the first occurrence of each.
pub fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        if !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}
