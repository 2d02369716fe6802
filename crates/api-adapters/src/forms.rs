//! Form bodies and their presence checks.
//!
//! The forum service trusts its callers; this is where missing fields are
//! turned into `DomainError::Validation`.

use domains::{DomainError, PostChanges};
use serde::Deserialize;

/// Longest title derived from a post body when none is given.
const DERIVED_TITLE_CHARS: usize = 60;

/// Body of `POST /posts` and `PUT /posts/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct PostForm {
    pub title: Option<String>,
    #[serde(default)]
    pub postbody: String,
    #[serde(default)]
    pub game: String,
    /// Comma separated.
    pub tags: Option<String>,
}

/// A post form that passed the presence checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostInput {
    pub game_id: i64,
    pub content: String,
    pub title: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl PostForm {
    pub fn validate(self) -> Result<PostInput, DomainError> {
        let content = self.postbody.trim();
        if content.is_empty() {
            return Err(DomainError::Validation("post body is required".into()));
        }
        let game = self.game.trim();
        if game.is_empty() {
            return Err(DomainError::Validation("choose a game".into()));
        }
        let game_id = game
            .parse()
            .map_err(|_| DomainError::Validation(format!("unknown game selection: {game}")))?;

        Ok(PostInput {
            game_id,
            content: content.to_string(),
            title: self
                .title
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            tags: self.tags.as_deref().map(split_tags),
        })
    }
}

impl PostInput {
    /// Title for a new post, taken from the body when the form left it blank.
    pub fn title_or_derived(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => derive_title(&self.content),
        }
    }

    pub fn into_changes(self) -> PostChanges {
        PostChanges {
            game_id: self.game_id,
            content: self.content,
            title: self.title,
            tags: self.tags,
        }
    }
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn derive_title(content: &str) -> String {
    let first_line = content
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or_default();
    first_line.chars().take(DERIVED_TITLE_CHARS).collect()
}

/// Body of `POST /posts/{id}/comments`.
#[derive(Debug, Default, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub content: String,
}

impl CommentForm {
    pub fn validate(&self) -> Result<&str, DomainError> {
        match self.content.trim() {
            "" => Err(DomainError::Validation("comment cannot be empty".into())),
            content => Ok(content),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginAction {
    #[default]
    Login,
    /// Create the account, then log in.
    Register,
}

/// Body of `POST /login`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub action: LoginAction,
}

impl LoginForm {
    /// Trimmed username and password, both required.
    pub fn validate(&self) -> Result<(&str, &str), DomainError> {
        let username = self.username.trim();
        let password = self.password.trim();
        if username.is_empty() || password.is_empty() {
            return Err(DomainError::Validation(
                "enter a username and a password".into(),
            ));
        }
        Ok((username, password))
    }
}
