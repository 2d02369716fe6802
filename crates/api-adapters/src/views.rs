//! Askama templates and the flattened records they render.
//!
//! Handlers resolve authors and games before rendering so templates never
//! touch the forum service.

use askama::Template;
use chrono::{DateTime, Utc};
use domains::{Comment, Game, Post, User};

/// Shown when a post points at a game that is not in the catalogue.
pub const UNKNOWN_GAME: &str = "unknown game";

fn display_time(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

pub struct PostSummary {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub game: String,
    pub tags: Vec<String>,
    pub created_at: String,
}

impl PostSummary {
    pub fn new(post: &Post, author: &User, game: Option<&Game>) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            author: author.username.clone(),
            game: game.map_or_else(|| UNKNOWN_GAME.to_string(), |g| g.title.clone()),
            tags: post.tags.clone(),
            created_at: display_time(&post.created_at),
        }
    }
}

pub struct CommentView {
    pub author: String,
    pub content: String,
    pub created_at: String,
}

impl CommentView {
    pub fn new(comment: &Comment, author: &User) -> Self {
        Self {
            author: author.username.clone(),
            content: comment.content.clone(),
            created_at: display_time(&comment.created_at),
        }
    }
}

pub struct TagFilter {
    pub name: String,
    pub active: bool,
}

pub struct GameOption {
    pub id: i64,
    pub title: String,
    pub selected: bool,
}

impl GameOption {
    pub fn list(games: &[Game], selected: Option<i64>) -> Vec<Self> {
        games
            .iter()
            .map(|g| Self {
                id: g.id,
                title: g.title.clone(),
                selected: Some(g.id) == selected,
            })
            .collect()
    }
}

#[derive(Template)]
#[template(path = "homepage.html")]
pub struct HomepageTemplate {
    pub current_user: Option<String>,
    pub all_active: bool,
    pub tags: Vec<TagFilter>,
    pub posts: Vec<PostSummary>,
}

impl HomepageTemplate {
    pub fn new(
        current_user: Option<String>,
        vocabulary: &[String],
        active_tag: Option<&str>,
        posts: Vec<PostSummary>,
    ) -> Self {
        Self {
            current_user,
            all_active: active_tag.is_none(),
            tags: vocabulary
                .iter()
                .map(|name| TagFilter {
                    name: name.clone(),
                    active: Some(name.as_str()) == active_tag,
                })
                .collect(),
            posts,
        }
    }
}

/// Shared by the create and edit pages.
#[derive(Template)]
#[template(path = "post_form.html")]
pub struct PostFormTemplate {
    pub current_user: Option<String>,
    pub heading: String,
    pub action: String,
    pub method_put: bool,
    pub submit_label: String,
    pub games: Vec<GameOption>,
    pub title: String,
    pub postbody: String,
    pub tags: String,
    pub vocabulary: Vec<String>,
}

impl PostFormTemplate {
    pub fn create(current_user: Option<String>, games: &[Game], vocabulary: &[String]) -> Self {
        Self {
            current_user,
            heading: "New post".into(),
            action: "/posts".into(),
            method_put: false,
            submit_label: "Publish".into(),
            games: GameOption::list(games, games.first().map(|g| g.id)),
            title: String::new(),
            postbody: String::new(),
            tags: String::new(),
            vocabulary: vocabulary.to_vec(),
        }
    }

    pub fn edit(
        current_user: Option<String>,
        post: &Post,
        games: &[Game],
        vocabulary: &[String],
    ) -> Self {
        Self {
            current_user,
            heading: "Edit post".into(),
            action: format!("/posts/{}", post.id),
            method_put: true,
            submit_label: "Save".into(),
            games: GameOption::list(games, Some(post.game_id)),
            title: post.title.clone(),
            postbody: post.content.clone(),
            tags: post.tags.join(", "),
            vocabulary: vocabulary.to_vec(),
        }
    }
}

#[derive(Template)]
#[template(path = "post_detail.html")]
pub struct PostDetailTemplate {
    pub current_user: Option<String>,
    pub post: PostSummary,
    pub content: String,
    pub comments: Vec<CommentView>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub current_user: Option<String>,
    pub error: Option<String>,
    pub username: String,
}

/// Error and notice pages.
#[derive(Template)]
#[template(path = "message.html")]
pub struct MessageTemplate {
    pub current_user: Option<String>,
    pub heading: String,
    pub message: String,
}
