//! Post and comment pages.

use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use axum::Form;
use domains::DomainError;
use serde::Deserialize;

use super::render;
use crate::error::ApiError;
use crate::forms::{CommentForm, PostForm};
use crate::session::CurrentSession;
use crate::state::SharedState;
use crate::views::{
    CommentView, HomepageTemplate, PostDetailTemplate, PostFormTemplate, PostSummary,
};

#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    pub tag: Option<String>,
}

/// `GET /homepage`: every post, newest first, optionally narrowed to a tag.
pub async fn homepage(
    State(state): State<SharedState>,
    session: CurrentSession,
    Query(query): Query<HomeQuery>,
) -> Result<Html<String>, ApiError> {
    let tag = query.tag.as_deref().map(str::trim).filter(|t| !t.is_empty());
    let posts = match tag {
        Some(tag) => state.forum.list_posts_by_tag(tag).await?,
        None => state.forum.list_posts().await?,
    };
    let games = state.forum.list_games().await?;

    let mut summaries = Vec::with_capacity(posts.len());
    for post in &posts {
        let author = state.forum.get_user(post.user_id).await?;
        let game = games.iter().find(|g| g.id == post.game_id);
        summaries.push(PostSummary::new(post, &author, game));
    }

    render(HomepageTemplate::new(
        session.username(),
        state.forum.tags(),
        tag,
        summaries,
    ))
}

/// `GET /posts/new`
pub async fn new_post_form(
    State(state): State<SharedState>,
    session: CurrentSession,
) -> Result<Html<String>, ApiError> {
    let games = state.forum.list_games().await?;
    render(PostFormTemplate::create(
        session.username(),
        &games,
        state.forum.tags(),
    ))
}

/// `POST /posts`
pub async fn create_post(
    State(state): State<SharedState>,
    session: CurrentSession,
    Form(form): Form<PostForm>,
) -> Result<Redirect, ApiError> {
    let input = form.validate()?;
    let title = input.title_or_derived();
    state
        .forum
        .create_post(
            session.author_id(),
            input.game_id,
            &title,
            &input.content,
            input.tags.unwrap_or_default(),
        )
        .await?;
    state.metrics.posts_created.inc();
    Ok(Redirect::to("/homepage"))
}

/// `GET /posts/{id}`: the post with its comments, newest comment first.
pub async fn show_post(
    State(state): State<SharedState>,
    session: CurrentSession,
    Path(id): Path<i64>,
) -> Result<Html<String>, ApiError> {
    let post = state
        .forum
        .get_post(id)
        .await?
        .ok_or(DomainError::NotFound("post", id))?;
    let author = state.forum.get_user(post.user_id).await?;
    let game = state.forum.get_game(post.game_id).await?;

    let comments = state.forum.list_comments_for_post(id).await?;
    let mut views = Vec::with_capacity(comments.len());
    for comment in &comments {
        let commenter = state.forum.get_user(comment.user_id).await?;
        views.push(CommentView::new(comment, &commenter));
    }

    render(PostDetailTemplate {
        current_user: session.username(),
        post: PostSummary::new(&post, &author, game.as_ref()),
        content: post.content.clone(),
        comments: views,
    })
}

/// `POST /posts/{id}/comments`
pub async fn add_comment(
    State(state): State<SharedState>,
    session: CurrentSession,
    Path(id): Path<i64>,
    Form(form): Form<CommentForm>,
) -> Result<Redirect, ApiError> {
    let content = form.validate()?;
    state
        .forum
        .add_comment(id, session.author_id(), content)
        .await?;
    state.metrics.comments_created.inc();
    Ok(Redirect::to(&format!("/posts/{id}")))
}

/// `GET /posts/{id}/edit`
pub async fn edit_post_form(
    State(state): State<SharedState>,
    session: CurrentSession,
    Path(id): Path<i64>,
) -> Result<Html<String>, ApiError> {
    let post = state
        .forum
        .get_post(id)
        .await?
        .ok_or(DomainError::NotFound("post", id))?;
    let games = state.forum.list_games().await?;
    render(PostFormTemplate::edit(
        session.username(),
        &post,
        &games,
        state.forum.tags(),
    ))
}

/// `PUT /posts/{id}`
pub async fn update_post(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Form(form): Form<PostForm>,
) -> Result<Redirect, ApiError> {
    let changes = form.validate()?.into_changes();
    state.forum.update_post(id, changes).await?;
    state.metrics.posts_updated.inc();
    Ok(Redirect::to("/homepage"))
}

/// `DELETE /posts/{id}`
pub async fn delete_post(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Redirect, ApiError> {
    state.forum.delete_post(id).await?;
    state.metrics.posts_deleted.inc();
    Ok(Redirect::to("/homepage"))
}
