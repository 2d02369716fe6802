//! # ForumService
//!
//! Typed operations over the record store. Every mutation loads the whole
//! collection, changes it in memory and writes the whole collection back.
//! Concurrent mutations of the same collection race and the last write wins.

use std::sync::Arc;

use domains::store::{self, Collection};
use domains::{
    dedup_tags, Clock, Comment, DomainError, Game, Post, PostChanges, RecordStore, Result, Seed,
    User,
};
use tracing::{debug, info, warn};

use crate::ids::IdGenerator;
use crate::session::Session;

pub struct ForumService {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
    ids: IdGenerator,
    /// Global tag vocabulary from the seed.
    tags: Vec<String>,
}

impl ForumService {
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>, tags: Vec<String>) -> Self {
        Self {
            store,
            clock,
            ids: IdGenerator::new(),
            tags,
        }
    }

    /// Applies `seed` to the store, then builds the service around it.
    pub async fn open(
        store: Arc<dyn RecordStore>,
        clock: Arc<dyn Clock>,
        seed: &Seed,
    ) -> Result<Self> {
        let initialised = store::load(store.as_ref(), seed).await?;
        if !initialised.is_empty() {
            info!(?initialised, "initialised collections from seed");
        }
        Ok(Self::new(store, clock, seed.tags.clone()))
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    // ── Users ───────────────────────────────────────────────────────────────

    pub async fn register(&self, username: &str, password: &str) -> Result<User> {
        let mut users: Vec<User> = self.read(Collection::Users).await?;
        if users.iter().any(|u| u.username == username) {
            return Err(DomainError::Conflict("username taken".into()));
        }

        let floor = users.iter().map(|u| u.id).max().unwrap_or(0);
        let user = User {
            id: self.ids.next_id(self.clock.now(), floor),
            username: username.to_string(),
            password: password.to_string(),
        };
        users.push(user.clone());
        self.write(Collection::Users, &users).await?;

        info!(user_id = user.id, username, "user registered");
        Ok(user)
    }

    pub async fn login(&self, session: &mut Session, username: &str, password: &str) -> Result<User> {
        let users: Vec<User> = self.read(Collection::Users).await?;
        match users
            .into_iter()
            .find(|u| u.username == username && u.password == password)
        {
            Some(user) => {
                debug!(user_id = user.id, "login succeeded");
                session.set_current_user(user.clone());
                Ok(user)
            }
            None => {
                debug!(username, "login rejected");
                Err(DomainError::Unauthorized("invalid credentials".into()))
            }
        }
    }

    pub fn logout(&self, session: &mut Session) {
        session.clear_current_user();
    }

    /// Never fails: a missing user resolves to [`User::unknown`].
    pub async fn get_user(&self, id: i64) -> Result<User> {
        let users: Vec<User> = self.read(Collection::Users).await?;
        Ok(users
            .into_iter()
            .find(|u| u.id == id)
            .unwrap_or_else(User::unknown))
    }

    /// Rebuilds the session persisted by [`Self::persist_session`].
    pub async fn restore_session(&self) -> Result<Session> {
        let current: Vec<User> = self.read(Collection::CurrentUser).await?;
        Ok(match current.into_iter().next() {
            Some(user) => Session::with_user(user),
            None => Session::new(),
        })
    }

    pub async fn persist_session(&self, session: &Session) -> Result<()> {
        match session.current_user() {
            Some(user) => {
                self.write(Collection::CurrentUser, std::slice::from_ref(user))
                    .await
            }
            None => {
                self.store.remove(Collection::CurrentUser).await?;
                Ok(())
            }
        }
    }

    // ── Games ───────────────────────────────────────────────────────────────

    pub async fn list_games(&self) -> Result<Vec<Game>> {
        self.read(Collection::Games).await
    }

    pub async fn get_game(&self, id: i64) -> Result<Option<Game>> {
        let games: Vec<Game> = self.read(Collection::Games).await?;
        Ok(games.into_iter().find(|g| g.id == id))
    }

    // ── Posts ───────────────────────────────────────────────────────────────

    /// Stores a new post in front of all others. Callers validate that the
    /// title and content are present.
    pub async fn create_post(
        &self,
        user_id: i64,
        game_id: i64,
        title: &str,
        content: &str,
        tags: Vec<String>,
    ) -> Result<Post> {
        let mut posts: Vec<Post> = self.read(Collection::Posts).await?;

        let now = self.clock.now();
        let floor = posts.iter().map(|p| p.id).max().unwrap_or(0);
        let post = Post {
            id: self.ids.next_id(now, floor),
            user_id,
            game_id,
            title: title.to_string(),
            content: content.to_string(),
            tags: dedup_tags(tags),
            created_at: now,
        };
        posts.insert(0, post.clone());
        self.write(Collection::Posts, &posts).await?;

        info!(post_id = post.id, user_id, game_id, "post created");
        Ok(post)
    }

    /// Most recent first.
    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        self.read(Collection::Posts).await
    }

    pub async fn list_posts_by_tag(&self, tag: &str) -> Result<Vec<Post>> {
        let posts: Vec<Post> = self.read(Collection::Posts).await?;
        Ok(posts.into_iter().filter(|p| p.has_tag(tag)).collect())
    }

    pub async fn get_post(&self, id: i64) -> Result<Option<Post>> {
        let posts: Vec<Post> = self.read(Collection::Posts).await?;
        Ok(posts.into_iter().find(|p| p.id == id))
    }

    /// Id, author and creation time never change.
    pub async fn update_post(&self, id: i64, changes: PostChanges) -> Result<Post> {
        let mut posts: Vec<Post> = self.read(Collection::Posts).await?;
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DomainError::NotFound("post", id))?;

        post.game_id = changes.game_id;
        post.content = changes.content;
        if let Some(title) = changes.title {
            post.title = title;
        }
        if let Some(tags) = changes.tags {
            post.tags = dedup_tags(tags);
        }
        let updated = post.clone();
        self.write(Collection::Posts, &posts).await?;

        info!(post_id = id, "post updated");
        Ok(updated)
    }

    /// Removes the post together with its comments.
    pub async fn delete_post(&self, id: i64) -> Result<Post> {
        let mut posts: Vec<Post> = self.read(Collection::Posts).await?;
        let index = posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(DomainError::NotFound("post", id))?;

        // Comments go first so a failed second write never leaves orphans.
        let comments: Vec<Comment> = self.read(Collection::Comments).await?;
        let kept: Vec<Comment> = comments
            .iter()
            .filter(|c| c.post_id != id)
            .cloned()
            .collect();
        let comments_changed = kept.len() != comments.len();
        if comments_changed {
            self.write(Collection::Comments, &kept).await?;
        }

        let removed = posts.remove(index);
        if let Err(e) = self.write(Collection::Posts, &posts).await {
            // The post is still there, so its comments must be too.
            if comments_changed {
                if let Err(restore) = self.write(Collection::Comments, &comments).await {
                    warn!(post_id = id, error = %restore, "could not restore comments");
                }
            }
            return Err(e);
        }

        info!(
            post_id = id,
            comments_removed = comments.len() - kept.len(),
            "post deleted"
        );
        Ok(removed)
    }

    // ── Comments ────────────────────────────────────────────────────────────

    /// Rejects comments on posts that do not exist.
    pub async fn add_comment(&self, post_id: i64, user_id: i64, content: &str) -> Result<Comment> {
        if self.get_post(post_id).await?.is_none() {
            warn!(post_id, "comment on missing post rejected");
            return Err(DomainError::NotFound("post", post_id));
        }

        let mut comments: Vec<Comment> = self.read(Collection::Comments).await?;
        let now = self.clock.now();
        let floor = comments.iter().map(|c| c.id).max().unwrap_or(0);
        let comment = Comment {
            id: self.ids.next_id(now, floor),
            post_id,
            user_id,
            content: content.to_string(),
            created_at: now,
        };
        comments.push(comment.clone());
        self.write(Collection::Comments, &comments).await?;

        info!(comment_id = comment.id, post_id, user_id, "comment added");
        Ok(comment)
    }

    /// Newest first; equal timestamps fall back to id order.
    pub async fn list_comments_for_post(&self, post_id: i64) -> Result<Vec<Comment>> {
        let comments: Vec<Comment> = self.read(Collection::Comments).await?;
        let mut matching: Vec<Comment> = comments
            .into_iter()
            .filter(|c| c.post_id == post_id)
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(matching)
    }

    async fn read<T>(&self, collection: Collection) -> Result<Vec<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        Ok(store::read_collection(self.store.as_ref(), collection).await?)
    }

    async fn write<T>(&self, collection: Collection, records: &[T]) -> Result<()>
    where
        T: serde::Serialize + Sync,
    {
        Ok(store::write_collection(self.store.as_ref(), collection, records).await?)
    }
}
