/// Scoped query entry points for nested and private resources.
///
/// Comments are only reachable through their parent post, and follow edges
/// are only reachable as the requesting user. Pinning those ids at scope
/// construction keeps every downstream query inside the right boundary.
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{comment_repo, follow_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::{Comment, CommentWithAuthor, Follow, FollowWithUsers, Post};

/// Comment operations pinned to a parent post.
///
/// Resolving the scope proves the post exists; a missing post is a 404
/// before any comment lookup runs. Every query carries the resolved post id,
/// so a comment id belonging to another post can never be read or mutated
/// through this scope.
pub struct CommentScope {
    post: Post,
}

impl CommentScope {
    pub async fn resolve(pool: &PgPool, post_id: Uuid) -> Result<Self> {
        let post = post_repo::find_post_by_id(pool, post_id)
            .await?
            .ok_or_else(|| AppError::not_found("post"))?;

        Ok(Self { post })
    }

    pub fn post(&self) -> &Post {
        &self.post
    }

    pub async fn list(
        &self,
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CommentWithAuthor>> {
        Ok(comment_repo::list_comments_for_post(pool, self.post.id, limit, offset).await?)
    }

    pub async fn count(&self, pool: &PgPool) -> Result<i64> {
        Ok(comment_repo::count_comments_for_post(pool, self.post.id).await?)
    }

    pub async fn find(&self, pool: &PgPool, comment_id: Uuid) -> Result<Comment> {
        comment_repo::find_comment_in_post(pool, self.post.id, comment_id)
            .await?
            .ok_or_else(|| AppError::not_found("comment"))
    }

    pub async fn find_with_author(
        &self,
        pool: &PgPool,
        comment_id: Uuid,
    ) -> Result<CommentWithAuthor> {
        comment_repo::find_comment_with_author_in_post(pool, self.post.id, comment_id)
            .await?
            .ok_or_else(|| AppError::not_found("comment"))
    }

    /// Attach a new comment to the scoped post. The post id comes from the
    /// resolved scope, never from the request body.
    pub async fn create(&self, pool: &PgPool, author_id: Uuid, text: &str) -> Result<Comment> {
        Ok(comment_repo::create_comment(pool, self.post.id, author_id, text).await?)
    }
}

/// Follow operations pinned to the requesting user.
///
/// Listing never exposes another user's edges, and creation records the
/// scoped user as the follower regardless of what the payload claims.
pub struct FollowScope {
    user_id: Uuid,
    search: Option<String>,
}

impl FollowScope {
    pub fn for_user(user_id: Uuid) -> Self {
        Self {
            user_id,
            search: None,
        }
    }

    /// Narrow listing to edges whose target username contains `term`,
    /// case-insensitive. Blank terms are ignored.
    pub fn with_search(mut self, term: Option<String>) -> Self {
        self.search = term.filter(|t| !t.is_empty());
        self
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub async fn list(
        &self,
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FollowWithUsers>> {
        Ok(follow_repo::list_follows_for_user(
            pool,
            self.user_id,
            self.search.as_deref(),
            limit,
            offset,
        )
        .await?)
    }

    pub async fn count(&self, pool: &PgPool) -> Result<i64> {
        Ok(follow_repo::count_follows_for_user(pool, self.user_id, self.search.as_deref()).await?)
    }

    pub async fn create(&self, pool: &PgPool, following_id: Uuid) -> Result<Follow> {
        Ok(follow_repo::create_follow(pool, self.user_id, following_id).await?)
    }
}
