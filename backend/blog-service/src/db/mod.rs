/// Content store for posts and comments
///
/// The workflows talk to storage through the [`ContentStore`] trait so they
/// can be exercised against an in-process store in tests. The production
/// implementation is [`postgres::PgContentStore`].
use crate::error::Result;
use crate::models::{Comment, ModeratedComment, Post, PostDraft};
use async_trait::async_trait;
use uuid::Uuid;

pub mod postgres;

#[cfg(test)]
pub mod memory;

pub use postgres::{ensure_schema, PgContentStore};

/// Persistence operations over the two entity collections.
///
/// Reads that join comments to their parent post use an inner join, so a
/// comment whose parent was deleted is never surfaced.
#[async_trait]
pub trait ContentStore: Send + Sync {
    // Posts

    async fn create_post(&self, draft: PostDraft) -> Result<Post>;

    async fn get_post(&self, id: Uuid) -> Result<Option<Post>>;

    /// Published posts only, newest first
    async fn list_published_posts(&self) -> Result<Vec<Post>>;

    /// Every post, drafts included, newest first
    async fn list_all_posts(&self) -> Result<Vec<Post>>;

    async fn recent_posts(&self, limit: i64) -> Result<Vec<Post>>;

    async fn count_posts(&self) -> Result<i64>;

    async fn count_drafts(&self) -> Result<i64>;

    /// Set the publish flag. Returns false when the post does not exist.
    async fn set_post_published(&self, id: Uuid, published: bool) -> Result<bool>;

    /// Delete a post. Returns false when the post does not exist. Does NOT
    /// touch the post's comments; cascading is the workflow's job.
    async fn delete_post(&self, id: Uuid) -> Result<bool>;

    // Comments

    async fn create_comment(&self, post_id: Uuid, name: &str, content: &str) -> Result<Comment>;

    /// Mark a comment approved. Returns false when the comment does not
    /// exist; approving an already-approved comment succeeds.
    async fn approve_comment(&self, id: Uuid) -> Result<bool>;

    /// Delete a comment. Returns false when the comment does not exist.
    async fn delete_comment(&self, id: Uuid) -> Result<bool>;

    /// Delete every comment referencing the given post, returning how many
    /// rows went away.
    async fn delete_comments_for_post(&self, post_id: Uuid) -> Result<u64>;

    /// All comments joined to their parent post title, newest first.
    /// Comments with a dangling parent reference are excluded.
    async fn comments_for_moderation(&self) -> Result<Vec<ModeratedComment>>;

    /// Approved comments on one post, newest first
    async fn approved_comments_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>>;

    async fn count_comments(&self) -> Result<i64>;
}
