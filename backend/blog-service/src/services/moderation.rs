/// Moderation workflow - the admin comment queue
///
/// Every operation takes the verified [`AdminIdentity`] explicitly; the
/// credential has already been checked by the auth middleware by the time a
/// handler constructs this service.
use crate::db::ContentStore;
use crate::error::{AppError, Result};
use crate::middleware::AdminIdentity;
use crate::models::{DashboardData, ModeratedComment};
use std::sync::Arc;
use uuid::Uuid;

const DASHBOARD_RECENT_LIMIT: i64 = 5;

pub struct ModerationService {
    store: Arc<dyn ContentStore>,
}

impl ModerationService {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Every comment joined to its parent post title, newest first.
    ///
    /// A comment whose parent post has been deleted is filtered out at read
    /// time; that skip is the one intentional swallow in the system.
    pub async fn list_comments(&self, _admin: &AdminIdentity) -> Result<Vec<ModeratedComment>> {
        self.store.comments_for_moderation().await
    }

    /// Approve a comment. Idempotent: approving an approved comment is a
    /// no-op success. The flag only ever moves false to true; there is no
    /// unapprove.
    pub async fn approve(&self, admin: &AdminIdentity, comment_id: Uuid) -> Result<()> {
        if !self.store.approve_comment(comment_id).await? {
            return Err(AppError::NotFound("Comment not found".to_string()));
        }
        tracing::info!(%comment_id, admin = %admin.email, "comment approved");
        Ok(())
    }

    /// Permanently delete a comment. The confirmation prompt lives at the
    /// caller boundary, not here.
    pub async fn delete(&self, admin: &AdminIdentity, comment_id: Uuid) -> Result<()> {
        if !self.store.delete_comment(comment_id).await? {
            return Err(AppError::NotFound("Comment not found".to_string()));
        }
        tracing::info!(%comment_id, admin = %admin.email, "comment deleted");
        Ok(())
    }

    /// Admin dashboard summary: totals plus the most recent posts
    pub async fn dashboard(&self, _admin: &AdminIdentity) -> Result<DashboardData> {
        let recent_blogs = self.store.recent_posts(DASHBOARD_RECENT_LIMIT).await?;
        let blogs = self.store.count_posts().await?;
        let comments = self.store.count_comments().await?;
        let drafts = self.store.count_drafts().await?;

        Ok(DashboardData {
            blogs,
            comments,
            drafts,
            recent_blogs,
        })
    }
}
