/// Postgres-backed content store
use crate::db::ContentStore;
use crate::error::Result;
use crate::models::{Comment, ModeratedComment, Post, PostDraft, PostRef};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Create the posts and comments tables when they are missing.
///
/// There is deliberately no foreign key from comments to posts: post
/// deletion cascades over comments at the workflow layer, best-effort, and
/// an interrupted cascade leaves rows with a dangling post_id. Read paths
/// that join filter those rows out.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS posts (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            title TEXT NOT NULL,
            sub_title TEXT NOT NULL,
            description TEXT NOT NULL,
            category TEXT NOT NULL,
            image TEXT NOT NULL,
            is_published BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS comments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            post_id UUID NOT NULL,
            name TEXT NOT NULL,
            content TEXT NOT NULL,
            is_approved BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_comments_post_id ON comments (post_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Flat row shape for the moderation join
#[derive(FromRow)]
struct ModerationRow {
    id: Uuid,
    post_id: Uuid,
    post_title: String,
    name: String,
    content: String,
    is_approved: bool,
    created_at: DateTime<Utc>,
}

impl From<ModerationRow> for ModeratedComment {
    fn from(row: ModerationRow) -> Self {
        ModeratedComment {
            id: row.id,
            blog: PostRef {
                id: row.post_id,
                title: row.post_title,
            },
            name: row.name,
            content: row.content,
            is_approved: row.is_approved,
            created_at: row.created_at,
        }
    }
}

#[derive(Clone)]
pub struct PgContentStore {
    pool: PgPool,
}

impl PgContentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn create_post(&self, draft: PostDraft) -> Result<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, sub_title, description, category, image, is_published)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, sub_title, description, category, image, is_published, created_at
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.sub_title)
        .bind(&draft.description)
        .bind(&draft.category)
        .bind(&draft.image)
        .bind(draft.is_published)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    async fn get_post(&self, id: Uuid) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, sub_title, description, category, image, is_published, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn list_published_posts(&self) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, sub_title, description, category, image, is_published, created_at
            FROM posts
            WHERE is_published = TRUE
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn list_all_posts(&self) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, sub_title, description, category, image, is_published, created_at
            FROM posts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn recent_posts(&self, limit: i64) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, sub_title, description, category, image, is_published, created_at
            FROM posts
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn count_posts(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }

    async fn count_drafts(&self) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM posts WHERE is_published = FALSE")
                .fetch_one(&self.pool)
                .await?;
        Ok(count.0)
    }

    async fn set_post_published(&self, id: Uuid, published: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE posts SET is_published = $1 WHERE id = $2")
            .bind(published)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_post(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn create_comment(&self, post_id: Uuid, name: &str, content: &str) -> Result<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (post_id, name, content)
            VALUES ($1, $2, $3)
            RETURNING id, post_id, name, content, is_approved, created_at
            "#,
        )
        .bind(post_id)
        .bind(name)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn approve_comment(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("UPDATE comments SET is_approved = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_comment(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_comments_for_post(&self, post_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM comments WHERE post_id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn comments_for_moderation(&self) -> Result<Vec<ModeratedComment>> {
        // Inner join drops comments whose parent post is gone
        let rows = sqlx::query_as::<_, ModerationRow>(
            r#"
            SELECT c.id, c.post_id, p.title AS post_title,
                   c.name, c.content, c.is_approved, c.created_at
            FROM comments c
            JOIN posts p ON p.id = c.post_id
            ORDER BY c.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ModeratedComment::from).collect())
    }

    async fn approved_comments_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, post_id, name, content, is_approved, created_at
            FROM comments
            WHERE post_id = $1 AND is_approved = TRUE
            ORDER BY created_at DESC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn count_comments(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM comments")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }
}
