/// Data models for blog-service
///
/// Two persisted entities: `Post` (a blog article, draft or published) and
/// `Comment` (reader feedback on a post, gated by moderation). JSON field
/// names are camelCase because the admin panel and public client both speak
/// that dialect.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A blog article
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub sub_title: String,
    /// Body HTML produced by the admin editor
    pub description: String,
    pub category: String,
    /// Optimized delivery URL on the image host
    pub image: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

/// A reader comment, pending until approved by moderation
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    /// Parent post id; serialized as `blog` to match the public API
    #[serde(rename = "blog")]
    pub post_id: Uuid,
    pub name: String,
    pub content: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a post, validated by the publishing workflow
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: Option<String>,
    pub sub_title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub is_published: bool,
}

/// A fully validated post ready for persistence
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub sub_title: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub is_published: bool,
}

/// An uploaded image file held in memory until it reaches the media host
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Parent post reference embedded in moderation views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRef {
    pub id: Uuid,
    pub title: String,
}

/// A comment joined to its parent post title, as the moderation table shows it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeratedComment {
    pub id: Uuid,
    pub blog: PostRef,
    pub name: String,
    pub content: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

/// Admin dashboard summary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub blogs: i64,
    pub comments: i64,
    pub drafts: i64,
    pub recent_blogs: Vec<Post>,
}

/// Accept the publish flag as either a JSON bool or a form string
///
/// Multipart forms deliver `isPublished` as text; only the literal "true"
/// (any case) or "1" publishes, everything else stays a draft.
pub fn truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthy_coercion() {
        assert!(truthy("true"));
        assert!(truthy("True"));
        assert!(truthy(" TRUE "));
        assert!(truthy("1"));
        assert!(!truthy("false"));
        assert!(!truthy(""));
        assert!(!truthy("yes"));
    }

    #[test]
    fn test_comment_serializes_parent_as_blog() {
        let comment = Comment {
            id: Uuid::new_v4(),
            post_id: Uuid::new_v4(),
            name: "Ada".to_string(),
            content: "Nice post".to_string(),
            is_approved: false,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&comment).unwrap();
        assert!(json.get("blog").is_some());
        assert!(json.get("postId").is_none());
        assert_eq!(json["isApproved"], serde_json::json!(false));
    }
}
