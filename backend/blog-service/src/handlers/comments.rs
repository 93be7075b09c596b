/// Public comment handlers - submission and reading
use crate::db::ContentStore;
use crate::error::{AppError, Result};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Submit a comment. It lands unapproved and waits for moderation.
pub async fn add_comment(
    store: web::Data<Arc<dyn ContentStore>>,
    req: web::Json<AddCommentRequest>,
) -> Result<HttpResponse> {
    let name = req.name.trim();
    let content = req.content.trim();
    if name.is_empty() || content.is_empty() {
        return Err(AppError::Validation(
            "Name and content are required".to_string(),
        ));
    }

    if store.get_post(req.blog).await?.is_none() {
        return Err(AppError::NotFound("Blog not found".to_string()));
    }

    store.create_comment(req.blog, name, content).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Comment added for review",
    })))
}

/// Approved comments for one post, for the public article page
pub async fn get_blog_comments(
    store: web::Data<Arc<dyn ContentStore>>,
    req: web::Json<BlogCommentsRequest>,
) -> Result<HttpResponse> {
    let comments = store.approved_comments_for_post(req.blog_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "comments": comments,
    })))
}

/// Request body for public comment submission
#[derive(Deserialize)]
pub struct AddCommentRequest {
    pub blog: Uuid,
    pub name: String,
    pub content: String,
}

/// Request body for fetching a post's approved comments
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogCommentsRequest {
    pub blog_id: Uuid,
}
