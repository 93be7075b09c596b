/// Admin handlers - login and the moderation endpoints
use crate::config::Config;
use crate::db::ContentStore;
use crate::error::{AppError, Result};
use crate::middleware::AdminIdentity;
use crate::services::{MediaPublisher, ModerationService, PublishingService};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Log in with the statically configured admin credentials
///
/// On success issues a fresh signed token; there is no refresh endpoint, an
/// expired token means logging in again.
pub async fn login(
    config: web::Data<Config>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    if req.email != config.admin.email || req.password != config.admin.password {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = auth_core::generate_admin_token(&req.email)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "token": token,
    })))
}

/// Every post, drafts included, newest first
pub async fn list_all_blogs(
    store: web::Data<Arc<dyn ContentStore>>,
    media: web::Data<Arc<dyn MediaPublisher>>,
    identity: AdminIdentity,
) -> Result<HttpResponse> {
    let service = PublishingService::new(store.get_ref().clone(), media.get_ref().clone());
    let blogs = service.list_all(&identity).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "blogs": blogs,
    })))
}

/// The moderation queue: comments joined to their parent post title
pub async fn list_comments(
    store: web::Data<Arc<dyn ContentStore>>,
    identity: AdminIdentity,
) -> Result<HttpResponse> {
    let service = ModerationService::new(store.get_ref().clone());
    let comments = service.list_comments(&identity).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "comments": comments,
    })))
}

/// Dashboard summary for the admin landing page
pub async fn dashboard(
    store: web::Data<Arc<dyn ContentStore>>,
    identity: AdminIdentity,
) -> Result<HttpResponse> {
    let service = ModerationService::new(store.get_ref().clone());
    let dashboard_data = service.dashboard(&identity).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "dashboardData": dashboard_data,
    })))
}

/// Approve a pending comment
pub async fn approve_comment(
    store: web::Data<Arc<dyn ContentStore>>,
    identity: AdminIdentity,
    req: web::Json<CommentIdRequest>,
) -> Result<HttpResponse> {
    let service = ModerationService::new(store.get_ref().clone());
    service.approve(&identity, req.id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Comment approved successfully",
    })))
}

/// Permanently delete a comment. The admin UI confirms before calling.
pub async fn delete_comment(
    store: web::Data<Arc<dyn ContentStore>>,
    identity: AdminIdentity,
    req: web::Json<CommentIdRequest>,
) -> Result<HttpResponse> {
    let service = ModerationService::new(store.get_ref().clone());
    service.delete(&identity, req.id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Comment deleted successfully",
    })))
}

/// Request body for login
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body carrying a comment id
#[derive(Deserialize)]
pub struct CommentIdRequest {
    pub id: Uuid,
}
