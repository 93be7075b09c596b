/// Blog post handlers - CRUD, publish toggling, AI draft generation
use crate::db::ContentStore;
use crate::error::{AppError, Result};
use crate::middleware::AdminIdentity;
use crate::models::{truthy, ImageFile, NewPost};
use crate::services::{GenerationService, MediaPublisher, PublishingService};
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::StreamExt;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Create a post from a multipart form.
///
/// Text fields arrive alongside the image in one request. Unknown fields
/// are ignored so the admin UI can evolve without breaking older servers.
pub async fn add_blog(
    store: web::Data<Arc<dyn ContentStore>>,
    media: web::Data<Arc<dyn MediaPublisher>>,
    identity: AdminIdentity,
    mut payload: Multipart,
) -> Result<HttpResponse> {
    let mut fields = NewPost::default();
    let mut image: Option<ImageFile> = None;

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::Validation(format!("Multipart error: {}", e)))?;

        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "title" => fields.title = Some(read_text_field(&mut field).await?),
            "subTitle" => fields.sub_title = Some(read_text_field(&mut field).await?),
            "description" => fields.description = Some(read_text_field(&mut field).await?),
            "category" => fields.category = Some(read_text_field(&mut field).await?),
            "isPublished" => fields.is_published = truthy(&read_text_field(&mut field).await?),
            "image" => {
                let file_name = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .unwrap_or("upload.png")
                    .to_string();
                let bytes = read_binary_field(&mut field).await?;
                image = Some(ImageFile { file_name, bytes });
            }
            _ => {
                // Drain and skip unknown fields
                while field.next().await.is_some() {}
            }
        }
    }

    let service = PublishingService::new(store.get_ref().clone(), media.get_ref().clone());
    let blog = service.create_post(&identity, fields, image).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Blog added successfully",
        "blog": blog,
    })))
}

/// Published posts only, newest first
pub async fn list_published_blogs(
    store: web::Data<Arc<dyn ContentStore>>,
    media: web::Data<Arc<dyn MediaPublisher>>,
) -> Result<HttpResponse> {
    let service = PublishingService::new(store.get_ref().clone(), media.get_ref().clone());
    let blogs = service.list_published().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "blogs": blogs,
    })))
}

/// A single post by id. Drafts are readable here so the admin preview works.
pub async fn get_blog(
    store: web::Data<Arc<dyn ContentStore>>,
    media: web::Data<Arc<dyn MediaPublisher>>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let post_id = parse_blog_id(&path)?;
    let service = PublishingService::new(store.get_ref().clone(), media.get_ref().clone());
    let blog = service.get_post(post_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "blog": blog,
    })))
}

/// Delete a post and, best effort, its comments
pub async fn delete_blog(
    store: web::Data<Arc<dyn ContentStore>>,
    media: web::Data<Arc<dyn MediaPublisher>>,
    identity: AdminIdentity,
    req: web::Json<BlogIdRequest>,
) -> Result<HttpResponse> {
    let service = PublishingService::new(store.get_ref().clone(), media.get_ref().clone());
    service.delete_post(&identity, req.id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Blog deleted successfully",
    })))
}

/// Flip a post between draft and published
pub async fn toggle_publish(
    store: web::Data<Arc<dyn ContentStore>>,
    media: web::Data<Arc<dyn MediaPublisher>>,
    identity: AdminIdentity,
    req: web::Json<BlogIdRequest>,
) -> Result<HttpResponse> {
    let service = PublishingService::new(store.get_ref().clone(), media.get_ref().clone());
    let blog = service.toggle_publish(&identity, req.id).await?;

    let message = if blog.is_published {
        "Blog published successfully"
    } else {
        "Blog unpublished successfully"
    };

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": message,
        "blog": blog,
    })))
}

/// Generate draft content for a topic via the AI backend
pub async fn generate_content(
    generation: web::Data<GenerationService>,
    _identity: AdminIdentity,
    req: web::Json<GenerateRequest>,
) -> Result<HttpResponse> {
    let content = generation.generate(&req.prompt).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "content": content,
    })))
}

async fn read_text_field(field: &mut actix_multipart::Field) -> Result<String> {
    let bytes = read_binary_field(field).await?;
    String::from_utf8(bytes)
        .map_err(|_| AppError::Validation("Form field is not valid UTF-8".to_string()))
}

async fn read_binary_field(field: &mut actix_multipart::Field) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let data = chunk.map_err(|e| AppError::Validation(format!("Read error: {}", e)))?;
        bytes.extend_from_slice(&data);
    }
    Ok(bytes)
}

/// An id that cannot be parsed can never resolve to a post, so it reports
/// the same way as an absent one.
pub(crate) fn parse_blog_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Blog not found".to_string()))
}

/// Request body carrying a post id
#[derive(Deserialize)]
pub struct BlogIdRequest {
    pub id: Uuid,
}

/// Request body for content generation
#[derive(Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}
