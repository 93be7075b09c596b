/// Publishing workflow - post creation, publish toggling, cascade deletion
use crate::db::ContentStore;
use crate::error::{AppError, Result};
use crate::middleware::AdminIdentity;
use crate::models::{ImageFile, NewPost, Post, PostDraft};
use crate::services::media::MediaPublisher;
use std::sync::Arc;
use uuid::Uuid;

pub struct PublishingService {
    store: Arc<dyn ContentStore>,
    media: Arc<dyn MediaPublisher>,
}

impl PublishingService {
    pub fn new(store: Arc<dyn ContentStore>, media: Arc<dyn MediaPublisher>) -> Self {
        Self { store, media }
    }

    /// Create a post: validate, upload the cover image, persist.
    ///
    /// Validation reports every missing field at once. The upload happens
    /// only after validation passes, and an upload failure surfaces as
    /// `UploadFailed`, never as a validation or persistence error.
    pub async fn create_post(
        &self,
        admin: &AdminIdentity,
        fields: NewPost,
        image: Option<ImageFile>,
    ) -> Result<Post> {
        let mut missing = Vec::new();
        if blank(&fields.title) {
            missing.push("title");
        }
        if blank(&fields.sub_title) {
            missing.push("subTitle");
        }
        if blank(&fields.description) {
            missing.push("description");
        }
        if blank(&fields.category) {
            missing.push("category");
        }
        if image.as_ref().map_or(true, |f| f.bytes.is_empty()) {
            missing.push("image");
        }
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }
        let Some(image) = image else {
            return Err(AppError::Validation(
                "Missing required fields: image".to_string(),
            ));
        };
        let asset = self
            .media
            .upload(&image.file_name, image.bytes)
            .await
            .map_err(|e| AppError::UploadFailed(e.to_string()))?;
        let optimized_url = self.media.delivery_url(&asset.file_path);

        let post = self
            .store
            .create_post(PostDraft {
                title: fields.title.unwrap_or_default(),
                sub_title: fields.sub_title.unwrap_or_default(),
                description: fields.description.unwrap_or_default(),
                category: fields.category.unwrap_or_default(),
                image: optimized_url,
                is_published: fields.is_published,
            })
            .await?;

        tracing::info!(post_id = %post.id, admin = %admin.email, "blog created");
        Ok(post)
    }

    /// Flip the publish flag. Resolve-then-mutate: the post is loaded first
    /// so a missing id fails with `NotFound` instead of mutating nothing.
    pub async fn toggle_publish(&self, admin: &AdminIdentity, post_id: Uuid) -> Result<Post> {
        let post = self
            .store
            .get_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog not found".to_string()))?;

        let now_published = !post.is_published;
        if !self.store.set_post_published(post_id, now_published).await? {
            // Deleted between resolve and mutate; treat as missing
            return Err(AppError::NotFound("Blog not found".to_string()));
        }

        tracing::info!(%post_id, published = now_published, admin = %admin.email, "publish flag toggled");
        Ok(Post {
            is_published: now_published,
            ..post
        })
    }

    /// Delete a post, then cascade over its comments.
    ///
    /// The cascade is best-effort and not transactional: the post delete
    /// must succeed before the comment sweep starts, and a failed sweep
    /// leaves comments that no read path will ever surface.
    pub async fn delete_post(&self, admin: &AdminIdentity, post_id: Uuid) -> Result<()> {
        if !self.store.delete_post(post_id).await? {
            return Err(AppError::NotFound("Blog not found".to_string()));
        }

        let swept = self.store.delete_comments_for_post(post_id).await?;
        tracing::info!(%post_id, comments_deleted = swept, admin = %admin.email, "blog deleted");
        Ok(())
    }

    /// Public listing: published posts only, newest first
    pub async fn list_published(&self) -> Result<Vec<Post>> {
        self.store.list_published_posts().await
    }

    /// Admin listing: every post, drafts included, newest first
    pub async fn list_all(&self, _admin: &AdminIdentity) -> Result<Vec<Post>> {
        self.store.list_all_posts().await
    }

    /// Fetch one post for the public reader view
    pub async fn get_post(&self, post_id: Uuid) -> Result<Post> {
        self.store
            .get_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog not found".to_string()))
    }
}

fn blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, |s| s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::InMemoryContentStore;
    use crate::services::media::{MediaError, UploadedAsset};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Mock publisher: counts uploads, optionally fails them
    struct MockPublisher {
        uploads: AtomicU32,
        fail: bool,
    }

    impl MockPublisher {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                uploads: AtomicU32::new(0),
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                uploads: AtomicU32::new(0),
                fail: true,
            })
        }

        fn upload_count(&self) -> u32 {
            self.uploads.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MediaPublisher for MockPublisher {
        async fn upload(
            &self,
            file_name: &str,
            _bytes: Vec<u8>,
        ) -> std::result::Result<UploadedAsset, MediaError> {
            self.uploads.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(MediaError::Api {
                    status: 500,
                    message: "host down".to_string(),
                });
            }
            Ok(UploadedAsset {
                file_path: format!("/blogs/{file_name}"),
            })
        }

        fn delivery_url(&self, file_path: &str) -> String {
            format!("https://ik.example.com/tr:q-auto,f-webp,w-1280{file_path}")
        }
    }

    fn admin() -> AdminIdentity {
        AdminIdentity {
            email: "admin@example.com".to_string(),
        }
    }

    fn full_fields() -> NewPost {
        NewPost {
            title: Some("A title".to_string()),
            sub_title: Some("A subtitle".to_string()),
            description: Some("<p>body</p>".to_string()),
            category: Some("Tech".to_string()),
            is_published: true,
        }
    }

    fn image() -> Option<ImageFile> {
        Some(ImageFile {
            file_name: "cover.png".to_string(),
            bytes: vec![1, 2, 3],
        })
    }

    #[tokio::test]
    async fn test_create_post_lists_every_missing_field() {
        let store = Arc::new(InMemoryContentStore::new());
        let media = MockPublisher::new();
        let service = PublishingService::new(store.clone(), media.clone());

        let fields = NewPost {
            title: Some("Only a title".to_string()),
            ..Default::default()
        };
        let err = service.create_post(&admin(), fields, None).await.unwrap_err();

        match err {
            AppError::Validation(msg) => {
                assert_eq!(
                    msg,
                    "Missing required fields: subTitle, description, category, image"
                );
            }
            other => panic!("expected Validation, got {:?}", other),
        }
        // Validation failed before any upload was attempted
        assert_eq!(media.upload_count(), 0);
        assert_eq!(store.count_posts().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_post_uploads_and_persists() {
        let store = Arc::new(InMemoryContentStore::new());
        let media = MockPublisher::new();
        let service = PublishingService::new(store.clone(), media.clone());

        let post = service
            .create_post(&admin(), full_fields(), image())
            .await
            .unwrap();

        assert_eq!(media.upload_count(), 1);
        assert_eq!(
            post.image,
            "https://ik.example.com/tr:q-auto,f-webp,w-1280/blogs/cover.png"
        );
        assert!(post.is_published);
        assert_eq!(store.count_posts().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_upload_failure_persists_nothing() {
        let store = Arc::new(InMemoryContentStore::new());
        let media = MockPublisher::failing();
        let service = PublishingService::new(store.clone(), media.clone());

        let err = service
            .create_post(&admin(), full_fields(), image())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::UploadFailed(_)));
        assert_eq!(store.count_posts().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_toggle_publish_flips_both_ways() {
        let store = Arc::new(InMemoryContentStore::new());
        let service = PublishingService::new(store.clone(), MockPublisher::new());

        let post = service
            .create_post(&admin(), full_fields(), image())
            .await
            .unwrap();

        let toggled = service.toggle_publish(&admin(), post.id).await.unwrap();
        assert!(!toggled.is_published);

        let toggled_back = service.toggle_publish(&admin(), post.id).await.unwrap();
        assert!(toggled_back.is_published);
    }

    #[tokio::test]
    async fn test_toggle_publish_unknown_post_is_not_found() {
        let store = Arc::new(InMemoryContentStore::new());
        let service = PublishingService::new(store, MockPublisher::new());

        let err = service
            .toggle_publish(&admin(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_post_cascades_to_comments() {
        let store = Arc::new(InMemoryContentStore::new());
        let service = PublishingService::new(store.clone(), MockPublisher::new());

        let post = service
            .create_post(&admin(), full_fields(), image())
            .await
            .unwrap();
        for i in 0..3 {
            store
                .create_comment(post.id, "Reader", &format!("comment {i}"))
                .await
                .unwrap();
        }
        // A comment on another post survives
        let other = store
            .create_post(PostDraft {
                title: "Other".to_string(),
                sub_title: "s".to_string(),
                description: "d".to_string(),
                category: "c".to_string(),
                image: "i".to_string(),
                is_published: true,
            })
            .await
            .unwrap();
        store.create_comment(other.id, "Reader", "kept").await.unwrap();

        service.delete_post(&admin(), post.id).await.unwrap();

        assert!(store.get_post(post.id).await.unwrap().is_none());
        assert!(store
            .approved_comments_for_post(post.id)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(store.count_comments().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_unknown_post_is_not_found() {
        let store = Arc::new(InMemoryContentStore::new());
        let service = PublishingService::new(store, MockPublisher::new());

        let err = service
            .delete_post(&admin(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_public_listing_hides_drafts() {
        let store = Arc::new(InMemoryContentStore::new());
        let service = PublishingService::new(store.clone(), MockPublisher::new());

        service
            .create_post(&admin(), full_fields(), image())
            .await
            .unwrap();
        let mut draft_fields = full_fields();
        draft_fields.is_published = false;
        service
            .create_post(&admin(), draft_fields, image())
            .await
            .unwrap();

        assert_eq!(service.list_published().await.unwrap().len(), 1);
        assert_eq!(service.list_all(&admin()).await.unwrap().len(), 2);
    }
}
