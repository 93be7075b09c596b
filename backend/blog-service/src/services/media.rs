/// Media publish adapter
///
/// Uploads post images to an ImageKit-style host and derives the optimized
/// delivery URL the stored post carries: webp conversion, width capped at
/// 1280, automatic quality.
use crate::config::MediaConfig;
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Transformation segment applied to every delivered post image
const DELIVERY_TRANSFORMATION: &str = "tr:q-auto,f-webp,w-1280";

/// Raw failures from the media host; the publishing workflow maps these to
/// `UploadFailed`.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Upload rejected ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected upload response: {0}")]
    Parse(String),
}

/// A stored asset on the media host
#[derive(Debug, Clone)]
pub struct UploadedAsset {
    /// Path of the stored file, e.g. `/blogs/cover.png`
    pub file_path: String,
}

#[async_trait]
pub trait MediaPublisher: Send + Sync {
    /// Upload raw image bytes, returning where the host stored them
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadedAsset, MediaError>;

    /// Delivery URL for a stored file, with the optimization transformation
    fn delivery_url(&self, file_path: &str) -> String;
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    file_path: String,
}

/// ImageKit upload API client
pub struct ImageKitClient {
    http: reqwest::Client,
    config: MediaConfig,
}

impl ImageKitClient {
    pub fn new(config: MediaConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl MediaPublisher for ImageKitClient {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadedAsset, MediaError> {
        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string()),
            )
            .text("fileName", file_name.to_string())
            .text("folder", self.config.folder.clone());

        let response = self
            .http
            .post(&self.config.upload_endpoint)
            .basic_auth(&self.config.private_key, Some(""))
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "image upload failed: {}", message);
            return Err(MediaError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| MediaError::Parse(e.to_string()))?;

        Ok(UploadedAsset {
            file_path: body.file_path,
        })
    }

    fn delivery_url(&self, file_path: &str) -> String {
        let endpoint = self.config.url_endpoint.trim_end_matches('/');
        let path = file_path.trim_start_matches('/');
        format!("{}/{}/{}", endpoint, DELIVERY_TRANSFORMATION, path)
    }
}
