// Media upload module
// Pushes spooled image files to an external media host over HTTP

use std::path::{Path, PathBuf};

use axum::async_trait;
use serde::Deserialize;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::error::ApiError;

/// Destination for uploaded image files
///
/// Contract: `upload` consumes the local file. It is removed whether the
/// upload succeeds or fails, and a failure is reported as `None`, never as
/// an error; callers decide what a missing URL means.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(&self, file_path: &Path, folder: &str) -> Option<String>;
}

/// Internal upload failure causes; logged, never surfaced
#[derive(Debug, thiserror::Error)]
enum MediaError {
    #[error("media upload URL is not configured")]
    Unconfigured,

    #[error("failed to read spooled file: {0}")]
    Io(#[from] std::io::Error),

    #[error("upload request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Successful upload responses carry the hosted file location
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

/// Media store backed by an HTTP upload endpoint
///
/// Runs unconfigured when no upload URL is set; every upload then fails
/// softly and posts fall back to caller-supplied image URLs.
#[derive(Clone)]
pub struct HttpMediaStore {
    client: reqwest::Client,
    upload_url: Option<String>,
    upload_preset: Option<String>,
}

impl HttpMediaStore {
    /// Create a new HttpMediaStore
    pub fn new(upload_url: Option<String>, upload_preset: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            upload_url,
            upload_preset,
        }
    }

    async fn push_to_remote(&self, file_path: &Path, folder: &str) -> Result<String, MediaError> {
        let upload_url = self.upload_url.as_deref().ok_or(MediaError::Unconfigured)?;

        let file_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let bytes = tokio::fs::read(file_path).await?;

        let file_part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let mut form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("folder", folder.to_string());
        if let Some(preset) = &self.upload_preset {
            form = form.text("upload_preset", preset.clone());
        }

        let response = self
            .client
            .post(upload_url)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json::<UploadResponse>()
            .await?;

        Ok(response.secure_url)
    }
}

#[async_trait]
impl MediaStore for HttpMediaStore {
    async fn upload(&self, file_path: &Path, folder: &str) -> Option<String> {
        let result = self.push_to_remote(file_path, folder).await;

        // The spooled file is removed on both outcomes
        if let Err(e) = tokio::fs::remove_file(file_path).await {
            warn!("Failed to remove spooled upload {}: {}", file_path.display(), e);
        }

        match result {
            Ok(url) => {
                debug!("Uploaded {} to media store", file_path.display());
                Some(url)
            }
            Err(e) => {
                error!("Media upload failed for {}: {}", file_path.display(), e);
                None
            }
        }
    }
}

/// Spool an uploaded field to a uniquely named temporary file
///
/// The original extension is kept so the media host sees the right type;
/// nameless uploads get a `.bin` suffix.
pub async fn save_temp_file(data: &[u8], original_name: Option<&str>) -> Result<PathBuf, ApiError> {
    let extension = original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .unwrap_or("bin");

    let path = std::env::temp_dir().join(format!("{}.{}", Uuid::new_v4(), extension));

    tokio::fs::write(&path, data).await.map_err(|e| {
        error!("Failed to spool upload to {}: {}", path.display(), e);
        ApiError::Internal("Failed to store uploaded file".to_string())
    })?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_temp_file_keeps_extension_and_bytes() {
        let path = save_temp_file(b"fake image bytes", Some("photo.png")).await.unwrap();

        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
        let contents = tokio::fs::read(&path).await.unwrap();
        assert_eq!(contents, b"fake image bytes");

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_save_temp_file_defaults_extension() {
        let path = save_temp_file(b"data", None).await.unwrap();

        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("bin"));

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_unconfigured_store_removes_file_and_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("upload.jpg");
        tokio::fs::write(&file_path, b"bytes").await.unwrap();

        let store = HttpMediaStore::new(None, None);
        let result = store.upload(&file_path, "posts").await;

        assert!(result.is_none());
        assert!(!file_path.exists(), "spooled file should be removed after a failed upload");
    }

    #[tokio::test]
    async fn test_unusable_upload_url_removes_file_and_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("upload.jpg");
        tokio::fs::write(&file_path, b"bytes").await.unwrap();

        // Not a URL at all, so the request fails before any network traffic
        let store = HttpMediaStore::new(Some("not-a-valid-url".to_string()), None);
        let result = store.upload(&file_path, "posts").await;

        assert!(result.is_none());
        assert!(!file_path.exists());
    }
}
