//! Image ingestion
//!
//! Turns uploaded files and remote URLs into files inside the content
//! directory. Callers get back a storage reference (a bare file name) or
//! `None`; ingestion failures are logged and never surface as errors.

pub mod filename;
mod remote;

use axum::body::Bytes;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

pub use filename::{ALLOWED_EXTENSIONS, secure_filename};

use crate::utils::validation::MAX_IMAGE_REF_LEN;

/// Errors while preparing the store or writing one file
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// One file part of a multipart submission
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Name the client supplied (untrusted)
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }
}

/// Content directory plus the HTTP client used for remote fetches
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
    client: reqwest::Client,
}

impl ImageStore {
    /// Create the store, making sure the content directory exists
    pub fn new(root: impl Into<PathBuf>, fetch_timeout: Duration) -> Result<Self, IngestError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        let client = reqwest::Client::builder()
            .timeout(fetch_timeout)
            .user_agent(concat!("storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { root, client })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Shared HTTP client (also used by the mail relay)
    pub fn http_client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Store an uploaded image under a fresh name.
    ///
    /// Accepts only allowed extensions (case-insensitive). The returned name
    /// is `<uuid>.<ext>` with the extension as written in the sanitized
    /// client name, so `Cake.PNG` is stored as `<uuid>.PNG`. The bytes are
    /// written verbatim, empty content included.
    pub async fn ingest_upload(&self, file: &UploadedFile) -> Option<String> {
        if file.file_name.trim().is_empty() {
            return None;
        }
        let original = secure_filename(&file.file_name);

        let Some(allowed) = filename::allowed_extension(&file.file_name) else {
            tracing::info!(file = %original, "Rejected upload with unsupported extension");
            return None;
        };
        let ext = match original.rsplit_once('.') {
            Some((_, written)) if written.eq_ignore_ascii_case(&allowed) => written,
            _ => allowed.as_str(),
        };

        let name = format!("{}.{ext}", Uuid::new_v4());
        let path = self.root.join(&name);
        match tokio::fs::write(&path, &file.bytes).await {
            Ok(()) => {
                tracing::info!(
                    file = %original,
                    stored = %name,
                    size = file.bytes.len(),
                    "Image uploaded"
                );
                Some(name)
            }
            Err(e) => {
                tracing::error!(file = %original, error = %e, "Failed to save uploaded image");
                None
            }
        }
    }

    /// Resolve a storage reference to a path inside the content directory.
    ///
    /// References are bare file names; anything that could escape the
    /// directory is rejected.
    pub fn path_of(&self, reference: &str) -> Option<PathBuf> {
        if reference.is_empty()
            || reference.len() > MAX_IMAGE_REF_LEN
            || reference.contains("..")
            || reference.contains('/')
            || reference.contains('\\')
        {
            return None;
        }
        Some(self.root.join(reference))
    }

    /// Whether `reference` names an existing file in the store
    pub async fn exists(&self, reference: &str) -> bool {
        match self.path_of(reference) {
            Some(path) => tokio::fs::try_exists(&path).await.unwrap_or(false),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &Path) -> ImageStore {
        ImageStore::new(dir.join("uploads"), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_upload_keeps_extension_as_written() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let name = store
            .ingest_upload(&UploadedFile::new("Cake Photo.PNG", vec![1u8, 2, 3]))
            .await
            .unwrap();

        assert!(name.ends_with(".PNG"));
        assert_eq!(name.len(), 36 + 4);
        assert!(store.exists(&name).await);
        let saved = tokio::fs::read(store.path_of(&name).unwrap()).await.unwrap();
        assert_eq!(saved, vec![1u8, 2, 3]);
    }

    #[tokio::test]
    async fn test_upload_rejects_disallowed_or_unnamed() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        assert!(store.ingest_upload(&UploadedFile::new("cake.bmp", vec![1u8])).await.is_none());
        assert!(store.ingest_upload(&UploadedFile::new("", vec![1u8])).await.is_none());

        let mut entries = tokio::fs::read_dir(store.root()).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upload_accepts_empty_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let name = store
            .ingest_upload(&UploadedFile::new("blank.jpg", Vec::new()))
            .await
            .unwrap();

        assert!(name.ends_with(".jpg"));
        let saved = tokio::fs::read(store.path_of(&name).unwrap()).await.unwrap();
        assert!(saved.is_empty());
    }

    #[tokio::test]
    async fn test_two_uploads_get_distinct_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        let file = UploadedFile::new("same.jpg", vec![9u8]);

        let a = store.ingest_upload(&file).await.unwrap();
        let b = store.ingest_upload(&file).await.unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_path_of_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        assert!(store.path_of("../secret").is_none());
        assert!(store.path_of("a/b.png").is_none());
        assert!(store.path_of("").is_none());
        assert!(store.path_of("abc.png").is_some());
    }
}
