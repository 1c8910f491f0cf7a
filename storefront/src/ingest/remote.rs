//! Remote image download

use super::filename::{
    DEFAULT_REMOTE_EXTENSION, extension_from_content_type, extension_from_url,
};
use super::{ImageStore, IngestError};
use futures::StreamExt;
use std::path::Path;
use tokio::io::{AsyncWriteExt, BufWriter};
use uuid::Uuid;

/// Write buffer for streamed downloads
const CHUNK_SIZE: usize = 8192;

impl ImageStore {
    /// Download `url` into the store.
    ///
    /// The extension comes from the `Content-Type` when it names an image,
    /// else from the URL path, else `jpg`. A partial file left by a failed
    /// transfer is removed.
    pub async fn ingest_remote(&self, url: &str) -> Option<String> {
        let url = url.trim();
        if url.is_empty() {
            return None;
        }

        let response = match self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
        {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Failed to download image");
                return None;
            }
        };

        let ext = response
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(extension_from_content_type)
            .or_else(|| extension_from_url(url))
            .unwrap_or_else(|| DEFAULT_REMOTE_EXTENSION.to_string());

        let name = format!("{}.{ext}", Uuid::new_v4());
        let path = self.root.join(&name);

        match stream_to_file(response, &path).await {
            Ok(size) => {
                tracing::info!(url = %url, stored = %name, size, "Image downloaded");
                Some(name)
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Image download interrupted");
                if let Err(e) = tokio::fs::remove_file(&path).await {
                    tracing::debug!(path = %path.display(), error = %e, "No partial file to remove");
                }
                None
            }
        }
    }
}

async fn stream_to_file(response: reqwest::Response, path: &Path) -> Result<u64, IngestError> {
    let file = tokio::fs::File::create(path).await?;
    let mut writer = BufWriter::with_capacity(CHUNK_SIZE, file);
    let mut stream = response.bytes_stream();
    let mut written = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        writer.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    writer.flush().await?;
    Ok(written)
}
