//! Phase two of an attachment upload: sending the file bytes to the target

use std::path::{
    Path,
    PathBuf,
};

use async_trait::async_trait;
use reqwest::{
    Body,
    Client,
};
use tracing::debug;

use crate::error::{
    ResourceError,
    ResourceResult,
};
use crate::types::UploadTarget;

#[async_trait]
pub trait Transfer: Send + Sync {
    async fn put_file(&self, target: &UploadTarget, path: &Path) -> ResourceResult<()>;
}

/// Expands `~` and environment references in a declared file name
pub fn resolve_path(file_name: &Path) -> ResourceResult<PathBuf> {
    let raw = file_name.to_str().ok_or_else(|| {
        ResourceError::Attachment(format!("File name {} is not valid UTF-8", file_name.display()))
    })?;
    let expanded = shellexpand::full(raw)
        .map_err(|e| ResourceError::Attachment(format!("Failed to expand {raw}: {e}")))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Streams files to pre-signed URLs with a plain PUT
#[derive(Clone)]
pub struct HttpTransfer {
    client: Client,
}

impl HttpTransfer {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transfer for HttpTransfer {
    async fn put_file(&self, target: &UploadTarget, path: &Path) -> ResourceResult<()> {
        let path = resolve_path(path)?;
        let file = tokio::fs::File::open(&path).await.map_err(|e| {
            ResourceError::Attachment(format!("Failed to open {}: {e}", path.display()))
        })?;
        let length = file
            .metadata()
            .await
            .map_err(|e| {
                ResourceError::Attachment(format!("Failed to stat {}: {e}", path.display()))
            })?
            .len();

        let mut request = self
            .client
            .put(&target.url)
            .header(reqwest::header::CONTENT_LENGTH, length)
            .body(Body::from(file));
        for (name, value) in &target.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await.map_err(|e| {
            ResourceError::Attachment(format!("Failed to upload {}: {e}", path.display()))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ResourceError::Attachment(format!(
                "Upload of {} rejected with {status}: {body}",
                path.display()
            )));
        }

        debug!("Uploaded {} ({length} bytes)", path.display());
        Ok(())
    }
}
