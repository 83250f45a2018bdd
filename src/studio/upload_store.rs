use crate::error::{Result, StudioError};
use crate::models::{media_type_for_path, UploadedImage};
use futures::future::try_join_all;
use std::path::Path;

pub const MAX_UPLOADS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub accepted: usize,
    pub dropped: usize,
    /// Set when more than `MAX_UPLOADS` files were offered.
    pub warning: Option<String>,
}

/// Reference images for edit mode and their previews, replaced wholesale on every ingest.
#[derive(Debug, Clone, Default)]
pub struct UploadStore {
    images: Vec<UploadedImage>,
    previews: Vec<String>,
}

impl UploadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the first `MAX_UPLOADS` files concurrently. The store is filled only
    /// if every read succeeds; on failure it is left empty.
    pub async fn ingest<P>(&mut self, files: &[P]) -> Result<IngestReport>
    where
        P: AsRef<Path>,
    {
        self.clear();
        if files.is_empty() {
            return Ok(IngestReport::default());
        }

        let dropped = files.len().saturating_sub(MAX_UPLOADS);
        let warning = if dropped > 0 {
            let message = format!(
                "You can only upload a maximum of {} images. Taking the first {}.",
                MAX_UPLOADS, MAX_UPLOADS
            );
            log::warn!("{} ({} file(s) ignored)", message, dropped);
            Some(message)
        } else {
            None
        };

        let reads = files
            .iter()
            .take(MAX_UPLOADS)
            .map(|path| read_upload(path.as_ref()));
        let images = try_join_all(reads).await.map_err(|e| {
            log::error!("Error reading files: {}", e);
            e
        })?;

        self.previews = images.iter().map(UploadedImage::data_url).collect();
        self.images = images;
        log::info!("Loaded {} reference image(s)", self.images.len());

        Ok(IngestReport {
            accepted: self.images.len(),
            dropped,
            warning,
        })
    }

    pub fn clear(&mut self) {
        self.images.clear();
        self.previews.clear();
    }

    pub fn images(&self) -> &[UploadedImage] {
        &self.images
    }

    pub fn previews(&self) -> &[String] {
        &self.previews
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

async fn read_upload(path: &Path) -> Result<UploadedImage> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| StudioError::Upload(format!("{}: {}", path.display(), e)))?;
    Ok(UploadedImage::new(bytes, media_type_for_path(path)))
}
