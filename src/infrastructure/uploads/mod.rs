//! Image upload storage
//!
//! Stores uploaded profile images on the local filesystem and hands back
//! the public path they are served from.

use std::fmt::Debug;
use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;
use uuid::Uuid;

use crate::domain::DomainError;

/// Trait for storing uploaded images
#[async_trait]
pub trait ImageStore: Send + Sync + Debug {
    /// Persist the file content and return its public path
    async fn save(&self, original_filename: &str, content: Bytes) -> Result<String, DomainError>;
}

/// Filesystem-backed image store
#[derive(Debug, Clone)]
pub struct FsImageStore {
    /// Directory files are written to
    dir: PathBuf,
    /// Public URL prefix the directory is served under
    public_path: String,
}

impl FsImageStore {
    pub fn new(dir: impl Into<PathBuf>, public_path: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            public_path: public_path.into(),
        }
    }

    /// Pick a stored extension from the original filename, defaulting to a
    /// generic binary extension when the name gives nothing usable.
    fn extension_for(original_filename: &str) -> String {
        let ext = std::path::Path::new(original_filename)
            .extension()
            .and_then(|e| e.to_str());

        match ext {
            Some(e) if !e.is_empty() => e.to_ascii_lowercase(),
            _ => mime_guess::from_path(original_filename)
                .first()
                .and_then(|m| mime_guess::get_mime_extensions(&m).and_then(|exts| exts.first()))
                .map(|e| e.to_string())
                .unwrap_or_else(|| "bin".to_string()),
        }
    }
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn save(&self, original_filename: &str, content: Bytes) -> Result<String, DomainError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create uploads dir: {}", e)))?;

        let name = format!("{}.{}", Uuid::new_v4(), Self::extension_for(original_filename));
        let path = self.dir.join(&name);

        tokio::fs::write(&path, &content)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to store image: {}", e)))?;

        debug!(file = %path.display(), bytes = content.len(), "Stored uploaded image");

        Ok(format!("{}/{}", self.public_path.trim_end_matches('/'), name))
    }
}
