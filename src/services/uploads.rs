use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Invalid stored file name: {0}")]
    InvalidName(String),

    #[error("Stored file not found: {0}")]
    Missing(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Directory holding uploaded exam files, addressed by stored name
#[derive(Debug, Clone)]
pub struct UploadDir {
    root: PathBuf,
}

impl UploadDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn ensure(&self) -> Result<(), UploadError> {
        tokio::fs::create_dir_all(&self.root).await?;
        info!("Uploads directory ready at {}", self.root.display());
        Ok(())
    }

    /// Content-addressed name: 16 hex chars of the SHA-256 digest, then the sanitized original name
    pub fn stored_name(original_name: &str, contents: &[u8]) -> String {
        let digest = Sha256::digest(contents);
        let hash = format!("{:x}", digest);
        format!("{}-{}", &hash[..16], sanitize_file_name(original_name))
    }

    /// Writes the file and returns its stored name
    pub async fn save(&self, original_name: &str, contents: &[u8]) -> Result<String, UploadError> {
        let stored = Self::stored_name(original_name, contents);
        let path = self.path_for(&stored)?;
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(&path, contents).await?;
        Ok(stored)
    }

    /// Opens a stored file for streaming
    pub async fn open(&self, stored_name: &str) -> Result<tokio::fs::File, UploadError> {
        let path = self.path_for(stored_name)?;
        match tokio::fs::File::open(&path).await {
            Ok(file) => Ok(file),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(UploadError::Missing(stored_name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Resolves a stored name inside the root; rejects anything that could escape it
    pub fn path_for(&self, stored_name: &str) -> Result<PathBuf, UploadError> {
        let valid = !stored_name.is_empty()
            && stored_name != "."
            && stored_name != ".."
            && !stored_name.contains(['/', '\\', '\0']);
        if !valid {
            return Err(UploadError::InvalidName(stored_name.to_string()));
        }
        Ok(self.root.join(stored_name))
    }
}

/// Keeps ASCII letters, digits, `.`, `-` and `_` of the last path component
pub fn sanitize_file_name(original: &str) -> String {
    let base = original.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.to_string()
    }
}
