//! Durable storage for uploaded documents.
//!
//! Each file is written under the configured uploads root with a unique
//! collision-resistant name (millisecond timestamp plus a random numeric
//! suffix) that keeps the original extension. The stored name is what
//! document URLs and the static `/uploads` route refer to.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use rand::Rng;

/// A document written to the uploads root.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    /// The filename as submitted, used for email attachments.
    pub original_name: String,
    /// The unique name assigned by the store.
    pub stored_name: String,
    /// Absolute or root-relative path of the stored file.
    pub path: PathBuf,
}

/// Writes uploaded files under a fixed root directory.
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the uploads root if it does not exist yet.
    pub async fn ensure_root(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Write one uploaded file, assigning it a unique stored name.
    ///
    /// The write completes (or fails) before the handler may reference
    /// the file in a document URL.
    pub async fn store(&self, original_name: &str, data: &[u8]) -> std::io::Result<StoredUpload> {
        let stored_name = unique_name(original_name);
        let path = self.root.join(&stored_name);
        tokio::fs::write(&path, data).await?;

        tracing::debug!(
            original = original_name,
            stored = %stored_name,
            bytes = data.len(),
            "Upload stored"
        );

        Ok(StoredUpload {
            original_name: original_name.to_string(),
            stored_name,
            path,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Unique filename: `{millis}-{random}` plus the original extension.
/// Collision probability is negligible at expected submission volumes.
fn unique_name(original_name: &str) -> String {
    let stamp = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::rng().random_range(0..1_000_000_000);

    let extension = Path::new(original_name)
        .extension()
        .and_then(OsStr::to_str)
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default();

    format!("{stamp}-{suffix}{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_name_keeps_extension() {
        let name = unique_name("diplome.pdf");
        assert!(name.ends_with(".pdf"));
        assert!(!name.contains("diplome"));
    }

    #[test]
    fn unique_name_handles_missing_extension() {
        let name = unique_name("diplome");
        assert!(!name.contains('.'));
    }
}
