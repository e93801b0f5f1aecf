//! Disk-backed [`MediaStore`].
//!
//! Reflection media is content-addressed: files land in the media
//! directory under their sha-256 hex digest, so repeated uploads of the
//! same bytes are deduplicated and the returned URL is stable.

use std::path::PathBuf;

use sha2::{Digest as _, Sha256};
use sparks_core::media::{MediaKind, MediaStore};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

/// Writes media files under `dir` and serves them below `base_url`.
#[derive(Clone)]
pub struct DiskMediaStore {
  dir:      PathBuf,
  base_url: String,
}

impl DiskMediaStore {
  pub fn new(dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
    Self { dir: dir.into(), base_url: base_url.into() }
  }

  /// Create the media directory if it does not exist yet.
  pub async fn ensure_dir(&self) -> Result<(), MediaError> {
    tokio::fs::create_dir_all(&self.dir).await?;
    Ok(())
  }
}

impl MediaStore for DiskMediaStore {
  type Error = MediaError;

  async fn put(&self, kind: MediaKind, bytes: Vec<u8>) -> Result<String, MediaError> {
    let digest = Sha256::digest(&bytes);
    let name = format!("{}.{}", hex::encode(digest), kind.extension());

    tokio::fs::write(self.dir.join(&name), bytes).await?;

    Ok(format!("{}/{}", self.base_url.trim_end_matches('/'), name))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn temp_store() -> DiskMediaStore {
    let dir = std::env::temp_dir()
      .join("sparks-media-tests")
      .join(uuid::Uuid::new_v4().to_string());
    DiskMediaStore::new(dir, "/media")
  }

  #[tokio::test]
  async fn put_returns_content_addressed_url() {
    let store = temp_store();
    store.ensure_dir().await.unwrap();

    let url = store.put(MediaKind::Image, b"fake image bytes".to_vec()).await.unwrap();
    assert!(url.starts_with("/media/"));
    assert!(url.ends_with(".jpg"));

    // Same bytes, same URL.
    let again = store.put(MediaKind::Image, b"fake image bytes".to_vec()).await.unwrap();
    assert_eq!(url, again);

    // Different kind gets a different extension.
    let audio = store.put(MediaKind::Audio, b"fake audio bytes".to_vec()).await.unwrap();
    assert!(audio.ends_with(".ogg"));
  }

  #[tokio::test]
  async fn put_without_dir_fails() {
    let store = temp_store();
    let result = store.put(MediaKind::Image, b"bytes".to_vec()).await;
    assert!(result.is_err());
  }
}
