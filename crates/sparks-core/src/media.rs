//! The `MediaStore` trait: binary reflection media in, stable URL out.

use std::future::Future;

/// The kind of reflection media being stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
  Image,
  Audio,
}

impl MediaKind {
  /// File extension used when the media is written out.
  pub fn extension(self) -> &'static str {
    match self {
      Self::Image => "jpg",
      Self::Audio => "ogg",
    }
  }
}

/// Abstraction over wherever reflection media ends up.
///
/// Implementations return a stable URL that can be handed back to clients.
/// Callers must invoke this before any quest/user mutation so an upload
/// failure aborts the completion with no partial effect.
pub trait MediaStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Store `bytes` and return a retrievable URL for them.
  fn put(
    &self,
    kind: MediaKind,
    bytes: Vec<u8>,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + '_;
}
