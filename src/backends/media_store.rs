// SPDX-License-Identifier: GPL-3.0-only

//! Optional persistence of captures into the media library
//!
//! Failures here never affect the capture flow: the session keeps the
//! capture's reference whether or not the copy succeeded.

use super::camera::{CapturedMedia, MediaUri};
use crate::errors::{AppError, AppResult};
use crate::storage;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::path::PathBuf;
use tracing::info;

/// Destination for finished captures
pub trait MediaStore: Send + Sync {
    /// Save a capture, resolving with the reference of the stored copy
    fn save_to_library(&self, media: &CapturedMedia) -> BoxFuture<'static, AppResult<MediaUri>>;
}

/// Media library backed by a local directory
#[derive(Debug, Clone)]
pub struct LibraryDirectory {
    dir: PathBuf,
}

impl LibraryDirectory {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

impl MediaStore for LibraryDirectory {
    fn save_to_library(&self, media: &CapturedMedia) -> BoxFuture<'static, AppResult<MediaUri>> {
        let dir = self.dir.clone();
        let media = media.clone();

        async move {
            let source = media.uri.to_path().ok_or_else(|| {
                AppError::Persistence(format!("not a local file: {}", media.uri))
            })?;
            let extension = source
                .extension()
                .map(|ext| ext.to_string_lossy().into_owned())
                .unwrap_or_default();

            storage::ensure_directory(&dir)
                .await
                .map_err(|e| AppError::Persistence(e.to_string()))?;
            let target =
                storage::unused_library_path(&dir, media.kind.file_prefix(), &extension).await;
            tokio::fs::copy(&source, &target)
                .await
                .map_err(|e| AppError::Persistence(e.to_string()))?;

            info!(from = %source.display(), to = %target.display(), "Saved to library");
            Ok(MediaUri::from_path(&target))
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_copies_capture_into_library() {
        let captures = tempfile::tempdir().unwrap();
        let library = tempfile::tempdir().unwrap();
        let source = captures.path().join("IMG_abc.jpg");
        std::fs::write(&source, b"jpeg").unwrap();

        let store = LibraryDirectory::new(library.path().join("viewfinder"));
        let saved = store
            .save_to_library(&CapturedMedia::photo(MediaUri::from_path(&source)))
            .await
            .unwrap();

        let saved_path = saved.to_path().unwrap();
        assert!(saved_path.starts_with(store.dir()));
        assert!(saved.file_name().starts_with("IMG_"));
        assert_eq!(std::fs::read(saved_path).unwrap(), b"jpeg");
    }

    #[tokio::test]
    async fn test_missing_source_is_persistence_failure() {
        let library = tempfile::tempdir().unwrap();
        let store = LibraryDirectory::new(library.path().to_path_buf());
        let result = store
            .save_to_library(&CapturedMedia::video("file:///nonexistent/VID_1.mjpeg".into()))
            .await;
        assert!(matches!(result, Err(AppError::Persistence(_))));
    }

    #[tokio::test]
    async fn test_remote_uri_is_rejected() {
        let library = tempfile::tempdir().unwrap();
        let store = LibraryDirectory::new(library.path().to_path_buf());
        let result = store
            .save_to_library(&CapturedMedia::photo("content://media/7".into()))
            .await;
        assert!(matches!(result, Err(AppError::Persistence(_))));
    }
}
