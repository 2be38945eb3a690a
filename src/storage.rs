// SPDX-License-Identifier: GPL-3.0-only

//! Storage utilities for managing photo and video files

use crate::config::APP_NAME;
use std::path::{Path, PathBuf};
use tracing::info;

/// Get the media library directory (~/Pictures/viewfinder)
pub fn default_library_directory() -> PathBuf {
    dirs::picture_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Get the directory the camera writes fresh captures to
pub fn default_capture_directory() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_NAME)
        .join("captures")
}

/// Ensure a directory exists, creating it if necessary
pub async fn ensure_directory(dir: &Path) -> Result<(), std::io::Error> {
    tokio::fs::create_dir_all(dir).await?;
    info!(path = %dir.display(), "Directory ready");
    Ok(())
}

/// Unique file name for a fresh capture (`PREFIX_<uuid>.ext`)
pub fn capture_file_name(prefix: &str, extension: &str) -> String {
    format!("{}_{}.{}", prefix, uuid::Uuid::new_v4().simple(), extension)
}

/// Timestamped file name for the media library (`PREFIX_YYYYmmdd_HHMMSS.ext`)
///
/// `taken` disambiguates captures landing in the same second.
pub fn library_file_name(prefix: &str, extension: &str, taken: usize) -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    if taken == 0 {
        format!("{}_{}.{}", prefix, timestamp, extension)
    } else {
        format!("{}_{}_{}.{}", prefix, timestamp, taken, extension)
    }
}

/// First library path for `prefix`/`extension` that does not exist yet
pub async fn unused_library_path(dir: &Path, prefix: &str, extension: &str) -> PathBuf {
    let mut taken = 0;
    loop {
        let candidate = dir.join(library_file_name(prefix, extension, taken));
        if !tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
            return candidate;
        }
        taken += 1;
    }
}
