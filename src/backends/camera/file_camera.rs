// SPDX-License-Identifier: GPL-3.0-only

//! Test-pattern camera writing captures to a directory
//!
//! Photos are JPEG files; videos are raw motion-JPEG streams (concatenated
//! JPEG frames) written at a fixed frame rate until the recording is stopped.

use super::test_pattern;
use super::types::{DeviceSettings, MediaUri};
use super::{CameraDevice, CameraResult};
use crate::constants::{file_formats, timing};
use crate::errors::CameraError;
use crate::storage::capture_file_name;
use futures::FutureExt;
use futures::future::{self, BoxFuture};
use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::io::AsyncWriteExt;
use tokio::sync::oneshot;
use tracing::{debug, info};

/// Camera device backed by the synthetic test pattern
pub struct FileCamera {
    name: String,
    output_dir: PathBuf,
    settings: Arc<Mutex<DeviceSettings>>,
    /// Stop signal of the active recording
    recorder: Arc<Mutex<Option<oneshot::Sender<()>>>>,
    frame_counter: AtomicU64,
}

impl FileCamera {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            name: "Test Pattern Camera".to_string(),
            output_dir,
            settings: Arc::new(Mutex::new(DeviceSettings::default())),
            recorder: Arc::new(Mutex::new(None)),
            frame_counter: AtomicU64::new(0),
        }
    }

    /// Settings most recently applied to the device
    pub fn settings(&self) -> DeviceSettings {
        *lock(&self.settings)
    }

    /// Check if a recording is active
    pub fn is_recording(&self) -> bool {
        lock(&self.recorder).is_some()
    }

    /// Render the live preview frame at the given size
    pub fn preview_frame(&self, width: u32, height: u32) -> RgbImage {
        let index = self.frame_counter.fetch_add(1, Ordering::Relaxed);
        test_pattern::render_sized(&self.settings(), index, width, height)
    }
}

impl std::fmt::Debug for FileCamera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileCamera")
            .field("output_dir", &self.output_dir)
            .field("recording", &self.is_recording())
            .finish()
    }
}

impl CameraDevice for FileCamera {
    fn name(&self) -> &str {
        &self.name
    }

    fn take_photo(&self) -> BoxFuture<'static, CameraResult<MediaUri>> {
        let settings = self.settings();
        let index = self.frame_counter.fetch_add(1, Ordering::Relaxed);
        let dir = self.output_dir.clone();
        let path = dir.join(capture_file_name("IMG", file_formats::PHOTO_EXTENSION));

        async move {
            tokio::fs::create_dir_all(&dir).await?;
            let jpeg = encode_frame(settings, index).await?;
            tokio::fs::write(&path, jpeg).await?;
            info!(path = %path.display(), "Photo written");
            Ok(MediaUri::from_path(&path))
        }
        .boxed()
    }

    fn start_recording(&self) -> BoxFuture<'static, CameraResult<MediaUri>> {
        let (stop_tx, stop_rx) = oneshot::channel();
        {
            let mut slot = lock(&self.recorder);
            if slot.is_some() {
                return future::ready(Err(CameraError::Busy)).boxed();
            }
            *slot = Some(stop_tx);
        }

        let dir = self.output_dir.clone();
        let path = dir.join(capture_file_name("VID", file_formats::VIDEO_EXTENSION));
        let settings = Arc::clone(&self.settings);
        let recorder = Arc::clone(&self.recorder);

        async move {
            let result = record_until_stopped(dir, path, settings, stop_rx).await;
            if result.is_err() {
                // Free the device for the next recording
                lock(&recorder).take();
            }
            result
        }
        .boxed()
    }

    fn stop_recording(&self) -> BoxFuture<'static, CameraResult<()>> {
        let result = match lock(&self.recorder).take() {
            Some(sender) => {
                info!("Sending stop signal to recorder");
                sender
                    .send(())
                    .map_err(|_| CameraError::NoRecordingInProgress)
            }
            None => Err(CameraError::NoRecordingInProgress),
        };
        future::ready(result).boxed()
    }

    fn apply_settings(&self, settings: &DeviceSettings) -> CameraResult<()> {
        debug!(?settings, "Applying device settings");
        *lock(&self.settings) = *settings;
        Ok(())
    }
}

async fn record_until_stopped(
    dir: PathBuf,
    path: PathBuf,
    settings: Arc<Mutex<DeviceSettings>>,
    mut stop_rx: oneshot::Receiver<()>,
) -> CameraResult<MediaUri> {
    tokio::fs::create_dir_all(&dir).await?;
    let mut file = tokio::fs::File::create(&path).await?;
    let mut interval = tokio::time::interval(timing::RECORDING_FRAME_INTERVAL);
    let mut frames = 0u64;
    info!(path = %path.display(), "Recording started");

    loop {
        tokio::select! {
            // A dropped sender also ends the recording
            _ = &mut stop_rx => break,
            _ = interval.tick() => {
                let snapshot = *lock(&settings);
                let jpeg = encode_frame(snapshot, frames).await?;
                file.write_all(&jpeg).await?;
                frames += 1;
            }
        }
    }

    file.flush().await?;
    info!(path = %path.display(), frames, "Recording finalized");
    Ok(MediaUri::from_path(&path))
}

async fn encode_frame(settings: DeviceSettings, index: u64) -> CameraResult<Vec<u8>> {
    tokio::task::spawn_blocking(move || {
        let frame = test_pattern::render(&settings, index);
        encode_jpeg(&frame)
    })
    .await
    .map_err(|e| CameraError::Backend(e.to_string()))?
}

fn encode_jpeg(frame: &RgbImage) -> CameraResult<Vec<u8>> {
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, file_formats::JPEG_QUALITY).encode_image(frame)?;
    Ok(bytes)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_take_photo_writes_decodable_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let camera = FileCamera::new(dir.path().to_path_buf());

        let uri = camera.take_photo().await.unwrap();
        let path = uri.to_path().unwrap();
        let image = image::open(&path).unwrap();
        assert_eq!((image.width(), image.height()), (480, 640));
    }

    #[tokio::test]
    async fn test_recording_runs_until_stopped() {
        let dir = tempfile::tempdir().unwrap();
        let camera = FileCamera::new(dir.path().to_path_buf());

        let recording = tokio::spawn(camera.start_recording());
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert!(camera.is_recording());
        camera.stop_recording().await.unwrap();

        let uri = recording.await.unwrap().unwrap();
        let written = std::fs::metadata(uri.to_path().unwrap()).unwrap();
        assert!(written.len() > 0);
        assert!(!camera.is_recording());
    }

    #[tokio::test]
    async fn test_second_start_reports_busy() {
        let dir = tempfile::tempdir().unwrap();
        let camera = FileCamera::new(dir.path().to_path_buf());

        let _first = camera.start_recording();
        let second = camera.start_recording().await;
        assert_eq!(second, Err(CameraError::Busy));
    }

    #[tokio::test]
    async fn test_stop_without_recording_fails() {
        let dir = tempfile::tempdir().unwrap();
        let camera = FileCamera::new(dir.path().to_path_buf());
        assert_eq!(
            camera.stop_recording().await,
            Err(CameraError::NoRecordingInProgress)
        );
    }
}
