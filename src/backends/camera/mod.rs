// SPDX-License-Identifier: GPL-3.0-only

//! Camera device abstraction
//!
//! ```text
//! ┌─────────────────────┐
//! │   UI Layer (App)    │
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │  CameraDevice Trait │  ← Common interface
//! └──────────┬──────────┘
//!            │
//!            ▼
//!      ┌──────────┐
//!      │FileCamera│  ← Test-pattern implementation
//!      └──────────┘
//! ```

pub mod file_camera;
pub mod test_pattern;
pub mod types;

pub use file_camera::FileCamera;
pub use types::*;

use crate::errors::CameraError;
use futures::future::BoxFuture;

/// Result type for camera device operations
pub type CameraResult<T> = Result<T, CameraError>;

/// Camera device trait
///
/// Every capture request is issued when the method is called; the returned
/// future only reports the outcome. Implementations own the physical device
/// handle; the viewfinder only references it.
pub trait CameraDevice: Send + Sync {
    /// Human readable device name
    fn name(&self) -> &str;

    // ===== Capture: Photo =====

    /// Capture a single photo
    ///
    /// Resolves with the reference of the written image.
    fn take_photo(&self) -> BoxFuture<'static, CameraResult<MediaUri>>;

    // ===== Capture: Video =====

    /// Start recording
    ///
    /// The returned future does not complete until the recording has been
    /// stopped with [`CameraDevice::stop_recording`] (or has failed). It then
    /// resolves with the reference of the finalized video.
    fn start_recording(&self) -> BoxFuture<'static, CameraResult<MediaUri>>;

    /// Signal the active recording to finalize
    ///
    /// Resolves once the signal has been delivered. The media reference is
    /// reported by the future returned from `start_recording`.
    fn stop_recording(&self) -> BoxFuture<'static, CameraResult<()>>;

    // ===== Settings =====

    /// Apply facing, flash, autofocus, ratio, zoom and mirror settings
    fn apply_settings(&self, settings: &DeviceSettings) -> CameraResult<()>;
}
