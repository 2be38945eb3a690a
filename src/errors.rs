// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the viewfinder
//!
//! Collaborator failures are caught where the result message is handled and
//! converted into one of these kinds. None of them is fatal to the process.

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// A required permission was denied by the user
    PermissionDenied(PermissionKind),
    /// A capture request failed; session state has been rolled back
    Capture(CaptureError),
    /// Saving to the media library failed (logged only)
    Persistence(String),
    /// Configuration errors
    Config(String),
    /// Storage/filesystem errors
    Storage(String),
}

/// Which permission a `PermissionDenied` refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionKind {
    Camera,
    Microphone,
}

/// The camera operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureOp {
    Photo,
    StartRecording,
    StopRecording,
}

/// A failed capture request together with its cause
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureError {
    pub op: CaptureOp,
    pub cause: CameraError,
}

/// Errors reported by a camera device
#[derive(Debug, Clone, PartialEq)]
pub enum CameraError {
    /// Camera disconnected during operation
    Disconnected,
    /// Camera is busy or in use
    Busy,
    /// Stop was requested without an active recording
    NoRecordingInProgress,
    /// The request did not resolve within the configured timeout
    TimedOut,
    /// Encoding the captured media failed
    EncodingFailed(String),
    /// Writing the captured media failed
    WriteFailed(String),
    /// Backend error
    Backend(String),
}

impl CaptureError {
    pub fn new(op: CaptureOp, cause: CameraError) -> Self {
        Self { op, cause }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::PermissionDenied(kind) => write!(f, "{} permission denied", kind),
            AppError::Capture(e) => write!(f, "{}", e),
            AppError::Persistence(msg) => write!(f, "Could not save to library: {}", msg),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionKind::Camera => write!(f, "Camera"),
            PermissionKind::Microphone => write!(f, "Microphone"),
        }
    }
}

impl fmt::Display for CaptureOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureOp::Photo => write!(f, "take photo"),
            CaptureOp::StartRecording => write!(f, "start recording"),
            CaptureOp::StopRecording => write!(f, "stop recording"),
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to {}: {}", self.op, self.cause)
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::Disconnected => write!(f, "Camera disconnected"),
            CameraError::Busy => write!(f, "Camera is busy"),
            CameraError::NoRecordingInProgress => write!(f, "No recording in progress"),
            CameraError::TimedOut => write!(f, "Camera did not respond in time"),
            CameraError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
            CameraError::WriteFailed(msg) => write!(f, "Write failed: {}", msg),
            CameraError::Backend(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CaptureError {}
impl std::error::Error for CameraError {}

impl From<CaptureError> for AppError {
    fn from(err: CaptureError) -> Self {
        AppError::Capture(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<std::io::Error> for CameraError {
    fn from(err: std::io::Error) -> Self {
        CameraError::WriteFailed(err.to_string())
    }
}

impl From<image::ImageError> for CameraError {
    fn from(err: image::ImageError) -> Self {
        CameraError::EncodingFailed(err.to_string())
    }
}
