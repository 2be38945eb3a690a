// SPDX-License-Identifier: GPL-3.0-only

//! Capture button routing
//!
//! Decides what a capture press means for the current session. The decision
//! is pure; the capture handlers carry it out.

use crate::app::session::{CaptureMode, CaptureSession};
use crate::backends::permissions::{Permission, PermissionSet};
use crate::errors::{AppError, PermissionKind};

/// What a capture press resolves to
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureAction {
    TakePhoto,
    StartRecording,
    StopRecording,
    /// Dropped without a visible error
    Ignore(IgnoreReason),
    /// Refused with an error for the user
    Refuse(AppError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The camera permission was not granted
    NoCameraAccess,
    /// The previous photo request has not resolved yet
    PhotoInFlight,
    /// The stop signal was already sent
    StopInFlight,
}

/// Route a capture press
pub fn dispatch(session: &CaptureSession, permissions: &PermissionSet) -> CaptureAction {
    if !permissions.is_granted(Permission::Camera) {
        return CaptureAction::Ignore(IgnoreReason::NoCameraAccess);
    }

    match session.mode() {
        CaptureMode::Video if session.is_recording() => {
            if session.recording().stop_requested() {
                CaptureAction::Ignore(IgnoreReason::StopInFlight)
            } else {
                CaptureAction::StopRecording
            }
        }
        CaptureMode::Video => {
            if permissions.is_granted(Permission::Microphone) {
                CaptureAction::StartRecording
            } else {
                CaptureAction::Refuse(AppError::PermissionDenied(PermissionKind::Microphone))
            }
        }
        CaptureMode::Photo | CaptureMode::Slow | CaptureMode::Portrait => {
            if session.photo_in_flight() {
                CaptureAction::Ignore(IgnoreReason::PhotoInFlight)
            } else {
                CaptureAction::TakePhoto
            }
        }
    }
}
