// SPDX-License-Identifier: GPL-3.0-only

//! Capture button appearance

use crate::app::dispatcher::{CaptureAction, IgnoreReason, dispatch};
use crate::app::state::{Message, Viewfinder};
use crate::backends::camera::MediaKind;
use crate::constants::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureButtonState {
    /// Ready to capture
    Idle,
    /// Waiting for a photo or for the recording to stop
    Busy,
    Recording { elapsed_secs: u64 },
    /// Self-timer running, seconds left
    Countdown(u64),
    /// The press will not capture (no camera access or missing microphone)
    Disabled,
}

#[derive(Debug, Clone)]
pub struct CaptureButton {
    pub state: CaptureButtonState,
    pub kind: MediaKind,
    pub on_press: Message,
}

impl CaptureButton {
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self.state {
            CaptureButtonState::Idle | CaptureButtonState::Countdown(_) => ui::CAPTURE_IDLE,
            CaptureButtonState::Busy => ui::CAPTURE_BUSY,
            CaptureButtonState::Recording { .. } => ui::CAPTURE_RECORDING,
            CaptureButtonState::Disabled => ui::CAPTURE_DISABLED,
        }
    }

    pub fn label(&self) -> String {
        match (self.state, self.kind) {
            (CaptureButtonState::Countdown(seconds), _) => format!("{}", seconds),
            (CaptureButtonState::Recording { elapsed_secs }, _) => {
                format!("■ {:02}:{:02}", elapsed_secs / 60, elapsed_secs % 60)
            }
            (CaptureButtonState::Busy, _) => "…".to_string(),
            (_, MediaKind::Video) => "● REC".to_string(),
            (_, MediaKind::Photo) => "◯".to_string(),
        }
    }
}

impl Viewfinder {
    /// Build the capture button
    ///
    /// The button changes appearance based on mode and state:
    /// - Stills: white, gray while a photo is pending
    /// - Video: red while recording, gray while stopping
    /// - Disabled: dimmed when a press would not capture
    pub fn build_capture_button(&self) -> CaptureButton {
        let kind = self.session.mode().capture_kind();
        let state = if let Some(seconds) = self.timer_countdown {
            CaptureButtonState::Countdown(seconds)
        } else {
            match dispatch(&self.session, &self.permissions) {
                CaptureAction::TakePhoto | CaptureAction::StartRecording => {
                    CaptureButtonState::Idle
                }
                CaptureAction::StopRecording => CaptureButtonState::Recording {
                    elapsed_secs: self.session.recording().elapsed_secs(),
                },
                CaptureAction::Ignore(IgnoreReason::NoCameraAccess)
                | CaptureAction::Refuse(_) => CaptureButtonState::Disabled,
                CaptureAction::Ignore(_) => CaptureButtonState::Busy,
            }
        };

        CaptureButton {
            state,
            kind,
            on_press: Message::Capture,
        }
    }
}
