// SPDX-License-Identifier: GPL-3.0-only

//! Capture session state
//!
//! `CaptureSession` is the single mutable aggregate of the viewfinder. Its
//! fields are private; every change goes through one of the operations below,
//! which keep `is_recording() ⇒ mode() == Video` true at every step.

use crate::backends::camera::{CapturedMedia, MediaKind};
use crate::constants::zoom;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Operating mode of the viewfinder, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CaptureMode {
    Slow,
    Portrait,
    #[default]
    Photo,
    Video,
}

impl CaptureMode {
    /// All modes in display order
    pub const ALL: [CaptureMode; 4] = [
        CaptureMode::Slow,
        CaptureMode::Portrait,
        CaptureMode::Photo,
        CaptureMode::Video,
    ];

    /// Position in the mode selector
    pub fn index(&self) -> usize {
        match self {
            CaptureMode::Slow => 0,
            CaptureMode::Portrait => 1,
            CaptureMode::Photo => 2,
            CaptureMode::Video => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CaptureMode::Slow => "Slow",
            CaptureMode::Portrait => "Portrait",
            CaptureMode::Photo => "Photo",
            CaptureMode::Video => "Video",
        }
    }

    /// What pressing capture produces in this mode
    ///
    /// Slow and Portrait have no capture behavior of their own and take stills.
    pub fn capture_kind(&self) -> MediaKind {
        match self {
            CaptureMode::Video => MediaKind::Video,
            CaptureMode::Slow | CaptureMode::Portrait | CaptureMode::Photo => MediaKind::Photo,
        }
    }
}

/// Which physical camera is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    Front,
    #[default]
    Back,
}

impl Facing {
    pub fn flipped(&self) -> Self {
        match self {
            Facing::Front => Facing::Back,
            Facing::Back => Facing::Front,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Facing::Front => "Front",
            Facing::Back => "Back",
        }
    }
}

/// Independent boolean settings of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToggleFlag {
    Flash,
    Timer,
    Mirror,
    WideAspect,
}

impl ToggleFlag {
    pub const ALL: [ToggleFlag; 4] = [
        ToggleFlag::Flash,
        ToggleFlag::Timer,
        ToggleFlag::Mirror,
        ToggleFlag::WideAspect,
    ];
}

/// Recording state machine
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RecordingState {
    /// Not recording
    #[default]
    Idle,
    /// A recording has been requested and not yet finalized
    Recording {
        /// When recording was requested
        started_at: Instant,
        /// The stop signal has been sent to the camera
        stop_requested: bool,
        /// Mode to switch to once the recording has finalized
        pending_mode: Option<CaptureMode>,
    },
}

impl RecordingState {
    /// Check if currently recording
    pub fn is_recording(&self) -> bool {
        matches!(self, RecordingState::Recording { .. })
    }

    pub fn stop_requested(&self) -> bool {
        matches!(
            self,
            RecordingState::Recording {
                stop_requested: true,
                ..
            }
        )
    }

    pub fn pending_mode(&self) -> Option<CaptureMode> {
        match self {
            RecordingState::Idle => None,
            RecordingState::Recording { pending_mode, .. } => *pending_mode,
        }
    }

    /// Get the elapsed recording duration in seconds
    pub fn elapsed_secs(&self) -> u64 {
        match self {
            RecordingState::Idle => 0,
            RecordingState::Recording { started_at, .. } => started_at.elapsed().as_secs(),
        }
    }
}

/// Outcome of [`CaptureSession::set_mode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    /// Already in that mode (or a pending switch was cancelled)
    Unchanged,
    /// The mode field changed
    Applied,
    /// Recording in progress; the switch happens once it has finalized.
    /// `stop_needed` is set when the caller must send the stop signal.
    Deferred { stop_needed: bool },
}

/// State of one viewfinder session
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureSession {
    mode: CaptureMode,
    facing: Facing,
    flash_enabled: bool,
    timer_enabled: bool,
    mirror_enabled: bool,
    wide_aspect: bool,
    zoom: f32,
    recording: RecordingState,
    photo_in_flight: bool,
    last_media: Option<CapturedMedia>,
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new(CaptureMode::Photo, Facing::Back, true)
    }
}

impl CaptureSession {
    pub fn new(mode: CaptureMode, facing: Facing, wide_aspect: bool) -> Self {
        Self {
            mode,
            facing,
            flash_enabled: false,
            timer_enabled: false,
            mirror_enabled: false,
            wide_aspect,
            zoom: zoom::MIN,
            recording: RecordingState::Idle,
            photo_in_flight: false,
            last_media: None,
        }
    }

    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn flash_enabled(&self) -> bool {
        self.flash_enabled
    }

    pub fn timer_enabled(&self) -> bool {
        self.timer_enabled
    }

    pub fn mirror_enabled(&self) -> bool {
        self.mirror_enabled
    }

    pub fn wide_aspect(&self) -> bool {
        self.wide_aspect
    }

    pub fn flag(&self, flag: ToggleFlag) -> bool {
        match flag {
            ToggleFlag::Flash => self.flash_enabled,
            ToggleFlag::Timer => self.timer_enabled,
            ToggleFlag::Mirror => self.mirror_enabled,
            ToggleFlag::WideAspect => self.wide_aspect,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn recording(&self) -> &RecordingState {
        &self.recording
    }

    pub fn is_recording(&self) -> bool {
        self.recording.is_recording()
    }

    pub fn photo_in_flight(&self) -> bool {
        self.photo_in_flight
    }

    pub fn last_media(&self) -> Option<&CapturedMedia> {
        self.last_media.as_ref()
    }

    pub fn last_media_uri(&self) -> Option<&str> {
        self.last_media.as_ref().map(|media| media.uri.as_str())
    }

    // ===== Operations =====

    /// Switch mode; while recording the switch waits for the stop to finish
    pub fn set_mode(&mut self, mode: CaptureMode) -> ModeChange {
        if let RecordingState::Recording {
            stop_requested,
            pending_mode,
            ..
        } = &mut self.recording
        {
            if mode == self.mode {
                if pending_mode.take().is_some() {
                    info!("Pending mode switch cancelled");
                }
                return ModeChange::Unchanged;
            }
            *pending_mode = Some(mode);
            let stop_needed = !*stop_requested;
            *stop_requested = true;
            info!(?mode, stop_needed, "Mode switch deferred until recording stops");
            return ModeChange::Deferred { stop_needed };
        }

        if mode == self.mode {
            return ModeChange::Unchanged;
        }
        info!(from = ?self.mode, to = ?mode, "Mode switched");
        self.mode = mode;
        ModeChange::Applied
    }

    /// Flip a flag, returning its new value
    pub fn toggle(&mut self, flag: ToggleFlag) -> bool {
        let value = match flag {
            ToggleFlag::Flash => &mut self.flash_enabled,
            ToggleFlag::Timer => &mut self.timer_enabled,
            ToggleFlag::Mirror => &mut self.mirror_enabled,
            ToggleFlag::WideAspect => &mut self.wide_aspect,
        };
        *value = !*value;
        debug!(?flag, enabled = *value, "Flag toggled");
        *value
    }

    /// Select a camera; refused while recording
    pub fn set_facing(&mut self, facing: Facing) -> bool {
        if self.is_recording() {
            warn!("Cannot switch camera while recording");
            return false;
        }
        self.facing = facing;
        true
    }

    pub fn flip_facing(&mut self) -> bool {
        self.set_facing(self.facing.flipped())
    }

    /// Remember the latest capture
    pub fn record_media_result(&mut self, media: CapturedMedia) {
        info!(uri = %media.uri, kind = ?media.kind, "Capture recorded");
        self.last_media = Some(media);
    }

    pub fn zoom_in(&mut self) -> f32 {
        self.set_zoom(self.zoom + zoom::STEP)
    }

    pub fn zoom_out(&mut self) -> f32 {
        self.set_zoom(self.zoom - zoom::STEP)
    }

    fn set_zoom(&mut self, value: f32) -> f32 {
        // Snap to tenths so repeated steps land exactly on the bounds
        self.zoom = ((value * 10.0).round() / 10.0).clamp(zoom::MIN, zoom::MAX);
        self.zoom
    }

    // ===== Capture bookkeeping =====

    /// Mark a photo request as pending; false if one already is
    pub fn begin_photo(&mut self) -> bool {
        if self.photo_in_flight {
            return false;
        }
        self.photo_in_flight = true;
        true
    }

    pub fn finish_photo(&mut self) {
        self.photo_in_flight = false;
    }

    /// Enter the recording state; only valid in Video mode while idle
    pub fn begin_recording(&mut self) -> bool {
        if self.mode != CaptureMode::Video || self.is_recording() {
            return false;
        }
        self.recording = RecordingState::Recording {
            started_at: Instant::now(),
            stop_requested: false,
            pending_mode: None,
        };
        true
    }

    /// Mark the stop signal as sent; false if not recording or already sent
    pub fn request_stop(&mut self) -> bool {
        match &mut self.recording {
            RecordingState::Recording { stop_requested, .. } if !*stop_requested => {
                *stop_requested = true;
                true
            }
            _ => false,
        }
    }

    /// The stop signal could not be delivered; allow another attempt
    pub fn cancel_stop_request(&mut self) {
        if let RecordingState::Recording { stop_requested, .. } = &mut self.recording {
            *stop_requested = false;
        }
    }

    /// Leave the recording state and apply a deferred mode switch
    ///
    /// Returns the mode switched to, if any.
    pub fn finish_recording(&mut self) -> Option<CaptureMode> {
        let previous = std::mem::take(&mut self.recording);
        let pending = previous.pending_mode()?;
        info!(from = ?self.mode, to = ?pending, "Deferred mode switch applied");
        self.mode = pending;
        Some(pending)
    }
}
