// SPDX-License-Identifier: GPL-3.0-only

//! Application state and message types

use crate::app::session::{CaptureMode, CaptureSession, ToggleFlag};
use crate::backends::Backends;
use crate::backends::camera::MediaUri;
use crate::backends::permissions::PermissionSet;
use crate::config::Config;
use crate::constants::TimerPreset;
use crate::errors::{AppError, AppResult, CameraError};

/// Transient error shown over the viewfinder
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    /// Generation that created the banner; a clear only removes its own banner
    pub id: u64,
    pub error: AppError,
}

impl Banner {
    pub fn text(&self) -> String {
        self.error.to_string()
    }
}

/// The viewfinder screen
pub struct Viewfinder {
    pub(crate) config: Config,
    pub(crate) session: CaptureSession,
    pub(crate) permissions: PermissionSet,
    /// Continuous autofocus requested from the device
    pub(crate) autofocus: bool,
    /// Countdown length used when the timer flag is on
    pub(crate) timer: TimerPreset,
    pub(crate) settings_visible: bool,
    /// Seconds left on the self-timer, if counting down
    pub(crate) timer_countdown: Option<u64>,
    /// Bumped on every countdown start and abort so stale ticks are dropped
    pub(crate) countdown_generation: u64,
    pub(crate) banner: Option<Banner>,
    pub(crate) banner_generation: u64,
    /// Library saves that have not reported back yet
    pub(crate) pending_saves: usize,
    /// Library copy of the latest capture
    pub(crate) last_saved: Option<MediaUri>,
    pub(crate) backends: Backends,
}

impl Viewfinder {
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &CaptureSession {
        &self.session
    }

    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    pub fn autofocus(&self) -> bool {
        self.autofocus
    }

    pub fn timer_preset(&self) -> TimerPreset {
        self.timer
    }

    pub fn settings_visible(&self) -> bool {
        self.settings_visible
    }

    pub fn timer_countdown(&self) -> Option<u64> {
        self.timer_countdown
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn has_pending_saves(&self) -> bool {
        self.pending_saves > 0
    }

    pub fn last_saved(&self) -> Option<&MediaUri> {
        self.last_saved.as_ref()
    }

    pub fn backends(&self) -> &Backends {
        &self.backends
    }
}

impl std::fmt::Debug for Viewfinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewfinder")
            .field("session", &self.session)
            .field("permissions", &self.permissions)
            .field("timer_countdown", &self.timer_countdown)
            .field("banner", &self.banner)
            .finish_non_exhaustive()
    }
}

/// Messages that drive the viewfinder
#[derive(Debug, Clone)]
pub enum Message {
    // ===== Lifecycle =====
    /// Answers to the permission requests made on mount
    PermissionsResolved(PermissionSet),

    // ===== Top bar and modes =====
    SetMode(CaptureMode),
    Toggle(ToggleFlag),
    FlipCamera,
    ZoomIn,
    ZoomOut,

    // ===== Settings panel =====
    ToggleSettings,
    ToggleAutofocus,
    CycleTimerPreset,

    // ===== Capture =====
    /// Capture button pressed
    Capture,
    /// One second of the self-timer elapsed (tagged with its countdown)
    TimerTick(u64),
    PhotoCaptured(Result<MediaUri, CameraError>),
    /// The stop signal was (or could not be) delivered
    StopRequested(Result<(), CameraError>),
    /// The recording future resolved
    RecordingFinished(Result<MediaUri, CameraError>),
    MediaSaved(AppResult<MediaUri>),

    // ===== System =====
    OpenLastMedia,
    MediaOpened(Result<(), String>),
    ClearBanner(u64),
}
