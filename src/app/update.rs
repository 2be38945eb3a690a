// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! This module handles all application messages by routing them to focused handler methods.
//! The main `update()` function acts as a dispatcher, while specific handlers are implemented
//! in the `handlers` submodules organized by functional domain.
//!
//! # Handler Modules
//!
//! - `handlers::camera`: Permissions, mode, facing, toggles, zoom, device settings
//! - `handlers::capture`: Photo capture, video recording, self-timer
//! - `handlers::system`: Error banner, media library, settings panel

use crate::app::state::{Message, Viewfinder};
use crate::app::task::Task;

impl Viewfinder {
    /// Main message handler - routes messages to appropriate handler methods.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            // ===== Lifecycle =====
            Message::PermissionsResolved(permissions) => {
                self.handle_permissions_resolved(permissions)
            }

            // ===== Top bar and modes =====
            Message::SetMode(mode) => self.handle_set_mode(mode),
            Message::Toggle(flag) => self.handle_toggle(flag),
            Message::FlipCamera => self.handle_flip_camera(),
            Message::ZoomIn => self.handle_zoom_in(),
            Message::ZoomOut => self.handle_zoom_out(),

            // ===== Settings panel =====
            Message::ToggleSettings => self.handle_toggle_settings(),
            Message::ToggleAutofocus => self.handle_toggle_autofocus(),
            Message::CycleTimerPreset => self.handle_cycle_timer_preset(),

            // ===== Capture =====
            Message::Capture => self.handle_capture(),
            Message::TimerTick(generation) => self.handle_timer_tick(generation),
            Message::PhotoCaptured(result) => self.handle_photo_captured(result),
            Message::StopRequested(result) => self.handle_stop_requested(result),
            Message::RecordingFinished(result) => self.handle_recording_finished(result),
            Message::MediaSaved(result) => self.handle_media_saved(result),

            // ===== System =====
            Message::OpenLastMedia => self.handle_open_last_media(),
            Message::MediaOpened(result) => self.handle_media_opened(result),
            Message::ClearBanner(id) => self.handle_clear_banner(id),
        }
    }
}
