// SPDX-License-Identifier: GPL-3.0-only

//! Camera handlers
//!
//! Handles permissions, mode selection, facing, toggles, zoom and the mapping
//! of session settings onto the camera device.

use crate::app::session::{CaptureMode, ModeChange, ToggleFlag};
use crate::app::state::{Message, Viewfinder};
use crate::app::task::Task;
use crate::backends::camera::DeviceSettings;
use crate::backends::permissions::{Permission, PermissionSet};
use tracing::{debug, info, warn};

impl Viewfinder {
    // =========================================================================
    // Permissions
    // =========================================================================

    pub(crate) fn handle_permissions_resolved(
        &mut self,
        permissions: PermissionSet,
    ) -> Task<Message> {
        self.permissions = permissions;

        if !permissions.is_granted(Permission::Camera) {
            warn!("Camera permission not granted, viewfinder disabled");
            return Task::none();
        }
        if !permissions.is_granted(Permission::Microphone) {
            info!("Microphone permission not granted, video recording unavailable");
        }

        self.sync_device_settings();
        Task::none()
    }

    // =========================================================================
    // Mode
    // =========================================================================

    pub(crate) fn handle_set_mode(&mut self, mode: CaptureMode) -> Task<Message> {
        match self.session.set_mode(mode) {
            ModeChange::Unchanged => Task::none(),
            ModeChange::Applied => {
                self.abort_timer_countdown();
                Task::none()
            }
            ModeChange::Deferred { stop_needed } => {
                self.abort_timer_countdown();
                if stop_needed {
                    self.stop_recording_task()
                } else {
                    Task::none()
                }
            }
        }
    }

    // =========================================================================
    // Top bar toggles
    // =========================================================================

    pub(crate) fn handle_toggle(&mut self, flag: ToggleFlag) -> Task<Message> {
        let enabled = self.session.toggle(flag);
        info!(?flag, enabled, "Setting toggled");

        match flag {
            ToggleFlag::Timer if !enabled => self.abort_timer_countdown(),
            ToggleFlag::Timer => {}
            ToggleFlag::Flash | ToggleFlag::Mirror | ToggleFlag::WideAspect => {
                self.sync_device_settings()
            }
        }
        Task::none()
    }

    pub(crate) fn handle_flip_camera(&mut self) -> Task<Message> {
        if self.session.flip_facing() {
            info!(facing = ?self.session.facing(), "Camera switched");
            self.sync_device_settings();
        }
        Task::none()
    }

    pub(crate) fn handle_zoom_in(&mut self) -> Task<Message> {
        let zoom = self.session.zoom_in();
        debug!(zoom, "Zoom in");
        self.sync_device_settings();
        Task::none()
    }

    pub(crate) fn handle_zoom_out(&mut self) -> Task<Message> {
        let zoom = self.session.zoom_out();
        debug!(zoom, "Zoom out");
        self.sync_device_settings();
        Task::none()
    }

    pub(crate) fn handle_toggle_autofocus(&mut self) -> Task<Message> {
        self.autofocus = !self.autofocus;
        info!(autofocus = self.autofocus, "Autofocus toggled");
        self.sync_device_settings();
        Task::none()
    }

    /// Push the session's settings to the camera
    pub(crate) fn sync_device_settings(&self) {
        if !self.permissions.is_granted(Permission::Camera) {
            return;
        }
        let settings = DeviceSettings::from_session(&self.session, self.autofocus);
        if let Err(err) = self.backends.camera.apply_settings(&settings) {
            warn!(%err, "Failed to apply camera settings");
        }
    }
}
