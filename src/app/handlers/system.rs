// SPDX-License-Identifier: GPL-3.0-only

//! System handlers
//!
//! Handles the error banner, the media library, opening the last capture and
//! the settings panel.

use crate::app::state::{Banner, Message, Viewfinder};
use crate::app::task::Task;
use crate::backends::camera::{CapturedMedia, MediaUri};
use crate::backends::permissions::Permission;
use crate::errors::{AppError, AppResult};
use tracing::{debug, error, info, warn};

impl Viewfinder {
    // =========================================================================
    // Error banner
    // =========================================================================

    /// Show an error to the user and schedule its removal
    pub(crate) fn surface_error(&mut self, err: AppError) -> Task<Message> {
        warn!(%err, "Capture error");
        self.banner_generation += 1;
        let id = self.banner_generation;
        self.banner = Some(Banner { id, error: err });
        Self::delay_task(self.config.banner_duration(), Message::ClearBanner(id))
    }

    pub(crate) fn handle_clear_banner(&mut self, id: u64) -> Task<Message> {
        if self.banner.as_ref().is_some_and(|banner| banner.id == id) {
            self.banner = None;
        }
        Task::none()
    }

    // =========================================================================
    // Media library
    // =========================================================================

    pub(crate) fn save_to_library(&mut self, media: CapturedMedia) -> Task<Message> {
        if !self.config.save_to_library {
            return Task::none();
        }
        if !self.permissions.is_granted(Permission::MediaLibrary) {
            debug!("Media library permission not granted, skipping save");
            return Task::none();
        }

        self.pending_saves += 1;
        Task::perform(
            self.backends.media_store.save_to_library(&media),
            Message::MediaSaved,
        )
    }

    pub(crate) fn handle_media_saved(&mut self, result: AppResult<MediaUri>) -> Task<Message> {
        self.pending_saves = self.pending_saves.saturating_sub(1);
        match result {
            Ok(uri) => {
                info!(%uri, "Capture saved to library");
                self.last_saved = Some(uri);
            }
            // Library failures are not shown; the capture itself succeeded
            Err(err) => error!(%err, "Failed to save capture to library"),
        }
        Task::none()
    }

    // =========================================================================
    // Last capture
    // =========================================================================

    pub(crate) fn handle_open_last_media(&self) -> Task<Message> {
        let Some(media) = self.session.last_media() else {
            debug!("No capture to open yet");
            return Task::none();
        };

        let uri = self.last_saved.clone().unwrap_or_else(|| media.uri.clone());
        let target = uri
            .to_path()
            .map(|path| path.into_os_string())
            .unwrap_or_else(|| uri.as_str().into());
        info!(%uri, "Opening last capture");

        Task::perform(
            async move {
                match tokio::task::spawn_blocking(move || open::that(&target)).await {
                    Ok(result) => result.map_err(|e| e.to_string()),
                    Err(e) => Err(e.to_string()),
                }
            },
            Message::MediaOpened,
        )
    }

    pub(crate) fn handle_media_opened(&self, result: Result<(), String>) -> Task<Message> {
        if let Err(err) = result {
            error!(%err, "Failed to open capture");
        }
        Task::none()
    }

    // =========================================================================
    // Settings panel
    // =========================================================================

    pub(crate) fn handle_toggle_settings(&mut self) -> Task<Message> {
        self.settings_visible = !self.settings_visible;
        Task::none()
    }

    pub(crate) fn handle_cycle_timer_preset(&mut self) -> Task<Message> {
        self.timer = self.timer.next();
        info!(seconds = self.timer.seconds(), "Timer preset changed");
        Task::none()
    }
}
