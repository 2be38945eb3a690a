// SPDX-License-Identifier: GPL-3.0-only

//! Capture handlers
//!
//! Handles photo capture, video recording and the self-timer. Every camera
//! request is issued here and its outcome comes back as a message.

use crate::app::dispatcher::{CaptureAction, dispatch};
use crate::app::state::{Message, Viewfinder};
use crate::app::task::Task;
use crate::backends::camera::{CameraResult, CapturedMedia, MediaUri};
use crate::constants::timing;
use crate::errors::{CameraError, CaptureError, CaptureOp};
use futures::FutureExt;
use futures::future::BoxFuture;
use std::time::Duration;
use tracing::{debug, info, warn};

impl Viewfinder {
    /// Create a delayed task that sends a message after the specified duration
    pub(crate) fn delay_task(delay: Duration, message: Message) -> Task<Message> {
        Task::perform(
            async move {
                tokio::time::sleep(delay).await;
                message
            },
            std::convert::identity,
        )
    }

    pub(crate) fn handle_capture(&mut self) -> Task<Message> {
        // A press during the countdown cancels it
        if self.timer_countdown.is_some() {
            self.abort_timer_countdown();
            return Task::none();
        }

        match dispatch(&self.session, &self.permissions) {
            CaptureAction::TakePhoto if self.session.timer_enabled() => {
                self.start_timer_countdown()
            }
            action => self.perform_capture_action(action),
        }
    }

    fn perform_capture_action(&mut self, action: CaptureAction) -> Task<Message> {
        match action {
            CaptureAction::TakePhoto => self.capture_photo(),
            CaptureAction::StartRecording => self.start_recording(),
            CaptureAction::StopRecording => self.stop_recording(),
            CaptureAction::Ignore(reason) => {
                debug!(?reason, "Capture press ignored");
                Task::none()
            }
            CaptureAction::Refuse(err) => self.surface_error(err),
        }
    }

    // =========================================================================
    // Photo
    // =========================================================================

    fn capture_photo(&mut self) -> Task<Message> {
        if !self.session.begin_photo() {
            return Task::none();
        }
        info!(mode = ?self.session.mode(), "Taking photo");
        let request = with_timeout(
            self.backends.camera.take_photo(),
            self.config.capture_timeout(),
        );
        Task::perform(request, Message::PhotoCaptured)
    }

    pub(crate) fn handle_photo_captured(
        &mut self,
        result: Result<MediaUri, CameraError>,
    ) -> Task<Message> {
        self.session.finish_photo();
        match result {
            Ok(uri) => {
                let media = CapturedMedia::photo(uri);
                self.session.record_media_result(media.clone());
                self.save_to_library(media)
            }
            Err(err) => self.surface_error(CaptureError::new(CaptureOp::Photo, err).into()),
        }
    }

    // =========================================================================
    // Video
    // =========================================================================

    fn start_recording(&mut self) -> Task<Message> {
        if !self.session.begin_recording() {
            return Task::none();
        }
        info!("Starting recording");
        // Resolves only once the recording has been stopped
        Task::perform(
            self.backends.camera.start_recording(),
            Message::RecordingFinished,
        )
    }

    fn stop_recording(&mut self) -> Task<Message> {
        if !self.session.request_stop() {
            return Task::none();
        }
        self.stop_recording_task()
    }

    /// Send the stop signal; the session must already be marked as stopping
    pub(crate) fn stop_recording_task(&self) -> Task<Message> {
        info!(
            elapsed_secs = self.session.recording().elapsed_secs(),
            "Stopping recording"
        );
        let request = with_timeout(
            self.backends.camera.stop_recording(),
            self.config.capture_timeout(),
        );
        Task::perform(request, Message::StopRequested)
    }

    pub(crate) fn handle_stop_requested(&mut self, result: Result<(), CameraError>) -> Task<Message> {
        let Err(err) = result else {
            debug!("Stop signal delivered");
            return Task::none();
        };

        if !self.session.is_recording() {
            // The recording already finalized on its own
            debug!(%err, "Stop signal arrived after recording ended");
            return Task::none();
        }
        self.session.cancel_stop_request();
        self.surface_error(CaptureError::new(CaptureOp::StopRecording, err).into())
    }

    pub(crate) fn handle_recording_finished(
        &mut self,
        result: Result<MediaUri, CameraError>,
    ) -> Task<Message> {
        if !self.session.is_recording() {
            warn!("Recording result without an active recording");
            return Task::none();
        }

        let stop_requested = self.session.recording().stop_requested();
        if let Some(mode) = self.session.finish_recording() {
            debug!(?mode, "Applying deferred mode");
            self.sync_device_settings();
        }

        match result {
            Ok(uri) => {
                let media = CapturedMedia::video(uri);
                self.session.record_media_result(media.clone());
                self.save_to_library(media)
            }
            Err(err) => {
                // Failure before any stop means the recording never started
                let op = if stop_requested {
                    CaptureOp::StopRecording
                } else {
                    CaptureOp::StartRecording
                };
                self.surface_error(CaptureError::new(op, err).into())
            }
        }
    }

    // =========================================================================
    // Self-timer
    // =========================================================================

    fn start_timer_countdown(&mut self) -> Task<Message> {
        let seconds = self.timer.seconds();
        self.countdown_generation += 1;
        self.timer_countdown = Some(seconds);
        info!(seconds, "Starting photo timer countdown");
        Self::delay_task(
            timing::TIMER_TICK,
            Message::TimerTick(self.countdown_generation),
        )
    }

    pub(crate) fn handle_timer_tick(&mut self, generation: u64) -> Task<Message> {
        if generation != self.countdown_generation {
            return Task::none();
        }
        let Some(remaining) = self.timer_countdown else {
            return Task::none();
        };

        if remaining > 1 {
            self.timer_countdown = Some(remaining - 1);
            debug!(remaining = remaining - 1, "Photo timer tick");
            return Self::delay_task(timing::TIMER_TICK, Message::TimerTick(generation));
        }

        info!("Photo timer countdown complete");
        self.timer_countdown = None;
        // Route again: the session may have changed during the countdown
        match dispatch(&self.session, &self.permissions) {
            CaptureAction::TakePhoto => self.capture_photo(),
            action => self.perform_capture_action(action),
        }
    }

    pub(crate) fn abort_timer_countdown(&mut self) {
        if self.timer_countdown.take().is_some() {
            self.countdown_generation += 1;
            info!("Photo timer countdown aborted");
        }
    }
}

/// Bound a camera request by the configured timeout
fn with_timeout<T: Send + 'static>(
    request: BoxFuture<'static, CameraResult<T>>,
    timeout: Option<Duration>,
) -> BoxFuture<'static, CameraResult<T>> {
    match timeout {
        Some(limit) => async move {
            tokio::time::timeout(limit, request)
                .await
                .unwrap_or(Err(CameraError::TimedOut))
        }
        .boxed(),
        None => request,
    }
}
