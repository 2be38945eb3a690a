// SPDX-License-Identifier: GPL-3.0-only

//! Main application module for the viewfinder
//!
//! This module contains the application state, message handling, screen
//! description and capture logic.
//!
//! # Architecture
//!
//! - `session`: Capture session state (mode, facing, toggles, recording)
//! - `dispatcher`: Routing of capture presses
//! - `state`: Application state types (Viewfinder, Message, Banner)
//! - `task`: Deferred work returned from `update`
//! - `runtime`: Runs tasks on tokio and feeds messages back
//! - `controls`: Capture button and top bar toggles
//! - `bottom_bar`: Last capture, mode switcher, camera switcher
//! - `view`: Screen description
//! - `update`: Message handling
//!
//! # Main Types
//!
//! - `Viewfinder`: Main application state wired to its backends
//! - `Message`: All possible user interactions and system events
//! - `CaptureMode`: Slow, Portrait, Photo or Video

pub mod bottom_bar;
pub mod controls;
pub mod dispatcher;
mod handlers;
pub mod runtime;
pub mod session;
mod state;
pub mod task;
mod update;
pub mod view;

pub use dispatcher::{CaptureAction, IgnoreReason, dispatch};
pub use runtime::Runtime;
pub use session::{CaptureMode, CaptureSession, Facing, ModeChange, RecordingState, ToggleFlag};
pub use state::{Banner, Message, Viewfinder};
pub use task::Task;
pub use view::Screen;

use crate::backends::Backends;
use crate::backends::permissions;
use crate::config::Config;
use std::sync::Arc;
use tracing::info;

impl Viewfinder {
    /// Mount the viewfinder
    ///
    /// Returns the initial state and the task requesting permissions. Nothing
    /// is captured until camera access has been granted.
    pub fn new(config: Config, backends: Backends) -> (Self, Task<Message>) {
        let session =
            CaptureSession::new(config.initial_mode, config.initial_facing, config.wide_aspect);
        info!(
            mode = ?session.mode(),
            facing = ?session.facing(),
            camera = backends.camera.name(),
            "Viewfinder mounted"
        );

        let provider = Arc::clone(&backends.permissions);
        let app = Self {
            autofocus: config.autofocus,
            timer: config.timer,
            config,
            session,
            permissions: permissions::PermissionSet::default(),
            settings_visible: false,
            timer_countdown: None,
            countdown_generation: 0,
            banner: None,
            banner_generation: 0,
            pending_saves: 0,
            last_saved: None,
            backends,
        };

        let task = Task::perform(
            permissions::request_all(provider),
            Message::PermissionsResolved,
        );
        (app, task)
    }
}
