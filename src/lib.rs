// SPDX-License-Identifier: GPL-3.0-only

//! Viewfinder - camera capture screen with photo and video modes
//!
//! This library provides the capture session state machine, the routing of
//! capture presses, and the collaborators (camera device, permissions, media
//! library) the screen is wired to.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`app`]: Session state, message handling and screen description
//! - [`backends`]: Camera, permission and media library abstraction
//! - [`config`]: User configuration handling
//! - [`storage`]: Capture and library file locations
//! - [`terminal`]: Terminal frontend
//!
//! # Example
//!
//! ```ignore
//! let (mut app, init) = Viewfinder::new(Config::default(), backends);
//! runtime.spawn(init);
//! runtime.dispatch(&mut app, Message::Capture);
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod storage;
pub mod terminal;

// Re-export commonly used types
pub use app::{CaptureMode, CaptureSession, Facing, Message, ToggleFlag, Viewfinder};
pub use config::Config;
pub use constants::TimerPreset;
pub use errors::{AppError, AppResult};
