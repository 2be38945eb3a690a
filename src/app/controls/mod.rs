// SPDX-License-Identifier: GPL-3.0-only

//! Capture controls module
//!
//! This module handles UI components for photo/video capture:
//! - Capture button (photo/video)
//! - Top bar toggles (flash, timer, mirror, aspect ratio, settings)

pub mod capture_button;
pub mod toggle_button;

pub use capture_button::{CaptureButton, CaptureButtonState};
pub use toggle_button::{Tint, ToggleControl, ToggleIcon};
