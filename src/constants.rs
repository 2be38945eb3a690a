// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Self-timer durations offered in the settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimerPreset {
    /// 3 second countdown (default)
    #[default]
    Three,
    /// 5 second countdown
    Five,
    /// 10 second countdown
    Ten,
}

impl TimerPreset {
    /// Get all preset variants for UI iteration
    pub const ALL: [TimerPreset; 3] = [TimerPreset::Three, TimerPreset::Five, TimerPreset::Ten];

    /// Countdown length in seconds
    pub fn seconds(&self) -> u64 {
        match self {
            TimerPreset::Three => 3,
            TimerPreset::Five => 5,
            TimerPreset::Ten => 10,
        }
    }

    /// Get display name for the preset
    pub fn display_name(&self) -> &'static str {
        match self {
            TimerPreset::Three => "3s",
            TimerPreset::Five => "5s",
            TimerPreset::Ten => "10s",
        }
    }

    /// The next preset, wrapping around after the longest one
    pub fn next(&self) -> Self {
        match self {
            TimerPreset::Three => TimerPreset::Five,
            TimerPreset::Five => TimerPreset::Ten,
            TimerPreset::Ten => TimerPreset::Three,
        }
    }
}

/// Zoom constants (device zoom is normalized to 0.0..=1.0)
pub mod zoom {
    pub const MIN: f32 = 0.0;
    pub const MAX: f32 = 1.0;
    /// Step applied by one zoom in/out action
    pub const STEP: f32 = 0.1;
}

/// Preview geometry
pub mod preview {
    /// Preview width/height for the 4:3 sensor ratio in portrait orientation
    pub const ASPECT_FOUR_THREE: f32 = 0.77;
    /// Preview width/height for the 16:9 sensor ratio in portrait orientation
    pub const ASPECT_SIXTEEN_NINE: f32 = 0.56;

    /// Test pattern size for 4:3 captures
    pub const FOUR_THREE_SIZE: (u32, u32) = (480, 640);
    /// Test pattern size for 16:9 captures
    pub const SIXTEEN_NINE_SIZE: (u32, u32) = (360, 640);
}

/// UI colors as RGB triples
pub mod ui {
    /// Tint of an enabled toggle option
    pub const TOGGLE_ACTIVE: (u8, u8, u8) = (255, 255, 0);
    /// Tint of a disabled toggle option
    pub const TOGGLE_INACTIVE: (u8, u8, u8) = (255, 255, 255);
    /// Background of the selected mode in the mode selector
    pub const MODE_SELECTED: (u8, u8, u8) = (0x65, 0xb9, 0xed);
    /// Capture button while idle
    pub const CAPTURE_IDLE: (u8, u8, u8) = (255, 255, 255);
    /// Capture button while a photo request is pending
    pub const CAPTURE_BUSY: (u8, u8, u8) = (178, 178, 178);
    /// Capture button while recording
    pub const CAPTURE_RECORDING: (u8, u8, u8) = (255, 0, 0);
    /// Capture button when capture is unavailable
    pub const CAPTURE_DISABLED: (u8, u8, u8) = (96, 96, 96);
}

/// Timing constants
pub mod timing {
    use super::Duration;

    /// Interval between self-timer ticks
    pub const TIMER_TICK: Duration = Duration::from_secs(1);

    /// Default time an error banner stays visible
    pub const BANNER_DURATION_MS: u64 = 3000;

    /// Default timeout for take-photo and stop-recording requests
    pub const CAPTURE_TIMEOUT_SECS: u64 = 10;

    /// Frame interval of the test-pattern recorder (10 fps)
    pub const RECORDING_FRAME_INTERVAL: Duration = Duration::from_millis(100);

    /// Event poll interval of the terminal frontend (~60fps)
    pub const TERMINAL_POLL: Duration = Duration::from_millis(16);
}

/// File naming
pub mod file_formats {
    /// Extension of captured photos
    pub const PHOTO_EXTENSION: &str = "jpg";
    /// Extension of captured videos (raw motion-JPEG stream)
    pub const VIDEO_EXTENSION: &str = "mjpeg";
    /// JPEG quality of captured photos and video frames
    pub const JPEG_QUALITY: u8 = 85;

    /// Check if a file extension is a captured video
    pub fn is_video_extension(ext: &str) -> bool {
        ext.eq_ignore_ascii_case(VIDEO_EXTENSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_preset_cycle_returns_to_start() {
        let mut preset = TimerPreset::default();
        for _ in 0..TimerPreset::ALL.len() {
            preset = preset.next();
        }
        assert_eq!(preset, TimerPreset::default());
    }

    #[test]
    fn test_video_extension_case_insensitive() {
        assert!(file_formats::is_video_extension("MJPEG"));
        assert!(!file_formats::is_video_extension("jpg"));
    }
}
