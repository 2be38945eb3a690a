// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for camera backends

use crate::app::{CaptureSession, Facing};
use crate::constants::{file_formats, preview};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

const FILE_SCHEME: &str = "file://";

/// Opaque reference to a produced photo or video
///
/// Owned by the device; the session only keeps the reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaUri(String);

impl MediaUri {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// `file://` reference for a local path
    pub fn from_path(path: &Path) -> Self {
        Self(format!("{}{}", FILE_SCHEME, path.display()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Local path of a `file://` reference
    pub fn to_path(&self) -> Option<PathBuf> {
        self.0.strip_prefix(FILE_SCHEME).map(PathBuf::from)
    }

    /// Last path segment, used as a short label in the UI
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for MediaUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MediaUri {
    fn from(uri: &str) -> Self {
        Self::new(uri)
    }
}

/// What a capture produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    Photo,
    Video,
}

impl MediaKind {
    /// File name prefix used in the media library
    pub fn file_prefix(&self) -> &'static str {
        match self {
            MediaKind::Photo => "IMG",
            MediaKind::Video => "VID",
        }
    }

    /// Guess the kind from the reference's extension
    pub fn from_uri(uri: &MediaUri) -> Self {
        let is_video = uri
            .file_name()
            .rsplit_once('.')
            .is_some_and(|(_, ext)| file_formats::is_video_extension(ext));
        if is_video {
            MediaKind::Video
        } else {
            MediaKind::Photo
        }
    }
}

/// The most recent capture of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedMedia {
    pub uri: MediaUri,
    pub kind: MediaKind,
}

impl CapturedMedia {
    pub fn photo(uri: MediaUri) -> Self {
        Self {
            uri,
            kind: MediaKind::Photo,
        }
    }

    pub fn video(uri: MediaUri) -> Self {
        Self {
            uri,
            kind: MediaKind::Video,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlashMode {
    On,
    #[default]
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoFocus {
    #[default]
    On,
    Off,
}

/// Sensor ratio requested from the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatio {
    #[default]
    FourThree,
    SixteenNine,
}

impl AspectRatio {
    /// Ratio string understood by mobile camera APIs
    pub fn label(&self) -> &'static str {
        match self {
            AspectRatio::FourThree => "4:3",
            AspectRatio::SixteenNine => "16:9",
        }
    }

    /// Preview width/height in portrait orientation
    pub fn preview_aspect(&self) -> f32 {
        match self {
            AspectRatio::FourThree => preview::ASPECT_FOUR_THREE,
            AspectRatio::SixteenNine => preview::ASPECT_SIXTEEN_NINE,
        }
    }

    /// Capture size (width, height) of the test-pattern camera
    pub fn capture_size(&self) -> (u32, u32) {
        match self {
            AspectRatio::FourThree => preview::FOUR_THREE_SIZE,
            AspectRatio::SixteenNine => preview::SIXTEEN_NINE_SIZE,
        }
    }
}

/// Discrete values pushed to the camera device
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DeviceSettings {
    pub facing: Facing,
    pub flash: FlashMode,
    pub autofocus: AutoFocus,
    pub ratio: AspectRatio,
    /// Normalized zoom (0.0..=1.0)
    pub zoom: f32,
    pub mirror: bool,
}

impl DeviceSettings {
    /// Map the session's toggles onto device values
    pub fn from_session(session: &CaptureSession, autofocus: bool) -> Self {
        Self {
            facing: session.facing(),
            flash: if session.flash_enabled() {
                FlashMode::On
            } else {
                FlashMode::Off
            },
            autofocus: if autofocus {
                AutoFocus::On
            } else {
                AutoFocus::Off
            },
            ratio: if session.wide_aspect() {
                AspectRatio::FourThree
            } else {
                AspectRatio::SixteenNine
            },
            zoom: session.zoom(),
            mirror: session.mirror_enabled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ToggleFlag;

    #[test]
    fn test_media_uri_path_roundtrip() {
        let uri = MediaUri::from_path(Path::new("/tmp/captures/IMG_1.jpg"));
        assert_eq!(uri.as_str(), "file:///tmp/captures/IMG_1.jpg");
        assert_eq!(uri.to_path(), Some(PathBuf::from("/tmp/captures/IMG_1.jpg")));
        assert_eq!(uri.file_name(), "IMG_1.jpg");
    }

    #[test]
    fn test_non_file_uri_has_no_path() {
        assert_eq!(MediaUri::new("content://media/1").to_path(), None);
    }

    #[test]
    fn test_media_kind_from_extension() {
        assert_eq!(MediaKind::from_uri(&"file://b.mjpeg".into()), MediaKind::Video);
        assert_eq!(MediaKind::from_uri(&"file://a.jpg".into()), MediaKind::Photo);
    }

    #[test]
    fn test_settings_follow_session_toggles() {
        let mut session = CaptureSession::default();
        let settings = DeviceSettings::from_session(&session, true);
        assert_eq!(settings.flash, FlashMode::Off);
        assert_eq!(settings.ratio, AspectRatio::FourThree);
        assert_eq!(settings.autofocus, AutoFocus::On);

        session.toggle(ToggleFlag::Flash);
        session.toggle(ToggleFlag::WideAspect);
        let settings = DeviceSettings::from_session(&session, false);
        assert_eq!(settings.flash, FlashMode::On);
        assert_eq!(settings.ratio, AspectRatio::SixteenNine);
        assert_eq!(settings.ratio.label(), "16:9");
        assert_eq!(settings.autofocus, AutoFocus::Off);
    }
}
