// SPDX-License-Identifier: GPL-3.0-only

//! Main application view
//!
//! Composes the screen from the component builders:
//! - Top bar toggles (controls module)
//! - Camera preview
//! - Capture button (controls module)
//! - Bottom bar (bottom_bar module)
//! - Settings panel and error banner overlays
//!
//! The result is a plain description; frontends decide how to draw it.

use crate::app::bottom_bar::BottomBar;
use crate::app::controls::{CaptureButton, ToggleControl};
use crate::app::session::Facing;
use crate::app::state::{Banner, Message, Viewfinder};
use crate::backends::camera::AspectRatio;
use crate::backends::permissions::{Permission, PermissionStatus};
use crate::constants::TimerPreset;
use std::path::PathBuf;

/// What the screen shows
#[derive(Debug, Clone)]
pub enum Screen {
    /// Waiting for the permission prompts
    RequestingPermissions,
    /// Camera access was denied
    NoAccess,
    Viewfinder(Box<ViewfinderLayout>),
}

#[derive(Debug, Clone)]
pub struct ViewfinderLayout {
    pub top_bar: Vec<ToggleControl<Message>>,
    pub preview: PreviewSpec,
    pub capture_button: CaptureButton,
    pub bottom_bar: BottomBar,
    pub banner: Option<Banner>,
    pub settings: Option<SettingsPanel>,
}

/// How the live preview is framed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewSpec {
    pub facing: Facing,
    pub mirrored: bool,
    pub ratio: AspectRatio,
    pub zoom: f32,
}

impl PreviewSpec {
    /// Width over height of the preview in portrait orientation
    pub fn aspect(&self) -> f32 {
        self.ratio.preview_aspect()
    }
}

/// Contents of the settings panel
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsPanel {
    pub camera_name: String,
    pub autofocus: bool,
    pub timer: TimerPreset,
    pub zoom: f32,
    pub save_to_library: bool,
    pub library_dir: PathBuf,
}

impl Viewfinder {
    /// Build the main application view
    pub fn view(&self) -> Screen {
        match self.permissions.status(Permission::Camera) {
            PermissionStatus::NotDetermined => Screen::RequestingPermissions,
            PermissionStatus::Denied => Screen::NoAccess,
            PermissionStatus::Granted => Screen::Viewfinder(Box::new(ViewfinderLayout {
                top_bar: self.build_top_bar(),
                preview: self.build_preview(),
                capture_button: self.build_capture_button(),
                bottom_bar: self.build_bottom_bar(),
                banner: self.banner.clone(),
                settings: self.settings_visible.then(|| self.build_settings_panel()),
            })),
        }
    }

    pub fn build_preview(&self) -> PreviewSpec {
        PreviewSpec {
            facing: self.session.facing(),
            mirrored: self.session.mirror_enabled(),
            ratio: if self.session.wide_aspect() {
                AspectRatio::FourThree
            } else {
                AspectRatio::SixteenNine
            },
            zoom: self.session.zoom(),
        }
    }

    fn build_settings_panel(&self) -> SettingsPanel {
        SettingsPanel {
            camera_name: self.backends.camera.name().to_string(),
            autofocus: self.autofocus,
            timer: self.timer,
            zoom: self.session.zoom(),
            save_to_library: self.config.save_to_library,
            library_dir: self.config.library_directory(),
        }
    }
}
