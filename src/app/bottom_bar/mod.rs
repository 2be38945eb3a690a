// SPDX-License-Identifier: GPL-3.0-only

//! Bottom bar module
//!
//! This module handles the bottom control bar UI components:
//! - Last capture (opens the media viewer)
//! - Mode switcher (Slow/Portrait/Photo/Video)
//! - Camera switcher (flip cameras)

pub mod mode_switcher;

pub use mode_switcher::{ModeItem, ModeItems, ModeSelector, SwipeDirection};

use crate::app::state::{Message, Viewfinder};
use crate::backends::camera::CapturedMedia;

/// Contents of the bottom bar
#[derive(Debug, Clone)]
pub struct BottomBar {
    /// Latest capture, pressing it sends `open_message`
    pub last_media: Option<CapturedMedia>,
    pub open_message: Option<Message>,
    pub modes: ModeSelector,
    /// Flipping is refused while recording
    pub flip_enabled: bool,
}

impl Viewfinder {
    /// Build the complete bottom bar
    pub fn build_bottom_bar(&self) -> BottomBar {
        let last_media = self.session.last_media().cloned();
        BottomBar {
            open_message: last_media.as_ref().map(|_| Message::OpenLastMedia),
            last_media,
            modes: self.build_mode_switcher(),
            flip_enabled: !self.session.is_recording(),
        }
    }
}
