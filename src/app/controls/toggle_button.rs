// SPDX-License-Identifier: GPL-3.0-only

//! Top bar toggle controls

use crate::app::session::ToggleFlag;
use crate::app::state::{Message, Viewfinder};
use crate::constants::ui;

/// Glyph shown by a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleIcon {
    Flash,
    Timer,
    Mirror,
    AspectRatio,
    Settings,
}

impl ToggleIcon {
    /// Symbolic icon name
    pub fn name(&self) -> &'static str {
        match self {
            ToggleIcon::Flash => "camera-flash-symbolic",
            ToggleIcon::Timer => "timer-symbolic",
            ToggleIcon::Mirror => "object-flip-horizontal-symbolic",
            ToggleIcon::AspectRatio => "aspect-ratio-symbolic",
            ToggleIcon::Settings => "emblem-system-symbolic",
        }
    }

    /// Short text label for text-only frontends
    pub fn label(&self) -> &'static str {
        match self {
            ToggleIcon::Flash => "Flash",
            ToggleIcon::Timer => "Timer",
            ToggleIcon::Mirror => "Mirror",
            ToggleIcon::AspectRatio => "4:3",
            ToggleIcon::Settings => "Settings",
        }
    }

    pub fn for_flag(flag: ToggleFlag) -> Self {
        match flag {
            ToggleFlag::Flash => ToggleIcon::Flash,
            ToggleFlag::Timer => ToggleIcon::Timer,
            ToggleFlag::Mirror => ToggleIcon::Mirror,
            ToggleFlag::WideAspect => ToggleIcon::AspectRatio,
        }
    }
}

/// Tint of a toggle glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Active,
    Inactive,
}

impl Tint {
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Tint::Active => ui::TOGGLE_ACTIVE,
            Tint::Inactive => ui::TOGGLE_INACTIVE,
        }
    }
}

/// Stateless toggle: renders `enabled` and reports presses
///
/// The control never flips its own state; the next render reflects whatever
/// the owner did with the press.
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleControl<M> {
    icon: ToggleIcon,
    enabled: bool,
    on_press: Option<M>,
}

impl<M: Clone> ToggleControl<M> {
    pub fn new(icon: ToggleIcon, enabled: bool) -> Self {
        Self {
            icon,
            enabled,
            on_press: None,
        }
    }

    pub fn on_press(mut self, message: M) -> Self {
        self.on_press = Some(message);
        self
    }

    pub fn icon(&self) -> ToggleIcon {
        self.icon
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn tint(&self) -> Tint {
        if self.enabled {
            Tint::Active
        } else {
            Tint::Inactive
        }
    }

    /// Message to emit for a press, if the control is wired
    pub fn press(&self) -> Option<M> {
        self.on_press.clone()
    }
}

impl Viewfinder {
    /// Build the top bar: one toggle per session flag, then settings
    pub fn build_top_bar(&self) -> Vec<ToggleControl<Message>> {
        let mut controls: Vec<_> = ToggleFlag::ALL
            .iter()
            .map(|&flag| {
                ToggleControl::new(ToggleIcon::for_flag(flag), self.session.flag(flag))
                    .on_press(Message::Toggle(flag))
            })
            .collect();
        controls.push(
            ToggleControl::new(ToggleIcon::Settings, self.settings_visible)
                .on_press(Message::ToggleSettings),
        );
        controls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tint_follows_enabled_only() {
        assert_eq!(ToggleControl::<u8>::new(ToggleIcon::Flash, true).tint(), Tint::Active);
        assert_eq!(ToggleControl::<u8>::new(ToggleIcon::Flash, false).tint(), Tint::Inactive);
        assert_eq!(Tint::Active.rgb(), (255, 255, 0));
        assert_eq!(Tint::Inactive.rgb(), (255, 255, 255));
    }

    #[test]
    fn test_press_reports_without_changing_state() {
        let control = ToggleControl::new(ToggleIcon::Mirror, false).on_press(7u8);
        assert_eq!(control.press(), Some(7));
        assert_eq!(control.press(), Some(7));
        assert!(!control.enabled());
    }

    #[test]
    fn test_unwired_control_reports_nothing() {
        let control = ToggleControl::<u8>::new(ToggleIcon::Timer, true);
        assert_eq!(control.press(), None);
    }
}
