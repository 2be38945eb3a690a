// SPDX-License-Identifier: GPL-3.0-only

//! Mode selector (Slow / Portrait / Photo / Video)
//!
//! The selector holds no state of its own: it is rebuilt from the session's
//! current mode and turns presses and swipes into `SetMode` messages.

use crate::app::session::CaptureMode;
use crate::app::state::{Message, Viewfinder};

/// Direction of a horizontal swipe over the viewfinder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved right to left: the next mode
    Left,
    /// Finger moved left to right: the previous mode
    Right,
}

/// One entry of the selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeItem {
    pub index: usize,
    pub mode: CaptureMode,
    pub label: &'static str,
    pub selected: bool,
}

/// Iterates the selector entries in display order
///
/// Cloning (or [`ModeItems::restart`]) gives an independent pass from the
/// start, so the same selector can be walked more than once.
#[derive(Debug, Clone)]
pub struct ModeItems {
    current: CaptureMode,
    position: usize,
}

impl ModeItems {
    pub fn restart(&self) -> Self {
        Self {
            current: self.current,
            position: 0,
        }
    }
}

impl Iterator for ModeItems {
    type Item = ModeItem;

    fn next(&mut self) -> Option<Self::Item> {
        let mode = CaptureMode::from_index(self.position)?;
        let item = ModeItem {
            index: self.position,
            mode,
            label: mode.display_name(),
            selected: mode == self.current,
        };
        self.position += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = CaptureMode::ALL.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ModeItems {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeSelector {
    current: CaptureMode,
}

impl ModeSelector {
    pub fn new(current: CaptureMode) -> Self {
        Self { current }
    }

    pub fn current(&self) -> CaptureMode {
        self.current
    }

    pub fn selected_index(&self) -> usize {
        self.current.index()
    }

    pub fn items(&self) -> ModeItems {
        ModeItems {
            current: self.current,
            position: 0,
        }
    }

    /// Message for tapping the entry at `index`
    pub fn select(&self, index: usize) -> Option<Message> {
        CaptureMode::from_index(index).map(Message::SetMode)
    }

    /// Message for a swipe; nothing past either end
    pub fn swipe(&self, direction: SwipeDirection) -> Option<Message> {
        let index = self.selected_index();
        let target = match direction {
            SwipeDirection::Left => index.checked_add(1)?,
            SwipeDirection::Right => index.checked_sub(1)?,
        };
        self.select(target)
    }
}

impl Viewfinder {
    /// Build the mode selector for the session's current mode
    pub fn build_mode_switcher(&self) -> ModeSelector {
        ModeSelector::new(self.session.mode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(message: Option<Message>) -> Option<CaptureMode> {
        match message {
            Some(Message::SetMode(mode)) => Some(mode),
            _ => None,
        }
    }

    #[test]
    fn test_items_in_display_order_with_single_selection() {
        let selector = ModeSelector::new(CaptureMode::Video);
        let items: Vec<_> = selector.items().collect();
        let labels: Vec<_> = items.iter().map(|item| item.label).collect();
        assert_eq!(labels, vec!["Slow", "Portrait", "Photo", "Video"]);
        assert_eq!(items.iter().filter(|item| item.selected).count(), 1);
        assert!(items[3].selected);
    }

    #[test]
    fn test_items_can_be_walked_twice() {
        let selector = ModeSelector::new(CaptureMode::Photo);
        let mut items = selector.items();
        assert_eq!(items.len(), 4);
        let first: Vec<_> = items.by_ref().collect();
        assert_eq!(items.next(), None);
        let second: Vec<_> = items.restart().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_select_by_index() {
        let selector = ModeSelector::new(CaptureMode::Photo);
        assert_eq!(target(selector.select(0)), Some(CaptureMode::Slow));
        assert_eq!(target(selector.select(3)), Some(CaptureMode::Video));
        assert_eq!(target(selector.select(4)), None);
    }

    #[test]
    fn test_swipe_moves_one_step_without_wrapping() {
        let photo = ModeSelector::new(CaptureMode::Photo);
        assert_eq!(target(photo.swipe(SwipeDirection::Left)), Some(CaptureMode::Video));
        assert_eq!(target(photo.swipe(SwipeDirection::Right)), Some(CaptureMode::Portrait));

        let video = ModeSelector::new(CaptureMode::Video);
        assert_eq!(target(video.swipe(SwipeDirection::Left)), None);

        let slow = ModeSelector::new(CaptureMode::Slow);
        assert_eq!(target(slow.swipe(SwipeDirection::Right)), None);
    }
}
