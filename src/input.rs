//! Pointer and keyboard input for one player.
//!
//! Input reaches a player through [`InputEvent`]s delivered by whoever owns
//! it, so several players can run side by side and stop listening simply by
//! no longer being fed.

use egui::{Key, Pos2, Rect};

use crate::controller::ControlAction;

/// Input delivered to a single player
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to a position (screen coordinates)
    PointerMoved(Pos2),
    /// Pointer left the window
    PointerLeft,
    /// Key pressed while the player has input
    KeyPressed(Key),
}

/// Whether `pointer` lies inside `bounds`, edges included.
pub fn is_within(pointer: Pos2, bounds: Rect) -> bool {
    pointer.x >= bounds.min.x
        && pointer.x <= bounds.max.x
        && pointer.y >= bounds.min.y
        && pointer.y <= bounds.max.y
}

/// Keyboard shortcuts:
/// space toggles playback, `f` fullscreen, `m` mute, arrows skip.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyBindings {
    skip_seconds: f64,
}

impl KeyBindings {
    pub fn new(skip_seconds: f64) -> Self {
        Self { skip_seconds }
    }

    /// Find action for a key press
    pub fn action_for(&self, key: Key) -> Option<ControlAction> {
        match key {
            Key::Space => Some(ControlAction::TogglePlayPause),
            Key::F => Some(ControlAction::ToggleFullscreen),
            Key::M => Some(ControlAction::ToggleMute),
            Key::ArrowLeft => Some(ControlAction::SkipBackward(self.skip_seconds)),
            Key::ArrowRight => Some(ControlAction::SkipForward(self.skip_seconds)),
            _ => None,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new(2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn hit_test_includes_edges() {
        let bounds = Rect::from_min_max(pos2(10.0, 10.0), pos2(110.0, 60.0));

        assert!(is_within(pos2(10.0, 10.0), bounds));
        assert!(is_within(pos2(110.0, 60.0), bounds));
        assert!(is_within(pos2(50.0, 30.0), bounds));
        assert!(!is_within(pos2(9.9, 30.0), bounds));
        assert!(!is_within(pos2(50.0, 60.1), bounds));
    }

    #[test]
    fn hit_test_follows_resized_bounds() {
        let pointer = pos2(150.0, 30.0);
        let small = Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 100.0));
        let large = Rect::from_min_max(pos2(0.0, 0.0), pos2(200.0, 100.0));

        assert!(!is_within(pointer, small));
        assert!(is_within(pointer, large));
    }

    #[test]
    fn default_bindings() {
        let bindings = KeyBindings::default();

        assert_eq!(bindings.action_for(Key::Space), Some(ControlAction::TogglePlayPause));
        assert_eq!(bindings.action_for(Key::F), Some(ControlAction::ToggleFullscreen));
        assert_eq!(bindings.action_for(Key::M), Some(ControlAction::ToggleMute));
        assert_eq!(bindings.action_for(Key::ArrowLeft), Some(ControlAction::SkipBackward(2.0)));
        assert_eq!(bindings.action_for(Key::ArrowRight), Some(ControlAction::SkipForward(2.0)));
        assert_eq!(bindings.action_for(Key::Q), None);
    }
}
