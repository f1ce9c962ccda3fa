use egui::{Pos2, Rect};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::OverlayConfig;
use crate::controller::{ControlAction, PlaybackController};
use crate::error::Result;
use crate::input::{is_within, InputEvent, KeyBindings};
use crate::player::MediaElement;
use crate::visibility::VisibilityTimer;

/// A click on the surface waits this long for a second click
/// before it toggles playback
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(300);

/// One player instance: playback controller, idle timer and pointer
/// tracking. Drive it with [`handle_input`](Self::handle_input) and
/// [`tick`](Self::tick) once per frame.
pub struct OverlayPlayer<M: MediaElement> {
    controller: PlaybackController<M>,
    visibility: VisibilityTimer,
    bindings: KeyBindings,
    pointer: Option<Pos2>,
    bounds: Option<Rect>,
    pending_click: Option<Instant>,
    config: OverlayConfig,
}

impl<M: MediaElement> OverlayPlayer<M> {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            controller: PlaybackController::new(config.initial_volume),
            visibility: VisibilityTimer::new(config.hide_delay()),
            bindings: KeyBindings::new(config.key_skip_seconds),
            pointer: None,
            bounds: None,
            pending_click: None,
            config,
        }
    }

    /// Attach a media element
    pub fn attach(&mut self, element: M) {
        self.controller.attach(element);
    }

    /// Stop the idle timer and release the element
    pub fn detach(&mut self) -> Option<M> {
        self.visibility.cancel();
        self.pending_click = None;
        self.controller.detach()
    }

    /// Current on-screen rectangle of the player
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = Some(bounds);
    }

    /// Feed one input event
    pub fn handle_input(&mut self, event: InputEvent, now: Instant) -> Result<()> {
        match event {
            InputEvent::PointerMoved(pos) => {
                self.pointer = Some(pos);
                if self.is_pointer_inside() {
                    self.visibility.show(now);
                }
                Ok(())
            }
            InputEvent::PointerLeft => {
                self.pointer = None;
                Ok(())
            }
            InputEvent::KeyPressed(key) => match self.bindings.action_for(key) {
                Some(action) => {
                    debug!(?key, ?action, "Shortcut");
                    self.apply(action, now)
                }
                None => Ok(()),
            },
        }
    }

    /// Apply a control action; any interaction also shows the controls
    pub fn apply(&mut self, action: ControlAction, now: Instant) -> Result<()> {
        self.visibility.show(now);
        self.controller.apply(action)
    }

    /// Single click on the video surface. Playback toggles once the
    /// double-click window has passed without a second click.
    pub fn surface_clicked(&mut self, now: Instant) {
        self.visibility.show(now);
        self.pending_click = Some(now);
    }

    /// Double click on the video surface: fullscreen, and the pending
    /// single click is dropped so playback stays as it was
    pub fn surface_double_clicked(&mut self, now: Instant) -> Result<()> {
        self.pending_click = None;
        self.apply(ControlAction::ToggleFullscreen, now)
    }

    /// Time left before a pending surface click takes effect
    pub fn pending_click_remaining(&self, now: Instant) -> Option<Duration> {
        self.pending_click
            .map(|at| (at + DOUBLE_CLICK_WINDOW).saturating_duration_since(now))
    }

    /// Advance the element, apply its events and expire the idle timer.
    /// Returns whether the controls should be drawn.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(at) = self.pending_click {
            if now.saturating_duration_since(at) >= DOUBLE_CLICK_WINDOW {
                self.pending_click = None;
                self.controller.toggle_play_pause();
            }
        }
        self.controller.poll();
        let hold = !self.controller.is_playing() || self.is_pointer_inside();
        self.visibility.tick(now, hold);
        self.controls_visible()
    }

    /// Effective visibility: shown by activity, while paused, or while
    /// the pointer is over the player
    pub fn controls_visible(&self) -> bool {
        self.visibility.is_visible() || !self.controller.is_playing() || self.is_pointer_inside()
    }

    /// Pointer hit-test against the current bounds
    pub fn is_pointer_inside(&self) -> bool {
        match (self.pointer, self.bounds) {
            (Some(pointer), Some(bounds)) => is_within(pointer, bounds),
            _ => false,
        }
    }

    pub fn controller(&self) -> &PlaybackController<M> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PlaybackController<M> {
        &mut self.controller
    }

    pub fn visibility(&self) -> &VisibilityTimer {
        &self.visibility
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }
}
