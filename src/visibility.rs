use std::time::{Duration, Instant};
use tracing::trace;

/// Default idle interval before the controls hide
pub const DEFAULT_HIDE_DELAY: Duration = Duration::from_secs(3);

/// Debounced idle timer for the controls bar.
///
/// Every [`show`](Self::show) restarts the countdown. When it runs out the
/// controls hide, unless the caller holds them (paused playback, pointer
/// over the player), in which case the countdown starts over.
#[derive(Debug, Clone)]
pub struct VisibilityTimer {
    delay: Duration,
    visible: bool,
    deadline: Option<Instant>,
}

impl VisibilityTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            visible: false,
            deadline: None,
        }
    }

    /// Show the controls and restart the idle countdown
    pub fn show(&mut self, now: Instant) {
        self.visible = true;
        self.deadline = Some(now + self.delay);
    }

    /// Expire the countdown if due, returns whether the controls are visible
    pub fn tick(&mut self, now: Instant, hold: bool) -> bool {
        if let Some(deadline) = self.deadline {
            if now >= deadline {
                if hold {
                    self.deadline = Some(now + self.delay);
                } else {
                    trace!("Hiding controls after idle");
                    self.visible = false;
                    self.deadline = None;
                }
            }
        }
        self.visible
    }

    /// Drop the pending hide without changing visibility
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left before the pending hide, if any
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

impl Default for VisibilityTimer {
    fn default() -> Self {
        Self::new(DEFAULT_HIDE_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn starts_hidden() {
        let timer = VisibilityTimer::default();
        assert!(!timer.is_visible());
        assert!(!timer.is_pending());
    }

    #[test]
    fn hides_after_delay() {
        let start = Instant::now();
        let mut timer = VisibilityTimer::default();

        timer.show(start);
        assert!(timer.tick(start + 2 * SECOND, false));
        assert!(!timer.tick(start + 3 * SECOND, false));
        assert!(!timer.is_pending());
    }

    #[test]
    fn repeated_show_restarts_countdown() {
        let start = Instant::now();
        let mut timer = VisibilityTimer::default();

        timer.show(start);
        assert!(timer.tick(start + 2 * SECOND, false));
        timer.show(start + 2 * SECOND);

        assert!(timer.tick(start + 4 * SECOND, false));
        assert!(!timer.tick(start + 5 * SECOND, false));
    }

    #[test]
    fn hold_keeps_controls_and_rearms() {
        let start = Instant::now();
        let mut timer = VisibilityTimer::default();

        timer.show(start);
        assert!(timer.tick(start + 3 * SECOND, true));
        assert_eq!(timer.remaining(start + 3 * SECOND), Some(3 * SECOND));

        assert!(timer.tick(start + 5 * SECOND, false));
        assert!(!timer.tick(start + 6 * SECOND, false));
    }

    #[test]
    fn cancel_keeps_current_visibility() {
        let start = Instant::now();
        let mut timer = VisibilityTimer::default();

        timer.show(start);
        timer.cancel();

        assert!(timer.tick(start + 10 * SECOND, false));
        assert!(!timer.is_pending());
    }
}
