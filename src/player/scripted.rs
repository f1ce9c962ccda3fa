use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use super::clock::PlaybackClock;
use super::{MediaElement, MediaEvent};
use crate::error::{PlayerError, Result};

struct ScriptedState {
    duration: f64,
    volume: f32,
    fullscreen: bool,
    fullscreen_supported: bool,
    play_allowed: bool,
    looping: bool,
}

/// Shared pieces of a scripted element
#[derive(Clone)]
struct Shared {
    clock: PlaybackClock,
    state: Arc<Mutex<ScriptedState>>,
    sender: Sender<MediaEvent>,
}

impl Shared {
    fn emit(&self, event: MediaEvent) {
        // Receiver lives as long as the element, so this only fails after teardown
        let _ = self.sender.send(event);
    }

    fn step(&self, elapsed: Duration) {
        if !self.clock.is_running() {
            return;
        }

        let position = self.clock.advance(elapsed);
        let (duration, looping) = {
            let state = self.state.lock();
            (state.duration, state.looping)
        };

        if duration > 0.0 && position >= duration {
            if looping {
                self.clock.set_position(0.0);
                self.emit(MediaEvent::TimeUpdate(0.0));
            } else {
                self.clock.set_position(duration);
                self.clock.stop();
                self.emit(MediaEvent::TimeUpdate(duration));
                self.emit(MediaEvent::Pause);
                self.emit(MediaEvent::Ended);
            }
        } else {
            self.emit(MediaEvent::TimeUpdate(position));
        }
    }
}

/// Media element without decode or output: a clock that advances when
/// told to. Runs the overlay headless and stands in for demo clips.
pub struct ScriptedElement {
    shared: Shared,
    receiver: Receiver<MediaEvent>,
    last_poll: Option<Instant>,
}

/// Driver side of a [`ScriptedElement`], kept by whoever scripts it
/// after the element itself has been handed to a controller.
#[derive(Clone)]
pub struct ScriptedHandle {
    shared: Shared,
}

impl ScriptedElement {
    /// Create a paused element for a clip of `duration` seconds
    pub fn new(duration: f64) -> Self {
        let (sender, receiver) = unbounded();
        let state = ScriptedState {
            duration: duration.max(0.0),
            volume: 1.0,
            fullscreen: false,
            fullscreen_supported: true,
            play_allowed: true,
            looping: false,
        };

        Self {
            shared: Shared {
                clock: PlaybackClock::new(),
                state: Arc::new(Mutex::new(state)),
                sender,
            },
            receiver,
            last_poll: None,
        }
    }

    /// Restart from zero instead of stopping at the end
    pub fn with_looping(self, looping: bool) -> Self {
        self.shared.state.lock().looping = looping;
        self
    }

    /// Get a driver handle
    pub fn handle(&self) -> ScriptedHandle {
        ScriptedHandle {
            shared: self.shared.clone(),
        }
    }

    /// Advance playback by `elapsed` wall time
    pub fn advance(&mut self, elapsed: Duration) {
        self.shared.step(elapsed);
    }
}

impl MediaElement for ScriptedElement {
    fn play(&mut self) {
        let (allowed, duration) = {
            let state = self.shared.state.lock();
            (state.play_allowed, state.duration)
        };

        if !allowed {
            warn!("Scripted element refused to start playback");
            return;
        }
        if self.shared.clock.is_running() {
            return;
        }
        if duration > 0.0 && self.shared.clock.position() >= duration {
            self.shared.clock.set_position(0.0);
            self.shared.emit(MediaEvent::TimeUpdate(0.0));
        }

        self.shared.clock.start();
        self.last_poll = None;
        self.shared.emit(MediaEvent::Play);
    }

    fn pause(&mut self) {
        if self.shared.clock.is_running() {
            self.shared.clock.stop();
            self.shared.emit(MediaEvent::Pause);
        }
    }

    fn current_time(&self) -> f64 {
        self.shared.clock.position()
    }

    fn set_current_time(&mut self, seconds: f64) {
        let duration = self.shared.state.lock().duration;
        // An unknown (zero) duration puts no upper bound on the position
        let position = if duration > 0.0 {
            seconds.clamp(0.0, duration)
        } else {
            seconds.max(0.0)
        };
        self.shared.clock.set_position(position);
        self.shared.emit(MediaEvent::TimeUpdate(position));
    }

    fn set_volume(&mut self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        self.shared.state.lock().volume = volume;
        self.shared.emit(MediaEvent::VolumeChange(volume));
    }

    fn duration(&self) -> f64 {
        self.shared.state.lock().duration
    }

    fn set_playback_rate(&mut self, rate: f32) {
        self.shared.clock.set_rate(rate);
        self.shared.emit(MediaEvent::RateChange(rate));
    }

    fn request_fullscreen(&mut self, enter: bool) -> Result<()> {
        let mut state = self.shared.state.lock();
        if !state.fullscreen_supported {
            return Err(PlayerError::FullscreenDenied);
        }
        if state.fullscreen != enter {
            state.fullscreen = enter;
            drop(state);
            self.shared.emit(MediaEvent::FullscreenChange(enter));
        }
        Ok(())
    }

    fn subscribe(&mut self) -> Receiver<MediaEvent> {
        self.receiver.clone()
    }

    fn poll(&mut self) {
        let now = Instant::now();
        if let Some(last) = self.last_poll {
            self.shared.step(now.duration_since(last));
        }
        self.last_poll = Some(now);
    }
}

impl ScriptedHandle {
    /// Advance playback by `elapsed` wall time
    pub fn advance(&self, elapsed: Duration) {
        self.shared.step(elapsed);
    }

    /// Position as the element sees it
    pub fn current_time(&self) -> f64 {
        self.shared.clock.position()
    }

    /// Whether the element is actually playing
    pub fn is_running(&self) -> bool {
        self.shared.clock.is_running()
    }

    pub fn volume(&self) -> f32 {
        self.shared.state.lock().volume
    }

    pub fn playback_rate(&self) -> f32 {
        self.shared.clock.rate()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.shared.state.lock().fullscreen
    }

    /// Refuse future `play` requests, like an autoplay policy would
    pub fn set_play_allowed(&self, allowed: bool) {
        self.shared.state.lock().play_allowed = allowed;
    }

    pub fn set_fullscreen_supported(&self, supported: bool) {
        self.shared.state.lock().fullscreen_supported = supported;
    }

    /// Change the duration, as a stream revealing its length would
    pub fn set_duration(&self, duration: f64) {
        let duration = duration.max(0.0);
        self.shared.state.lock().duration = duration;
        debug!(duration, "Scripted element duration changed");
        self.shared.emit(MediaEvent::DurationChange(duration));
    }

    /// Volume changed from outside the controller (0.0 to 1.0)
    pub fn external_volume(&self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        self.shared.state.lock().volume = volume;
        self.shared.emit(MediaEvent::VolumeChange(volume));
    }

    /// Fullscreen entered or left by the platform, as Esc would
    pub fn external_fullscreen(&self, fullscreen: bool) {
        let mut state = self.shared.state.lock();
        if state.fullscreen != fullscreen {
            state.fullscreen = fullscreen;
            drop(state);
            self.shared.emit(MediaEvent::FullscreenChange(fullscreen));
        }
    }

    /// Pause from outside the controller, as a platform media key would
    pub fn external_pause(&self) {
        if self.shared.clock.is_running() {
            self.shared.clock.stop();
            self.shared.emit(MediaEvent::Pause);
        }
    }
}
