//! Playback controller
//!
//! Mirrors the state of a [`MediaElement`] for the UI and turns user
//! intents into element commands. The element stays authoritative: the
//! playing flag, position and rate only change when the element reports
//! them through its events, which [`PlaybackController::pump_events`]
//! applies in delivery order.

use crossbeam_channel::Receiver;
use std::collections::VecDeque;
use tracing::{debug, trace, warn};

use crate::error::{PlayerError, Result};
use crate::format::format_time;
use crate::player::{MediaElement, MediaEvent};

/// Slowest accepted playback rate
pub const MIN_PLAYBACK_RATE: f32 = 0.25;
/// Fastest accepted playback rate
pub const MAX_PLAYBACK_RATE: f32 = 4.0;

/// Unechoed volume commands kept before the oldest is forgotten
const MAX_PENDING_VOLUMES: usize = 32;

/// Playing/paused as reported by the element
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackStatus {
    Playing,
    Paused,
}

/// UI-observable playback state
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackState {
    pub status: PlaybackStatus,
    /// Seconds, within `[0, duration]`
    pub current_time: f64,
    /// 0 to 100
    pub volume: f64,
    /// Last non-muted volume, restored by unmute
    pub volume_before_mute: f64,
    /// Seconds, 0 while unknown
    pub duration: f64,
    pub playback_rate: f32,
    pub fullscreen: bool,
}

impl PlaybackState {
    fn new(volume: f64) -> Self {
        let volume = volume.clamp(0.0, 100.0);
        Self {
            status: PlaybackStatus::Paused,
            current_time: 0.0,
            volume,
            volume_before_mute: if volume > 0.0 { volume } else { 100.0 },
            duration: 0.0,
            playback_rate: 1.0,
            fullscreen: false,
        }
    }
}

/// User intents, produced by the controls bar and keyboard shortcuts
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlAction {
    TogglePlayPause,
    Play,
    Pause,
    /// Seek to a position on the 0-100 scale
    Seek(f64),
    SkipForward(f64),
    SkipBackward(f64),
    /// Set volume on the 0-100 scale
    SetVolume(f64),
    ToggleMute,
    ToggleFullscreen,
    SetPlaybackRate(f32),
}

/// One-shot notices for the presentation layer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerSignal {
    FullscreenDenied,
}

/// Mediates between a media element and the overlay UI
pub struct PlaybackController<M: MediaElement> {
    element: Option<M>,
    events: Option<Receiver<MediaEvent>>,
    /// Element volumes commanded but not yet echoed back, oldest first
    pending_volumes: VecDeque<f32>,
    state: PlaybackState,
    signals: VecDeque<ControllerSignal>,
}

impl<M: MediaElement> PlaybackController<M> {
    /// Create a controller with no element attached
    pub fn new(initial_volume: f64) -> Self {
        Self {
            element: None,
            events: None,
            pending_volumes: VecDeque::new(),
            state: PlaybackState::new(initial_volume),
            signals: VecDeque::new(),
        }
    }

    /// Take control of an element and start listening to its events.
    /// The controller's volume is pushed to the element.
    pub fn attach(&mut self, mut element: M) {
        self.events = Some(element.subscribe());
        self.state.status = PlaybackStatus::Paused;
        self.state.duration = element.duration().max(0.0);
        self.state.current_time = clamp_time(element.current_time(), self.state.duration);
        self.state.fullscreen = false;
        self.pending_volumes.clear();
        self.element = Some(element);
        self.command_volume(self.state.volume);
        debug!(duration = self.state.duration, "Media element attached");
    }

    /// Release the element; events still queued are discarded
    pub fn detach(&mut self) -> Option<M> {
        self.events = None;
        self.pending_volumes.clear();
        self.state.status = PlaybackStatus::Paused;
        self.state.current_time = 0.0;
        self.state.duration = 0.0;
        self.state.fullscreen = false;
        let element = self.element.take();
        if element.is_some() {
            debug!("Media element detached");
        }
        element
    }

    pub fn is_attached(&self) -> bool {
        self.element.is_some()
    }

    /// Let the element advance, then apply everything it reported
    pub fn poll(&mut self) {
        if let Some(element) = self.element.as_mut() {
            element.poll();
        }
        self.pump_events();
    }

    /// Apply queued element events in order, returns how many were applied
    pub fn pump_events(&mut self) -> usize {
        let Some(events) = self.events.clone() else {
            return 0;
        };

        let mut applied = 0;
        for event in events.try_iter() {
            self.handle_event(event);
            applied += 1;
        }
        applied
    }

    /// Apply a single element event
    pub fn handle_event(&mut self, event: MediaEvent) {
        trace!(?event, "Media event");
        match event {
            MediaEvent::Play => self.state.status = PlaybackStatus::Playing,
            MediaEvent::Pause | MediaEvent::Ended => self.state.status = PlaybackStatus::Paused,
            MediaEvent::TimeUpdate(seconds) => {
                self.state.current_time = clamp_time(seconds, self.state.duration);
            }
            MediaEvent::VolumeChange(volume) => {
                // Echoes of our own commands arrive in command order
                if let Some(index) = self.pending_volumes.iter().position(|v| *v == volume) {
                    self.pending_volumes.drain(..=index);
                    return;
                }
                let level = (volume as f64 * 100.0).clamp(0.0, 100.0);
                self.state.volume = level;
                if level > 0.0 {
                    self.state.volume_before_mute = level;
                }
            }
            MediaEvent::DurationChange(seconds) => {
                self.state.duration = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
                self.state.current_time = clamp_time(self.state.current_time, self.state.duration);
            }
            MediaEvent::RateChange(rate) => self.state.playback_rate = rate,
            MediaEvent::FullscreenChange(fullscreen) => self.state.fullscreen = fullscreen,
        }
    }

    /// Request playback to start
    pub fn play(&mut self) {
        let Some(element) = self.element.as_mut() else {
            trace!("play ignored, no media element");
            return;
        };
        debug!("Playing");
        element.play();
    }

    /// Request playback to pause
    pub fn pause(&mut self) {
        let Some(element) = self.element.as_mut() else {
            trace!("pause ignored, no media element");
            return;
        };
        debug!("Pausing");
        element.pause();
    }

    /// Pause when the element last reported playing, play otherwise
    pub fn toggle_play_pause(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Seek to a position on the 0-100 scale
    pub fn seek(&mut self, percentage: f64) {
        let Some(element) = self.element.as_mut() else {
            trace!("seek ignored, no media element");
            return;
        };
        let duration = element.duration();
        if !percentage.is_finite() || duration <= 0.0 {
            trace!("seek ignored, duration unknown");
            return;
        }
        let time = percentage.clamp(0.0, 100.0) / 100.0 * duration;
        debug!("Seeking to {:.2}s", time);
        element.set_current_time(time);
    }

    /// Move forward by `seconds`, stopping at the end
    pub fn skip_forward(&mut self, seconds: f64) {
        self.skip_by(seconds);
    }

    /// Move backward by `seconds`, stopping at the start
    pub fn skip_backward(&mut self, seconds: f64) {
        self.skip_by(-seconds);
    }

    fn skip_by(&mut self, delta: f64) {
        let Some(element) = self.element.as_mut() else {
            trace!("skip ignored, no media element");
            return;
        };
        if !delta.is_finite() {
            return;
        }
        let target = clamp_time(element.current_time() + delta, element.duration());
        debug!("Skipping {:+.1}s to {:.2}s", delta, target);
        element.set_current_time(target);
    }

    /// Set volume on the 0-100 scale
    pub fn set_volume(&mut self, volume: f64) {
        if self.element.is_none() {
            trace!("set_volume ignored, no media element");
            return;
        }
        if !volume.is_finite() {
            return;
        }
        let volume = volume.clamp(0.0, 100.0);
        self.state.volume = volume;
        if volume > 0.0 {
            self.state.volume_before_mute = volume;
        }
        self.command_volume(volume);
    }

    /// Send a 0-100 level to the element and remember it to recognise the echo
    fn command_volume(&mut self, volume: f64) {
        if let Some(element) = self.element.as_mut() {
            let element_volume = (volume / 100.0).clamp(0.0, 1.0) as f32;
            if self.pending_volumes.len() >= MAX_PENDING_VOLUMES {
                self.pending_volumes.pop_front();
            }
            self.pending_volumes.push_back(element_volume);
            element.set_volume(element_volume);
        }
    }

    /// Mute, or restore the volume from before muting
    pub fn toggle_mute(&mut self) {
        if self.element.is_none() {
            trace!("toggle_mute ignored, no media element");
            return;
        }

        if self.state.volume > 0.0 {
            debug!("Muting");
            let before = self.state.volume;
            self.set_volume(0.0);
            self.state.volume_before_mute = before;
        } else {
            debug!("Unmuting");
            self.set_volume(self.state.volume_before_mute);
        }
    }

    /// Enter or leave fullscreen.
    /// A refusal is also queued as [`ControllerSignal::FullscreenDenied`].
    pub fn toggle_fullscreen(&mut self) -> Result<()> {
        let Some(element) = self.element.as_mut() else {
            trace!("toggle_fullscreen ignored, no media element");
            return Ok(());
        };

        let enter = !self.state.fullscreen;
        match element.request_fullscreen(enter) {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!("Fullscreen request failed: {}", e);
                if matches!(e, PlayerError::FullscreenDenied) {
                    self.signals.push_back(ControllerSignal::FullscreenDenied);
                }
                Err(e)
            }
        }
    }

    /// Change playback speed, clamped to the supported range
    pub fn set_playback_rate(&mut self, rate: f32) {
        let Some(element) = self.element.as_mut() else {
            trace!("set_playback_rate ignored, no media element");
            return;
        };
        if !rate.is_finite() {
            return;
        }
        let rate = rate.clamp(MIN_PLAYBACK_RATE, MAX_PLAYBACK_RATE);
        debug!("Playback rate {}x", rate);
        element.set_playback_rate(rate);
    }

    /// Dispatch a control action
    pub fn apply(&mut self, action: ControlAction) -> Result<()> {
        match action {
            ControlAction::TogglePlayPause => self.toggle_play_pause(),
            ControlAction::Play => self.play(),
            ControlAction::Pause => self.pause(),
            ControlAction::Seek(percentage) => self.seek(percentage),
            ControlAction::SkipForward(seconds) => self.skip_forward(seconds),
            ControlAction::SkipBackward(seconds) => self.skip_backward(seconds),
            ControlAction::SetVolume(volume) => self.set_volume(volume),
            ControlAction::ToggleMute => self.toggle_mute(),
            ControlAction::ToggleFullscreen => return self.toggle_fullscreen(),
            ControlAction::SetPlaybackRate(rate) => self.set_playback_rate(rate),
        }
        Ok(())
    }

    /// Next pending notice for the presentation layer
    pub fn take_signal(&mut self) -> Option<ControllerSignal> {
        self.signals.pop_front()
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.status == PlaybackStatus::Playing
    }

    pub fn current_time(&self) -> f64 {
        self.state.current_time
    }

    pub fn duration(&self) -> f64 {
        self.state.duration
    }

    pub fn volume(&self) -> f64 {
        self.state.volume
    }

    pub fn is_muted(&self) -> bool {
        self.state.volume <= 0.0
    }

    pub fn playback_rate(&self) -> f32 {
        self.state.playback_rate
    }

    pub fn is_fullscreen(&self) -> bool {
        self.state.fullscreen
    }

    /// Position on the 0-100 seek bar scale
    pub fn seek_percentage(&self) -> f64 {
        if self.state.duration > 0.0 {
            (100.0 * self.state.current_time / self.state.duration).clamp(0.0, 100.0)
        } else {
            0.0
        }
    }

    pub fn formatted_current_time(&self) -> String {
        format_time(self.state.current_time)
    }

    pub fn formatted_duration(&self) -> String {
        format_time(self.state.duration)
    }
}

impl<M: MediaElement> Default for PlaybackController<M> {
    fn default() -> Self {
        Self::new(50.0)
    }
}

fn clamp_time(seconds: f64, duration: f64) -> f64 {
    if !seconds.is_finite() {
        return 0.0;
    }
    if duration > 0.0 {
        seconds.clamp(0.0, duration)
    } else {
        seconds.max(0.0)
    }
}
