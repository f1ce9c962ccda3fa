//! Media elements the overlay drives.
//!
//! An element owns decode and output; the overlay only commands it and
//! listens to the events it emits. Events travel over a channel so the
//! controller applies them in the order the element produced them.

mod clock;
mod scripted;
mod sink;

use crossbeam_channel::Receiver;

use crate::error::Result;

pub use clock::PlaybackClock;
pub use scripted::{ScriptedElement, ScriptedHandle};
pub use sink::SinkElement;

/// Events emitted by a media element
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MediaEvent {
    /// Playback started
    Play,
    /// Playback paused
    Pause,
    /// Current position changed (seconds)
    TimeUpdate(f64),
    /// Element volume changed (0.0 to 1.0)
    VolumeChange(f32),
    /// Media duration became known or changed (seconds)
    DurationChange(f64),
    /// Playback rate changed
    RateChange(f32),
    /// Fullscreen entered or left
    FullscreenChange(bool),
    /// Playback reached the end and stopped
    Ended,
}

/// The imperative surface of a playback element.
///
/// Commands are requests: the element reports what actually happened
/// through the events returned by [`MediaElement::subscribe`].
pub trait MediaElement {
    /// Request playback to start
    fn play(&mut self);

    /// Request playback to pause
    fn pause(&mut self);

    /// Current playback position in seconds
    fn current_time(&self) -> f64;

    /// Move the playback position (seconds)
    fn set_current_time(&mut self, seconds: f64);

    /// Set volume (0.0 to 1.0), reported back as `VolumeChange`
    fn set_volume(&mut self, volume: f32);

    /// Media duration in seconds, 0 while unknown
    fn duration(&self) -> f64;

    /// Set playback speed multiplier
    fn set_playback_rate(&mut self, rate: f32);

    /// Enter or leave fullscreen
    fn request_fullscreen(&mut self, enter: bool) -> Result<()>;

    /// Receiver for the element's events
    fn subscribe(&mut self) -> Receiver<MediaEvent>;

    /// Advance internal bookkeeping (call each frame)
    fn poll(&mut self) {}
}

impl<M: MediaElement + ?Sized> MediaElement for Box<M> {
    fn play(&mut self) {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause()
    }

    fn current_time(&self) -> f64 {
        (**self).current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        (**self).set_current_time(seconds)
    }

    fn set_volume(&mut self, volume: f32) {
        (**self).set_volume(volume)
    }

    fn duration(&self) -> f64 {
        (**self).duration()
    }

    fn set_playback_rate(&mut self, rate: f32) {
        (**self).set_playback_rate(rate)
    }

    fn request_fullscreen(&mut self, enter: bool) -> Result<()> {
        (**self).request_fullscreen(enter)
    }

    fn subscribe(&mut self) -> Receiver<MediaEvent> {
        (**self).subscribe()
    }

    fn poll(&mut self) {
        (**self).poll()
    }
}
