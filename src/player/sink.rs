use crossbeam_channel::{unbounded, Receiver, Sender};
use egui::{Context, ViewportCommand};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{MediaElement, MediaEvent};
use crate::error::{PlayerError, Result};

/// Minimum position change between two `TimeUpdate` events
const TIME_UPDATE_INTERVAL: f64 = 0.25;

/// Last fullscreen state reported as an event, reconciled against what the
/// viewport says each frame (the platform may leave fullscreen on its own).
#[derive(Debug, Default)]
struct FullscreenTracker {
    reported: bool,
}

impl FullscreenTracker {
    /// Returns the new state when the viewport disagrees with the last report
    fn observe(&mut self, viewport: Option<bool>) -> Option<bool> {
        match viewport {
            Some(actual) if actual != self.reported => {
                self.reported = actual;
                Some(actual)
            }
            _ => None,
        }
    }
}

/// Media element backed by a rodio output sink.
/// rodio decodes the file; fullscreen goes to the egui viewport.
pub struct SinkElement {
    path: PathBuf,
    duration: f64,
    playing: bool,
    looping: bool,
    fullscreen: FullscreenTracker,
    last_reported: f64,

    // Audio
    _output_stream: OutputStream, // Keep alive
    _stream_handle: OutputStreamHandle,
    sink: Sink,

    ctx: Context,
    sender: Sender<MediaEvent>,
    receiver: Receiver<MediaEvent>,
}

fn open_source(path: &Path) -> Result<Decoder<BufReader<File>>> {
    let file = File::open(path).map_err(|source| PlayerError::OpenMedia {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Decoder::new(BufReader::new(file))?)
}

impl SinkElement {
    /// Open a media file and prepare for playback (starts paused)
    pub fn open(path: &Path, ctx: Context) -> Result<Self> {
        let source = open_source(path)?;
        let duration = source
            .total_duration()
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);

        let (output_stream, stream_handle) = OutputStream::try_default()?;
        let sink = Sink::try_new(&stream_handle)?;
        sink.append(source);
        sink.pause();

        let (sender, receiver) = unbounded();
        info!("Opened {:?} ({:.1}s)", path, duration);

        Ok(Self {
            path: path.to_path_buf(),
            duration,
            playing: false,
            looping: false,
            fullscreen: FullscreenTracker::default(),
            last_reported: 0.0,
            _output_stream: output_stream,
            _stream_handle: stream_handle,
            sink,
            ctx,
            sender,
            receiver,
        })
    }

    /// Restart from the beginning when the source runs out
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    fn emit(&self, event: MediaEvent) {
        let _ = self.sender.send(event);
    }

    /// Queue the file again after the previous source finished
    fn requeue(&mut self) -> Result<()> {
        let source = open_source(&self.path)?;
        self.sink.append(source);
        self.last_reported = 0.0;
        self.emit(MediaEvent::TimeUpdate(0.0));
        Ok(())
    }
}

impl MediaElement for SinkElement {
    fn play(&mut self) {
        if self.playing {
            return;
        }
        if self.sink.empty() {
            if let Err(e) = self.requeue() {
                warn!("Cannot restart {:?}: {}", self.path, e);
                return;
            }
        }
        self.sink.play();
        self.playing = true;
        self.emit(MediaEvent::Play);
    }

    fn pause(&mut self) {
        if self.playing {
            self.sink.pause();
            self.playing = false;
            self.emit(MediaEvent::Pause);
        }
    }

    fn current_time(&self) -> f64 {
        let position = self.sink.get_pos().as_secs_f64();
        if self.duration > 0.0 {
            position.min(self.duration)
        } else {
            position
        }
    }

    fn set_current_time(&mut self, seconds: f64) {
        // rodio reports no duration for many streams; only cap a known one
        let position = if self.duration > 0.0 {
            seconds.clamp(0.0, self.duration)
        } else {
            seconds.max(0.0)
        };
        if let Err(e) = self.sink.try_seek(Duration::from_secs_f64(position)) {
            warn!("Seek to {:.2}s failed: {}", position, e);
            return;
        }
        self.last_reported = position;
        self.emit(MediaEvent::TimeUpdate(position));
    }

    fn set_volume(&mut self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        self.sink.set_volume(volume);
        self.emit(MediaEvent::VolumeChange(volume));
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn set_playback_rate(&mut self, rate: f32) {
        self.sink.set_speed(rate);
        self.emit(MediaEvent::RateChange(rate));
    }

    fn request_fullscreen(&mut self, enter: bool) -> Result<()> {
        // The viewport reports fullscreen state only on platforms that support it
        let supported = self.ctx.input(|i| i.viewport().fullscreen.is_some());
        if !supported {
            return Err(PlayerError::FullscreenDenied);
        }

        // FullscreenChange follows once the viewport reports the switch
        self.ctx.send_viewport_cmd(ViewportCommand::Fullscreen(enter));
        Ok(())
    }

    fn subscribe(&mut self) -> Receiver<MediaEvent> {
        self.receiver.clone()
    }

    fn poll(&mut self) {
        let viewport = self.ctx.input(|i| i.viewport().fullscreen);
        if let Some(fullscreen) = self.fullscreen.observe(viewport) {
            debug!(fullscreen, "Viewport fullscreen changed");
            self.emit(MediaEvent::FullscreenChange(fullscreen));
        }

        if !self.playing {
            return;
        }

        // Check for end of stream
        if self.sink.empty() {
            if self.looping {
                debug!("Looping {:?}", self.path);
                if let Err(e) = self.requeue() {
                    warn!("Cannot loop {:?}: {}", self.path, e);
                    self.playing = false;
                    self.emit(MediaEvent::Pause);
                    self.emit(MediaEvent::Ended);
                }
            } else {
                self.sink.pause();
                self.playing = false;
                if self.duration > 0.0 {
                    self.last_reported = self.duration;
                }
                self.emit(MediaEvent::TimeUpdate(self.last_reported));
                self.emit(MediaEvent::Pause);
                self.emit(MediaEvent::Ended);
            }
            return;
        }

        let position = self.current_time();
        if (position - self.last_reported).abs() >= TIME_UPDATE_INTERVAL {
            self.last_reported = position;
            self.emit(MediaEvent::TimeUpdate(position));
        }
    }
}

impl Drop for SinkElement {
    fn drop(&mut self) {
        self.sink.stop();
    }
}
