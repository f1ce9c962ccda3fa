use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Wall-clock driven playback position.
/// Advances only while running, scaled by the playback rate.
#[derive(Clone)]
pub struct PlaybackClock {
    /// Current playback position in seconds, stored as f64 bits
    position_bits: Arc<AtomicU64>,
    /// Whether the clock is advancing
    running: Arc<AtomicBool>,
    /// Playback rate stored as f32 bits
    rate_bits: Arc<AtomicU32>,
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self {
            position_bits: Arc::new(AtomicU64::new(0f64.to_bits())),
            running: Arc::new(AtomicBool::new(false)),
            rate_bits: Arc::new(AtomicU32::new(1.0f32.to_bits())),
        }
    }

    /// Get current playback position in seconds
    pub fn position(&self) -> f64 {
        f64::from_bits(self.position_bits.load(Ordering::Relaxed))
    }

    /// Set playback position in seconds (negative values land on zero)
    pub fn set_position(&self, seconds: f64) {
        self.position_bits
            .store(seconds.max(0.0).to_bits(), Ordering::Relaxed);
    }

    /// Advance by elapsed wall time, returns the new position in seconds
    pub fn advance(&self, elapsed: Duration) -> f64 {
        if self.running.load(Ordering::Relaxed) {
            let delta = elapsed.as_secs_f64() * self.rate() as f64;
            let _ = self
                .position_bits
                .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |bits| {
                    Some((f64::from_bits(bits) + delta).to_bits())
                });
        }
        self.position()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub fn start(&self) {
        self.running.store(true, Ordering::Relaxed);
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    pub fn rate(&self) -> f32 {
        f32::from_bits(self.rate_bits.load(Ordering::Relaxed))
    }

    pub fn set_rate(&self, rate: f32) {
        self.rate_bits.store(rate.to_bits(), Ordering::Relaxed);
    }
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new()
    }
}
