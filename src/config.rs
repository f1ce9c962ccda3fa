//! Overlay configuration
//!
//! Every field has a default, so a config file only needs to name the
//! values it overrides:
//!
//! ```json
//! { "hide_delay_ms": 5000, "button_skip_seconds": 15.0 }
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Speeds offered by the playback speed menu
pub const DEFAULT_PLAYBACK_RATES: [f32; 8] = [0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0];

/// Tunables for the controller, the idle timer and the controls bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Idle time before the controls hide
    pub hide_delay_ms: u64,
    /// Seconds skipped by the -10s / +10s buttons
    pub button_skip_seconds: f64,
    /// Seconds skipped by the arrow keys
    pub key_skip_seconds: f64,
    /// Volume (0-100) applied when media is attached
    pub initial_volume: f64,
    /// Entries of the playback speed menu
    pub playback_rates: Vec<f32>,
    /// Restart from the beginning when playback reaches the end
    pub loop_playback: bool,
    /// Controls fade duration in seconds
    pub fade_seconds: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            hide_delay_ms: 3000,
            button_skip_seconds: 10.0,
            key_skip_seconds: 2.0,
            initial_volume: 50.0,
            playback_rates: DEFAULT_PLAYBACK_RATES.to_vec(),
            loop_playback: true,
            fade_seconds: 0.4,
        }
    }
}

impl OverlayConfig {
    /// Load a config from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        info!("Loaded overlay config from {:?}", path);
        Ok(config.sanitized())
    }

    /// Idle interval as a `Duration`
    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }

    /// Clamp out-of-range values instead of rejecting the file.
    pub fn sanitized(mut self) -> Self {
        self.initial_volume = self.initial_volume.clamp(0.0, 100.0);
        self.button_skip_seconds = self.button_skip_seconds.max(0.0);
        self.key_skip_seconds = self.key_skip_seconds.max(0.0);
        self.fade_seconds = self.fade_seconds.max(0.0);
        self.playback_rates.retain(|rate| rate.is_finite() && *rate > 0.0);
        if self.playback_rates.is_empty() {
            self.playback_rates = DEFAULT_PLAYBACK_RATES.to_vec();
        }
        self
    }
}
