// Run configuration
// Validated before the clock ever enters Starting; a bad gear ratio or
// period is fatal here, never inside the loop.

use crate::clock::gear::GearRatio;
use std::path::Path;
use std::time::Duration;

/// Configuration and startup errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("gear ratio must be positive: {pulse_steps} pulse steps per {increment_steps} increment steps")]
    InvalidGearRatio {
        pulse_steps: u32,
        increment_steps: u32,
    },

    #[error("tick period must be a positive number of seconds")]
    InvalidTickPeriod,

    #[error("stop ceiling must be a positive number of seconds")]
    InvalidStopAfter,

    #[error("feedback period must be > 0 pulses")]
    InvalidFeedbackPeriod,

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything a run recognizes. Serde-derived so a JSON file can override
/// the defaults wholesale.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Pulses per manual increment
    pub gear_ratio: GearRatio,

    /// Polling period of the tick loop, seconds
    pub tick_period_secs: f64,

    /// Stop ceiling measured from the first crank movement, seconds.
    /// `None` runs until interrupted.
    pub stop_after_secs: Option<f64>,

    /// Feedback device fires every this many pulses
    pub feedback_period: u64,

    /// Lead every pulse with a MIDI realtime clock message
    pub send_clock: bool,

    /// CC controller number the encoder sends relative deltas on
    pub encoder_cc: u8,

    /// MIDI output port name; `None` takes the first available port
    pub output_port: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            gear_ratio: GearRatio::default(),
            tick_period_secs: 0.001,
            stop_after_secs: Some(600.0),
            feedback_period: 24,
            send_clock: false,
            encoder_cc: 1,
            output_port: None,
        }
    }
}

impl RunConfig {
    /// Check every invariant; called at startup and after deserialization
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gear_ratio.validate()?;

        if !(self.tick_period_secs > 0.0) || !self.tick_period_secs.is_finite() {
            return Err(ConfigError::InvalidTickPeriod);
        }

        if let Some(stop_after) = self.stop_after_secs {
            if !(stop_after > 0.0) || !stop_after.is_finite() {
                return Err(ConfigError::InvalidStopAfter);
            }
        }

        if self.feedback_period == 0 {
            return Err(ConfigError::InvalidFeedbackPeriod);
        }

        Ok(())
    }

    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(self.tick_period_secs)
    }

    pub fn stop_after(&self) -> Option<Duration> {
        self.stop_after_secs.map(Duration::from_secs_f64)
    }
}
