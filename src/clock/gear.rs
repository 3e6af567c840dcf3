// Gear ratio - fixed conversion between crank increments and clock pulses

use crate::config::ConfigError;
use std::fmt;

/// Pulses emitted per manual increment, as a positive rational.
///
/// Fixed for the lifetime of a run. Example: a clock resolution of 24 steps
/// per quarter note over a 4-quarter crank revolution with a 20-detent
/// encoder gives 96:20 = 4.8 pulses per increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GearRatio {
    pulse_steps: u32,
    increment_steps: u32,
}

impl GearRatio {
    /// Creates a gear ratio of `pulse_steps` pulses per `increment_steps`
    /// manual increments. Rejects zero on either side.
    pub fn new(pulse_steps: u32, increment_steps: u32) -> Result<Self, ConfigError> {
        let ratio = Self {
            pulse_steps,
            increment_steps,
        };
        ratio.validate()?;
        Ok(ratio)
    }

    /// Re-check the invariant (needed after deserialization, which bypasses
    /// the constructor)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pulse_steps == 0 || self.increment_steps == 0 {
            return Err(ConfigError::InvalidGearRatio {
                pulse_steps: self.pulse_steps,
                increment_steps: self.increment_steps,
            });
        }
        Ok(())
    }

    /// Pulses emitted per one manual increment (always > 0)
    pub fn pulses_per_increment(&self) -> f64 {
        self.pulse_steps as f64 / self.increment_steps as f64
    }

    pub fn pulse_steps(&self) -> u32 {
        self.pulse_steps
    }

    pub fn increment_steps(&self) -> u32 {
        self.increment_steps
    }
}

impl Default for GearRatio {
    /// 24 clock steps per quarter, 4 quarters per crank revolution, 20
    /// encoder detents per revolution
    fn default() -> Self {
        Self {
            pulse_steps: 96,
            increment_steps: 20,
        }
    }
}

impl fmt::Display for GearRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.pulse_steps, self.increment_steps)
    }
}
