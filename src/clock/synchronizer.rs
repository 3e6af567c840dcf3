// Clock synchronizer - the dual-timebase core
// Converts the irregular intervals between manual crank increments into a
// steady subdivided pulse stream that stays phase-locked to the crank.

use crate::clock::gear::GearRatio;
use std::time::{Duration, Instant};

/// Seed rate used between the first crank movement and the first measured
/// interval. Overwritten by the first real interval; only shapes the
/// pre-roll pacing.
const INITIAL_SECS_PER_PULSE: f64 = 0.5;

/// A detected change in manual input position.
///
/// Only nonzero-magnitude ticks are ever constructed. The sign of
/// `magnitude` never affects timing.
#[derive(Debug, Clone, Copy)]
pub struct ManualTick {
    /// When the change was observed (monotonic)
    pub at: Instant,
    /// Signed position delta since the previous sample
    pub magnitude: i64,
}

/// Synchronizer lifecycle. Pulses only flow in `Running`; the transition
/// happens on the first observed manual tick and is never reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Starting,
    Running,
}

/// Target pulse-count window for the current manual interval.
///
/// `min` is where the pulse counter should already be by the time the next
/// manual tick arrives; `max` is where it must stop until then.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseWindow {
    pub min: u64,
    pub max: u64,
}

/// Timing state, live only after the first manual tick
#[derive(Debug, Clone)]
struct Timing {
    /// Manual increments observed since the first one
    increments_seen: u64,
    /// Timestamp of the most recent manual tick
    last_manual_at: Instant,
    /// Current rate estimate, seconds per pulse (always positive)
    secs_per_pulse: f64,
    /// Phase reference: elapsed time for the next paced pulse is measured
    /// from here
    phase_ref: Instant,
    /// Fired pulses since run start; increments by exactly 1 per firing
    pulse_count: u64,
    window: PulseWindow,
}

/// The dual-timebase synchronizer.
///
/// Owns every piece of timing state; driven once per scheduler tick through
/// `on_manual_tick` (when the crank moved) and `advance` (always). Neither
/// entry point can fail: degenerate timing input is absorbed, not surfaced.
#[derive(Debug, Clone)]
pub struct ClockSynchronizer {
    gear: GearRatio,
    timing: Option<Timing>,
}

impl ClockSynchronizer {
    pub fn new(gear: GearRatio) -> Self {
        Self { gear, timing: None }
    }

    pub fn state(&self) -> SyncState {
        match self.timing {
            None => SyncState::Starting,
            Some(_) => SyncState::Running,
        }
    }

    pub fn gear(&self) -> GearRatio {
        self.gear
    }

    /// Fired pulses since run start (0 while `Starting`)
    pub fn pulse_count(&self) -> u64 {
        self.timing.as_ref().map(|t| t.pulse_count).unwrap_or(0)
    }

    /// Current target window, once `Running`
    pub fn window(&self) -> Option<PulseWindow> {
        self.timing.as_ref().map(|t| t.window)
    }

    /// Current rate estimate in seconds per pulse, once `Running`
    pub fn secs_per_pulse(&self) -> Option<f64> {
        self.timing.as_ref().map(|t| t.secs_per_pulse)
    }

    /// Register a manual input change. Caller guarantees
    /// `tick.magnitude != 0`.
    ///
    /// First tick arms the counters and transitions to `Running`; every
    /// later tick re-estimates the pulse rate from the measured interval and
    /// re-anchors the pulse phase to the tick.
    pub fn on_manual_tick(&mut self, tick: ManualTick) {
        debug_assert!(tick.magnitude != 0, "zero-magnitude ticks are never constructed");

        let pulses_per_increment = self.gear.pulses_per_increment();

        match &mut self.timing {
            None => {
                // First crank movement: counters come alive. The rate stays
                // at the seed value until a second tick gives a real
                // interval.
                let max = pulses_per_increment.floor() as u64;
                self.timing = Some(Timing {
                    increments_seen: 0,
                    last_manual_at: tick.at,
                    secs_per_pulse: INITIAL_SECS_PER_PULSE,
                    phase_ref: tick.at,
                    pulse_count: 0,
                    window: PulseWindow { min: 0, max },
                });
            }
            Some(timing) => {
                let elapsed = tick.at.duration_since(timing.last_manual_at).as_secs_f64();
                timing.last_manual_at = tick.at;
                timing.increments_seen += 1;

                // Zero elapsed time would make the estimate degenerate;
                // keep the previous one and only re-anchor.
                if elapsed > 0.0 {
                    timing.secs_per_pulse = elapsed / pulses_per_increment;
                }

                let min_exact = timing.increments_seen as f64 * pulses_per_increment;
                let max_exact = (timing.increments_seen + 1) as f64 * pulses_per_increment;
                timing.window = PulseWindow {
                    min: min_exact.floor() as u64,
                    max: max_exact.floor() as u64,
                };

                // Re-anchor the phase to the tick itself, minus the
                // fractional pulse the previous interval still owed, so the
                // new rate starts mid-phase instead of at a hard pulse
                // boundary. Altering this changes audible timing.
                let partial = min_exact.fract() * timing.secs_per_pulse;
                timing.phase_ref = tick.at - Duration::from_secs_f64(partial);
            }
        }
    }

    /// Advance the pulse clock. Called every scheduler tick; no-op while
    /// `Starting`.
    ///
    /// Returns the pulse indices fired this call, in firing order: first
    /// every pulse still owed below the window minimum (flushed
    /// unconditionally, never dropped), then at most one paced pulse if the
    /// rate interval elapsed and the counter has not reached the window
    /// maximum.
    pub fn advance(&mut self, now: Instant) -> Vec<u64> {
        let Some(timing) = &mut self.timing else {
            return Vec::new();
        };

        let mut fired = Vec::new();

        // Catch up: flush everything that should already have fired,
        // without consulting elapsed time.
        while timing.pulse_count < timing.window.min {
            timing.pulse_count += 1;
            fired.push(timing.pulse_count);
        }

        // Paced: fire at most one pulse, never racing past the window
        // maximum for the current manual interval.
        let since_phase = now.saturating_duration_since(timing.phase_ref).as_secs_f64();
        if since_phase > timing.secs_per_pulse && timing.pulse_count < timing.window.max {
            timing.pulse_count += 1;
            timing.phase_ref = now;
            fired.push(timing.pulse_count);
        }

        fired
    }
}
