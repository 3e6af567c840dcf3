// Run controller - the fixed-period polling loop
// Owns the synchronizer, the emitter, and the transport for the lifetime of
// a run; one logical thread of control, no locking anywhere.

use crate::clock::synchronizer::{ClockSynchronizer, ManualTick, SyncState};
use crate::config::RunConfig;
use crate::encoder::PositionSource;
use crate::feedback::FeedbackDevice;
use crate::midi::event::MidiEvent;
use crate::midi::output::{MidiSink, SendError};
use crate::sequencer::emitter::EventEmitter;
use crate::sequencer::schedule::PulseSchedule;
use std::thread;
use std::time::{Duration, Instant};

pub struct RunController<S: PositionSource, T: MidiSink> {
    synchronizer: ClockSynchronizer,
    emitter: EventEmitter,
    source: S,
    sink: T,
    tick_period: Duration,
    stop_after: Option<Duration>,
    last_position: i64,
    /// Set on the Starting -> Running transition; the stop ceiling counts
    /// from here
    running_since: Option<Instant>,
    stopped: bool,
}

impl<S: PositionSource, T: MidiSink> RunController<S, T> {
    pub fn new(
        config: &RunConfig,
        schedule: PulseSchedule,
        feedback: Box<dyn FeedbackDevice>,
        mut source: S,
        sink: T,
    ) -> Self {
        let last_position = source.position();

        Self {
            synchronizer: ClockSynchronizer::new(config.gear_ratio),
            emitter: EventEmitter::new(
                schedule,
                feedback,
                config.feedback_period,
                config.send_clock,
            ),
            source,
            sink,
            tick_period: config.tick_period(),
            stop_after: config.stop_after(),
            last_position,
            running_since: None,
            stopped: false,
        }
    }

    /// One loop iteration: sample the input, advance the clock, dispatch
    /// fired pulses, check the stop ceiling.
    ///
    /// Returns `false` once the run is over: the terminal Stop has been
    /// sent and later calls are no-ops.
    pub fn step(&mut self, now: Instant) -> Result<bool, SendError> {
        if self.stopped {
            return Ok(false);
        }

        // 1. Manual input: a nonzero positional delta becomes a ManualTick
        let position = self.source.position();
        let delta = position.wrapping_sub(self.last_position);
        if delta != 0 {
            self.last_position = position;
            let was_starting = self.synchronizer.state() == SyncState::Starting;

            self.synchronizer.on_manual_tick(ManualTick {
                at: now,
                magnitude: delta,
            });

            if was_starting {
                self.running_since = Some(now);
                self.sink.send(&MidiEvent::Start)?;
                println!("running");
            }
        }

        // 2. Advance the pulse clock and dispatch in firing order
        for pulse in self.synchronizer.advance(now) {
            self.emitter.emit(pulse, &mut self.sink)?;
        }

        // 3. Stop ceiling, measured from the Starting -> Running transition
        if let (Some(since), Some(limit)) = (self.running_since, self.stop_after) {
            if now.duration_since(since) > limit {
                self.stopped = true;
                self.sink.send(&MidiEvent::Stop)?;
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Drive the loop at the configured tick period until the stop ceiling
    /// is reached or the transport fails
    pub fn run(&mut self) -> Result<(), SendError> {
        println!("starting");

        while self.step(Instant::now())? {
            thread::sleep(self.tick_period);
        }

        println!("\nstopping");
        Ok(())
    }

    pub fn synchronizer(&self) -> &ClockSynchronizer {
        &self.synchronizer
    }

    pub fn emitter(&self) -> &EventEmitter {
        &self.emitter
    }
}
