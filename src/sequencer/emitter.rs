// Event emitter - schedule lookup and dispatch
// Thin sink between the pulse clock and the transport: look the pulse up,
// forward its events in order, poke the feedback device on the beat.

use crate::feedback::FeedbackDevice;
use crate::midi::event::MidiEvent;
use crate::midi::output::{MidiSink, SendError};
use crate::sequencer::schedule::PulseSchedule;

pub struct EventEmitter {
    schedule: PulseSchedule,
    feedback: Box<dyn FeedbackDevice>,
    /// Feedback fires when `pulse_index % feedback_period == 0`
    feedback_period: u64,
    /// Lead every pulse with a MIDI realtime clock message
    send_clock: bool,
}

impl EventEmitter {
    pub fn new(
        schedule: PulseSchedule,
        feedback: Box<dyn FeedbackDevice>,
        feedback_period: u64,
        send_clock: bool,
    ) -> Self {
        assert!(feedback_period > 0, "Feedback period must be > 0");
        Self {
            schedule,
            feedback,
            feedback_period,
            send_clock,
        }
    }

    /// Emit everything scheduled for one fired pulse.
    ///
    /// Transport errors propagate to the caller unretried; feedback is
    /// fire-and-forget and cannot fail.
    pub fn emit(&mut self, pulse_index: u64, sink: &mut dyn MidiSink) -> Result<(), SendError> {
        if self.send_clock {
            sink.send(&MidiEvent::TimingClock)?;
        }

        for event in self.schedule.events_at(pulse_index) {
            sink.send(event)?;
        }

        if pulse_index % self.feedback_period == 0 {
            self.feedback.on_beat();
        }

        Ok(())
    }

    pub fn schedule(&self) -> &PulseSchedule {
        &self.schedule
    }
}
