// Performance front-end
// Turns a flat list of pulse-pinned events into a schedule whose cycle is
// the length of the piece. Where the list comes from (a parser, a table,
// a test) is not this module's business.

use crate::midi::event::MidiEvent;
use crate::sequencer::schedule::PulseSchedule;

/// One event pinned to an absolute pulse index within the piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledEvent {
    pub pulse: u64,
    pub event: MidiEvent,
}

/// NoteOn/NoteOff pair for a note held for `duration` pulses
pub fn note_events(pulse: u64, duration: u64, note: u8, velocity: u8) -> [ScheduledEvent; 2] {
    assert!(duration > 0, "Note duration must be > 0");
    [
        ScheduledEvent {
            pulse,
            event: MidiEvent::NoteOn { note, velocity },
        },
        ScheduledEvent {
            pulse: pulse + duration,
            event: MidiEvent::NoteOff { note, velocity: 0 },
        },
    ]
}

/// Build the schedule. Cycle length is `max pulse + 1`, so the piece loops
/// seamlessly once the counter passes its last event. An empty list gives a
/// one-pulse silent schedule.
pub fn performance_schedule(events: &[ScheduledEvent]) -> PulseSchedule {
    let piece_length = events
        .iter()
        .map(|scheduled| scheduled.pulse)
        .max()
        .map(|last| last + 1)
        .unwrap_or(1);

    let mut slots = vec![Vec::new(); piece_length as usize];
    for scheduled in events {
        slots[scheduled.pulse as usize].push(scheduled.event);
    }

    PulseSchedule::from_slots(slots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_length_from_last_event() {
        let events = [
            ScheduledEvent {
                pulse: 0,
                event: MidiEvent::NoteOn {
                    note: 60,
                    velocity: 100,
                },
            },
            ScheduledEvent {
                pulse: 11,
                event: MidiEvent::NoteOff {
                    note: 60,
                    velocity: 0,
                },
            },
        ];

        let schedule = performance_schedule(&events);
        assert_eq!(schedule.cycle_length(), 12);
    }

    #[test]
    fn test_events_preserve_list_order_within_pulse() {
        let off = MidiEvent::NoteOff {
            note: 60,
            velocity: 0,
        };
        let on = MidiEvent::NoteOn {
            note: 62,
            velocity: 90,
        };
        let events = [
            ScheduledEvent { pulse: 3, event: off },
            ScheduledEvent { pulse: 3, event: on },
        ];

        let schedule = performance_schedule(&events);
        assert_eq!(schedule.events_at(3), &[off, on]);
    }

    #[test]
    fn test_empty_performance_is_one_silent_pulse() {
        let schedule = performance_schedule(&[]);
        assert_eq!(schedule.cycle_length(), 1);
        assert!(schedule.is_silent());
    }

    #[test]
    fn test_note_events_pairing() {
        let [on, off] = note_events(24, 12, 57, 70);

        assert_eq!(on.pulse, 24);
        assert_eq!(
            on.event,
            MidiEvent::NoteOn {
                note: 57,
                velocity: 70
            }
        );
        assert_eq!(off.pulse, 36);
        assert_eq!(
            off.event,
            MidiEvent::NoteOff {
                note: 57,
                velocity: 0
            }
        );
    }

    #[test]
    fn test_note_events_feed_schedule() {
        let mut events = Vec::new();
        events.extend(note_events(0, 6, 57, 70));
        events.extend(note_events(12, 6, 60, 70));

        let schedule = performance_schedule(&events);
        assert_eq!(schedule.cycle_length(), 19); // last NoteOff at pulse 18
        assert_eq!(schedule.event_count(), 4);
    }
}
