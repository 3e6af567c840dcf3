// Euclidean rhythm front-end
// Bucket (Bresenham) onset distribution: spread `onsets` hits as evenly as
// possible over `cycle` steps, optionally rotated by `offset`.

use crate::midi::event::MidiEvent;
use crate::sequencer::schedule::PulseSchedule;

/// Compute the onset timepoints of a Euclidean rhythm, sorted ascending.
pub fn euclidean(cycle: u32, onsets: u32, offset: u32) -> Vec<u32> {
    assert!(cycle > 0, "Rhythm cycle must be > 0");
    assert!(onsets <= cycle, "Cannot place more onsets than steps");

    if onsets == 0 {
        return Vec::new();
    }

    let mut rhythm = Vec::with_capacity(onsets as usize);
    let mut bucket = cycle - onsets;

    for timepoint in 0..cycle {
        bucket += onsets;
        if bucket >= cycle {
            bucket -= cycle;
            rhythm.push((timepoint + offset) % cycle);
        }
    }

    rhythm.sort_unstable();
    rhythm
}

/// Build a one-note pulse schedule from a Euclidean rhythm: NoteOn at each
/// onset, NoteOff on the following pulse (wrapping at the cycle end).
pub fn euclidean_schedule(
    cycle: u32,
    onsets: u32,
    offset: u32,
    note: u8,
    velocity: u8,
) -> PulseSchedule {
    let mut slots = vec![Vec::new(); cycle as usize];

    for onset in euclidean(cycle, onsets, offset) {
        slots[onset as usize].push(MidiEvent::NoteOn { note, velocity });
        slots[((onset + 1) % cycle) as usize].push(MidiEvent::NoteOff { note, velocity: 0 });
    }

    PulseSchedule::from_slots(slots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_division() {
        assert_eq!(euclidean(16, 4, 0), vec![0, 4, 8, 12]);
        assert_eq!(euclidean(8, 2, 0), vec![0, 4]);
    }

    #[test]
    fn test_uneven_division() {
        // The classic E(3,8) tresillo and E(3,7)
        assert_eq!(euclidean(8, 3, 0), vec![0, 3, 6]);
        assert_eq!(euclidean(7, 3, 0), vec![0, 3, 5]);
    }

    #[test]
    fn test_offset_rotates_onsets() {
        assert_eq!(euclidean(8, 3, 2), vec![0, 2, 5]);
        // Full-cycle rotation is the identity
        assert_eq!(euclidean(8, 3, 8), euclidean(8, 3, 0));
    }

    #[test]
    fn test_degenerate_counts() {
        assert_eq!(euclidean(4, 0, 0), Vec::<u32>::new());
        assert_eq!(euclidean(4, 4, 0), vec![0, 1, 2, 3]);
        assert_eq!(euclidean(1, 1, 0), vec![0]);
    }

    #[test]
    #[should_panic(expected = "more onsets")]
    fn test_onsets_beyond_cycle_rejected() {
        euclidean(4, 5, 0);
    }

    #[test]
    fn test_schedule_note_pairing() {
        let schedule = euclidean_schedule(7, 3, 0, 57, 70);

        assert_eq!(schedule.cycle_length(), 7);
        // Onsets at 0, 3, 5: NoteOn there, NoteOff one pulse later
        assert_eq!(
            schedule.events_at(0),
            &[MidiEvent::NoteOn {
                note: 57,
                velocity: 70
            }]
        );
        assert_eq!(
            schedule.events_at(1),
            &[MidiEvent::NoteOff {
                note: 57,
                velocity: 0
            }]
        );
        assert!(schedule.events_at(2).is_empty());
        // Every onset contributes exactly one on and one off
        assert_eq!(schedule.event_count(), 6);
    }

    #[test]
    fn test_schedule_note_off_wraps_cycle_end() {
        // Onset on the last step: its NoteOff lands on step 0
        let schedule = euclidean_schedule(4, 4, 0, 60, 100);

        let events_at_zero = schedule.events_at(0);
        assert!(events_at_zero.contains(&MidiEvent::NoteOn {
            note: 60,
            velocity: 100
        }));
        assert!(events_at_zero.contains(&MidiEvent::NoteOff {
            note: 60,
            velocity: 0
        }));
    }
}
