// Pulse schedule - what to play on each pulse of the cycle
// Built once at startup by a front-end, immutable afterwards

use crate::midi::event::MidiEvent;

/// Immutable mapping from pulse index to the ordered MIDI events fired on
/// that pulse. Lookup is modulo the cycle length, so the schedule repeats
/// forever as the pulse counter climbs.
#[derive(Debug, Clone)]
pub struct PulseSchedule {
    slots: Vec<Vec<MidiEvent>>,
}

impl PulseSchedule {
    /// Wrap a fully-built slot table. One slot per pulse of the cycle;
    /// empty slots are silent pulses.
    pub fn from_slots(slots: Vec<Vec<MidiEvent>>) -> Self {
        assert!(!slots.is_empty(), "Schedule cycle length must be > 0");
        Self { slots }
    }

    /// Number of pulses in one cycle
    pub fn cycle_length(&self) -> u64 {
        self.slots.len() as u64
    }

    /// Events to emit for a pulse, in emission order. `pulse_index` may be
    /// any counter value; it is reduced modulo the cycle length.
    pub fn events_at(&self, pulse_index: u64) -> &[MidiEvent] {
        &self.slots[(pulse_index % self.cycle_length()) as usize]
    }

    /// Total number of scheduled events across the cycle
    pub fn event_count(&self) -> usize {
        self.slots.iter().map(|slot| slot.len()).sum()
    }

    /// True if no pulse carries any event
    pub fn is_silent(&self) -> bool {
        self.event_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note_on(note: u8) -> MidiEvent {
        MidiEvent::NoteOn { note, velocity: 100 }
    }

    #[test]
    fn test_schedule_lookup() {
        let schedule = PulseSchedule::from_slots(vec![
            vec![note_on(60)],
            vec![],
            vec![note_on(64), note_on(67)],
        ]);

        assert_eq!(schedule.cycle_length(), 3);
        assert_eq!(schedule.events_at(0), &[note_on(60)]);
        assert!(schedule.events_at(1).is_empty());
        assert_eq!(schedule.events_at(2).len(), 2);
    }

    #[test]
    fn test_lookup_wraps_modulo_cycle() {
        let schedule = PulseSchedule::from_slots(vec![vec![note_on(60)], vec![], vec![]]);

        assert_eq!(schedule.events_at(3), schedule.events_at(0));
        assert_eq!(schedule.events_at(7), schedule.events_at(1));
        assert_eq!(schedule.events_at(3_000_000_002), schedule.events_at(2));
    }

    #[test]
    fn test_event_count_and_silence() {
        let silent = PulseSchedule::from_slots(vec![vec![], vec![]]);
        assert!(silent.is_silent());
        assert_eq!(silent.event_count(), 0);

        let schedule = PulseSchedule::from_slots(vec![vec![note_on(60)], vec![note_on(62)]]);
        assert!(!schedule.is_silent());
        assert_eq!(schedule.event_count(), 2);
    }

    #[test]
    #[should_panic(expected = "cycle length")]
    fn test_empty_schedule_rejected() {
        PulseSchedule::from_slots(Vec::new());
    }
}
