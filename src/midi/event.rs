// MIDI event types, both directions:
// parsed from raw bytes on the encoder input, serialized to raw bytes on output

/// A MIDI message the sequencer can schedule or send.
///
/// Voice messages carry data bytes; realtime messages (TimingClock, Start,
/// Stop) are single-byte and may be interleaved with anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8, velocity: u8 },
    ControlChange { controller: u8, value: u8 },
    /// MIDI realtime clock pulse (24 per quarter note by convention)
    TimingClock,
    Start,
    Stop,
}

impl MidiEvent {
    /// Parse a raw MIDI message
    /// Channel bits are ignored; velocity-0 NoteOn is normalized to NoteOff
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.is_empty() {
            return None;
        }

        let status = bytes[0];

        // Realtime messages are a single status byte
        match status {
            0xF8 => return Some(MidiEvent::TimingClock),
            0xFA => return Some(MidiEvent::Start),
            0xFC => return Some(MidiEvent::Stop),
            _ => {}
        }

        let message_type = status & 0xF0;

        match message_type {
            0x90 => {
                // Note On
                if bytes.len() >= 3 {
                    let note = bytes[1];
                    let velocity = bytes[2];
                    // Velocity 0 = Note Off
                    if velocity == 0 {
                        Some(MidiEvent::NoteOff { note, velocity: 0 })
                    } else {
                        Some(MidiEvent::NoteOn { note, velocity })
                    }
                } else {
                    None
                }
            }
            0x80 => {
                // Note Off
                if bytes.len() >= 3 {
                    Some(MidiEvent::NoteOff {
                        note: bytes[1],
                        velocity: bytes[2],
                    })
                } else {
                    None
                }
            }
            0xB0 => {
                // Control Change
                if bytes.len() >= 3 {
                    Some(MidiEvent::ControlChange {
                        controller: bytes[1],
                        value: bytes[2],
                    })
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Serialize to wire bytes (channel 0 for voice messages).
    /// Returns the buffer and the number of valid bytes.
    pub fn to_bytes(&self) -> ([u8; 3], usize) {
        match *self {
            MidiEvent::NoteOn { note, velocity } => ([0x90, note & 0x7F, velocity & 0x7F], 3),
            MidiEvent::NoteOff { note, velocity } => ([0x80, note & 0x7F, velocity & 0x7F], 3),
            MidiEvent::ControlChange { controller, value } => {
                ([0xB0, controller & 0x7F, value & 0x7F], 3)
            }
            MidiEvent::TimingClock => ([0xF8, 0, 0], 1),
            MidiEvent::Start => ([0xFA, 0, 0], 1),
            MidiEvent::Stop => ([0xFC, 0, 0], 1),
        }
    }

    /// True for single-byte realtime messages
    pub fn is_realtime(&self) -> bool {
        matches!(
            self,
            MidiEvent::TimingClock | MidiEvent::Start | MidiEvent::Stop
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_on() {
        let bytes = [0x90, 60, 100]; // Note On, note 60 (C4), velocity 100
        let event = MidiEvent::from_bytes(&bytes).unwrap();

        match event {
            MidiEvent::NoteOn { note, velocity } => {
                assert_eq!(note, 60);
                assert_eq!(velocity, 100);
            }
            _ => panic!("Expected NoteOn event"),
        }
    }

    #[test]
    fn test_note_off_velocity_zero() {
        // Note On with velocity 0 = Note Off
        let bytes = [0x90, 64, 0];
        let event = MidiEvent::from_bytes(&bytes).unwrap();

        match event {
            MidiEvent::NoteOff { note, .. } => {
                assert_eq!(note, 64);
            }
            _ => panic!("Expected NoteOff event (velocity 0)"),
        }
    }

    #[test]
    fn test_control_change() {
        let bytes = [0xB0, 1, 65]; // CC, controller 1, value 65
        let event = MidiEvent::from_bytes(&bytes).unwrap();

        match event {
            MidiEvent::ControlChange { controller, value } => {
                assert_eq!(controller, 1);
                assert_eq!(value, 65);
            }
            _ => panic!("Expected ControlChange event"),
        }
    }

    #[test]
    fn test_realtime_messages() {
        assert_eq!(
            MidiEvent::from_bytes(&[0xF8]).unwrap(),
            MidiEvent::TimingClock
        );
        assert_eq!(MidiEvent::from_bytes(&[0xFA]).unwrap(), MidiEvent::Start);
        assert_eq!(MidiEvent::from_bytes(&[0xFC]).unwrap(), MidiEvent::Stop);
    }

    #[test]
    fn test_invalid_messages() {
        assert!(MidiEvent::from_bytes(&[]).is_none());
        assert!(MidiEvent::from_bytes(&[0x90, 60]).is_none()); // Note On without velocity
        assert!(MidiEvent::from_bytes(&[0xE0, 0x00, 0x40]).is_none()); // Pitch bend unsupported
    }

    #[test]
    fn test_channel_ignored_on_parse() {
        let ch0 = MidiEvent::from_bytes(&[0xB0, 1, 10]).unwrap();
        let ch15 = MidiEvent::from_bytes(&[0xBF, 1, 10]).unwrap();
        assert_eq!(ch0, ch15);
    }

    #[test]
    fn test_roundtrip_voice_message() {
        let event = MidiEvent::NoteOn {
            note: 57,
            velocity: 70,
        };
        let (bytes, len) = event.to_bytes();
        assert_eq!(len, 3);
        assert_eq!(MidiEvent::from_bytes(&bytes[..len]).unwrap(), event);
    }

    #[test]
    fn test_realtime_serialization_is_single_byte() {
        for event in [MidiEvent::TimingClock, MidiEvent::Start, MidiEvent::Stop] {
            let (bytes, len) = event.to_bytes();
            assert_eq!(len, 1);
            assert!(event.is_realtime());
            assert_eq!(MidiEvent::from_bytes(&bytes[..len]).unwrap(), event);
        }
    }
}
