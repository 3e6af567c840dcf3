// MIDI-CC rotary encoder source
// Relative encoder hardware that speaks MIDI sends one Control Change per
// detent; the callback accumulates the signed deltas into a position the
// poll loop reads without locking.

use crate::encoder::PositionSource;
use crate::midi::event::MidiEvent;
use midir::{MidiInput as MidirInput, MidiInputConnection};
use ringbuf::{HeapRb, traits::Split};

// Sized well past any realistic crank speed: a 20-detent encoder spun hard
// produces tens of messages per second, and the loop drains every
// millisecond.
const DELTA_RINGBUFFER_CAPACITY: usize = 512;

pub type DeltaProducer = ringbuf::HeapProd<i64>;
pub type DeltaConsumer = ringbuf::HeapCons<i64>;

fn create_delta_channel(capacity: usize) -> (DeltaProducer, DeltaConsumer) {
    let rb = HeapRb::<i64>::new(capacity);
    rb.split()
}

/// Errors while opening the encoder's MIDI input port
#[derive(Debug, thiserror::Error)]
pub enum MidiInError {
    #[error("failed to initialize MIDI input: {0}")]
    Init(#[from] midir::InitError),

    #[error("no MIDI input ports available")]
    NoPorts,

    #[error("failed to connect MIDI input: {0}")]
    Connect(String),
}

/// Decode a relative-encoder CC value (two's complement convention:
/// 0x01 = +1, 0x7F = -1, 0x00/0x40 never sent by conforming encoders)
fn relative_delta(value: u8) -> i64 {
    if value < 64 {
        value as i64
    } else {
        value as i64 - 128
    }
}

/// A rotary encoder reached over a midir input connection.
///
/// The midir callback runs on midir's own thread; deltas cross into the
/// poll loop through a lock-free SPSC ring buffer.
pub struct MidiEncoder {
    position: i64,
    delta_rx: DeltaConsumer,
    _connection: MidiInputConnection<()>,
}

impl MidiEncoder {
    /// Connect to the first available MIDI input port and watch the given
    /// CC controller number for relative deltas
    pub fn connect_default(controller: u8) -> Result<Self, MidiInError> {
        let midi_in = MidirInput::new("Crankbox Encoder Input")?;
        let ports = midi_in.ports();

        let port = ports.first().ok_or(MidiInError::NoPorts)?.clone();
        let port_name = midi_in
            .port_name(&port)
            .unwrap_or_else(|_| "Unknown".to_string());

        let (mut delta_tx, delta_rx) = create_delta_channel(DELTA_RINGBUFFER_CAPACITY);

        let connection = midi_in
            .connect(
                &port,
                "crankbox-encoder",
                move |_timestamp, message, _| {
                    if let Some(MidiEvent::ControlChange { controller: cc, value }) =
                        MidiEvent::from_bytes(message)
                    {
                        if cc == controller {
                            let delta = relative_delta(value);
                            if delta != 0 {
                                let _ = ringbuf::traits::Producer::try_push(&mut delta_tx, delta);
                            }
                        }
                    }
                },
                (),
            )
            .map_err(|e| MidiInError::Connect(e.to_string()))?;

        println!("✓ Encoder input connected: {} (CC {})", port_name, controller);

        Ok(Self {
            position: 0,
            delta_rx,
            _connection: connection,
        })
    }
}

impl PositionSource for MidiEncoder {
    fn position(&mut self) -> i64 {
        while let Some(delta) = ringbuf::traits::Consumer::try_pop(&mut self.delta_rx) {
            self.position = self.position.wrapping_add(delta);
        }
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_delta_positive() {
        assert_eq!(relative_delta(1), 1);
        assert_eq!(relative_delta(3), 3);
        assert_eq!(relative_delta(63), 63);
    }

    #[test]
    fn test_relative_delta_negative() {
        assert_eq!(relative_delta(127), -1);
        assert_eq!(relative_delta(125), -3);
        assert_eq!(relative_delta(65), -63);
    }

    #[test]
    fn test_relative_delta_center_values() {
        assert_eq!(relative_delta(0), 0);
        assert_eq!(relative_delta(64), -64);
    }

    #[test]
    fn test_deltas_accumulate_through_channel() {
        let (mut tx, mut rx) = create_delta_channel(8);
        let mut position = 0i64;

        for delta in [1i64, 1, -2, 5] {
            ringbuf::traits::Producer::try_push(&mut tx, delta).unwrap();
        }

        while let Some(delta) = ringbuf::traits::Consumer::try_pop(&mut rx) {
            position = position.wrapping_add(delta);
        }
        assert_eq!(position, 5);
    }
}
