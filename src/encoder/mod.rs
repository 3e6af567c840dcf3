// Manual input sources
// The synchronizer only ever consumes positional deltas, so anything that
// can report a monotonically-changing integer position can drive the clock.

pub mod midi_encoder;

pub use midi_encoder::{MidiEncoder, MidiInError};

/// A readable rotary position, polled once per controller tick.
///
/// The absolute value is meaningless and may wrap; only successive deltas
/// are consumed. Must not block.
pub trait PositionSource {
    fn position(&mut self) -> i64;
}
