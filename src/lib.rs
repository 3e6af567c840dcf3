// Crankbox - manually-actuated tempo-following MIDI sequencer
// Library exports for the front-end binaries, tests, and benchmarks

pub mod clock;
pub mod config;
pub mod encoder;
pub mod feedback;
pub mod midi;
pub mod sequencer;

// Re-export commonly used types for convenience
pub use clock::{ClockSynchronizer, GearRatio, ManualTick, PulseWindow, RunController, SyncState};
pub use config::{ConfigError, RunConfig};
pub use encoder::{MidiEncoder, PositionSource};
pub use feedback::{ConsoleBlink, FeedbackDevice, NullFeedback};
pub use midi::{MidiEvent, MidiOutError, MidiSink, MidirSink, SendError};
pub use sequencer::{EventEmitter, PulseSchedule, ScheduledEvent};
