// MIDI module - event types and output transport

pub mod event;
pub mod output;

pub use event::MidiEvent;
pub use output::{MidiOutError, MidiSink, MidirSink, SendError};
