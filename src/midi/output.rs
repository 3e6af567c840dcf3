// MIDI output transport
// The sequencer core only sees the MidiSink trait; the midir-backed
// implementation lives here so the core stays transport-agnostic.

use crate::midi::event::MidiEvent;
use midir::{MidiOutput as MidirOutput, MidiOutputConnection, MidiOutputPort};

/// Transport send failure. Propagated to the run loop caller; the core does
/// not retry, event timing matters more than one lost message.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("MIDI send failed: {0}")]
    Midi(#[from] midir::SendError),
}

/// Errors while opening a MIDI output port
#[derive(Debug, thiserror::Error)]
pub enum MidiOutError {
    #[error("failed to initialize MIDI output: {0}")]
    Init(#[from] midir::InitError),

    #[error("no MIDI output ports available")]
    NoPorts,

    #[error("MIDI output port '{0}' not found")]
    PortNotFound(String),

    #[error("failed to connect MIDI output: {0}")]
    Connect(String),
}

/// Where scheduled events go, one call per event in schedule order
pub trait MidiSink {
    fn send(&mut self, event: &MidiEvent) -> Result<(), SendError>;
}

/// midir-backed sink writing wire bytes to a connected output port
pub struct MidirSink {
    connection: MidiOutputConnection,
    port_name: String,
}

impl MidirSink {
    /// Connect to the first available MIDI output port
    pub fn connect_default() -> Result<Self, MidiOutError> {
        let midi_out = MidirOutput::new("Crankbox MIDI Output")?;
        let ports = midi_out.ports();

        let port = ports.first().ok_or(MidiOutError::NoPorts)?;
        let port_name = midi_out
            .port_name(port)
            .unwrap_or_else(|_| "Unknown".to_string());

        Self::connect(midi_out, port, port_name)
    }

    /// Connect to a MIDI output port by name
    pub fn connect_by_name(device_name: &str) -> Result<Self, MidiOutError> {
        let midi_out = MidirOutput::new("Crankbox MIDI Output")?;
        let ports = midi_out.ports();

        let port = ports
            .iter()
            .find(|p| {
                midi_out
                    .port_name(p)
                    .map(|name| name == device_name)
                    .unwrap_or(false)
            })
            .ok_or_else(|| MidiOutError::PortNotFound(device_name.to_string()))?;

        Self::connect(midi_out, port, device_name.to_string())
    }

    fn connect(
        midi_out: MidirOutput,
        port: &MidiOutputPort,
        port_name: String,
    ) -> Result<Self, MidiOutError> {
        let connection = midi_out
            .connect(port, "crankbox-output")
            .map_err(|e| MidiOutError::Connect(e.to_string()))?;

        println!("✓ MIDI output connected: {}", port_name);

        Ok(Self {
            connection,
            port_name,
        })
    }

    /// List the names of all available output ports
    pub fn list_output_ports() -> Vec<String> {
        let mut names = Vec::new();

        if let Ok(midi_out) = MidirOutput::new("Crankbox MIDI Scanner") {
            for port in midi_out.ports() {
                if let Ok(name) = midi_out.port_name(&port) {
                    names.push(name);
                }
            }
        }

        names
    }

    /// Name of the connected port
    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}

impl MidiSink for MidirSink {
    fn send(&mut self, event: &MidiEvent) -> Result<(), SendError> {
        let (bytes, len) = event.to_bytes();
        self.connection.send(&bytes[..len])?;
        Ok(())
    }
}
