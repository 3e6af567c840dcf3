// Performance front-end: plays a fixed piece under crank control.
// Identical run loop to the main binary; only the schedule producer differs.

use crankbox::sequencer::{ScheduledEvent, note_events, performance_schedule};
use crankbox::{ConsoleBlink, MidiEncoder, MidiOutError, MidirSink, RunConfig, RunController};
use std::path::Path;

/// Built-in demo phrase, 24 pulses per quarter note.
/// (pulse, duration, note, velocity)
const DEMO_NOTES: [(u64, u64, u8, u8); 8] = [
    (0, 12, 57, 80),   // A3
    (12, 12, 60, 64),  // C4
    (24, 12, 64, 64),  // E4
    (36, 12, 60, 64),  // C4
    (48, 24, 69, 96),  // A4
    (72, 12, 67, 64),  // G4
    (84, 12, 64, 64),  // E4
    (96, 24, 57, 80),  // A3
];

fn demo_performance() -> Vec<ScheduledEvent> {
    let mut events = Vec::new();
    for (pulse, duration, note, velocity) in DEMO_NOTES {
        events.extend(note_events(pulse, duration, note, velocity));
    }
    events
}

fn load_config() -> Result<RunConfig, crankbox::ConfigError> {
    if let Some(path) = std::env::args().nth(1) {
        return RunConfig::load(Path::new(&path));
    }
    Ok(RunConfig::default())
}

fn connect_sink(config: &RunConfig) -> Result<MidirSink, MidiOutError> {
    match &config.output_port {
        Some(name) => MidirSink::connect_by_name(name),
        None => MidirSink::connect_default(),
    }
}

fn main() {
    println!("=== Crankbox ===");
    println!("Performance front-end\n");

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return;
        }
    };

    let schedule = performance_schedule(&demo_performance());
    println!(
        "Piece: {} pulses, {} events, gear {}",
        schedule.cycle_length(),
        schedule.event_count(),
        config.gear_ratio
    );

    let sink = match connect_sink(&config) {
        Ok(sink) => sink,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return;
        }
    };

    let encoder = match MidiEncoder::connect_default(config.encoder_cc) {
        Ok(encoder) => encoder,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return;
        }
    };

    let mut controller =
        RunController::new(&config, schedule, Box::new(ConsoleBlink::new()), encoder, sink);

    println!("\nTurn the crank to start.\n");
    if let Err(e) = controller.run() {
        eprintln!("ERROR: {}", e);
    }
}
