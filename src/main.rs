use crankbox::sequencer::{euclidean, euclidean_schedule};
use crankbox::{
    ConsoleBlink, GearRatio, MidiEncoder, MidiOutError, MidirSink, RunConfig, RunController,
};
use std::path::Path;

// Rhythm for the generated front-end
const RHYTHM_STEPS: u32 = 7;
const RHYTHM_ONSETS: u32 = 3;
const RHYTHM_OFFSET: u32 = 0;
const RHYTHM_NOTE: u8 = 57; // A3
const RHYTHM_VELOCITY: u8 = 70;

/// Config file path may be passed as the only argument; otherwise the
/// front-end defaults apply
fn load_config() -> Result<RunConfig, crankbox::ConfigError> {
    if let Some(path) = std::env::args().nth(1) {
        return RunConfig::load(Path::new(&path));
    }

    Ok(RunConfig {
        // One crank revolution (20 detents) spans two rhythm cycles
        gear_ratio: GearRatio::new(RHYTHM_STEPS, 40)?,
        feedback_period: RHYTHM_STEPS as u64,
        ..RunConfig::default()
    })
}

fn connect_sink(config: &RunConfig) -> Result<MidirSink, MidiOutError> {
    match &config.output_port {
        Some(name) => MidirSink::connect_by_name(name),
        None => MidirSink::connect_default(),
    }
}

fn main() {
    println!("=== Crankbox ===");
    println!("Euclidean rhythm front-end\n");

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return;
        }
    };

    let onsets = euclidean(RHYTHM_STEPS, RHYTHM_ONSETS, RHYTHM_OFFSET);
    println!(
        "Rhythm: {} steps, onsets at {:?}, gear {}",
        RHYTHM_STEPS, onsets, config.gear_ratio
    );
    let schedule = euclidean_schedule(
        RHYTHM_STEPS,
        RHYTHM_ONSETS,
        RHYTHM_OFFSET,
        RHYTHM_NOTE,
        RHYTHM_VELOCITY,
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
