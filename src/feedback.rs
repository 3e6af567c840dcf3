// Beat feedback devices
// Cosmetic side channel invoked on pulse boundaries; must never block the
// tick loop and is never awaited.

use rand::Rng;
use std::io::Write;

/// Something that blinks, flashes, or otherwise marks a beat
pub trait FeedbackDevice {
    fn on_beat(&mut self);
}

/// Feedback that does nothing
pub struct NullFeedback;

impl FeedbackDevice for NullFeedback {
    fn on_beat(&mut self) {}
}

/// Terminal stand-in for the device LED: prints a block in a random color
/// once per beat
pub struct ConsoleBlink {
    rng: rand::rngs::ThreadRng,
}

impl ConsoleBlink {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for ConsoleBlink {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedbackDevice for ConsoleBlink {
    fn on_beat(&mut self) {
        let r: u8 = self.rng.gen_range(0..128);
        let g: u8 = self.rng.gen_range(0..128);
        let b: u8 = self.rng.gen_range(0..128);
        print!("\x1b[38;2;{};{};{}m\u{25CF}\x1b[0m", r, g, b);
        let _ = std::io::stdout().flush();
    }
}
