// Sequencer module - pulse schedules, their producers, and the emitter

pub mod emitter;
pub mod euclidean;
pub mod performance;
pub mod schedule;

pub use emitter::EventEmitter;
pub use euclidean::{euclidean, euclidean_schedule};
pub use performance::{ScheduledEvent, note_events, performance_schedule};
pub use schedule::PulseSchedule;
