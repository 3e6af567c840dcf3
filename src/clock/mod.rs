// Clock module - dual-timebase synchronization core and its run loop

pub mod controller;
pub mod gear;
pub mod synchronizer;

pub use controller::RunController;
pub use gear::GearRatio;
pub use synchronizer::{ClockSynchronizer, ManualTick, PulseWindow, SyncState};
