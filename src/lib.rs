#![no_std]

pub mod combo;
pub mod config;
pub mod engine;
mod log;
pub mod palette;
pub mod press;
pub mod rng;
pub mod runner;
pub mod set;

pub use combo::ComboLock;
pub use config::{PhaseConfig, PuzzleConfig};
pub use engine::{FailKind, PuzzleEngine, TickEvent};
pub use palette::{FlashPattern, StagePalette};
pub use press::{PressChannel, PressEvent, PressReceiver, PressSender};
pub use runner::{PuzzleRunner, TickResult};
pub use set::ButtonSet;

pub use embassy_time::{Duration, Instant};

/// Per-LED color type shared with the strip driver.
pub type Rgb = smart_leds::RGB8;

/// Abstract LED strip driver trait
///
/// Implement this trait to support different hardware platforms.
/// The puzzle runner is generic over this trait.
pub trait LedDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}

/// Abstract latch (relay) driver trait
///
/// Idempotent open/lock signal with no read-back. The runner locks the latch
/// on construction and opens it exactly once when the puzzle is completed.
pub trait LatchDriver {
    /// Release the latch
    fn open(&mut self);

    /// Engage the latch
    fn lock(&mut self);
}
