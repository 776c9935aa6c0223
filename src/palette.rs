//! Stage color pool and flash patterns.
//!
//! Each stage paints the whole strip: target buttons get a color from the
//! head of the pool, the remaining buttons get a decoy color from the tail.
//! Early phases keep the split low so targets are easy to tell apart; later
//! phases widen the decoy-free zone and the player has to remember which
//! colors are live.

use embassy_time::Duration;

use crate::Rgb;
use crate::rng::SplitMix64;

pub(crate) const LED_OFF: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// A blocking strip-wide flash: solid fill, then dark, repeated.
#[derive(Debug, Clone, Copy)]
pub struct FlashPattern {
    pub color: Rgb,
    /// Number of on/off cycles
    pub iterations: u8,
    /// Time spent on each edge (lit and dark)
    pub interval: Duration,
}

/// Color pool shared by every stage.
#[derive(Debug, Clone, Copy)]
pub struct StagePalette {
    colors: &'static [Rgb],
}

impl StagePalette {
    /// Wrap a color pool. `colors` must hold at least two entries so that
    /// valid and decoy picks can differ.
    pub const fn new(colors: &'static [Rgb]) -> Self {
        Self { colors }
    }

    pub const fn len(&self) -> usize {
        self.colors.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Split index clamped so both pools stay non-empty.
    fn clamp_split(&self, split: usize) -> usize {
        split.clamp(1, self.colors.len().saturating_sub(1))
    }

    /// Random color for a target button: drawn from `[0, split)`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn valid_color(&self, split: usize, rng: &mut SplitMix64) -> Rgb {
        let split = self.clamp_split(split);
        self.colors[rng.next_below(split as u32) as usize]
    }

    /// Random color for a non-target button: drawn from `[split, len)`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn decoy_color(&self, split: usize, rng: &mut SplitMix64) -> Rgb {
        let split = self.clamp_split(split);
        let idx = rng.next_in(split as u32, self.colors.len() as u32 - 1);
        self.colors[idx as usize]
    }
}

/// Default pool for the reference prop: primaries first, mixes as decoys.
pub const DEFAULT_PALETTE: [Rgb; 6] = [
    Rgb { r: 255, g: 0, b: 0 },
    Rgb { r: 0, g: 255, b: 0 },
    Rgb { r: 0, g: 0, b: 255 },
    Rgb { r: 255, g: 255, b: 0 },
    Rgb { r: 255, g: 0, b: 255 },
    Rgb { r: 0, g: 255, b: 255 },
];
