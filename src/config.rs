//! Build-time puzzle configuration.
//!
//! Everything here is fixed when the firmware is flashed; there is no
//! runtime reconfiguration. The defaults mirror the reference 8-button prop.

use embassy_time::Duration;

use crate::Rgb;
use crate::palette::{DEFAULT_PALETTE, FlashPattern, StagePalette};

/// Tunables for a single phase.
///
/// Phase 0 is the most forgiving; later phases tighten the timeout and
/// shorten the required streak while lighting more targets at once.
#[derive(Debug, Clone, Copy)]
pub struct PhaseConfig {
    /// Consecutive stage clears required to advance to the next phase
    pub required_streak: u8,
    /// Maximum time a stage may stay unsolved
    pub max_span: Duration,
    /// Lower bound (inclusive) for the number of simultaneous targets
    pub targets_min: u8,
    /// Upper bound (inclusive) for the number of simultaneous targets
    pub targets_max: u8,
    /// Palette index separating valid target colors from decoy colors
    pub palette_split: u8,
}

/// Engine-wide configuration.
#[derive(Debug, Clone, Copy)]
pub struct PuzzleConfig {
    /// Phase at which the puzzle completes and the latch opens
    pub final_phase: usize,
    /// Per-phase tunables, keyed by phase number and clamped at the last
    /// entry for phases beyond the table. Must hold at least one entry.
    pub phases: &'static [PhaseConfig],
    /// Color pool for stage rendering
    pub palette: StagePalette,
    /// Flash played on a wrong press or an expired stage
    pub error_flash: FlashPattern,
    /// Flash played once when the final phase is reached
    pub success_flash: FlashPattern,
    /// Flash played when the combination pre-lock opens
    pub unlock_flash: FlashPattern,
}

impl PuzzleConfig {
    /// Tunables for `phase`, clamped at the last table entry.
    pub fn phase(&self, phase: usize) -> PhaseConfig {
        self.phases[phase.min(self.phases.len() - 1)]
    }
}

const LED_RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
const LED_GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };

const FLASH_INTERVAL: Duration = Duration::from_millis(250);

const PHASE_TABLE: [PhaseConfig; 4] = [
    PhaseConfig {
        required_streak: 6,
        max_span: Duration::from_millis(6000),
        targets_min: 1,
        targets_max: 3,
        palette_split: 1,
    },
    PhaseConfig {
        required_streak: 4,
        max_span: Duration::from_millis(3000),
        targets_min: 2,
        targets_max: 4,
        palette_split: 2,
    },
    PhaseConfig {
        required_streak: 3,
        max_span: Duration::from_millis(1500),
        targets_min: 3,
        targets_max: 5,
        palette_split: 3,
    },
    PhaseConfig {
        required_streak: 3,
        max_span: Duration::from_millis(1500),
        targets_min: 4,
        targets_max: 6,
        palette_split: 3,
    },
];

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            final_phase: 4,
            phases: &PHASE_TABLE,
            palette: StagePalette::new(&DEFAULT_PALETTE),
            error_flash: FlashPattern {
                color: LED_RED,
                iterations: 3,
                interval: FLASH_INTERVAL,
            },
            success_flash: FlashPattern {
                color: LED_GREEN,
                iterations: 3,
                interval: FLASH_INTERVAL,
            },
            unlock_flash: FlashPattern {
                color: LED_GREEN,
                iterations: 2,
                interval: FLASH_INTERVAL,
            },
        }
    }
}
