//! Sequence puzzle state machine.
//!
//! Drives a multi-phase "press the lit targets, in any order, within a time
//! window" game. The engine owns all puzzle state and never reads a clock or
//! touches hardware: `now` is passed into [`PuzzleEngine::tick`], and each
//! tick reports the side effect the host must perform as a [`TickEvent`].
//!
//! Press callbacks only record into the press buffer; validation happens at
//! tick time, so a wrong button is caught on the next poll rather than at
//! press time.

use embassy_time::Instant;

use crate::Rgb;
use crate::combo::ComboLock;
use crate::config::{PhaseConfig, PuzzleConfig};
use crate::log::serial_log;
use crate::palette::LED_OFF;
use crate::rng::SplitMix64;
use crate::set::ButtonSet;

/// Fault kinds that restart the current stage.
///
/// Both are recovered identically and neither is fatal: only stage-local
/// progress is discarded, the phase and hit streak survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailKind {
    /// A recorded press is outside the current target set
    WrongPress,
    /// The stage stayed unsolved past the phase's allowed span
    Expired,
}

/// Outcome of a single poll tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Puzzle finished on an earlier tick; nothing to do
    Idle,
    /// Frame buffer refreshed; write it to the strip
    Render,
    /// Stage failed; play the error flash before the next tick
    Failed(FailKind),
    /// Combination pre-lock opened; play the short success flash
    Unlocked,
    /// Final phase reached; open the latch and play the success flash.
    /// Reported exactly once, after which every tick is `Idle`.
    Finished,
}

/// Puzzle state for `N` buttons.
pub struct PuzzleEngine<const N: usize> {
    config: PuzzleConfig,
    rng: SplitMix64,
    combo: Option<ComboLock<N>>,
    unlocked: bool,

    phase: usize,
    hit_streak: u8,
    stage_started: Option<Instant>,
    targets: ButtonSet<N>,
    presses: ButtonSet<N>,
    stage_colors: [Rgb; N],
    frame: [Rgb; N],
    finished: bool,
}

impl<const N: usize> PuzzleEngine<N> {
    /// Create an engine at phase 0 with no stage active.
    ///
    /// `seed` drives target and color picks; reuse a seed to replay the same
    /// stage sequence.
    pub fn new(config: PuzzleConfig, seed: u64) -> Self {
        Self {
            config,
            rng: SplitMix64::new(seed),
            combo: None,
            unlocked: true,
            phase: 0,
            hit_streak: 0,
            stage_started: None,
            targets: ButtonSet::new(),
            presses: ButtonSet::new(),
            stage_colors: [LED_OFF; N],
            frame: [LED_OFF; N],
            finished: false,
        }
    }

    /// Gate the puzzle behind a combination pre-lock.
    #[must_use]
    pub fn with_combo_lock(mut self, lock: ComboLock<N>) -> Self {
        self.unlocked = false;
        self.combo = Some(lock);
        self
    }

    /// Record a button press.
    ///
    /// Duplicates within a stage are ignored, as is anything after the
    /// puzzle has finished. While the pre-lock is closed the press cycles
    /// that button's combination color instead.
    pub fn record_press(&mut self, idx: u8) {
        if self.finished {
            return;
        }

        if !self.unlocked {
            if let Some(combo) = self.combo.as_mut() {
                serial_log!("combo press: {}", idx);
                combo.press(idx);
            }
            return;
        }

        if self.presses.insert(idx) {
            serial_log!("press recorded: {}", idx);
        }
    }

    /// Advance the state machine by one poll tick.
    ///
    /// Transitions are evaluated in strict priority order: finished,
    /// completion, pre-lock, stage start, wrong press, expiry, match,
    /// re-render.
    pub fn tick(&mut self, now: Instant) -> TickEvent {
        if self.finished {
            return TickEvent::Idle;
        }

        if self.phase >= self.config.final_phase {
            self.finished = true;
            self.frame = [LED_OFF; N];
            serial_log!("puzzle completed");
            return TickEvent::Finished;
        }

        if !self.unlocked {
            if let Some(combo) = self.combo.as_mut() {
                combo.paint(&mut self.frame);
                if combo.is_open() {
                    self.unlocked = true;
                    serial_log!("combination accepted");
                    return TickEvent::Unlocked;
                }
                return TickEvent::Render;
            }
            self.unlocked = true;
        }

        let Some(started) = self.stage_started else {
            self.begin_stage(now);
            return TickEvent::Render;
        };

        if self.has_stray_press() {
            serial_log!("press outside targets: restart stage");
            self.reset_stage();
            return TickEvent::Failed(FailKind::WrongPress);
        }

        if self.is_expired(started, now) {
            serial_log!("stage expired: restart stage");
            self.reset_stage();
            return TickEvent::Failed(FailKind::Expired);
        }

        if self.presses.matches(&self.targets) {
            self.advance_progress();
            self.begin_stage(now);
            return TickEvent::Render;
        }

        self.refresh_frame();
        TickEvent::Render
    }

    /// Current full-strip color assignment.
    pub fn frame(&self) -> &[Rgb] {
        &self.frame
    }

    /// Engine configuration.
    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    pub fn phase(&self) -> usize {
        self.phase
    }

    pub fn hit_streak(&self) -> u8 {
        self.hit_streak
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether the combination pre-lock has been opened (or was never set).
    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Targets of the current stage; empty while no stage is active.
    pub fn targets(&self) -> &ButtonSet<N> {
        &self.targets
    }

    /// Presses recorded since the current stage began.
    pub fn presses(&self) -> &ButtonSet<N> {
        &self.presses
    }

    /// Full reset to power-on state, pre-lock included.
    pub fn reset(&mut self) {
        self.reset_stage();
        self.phase = 0;
        self.hit_streak = 0;
        self.finished = false;
        if let Some(combo) = self.combo.as_mut() {
            combo.reset();
            self.unlocked = false;
        }
    }

    /// Generate a new target set, assign stage colors and start the clock.
    fn begin_stage(&mut self, now: Instant) {
        let cfg = self.config.phase(self.phase);
        let count = self.pick_target_count(&cfg);
        self.targets = ButtonSet::sample(&mut self.rng, count);
        self.assign_stage_colors(usize::from(cfg.palette_split));
        self.presses.clear();
        self.stage_started = Some(now);
        self.refresh_frame();
        serial_log!(
            "stage start: phase={} targets={}",
            self.phase,
            self.targets.len()
        );
    }

    /// Clear stage-local state. Phase and hit streak survive.
    fn reset_stage(&mut self) {
        self.targets.clear();
        self.presses.clear();
        self.stage_started = None;
        self.stage_colors = [LED_OFF; N];
        self.frame = [LED_OFF; N];
    }

    /// Number of targets for the next stage, clamped to `[1, N - 1]`.
    #[allow(clippy::cast_possible_truncation)]
    fn pick_target_count(&mut self, cfg: &PhaseConfig) -> usize {
        let cap = N.saturating_sub(1).max(1) as u32;
        let min = u32::from(cfg.targets_min).clamp(1, cap);
        let max = u32::from(cfg.targets_max).clamp(min, cap);
        self.rng.next_in(min, max) as usize
    }

    /// Valid colors for targets, decoy colors for the rest.
    #[allow(clippy::cast_possible_truncation)]
    fn assign_stage_colors(&mut self, split: usize) {
        for idx in 0..N {
            self.stage_colors[idx] = if self.targets.contains(idx as u8) {
                self.config.palette.valid_color(split, &mut self.rng)
            } else {
                self.config.palette.decoy_color(split, &mut self.rng)
            };
        }
    }

    /// Pressed buttons go dark, the rest keep their stage color.
    #[allow(clippy::cast_possible_truncation)]
    fn refresh_frame(&mut self) {
        for idx in 0..N {
            self.frame[idx] = if self.presses.contains(idx as u8) {
                LED_OFF
            } else {
                self.stage_colors[idx]
            };
        }
    }

    /// Whether any recorded press falls outside the current target set.
    fn has_stray_press(&self) -> bool {
        self.presses.iter().any(|&p| !self.targets.contains(p))
    }

    fn is_expired(&self, started: Instant, now: Instant) -> bool {
        let max_span = self.config.phase(self.phase).max_span;
        let elapsed = now.as_millis().saturating_sub(started.as_millis());
        elapsed > max_span.as_millis()
    }

    /// Count the stage clear; zero the streak and advance the phase once the
    /// requirement is met.
    fn advance_progress(&mut self) {
        self.hit_streak += 1;
        let required = self.config.phase(self.phase).required_streak;
        serial_log!("stage clear: streak={}/{}", self.hit_streak, required);

        if self.hit_streak >= required {
            self.hit_streak = 0;
            self.phase += 1;
        }
    }
}
