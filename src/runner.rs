//! Tick pacing and effector dispatch.
//!
//! Wires the engine to its outputs without async or platform timers. The
//! caller owns the loop and is responsible for sleeping between ticks.
//!
//! Error and success flashes are deliberately blocking: the prop has no
//! concurrent obligations during them, and the pause is part of the effect.

use embassy_time::{Duration, Instant};
use embedded_hal::delay::DelayNs;

use crate::engine::{PuzzleEngine, TickEvent};
use crate::palette::{FlashPattern, LED_OFF};
use crate::press::PressReceiver;
use crate::{LatchDriver, LedDriver};

/// Default poll period of the puzzle state machine (~20 Hz).
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(50);

/// Result of a tick operation.
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick (zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Puzzle runner: drains presses, steps the engine, drives the outputs.
///
/// # Usage
///
/// ```ignore
/// static PRESSES: PressChannel<16> = PressChannel::new();
///
/// let engine = PuzzleEngine::<8>::new(PuzzleConfig::default(), seed);
/// let mut runner = PuzzleRunner::new(engine, strip, relay, delay, PRESSES.receiver());
///
/// loop {
///     let result = runner.tick(Instant::from_millis(now_ms()));
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct PuzzleRunner<'a, L, K, D, const N: usize, const QUEUE: usize>
where
    L: LedDriver,
    K: LatchDriver,
    D: DelayNs,
{
    engine: PuzzleEngine<N>,
    leds: L,
    latch: K,
    delay: D,
    presses: PressReceiver<'a, QUEUE>,
    next_tick: Instant,
    period: Duration,
}

impl<'a, L, K, D, const N: usize, const QUEUE: usize> PuzzleRunner<'a, L, K, D, N, QUEUE>
where
    L: LedDriver,
    K: LatchDriver,
    D: DelayNs,
{
    /// Create a runner with the default tick period. The latch is engaged
    /// immediately.
    pub fn new(
        engine: PuzzleEngine<N>,
        leds: L,
        latch: K,
        delay: D,
        presses: PressReceiver<'a, QUEUE>,
    ) -> Self {
        Self::with_period(engine, leds, latch, delay, presses, DEFAULT_TICK_PERIOD)
    }

    /// Create a runner with a custom tick period.
    pub fn with_period(
        engine: PuzzleEngine<N>,
        leds: L,
        mut latch: K,
        delay: D,
        presses: PressReceiver<'a, QUEUE>,
        period: Duration,
    ) -> Self {
        latch.lock();
        Self {
            engine,
            leds,
            latch,
            delay,
            presses,
            next_tick: Instant::from_millis(0),
            period,
        }
    }

    /// Process one tick and return timing information.
    ///
    /// Drains pending presses, steps the engine and performs the side effect
    /// it reports. The caller is responsible for waiting until
    /// `next_deadline` before calling `tick` again.
    pub fn tick(&mut self, now: Instant) -> TickResult {
        // Drift correction: if we've fallen too far behind (a blocking flash,
        // a long stall), resync instead of bursting to catch up
        let max_drift_ms = self.period.as_millis() * 2;
        if now.as_millis() > self.next_tick.as_millis() + max_drift_ms {
            self.next_tick = now;
        }

        while let Ok(idx) = self.presses.try_receive() {
            self.engine.record_press(idx);
        }

        match self.engine.tick(now) {
            TickEvent::Idle => {}
            TickEvent::Render => self.leds.write(self.engine.frame()),
            TickEvent::Failed(_) => {
                let pattern = self.engine.config().error_flash;
                self.play_flash(pattern);
            }
            TickEvent::Unlocked => {
                let pattern = self.engine.config().unlock_flash;
                self.play_flash(pattern);
            }
            TickEvent::Finished => {
                let pattern = self.engine.config().success_flash;
                self.latch.open();
                self.play_flash(pattern);
            }
        }

        self.next_tick += self.period;

        let sleep_duration = if self.next_tick.as_millis() > now.as_millis() {
            Duration::from_millis(self.next_tick.as_millis() - now.as_millis())
        } else {
            Duration::from_millis(0)
        };

        TickResult {
            next_deadline: self.next_tick,
            sleep_duration,
        }
    }

    /// Blocking strip-wide flash. Runs to completion before returning;
    /// the drift correction in `tick` absorbs the lost time.
    fn play_flash(&mut self, pattern: FlashPattern) {
        let lit = [pattern.color; N];
        let dark = [LED_OFF; N];
        let edge_ms = u32::try_from(pattern.interval.as_millis()).unwrap_or(u32::MAX);

        for _ in 0..pattern.iterations {
            self.leds.write(&lit);
            self.delay.delay_ms(edge_ms);
            self.leds.write(&dark);
            self.delay.delay_ms(edge_ms);
        }
    }

    /// Get a reference to the engine.
    pub fn engine(&self) -> &PuzzleEngine<N> {
        &self.engine
    }

    /// Get a mutable reference to the engine.
    pub fn engine_mut(&mut self) -> &mut PuzzleEngine<N> {
        &mut self.engine
    }
}
