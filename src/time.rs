//! Tick timing for the experience.
//!
//! One clock is the source of truth for elapsed time, delta time, and the
//! tick count. Uses `std::time` for high-precision timing with no external
//! dependencies.
//!
//! # Example
//!
//! ```ignore
//! use garland::time::Clock;
//!
//! let mut clock = Clock::new();
//!
//! // Once per rendered frame:
//! let (elapsed, delta) = clock.update();
//! ```
//!
//! With a fixed step the clock ignores the wall clock entirely and elapsed
//! time accumulates step by step, which is what makes tick-count-based
//! tests deterministic.

use std::time::Instant;

/// Tick clock for the animation loop.
#[derive(Debug)]
pub struct Clock {
    /// When the clock was created.
    start: Instant,
    /// When the last tick occurred.
    last_tick: Instant,
    /// Total elapsed time in seconds.
    elapsed_secs: f32,
    /// Time since the last tick in seconds.
    delta_secs: f32,
    /// Total ticks since start.
    tick_count: u64,
    /// Fixed step in seconds; when set, wall time is ignored.
    fixed_step: Option<f32>,
}

impl Clock {
    /// Create a clock starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            tick_count: 0,
            fixed_step: None,
        }
    }

    /// Create a clock that advances by a fixed step per update.
    pub fn fixed(step: f32) -> Self {
        let mut clock = Self::new();
        clock.fixed_step = Some(step);
        clock
    }

    /// Advance the clock. Call once per tick.
    ///
    /// Returns `(elapsed, delta)` for convenience.
    pub fn update(&mut self) -> (f32, f32) {
        let now = Instant::now();

        match self.fixed_step {
            Some(step) => {
                self.delta_secs = step;
                self.elapsed_secs += step;
            }
            None => {
                self.delta_secs = now.duration_since(self.last_tick).as_secs_f32();
                self.elapsed_secs = now.duration_since(self.start).as_secs_f32();
            }
        }
        self.last_tick = now;
        self.tick_count += 1;

        (self.elapsed_secs, self.delta_secs)
    }

    /// Total elapsed time in seconds since start.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Time since the last tick in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Total ticks since start.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.tick_count
    }

    /// Set or clear the fixed step.
    pub fn set_fixed_step(&mut self, step: Option<f32>) {
        self.fixed_step = step;
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn wall_clock_advances() {
        let mut clock = Clock::new();
        thread::sleep(Duration::from_millis(10));
        let (elapsed, delta) = clock.update();

        assert!(elapsed > 0.0);
        assert!(delta > 0.0);
        assert_eq!(clock.ticks(), 1);
    }

    #[test]
    fn fixed_step_ignores_wall_time() {
        let mut clock = Clock::fixed(1.0 / 60.0);
        thread::sleep(Duration::from_millis(20));
        clock.update();
        clock.update();

        assert!((clock.delta() - 1.0 / 60.0).abs() < 1e-6);
        assert!((clock.elapsed() - 2.0 / 60.0).abs() < 1e-6);
        assert_eq!(clock.ticks(), 2);
    }
}
