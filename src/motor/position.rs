//! Position tracking for stepper motors.
//!
//! Keeps the raw step counter and the home offset it is reported against.

use crate::config::units::{Degrees, Steps};

/// Motor position tracker.
///
/// `counter` moves by exactly one per atomic step. Position relative to home
/// is `counter - home`. Counter arithmetic wraps at the ends of `i64`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Position {
    /// Accumulated steps since construction or the last home.
    counter: Steps,
    /// Counter value that reads as position zero.
    home: Steps,
}

impl Position {
    /// Create a new position tracker at zero.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw step counter.
    #[inline]
    pub fn counter(&self) -> Steps {
        self.counter
    }

    /// Home offset.
    #[inline]
    pub fn home(&self) -> Steps {
        self.home
    }

    /// Position relative to home, in steps.
    #[inline]
    pub fn steps(&self) -> Steps {
        self.counter - self.home
    }

    /// Position relative to home, in degrees.
    #[inline]
    pub fn degrees(&self, steps_per_revolution: f32) -> Degrees {
        self.steps().to_degrees(steps_per_revolution)
    }

    /// Overwrite the counter without touching home.
    #[inline]
    pub fn set_counter(&mut self, counter: Steps) {
        self.counter = counter;
    }

    /// Move by a number of steps.
    #[inline]
    pub fn move_steps(&mut self, delta: i64) {
        self.counter = Steps(self.counter.0.wrapping_add(delta));
    }

    /// Set current position as the new home.
    ///
    /// The counter itself is zeroed, so the absolute step history is dropped
    /// and `home` stays at zero.
    #[inline]
    pub fn set_home(&mut self) {
        self.counter = Steps::default();
        self.home = Steps::default();
    }

    /// Signed number of counter steps from here to `target`.
    ///
    /// Wraps like the counter, so the sign always points along the shorter
    /// way round the `i64` range.
    #[inline]
    pub fn steps_to(&self, target: Steps) -> i64 {
        target.0.wrapping_sub(self.counter.0)
    }
}
