//! ULN2003 stepper driver.
//!
//! Generic over embedded-hal 1.0 output pins and delay provider.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::units::{Degrees, Steps};
use crate::error::{DriverError, Result};

use super::builder::StepperDriverBuilder;
use super::pattern::{CoilPattern, Direction, DriveMode};
use super::position::Position;

/// Steps per output revolution of a 28BYJ-48 in full-step or wave drive.
pub const DEFAULT_STEPS_PER_REVOLUTION: f32 = 2048.0;

/// Settle time after each coil write, in milliseconds.
pub const DEFAULT_DELAY_MS: u32 = 3;

/// Default direction inversion, matching the usual ULN2003 board wiring.
pub const DEFAULT_INVERT_ROTATION: bool = true;

/// Four-coil unipolar stepper driver.
///
/// Generic over:
/// - `P`: coil output pin type (must implement `OutputPin`)
/// - `D`: delay provider (must implement `DelayNs`)
///
/// Every motion call blocks for `steps * delay_ms` and needs `&mut self`, so
/// a driver is used from one thread of control at a time. Independent drivers
/// on distinct pins share nothing.
pub struct StepperDriver<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Coil outputs `in1..in4`, in that order.
    pins: [P; 4],

    /// Delay provider for coil settle time.
    delay: D,

    /// Pattern last written to the pins.
    pattern: CoilPattern,

    /// Last energized pattern. Stepping continues from here after a release.
    phase: CoilPattern,

    /// Derived from the initial pattern.
    drive_mode: DriveMode,

    /// Steps per output revolution.
    steps_per_revolution: f32,

    /// Delay after each coil write in milliseconds.
    delay_ms: u32,

    /// Step counter and home.
    position: Position,

    /// Whether requested directions are flipped before stepping.
    invert_rotation: bool,
}

impl<P, D> StepperDriver<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Create a driver on four coil pins with default timing.
    ///
    /// The pins must already be configured as outputs. Nothing is written to
    /// them until the first step, `energize` or `release`.
    ///
    /// # Errors
    ///
    /// Returns `DriverError::InvalidDriveSequence` if `initial_pattern` is not
    /// one of the four wave or four full-step patterns.
    pub fn new(
        in1: P,
        in2: P,
        in3: P,
        in4: P,
        delay: D,
        initial_pattern: CoilPattern,
    ) -> Result<Self> {
        Self::from_pins([in1, in2, in3, in4], delay, initial_pattern)
    }

    /// Create a driver from a pin array ordered `in1..in4`.
    ///
    /// # Errors
    ///
    /// Same as [`StepperDriver::new`].
    pub fn from_pins(pins: [P; 4], delay: D, initial_pattern: CoilPattern) -> Result<Self> {
        let drive_mode = DriveMode::classify(initial_pattern)
            .ok_or(DriverError::InvalidDriveSequence(initial_pattern))?;

        Ok(Self {
            pins,
            delay,
            pattern: initial_pattern,
            phase: initial_pattern,
            drive_mode,
            steps_per_revolution: DEFAULT_STEPS_PER_REVOLUTION,
            delay_ms: DEFAULT_DELAY_MS,
            position: Position::new(),
            invert_rotation: DEFAULT_INVERT_ROTATION,
        })
    }

    /// Start a builder.
    pub fn builder() -> StepperDriverBuilder<P, D> {
        StepperDriverBuilder::new()
    }

    /// Release the pins and delay provider.
    pub fn free(self) -> ([P; 4], D) {
        (self.pins, self.delay)
    }

    /// Write `pattern` to the coils in pin order, then wait the settle delay.
    fn apply_pattern(&mut self, pattern: CoilPattern) -> Result<()> {
        trace!("coils {}", pattern);
        for (pin, on) in self.pins.iter_mut().zip(pattern.coils()) {
            let written = if on { pin.set_high() } else { pin.set_low() };
            written.map_err(|_| DriverError::PinError)?;
        }

        if self.delay_ms > 0 {
            self.delay.delay_ms(self.delay_ms);
        }

        self.pattern = pattern;
        if !pattern.is_released() {
            self.phase = pattern;
        }
        Ok(())
    }

    /// Re-apply the current coil pattern.
    ///
    /// After a `release` this re-energizes the last pattern held before it.
    pub fn energize(&mut self) -> Result<()> {
        self.apply_pattern(self.phase)
    }

    /// De-energize all coils. Position is kept.
    pub fn release(&mut self) -> Result<()> {
        self.apply_pattern(CoilPattern::RELEASED)
    }

    /// Rotate the coils one step in the given counter direction.
    fn step_counted(&mut self, direction: Direction) -> Result<()> {
        let next = self.phase.rotated(direction);
        self.apply_pattern(next)?;
        self.position.move_steps(direction.sign());
        Ok(())
    }

    /// Take a single step.
    ///
    /// Only the sign of `direction` matters; zero counts as positive. Integers
    /// and floats both convert, so `-0.1` is one counter-clockwise step. The
    /// direction is flipped when rotation is inverted, and the step counter
    /// follows the flipped direction.
    pub fn step_once<T: Into<Direction>>(&mut self, direction: T) -> Result<()> {
        let direction = direction.into();
        let direction = if self.invert_rotation {
            direction.reversed()
        } else {
            direction
        };
        self.step_counted(direction)
    }

    /// Rotate a number of steps. May be negative or exceed one revolution.
    pub fn rotate_steps(&mut self, steps: i64) -> Result<()> {
        debug!("About to take {} steps.", steps);
        let direction = Direction::from_steps(steps);
        for _ in 0..steps.unsigned_abs() {
            self.step_once(direction)?;
        }
        Ok(())
    }

    /// Rotate by an angle, truncated to whole steps.
    pub fn rotate_deg(&mut self, degrees: Degrees) -> Result<()> {
        let steps = Steps::from_degrees(degrees, self.steps_per_revolution);
        debug!(
            "{} / 360deg ~ {} steps.",
            self.steps_per_revolution,
            steps.value()
        );
        self.rotate_steps(steps.value())
    }

    /// Current position relative to home, in steps.
    #[inline]
    pub fn position_steps(&self) -> Steps {
        self.position.steps()
    }

    /// Step until the position equals `target` steps from home.
    ///
    /// Each step goes toward the target in counter terms, whatever the
    /// inversion setting, so this always terminates.
    pub fn move_to_steps(&mut self, target: i64) -> Result<()> {
        let target = self.position.home() + Steps(target);
        debug!(
            "About to take {} steps to position {}.",
            self.position.steps_to(target),
            target.value()
        );
        while self.position.counter() != target {
            let direction = Direction::from_steps(self.position.steps_to(target));
            self.step_counted(direction)?;
        }
        Ok(())
    }

    /// Current position relative to home, in degrees.
    #[inline]
    pub fn position_deg(&self) -> Degrees {
        self.position.degrees(self.steps_per_revolution)
    }

    /// Move to an angle from home, truncated to whole steps.
    pub fn move_to_deg(&mut self, target: Degrees) -> Result<()> {
        let target_steps = Steps::from_degrees(target, self.steps_per_revolution);
        debug!(
            "{} * {} / 360 ~ {} steps.",
            target.value(),
            self.steps_per_revolution,
            target_steps.value()
        );
        self.move_to_steps(target_steps.value())
    }

    /// Raw step counter.
    #[inline]
    pub fn step_count(&self) -> Steps {
        self.position.counter()
    }

    /// Overwrite the step counter. The motor does not move.
    ///
    /// Any `i64` is accepted; stepping past either end of the range wraps.
    #[inline]
    pub fn set_step_count(&mut self, steps: i64) {
        self.position.set_counter(Steps(steps));
    }

    /// Make the current position home.
    ///
    /// The step counter is zeroed, so `position_steps` reads 0 afterwards and
    /// the previous absolute count is lost.
    #[inline]
    pub fn set_home(&mut self) {
        self.position.set_home();
    }

    /// Home offset subtracted from the counter when reporting position.
    #[inline]
    pub fn home_offset(&self) -> Steps {
        self.position.home()
    }

    /// Whether requested directions are inverted.
    #[inline]
    pub fn invert_rotation(&self) -> bool {
        self.invert_rotation
    }

    /// Set direction inversion. Depends on how the coils are wired.
    #[inline]
    pub fn set_invert_rotation(&mut self, invert: bool) {
        self.invert_rotation = invert;
    }

    /// Delay after each coil write in milliseconds.
    #[inline]
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Set the delay after each coil write. Shorter is faster but weaker.
    #[inline]
    pub fn set_delay_ms(&mut self, ms: u32) {
        self.delay_ms = ms;
    }

    /// Steps per output revolution.
    #[inline]
    pub fn steps_per_revolution(&self) -> f32 {
        self.steps_per_revolution
    }

    /// Set steps per output revolution.
    pub fn set_steps_per_revolution(&mut self, steps: f32) {
        if steps.is_nan() || steps <= 0.0 {
            warn!("steps per revolution {} is not positive", steps);
        }
        self.steps_per_revolution = steps;
    }

    /// Steps per degree of output rotation.
    #[inline]
    pub fn steps_per_degree(&self) -> f32 {
        self.steps_per_revolution / 360.0
    }

    /// Drive mode fixed at construction.
    #[inline]
    pub fn drive_mode(&self) -> DriveMode {
        self.drive_mode
    }

    /// Pattern last written to the coils.
    #[inline]
    pub fn pattern(&self) -> CoilPattern {
        self.pattern
    }
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use embedded_hal::digital::ErrorType;
    use embedded_hal_mock::eh1::delay::NoopDelay;

    use super::*;

    /// Pin that only remembers its level.
    #[derive(Default)]
    struct LevelPin(bool);

    impl ErrorType for LevelPin {
        type Error = Infallible;
    }

    impl OutputPin for LevelPin {
        fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
            self.0 = false;
            Ok(())
        }

        fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
            self.0 = true;
            Ok(())
        }
    }

    fn driver(pattern: [u8; 4]) -> StepperDriver<LevelPin, NoopDelay> {
        StepperDriver::from_pins(
            Default::default(),
            NoopDelay::new(),
            CoilPattern::from_bits(pattern),
        )
        .unwrap()
    }

    fn levels(driver: StepperDriver<LevelPin, NoopDelay>) -> [bool; 4] {
        let (pins, _) = driver.free();
        pins.map(|p| p.0)
    }

    #[test]
    fn test_defaults() {
        let d = driver([1, 1, 0, 0]);
        assert_eq!(d.step_count(), Steps(0));
        assert_eq!(d.home_offset(), Steps(0));
        assert!(d.invert_rotation());
        assert_eq!(d.delay_ms(), 3);
        assert_eq!(d.steps_per_revolution(), 2048.0);
        assert_eq!(d.drive_mode(), DriveMode::Full);
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let result: crate::Result<StepperDriver<LevelPin, NoopDelay>> = StepperDriver::from_pins(
            Default::default(),
            NoopDelay::new(),
            CoilPattern::from_bits([1, 1, 1, 0]),
        );
        assert!(matches!(
            result,
            Err(crate::Error::Driver(DriverError::InvalidDriveSequence(_)))
        ));
    }

    #[test]
    fn test_inverted_step_rotates_right() {
        let mut d = driver([1, 1, 0, 0]);
        d.step_once(1i64).unwrap();
        assert_eq!(d.pattern().bits(), [0, 1, 1, 0]);
        assert_eq!(d.step_count(), Steps(-1));
        assert_eq!(levels(d), [false, true, true, false]);
    }

    #[test]
    fn test_plain_step_rotates_left() {
        let mut d = driver([1, 0, 0, 0]);
        d.set_invert_rotation(false);
        d.step_once(1i64).unwrap();
        assert_eq!(d.pattern().bits(), [0, 0, 0, 1]);
        assert_eq!(d.step_count(), Steps(1));
    }

    #[test]
    fn test_zero_direction_steps_positive() {
        let mut d = driver([1, 0, 0, 0]);
        d.set_invert_rotation(false);
        d.step_once(0i64).unwrap();
        assert_eq!(d.step_count(), Steps(1));
    }

    #[test]
    fn test_release_then_step_resumes_phase() {
        let mut d = driver([0, 0, 1, 1]);
        d.set_invert_rotation(false);
        d.release().unwrap();
        assert!(d.pattern().is_released());

        d.step_once(1i64).unwrap();
        assert_eq!(d.pattern().bits(), [0, 1, 1, 0]);
        assert_eq!(d.step_count(), Steps(1));
    }

    #[test]
    fn test_energize_rewrites_current_pattern() {
        let mut d = driver([0, 1, 0, 0]);
        d.energize().unwrap();
        assert_eq!(d.step_count(), Steps(0));
        assert_eq!(levels(d), [false, true, false, false]);
    }

    #[test]
    fn test_move_to_steps_with_home() {
        let mut d = driver([1, 1, 0, 0]);
        d.rotate_steps(-25).unwrap();
        assert_eq!(d.position_steps(), Steps(25));
        d.set_home();
        d.move_to_steps(-7).unwrap();
        assert_eq!(d.position_steps(), Steps(-7));
        assert_eq!(d.step_count(), Steps(-7));
    }

    #[test]
    fn test_fractional_direction_step() {
        let mut d = driver([1, 1, 0, 0]);
        d.set_invert_rotation(false);
        d.step_once(-0.1f32).unwrap();
        assert_eq!(d.step_count(), Steps(-1));
        d.step_once(0.5f64).unwrap();
        assert_eq!(d.step_count(), Steps(0));
        assert_eq!(d.pattern().bits(), [1, 1, 0, 0]);
    }

    #[test]
    fn test_counter_at_range_end_keeps_stepping() {
        let mut d = driver([1, 1, 0, 0]);
        d.set_step_count(i64::MAX);
        // Inverted, so a negative request counts up and wraps
        d.rotate_steps(-1).unwrap();
        assert_eq!(d.step_count(), Steps(i64::MIN));

        d.move_to_steps(i64::MAX).unwrap();
        assert_eq!(d.step_count(), Steps(i64::MAX));
        assert_eq!(d.pattern().bits(), [1, 1, 0, 0]);
    }

    #[test]
    fn test_set_step_count_does_not_move() {
        let mut d = driver([1, 1, 0, 0]);
        d.set_step_count(1000);
        assert_eq!(d.step_count(), Steps(1000));
        assert_eq!(d.pattern().bits(), [1, 1, 0, 0]);
    }

    #[test]
    fn test_position_deg_query() {
        let mut d = driver([1, 1, 0, 0]);
        d.set_invert_rotation(false);
        d.rotate_deg(Degrees(90.0)).unwrap();
        assert_eq!(d.step_count(), Steps(512));
        assert!((d.position_deg().value() - 90.0).abs() < 0.01);
    }
}
