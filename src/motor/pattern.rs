//! Coil patterns, drive modes and step direction.
//!
//! A ULN2003 board exposes one input per coil. A "pattern" is the set of
//! coils energized at once, and stepping rotates that set one coil along.

use core::fmt;

use serde::Deserialize;

/// Direction of a single step, before wiring inversion is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Clockwise (positive step count).
    Clockwise,
    /// Counter-clockwise (negative step count).
    CounterClockwise,
}

impl Direction {
    /// Get direction from signed step count.
    ///
    /// Zero maps to `Clockwise`.
    #[inline]
    pub fn from_steps(steps: i64) -> Self {
        if steps >= 0 {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    /// The opposite direction.
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

impl From<i64> for Direction {
    fn from(steps: i64) -> Self {
        Direction::from_steps(steps)
    }
}

impl From<i32> for Direction {
    fn from(steps: i32) -> Self {
        Direction::from_steps(steps as i64)
    }
}

impl From<f32> for Direction {
    /// Negative values are counter-clockwise; zero and NaN are clockwise.
    fn from(steps: f32) -> Self {
        if steps < 0.0 {
            Direction::CounterClockwise
        } else {
            Direction::Clockwise
        }
    }
}

impl From<f64> for Direction {
    fn from(steps: f64) -> Self {
        if steps < 0.0 {
            Direction::CounterClockwise
        } else {
            Direction::Clockwise
        }
    }
}

/// Coil drive strategy, derived from the initial pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveMode {
    /// One coil at a time. Lower torque, lower current.
    Wave,
    /// Two adjacent coils at a time. Higher torque, higher current.
    Full,
}

impl DriveMode {
    /// Classify a pattern, or `None` if it is neither wave nor full-step.
    pub fn classify(pattern: CoilPattern) -> Option<Self> {
        if CoilPattern::WAVE.contains(&pattern) {
            Some(DriveMode::Wave)
        } else if CoilPattern::FULL.contains(&pattern) {
            Some(DriveMode::Full)
        } else {
            None
        }
    }

    /// Number of coils energized at once.
    pub fn active_coils(self) -> usize {
        match self {
            DriveMode::Wave => 1,
            DriveMode::Full => 2,
        }
    }
}

/// Energized state of the four coils, in pin order `in1..in4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoilPattern([bool; 4]);

impl CoilPattern {
    /// All coils off.
    pub const RELEASED: Self = Self([false; 4]);

    /// The four single-coil rotations.
    pub const WAVE: [Self; 4] = [
        Self([true, false, false, false]),
        Self([false, true, false, false]),
        Self([false, false, true, false]),
        Self([false, false, false, true]),
    ];

    /// The four adjacent-pair rotations.
    pub const FULL: [Self; 4] = [
        Self([true, true, false, false]),
        Self([false, true, true, false]),
        Self([false, false, true, true]),
        Self([true, false, false, true]),
    ];

    /// First full-step pattern, used when nothing else is configured.
    pub const DEFAULT: Self = Self::FULL[0];

    /// Create from coil states.
    #[inline]
    pub const fn new(coils: [bool; 4]) -> Self {
        Self(coils)
    }

    /// Create from 0/1 values. Any non-zero value counts as energized.
    #[inline]
    pub const fn from_bits(bits: [u8; 4]) -> Self {
        Self([bits[0] != 0, bits[1] != 0, bits[2] != 0, bits[3] != 0])
    }

    /// Coil states as 0/1 values.
    #[inline]
    pub fn bits(self) -> [u8; 4] {
        self.0.map(u8::from)
    }

    /// Coil states.
    #[inline]
    pub fn coils(self) -> [bool; 4] {
        self.0
    }

    /// Number of energized coils.
    #[inline]
    pub fn active_coils(self) -> usize {
        self.0.iter().filter(|&&on| on).count()
    }

    /// Whether every coil is off.
    #[inline]
    pub fn is_released(self) -> bool {
        self == Self::RELEASED
    }

    /// Pattern one step further in `direction`.
    ///
    /// `Clockwise` shifts the energized coils toward `in1`, wrapping around.
    pub fn rotated(self, direction: Direction) -> Self {
        let mut coils = self.0;
        match direction {
            Direction::Clockwise => coils.rotate_left(1),
            Direction::CounterClockwise => coils.rotate_right(1),
        }
        Self(coils)
    }
}

impl fmt::Display for CoilPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.bits();
        write!(f, "[{}, {}, {}, {}]", a, b, c, d)
    }
}

impl<'de> Deserialize<'de> for CoilPattern {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = <[u8; 4]>::deserialize(deserializer)?;
        if bits.iter().any(|&b| b > 1) {
            return Err(serde::de::Error::custom("coil pattern values must be 0 or 1"));
        }
        Ok(CoilPattern::from_bits(bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_valid_patterns() {
        for pattern in CoilPattern::WAVE {
            assert_eq!(DriveMode::classify(pattern), Some(DriveMode::Wave));
        }
        for pattern in CoilPattern::FULL {
            assert_eq!(DriveMode::classify(pattern), Some(DriveMode::Full));
        }
    }

    #[test]
    fn test_classify_rejects_everything_else() {
        let mut rejected = 0;
        for raw in 0u8..16 {
            let bits = [raw & 1, (raw >> 1) & 1, (raw >> 2) & 1, (raw >> 3) & 1];
            let pattern = CoilPattern::from_bits(bits);
            if DriveMode::classify(pattern).is_none() {
                rejected += 1;
                assert!(!CoilPattern::WAVE.contains(&pattern));
                assert!(!CoilPattern::FULL.contains(&pattern));
            }
        }
        // 16 patterns, 8 valid
        assert_eq!(rejected, 8);
    }

    #[test]
    fn test_rotation_direction() {
        let p = CoilPattern::from_bits([1, 1, 0, 0]);
        assert_eq!(p.rotated(Direction::Clockwise).bits(), [1, 0, 0, 1]);
        assert_eq!(p.rotated(Direction::CounterClockwise).bits(), [0, 1, 1, 0]);
    }

    #[test]
    fn test_four_rotations_is_identity() {
        for start in CoilPattern::WAVE.iter().chain(CoilPattern::FULL.iter()) {
            let mut p = *start;
            for _ in 0..4 {
                p = p.rotated(Direction::CounterClockwise);
                assert_eq!(p.active_coils(), start.active_coils());
            }
            assert_eq!(p, *start);
        }
    }

    #[test]
    fn test_zero_direction_is_clockwise() {
        assert_eq!(Direction::from(0i64), Direction::Clockwise);
        assert_eq!(Direction::from(-3i32), Direction::CounterClockwise);
        assert_eq!(Direction::Clockwise.reversed().sign(), -1);
    }

    #[test]
    fn test_fractional_direction_uses_sign() {
        assert_eq!(Direction::from(-0.1f32), Direction::CounterClockwise);
        assert_eq!(Direction::from(0.0f32), Direction::Clockwise);
        assert_eq!(Direction::from(-0.0f32), Direction::Clockwise);
        assert_eq!(Direction::from(0.999f64), Direction::Clockwise);
        assert_eq!(Direction::from(f32::NAN), Direction::Clockwise);
        assert_eq!(Direction::from(f64::NEG_INFINITY), Direction::CounterClockwise);
    }
}
