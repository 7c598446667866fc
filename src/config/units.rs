//! Unit types for physical quantities.
//!
//! Provides type-safe representations of angles and motor steps to prevent
//! unit confusion at compile time.

use core::ops::{Add, Sub};

/// Angular position in degrees.
///
/// Used for the user-facing API. Internally converted to [`Steps`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Degrees(pub f32);

impl Degrees {
    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

/// Motor position or distance in whole steps.
///
/// Uses i64 for unlimited range in either direction. Arithmetic wraps at the
/// ends of that range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Steps(pub i64);

impl Steps {
    /// Create a new Steps value.
    #[inline]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Get absolute value as u64.
    #[inline]
    pub fn abs(self) -> u64 {
        self.0.unsigned_abs()
    }

    /// Truncate a fractional step count toward zero.
    ///
    /// Non-finite input saturates the same way an `as` cast does.
    #[inline]
    pub fn truncate(steps: f64) -> Self {
        Self(libm::trunc(steps) as i64)
    }

    /// Convert to degrees using a steps-per-revolution ratio.
    ///
    /// Computed in f64 and narrowed once at the end.
    #[inline]
    pub fn to_degrees(self, steps_per_revolution: f32) -> Degrees {
        let steps_per_degree = f64::from(steps_per_revolution) / 360.0;
        Degrees((self.0 as f64 / steps_per_degree) as f32)
    }

    /// Create from degrees, truncating toward zero.
    ///
    /// Computed as `degrees * steps_per_revolution / 360` in f64, so whole
    /// fractions of a turn land on exact step counts and the product stays
    /// exact far beyond the f32 mantissa.
    #[inline]
    pub fn from_degrees(degrees: Degrees, steps_per_revolution: f32) -> Self {
        Self::truncate(f64::from(degrees.0) * f64::from(steps_per_revolution) / 360.0)
    }
}

impl Add for Steps {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for Steps {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.wrapping_sub(rhs.0))
    }
}
