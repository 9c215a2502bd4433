//! Depth and attempt counters.
//!
//! Counters arriving from untyped sources (floats, signed integers) are
//! normalised before use: NaN, infinities and negative values become zero.
//! Depths are additionally clamped to a ceiling.

use serde::{Deserialize, Serialize};

/// Default ceiling for solver chain depth.
pub const DEPTH_CEILING: u32 = 24;

/// Upper bound a configured depth ceiling is capped at.
pub const MAX_DEPTH_CEILING: u32 = 30;

/// Upper bound for a configured attempt ceiling.
pub const MAX_ATTEMPT_CEILING: u32 = 1_000;

fn normalize_f64(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    if value >= f64::from(u32::MAX) {
        return u32::MAX;
    }
    value.trunc() as u32
}

fn normalize_i64(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// Requested solver chain depth.
///
/// # Examples
///
/// ```
/// use routeforge_core::{Depth, DEPTH_CEILING};
///
/// assert_eq!(Depth::from_f64(f64::NAN).get(), 0);
/// assert_eq!(Depth::from_i64(-3).get(), 0);
/// assert_eq!(Depth::new(500).clamped(DEPTH_CEILING), DEPTH_CEILING);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Depth(u32);

impl Depth {
    #[inline]
    pub const fn new(depth: u32) -> Self {
        Depth(depth)
    }

    /// Non-finite and negative depths become zero.
    pub fn from_f64(depth: f64) -> Self {
        Depth(normalize_f64(depth))
    }

    /// Negative depths become zero.
    pub fn from_i64(depth: i64) -> Self {
        Depth(normalize_i64(depth))
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Depth clamped to `ceiling`, itself capped at [`MAX_DEPTH_CEILING`].
    pub fn clamped(self, ceiling: u32) -> u32 {
        self.0.min(ceiling.min(MAX_DEPTH_CEILING))
    }
}

impl From<u32> for Depth {
    fn from(depth: u32) -> Self {
        Depth(depth)
    }
}

/// Retry attempt counter.
///
/// # Examples
///
/// ```
/// use routeforge_core::Attempt;
///
/// assert_eq!(Attempt::from_f64(f64::INFINITY).get(), 0);
/// assert_eq!(Attempt::from_f64(2.7).get(), 2);
/// assert_eq!(Attempt::from_i64(-1).get(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attempt(u32);

impl Attempt {
    #[inline]
    pub const fn new(attempt: u32) -> Self {
        Attempt(attempt)
    }

    /// Non-finite and negative attempts become zero.
    pub fn from_f64(attempt: f64) -> Self {
        Attempt(normalize_f64(attempt))
    }

    /// Negative attempts become zero.
    pub fn from_i64(attempt: i64) -> Self {
        Attempt(normalize_i64(attempt))
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The following attempt, saturating.
    pub fn next(self) -> Self {
        Attempt(self.0.saturating_add(1))
    }
}

impl From<u32> for Attempt {
    fn from(attempt: u32) -> Self {
        Attempt(attempt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_normalisation() {
        assert_eq!(Depth::from_f64(f64::NEG_INFINITY).get(), 0);
        assert_eq!(Depth::from_f64(-0.5).get(), 0);
        assert_eq!(Depth::from_f64(5.9).get(), 5);
        assert_eq!(Depth::from_f64(1e20).get(), u32::MAX);
        assert_eq!(Depth::from_i64(i64::MAX).get(), u32::MAX);
        assert_eq!(Depth::from_i64(7).get(), 7);
    }

    #[test]
    fn test_depth_clamp() {
        assert_eq!(Depth::new(5).clamped(DEPTH_CEILING), 5);
        assert_eq!(Depth::new(DEPTH_CEILING + 100).clamped(DEPTH_CEILING), DEPTH_CEILING);
        // a configured ceiling never exceeds the hard cap
        assert_eq!(Depth::new(1000).clamped(1000), MAX_DEPTH_CEILING);
    }

    #[test]
    fn test_attempt_next_saturates() {
        assert_eq!(Attempt::new(3).next(), Attempt::new(4));
        assert_eq!(Attempt::new(u32::MAX).next(), Attempt::new(u32::MAX));
    }
}
