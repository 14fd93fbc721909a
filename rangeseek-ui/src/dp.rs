//! # Density-Independent Pixels (Dp)
//!
//! Widget dimensions that come from configuration (thumb radius, minimum thumb
//! distance, touch slop) are expressed in [`Dp`] so that they keep the same
//! physical size across screen densities. Touch coordinates arrive in physical
//! pixels, so every `Dp` is converted with the process-wide [`SCALE_FACTOR`]
//! before it meets the coordinate mapper.
//!
//! ## Usage
//!
//! ```
//! use rangeseek_ui::Dp;
//!
//! let slop = Dp(8.0);
//! let pixels = slop.to_pixels_f64();
//! assert!(pixels > 0.0);
//! ```

use std::sync::OnceLock;

use parking_lot::RwLock;

/// Pixels per dp for the current display. Unset means `1.0`.
pub static SCALE_FACTOR: OnceLock<RwLock<f64>> = OnceLock::new();

/// Sets the display scale factor used by every [`Dp`] conversion.
///
/// Non-finite or non-positive factors are ignored.
pub fn set_scale_factor(factor: f64) {
    if !factor.is_finite() || factor <= 0.0 {
        tracing::warn!(factor, "ignoring invalid scale factor");
        return;
    }
    let lock = SCALE_FACTOR.get_or_init(|| RwLock::new(1.0));
    *lock.write() = factor;
}

/// Returns the display scale factor, `1.0` when none was set.
pub fn scale_factor() -> f64 {
    SCALE_FACTOR.get().map(|lock| *lock.read()).unwrap_or(1.0)
}

/// A density-independent length.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dp(pub f64);

impl Dp {
    /// A constant representing zero dp.
    pub const ZERO: Self = Self(0.0);

    pub const fn new(value: f64) -> Self {
        Dp(value)
    }

    /// Converts to physical pixels with the current [`SCALE_FACTOR`].
    pub fn to_pixels_f64(&self) -> f64 {
        self.to_pixels_with(scale_factor())
    }

    /// Converts to physical pixels with an explicit scale factor.
    pub fn to_pixels_with(&self, scale_factor: f64) -> f64 {
        self.0 * scale_factor
    }

    /// Converts physical pixels back to dp with the current [`SCALE_FACTOR`].
    pub fn from_pixels_f64(value: f64) -> Self {
        Dp(value / scale_factor())
    }
}

impl From<f64> for Dp {
    fn from(value: f64) -> Self {
        Dp::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_scale_factor_multiplies() {
        assert_eq!(Dp(8.0).to_pixels_with(2.5), 20.0);
        assert_eq!(Dp::ZERO.to_pixels_with(3.0), 0.0);
    }

    #[test]
    fn from_f64_wraps_value() {
        let dp: Dp = 12.0.into();
        assert_eq!(dp, Dp(12.0));
    }
}
