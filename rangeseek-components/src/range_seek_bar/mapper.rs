//! Conversions between screen x, normalized position and domain value.
//!
//! Three spaces are involved:
//!
//! - screen: pixel x relative to the widget's left edge
//! - normalized: a fraction in `[0, 1]` along the track
//! - domain: a value in `[absolute_min, absolute_max]`
//!
//! Every function here is pure; the seek bar passes in the current
//! [`ViewExtent`] and [`ValueRange`].

use super::layout::ViewExtent;

/// Decimal places kept when a normalized position becomes a domain value.
const VALUE_PRECISION: i32 = 2;

/// The bounds of the value domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Whether the range collapses to a single value.
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::new(0.0, 100.0)
    }
}

/// Screen x of a normalized position.
pub fn normalized_to_screen(normalized: f64, extent: &ViewExtent) -> f64 {
    extent.padding + normalized * extent.track_width()
}

/// Normalized position of a screen x, clamped to `[0, 1]`.
///
/// Returns `0.0` when the view is too narrow to have a track.
pub fn screen_to_normalized(screen_x: f64, extent: &ViewExtent) -> f64 {
    if !extent.has_track() {
        return 0.0;
    }
    let result = (screen_x - extent.padding) / extent.track_width();
    result.clamp(0.0, 1.0)
}

/// Domain value of a normalized position, rounded to hundredths.
pub fn normalized_to_value(normalized: f64, range: &ValueRange) -> f64 {
    let value = range.min + normalized * range.span();
    round_to_precision(value)
}

/// Normalized position of a domain value. Not clamped.
///
/// Returns `0.0` for a degenerate range.
pub fn value_to_normalized(value: f64, range: &ValueRange) -> f64 {
    if range.is_degenerate() {
        return 0.0;
    }
    (value - range.min) / range.span()
}

/// Snaps a normalized position to the nearest multiple of `1 / span`.
///
/// A step is one domain unit. Ranges narrower than one unit have no inner
/// step, so positions snap to the ends of the track. Degenerate ranges are
/// left untouched.
pub fn snap_to_step(normalized: f64, range: &ValueRange) -> f64 {
    let step_count = range.span().abs();
    if step_count == 0.0 || !step_count.is_finite() {
        return normalized;
    }
    ((normalized * step_count).round() / step_count).clamp(0.0, 1.0)
}

fn round_to_precision(value: f64) -> f64 {
    let scale = 10f64.powi(VALUE_PRECISION);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn extent() -> ViewExtent {
        ViewExtent::new(300.0, 48.0, 18.0)
    }

    #[test]
    fn screen_round_trip_is_identity() {
        let extent = extent();
        for i in 0..=100 {
            let n = i as f64 / 100.0;
            let back = screen_to_normalized(normalized_to_screen(n, &extent), &extent);
            assert!((back - n).abs() < EPSILON, "{n} -> {back}");
        }
    }

    #[test]
    fn screen_to_normalized_clamps_outside_track() {
        let extent = extent();
        assert_eq!(screen_to_normalized(0.0, &extent), 0.0);
        assert_eq!(screen_to_normalized(299.0, &extent), 1.0);
        assert_eq!(screen_to_normalized(-50.0, &extent), 0.0);
    }

    #[test]
    fn zero_width_view_maps_to_zero() {
        let narrow = ViewExtent::new(36.0, 48.0, 18.0);
        assert_eq!(screen_to_normalized(20.0, &narrow), 0.0);
        assert_eq!(screen_to_normalized(100.0, &ViewExtent::default()), 0.0);
    }

    #[test]
    fn track_ends_sit_on_padding() {
        let extent = extent();
        assert_eq!(normalized_to_screen(0.0, &extent), 18.0);
        assert_eq!(normalized_to_screen(1.0, &extent), 282.0);
    }

    #[test]
    fn value_round_trip_rounds_to_hundredths() {
        let range = ValueRange::new(-20.0, 80.0);
        for v in [-20.0, -3.14159, 0.0, 12.347, 33.333, 79.999, 80.0] {
            let back = normalized_to_value(value_to_normalized(v, &range), &range);
            let expected = (v * 100.0_f64).round() / 100.0;
            assert!((back - expected).abs() < EPSILON, "{v} -> {back}");
        }
    }

    #[test]
    fn normalized_to_value_rounds() {
        let range = ValueRange::new(0.0, 1.0);
        assert_eq!(normalized_to_value(0.12345, &range), 0.12);
        assert_eq!(normalized_to_value(0.999, &range), 1.0);
    }

    #[test]
    fn degenerate_range_maps_to_zero() {
        let range = ValueRange::new(5.0, 5.0);
        assert_eq!(value_to_normalized(42.0, &range), 0.0);
        assert_eq!(normalized_to_value(0.6, &range), 5.0);
    }

    #[test]
    fn value_to_normalized_does_not_clamp() {
        let range = ValueRange::new(0.0, 100.0);
        assert_eq!(value_to_normalized(150.0, &range), 1.5);
        assert_eq!(value_to_normalized(-50.0, &range), -0.5);
    }

    #[test]
    fn snap_uses_domain_units() {
        let range = ValueRange::new(0.0, 10.0);
        assert!((snap_to_step(0.34, &range) - 0.3).abs() < EPSILON);
        assert!((snap_to_step(0.36, &range) - 0.4).abs() < EPSILON);
    }

    #[test]
    fn sub_unit_range_snaps_to_track_ends() {
        let half = ValueRange::new(0.0, 0.5);
        assert_eq!(snap_to_step(0.37, &half), 0.0);
        assert_eq!(snap_to_step(0.99, &half), 0.0);
        assert_eq!(snap_to_step(1.0, &half), 1.0);
        let degenerate = ValueRange::new(3.0, 3.0);
        assert_eq!(snap_to_step(0.37, &degenerate), 0.37);
    }
}
