//! Selection persistence across view teardown and recreation.
//!
//! Only the two normalized thumb positions are saved. The absolute range is
//! configuration and comes back through [`RangeSeekBarArgs`](super::RangeSeekBarArgs).

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use super::RangeSeekBar;

/// Key of the normalized min thumb position.
pub const MIN_KEY: &str = "min";
/// Key of the normalized max thumb position.
pub const MAX_KEY: &str = "max";

/// Errors raised while reading saved state back from a bundle.
#[derive(Debug, Error, PartialEq)]
pub enum SavedStateError {
    #[error("saved state is missing `{key}`")]
    MissingField { key: &'static str },
    #[error("saved `{key}` is not a finite number: {value}")]
    NotFinite { key: &'static str, value: f64 },
}

/// Key/value container the host persists across recreation.
pub trait StateBundle {
    fn put_f64(&mut self, key: &str, value: f64);
    fn get_f64(&self, key: &str) -> Option<f64>;
}

impl StateBundle for HashMap<String, f64> {
    fn put_f64(&mut self, key: &str, value: f64) {
        self.insert(key.to_owned(), value);
    }

    fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).copied()
    }
}

impl StateBundle for BTreeMap<String, f64> {
    fn put_f64(&mut self, key: &str, value: f64) {
        self.insert(key.to_owned(), value);
    }

    fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).copied()
    }
}

/// The seek bar's saved selection nested with the host view's own state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SavedState<P> {
    pub parent: P,
    pub min: f64,
    pub max: f64,
}

impl<P> SavedState<P> {
    /// Writes the thumb positions into `bundle` under [`MIN_KEY`] and [`MAX_KEY`].
    pub fn write_to(&self, bundle: &mut impl StateBundle) {
        bundle.put_f64(MIN_KEY, self.min);
        bundle.put_f64(MAX_KEY, self.max);
    }

    /// Reads thumb positions from `bundle`, attaching the host's `parent` state.
    pub fn read_from(bundle: &impl StateBundle, parent: P) -> Result<Self, SavedStateError> {
        let min = read_finite(bundle, MIN_KEY)?;
        let max = read_finite(bundle, MAX_KEY)?;
        Ok(Self { parent, min, max })
    }
}

fn read_finite(bundle: &impl StateBundle, key: &'static str) -> Result<f64, SavedStateError> {
    let value = bundle
        .get_f64(key)
        .ok_or(SavedStateError::MissingField { key })?;
    if !value.is_finite() {
        return Err(SavedStateError::NotFinite { key, value });
    }
    Ok(value)
}

impl RangeSeekBar {
    /// Captures the selection alongside the host's own state.
    pub fn save_state<P>(&self, parent: P) -> SavedState<P> {
        SavedState {
            parent,
            min: self.selection.normalized_min,
            max: self.selection.normalized_max,
        }
    }

    /// Applies a saved selection and hands the host's state back.
    ///
    /// Values go through the clamped setters. The min thumb is parked at the
    /// start first so the restored max is not held up by the current min.
    pub fn restore_state<P>(&mut self, state: SavedState<P>) -> P {
        tracing::debug!(min = state.min, max = state.max, "restoring selection");
        self.set_normalized_min_value(0.0);
        self.set_normalized_max_value(state.max);
        self.set_normalized_min_value(state.min);
        state.parent
    }
}

#[cfg(test)]
mod tests {
    use super::super::{RangeSeekBarArgs, test_support::extent};
    use super::*;

    #[test]
    fn selection_survives_recreation() {
        let mut before = RangeSeekBar::new(RangeSeekBarArgs::default());
        before.set_extent(extent());
        before.set_normalized_max_value(0.8);
        before.set_normalized_min_value(0.3);

        let mut bundle: HashMap<String, f64> = HashMap::new();
        before.save_state(()).write_to(&mut bundle);

        let mut after = RangeSeekBar::new(RangeSeekBarArgs::default());
        let restored = SavedState::read_from(&bundle, "host").expect("bundle is complete");
        assert_eq!(after.restore_state(restored), "host");
        assert_eq!(after.selection(), before.selection());
        assert_eq!(after.selected_min_value(), 30.0);
    }

    #[test]
    fn missing_key_is_reported() {
        let mut bundle: BTreeMap<String, f64> = BTreeMap::new();
        bundle.put_f64(MIN_KEY, 0.1);
        let err = SavedState::read_from(&bundle, ()).unwrap_err();
        assert_eq!(err, SavedStateError::MissingField { key: MAX_KEY });
        assert_eq!(err.to_string(), "saved state is missing `max`");
    }

    #[test]
    fn non_finite_value_is_reported() {
        let mut bundle: HashMap<String, f64> = HashMap::new();
        bundle.put_f64(MIN_KEY, f64::NAN);
        bundle.put_f64(MAX_KEY, 0.5);
        assert!(matches!(
            SavedState::read_from(&bundle, ()),
            Err(SavedStateError::NotFinite { key: MIN_KEY, .. })
        ));
    }

    #[test]
    fn restored_values_are_clamped() {
        let mut bar = RangeSeekBar::new(RangeSeekBarArgs::default());
        bar.restore_state(SavedState {
            parent: (),
            min: 0.9,
            max: 0.4,
        });
        let selection = bar.selection();
        assert!(selection.normalized_min() <= selection.normalized_max());
        assert_eq!(selection.normalized_max(), 0.4);
        assert_eq!(selection.normalized_min(), 0.4);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serialized_layout_uses_stable_keys() {
        let state = SavedState {
            parent: 7u32,
            min: 0.25,
            max: 0.5,
        };
        let json = serde_json::to_value(&state).expect("serializable");
        assert_eq!(json, serde_json::json!({ "parent": 7, "min": 0.25, "max": 0.5 }));
        let back: SavedState<u32> = serde_json::from_value(json).expect("deserializable");
        assert_eq!(back, state);
    }
}
