//! A dual-thumb range seek bar.
//!
//! ## Usage
//!
//! Let users pick a `[min, max]` sub-range of a numeric axis by dragging two
//! thumbs along a line, or a single value in single-thumb mode.
//!
//! ```
//! use rangeseek_components::range_seek_bar::{
//!     RangeSeekBar, RangeSeekBarArgs, layout::ViewExtent,
//! };
//! use rangeseek_ui::{PointerId, TouchAction, TouchEvent};
//!
//! let mut bar = RangeSeekBar::new(RangeSeekBarArgs::default().absolute_max(10.0));
//! bar.set_extent(ViewExtent::new(220.0, 40.0, 10.0));
//!
//! // Tap three tenths of the way along the track.
//! let x = 10.0 + 0.3 * 200.0;
//! bar.on_touch_event(&TouchEvent::single(TouchAction::Down, PointerId(0), x, 20.0));
//! bar.on_touch_event(&TouchEvent::single(TouchAction::Up, PointerId(0), x, 20.0));
//! assert_eq!(bar.selected_min_value(), 3.0);
//! ```
//!
//! The seek bar owns the selection and interprets touches. Drawing, layout and
//! persistence stay with the host toolkit, reached through [`SeekBarHost`],
//! [`render::Canvas`] and [`saved_state::StateBundle`].

use derive_setters::Setters;
use rangeseek_ui::{Callback, CallbackWith, Dp};

use interaction::GestureState;
use layout::ViewExtent;
use mapper::{
    ValueRange, normalized_to_screen, normalized_to_value, screen_to_normalized,
    value_to_normalized,
};

pub use interaction::{GesturePhase, GestureSession};

pub mod layout;
pub mod mapper;
pub mod render;
pub mod saved_state;

mod interaction;

/// Touch slop used when the host does not supply a platform value.
pub const DEFAULT_TOUCH_SLOP: Dp = Dp(8.0);

/// One of the two handles, or the ambiguous case where both sit on the same
/// spot and the touch position alone cannot tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Thumb {
    Min,
    Max,
    /// Both thumbs coincide; the first move decides (left means `Min`).
    Unknown,
}

/// The two thumb positions in normalized `[0, 1]` space.
///
/// `normalized_min <= normalized_max` holds after every mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionState {
    normalized_min: f64,
    normalized_max: f64,
}

impl SelectionState {
    pub fn normalized_min(&self) -> f64 {
        self.normalized_min
    }

    pub fn normalized_max(&self) -> f64 {
        self.normalized_max
    }

    fn coincide(&self) -> bool {
        self.normalized_min == self.normalized_max
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            normalized_min: 0.0,
            normalized_max: 1.0,
        }
    }
}

/// Configuration loaded by the host before the seek bar is shown.
///
/// With the `serde` feature the args deserialize from attribute maps; missing
/// fields take their [`Default`] values.
#[derive(Debug, Clone, PartialEq, Setters)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RangeSeekBarArgs {
    /// Lower bound of the value domain.
    pub absolute_min: f64,
    /// Upper bound of the value domain.
    pub absolute_max: f64,
    /// Show only the max thumb; the min thumb stays pinned at the start.
    pub single_thumb: bool,
    /// Smallest on-screen gap allowed between the two thumb centers.
    #[setters(into)]
    pub thumbs_min_distance: Dp,
    #[setters(into)]
    pub thumb_radius: Dp,
    /// Radius of the thumb currently held by the user.
    #[setters(into)]
    pub pressed_thumb_radius: Dp,
    #[setters(into)]
    pub line_height: Dp,
    /// Snap thumbs to whole domain units while they are dragged.
    pub use_steps_while_dragging: bool,
    /// Draw a dot at each whole domain unit.
    pub show_steps_as_dots: bool,
    /// Report `on_values_changed` on every drag move instead of only once the
    /// gesture ends.
    pub notify_while_dragging: bool,
    /// Disabled seek bars ignore touches.
    pub enabled: bool,
}

impl RangeSeekBarArgs {
    pub fn range(&self) -> ValueRange {
        ValueRange::new(self.absolute_min, self.absolute_max)
    }
}

impl Default for RangeSeekBarArgs {
    fn default() -> Self {
        Self {
            absolute_min: 0.0,
            absolute_max: 100.0,
            single_thumb: false,
            thumbs_min_distance: Dp::ZERO,
            thumb_radius: Dp(6.0),
            pressed_thumb_radius: Dp(10.0),
            line_height: Dp(2.0),
            use_steps_while_dragging: false,
            show_steps_as_dots: false,
            notify_while_dragging: false,
            enabled: true,
        }
    }
}

/// Receives selection updates from a [`RangeSeekBar`].
pub trait RangeSeekBarListener {
    /// The selection settled, or moved while notify-while-dragging is on.
    fn on_values_changed(&mut self, min: f64, max: f64);

    /// A thumb moved during a drag.
    fn on_tracking(&mut self, _min: f64, _max: f64) {}

    /// A gesture finished or was cancelled.
    fn on_tracking_stopped(&mut self) {}
}

/// Listener assembled from three closures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeSeekBarCallbacks {
    values_changed: CallbackWith<(f64, f64)>,
    tracking: CallbackWith<(f64, f64)>,
    tracking_stopped: Callback,
}

impl RangeSeekBarCallbacks {
    pub fn on_values_changed<F>(mut self, handler: F) -> Self
    where
        F: Fn(f64, f64) + Send + Sync + 'static,
    {
        self.values_changed = CallbackWith::new(move |(min, max)| handler(min, max));
        self
    }

    pub fn on_tracking<F>(mut self, handler: F) -> Self
    where
        F: Fn(f64, f64) + Send + Sync + 'static,
    {
        self.tracking = CallbackWith::new(move |(min, max)| handler(min, max));
        self
    }

    pub fn on_tracking_stopped<F>(mut self, handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.tracking_stopped = Callback::new(handler);
        self
    }
}

impl RangeSeekBarListener for RangeSeekBarCallbacks {
    fn on_values_changed(&mut self, min: f64, max: f64) {
        self.values_changed.call((min, max));
    }

    fn on_tracking(&mut self, min: f64, max: f64) {
        self.tracking.call((min, max));
    }

    fn on_tracking_stopped(&mut self) {
        self.tracking_stopped.call();
    }
}

/// Capabilities the seek bar needs from the view hosting it.
pub trait SeekBarHost {
    /// Schedule a redraw.
    fn invalidate(&mut self) {}

    /// Ask enclosing scroll containers to stop intercepting this touch
    /// sequence.
    fn claim_drag(&mut self) {}

    /// Stop thumb press and ripple animations.
    fn cancel_animations(&mut self) {}

    /// Distance in pixels a touch must travel before it counts as a drag.
    fn touch_slop(&self) -> f64 {
        DEFAULT_TOUCH_SLOP.to_pixels_f64()
    }
}

/// Host used until a real view is attached. Ignores every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedHost;

impl SeekBarHost for DetachedHost {}

/// A dual-thumb range selector.
pub struct RangeSeekBar {
    args: RangeSeekBarArgs,
    selection: SelectionState,
    extent: ViewExtent,
    pressed_thumb: Option<Thumb>,
    gesture: GestureState,
    listener: Option<Box<dyn RangeSeekBarListener>>,
    host: Box<dyn SeekBarHost>,
}

impl RangeSeekBar {
    pub fn new(args: RangeSeekBarArgs) -> Self {
        Self {
            args,
            selection: SelectionState::default(),
            extent: ViewExtent::default(),
            pressed_thumb: None,
            gesture: GestureState::default(),
            listener: None,
            host: Box::new(DetachedHost),
        }
    }

    pub fn with_host(mut self, host: impl SeekBarHost + 'static) -> Self {
        self.host = Box::new(host);
        self
    }

    pub fn with_listener(mut self, listener: impl RangeSeekBarListener + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn set_listener(&mut self, listener: impl RangeSeekBarListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    pub fn args(&self) -> &RangeSeekBarArgs {
        &self.args
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn extent(&self) -> ViewExtent {
        self.extent
    }

    /// Records the size assigned by the host's layout pass.
    pub fn set_extent(&mut self, extent: ViewExtent) {
        if self.extent != extent {
            tracing::trace!(?extent, "extent changed");
            self.extent = extent;
            self.host.invalidate();
        }
    }

    /// The thumb engaged by the current touch, if any.
    pub fn pressed_thumb(&self) -> Option<Thumb> {
        self.pressed_thumb
    }

    pub fn gesture_phase(&self) -> GesturePhase {
        self.gesture.phase()
    }

    /// Whether the current touch has moved past the touch slop.
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    pub fn set_range_values(&mut self, min: f64, max: f64) {
        if min > max {
            tracing::warn!(min, max, "range bounds are inverted");
        }
        self.args.absolute_min = min;
        self.args.absolute_max = max;
        self.host.invalidate();
    }

    pub fn absolute_min_value(&self) -> f64 {
        self.args.absolute_min
    }

    pub fn absolute_max_value(&self) -> f64 {
        self.args.absolute_max
    }

    pub fn selected_min_value(&self) -> f64 {
        normalized_to_value(self.selection.normalized_min, &self.args.range())
    }

    pub fn selected_max_value(&self) -> f64 {
        normalized_to_value(self.selection.normalized_max, &self.args.range())
    }

    pub fn set_selected_min_value(&mut self, value: f64) {
        let range = self.args.range();
        if range.is_degenerate() {
            self.set_normalized_min_value(0.0);
        } else {
            self.set_normalized_min_value(value_to_normalized(value, &range));
        }
    }

    pub fn set_selected_max_value(&mut self, value: f64) {
        let range = self.args.range();
        if range.is_degenerate() {
            self.set_normalized_max_value(1.0);
        } else {
            self.set_normalized_max_value(value_to_normalized(value, &range));
        }
    }

    /// Moves the thumbs back to the ends of the range.
    pub fn reset_selected_values(&mut self) {
        self.set_selected_min_value(self.args.absolute_min);
        self.set_selected_max_value(self.args.absolute_max);
    }

    pub fn set_single_thumb(&mut self, single_thumb: bool) {
        self.args.single_thumb = single_thumb;
        if single_thumb {
            self.set_normalized_min_value(0.0);
        } else {
            self.host.invalidate();
        }
    }

    pub fn set_use_steps_while_dragging(&mut self, enabled: bool) {
        self.args.use_steps_while_dragging = enabled;
    }

    pub fn set_show_steps_as_dots(&mut self, enabled: bool) {
        self.args.show_steps_as_dots = enabled;
        self.host.invalidate();
    }

    pub fn set_notify_while_dragging(&mut self, enabled: bool) {
        self.args.notify_while_dragging = enabled;
    }

    /// Changes the minimum thumb gap, given in pixels, and re-clamps the min
    /// thumb against it.
    pub fn set_thumbs_min_distance(&mut self, distance_px: f64) {
        self.args.thumbs_min_distance = Dp::from_pixels_f64(distance_px);
        let current = self.selection.normalized_min;
        self.set_normalized_min_value(current);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.args.enabled = enabled;
        if !enabled && self.gesture.phase() != GesturePhase::Idle {
            tracing::debug!("disabled during a gesture, dropping it");
            self.finish_gesture();
        }
    }

    /// Sets the min thumb, keeping it at least the minimum thumb distance left
    /// of the max thumb.
    pub fn set_normalized_min_value(&mut self, value: f64) {
        let requested = if self.args.single_thumb { 0.0 } else { value };
        // The pixel round trip can land a hair past the max thumb.
        let upper = self.min_upper_bound().min(self.selection.normalized_max);
        let next = requested.min(upper).clamp(0.0, 1.0);
        if next != requested {
            tracing::trace!(requested, next, "clamped min thumb");
        }
        self.selection.normalized_min = next;
        self.host.invalidate();
    }

    /// Sets the max thumb, keeping it at least the minimum thumb distance right
    /// of the min thumb.
    pub fn set_normalized_max_value(&mut self, value: f64) {
        let lower = self.max_lower_bound().max(self.selection.normalized_min);
        let next = value.max(lower).clamp(0.0, 1.0);
        if next != value {
            tracing::trace!(requested = value, next, "clamped max thumb");
        }
        self.selection.normalized_max = next;
        self.host.invalidate();
    }

    fn min_distance_px(&self) -> f64 {
        self.args.thumbs_min_distance.to_pixels_f64()
    }

    // Without a laid-out track or a gap there are no pixels to keep apart, so
    // only the ordering of the thumbs is enforced.
    fn min_upper_bound(&self) -> f64 {
        if !self.extent.has_track() || self.min_distance_px() <= 0.0 {
            return self.selection.normalized_max;
        }
        let max_x = normalized_to_screen(self.selection.normalized_max, &self.extent);
        screen_to_normalized(max_x - self.min_distance_px(), &self.extent)
    }

    fn max_lower_bound(&self) -> f64 {
        if self.args.single_thumb || !self.extent.has_track() || self.min_distance_px() <= 0.0 {
            return self.selection.normalized_min;
        }
        let min_x = normalized_to_screen(self.selection.normalized_min, &self.extent);
        screen_to_normalized(min_x + self.min_distance_px(), &self.extent)
    }

    fn notify_values_changed(&mut self) {
        let (min, max) = (self.selected_min_value(), self.selected_max_value());
        if let Some(listener) = self.listener.as_mut() {
            listener.on_values_changed(min, max);
        }
    }

    fn notify_tracking(&mut self) {
        let (min, max) = (self.selected_min_value(), self.selected_max_value());
        if let Some(listener) = self.listener.as_mut() {
            listener.on_tracking(min, max);
        }
    }

    fn notify_tracking_stopped(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener.on_tracking_stopped();
        }
    }
}

impl std::fmt::Debug for RangeSeekBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangeSeekBar")
            .field("args", &self.args)
            .field("selection", &self.selection)
            .field("extent", &self.extent)
            .field("pressed_thumb", &self.pressed_thumb)
            .field("gesture", &self.gesture)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Event {
        ValuesChanged(f64, f64),
        Tracking(f64, f64),
        TrackingStopped,
    }

    #[derive(Clone, Default)]
    pub struct Recorder(pub Arc<Mutex<Vec<Event>>>);

    impl Recorder {
        pub fn events(&self) -> Vec<Event> {
            self.0.lock().clone()
        }

        pub fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
            self.0.lock().iter().filter(|e| pred(e)).count()
        }
    }

    impl RangeSeekBarListener for Recorder {
        fn on_values_changed(&mut self, min: f64, max: f64) {
            self.0.lock().push(Event::ValuesChanged(min, max));
        }

        fn on_tracking(&mut self, min: f64, max: f64) {
            self.0.lock().push(Event::Tracking(min, max));
        }

        fn on_tracking_stopped(&mut self) {
            self.0.lock().push(Event::TrackingStopped);
        }
    }

    #[derive(Debug, Default)]
    pub struct HostLog {
        pub invalidations: usize,
        pub drag_claims: usize,
        pub animation_cancels: usize,
    }

    #[derive(Clone)]
    pub struct RecordingHost {
        pub log: Arc<Mutex<HostLog>>,
        pub slop: f64,
    }

    impl Default for RecordingHost {
        fn default() -> Self {
            Self {
                log: Arc::default(),
                slop: 8.0,
            }
        }
    }

    impl SeekBarHost for RecordingHost {
        fn invalidate(&mut self) {
            self.log.lock().invalidations += 1;
        }

        fn claim_drag(&mut self) {
            self.log.lock().drag_claims += 1;
        }

        fn cancel_animations(&mut self) {
            self.log.lock().animation_cancels += 1;
        }

        fn touch_slop(&self) -> f64 {
            self.slop
        }
    }

    /// 300px wide, 18px insets: the track spans x = 18..282.
    pub fn extent() -> ViewExtent {
        ViewExtent::new(300.0, 48.0, 18.0)
    }

    pub fn screen_x(normalized: f64) -> f64 {
        18.0 + normalized * 264.0
    }
}
