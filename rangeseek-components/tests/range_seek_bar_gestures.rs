use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use parking_lot::Mutex;
use rangeseek_components::range_seek_bar::{
    RangeSeekBar, RangeSeekBarArgs, RangeSeekBarCallbacks, SeekBarHost, Thumb,
    layout::ViewExtent,
    mapper::{ValueRange, normalized_to_value, value_to_normalized},
    saved_state::SavedState,
};
use rangeseek_ui::{Dp, PointerId, TouchAction, TouchEvent, TouchResponse};

const FINGER: PointerId = PointerId(0);
const Y: f64 = 24.0;

fn x_at(normalized: f64) -> f64 {
    18.0 + normalized * 264.0
}

fn send(bar: &mut RangeSeekBar, action: TouchAction, x: f64) -> TouchResponse {
    bar.on_touch_event(&TouchEvent::single(action, FINGER, x, Y))
}

#[derive(Clone, Default)]
struct ScrollParent {
    claimed: Arc<AtomicUsize>,
}

impl SeekBarHost for ScrollParent {
    fn claim_drag(&mut self) {
        self.claimed.fetch_add(1, Ordering::SeqCst);
    }

    fn touch_slop(&self) -> f64 {
        Dp(4.0).to_pixels_with(2.0)
    }
}

#[test]
fn absolute_bounds_round_trip_through_setter() {
    let mut bar = RangeSeekBar::new(RangeSeekBarArgs::default());
    bar.set_range_values(0.0, 100.0);
    assert_eq!(bar.absolute_min_value(), 0.0);
    assert_eq!(bar.absolute_max_value(), 100.0);
}

#[test]
fn closure_listener_sees_drag_then_settle() {
    let settled = Arc::new(Mutex::new(Vec::new()));
    let tracked = Arc::new(AtomicUsize::new(0));
    let stopped = Arc::new(AtomicUsize::new(0));

    let callbacks = {
        let settled = Arc::clone(&settled);
        let tracked = Arc::clone(&tracked);
        let stopped = Arc::clone(&stopped);
        RangeSeekBarCallbacks::default()
            .on_values_changed(move |min, max| settled.lock().push((min, max)))
            .on_tracking(move |_, _| {
                tracked.fetch_add(1, Ordering::SeqCst);
            })
            .on_tracking_stopped(move || {
                stopped.fetch_add(1, Ordering::SeqCst);
            })
    };

    let parent = ScrollParent::default();
    let claimed = Arc::clone(&parent.claimed);
    let mut bar = RangeSeekBar::new(RangeSeekBarArgs::default().thumbs_min_distance(18.0))
        .with_listener(callbacks)
        .with_host(parent);
    bar.set_extent(ViewExtent::new(300.0, 48.0, 18.0));

    // Drag the max thumb from the end past the min thumb.
    assert_eq!(send(&mut bar, TouchAction::Down, x_at(1.0)), TouchResponse::Consumed);
    assert_eq!(bar.pressed_thumb(), Some(Thumb::Max));
    for step in 1..=5 {
        send(&mut bar, TouchAction::Move, x_at(1.0 - 0.25 * step as f64));
    }
    send(&mut bar, TouchAction::Up, x_at(0.0));

    // The max thumb stops one thumb distance right of the min thumb.
    let expected_max = normalized_to_value(18.0 / 264.0, &ValueRange::new(0.0, 100.0));
    assert_eq!(settled.lock().as_slice(), &[(0.0, expected_max)]);
    assert_eq!(tracked.load(Ordering::SeqCst), 5);
    assert_eq!(stopped.load(Ordering::SeqCst), 1);
    assert_eq!(claimed.load(Ordering::SeqCst), 1);
}

#[test]
fn vertical_swipe_leaves_selection_to_the_scroll_parent() {
    let mut bar = RangeSeekBar::new(RangeSeekBarArgs::default());
    bar.set_extent(ViewExtent::new(300.0, 48.0, 18.0));
    bar.set_selected_min_value(20.0);

    send(&mut bar, TouchAction::Down, x_at(0.2));
    let response = bar.on_touch_event(&TouchEvent::single(
        TouchAction::Move,
        FINGER,
        x_at(0.2) + 1.0,
        Y + 40.0,
    ));
    assert_eq!(response, TouchResponse::PassThrough);
    send(&mut bar, TouchAction::Cancel, x_at(0.2));

    assert_eq!(bar.selected_min_value(), 20.0);
    assert_eq!(bar.pressed_thumb(), None);
}

#[test]
fn selection_survives_save_and_restore() {
    let args = RangeSeekBarArgs::default()
        .absolute_min(-50.0)
        .absolute_max(50.0);
    let mut bar = RangeSeekBar::new(args.clone());
    bar.set_extent(ViewExtent::new(300.0, 48.0, 18.0));
    send(&mut bar, TouchAction::Down, x_at(0.1));
    send(&mut bar, TouchAction::Up, x_at(0.1));
    let min_before = bar.selected_min_value();

    let mut bundle: HashMap<String, f64> = HashMap::new();
    bar.save_state(()).write_to(&mut bundle);
    drop(bar);

    let mut recreated = RangeSeekBar::new(args);
    let saved = SavedState::read_from(&bundle, ()).expect("complete bundle");
    recreated.restore_state(saved);
    assert_eq!(recreated.selected_min_value(), min_before);
    assert_eq!(recreated.selected_max_value(), 50.0);
}

#[test]
fn value_mapping_is_inverse_up_to_rounding() {
    let range = ValueRange::new(3.0, 11.5);
    let mut v = range.min;
    while v <= range.max {
        let back = normalized_to_value(value_to_normalized(v, &range), &range);
        assert!((back - (v * 100.0).round() / 100.0).abs() < 1e-9, "{v} -> {back}");
        v += 0.1731;
    }
}
