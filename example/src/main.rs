//! Scripted walk-through of the range seek bar.
//!
//! Run with `RUST_LOG=rangeseek_components=debug` to see the gesture state
//! machine's decisions next to the listener output.

use std::sync::Arc;

use parking_lot::Mutex;
use rangeseek_components::range_seek_bar::{
    RangeSeekBar, RangeSeekBarArgs, RangeSeekBarCallbacks, SeekBarHost, layout::ViewExtent,
    render::DrawCommand,
};
use rangeseek_ui::{PointerId, TouchAction, TouchEvent, TouchPointer, dp, logging};

const FINGER: PointerId = PointerId(0);
const THUMB: PointerId = PointerId(1);
const Y: f64 = 36.0;

/// Host that records how often a redraw was requested.
#[derive(Clone, Default)]
struct DemoHost {
    frames: Arc<Mutex<usize>>,
}

impl SeekBarHost for DemoHost {
    fn invalidate(&mut self) {
        *self.frames.lock() += 1;
    }

    fn claim_drag(&mut self) {
        tracing::info!("seek bar claimed the drag from the scroll parent");
    }
}

fn main() {
    logging::init_tracing_with("info");
    dp::set_scale_factor(2.0);

    let host = DemoHost::default();
    let frames = Arc::clone(&host.frames);
    let callbacks = RangeSeekBarCallbacks::default()
        .on_values_changed(|min, max| tracing::info!(min, max, "values changed"))
        .on_tracking(|min, max| tracing::debug!(min, max, "tracking"))
        .on_tracking_stopped(|| tracing::info!("tracking stopped"));

    let mut bar = RangeSeekBar::new(
        RangeSeekBarArgs::default()
            .absolute_min(10.0)
            .absolute_max(30.0)
            .thumbs_min_distance(9.0)
            .show_steps_as_dots(true),
    )
    .with_host(host)
    .with_listener(callbacks);
    bar.set_extent(ViewExtent::new(720.0, 72.0, 36.0));

    let track = |normalized: f64| 36.0 + normalized * 648.0;
    let send = |bar: &mut RangeSeekBar, action: TouchAction, x: f64, y: f64| {
        let response = bar.on_touch_event(&TouchEvent::single(action, FINGER, x, y));
        tracing::debug!(?action, x, y, ?response, "sent");
    };

    tracing::info!("tap a quarter of the way in");
    send(&mut bar, TouchAction::Down, track(0.25), Y);
    send(&mut bar, TouchAction::Up, track(0.25), Y);

    tracing::info!("drag the max thumb to the middle");
    send(&mut bar, TouchAction::Down, track(1.0), Y);
    for step in 1..=4 {
        send(&mut bar, TouchAction::Move, track(1.0 - 0.125 * step as f64), Y);
    }
    send(&mut bar, TouchAction::Up, track(0.5), Y);

    tracing::info!("swipe vertically over the bar");
    send(&mut bar, TouchAction::Down, track(0.4), Y);
    send(&mut bar, TouchAction::Move, track(0.4) + 2.0, Y + 60.0);
    send(&mut bar, TouchAction::Cancel, track(0.4) + 2.0, Y + 60.0);

    tracing::info!("second finger takes over a drag");
    send(&mut bar, TouchAction::Down, track(0.25), Y);
    send(&mut bar, TouchAction::Move, track(0.15), Y);
    bar.on_touch_event(&TouchEvent::with_pointers(
        TouchAction::PointerDown,
        [
            TouchPointer::new(FINGER, track(0.15), Y),
            TouchPointer::new(THUMB, track(0.3), Y),
        ],
        1,
    ));
    bar.on_touch_event(&TouchEvent::with_pointers(
        TouchAction::Move,
        [
            TouchPointer::new(FINGER, track(0.15), Y),
            TouchPointer::new(THUMB, track(0.35), Y),
        ],
        1,
    ));
    bar.on_touch_event(&TouchEvent::single(TouchAction::Up, THUMB, track(0.35), Y));

    let saved = bar.save_state(());
    tracing::info!(
        min = bar.selected_min_value(),
        max = bar.selected_max_value(),
        saved_min = saved.min,
        saved_max = saved.max,
        frames = *frames.lock(),
        "final selection"
    );

    for command in bar.draw_commands() {
        match command {
            DrawCommand::Line {
                part,
                start_x,
                end_x,
                ..
            } => tracing::info!(?part, start_x, end_x, "line"),
            DrawCommand::Circle {
                part,
                center_x,
                radius,
                ..
            } => tracing::info!(?part, center_x, radius, "circle"),
        }
    }
}
