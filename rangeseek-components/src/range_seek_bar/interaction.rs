use rangeseek_ui::{PointerId, PxPosition, TouchAction, TouchEvent, TouchResponse};

use super::{
    RangeSeekBar, Thumb,
    mapper::{normalized_to_screen, screen_to_normalized, snap_to_step},
};

/// Above this `|dy| / |dx|` ratio a gesture is treated as a vertical scroll.
const AXIS_LOCK_RATIO: f64 = 1.0;

/// Where the seek bar is within a touch sequence.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    /// No touch sequence in progress.
    #[default]
    Idle,
    /// Finger is down; waiting for the first move to pick an axis.
    DecidingAxis,
    /// Horizontal gesture owned by the seek bar.
    Tracking,
    /// Vertical gesture left to the enclosing scroll container.
    PassThrough,
}

/// Bookkeeping for one touch sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    pub active_pointer: PointerId,
    /// Where the active pointer went down. `x` moves when another pointer
    /// takes over.
    pub down: PxPosition,
    pub axis_locked: bool,
    /// The touch slop was crossed.
    pub dragging: bool,
    /// The gesture turned out to be a scroll and is being ignored.
    pub ignored: bool,
}

impl GestureSession {
    fn new(active_pointer: PointerId, down: PxPosition) -> Self {
        Self {
            active_pointer,
            down,
            axis_locked: false,
            dragging: false,
            ignored: false,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub(super) struct GestureState {
    phase: GesturePhase,
    session: Option<GestureSession>,
}

impl GestureState {
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some_and(|session| session.dragging)
    }

    fn begin(session: GestureSession) -> Self {
        Self {
            phase: GesturePhase::DecidingAxis,
            session: Some(session),
        }
    }
}

impl RangeSeekBar {
    /// Feeds one touch event through the gesture state machine.
    ///
    /// Returns [`TouchResponse::PassThrough`] when the event should go to the
    /// enclosing scroll container instead: the seek bar is disabled, no sequence
    /// is active, or the sequence was recognised as a vertical scroll.
    #[tracing::instrument(level = "trace", skip(self, event), fields(action = ?event.action))]
    pub fn on_touch_event(&mut self, event: &TouchEvent) -> TouchResponse {
        if !self.args.enabled {
            return TouchResponse::PassThrough;
        }

        let phase = self.gesture.phase;
        let Some(session) = self.gesture.session else {
            return match event.action {
                TouchAction::Down => self.on_down(event),
                _ => TouchResponse::PassThrough,
            };
        };

        match (phase, event.action) {
            (_, TouchAction::Down) => {
                tracing::debug!("down without a preceding up, restarting gesture");
                self.finish_gesture();
                self.on_down(event)
            }
            (GesturePhase::PassThrough, action) => {
                if event.ends_sequence() {
                    tracing::trace!(?action, "ignored gesture ended");
                    if action == TouchAction::Up {
                        self.notify_values_changed();
                        self.notify_tracking_stopped();
                    }
                    self.finish_gesture();
                }
                TouchResponse::PassThrough
            }
            (_, TouchAction::PointerDown) => self.on_pointer_down(event, session),
            (_, TouchAction::PointerUp) => self.on_secondary_pointer_up(event, session),
            (GesturePhase::DecidingAxis, TouchAction::Move) => self.decide_axis(event, session),
            (_, TouchAction::Move) => self.on_move(event, session),
            (_, TouchAction::Up) => self.on_up(event, session),
            (_, TouchAction::Cancel) => self.on_cancel(session),
        }
    }

    /// Picks the thumb a touch at `touch_x` engages.
    ///
    /// Coincident thumbs are resolved by position when one of them sits at an
    /// end of the track; otherwise the result is [`Thumb::Unknown`] and the
    /// first move decides.
    pub fn eval_pressed_thumb(&self, touch_x: f64) -> Thumb {
        if self.args.single_thumb {
            return Thumb::Max;
        }
        let selection = self.selection;
        if selection.coincide() {
            if selection.normalized_max == 1.0 {
                return Thumb::Min;
            }
            if selection.normalized_min == 0.0 {
                return Thumb::Max;
            }
            return Thumb::Unknown;
        }
        let min_x = normalized_to_screen(selection.normalized_min, &self.extent);
        let max_x = normalized_to_screen(selection.normalized_max, &self.extent);
        if (touch_x - min_x).abs() < (touch_x - max_x).abs() {
            Thumb::Min
        } else {
            Thumb::Max
        }
    }

    fn on_down(&mut self, event: &TouchEvent) -> TouchResponse {
        let Some(pointer) = event.pointers.last() else {
            return TouchResponse::PassThrough;
        };
        let thumb = self.eval_pressed_thumb(pointer.position.x);
        tracing::debug!(?thumb, x = pointer.position.x, "touch down");
        self.gesture = GestureState::begin(GestureSession::new(pointer.id, pointer.position));
        self.pressed_thumb = Some(thumb);
        self.host.invalidate();
        TouchResponse::Consumed
    }

    fn decide_axis(&mut self, event: &TouchEvent, mut session: GestureSession) -> TouchResponse {
        let Some(position) = event.position(session.active_pointer) else {
            return TouchResponse::Consumed;
        };
        let dx = (position.x - session.down.x).abs();
        let dy = (position.y - session.down.y).abs();
        if dx == 0.0 && dy == 0.0 {
            return TouchResponse::Consumed;
        }

        let ratio_up_down = dy / dx;
        let ratio_left_right = dx / dy;
        session.axis_locked = true;
        if ratio_up_down > AXIS_LOCK_RATIO {
            tracing::debug!(ratio_up_down, "vertical gesture, passing through");
            session.ignored = true;
            self.gesture = GestureState {
                phase: GesturePhase::PassThrough,
                session: Some(session),
            };
            self.pressed_thumb = None;
            self.host.invalidate();
            return TouchResponse::PassThrough;
        }

        tracing::debug!(ratio_left_right, "horizontal gesture, tracking");
        self.gesture = GestureState {
            phase: GesturePhase::Tracking,
            session: Some(session),
        };
        self.on_move(event, session)
    }

    fn on_move(&mut self, event: &TouchEvent, mut session: GestureSession) -> TouchResponse {
        let Some(x) = event.x(session.active_pointer) else {
            return TouchResponse::Consumed;
        };

        if !session.dragging {
            if (x - session.down.x).abs() <= self.host.touch_slop() {
                return TouchResponse::Consumed;
            }
            session.dragging = true;
            self.gesture.session = Some(session);
            self.tracking_started();
        }

        self.track_touch(x, session.down.x);
        self.notify_tracking();
        if self.args.notify_while_dragging {
            self.notify_values_changed();
        }
        TouchResponse::Consumed
    }

    fn on_up(&mut self, event: &TouchEvent, session: GestureSession) -> TouchResponse {
        let x = event.x(session.active_pointer).unwrap_or(session.down.x);
        if !session.dragging {
            // Tap: the thumb nearest the down point follows the finger to where
            // it lifted.
            let thumb = self.eval_pressed_thumb(session.down.x);
            tracing::debug!(?thumb, "tap");
            self.pressed_thumb = Some(thumb);
        }
        self.track_touch(x, session.down.x);
        self.notify_values_changed();
        self.notify_tracking_stopped();
        self.finish_gesture();
        TouchResponse::Consumed
    }

    fn on_cancel(&mut self, session: GestureSession) -> TouchResponse {
        tracing::debug!(dragging = session.dragging, "gesture cancelled");
        if session.dragging {
            self.notify_values_changed();
        }
        self.notify_tracking_stopped();
        self.finish_gesture();
        TouchResponse::Consumed
    }

    fn on_pointer_down(&mut self, event: &TouchEvent, mut session: GestureSession) -> TouchResponse {
        if let Some(pointer) = event.action_pointer() {
            tracing::trace!(pointer = ?pointer.id, "pointer down takes over");
            session.active_pointer = pointer.id;
            session.down.x = pointer.position.x;
            self.gesture.session = Some(session);
        }
        self.host.invalidate();
        TouchResponse::Consumed
    }

    fn on_secondary_pointer_up(
        &mut self,
        event: &TouchEvent,
        mut session: GestureSession,
    ) -> TouchResponse {
        let leaving = event.action_pointer().map(|pointer| pointer.id);
        if leaving == Some(session.active_pointer) {
            let remaining = event
                .pointers
                .iter()
                .find(|pointer| Some(pointer.id) != leaving);
            if let Some(pointer) = remaining {
                tracing::trace!(pointer = ?pointer.id, "active pointer lifted, reassigning");
                session.active_pointer = pointer.id;
                session.down.x = pointer.position.x;
                self.gesture.session = Some(session);
            }
        }
        self.host.invalidate();
        TouchResponse::Consumed
    }

    fn tracking_started(&mut self) {
        tracing::debug!(thumb = ?self.pressed_thumb, "drag started");
        self.host.cancel_animations();
        self.host.claim_drag();
        self.host.invalidate();
    }

    /// Moves the pressed thumb to `x`. `down_x` resolves an ambiguous thumb by
    /// the direction of travel.
    fn track_touch(&mut self, x: f64, down_x: f64) {
        let mut normalized = screen_to_normalized(x, &self.extent);
        if self.args.use_steps_while_dragging {
            normalized = snap_to_step(normalized, &self.args.range());
        }

        if self.pressed_thumb == Some(Thumb::Unknown) {
            if x < down_x {
                self.pressed_thumb = Some(Thumb::Min);
            } else if x > down_x {
                self.pressed_thumb = Some(Thumb::Max);
            }
        }

        match self.pressed_thumb {
            Some(Thumb::Min) => self.set_normalized_min_value(normalized),
            Some(Thumb::Max) => self.set_normalized_max_value(normalized),
            Some(Thumb::Unknown) | None => {}
        }
    }

    pub(super) fn finish_gesture(&mut self) {
        self.gesture = GestureState::default();
        self.pressed_thumb = None;
        self.host.cancel_animations();
        self.host.invalidate();
    }
}
