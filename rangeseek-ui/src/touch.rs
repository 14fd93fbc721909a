//! Raw touch events as delivered by the host toolkit.
//!
//! A touch sequence starts with [`TouchAction::Down`] and ends with
//! [`TouchAction::Up`] or [`TouchAction::Cancel`]. Extra fingers joining or
//! leaving in between arrive as [`TouchAction::PointerDown`] and
//! [`TouchAction::PointerUp`]; for those, [`TouchEvent::action_index`] names the
//! pointer that changed. Every event carries the current position of every
//! pointer still on the screen.
//!
//! # Example
//!
//! ```
//! use rangeseek_ui::{PointerId, TouchAction, TouchEvent};
//!
//! let down = TouchEvent::single(TouchAction::Down, PointerId(0), 40.0, 12.0);
//! assert_eq!(down.x(PointerId(0)), Some(40.0));
//! ```

use smallvec::{SmallVec, smallvec};

/// Identifier the host assigns to a finger for the duration of its contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u32);

/// Position in physical pixels relative to the widget's top-left corner.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PxPosition {
    pub x: f64,
    pub y: f64,
}

impl PxPosition {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The kind of change a [`TouchEvent`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    /// First finger touched the screen.
    Down,
    /// One or more fingers moved.
    Move,
    /// Last finger left the screen.
    Up,
    /// The sequence was aborted, usually because an ancestor took it over.
    Cancel,
    /// An additional finger touched the screen.
    PointerDown,
    /// A finger other than the last one left the screen.
    PointerUp,
}

/// A single finger and where it currently is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPointer {
    pub id: PointerId,
    pub position: PxPosition,
}

impl TouchPointer {
    pub const fn new(id: PointerId, x: f64, y: f64) -> Self {
        Self {
            id,
            position: PxPosition::new(x, y),
        }
    }
}

/// One touch event with a snapshot of all active pointers.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    pub action: TouchAction,
    pub pointers: SmallVec<[TouchPointer; 2]>,
    /// Index into `pointers` of the finger that went down or up. Only meaningful
    /// for [`TouchAction::PointerDown`] and [`TouchAction::PointerUp`].
    pub action_index: usize,
}

impl TouchEvent {
    /// Builds an event with one pointer.
    pub fn single(action: TouchAction, id: PointerId, x: f64, y: f64) -> Self {
        Self {
            action,
            pointers: smallvec![TouchPointer::new(id, x, y)],
            action_index: 0,
        }
    }

    /// Builds an event from a pointer snapshot.
    pub fn with_pointers(
        action: TouchAction,
        pointers: impl IntoIterator<Item = TouchPointer>,
        action_index: usize,
    ) -> Self {
        Self {
            action,
            pointers: pointers.into_iter().collect(),
            action_index,
        }
    }

    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Returns the index of a pointer in this event's snapshot.
    pub fn find_pointer_index(&self, id: PointerId) -> Option<usize> {
        self.pointers.iter().position(|pointer| pointer.id == id)
    }

    pub fn pointer(&self, id: PointerId) -> Option<&TouchPointer> {
        self.pointers.iter().find(|pointer| pointer.id == id)
    }

    /// The pointer that went down or up, for pointer-down/up actions.
    pub fn action_pointer(&self) -> Option<&TouchPointer> {
        self.pointers.get(self.action_index)
    }

    pub fn x(&self, id: PointerId) -> Option<f64> {
        self.pointer(id).map(|pointer| pointer.position.x)
    }

    pub fn position(&self, id: PointerId) -> Option<PxPosition> {
        self.pointer(id).map(|pointer| pointer.position)
    }

    /// Whether this event ends the touch sequence.
    pub fn ends_sequence(&self) -> bool {
        matches!(self.action, TouchAction::Up | TouchAction::Cancel)
    }
}

/// What a widget did with a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchResponse {
    /// The widget handled the event; ancestors should not act on it.
    Consumed,
    /// The widget declined the event; the enclosing scroll container may use it.
    PassThrough,
}

impl TouchResponse {
    pub fn is_consumed(self) -> bool {
        self == TouchResponse::Consumed
    }
}
