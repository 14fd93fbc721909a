//! Shared primitives for rangeseek widgets.
//!
//! This crate holds the pieces a widget core needs from its host toolkit
//! without depending on any particular toolkit:
//!
//! - [`Dp`] lengths and the process scale factor used to turn them into pixels
//! - identity-comparable callback handles ([`Callback`], [`CallbackWith`])
//! - the raw touch event model ([`TouchEvent`]) and the consumed/pass-through
//!   answer a widget gives back ([`TouchResponse`])
//! - [`logging::init_tracing`] for hosts and demos
//!
//! The widgets themselves live in `rangeseek-components`.

pub mod dp;
pub mod logging;
pub mod prop;
pub mod touch;

pub use crate::{
    dp::Dp,
    prop::{Callback, CallbackWith},
    touch::{PointerId, PxPosition, TouchAction, TouchEvent, TouchPointer, TouchResponse},
};
