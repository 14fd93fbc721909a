//! Widget cores built on `rangeseek-ui`.
//!
//! The crate currently ships one component, [`range_seek_bar`]: a line with two
//! circular thumbs that selects a `[min, max]` sub-range of a numeric axis.
//! Drawing, measurement and persistence containers belong to the host toolkit;
//! the component talks to them through [`range_seek_bar::SeekBarHost`],
//! [`range_seek_bar::render::Canvas`] and
//! [`range_seek_bar::saved_state::StateBundle`].

pub mod range_seek_bar;

pub use range_seek_bar::{
    RangeSeekBar, RangeSeekBarArgs, RangeSeekBarCallbacks, RangeSeekBarListener, SeekBarHost,
    Thumb,
};
