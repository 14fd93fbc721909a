use super::{RangeSeekBarArgs, mapper::normalized_to_screen};

/// Pixel size of the widget as laid out by the host, plus the horizontal inset
/// reserved on each side of the track so thumbs at the ends stay inside the
/// view.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ViewExtent {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl ViewExtent {
    pub const fn new(width: f64, height: f64, padding: f64) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }

    /// Length of the track between the two insets. May be zero or negative
    /// before layout.
    pub fn track_width(&self) -> f64 {
        self.width - 2.0 * self.padding
    }

    /// Whether there is any track to map touches onto.
    pub fn has_track(&self) -> bool {
        self.width > 2.0 * self.padding
    }
}

/// Drawing geometry derived from the args and the current extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct SeekBarLayout {
    pub extent: ViewExtent,
    pub center_y: f64,
    pub line_height: f64,
    pub thumb_radius: f64,
    pub pressed_thumb_radius: f64,
    pub dot_radius: f64,
}

impl SeekBarLayout {
    pub fn resolve(args: &RangeSeekBarArgs, extent: ViewExtent) -> Self {
        let line_height = args.line_height.to_pixels_f64();
        Self {
            extent,
            center_y: extent.height / 2.0,
            line_height,
            thumb_radius: args.thumb_radius.to_pixels_f64(),
            pressed_thumb_radius: args.pressed_thumb_radius.to_pixels_f64(),
            dot_radius: line_height,
        }
    }

    pub fn track_start(&self) -> f64 {
        self.extent.padding
    }

    pub fn track_end(&self) -> f64 {
        self.extent.width - self.extent.padding
    }

    pub fn thumb_x(&self, normalized: f64) -> f64 {
        normalized_to_screen(normalized, &self.extent)
    }

    /// Screen x of each whole step, or nothing when the dots would overlap.
    pub fn step_dot_positions(&self, step_count: f64) -> Vec<f64> {
        if !self.extent.has_track() || !step_count.is_finite() || step_count < 1.0 {
            return Vec::new();
        }
        let steps = step_count.floor();
        let spacing = self.extent.track_width() / steps;
        if spacing < self.dot_radius * 2.0 {
            tracing::trace!(steps, spacing, "step dots do not fit, skipping");
            return Vec::new();
        }
        (0..=steps as usize)
            .map(|i| self.extent.padding + i as f64 * spacing)
            .collect()
    }
}
