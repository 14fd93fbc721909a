//! Draw-command emission for the seek bar.
//!
//! The seek bar does not own paints or animations. It describes what to draw
//! in pixel coordinates and lets the host's [`Canvas`] pick colors and animate
//! the pressed radius.

use smallvec::SmallVec;

use super::{RangeSeekBar, Thumb, layout::SeekBarLayout};

/// Which part of the widget a primitive belongs to, so the host can pick a
/// paint for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    InactiveTrack,
    ActiveTrack,
    StepDot,
    Thumb(Thumb),
}

/// A single drawing primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Horizontal line with round caps.
    Line {
        part: Part,
        start_x: f64,
        end_x: f64,
        y: f64,
        thickness: f64,
    },
    Circle {
        part: Part,
        center_x: f64,
        center_y: f64,
        radius: f64,
        pressed: bool,
    },
}

/// Drawing surface supplied by the host.
pub trait Canvas {
    fn draw(&mut self, command: DrawCommand);
}

impl Canvas for Vec<DrawCommand> {
    fn draw(&mut self, command: DrawCommand) {
        self.push(command);
    }
}

impl RangeSeekBar {
    /// Draw commands for the current state, back to front.
    pub fn draw_commands(&self) -> SmallVec<[DrawCommand; 8]> {
        let layout = SeekBarLayout::resolve(&self.args, self.extent);
        let mut commands = SmallVec::new();
        if !self.extent.has_track() {
            return commands;
        }

        let y = layout.center_y;
        commands.push(DrawCommand::Line {
            part: Part::InactiveTrack,
            start_x: layout.track_start(),
            end_x: layout.track_end(),
            y,
            thickness: layout.line_height,
        });

        if self.args.show_steps_as_dots {
            for x in layout.step_dot_positions(self.args.range().span().abs()) {
                commands.push(DrawCommand::Circle {
                    part: Part::StepDot,
                    center_x: x,
                    center_y: y,
                    radius: layout.dot_radius,
                    pressed: false,
                });
            }
        }

        let min_x = if self.args.single_thumb {
            layout.track_start()
        } else {
            layout.thumb_x(self.selection.normalized_min)
        };
        let max_x = layout.thumb_x(self.selection.normalized_max);
        commands.push(DrawCommand::Line {
            part: Part::ActiveTrack,
            start_x: min_x,
            end_x: max_x,
            y,
            thickness: layout.line_height,
        });

        if !self.args.single_thumb {
            commands.push(self.thumb_command(&layout, Thumb::Min, min_x));
        }
        commands.push(self.thumb_command(&layout, Thumb::Max, max_x));
        commands
    }

    /// Emits [`RangeSeekBar::draw_commands`] onto a canvas.
    pub fn render(&self, canvas: &mut impl Canvas) {
        for command in self.draw_commands() {
            canvas.draw(command);
        }
    }

    fn thumb_command(&self, layout: &SeekBarLayout, thumb: Thumb, x: f64) -> DrawCommand {
        // An unresolved press highlights both thumbs.
        let pressed = match self.pressed_thumb {
            Some(Thumb::Unknown) => true,
            Some(pressed) => pressed == thumb,
            None => false,
        };
        let radius = if pressed {
            layout.pressed_thumb_radius
        } else {
            layout.thumb_radius
        };
        DrawCommand::Circle {
            part: Part::Thumb(thumb),
            center_x: x,
            center_y: layout.center_y,
            radius,
            pressed,
        }
    }
}
