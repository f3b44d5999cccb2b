//! Discrete viewer commands produced by input backends
use std::f32::consts::{FRAC_PI_2, PI};

use crate::polyhedron::Axis;

/// Direction of a single movement step. `Toward` moves out of the screen
/// (+Z), `Away` into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    Toward,
    Away,
}

impl Direction {
    /// Heading in radians from +X for planar moves, `None` for depth moves.
    pub fn heading(self) -> Option<f32> {
        match self {
            Self::Right => Some(0.0),
            Self::Up => Some(FRAC_PI_2),
            Self::Left => Some(PI),
            Self::Down => Some(3.0 * FRAC_PI_2),
            Self::Toward | Self::Away => None,
        }
    }
}

/// Which mouse button is held while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragButton {
    /// Rotates the model.
    Primary,
    /// Pans the model.
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Signed rotation step, in the scene's native angle unit.
    Rotate { axis: Axis, delta: f32 },
    Move(Direction),
    /// Signed scale step.
    Scale(f32),
    /// Pointer motion in pixels with a button held.
    Drag { button: DragButton, dx: f32, dy: f32 },
    ToggleLight(usize),
    LightsFollowModel(bool),
    Reset,
    Exit,
}

/// Whether the event loop should keep going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}
