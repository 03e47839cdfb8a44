//! Boundary between the game model and whatever draws it.

use crate::geometry::Obstacle;
use crate::motion::Actor;
use crate::session::{Goal, Layout};

/// Snapshot handed to the renderer once per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameView {
    pub actor: Actor,
    pub goal: Goal,
    /// Joystick handle centre in joystick-local pixels.
    pub handle: (f64, f64),
    pub won: bool,
}

pub trait RenderSink {
    /// Called after every (re)start with the new maze.
    fn draw_maze(&mut self, layout: &Layout, obstacles: &[Obstacle]);
    fn draw_frame(&mut self, frame: &FrameView);
    /// Called once per round, on the tick the goal is reached.
    fn show_win(&mut self, message: &str);
    fn hide_win(&mut self);
}
