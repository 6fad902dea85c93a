//! Game simulation
//!
//! All gameplay logic lives here. No rendering, audio, or windowing:
//! the update step only mutates [`GameState`] and queues [`GameEvent`]s
//! for the loop to forward.

pub mod collision;
pub mod menu;
pub mod state;
pub mod tick;

pub use collision::{Rect, check_collision};
pub use menu::{MenuCommand, MenuOutcome, handle_menu};
pub use state::{
    Ball, GameEvent, GameState, MenuOption, Mode, Paddle, Scores, ServeStyle, Side, goal_zone,
};
pub use tick::{PaddleInput, TickInput, move_paddle, reset_ball, tick, update};
