//! Game state and core simulation types
//!
//! Everything the update, menu, and render steps read or write lives in
//! [`GameState`]; there is no other mutable game data.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::consts::*;

/// Which mode the game loop is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Start/Quit menu
    Menu,
    /// Active gameplay
    Playing,
}

/// Currently highlighted menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuOption {
    #[default]
    Start,
    Quit,
}

impl MenuOption {
    /// The other entry (the menu only has two)
    pub fn toggled(self) -> Self {
        match self {
            MenuOption::Start => MenuOption::Quit,
            MenuOption::Quit => MenuOption::Start,
        }
    }
}

/// A side of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Horizontal direction the ball travels when this side serves
    pub fn serve_direction(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }
}

/// How the vertical velocity is chosen on a serve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServeStyle {
    /// Serve flat (no vertical component)
    #[default]
    Straight,
    /// Serve with a random whole-number vertical speed in `[-speed, speed]`
    Randomized,
}

/// Something that happened during a tick that the outside world may react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ball bounced off a wall
    WallHit,
    /// Ball bounced off a paddle
    PaddleHit { side: Side },
    /// Ball entered a goal zone; `scorer` gets the point
    Goal { scorer: Side },
}

/// A player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paddle {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Paddle {
    /// Paddle for a side, vertically centered
    pub fn for_side(side: Side) -> Self {
        let x = match side {
            Side::Left => PADDLE_INSET,
            Side::Right => SCREEN_WIDTH - PADDLE_INSET - PADDLE_WIDTH,
        };
        Self {
            x,
            y: SCREEN_HEIGHT / 2 - PADDLE_HEIGHT / 2,
            w: PADDLE_WIDTH,
            h: PADDLE_HEIGHT,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    /// Lowest y the paddle may reach while staying on screen
    pub fn max_y(&self) -> i32 {
        SCREEN_HEIGHT - self.h
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    /// Top-left corner of the bounding square
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: i32,
    /// Spin in degrees (visual only)
    pub angle: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Ball::center(),
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            angle: 0.0,
        }
    }
}

impl Ball {
    /// Serve position: horizontally centered, top edge on the midline
    pub fn center() -> Vec2 {
        Vec2::new(
            (SCREEN_WIDTH / 2 - BALL_RADIUS) as f32,
            (SCREEN_HEIGHT / 2) as f32,
        )
    }

    #[inline]
    pub fn diameter(&self) -> i32 {
        2 * self.radius
    }

    /// Bounding square, truncated to whole pixels
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.pos.x as i32,
            self.pos.y as i32,
            self.diameter(),
            self.diameter(),
        )
    }
}

/// Score pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scores {
    pub left: u32,
    pub right: u32,
}

impl Scores {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn award(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }
}

/// Fixed goal rectangle on a side wall
pub fn goal_zone(side: Side) -> Rect {
    let y = (SCREEN_HEIGHT - GOAL_HEIGHT) / 2;
    match side {
        Side::Left => Rect::new(0, y, GOAL_WIDTH, GOAL_HEIGHT),
        Side::Right => Rect::new(SCREEN_WIDTH - GOAL_WIDTH, y, GOAL_WIDTH, GOAL_HEIGHT),
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub mode: Mode,
    pub menu: MenuOption,
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
    pub ball: Ball,
    pub scores: Scores,
    pub left_goal: Rect,
    pub right_goal: Rect,
    /// Side that serves on the next reset
    pub serving: Side,
    pub serve_style: ServeStyle,
    /// Ticks left before the served ball starts moving
    pub serve_pause_ticks: u32,
    /// Simulation tick counter (gameplay ticks only)
    pub time_ticks: u64,
    /// Events produced since the loop last drained them
    pub events: Vec<GameEvent>,
    /// Seeded RNG for serve variation
    pub rng: Pcg32,
}

impl GameState {
    /// Fresh state sitting in the menu, left side to serve
    pub fn new(seed: u64) -> Self {
        Self {
            mode: Mode::Menu,
            menu: MenuOption::Start,
            left_paddle: Paddle::for_side(Side::Left),
            right_paddle: Paddle::for_side(Side::Right),
            ball: Ball::default(),
            scores: Scores::default(),
            left_goal: goal_zone(Side::Left),
            right_goal: goal_zone(Side::Right),
            serving: Side::Left,
            serve_style: ServeStyle::default(),
            serve_pause_ticks: 0,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn with_serve_style(mut self, style: ServeStyle) -> Self {
        self.serve_style = style;
        self
    }

    pub fn goal(&self, side: Side) -> &Rect {
        match side {
            Side::Left => &self.left_goal,
            Side::Right => &self.right_goal,
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left_paddle,
            Side::Right => &self.right_paddle,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left_paddle,
            Side::Right => &mut self.right_paddle,
        }
    }

    /// Take all pending events, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_serve_paused(&self) -> bool {
        self.serve_pause_ticks > 0
    }
}
