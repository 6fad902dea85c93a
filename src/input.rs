//! Keyboard input
//!
//! Key presses drive the menu (edge-triggered); held keys drive the paddles
//! and are sampled once per tick (level-triggered).

use std::collections::HashSet;

use winit::keyboard::KeyCode;

use crate::sim::{MenuCommand, PaddleInput, TickInput};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    S,
    Up,
    Down,
    Enter,
}

/// Map a physical key to a game key
pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::KeyW => Some(Key::W),
        KeyCode::KeyS => Some(Key::S),
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::ArrowDown => Some(Key::Down),
        KeyCode::Enter | KeyCode::NumpadEnter => Some(Key::Enter),
        _ => None,
    }
}

/// Menu navigation for a pressed key
pub fn menu_command(key: Key) -> Option<MenuCommand> {
    match key {
        Key::Up => Some(MenuCommand::Up),
        Key::Down => Some(MenuCommand::Down),
        Key::Enter => Some(MenuCommand::Confirm),
        Key::W | Key::S => None,
    }
}

/// Currently held keys
#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Forget every held key (e.g. when the window loses focus)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Paddle input for this tick: W/S on the left, arrows on the right
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: PaddleInput {
                up: self.is_held(Key::W),
                down: self.is_held(Key::S),
            },
            right: PaddleInput {
                up: self.is_held(Key::Up),
                down: self.is_held(Key::Down),
            },
        }
    }
}
