//! Start/Quit menu state machine

use super::state::{GameState, MenuOption, Mode, Scores};
use super::tick::reset_ball;

/// Menu navigation, produced from key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Up,
    Down,
    Confirm,
}

/// What the loop should do after a menu command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    /// Still in the menu
    Stay,
    /// Gameplay has begun
    Started,
    /// Player chose Quit
    Quit,
}

/// Apply a menu command.
///
/// Up and Down both flip the selection: with two entries the menu behaves
/// as a toggle rather than a list with a direction.
pub fn handle_menu(state: &mut GameState, command: MenuCommand) -> MenuOutcome {
    if state.mode != Mode::Menu {
        return MenuOutcome::Stay;
    }

    match command {
        MenuCommand::Up | MenuCommand::Down => {
            state.menu = state.menu.toggled();
            log::debug!("Menu selection: {:?}", state.menu);
            MenuOutcome::Stay
        }
        MenuCommand::Confirm => match state.menu {
            MenuOption::Start => {
                start_game(state);
                MenuOutcome::Started
            }
            MenuOption::Quit => {
                log::info!("Quit selected");
                MenuOutcome::Quit
            }
        },
    }
}

/// Leave the menu with fresh scores and a served ball
fn start_game(state: &mut GameState) {
    state.mode = Mode::Playing;
    state.scores = Scores::default();
    let server = state.serving;
    reset_ball(state, server);
    log::info!("Game started, {:?} serves", server);
}
