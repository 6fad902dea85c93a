//! Pong Goal entry point
//!
//! Sets up logging, settings and audio, then hands control to the winit
//! event loop until the player quits or closes the window.

use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use winit::event_loop::EventLoop;

use pong_goal::app::App;
use pong_goal::audio::AudioManager;
use pong_goal::sim::GameState;
use pong_goal::{Settings, StartupError};

fn main() -> ExitCode {
    // RUST_LOG overrides the default level, e.g. RUST_LOG=pong_goal=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Pong Goal starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::from(StartupError::EXIT_CODE as u8)
        }
    }
}

fn run() -> Result<(), StartupError> {
    let settings = Settings::load();
    let audio = AudioManager::start(&settings.sounds_dir(), settings.effective_volume())?;

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    log::debug!("Game seed: {}", seed);

    let event_loop = EventLoop::new()?;
    let mut app = App::new(&settings, GameState::new(seed), Box::new(audio));
    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
