//! Generates the game's sound effects as WAV files.
//!
//! Run with: `cargo run --bin generate-sounds [assets-dir]`
//!
//! Creates, under `<assets-dir>/sounds` (default `assets/sounds`):
//! - `wall.wav`   short high ping
//! - `paddle.wav` low falling thump
//! - `goal.wav`   rising three-note fanfare

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use pong_goal::audio::{SoundEffect, tones};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let assets = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets"));
    let sounds_dir = assets.join("sounds");
    fs::create_dir_all(&sounds_dir)?;

    for effect in SoundEffect::ALL {
        let samples = tones::render(effect);
        let path = sounds_dir.join(effect.file_name());
        tones::write_wav(&path, &samples)?;
        log::info!(
            "Wrote {} ({:.2}s)",
            path.display(),
            samples.len() as f32 / tones::SAMPLE_RATE as f32
        );
    }

    Ok(())
}
