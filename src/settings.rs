//! Presentation settings
//!
//! Read from an optional `pong_goal.json` in the working directory. Only
//! presentation is configurable; the rules of the game are fixed.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::consts::{FRAME_DELAY_MS, MAX_SUBSTEPS, SIM_DT};
use crate::scheduler::{FixedDelay, FixedTimestep, FrameScheduler};

/// How frames are paced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FramePacing {
    /// One tick per frame after a fixed delay
    #[default]
    FixedDelay,
    /// Ticks follow measured wall-clock time
    FixedTimestep,
}

impl FramePacing {
    /// Scheduler for this pacing, with its first frame due at `now`
    pub fn scheduler(&self, now: Instant) -> Box<dyn FrameScheduler> {
        match self {
            FramePacing::FixedDelay => Box::new(FixedDelay::new(
                Duration::from_millis(FRAME_DELAY_MS),
                now,
            )),
            FramePacing::FixedTimestep => Box::new(FixedTimestep::new(
                Duration::from_secs_f32(SIM_DT),
                MAX_SUBSTEPS,
                now,
            )),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Silence all sound effects
    pub muted: bool,
    /// Sparks around the ball
    pub particles: bool,
    pub frame_pacing: FramePacing,
    /// Directory holding `sounds/`
    pub assets_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            muted: false,
            particles: true,
            frame_pacing: FramePacing::FixedDelay,
            assets_dir: PathBuf::from("assets"),
        }
    }
}

impl Settings {
    /// Settings file looked up in the working directory
    pub const FILE_NAME: &'static str = "pong_goal.json";

    /// Volume actually applied to sounds
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0)
        }
    }

    pub fn sounds_dir(&self) -> PathBuf {
        self.assets_dir.join("sounds")
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No {} found, using default settings", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load from the working directory
    pub fn load() -> Self {
        Self::load_from(Path::new(Self::FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "muted": true }"#).unwrap();
        assert!(settings.muted);
        assert!(settings.particles);
        assert_eq!(settings.frame_pacing, FramePacing::FixedDelay);
        assert_eq!(settings.assets_dir, PathBuf::from("assets"));
    }

    #[test]
    fn test_frame_pacing_names() {
        let settings = Settings::from_json(r#"{ "frame_pacing": "fixed_timestep" }"#).unwrap();
        assert_eq!(settings.frame_pacing, FramePacing::FixedTimestep);
        assert!(Settings::from_json(r#"{ "frame_pacing": "vsync" }"#).is_err());
    }

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings {
            master_volume: 1.7,
            ..Default::default()
        };
        assert_eq!(settings.effective_volume(), 1.0);
        settings.muted = true;
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = Settings::load_from(Path::new("definitely/not/here.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_sounds_dir() {
        let settings = Settings::default();
        assert_eq!(settings.sounds_dir(), PathBuf::from("assets").join("sounds"));
    }
}
