//! Audio system using rodio
//!
//! Three short effects are loaded once at startup. Playback is a one-way
//! message to a dedicated audio thread that owns the output stream; the game
//! loop never waits on it or learns when a sound finishes.

use std::f32::consts::TAU;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use rodio::decoder::DecoderError;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Source};
use thiserror::Error;

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits a wall
    Wall,
    /// Ball hits a paddle
    Paddle,
    /// Ball enters a goal
    Goal,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 3] = [SoundEffect::Wall, SoundEffect::Paddle, SoundEffect::Goal];

    /// File name inside the sounds directory
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::Wall => "wall.wav",
            SoundEffect::Paddle => "paddle.wav",
            SoundEffect::Goal => "goal.wav",
        }
    }

    /// Sound for a gameplay event
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::WallHit => SoundEffect::Wall,
            GameEvent::PaddleHit { .. } => SoundEffect::Paddle,
            GameEvent::Goal { .. } => SoundEffect::Goal,
        }
    }
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("could not open audio output: {0}")]
    Stream(#[from] rodio::StreamError),
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not decode {path}: {source}")]
    Decode { path: PathBuf, source: DecoderError },
    #[error("could not start audio thread: {0}")]
    Thread(std::io::Error),
    #[error("audio thread exited during startup")]
    Disconnected,
}

/// Anything that can play effects without blocking the caller
pub trait SoundSink {
    fn play(&self, effect: SoundEffect);
}

/// Forward a tick's events to a sound sink, in order
pub fn dispatch(events: &[GameEvent], sink: &dyn SoundSink) {
    for event in events {
        sink.play(SoundEffect::for_event(event));
    }
}

/// Encoded effect files, kept in memory and decoded per play
#[derive(Debug, Clone)]
pub struct SoundBank {
    wall: Arc<[u8]>,
    paddle: Arc<[u8]>,
    goal: Arc<[u8]>,
}

impl SoundBank {
    /// Load and validate every effect in `dir`
    pub fn load(dir: &Path) -> Result<Self, AudioError> {
        let bank = Self {
            wall: Self::load_one(&dir.join(SoundEffect::Wall.file_name()))?,
            paddle: Self::load_one(&dir.join(SoundEffect::Paddle.file_name()))?,
            goal: Self::load_one(&dir.join(SoundEffect::Goal.file_name()))?,
        };
        log::info!("Loaded sound effects from {}", dir.display());
        for effect in SoundEffect::ALL {
            log::debug!("{:?}: {} samples", effect, bank.duration_samples(effect));
        }
        Ok(bank)
    }

    fn load_one(path: &Path) -> Result<Arc<[u8]>, AudioError> {
        let bytes: Arc<[u8]> = std::fs::read(path)
            .map_err(|source| AudioError::Read {
                path: path.to_path_buf(),
                source,
            })?
            .into();

        // Decode once so a broken file fails at startup, not on first play
        Decoder::new(Cursor::new(bytes.clone())).map_err(|source| AudioError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(bytes)
    }

    fn bytes(&self, effect: SoundEffect) -> &Arc<[u8]> {
        match effect {
            SoundEffect::Wall => &self.wall,
            SoundEffect::Paddle => &self.paddle,
            SoundEffect::Goal => &self.goal,
        }
    }

    /// A fresh decoder for one playback
    pub fn source(&self, effect: SoundEffect) -> Result<Decoder<Cursor<Arc<[u8]>>>, DecoderError> {
        Decoder::new(Cursor::new(self.bytes(effect).clone()))
    }

    /// Decoded sample count of an effect
    pub fn duration_samples(&self, effect: SoundEffect) -> usize {
        self.source(effect).map(|s| s.count()).unwrap_or(0)
    }
}

enum AudioCommand {
    Play(SoundEffect),
    Shutdown,
}

/// Audio manager for the game
pub struct AudioManager {
    tx: Sender<AudioCommand>,
    muted: bool,
    worker: Option<JoinHandle<()>>,
}

impl AudioManager {
    /// Load the effects in `sounds_dir` and open the default output device.
    ///
    /// Returns once the device is open, so a missing device is reported here
    /// rather than on the first play.
    pub fn start(sounds_dir: &Path, volume: f32) -> Result<Self, AudioError> {
        let bank = SoundBank::load(sounds_dir)?;
        let (tx, rx) = mpsc::channel::<AudioCommand>();
        let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<(), AudioError>>(1);

        let worker = thread::Builder::new()
            .name("audio".into())
            .spawn(move || {
                // The stream must live on this thread for as long as we play
                let (_stream, handle) = match OutputStream::try_default() {
                    Ok(pair) => {
                        let _ = ready_tx.send(Ok(()));
                        pair
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e.into()));
                        return;
                    }
                };

                for command in rx {
                    match command {
                        AudioCommand::Play(effect) => play_on(&handle, &bank, effect, volume),
                        AudioCommand::Shutdown => break,
                    }
                }
                log::debug!("Audio thread finished");
            })
            .map_err(AudioError::Thread)?;

        ready_rx.recv().map_err(|_| AudioError::Disconnected)??;
        log::info!("Audio output ready (volume {:.2})", volume);

        Ok(Self {
            tx,
            muted: volume <= 0.0,
            worker: Some(worker),
        })
    }
}

fn play_on(handle: &OutputStreamHandle, bank: &SoundBank, effect: SoundEffect, volume: f32) {
    let source = match bank.source(effect) {
        Ok(source) => source,
        Err(e) => {
            log::warn!("Could not decode {:?}: {}", effect, e);
            return;
        }
    };
    if let Err(e) = handle.play_raw(source.amplify(volume).convert_samples()) {
        log::warn!("Could not play {:?}: {}", effect, e);
    }
}

impl SoundSink for AudioManager {
    fn play(&self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        if self.tx.send(AudioCommand::Play(effect)).is_err() {
            log::warn!("Audio thread gone, dropping {:?}", effect);
        }
    }
}

impl Drop for AudioManager {
    fn drop(&mut self) {
        let _ = self.tx.send(AudioCommand::Shutdown);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::warn!("Audio thread panicked");
            }
        }
    }
}

/// Procedural effect synthesis for the bundled sound files
pub mod tones {
    use super::*;

    pub const SAMPLE_RATE: u32 = 44_100;

    /// Mono 16-bit samples for an effect
    pub fn render(effect: SoundEffect) -> Vec<i16> {
        match effect {
            // Higher ping
            SoundEffect::Wall => sweep(400.0, 400.0, 0.08, 0.3),
            // Solid thump
            SoundEffect::Paddle => sweep(150.0, 60.0, 0.12, 0.6),
            // Rising three-note fanfare
            SoundEffect::Goal => [500.0, 650.0, 800.0]
                .iter()
                .flat_map(|&f| sweep(f, f, 0.12, 0.4))
                .collect(),
        }
    }

    /// Sine sweep from `f0` to `f1` Hz with a linear fade-out
    fn sweep(f0: f32, f1: f32, secs: f32, gain: f32) -> Vec<i16> {
        let n = (SAMPLE_RATE as f32 * secs) as usize;
        let mut phase = 0.0f32;
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                let freq = f0 * (f1 / f0).powf(t);
                phase = (phase + freq / SAMPLE_RATE as f32).fract();
                let envelope = 1.0 - t;
                ((phase * TAU).sin() * gain * envelope * i16::MAX as f32) as i16
            })
            .collect()
    }

    /// Write mono samples as a 16-bit PCM WAV file
    pub fn write_wav(path: &Path, samples: &[i16]) -> Result<(), hound::Error> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: SAMPLE_RATE,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec)?;
        for &sample in samples {
            writer.write_sample(sample)?;
        }
        writer.finalize()
    }
}
