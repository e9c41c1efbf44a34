//! Sound effect catalogue
//!
//! Clips are loaded as raw encoded bytes; decoding and playback belong to
//! whatever host drives the game.

use std::io;
use std::path::{Path, PathBuf};

use crate::assets::AssetError;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player crashed into a pipe and falls
    Die,
    /// Any crash
    Hit,
    /// Pipe passed
    Point,
    /// New session after game over
    Swoosh,
    /// Flap
    Wing,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 5] = [
        SoundEffect::Die,
        SoundEffect::Hit,
        SoundEffect::Point,
        SoundEffect::Swoosh,
        SoundEffect::Wing,
    ];

    pub fn file_stem(&self) -> &'static str {
        match self {
            SoundEffect::Die => "die",
            SoundEffect::Hit => "hit",
            SoundEffect::Point => "point",
            SoundEffect::Swoosh => "swoosh",
            SoundEffect::Wing => "wing",
        }
    }

    /// e.g. `wing.ogg`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.file_stem(), sound_extension())
    }

    /// Sound to play for a simulation event
    pub fn for_event(event: GameEvent) -> SoundEffect {
        match event {
            GameEvent::Flap => SoundEffect::Wing,
            GameEvent::Point => SoundEffect::Point,
            GameEvent::Hit => SoundEffect::Hit,
            GameEvent::Die => SoundEffect::Die,
            GameEvent::Restart => SoundEffect::Swoosh,
        }
    }
}

/// Windows ships WAV clips, everything else OGG
pub fn sound_extension() -> &'static str {
    if cfg!(target_os = "windows") { "wav" } else { "ogg" }
}

/// Encoded clips for every sound effect
#[derive(Debug, Clone)]
pub struct SoundBank {
    dir: PathBuf,
    clips: Vec<Vec<u8>>,
}

impl SoundBank {
    /// Read every clip from `dir`
    pub fn load(dir: &Path) -> Result<Self, AssetError> {
        let mut clips = Vec::with_capacity(SoundEffect::ALL.len());
        for effect in SoundEffect::ALL {
            let file = effect.file_name();
            let bytes = std::fs::read(dir.join(&file)).map_err(|e| {
                if e.kind() == io::ErrorKind::NotFound {
                    AssetError::NotFound {
                        folder: "audio",
                        dir: dir.to_path_buf(),
                        file,
                    }
                } else {
                    e.into()
                }
            })?;
            clips.push(bytes);
        }
        log::info!("Loaded {} sounds from {}", clips.len(), dir.display());

        Ok(Self {
            dir: dir.to_path_buf(),
            clips,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Encoded bytes of a clip
    pub fn clip(&self, effect: SoundEffect) -> &[u8] {
        &self.clips[effect as usize]
    }
}
