//! Game settings and preferences
//!
//! Persisted as JSON next to the high score table.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BABY_SPACING, DEFAULT_NUM_ANIMALS, DEFAULT_NUM_BABIES, DEFAULT_NUM_SNOWFLAKES,
};

/// Player sprite palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BirdColor {
    #[default]
    Yellow,
    Red,
    Blue,
}

impl BirdColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            BirdColor::Yellow => "yellow",
            BirdColor::Red => "red",
            BirdColor::Blue => "blue",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "yellow" => Some(BirdColor::Yellow),
            "red" => Some(BirdColor::Red),
            "blue" => Some(BirdColor::Blue),
            _ => None,
        }
    }
}

/// Pipe sprite palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PipeColor {
    #[default]
    Green,
    Red,
}

impl PipeColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipeColor::Green => "green",
            PipeColor::Red => "red",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "green" => Some(PipeColor::Green),
            "red" => Some(PipeColor::Red),
            _ => None,
        }
    }
}

/// Background artwork
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    #[default]
    Day,
    Night,
}

impl BackgroundKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackgroundKind::Day => "day",
            BackgroundKind::Night => "night",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "day" => Some(BackgroundKind::Day),
            "night" => Some(BackgroundKind::Night),
            _ => None,
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Sprites ===
    pub bird_color: BirdColor,
    pub pipe_color: PipeColor,
    /// `None` draws no background (black)
    pub background: Option<BackgroundKind>,

    // === Baby birds ===
    /// Followers trailing the player
    pub num_babies: usize,
    /// Frames of lag between consecutive followers
    pub baby_spacing: usize,

    // === Decorations ===
    pub ground_animals: bool,
    pub num_animals: usize,
    pub snowfall: bool,
    pub num_snowflakes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bird_color: BirdColor::Yellow,
            pipe_color: PipeColor::Green,
            background: Some(BackgroundKind::Day),

            num_babies: DEFAULT_NUM_BABIES,
            baby_spacing: DEFAULT_BABY_SPACING,

            ground_animals: true,
            num_animals: DEFAULT_NUM_ANIMALS,
            snowfall: true,
            num_snowflakes: DEFAULT_NUM_SNOWFLAKES,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Can't read settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.bird_color, BirdColor::Yellow);
        assert_eq!(s.pipe_color, PipeColor::Green);
        assert_eq!(s.background, Some(BackgroundKind::Day));
        assert_eq!(s.num_babies, 4);
        assert_eq!(s.baby_spacing, 8);
        assert!(s.snowfall && s.ground_animals);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(BirdColor::from_str("RED"), Some(BirdColor::Red));
        assert_eq!(PipeColor::from_str("green"), Some(PipeColor::Green));
        assert_eq!(BackgroundKind::from_str("Night"), Some(BackgroundKind::Night));
        assert_eq!(BirdColor::from_str("purple"), None);
    }

    #[test]
    fn test_save_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        let settings = Settings {
            bird_color: BirdColor::Blue,
            background: None,
            num_babies: 7,
            ..Settings::default()
        };
        settings.save(&path).expect("save");
        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"pipe_color": "red", "snowfall": false}"#).expect("write");

        let s = Settings::load(&path);
        assert_eq!(s.pipe_color, PipeColor::Red);
        assert!(!s.snowfall);
        assert_eq!(s.num_babies, DEFAULT_NUM_BABIES);
    }

    #[test]
    fn test_missing_or_malformed_falls_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(Settings::load(&dir.path().join("nope.json")), Settings::default());

        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").expect("write");
        assert_eq!(Settings::load(&path), Settings::default());
    }
}
