//! Sprite loading and hitmask caching
//!
//! Sprites are resolved once at load time into an enum-indexed table. Hitmasks
//! for everything the player can collide with are derived here, once, and
//! shared with the simulation.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use glam::UVec2;
use image::{ImageError, RgbaImage, imageops};

use crate::renderer::SpriteSizes;
use crate::settings::Settings;
use crate::sim::{AnimalKind, CollisionMasks, Hitmask, get_hitmask};

/// Error type for asset loading
#[derive(Debug)]
pub enum AssetError {
    /// An expected file is missing from the asset folder
    NotFound {
        /// Which folder ("sprites" or "audio")
        folder: &'static str,
        dir: PathBuf,
        file: String,
    },
    /// File exists but could not be decoded
    Decode(String),
    /// Other I/O failure
    Io(String),
}

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetError::NotFound { folder, dir, file } => write!(
                f,
                "Can't find the {} folder! No such file or directory: {} (missing {})",
                folder,
                dir.display(),
                file
            ),
            AssetError::Decode(msg) => write!(f, "Decode error: {}", msg),
            AssetError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for AssetError {}

impl From<io::Error> for AssetError {
    fn from(e: io::Error) -> Self {
        AssetError::Io(e.to_string())
    }
}

impl From<ImageError> for AssetError {
    fn from(e: ImageError) -> Self {
        match e {
            ImageError::IoError(io) => io.into(),
            other => AssetError::Decode(other.to_string()),
        }
    }
}

/// Typed handle for every sprite the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Background,
    /// Ground strip
    Base,
    /// Welcome screen message
    Message,
    GameOver,
    /// Score numeral 0-9
    Digit(u8),
    /// Wing frame: 0 = up, 1 = mid, 2 = down
    Bird(u8),
    /// Vertically flipped pipe
    PipeUpper,
    PipeLower,
    Animal(AnimalKind),
}

impl SpriteId {
    pub const COUNT: usize = 22;

    /// Dense table index
    pub fn index(&self) -> usize {
        match *self {
            SpriteId::Background => 0,
            SpriteId::Base => 1,
            SpriteId::Message => 2,
            SpriteId::GameOver => 3,
            SpriteId::Digit(d) => 4 + (d as usize).min(9),
            SpriteId::Bird(f) => 14 + (f as usize).min(2),
            SpriteId::PipeUpper => 17,
            SpriteId::PipeLower => 18,
            SpriteId::Animal(AnimalKind::Fat) => 19,
            SpriteId::Animal(AnimalKind::Normal) => 20,
            SpriteId::Animal(AnimalKind::Tall) => 21,
        }
    }

    /// Every sprite in table order
    pub fn all() -> Vec<SpriteId> {
        let mut ids = vec![
            SpriteId::Background,
            SpriteId::Base,
            SpriteId::Message,
            SpriteId::GameOver,
        ];
        ids.extend((0..10).map(SpriteId::Digit));
        ids.extend((0..3).map(SpriteId::Bird));
        ids.push(SpriteId::PipeUpper);
        ids.push(SpriteId::PipeLower);
        ids.extend(AnimalKind::ALL.iter().map(|&k| SpriteId::Animal(k)));
        ids
    }

    /// File backing this sprite, `None` when the settings disable it
    pub fn file_name(&self, settings: &Settings) -> Option<String> {
        const WING: [&str; 3] = ["upflap", "midflap", "downflap"];
        let name = match *self {
            SpriteId::Background => format!("background-{}.png", settings.background?.as_str()),
            SpriteId::Base => "base.png".to_string(),
            SpriteId::Message => "message.png".to_string(),
            SpriteId::GameOver => "gameover.png".to_string(),
            SpriteId::Digit(d) => format!("{}.png", d),
            SpriteId::Bird(f) => format!(
                "{}bird-{}.png",
                settings.bird_color.as_str(),
                WING[(f as usize).min(2)]
            ),
            SpriteId::PipeUpper | SpriteId::PipeLower => {
                format!("pipe-{}.png", settings.pipe_color.as_str())
            }
            SpriteId::Animal(kind) => format!("{}.png", kind.as_str()),
        };
        Some(name)
    }
}

/// All decoded sprites plus their cached hitmasks
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    dir: PathBuf,
    images: Vec<Option<RgbaImage>>,
    masks: CollisionMasks,
}

impl SpriteSheet {
    /// Load every sprite the settings call for from `dir`
    pub fn load(dir: &Path, settings: &Settings) -> Result<Self, AssetError> {
        let mut images: Vec<Option<RgbaImage>> = vec![None; SpriteId::COUNT];

        for id in SpriteId::all() {
            let Some(file) = id.file_name(settings) else {
                continue;
            };
            let mut image = load_rgba(dir, &file)?;
            if id == SpriteId::PipeUpper {
                image = imageops::flip_vertical(&image);
            }
            images[id.index()] = Some(image);
        }

        let mask_of = |id: SpriteId| -> Arc<Hitmask> {
            let image = &images[id.index()];
            Arc::new(image.as_ref().map(get_hitmask).unwrap_or_else(|| Hitmask::solid(0, 0)))
        };
        let masks = CollisionMasks {
            player: [
                mask_of(SpriteId::Bird(0)),
                mask_of(SpriteId::Bird(1)),
                mask_of(SpriteId::Bird(2)),
            ],
            pipe_upper: mask_of(SpriteId::PipeUpper),
            pipe_lower: mask_of(SpriteId::PipeLower),
        };

        log::info!(
            "Loaded {} sprites from {}",
            images.iter().filter(|i| i.is_some()).count(),
            dir.display()
        );

        Ok(Self {
            dir: dir.to_path_buf(),
            images,
            masks,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn image(&self, id: SpriteId) -> Option<&RgbaImage> {
        self.images[id.index()].as_ref()
    }

    /// Hitmasks for the player and pipes (shared, never recomputed)
    pub fn collision_masks(&self) -> CollisionMasks {
        self.masks.clone()
    }

    /// Actual sprite dimensions, nominal ones for sprites not loaded
    pub fn sizes(&self) -> SpriteSizes {
        let mut sizes = SpriteSizes::nominal();
        for id in SpriteId::all() {
            if let Some(image) = self.image(id) {
                sizes.set(id, UVec2::new(image.width(), image.height()));
            }
        }
        sizes
    }
}

fn load_rgba(dir: &Path, file: &str) -> Result<RgbaImage, AssetError> {
    let path = dir.join(file);
    match image::open(&path) {
        Ok(image) => Ok(image.to_rgba8()),
        Err(ImageError::IoError(e)) if e.kind() == io::ErrorKind::NotFound => {
            Err(AssetError::NotFound {
                folder: "sprites",
                dir: dir.to_path_buf(),
                file: file.to_string(),
            })
        }
        Err(e) => {
            log::warn!("Failed to load sprite {}: {}", path.display(), e);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::BackgroundKind;
    use image::Rgba;

    /// Write a complete sprite folder at nominal sizes
    /// with a transparent top row so flipping is observable
    fn write_sprites(dir: &Path, settings: &Settings) {
        let nominal = SpriteSizes::nominal();
        for id in SpriteId::all() {
            if id == SpriteId::PipeUpper {
                continue;
            }
            let Some(file) = id.file_name(settings) else {
                continue;
            };
            let size = nominal.get(id);
            let image = RgbaImage::from_fn(size.x, size.y, |_, y| {
                Rgba([200, 100, 50, if y == 0 { 0 } else { 255 }])
            });
            image.save(dir.join(file)).expect("write sprite");
        }
    }

    #[test]
    fn test_sprite_table_is_dense() {
        let ids = SpriteId::all();
        assert_eq!(ids.len(), SpriteId::COUNT);
        for (i, id) in ids.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn test_file_names_follow_settings() {
        let mut settings = Settings::default();
        assert_eq!(
            SpriteId::Bird(0).file_name(&settings).as_deref(),
            Some("yellowbird-upflap.png")
        );
        assert_eq!(
            SpriteId::PipeUpper.file_name(&settings).as_deref(),
            Some("pipe-green.png")
        );
        assert_eq!(
            SpriteId::Background.file_name(&settings).as_deref(),
            Some("background-day.png")
        );
        settings.background = Some(BackgroundKind::Night);
        assert_eq!(
            SpriteId::Background.file_name(&settings).as_deref(),
            Some("background-night.png")
        );
        settings.background = None;
        assert_eq!(SpriteId::Background.file_name(&settings), None);
        assert_eq!(
            SpriteId::Animal(AnimalKind::Tall).file_name(&settings).as_deref(),
            Some("tall.png")
        );
    }

    #[test]
    fn test_load_full_sheet() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = Settings::default();
        write_sprites(dir.path(), &settings);

        let sheet = SpriteSheet::load(dir.path(), &settings).expect("sheet loads");
        assert_eq!(sheet.sizes(), SpriteSizes::nominal());

        let masks = sheet.collision_masks();
        let bird = masks.player_frame(0);
        assert_eq!((bird.width(), bird.height()), (34, 24));
        // Transparent top row in the source image
        assert!(!bird.get(0, 0));
        assert!(bird.get(0, 1));
        // Upper pipe is flipped: transparent row moves to the bottom
        assert!(masks.pipe_upper.get(0, 0));
        assert!(!masks.pipe_upper.get(0, 319));
        assert!(!masks.pipe_lower.get(0, 0));
    }

    #[test]
    fn test_missing_sprite_names_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = Settings::default();
        write_sprites(dir.path(), &settings);
        std::fs::remove_file(dir.path().join("base.png")).expect("remove");

        let err = SpriteSheet::load(dir.path(), &settings).expect_err("base.png missing");
        match &err {
            AssetError::NotFound { folder, dir: missing_dir, file } => {
                assert_eq!(*folder, "sprites");
                assert_eq!(missing_dir, dir.path());
                assert_eq!(file, "base.png");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(err.to_string().contains(&dir.path().display().to_string()));
    }

    #[test]
    fn test_corrupt_sprite_is_decode_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = Settings::default();
        write_sprites(dir.path(), &settings);
        std::fs::write(dir.path().join("message.png"), b"not a png").expect("write");

        let err = SpriteSheet::load(dir.path(), &settings).expect_err("corrupt");
        assert!(matches!(err, AssetError::Decode(_)));
    }
}
