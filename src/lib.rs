//! Flappy Brood - a Flappy Bird style arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, pipes, followers, collisions)
//! - `renderer`: Frame draw lists for an external blitter
//! - `assets`: Sprite loading and hitmask caching
//! - `audio`: Sound effect catalogue and loading
//! - `settings`: Session configuration

pub mod assets;
pub mod audio;
pub mod highscores;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use assets::{AssetError, SpriteId, SpriteSheet};
pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
///
/// All motion is expressed in pixels per simulated frame.
pub mod consts {
    /// Simulation rate the constants below were tuned for
    pub const FPS: u32 = 30;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 288.0;
    pub const SCREEN_HEIGHT: f32 = 512.0;
    /// Top edge of the ground strip
    pub const GROUND_Y: f32 = SCREEN_HEIGHT * 0.79;

    /// Ground strip sprite is wider than the background; it scrolls by the difference
    pub const BASE_WIDTH: f32 = 336.0;
    pub const BACKGROUND_WIDTH: f32 = 288.0;
    pub const BASE_SCROLL_STEP: f32 = 100.0;

    /// Player sprite dimensions
    pub const PLAYER_WIDTH: u32 = 34;
    pub const PLAYER_HEIGHT: u32 = 24;
    /// Terminal downward velocity
    pub const PLAYER_MAX_VEL_Y: f32 = 10.0;
    /// Gravity
    pub const PLAYER_ACC_Y: f32 = 1.0;
    /// Velocity applied on flap (negative = up)
    pub const PLAYER_FLAP_ACC: f32 = -9.0;
    /// Degrees the nose drops per frame
    pub const PLAYER_VEL_ROT: f32 = 3.0;
    /// Rotation is drawn clamped to this value
    pub const PLAYER_ROT_THR: f32 = 20.0;
    /// Rotation after a flap
    pub const PLAYER_FLAP_ROT: f32 = 45.0;

    /// Pipe sprite dimensions
    pub const PIPE_WIDTH: u32 = 52;
    pub const PIPE_HEIGHT: u32 = 320;
    /// Vertical gap between upper and lower pipe
    pub const PIPE_GAP: f32 = 100.0;
    /// Horizontal pipe velocity
    pub const PIPE_VEL_X: f32 = -4.0;

    /// Baby birds are drawn and collided at 60% of the player sprite
    pub const BABY_SCALE: f32 = 0.6;
    pub const DEFAULT_NUM_BABIES: usize = 4;
    pub const DEFAULT_BABY_SPACING: usize = 8;

    /// Ground animal sprites are shrunk by this integer factor
    pub const ANIMAL_SCALE_DIVISOR: u32 = 5;
    /// Horizontal margin before an animal wraps
    pub const ANIMAL_WRAP_MARGIN: f32 = 20.0;
    pub const DEFAULT_NUM_ANIMALS: usize = 3;

    pub const DEFAULT_NUM_SNOWFLAKES: usize = 50;
}
