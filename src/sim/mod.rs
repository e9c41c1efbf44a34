//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `tick` = one frame)
//! - Seeded RNG only, owned by `GameState`
//! - Stable iteration order (spawn order)
//! - No pixel or platform dependencies; drawing goes through `DrawList`

pub mod animals;
pub mod collision;
pub mod followers;
pub mod pipes;
pub mod player;
pub mod snow;
pub mod state;
pub mod tick;

pub use animals::{AnimalKind, GroundAnimal, GroundAnimals};
pub use collision::{Bounds, CollisionMasks, Hitmask, PixelRect, get_hitmask, pixel_collision};
pub use followers::{FollowerState, History, LeaderSample, TrailingFollowers, baby_size};
pub use pipes::{Pipe, PipeKind, PipeManager, PipePair};
pub use player::Player;
pub use snow::{SNOW_COLOR, Snowflake, SnowfallEffect};
pub use state::{CrashKind, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, autopilot_wants_flap, tick};
