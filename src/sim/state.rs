//! Game state and session lifecycle
//!
//! One `GameState` owns every simulated component for a session plus the
//! seeded RNG that all randomness flows through.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::animals::GroundAnimals;
use super::collision::CollisionMasks;
use super::followers::TrailingFollowers;
use super::pipes::PipeManager;
use super::player::Player;
use super::snow::SnowfallEffect;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Welcome screen, waiting for the first flap
    Ready,
    /// Active gameplay
    Playing,
    /// Run ended
    GameOver,
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashKind {
    /// Player touched the ground strip
    Ground,
    /// Player hit a pipe
    Pipe,
    /// A baby bird hit a pipe or the ground
    Follower,
}

/// Something the driver may want to react to (sounds, UI)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Flap,
    Point,
    Hit,
    Die,
    /// Game over screen dismissed, new session started
    Restart,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed of the current session
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub settings: Settings,
    pub phase: GamePhase,
    pub crash: Option<CrashKind>,
    /// Pipes passed
    pub score: u32,
    /// Simulated frames since the first flap
    pub time_ticks: u64,
    /// Horizontal offset of the ground strip (0 to -(base - background width))
    pub ground_x: f32,
    pub player: Player,
    pub pipes: PipeManager,
    pub followers: TrailingFollowers,
    pub animals: GroundAnimals,
    pub snow: SnowfallEffect,
    /// Shared read-only hitmasks
    pub masks: CollisionMasks,
    /// Events raised by the last tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(settings: Settings, seed: u64, masks: CollisionMasks) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        let pipes = PipeManager::new(SCREEN_WIDTH, GROUND_Y, &mut rng);
        let followers = TrailingFollowers::new(settings.num_babies, settings.baby_spacing.max(1));

        let mut animals = GroundAnimals::new(SCREEN_WIDTH, GROUND_Y);
        if settings.ground_animals {
            animals.spawn(settings.num_animals, &mut rng);
        }

        let flakes = if settings.snowfall { settings.num_snowflakes } else { 0 };
        let snow = SnowfallEffect::new(SCREEN_WIDTH, SCREEN_HEIGHT, flakes, &mut rng);

        log::info!(
            "New session: seed={} babies={}x{} animals={} snowflakes={}",
            seed,
            settings.num_babies,
            settings.baby_spacing,
            animals.animals().len(),
            flakes
        );

        Self {
            seed,
            rng,
            settings,
            phase: GamePhase::Ready,
            crash: None,
            score: 0,
            time_ticks: 0,
            ground_x: 0.0,
            player: Player::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            pipes,
            followers,
            animals,
            snow,
            masks,
            events: Vec::new(),
        }
    }

    /// Start over with the same settings and masks
    pub fn reset(&mut self, seed: u64) {
        let settings = self.settings.clone();
        let masks = self.masks.clone();
        *self = Self::new(settings, seed, masks);
    }

    /// Seed for the next session, drawn from this session's RNG
    pub fn next_seed(&mut self) -> u64 {
        self.rng.random()
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
