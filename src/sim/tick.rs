//! Fixed timestep simulation tick
//!
//! Advances a session by exactly one frame. Frame order while playing:
//! flap, scoring, animation, player physics, pipes, baby birds, decorations,
//! then collision checks.

use super::state::{CrashKind, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Autopilot aims this far above the bottom of the next gap
const AUTOPILOT_MARGIN: f32 = 12.0;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap (space/tap); also starts a run and dismisses the game over screen
    pub flap: bool,
    /// Demo mode - a simple pilot flaps for the player while a run is active
    pub autopilot: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    let flap = input.flap || (input.autopilot && autopilot_wants_flap(state));

    match state.phase {
        GamePhase::Ready => {
            state.player.animate();
            scroll_ground(state);
            update_decorations(state);

            if flap {
                state.phase = GamePhase::Playing;
                state.events.push(GameEvent::Flap);
                log::info!("Run started (seed {})", state.seed);
            }
        }

        GamePhase::Playing => play_frame(state, flap),

        GamePhase::GameOver => {
            update_decorations(state);

            if input.flap {
                let seed = state.next_seed();
                state.reset(seed);
                state.events.push(GameEvent::Restart);
            }
        }
    }
}

fn play_frame(state: &mut GameState, flap: bool) {
    state.time_ticks += 1;

    if flap && state.player.flap() {
        state.events.push(GameEvent::Flap);
    }

    // Score before anything moves
    let passed = state.pipes.passed(state.player.mid_x());
    for _ in 0..passed {
        state.score += 1;
        state.events.push(GameEvent::Point);
    }

    state.player.animate();
    scroll_ground(state);
    state.player.step(GROUND_Y);
    state.pipes.advance(&mut state.rng);

    let player = &state.player;
    state
        .followers
        .update(player.pos.x, player.pos.y, player.visible_rotation(), player.frame);

    update_decorations(state);

    if let Some(kind) = detect_crash(state) {
        state.phase = GamePhase::GameOver;
        state.crash = Some(kind);
        state.events.push(GameEvent::Hit);
        if kind != CrashKind::Ground {
            state.events.push(GameEvent::Die);
        }
        log::info!(
            "Game over: {:?} crash, score {} after {} frames",
            kind,
            state.score,
            state.time_ticks
        );
    }
}

/// Player checks first (ground, then pipes), then the baby birds
fn detect_crash(state: &GameState) -> Option<CrashKind> {
    let pairs = state.pipes.pairs();
    if state.player.hits_ground(GROUND_Y) {
        Some(CrashKind::Ground)
    } else if state.player.hits_pipe(pairs, &state.masks) {
        Some(CrashKind::Pipe)
    } else if state.followers.check_crash(pairs, GROUND_Y) {
        Some(CrashKind::Follower)
    } else {
        None
    }
}

/// Ground strip wraps every (base width - background width) pixels
fn scroll_ground(state: &mut GameState) {
    let base_shift = BASE_WIDTH - BACKGROUND_WIDTH;
    state.ground_x = -((-state.ground_x + BASE_SCROLL_STEP) % base_shift);
}

fn update_decorations(state: &mut GameState) {
    state.animals.update();
    state.snow.update(&mut state.rng);
}

/// Demo pilot: start runs, then flap whenever the bird is about to drop
/// below the next gap
pub fn autopilot_wants_flap(state: &GameState) -> bool {
    match state.phase {
        GamePhase::Ready => true,
        GamePhase::GameOver => false,
        GamePhase::Playing => {
            let player = &state.player;
            let floor = state
                .pipes
                .next_pair(player.pos.x)
                .map(|pair| pair.gap_bottom() - AUTOPILOT_MARGIN)
                .unwrap_or(GROUND_Y - AUTOPILOT_MARGIN);
            let next_bottom = player.pos.y + PLAYER_HEIGHT as f32 + player.vel_y.max(0.0);
            player.vel_y >= 0.0 && next_bottom > floor
        }
    }
}
