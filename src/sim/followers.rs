//! Baby birds trailing the player
//!
//! The player's recent states are kept in a fixed-size ring buffer. Each baby
//! replays the leader's state from a fixed number of frames ago, shifted left
//! so the flock forms a horizontal line behind the player.

use glam::{UVec2, Vec2};

use super::collision::Bounds;
use super::pipes::PipePair;
use crate::assets::SpriteId;
use crate::consts::{BABY_SCALE, PLAYER_HEIGHT, PLAYER_WIDTH};
use crate::renderer::{DrawList, SpriteSizes};

/// Fixed-capacity ring buffer
///
/// Once full, each push overwrites the oldest entry.
#[derive(Debug, Clone)]
pub struct History<T> {
    slots: Vec<T>,
    /// Index the next push writes to
    head: usize,
    capacity: usize,
}

impl<T: Copy> History<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            head: 0,
            capacity,
        }
    }

    pub fn push(&mut self, value: T) {
        if self.capacity == 0 {
            return;
        }
        if self.slots.len() < self.capacity {
            self.slots.push(value);
        } else {
            self.slots[self.head] = value;
        }
        self.head = (self.head + 1) % self.capacity;
    }

    /// Entry recorded `lag` pushes before the newest (0 = newest)
    pub fn back(&self, lag: usize) -> Option<T> {
        if lag >= self.slots.len() {
            return None;
        }
        let idx = (self.head + self.capacity - 1 - lag) % self.capacity;
        Some(self.slots[idx])
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = 0;
    }
}

/// One frame of leader state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeaderSample {
    pub pos: Vec2,
    pub rotation: f32,
    pub frame: usize,
}

/// Where a baby bird is this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowerState {
    pub pos: Vec2,
    pub rotation: f32,
    pub frame: usize,
}

/// Scaled collision box size of a baby bird (34x24 at 60%)
pub fn baby_size() -> Vec2 {
    Vec2::new(PLAYER_WIDTH as f32 * BABY_SCALE, PLAYER_HEIGHT as f32 * BABY_SCALE)
}

/// Formation of baby birds echoing the leader
#[derive(Debug, Clone)]
pub struct TrailingFollowers {
    num_followers: usize,
    spacing: usize,
    history: History<LeaderSample>,
}

impl TrailingFollowers {
    pub fn new(num_followers: usize, spacing: usize) -> Self {
        assert!(spacing > 0, "follower spacing must be at least one frame");
        Self {
            num_followers,
            spacing,
            history: History::new(num_followers * spacing),
        }
    }

    pub fn num_followers(&self) -> usize {
        self.num_followers
    }

    pub fn spacing(&self) -> usize {
        self.spacing
    }

    /// Number of leader samples currently remembered
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_capacity(&self) -> usize {
        self.history.capacity()
    }

    /// Record one frame of leader state
    pub fn update(&mut self, x: f32, y: f32, rotation: f32, frame: usize) {
        self.history.push(LeaderSample {
            pos: Vec2::new(x, y),
            rotation,
            frame,
        });
    }

    /// Frames follower `index` lags behind the leader
    #[inline]
    pub fn lag(&self, index: usize) -> usize {
        (index + 1) * self.spacing - 1
    }

    /// States of every follower that has enough history to appear
    pub fn follower_states(&self) -> Vec<FollowerState> {
        let mut states = Vec::with_capacity(self.num_followers);
        for i in 0..self.num_followers {
            // Lags grow with the index, so the first missing sample ends the flock
            let Some(sample) = self.history.back(self.lag(i)) else {
                break;
            };
            let offset = ((i + 1) * self.spacing) as f32;
            states.push(FollowerState {
                pos: Vec2::new(sample.pos.x - offset, sample.pos.y),
                rotation: sample.rotation,
                frame: sample.frame,
            });
        }
        states
    }

    /// Check if any baby bird hit the ground or a pipe
    pub fn check_crash(&self, pipes: &[PipePair], ground_y: f32) -> bool {
        let size = baby_size();

        for state in self.follower_states() {
            if state.pos.y + size.y >= ground_y - 1.0 {
                return true;
            }

            let baby = Bounds::new(state.pos, size);
            let hit_pipe = pipes
                .iter()
                .flat_map(|pair| pair.pipes())
                .any(|pipe| baby.overlaps(&pipe.bounds()));
            if hit_pipe {
                return true;
            }
        }
        false
    }

    /// Forget the leader's history (new session)
    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Queue a scaled, rotated sprite for each baby
    pub fn draw(&self, sizes: &SpriteSizes, list: &mut DrawList) {
        for state in self.follower_states() {
            let sprite = SpriteId::Bird(state.frame.min(2) as u8);
            let full = sizes.get(sprite);
            let scaled = UVec2::new(
                (full.x as f32 * BABY_SCALE) as u32,
                (full.y as f32 * BABY_SCALE) as u32,
            );
            let center = Vec2::new(
                state.pos.x + (scaled.x / 2) as f32,
                state.pos.y + (scaled.y / 2) as f32,
            );
            list.sprite(sprite, center, scaled, state.rotation);
        }
    }
}
