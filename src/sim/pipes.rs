//! Scrolling pipe hazards
//!
//! Pipes come in upper/lower pairs around a vertical gap. Pairs are kept in
//! spawn order, which is also left-to-right screen order.

use glam::Vec2;
use rand::Rng;

use super::collision::{Bounds, Hitmask, PixelRect};
use crate::assets::SpriteId;
use crate::consts::{PIPE_GAP, PIPE_HEIGHT, PIPE_VEL_X, PIPE_WIDTH};
use crate::renderer::{DrawList, SpriteSizes};

/// Which half of a pair a pipe is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeKind {
    /// Hangs from the top of the screen (sprite flipped vertically)
    Upper,
    /// Rises from the ground
    Lower,
}

/// A single pipe record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipe {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: PipeKind,
}

impl Pipe {
    pub fn new(x: f32, y: f32, kind: PipeKind) -> Self {
        Self {
            x,
            y,
            width: PIPE_WIDTH as f32,
            height: PIPE_HEIGHT as f32,
            kind,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(Vec2::new(self.x, self.y), Vec2::new(self.width, self.height))
    }

    /// Pixel rect sized to the pipe's hitmask
    pub fn pixel_rect(&self, mask: &Hitmask) -> PixelRect {
        PixelRect::at(Vec2::new(self.x, self.y), mask.width(), mask.height())
    }

    pub fn sprite(&self) -> SpriteId {
        match self.kind {
            PipeKind::Upper => SpriteId::PipeUpper,
            PipeKind::Lower => SpriteId::PipeLower,
        }
    }
}

/// Upper and lower pipe sharing an x position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipePair {
    pub upper: Pipe,
    pub lower: Pipe,
}

impl PipePair {
    /// Pair whose gap starts at `gap_y`
    pub fn with_gap(x: f32, gap_y: f32) -> Self {
        Self {
            upper: Pipe::new(x, gap_y - PIPE_HEIGHT as f32, PipeKind::Upper),
            lower: Pipe::new(x, gap_y + PIPE_GAP, PipeKind::Lower),
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.upper.x
    }

    /// Horizontal centre, used for scoring
    pub fn mid_x(&self) -> f32 {
        self.upper.x + self.upper.width / 2.0
    }

    /// Top edge of the gap
    pub fn gap_top(&self) -> f32 {
        self.upper.y + self.upper.height
    }

    /// Bottom edge of the gap
    pub fn gap_bottom(&self) -> f32 {
        self.lower.y
    }

    pub fn pipes(&self) -> [Pipe; 2] {
        [self.upper, self.lower]
    }

    fn shift(&mut self, dx: f32) {
        self.upper.x += dx;
        self.lower.x += dx;
    }
}

/// Spawns, scrolls and retires pipe pairs
#[derive(Debug, Clone)]
pub struct PipeManager {
    pairs: Vec<PipePair>,
    screen_width: f32,
    ground_y: f32,
}

impl PipeManager {
    /// Start a session with two pairs queued off the right edge
    pub fn new<R: Rng>(screen_width: f32, ground_y: f32, rng: &mut R) -> Self {
        let mut manager = Self {
            pairs: Vec::with_capacity(4),
            screen_width,
            ground_y,
        };
        let first_x = screen_width + 200.0;
        let second_x = first_x + screen_width / 2.0;
        for x in [first_x, second_x] {
            let pair = manager.random_pair(x, rng);
            manager.pairs.push(pair);
        }
        manager
    }

    /// Pipe manager with explicit pairs (ordered by x)
    pub fn with_pairs(screen_width: f32, ground_y: f32, pairs: Vec<PipePair>) -> Self {
        debug_assert!(pairs.windows(2).all(|w| w[0].x() <= w[1].x()));
        Self {
            pairs,
            screen_width,
            ground_y,
        }
    }

    /// Random gap in the middle band of the playfield
    pub fn random_pair<R: Rng>(&self, x: f32, rng: &mut R) -> PipePair {
        let range = (self.ground_y * 0.6 - PIPE_GAP) as i32;
        let mut gap_y = rng.random_range(0..range.max(1));
        gap_y += (self.ground_y * 0.2) as i32;
        PipePair::with_gap(x, gap_y as f32)
    }

    /// Scroll every pair, spawn a new one when the leader nears the left
    /// edge and retire the leader once it is fully off screen
    pub fn advance<R: Rng>(&mut self, rng: &mut R) {
        for pair in &mut self.pairs {
            pair.shift(PIPE_VEL_X);
        }

        if let Some(first) = self.pairs.first() {
            if 0.0 < first.x() && first.x() < 5.0 {
                let pair = self.random_pair(self.screen_width + 10.0, rng);
                log::debug!("Spawned pipe pair at x={} gap_top={}", pair.x(), pair.gap_top());
                self.pairs.push(pair);
            }
        }

        if let Some(first) = self.pairs.first() {
            if first.x() < -(PIPE_WIDTH as f32) {
                self.pairs.remove(0);
                log::debug!("Retired pipe pair, {} remaining", self.pairs.len());
            }
        }
    }

    /// Number of pairs whose centre the player just crossed
    ///
    /// The 4 px window matches the scroll speed so each pair scores once.
    pub fn passed(&self, player_mid_x: f32) -> u32 {
        self.pairs
            .iter()
            .filter(|pair| {
                let mid = pair.mid_x();
                mid <= player_mid_x && player_mid_x < mid + PIPE_VEL_X.abs()
            })
            .count() as u32
    }

    /// First pair the player has not cleared yet
    pub fn next_pair(&self, player_x: f32) -> Option<&PipePair> {
        self.pairs
            .iter()
            .find(|pair| pair.x() + pair.upper.width > player_x)
    }

    pub fn pairs(&self) -> &[PipePair] {
        &self.pairs
    }

    pub fn draw(&self, sizes: &SpriteSizes, list: &mut DrawList) {
        for pipe in self.pairs.iter().flat_map(|pair| pair.pipes()) {
            let sprite = pipe.sprite();
            list.sprite_at(sprite, Vec2::new(pipe.x, pipe.y), sizes.get(sprite), 0.0);
        }
    }
}
