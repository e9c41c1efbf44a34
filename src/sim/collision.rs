//! Collision detection for sprites
//!
//! Two levels of precision: plain box overlap (used for the baby birds) and
//! pixel-accurate tests against per-sprite opacity masks (used for the player).

use std::sync::Arc;

use glam::Vec2;
use image::RgbaImage;

use crate::consts::{PIPE_HEIGHT, PIPE_WIDTH, PLAYER_HEIGHT, PLAYER_WIDTH};

/// Axis-aligned rectangle in whole pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect for a sprite whose top-left corner sits at `pos` (truncated to whole pixels)
    pub fn at(pos: Vec2, width: u32, height: u32) -> Self {
        Self::new(pos.x as i32, pos.y as i32, width as i32, height as i32)
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Intersection of two rects
    ///
    /// A disjoint pair yields a zero-sized rect at `self`'s origin.
    pub fn clip(&self, other: &PixelRect) -> PixelRect {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= left || bottom <= top {
            return PixelRect::new(self.x, self.y, 0, 0);
        }
        PixelRect::new(left, top, right - left, bottom - top)
    }
}

/// Axis-aligned box with fractional position and size
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Bounds {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Strict overlap test: touching edges and zero-sized boxes never collide
    pub fn overlaps(&self, other: &Bounds) -> bool {
        if self.size.x <= 0.0 || self.size.y <= 0.0 || other.size.x <= 0.0 || other.size.y <= 0.0 {
            return false;
        }
        self.pos.x < other.pos.x + other.size.x
            && other.pos.x < self.pos.x + self.size.x
            && self.pos.y < other.pos.y + other.size.y
            && other.pos.y < self.pos.y + self.size.y
    }
}

/// Per-pixel opacity grid of a sprite
///
/// Built once per sprite image and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hitmask {
    width: u32,
    height: u32,
    /// Row-major, `width * height` entries
    bits: Vec<bool>,
}

impl Hitmask {
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut bits = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                bits.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            bits,
        }
    }

    /// Fully opaque mask (pixel test degrades to a box test)
    pub fn solid(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.bits[(y * self.width + x) as usize]
    }

    /// Number of opaque pixels
    pub fn opaque_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }
}

/// Derive a hitmask from an image's alpha channel
pub fn get_hitmask(image: &RgbaImage) -> Hitmask {
    Hitmask::from_fn(image.width(), image.height(), |x, y| image.get_pixel(x, y)[3] != 0)
}

/// Check if two sprites collide on an actual opaque pixel, not just their rects
///
/// Each mask must have exactly the dimensions of its rect.
pub fn pixel_collision(a: PixelRect, b: PixelRect, mask_a: &Hitmask, mask_b: &Hitmask) -> bool {
    debug_assert_eq!((a.width, a.height), (mask_a.width as i32, mask_a.height as i32));
    debug_assert_eq!((b.width, b.height), (mask_b.width as i32, mask_b.height as i32));

    let rect = a.clip(&b);
    if rect.is_empty() {
        return false;
    }

    let (ax, ay) = ((rect.x - a.x) as u32, (rect.y - a.y) as u32);
    let (bx, by) = ((rect.x - b.x) as u32, (rect.y - b.y) as u32);

    for x in 0..rect.width as u32 {
        for y in 0..rect.height as u32 {
            if mask_a.get(ax + x, ay + y) && mask_b.get(bx + x, by + y) {
                return true;
            }
        }
    }
    false
}

/// Cached masks needed for the player-vs-pipe test
#[derive(Debug, Clone)]
pub struct CollisionMasks {
    /// One mask per flap animation frame
    pub player: [Arc<Hitmask>; 3],
    pub pipe_upper: Arc<Hitmask>,
    pub pipe_lower: Arc<Hitmask>,
}

impl CollisionMasks {
    /// Solid masks at the nominal sprite sizes (used when running without assets)
    pub fn solid() -> Self {
        let player = Arc::new(Hitmask::solid(PLAYER_WIDTH, PLAYER_HEIGHT));
        let pipe = Arc::new(Hitmask::solid(PIPE_WIDTH, PIPE_HEIGHT));
        Self {
            player: [player.clone(), player.clone(), player],
            pipe_upper: pipe.clone(),
            pipe_lower: pipe,
        }
    }

    /// Mask for a player animation frame
    pub fn player_frame(&self, frame: usize) -> &Hitmask {
        &self.player[frame.min(self.player.len() - 1)]
    }
}

impl Default for CollisionMasks {
    fn default() -> Self {
        Self::solid()
    }
}
