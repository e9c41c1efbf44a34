//! The player-controlled bird
//!
//! Fixed per-frame physics: a flap sets the vertical velocity outright,
//! gravity adds back up to a terminal velocity, and the nose tilts down a few
//! degrees every frame.

use glam::{UVec2, Vec2};

use super::collision::{CollisionMasks, PixelRect, pixel_collision};
use super::pipes::{PipeKind, PipePair};
use crate::assets::SpriteId;
use crate::consts::*;
use crate::renderer::{DrawList, SpriteSizes};

/// Wing animation frame order (up, mid, down, mid)
const FLAP_CYCLE: [usize; 4] = [0, 1, 2, 1];
/// Animation advances every N loop iterations
const FLAP_FRAME_TICKS: u32 = 3;
/// Loop iteration counter wraps here
const LOOP_ITER_WRAP: u32 = 30;

/// The leader bird
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner of the sprite
    pub pos: Vec2,
    /// Vertical velocity (positive = down)
    pub vel_y: f32,
    /// Nose angle in degrees (positive = up)
    pub rotation: f32,
    /// Current wing animation frame (0-2)
    pub frame: usize,
    flapped: bool,
    loop_iter: u32,
    cycle_pos: usize,
}

impl Player {
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self {
            pos: Vec2::new(
                (screen_width * 0.2).trunc(),
                ((screen_height - PLAYER_HEIGHT as f32) / 2.0).trunc(),
            ),
            vel_y: PLAYER_FLAP_ACC,
            rotation: PLAYER_FLAP_ROT,
            frame: 0,
            flapped: false,
            loop_iter: 0,
            cycle_pos: 0,
        }
    }

    /// Flap upward; ignored once the bird is far above the screen
    pub fn flap(&mut self) -> bool {
        if self.pos.y > -2.0 * PLAYER_HEIGHT as f32 {
            self.vel_y = PLAYER_FLAP_ACC;
            self.flapped = true;
            return true;
        }
        false
    }

    /// Advance the wing animation by one loop iteration
    pub fn animate(&mut self) {
        if (self.loop_iter + 1) % FLAP_FRAME_TICKS == 0 {
            self.frame = FLAP_CYCLE[self.cycle_pos];
            self.cycle_pos = (self.cycle_pos + 1) % FLAP_CYCLE.len();
        }
        self.loop_iter = (self.loop_iter + 1) % LOOP_ITER_WRAP;
    }

    /// Apply rotation decay, gravity and vertical movement for one frame
    ///
    /// The bird never sinks below the ground line.
    pub fn step(&mut self, ground_y: f32) {
        if self.rotation > -90.0 {
            self.rotation -= PLAYER_VEL_ROT;
        }

        if self.vel_y < PLAYER_MAX_VEL_Y && !self.flapped {
            self.vel_y += PLAYER_ACC_Y;
        }
        if self.flapped {
            self.flapped = false;
            self.rotation = PLAYER_FLAP_ROT;
        }

        let room = ground_y - self.pos.y - PLAYER_HEIGHT as f32;
        self.pos.y += self.vel_y.min(room);
    }

    /// Rotation as drawn (the nose never points up more than the threshold)
    pub fn visible_rotation(&self) -> f32 {
        self.rotation.min(PLAYER_ROT_THR)
    }

    /// Horizontal centre, used for scoring
    pub fn mid_x(&self) -> f32 {
        self.pos.x + PLAYER_WIDTH as f32 / 2.0
    }

    /// Pixel rect sized to the hitmask of the current wing frame
    pub fn pixel_rect(&self, masks: &CollisionMasks) -> PixelRect {
        let mask = masks.player_frame(self.frame);
        PixelRect::at(self.pos, mask.width(), mask.height())
    }

    pub fn hits_ground(&self, ground_y: f32) -> bool {
        self.pos.y + PLAYER_HEIGHT as f32 >= ground_y - 1.0
    }

    /// Pixel-accurate test against every pipe
    pub fn hits_pipe(&self, pairs: &[PipePair], masks: &CollisionMasks) -> bool {
        let rect = self.pixel_rect(masks);
        let mask = masks.player_frame(self.frame);

        pairs.iter().flat_map(|pair| pair.pipes()).any(|pipe| {
            let pipe_mask = match pipe.kind {
                PipeKind::Upper => &masks.pipe_upper,
                PipeKind::Lower => &masks.pipe_lower,
            };
            pixel_collision(rect, pipe.pixel_rect(pipe_mask), mask, pipe_mask)
        })
    }

    pub fn draw(&self, sizes: &SpriteSizes, list: &mut DrawList) {
        let sprite = SpriteId::Bird(self.frame.min(2) as u8);
        let size: UVec2 = sizes.get(sprite);
        list.sprite_at(sprite, self.pos, size, self.visible_rotation());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::Hitmask;
    use std::sync::Arc;

    fn player() -> Player {
        Player::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    #[test]
    fn test_start_position() {
        let p = player();
        assert_eq!(p.pos, Vec2::new(57.0, 244.0));
        assert_eq!(p.vel_y, PLAYER_FLAP_ACC);
        assert_eq!(p.rotation, PLAYER_FLAP_ROT);
    }

    #[test]
    fn test_gravity_accelerates_to_terminal_velocity() {
        let mut p = player();
        p.pos.y = 0.0;
        p.vel_y = 8.0;
        p.step(10_000.0);
        assert_eq!(p.vel_y, 9.0);
        p.step(10_000.0);
        assert_eq!(p.vel_y, PLAYER_MAX_VEL_Y);
        p.step(10_000.0);
        assert_eq!(p.vel_y, PLAYER_MAX_VEL_Y);
        assert_eq!(p.pos.y, 29.0);
    }

    #[test]
    fn test_flap_resets_velocity_and_rotation() {
        let mut p = player();
        p.vel_y = 6.0;
        p.rotation = -60.0;
        let y = p.pos.y;
        assert!(p.flap());
        p.step(GROUND_Y);
        assert_eq!(p.vel_y, PLAYER_FLAP_ACC);
        assert_eq!(p.rotation, PLAYER_FLAP_ROT);
        assert_eq!(p.pos.y, y + PLAYER_FLAP_ACC);
    }

    #[test]
    fn test_flap_ignored_far_above_screen() {
        let mut p = player();
        p.pos.y = -2.0 * PLAYER_HEIGHT as f32;
        p.vel_y = 3.0;
        assert!(!p.flap());
        assert_eq!(p.vel_y, 3.0);
    }

    #[test]
    fn test_never_sinks_below_ground() {
        let mut p = player();
        p.pos.y = GROUND_Y - PLAYER_HEIGHT as f32 - 2.0;
        p.vel_y = PLAYER_MAX_VEL_Y;
        p.step(GROUND_Y);
        assert!((p.pos.y + PLAYER_HEIGHT as f32 - GROUND_Y).abs() < 1e-3);
        assert!(p.hits_ground(GROUND_Y));
    }

    #[test]
    fn test_rotation_decays_to_floor() {
        let mut p = player();
        p.pos.y = 0.0;
        for _ in 0..100 {
            p.step(10_000.0);
        }
        assert!(p.rotation <= -90.0);
        assert!(p.rotation > -90.0 - PLAYER_VEL_ROT);
        assert_eq!(p.visible_rotation(), p.rotation);

        p.rotation = 45.0;
        assert_eq!(p.visible_rotation(), PLAYER_ROT_THR);
    }

    #[test]
    fn test_animation_cycle() {
        let mut p = player();
        let mut frames = Vec::new();
        for _ in 0..15 {
            p.animate();
            frames.push(p.frame);
        }
        assert_eq!(frames, vec![0, 0, 0, 0, 0, 1, 1, 1, 2, 2, 2, 1, 1, 1, 0]);
    }

    #[test]
    fn test_hits_pipe_pixel_accurate() {
        let masks = CollisionMasks::solid();
        let mut p = player();
        p.pos = Vec2::new(57.0, 200.0);

        let gap_around_bird = PipePair::with_gap(60.0, 180.0);
        assert!(!p.hits_pipe(&[gap_around_bird], &masks));

        let gap_below_bird = PipePair::with_gap(60.0, 250.0);
        assert!(p.hits_pipe(&[gap_below_bird], &masks));
    }

    fn masks_with_bird(bird: Hitmask) -> CollisionMasks {
        let bird = Arc::new(bird);
        CollisionMasks {
            player: [bird.clone(), bird.clone(), bird],
            ..CollisionMasks::solid()
        }
    }

    #[test]
    fn test_hits_pipe_uses_loaded_bird_size() {
        let mut p = player();
        p.pos = Vec2::new(57.0, 200.0);
        let pipe = PipePair::with_gap(60.0, 250.0);

        // Transparent art never collides, whatever its size
        let clear = masks_with_bird(Hitmask::from_fn(30, 20, |_, _| false));
        assert!(!p.hits_pipe(&[pipe], &clear));

        // Only the bottom-right pixel is opaque: y 219 sits in the upper pipe (ends at 250)
        let corner = masks_with_bird(Hitmask::from_fn(30, 20, |x, y| x == 29 && y == 19));
        assert_eq!(p.pixel_rect(&corner), PixelRect::new(57, 200, 30, 20));
        assert!(p.hits_pipe(&[pipe], &corner));

        // Same pixel, but the pipe starts one column to its right
        let beside = PipePair::with_gap(57.0 + 30.0, 250.0);
        assert!(!p.hits_pipe(&[beside], &corner));
    }

    #[test]
    fn test_hits_pipe_uses_loaded_pipe_size() {
        let mut p = player();
        p.pos = Vec2::new(57.0, 200.0);
        // Shorter pipe art: upper pipe spans only its top 100 rows (y -70..30)
        let short_pipe = Arc::new(Hitmask::solid(PIPE_WIDTH, 100));
        let masks = CollisionMasks {
            pipe_upper: short_pipe.clone(),
            pipe_lower: short_pipe,
            ..CollisionMasks::solid()
        };
        let pair = PipePair::with_gap(60.0, 250.0);
        assert!(!p.hits_pipe(&[pair], &masks));
    }
}
