//! Snowfall particle effect
//!
//! Decorative only. Flakes fall at their own speed with a one-pixel lateral
//! jitter and are recycled at the top once they leave the bottom.

use glam::Vec2;
use rand::Rng;

use crate::renderer::DrawList;

/// Flake colour (RGBA)
pub const SNOW_COLOR: [u8; 4] = [255, 255, 255, 255];

/// A single snowflake
#[derive(Debug, Clone, PartialEq)]
pub struct Snowflake {
    pub pos: Vec2,
    speed: f32,
    size: u32,
}

impl Snowflake {
    /// Pixels fallen per frame
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Circle radius in pixels
    pub fn size(&self) -> u32 {
        self.size
    }
}

/// Screen-wide snowfall
#[derive(Debug, Clone)]
pub struct SnowfallEffect {
    flakes: Vec<Snowflake>,
    screen_width: f32,
    screen_height: f32,
}

impl SnowfallEffect {
    pub fn new<R: Rng>(screen_width: f32, screen_height: f32, count: usize, rng: &mut R) -> Self {
        let width = (screen_width as i32).max(1);
        let height = screen_height as i32;
        let flakes = (0..count)
            .map(|_| Snowflake {
                pos: Vec2::new(
                    rng.random_range(0..width) as f32,
                    rng.random_range(-50..height.max(-49)) as f32,
                ),
                speed: rng.random_range(1..4) as f32,
                size: rng.random_range(1..3),
            })
            .collect();
        Self {
            flakes,
            screen_width,
            screen_height,
        }
    }

    /// Advance every flake by one frame
    pub fn update<R: Rng>(&mut self, rng: &mut R) {
        let width = (self.screen_width as i32).max(1);
        for flake in &mut self.flakes {
            flake.pos.y += flake.speed;
            flake.pos.x += rng.random_range(-1..2) as f32;

            if flake.pos.y > self.screen_height {
                flake.pos.y = rng.random_range(-50..-10) as f32;
                flake.pos.x = rng.random_range(0..width) as f32;
            }

            if flake.pos.x < 0.0 {
                flake.pos.x = self.screen_width;
            } else if flake.pos.x > self.screen_width {
                flake.pos.x = 0.0;
            }
        }
    }

    pub fn flakes(&self) -> &[Snowflake] {
        &self.flakes
    }

    pub fn flakes_mut(&mut self) -> &mut [Snowflake] {
        &mut self.flakes
    }

    pub fn draw(&self, list: &mut DrawList) {
        for flake in &self.flakes {
            let center = Vec2::new(flake.pos.x.trunc(), flake.pos.y.trunc());
            list.circle(center, flake.size as f32, SNOW_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use crate::renderer::DrawCommand;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn effect(count: usize, seed: u64) -> (SnowfallEffect, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let snow = SnowfallEffect::new(SCREEN_WIDTH, SCREEN_HEIGHT, count, &mut rng);
        (snow, rng)
    }

    #[test]
    fn test_initial_ranges() {
        let (snow, _) = effect(500, 3);
        assert_eq!(snow.flakes().len(), 500);
        for flake in snow.flakes() {
            assert!(flake.pos.x >= 0.0 && flake.pos.x < SCREEN_WIDTH);
            assert!(flake.pos.y >= -50.0 && flake.pos.y < SCREEN_HEIGHT);
            assert!((1.0..=3.0).contains(&flake.speed()));
            assert!((1..=2).contains(&flake.size()));
        }
    }

    #[test]
    fn test_fall_and_jitter() {
        let (mut snow, mut rng) = effect(1, 5);
        snow.flakes_mut()[0].pos = Vec2::new(100.0, 10.0);
        let speed = snow.flakes()[0].speed();
        snow.update(&mut rng);

        let flake = &snow.flakes()[0];
        assert_eq!(flake.pos.y, 10.0 + speed);
        assert!((flake.pos.x - 100.0).abs() <= 1.0);
    }

    #[test]
    fn test_respawn_above_screen() {
        let (mut snow, mut rng) = effect(20, 9);
        for _ in 0..50 {
            for flake in snow.flakes_mut() {
                flake.pos.y = SCREEN_HEIGHT;
            }
            snow.update(&mut rng);
            for flake in snow.flakes() {
                assert!(flake.pos.y >= -50.0 && flake.pos.y < -10.0);
                assert!(flake.pos.x >= 0.0 && flake.pos.x <= SCREEN_WIDTH);
            }
        }
    }

    #[test]
    fn test_horizontal_wrap_to_opposite_edge() {
        let (mut snow, mut rng) = effect(1, 11);
        for _ in 0..200 {
            snow.flakes_mut()[0].pos = Vec2::new(0.0, 100.0);
            snow.update(&mut rng);
            let x = snow.flakes()[0].pos.x;
            // A step left from 0 lands on the right edge
            assert!(x == 0.0 || x == 1.0 || x == SCREEN_WIDTH);

            snow.flakes_mut()[0].pos = Vec2::new(SCREEN_WIDTH, 100.0);
            snow.update(&mut rng);
            let x = snow.flakes()[0].pos.x;
            assert!(x == 0.0 || x == SCREEN_WIDTH - 1.0 || x == SCREEN_WIDTH);
        }
    }

    #[test]
    fn test_draw_circles() {
        let (snow, _) = effect(3, 1);
        let mut list = DrawList::new();
        snow.draw(&mut list);
        assert_eq!(list.len(), 3);
        assert!(
            list.commands()
                .iter()
                .all(|c| matches!(c, DrawCommand::Circle { color, .. } if *color == SNOW_COLOR))
        );
    }
}
