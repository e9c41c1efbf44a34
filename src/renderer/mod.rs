//! Frame draw lists
//!
//! The simulation never touches pixels. Each frame is turned into an ordered
//! list of draw commands that an external blitter executes back to front.

use glam::{UVec2, Vec2};

use crate::assets::SpriteId;
use crate::consts::{GROUND_Y, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::{GamePhase, GameState};

/// A single draw operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Sprite scaled to `size`, rotated by `rotation` degrees (counter-clockwise)
    /// and centred on `center`
    Sprite {
        sprite: SpriteId,
        center: Vec2,
        size: UVec2,
        rotation: f32,
    },
    /// Filled circle
    Circle {
        center: Vec2,
        radius: f32,
        color: [u8; 4],
    },
}

/// Ordered draw commands for one frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sprite centred on `center`
    pub fn sprite(&mut self, sprite: SpriteId, center: Vec2, size: UVec2, rotation: f32) {
        self.commands.push(DrawCommand::Sprite {
            sprite,
            center,
            size,
            rotation,
        });
    }

    /// Sprite whose unrotated top-left corner is `top_left`
    pub fn sprite_at(&mut self, sprite: SpriteId, top_left: Vec2, size: UVec2, rotation: f32) {
        let center = top_left + size.as_vec2() / 2.0;
        self.sprite(sprite, center, size, rotation);
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: [u8; 4]) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

/// Pixel dimensions of every sprite, indexed by `SpriteId`
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteSizes {
    sizes: [UVec2; SpriteId::COUNT],
}

impl SpriteSizes {
    /// Dimensions of the stock sprite set
    ///
    /// Ground animal art has no stock size; 100x100 stands in until real
    /// sprites are loaded.
    pub fn nominal() -> Self {
        let mut sizes = [UVec2::ZERO; SpriteId::COUNT];
        for id in SpriteId::all() {
            sizes[id.index()] = match id {
                SpriteId::Background => UVec2::new(288, 512),
                SpriteId::Base => UVec2::new(336, 112),
                SpriteId::Digit(1) => UVec2::new(16, 36),
                SpriteId::Digit(_) => UVec2::new(24, 36),
                SpriteId::Message => UVec2::new(184, 267),
                SpriteId::GameOver => UVec2::new(192, 42),
                SpriteId::Bird(_) => UVec2::new(34, 24),
                SpriteId::PipeUpper | SpriteId::PipeLower => UVec2::new(52, 320),
                SpriteId::Animal(_) => UVec2::new(100, 100),
            };
        }
        Self { sizes }
    }

    pub fn get(&self, id: SpriteId) -> UVec2 {
        self.sizes[id.index()]
    }

    pub fn set(&mut self, id: SpriteId, size: UVec2) {
        self.sizes[id.index()] = size;
    }

    pub fn with(mut self, id: SpriteId, size: UVec2) -> Self {
        self.set(id, size);
        self
    }
}

impl Default for SpriteSizes {
    fn default() -> Self {
        Self::nominal()
    }
}

/// Build the full frame, back to front
pub fn render_frame(state: &GameState, sizes: &SpriteSizes) -> DrawList {
    let mut list = DrawList::new();

    if state.settings.background.is_some() {
        list.sprite_at(SpriteId::Background, Vec2::ZERO, sizes.get(SpriteId::Background), 0.0);
    }

    state.pipes.draw(sizes, &mut list);
    list.sprite_at(
        SpriteId::Base,
        Vec2::new(state.ground_x, GROUND_Y),
        sizes.get(SpriteId::Base),
        0.0,
    );
    state.animals.draw(sizes, &mut list);
    state.snow.draw(&mut list);
    state.followers.draw(sizes, &mut list);
    state.player.draw(sizes, &mut list);

    match state.phase {
        GamePhase::Ready => {
            let size = sizes.get(SpriteId::Message);
            let x = ((SCREEN_WIDTH - size.x as f32) / 2.0).trunc();
            let y = (SCREEN_HEIGHT * 0.12).trunc();
            list.sprite_at(SpriteId::Message, Vec2::new(x, y), size, 0.0);
        }
        GamePhase::Playing => draw_score(state.score, sizes, &mut list),
        GamePhase::GameOver => {
            draw_score(state.score, sizes, &mut list);
            let size = sizes.get(SpriteId::GameOver);
            let x = ((SCREEN_WIDTH - size.x as f32) / 2.0).trunc();
            let y = (SCREEN_HEIGHT * 0.2).trunc();
            list.sprite_at(SpriteId::GameOver, Vec2::new(x, y), size, 0.0);
        }
    }

    list
}

/// Score digits centred horizontally near the top of the screen
fn draw_score(score: u32, sizes: &SpriteSizes, list: &mut DrawList) {
    let digits: Vec<SpriteId> = score
        .to_string()
        .bytes()
        .map(|b| SpriteId::Digit(b - b'0'))
        .collect();
    let total_width: u32 = digits.iter().map(|&d| sizes.get(d).x).sum();

    let mut x = (SCREEN_WIDTH - total_width as f32) / 2.0;
    let y = SCREEN_HEIGHT * 0.1;
    for digit in digits {
        let size = sizes.get(digit);
        list.sprite_at(digit, Vec2::new(x, y), size, 0.0);
        x += size.x as f32;
    }
}
