//! Ground animals patrolling along the base strip
//!
//! Purely decorative: they never take part in collision checks.

use glam::{UVec2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::assets::SpriteId;
use crate::consts::{ANIMAL_SCALE_DIVISOR, ANIMAL_WRAP_MARGIN};
use crate::renderer::{DrawList, SpriteSizes};

/// Animal body type, fixes elevation and speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimalKind {
    Fat,
    Normal,
    Tall,
}

impl AnimalKind {
    /// Spawn order, repeated round-robin
    pub const ALL: [AnimalKind; 3] = [AnimalKind::Fat, AnimalKind::Normal, AnimalKind::Tall];

    /// Pixels above the ground line
    pub fn ground_offset(&self) -> f32 {
        match self {
            AnimalKind::Fat => 20.0,
            AnimalKind::Normal => 15.0,
            AnimalKind::Tall => 25.0,
        }
    }

    /// Pixels per frame
    pub fn speed(&self) -> f32 {
        match self {
            AnimalKind::Fat => 0.5,
            AnimalKind::Normal => 1.0,
            AnimalKind::Tall => 2.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnimalKind::Fat => "fat",
            AnimalKind::Normal => "normal",
            AnimalKind::Tall => "tall",
        }
    }
}

/// A single ground animal
#[derive(Debug, Clone, PartialEq)]
pub struct GroundAnimal {
    pub pos: Vec2,
    speed: f32,
    /// +1 moving right, -1 moving left
    pub direction: f32,
    kind: AnimalKind,
}

impl GroundAnimal {
    pub fn new(kind: AnimalKind, x: f32, ground_y: f32) -> Self {
        Self {
            pos: Vec2::new(x, ground_y - kind.ground_offset()),
            speed: kind.speed(),
            direction: 1.0,
            kind,
        }
    }

    pub fn kind(&self) -> AnimalKind {
        self.kind
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }
}

/// All animals walking the ground strip
#[derive(Debug, Clone)]
pub struct GroundAnimals {
    animals: Vec<GroundAnimal>,
    screen_width: f32,
    ground_y: f32,
}

impl GroundAnimals {
    pub fn new(screen_width: f32, ground_y: f32) -> Self {
        Self {
            animals: Vec::new(),
            screen_width,
            ground_y,
        }
    }

    /// Add `count` animals cycling fat, normal, tall at random x positions
    pub fn spawn<R: Rng>(&mut self, count: usize, rng: &mut R) {
        let width = (self.screen_width as i32).max(1);
        for kind in AnimalKind::ALL.iter().cycle().take(count) {
            let x = rng.random_range(0..width) as f32;
            self.animals.push(GroundAnimal::new(*kind, x, self.ground_y));
        }
        log::debug!("Spawned {} ground animals", count);
    }

    /// Walk every animal one frame, wrapping at the screen margins
    ///
    /// Only the left wrap turns an animal around; the right wrap sends it
    /// back to the left margin still heading right.
    pub fn update(&mut self) {
        let right_bound = self.screen_width + ANIMAL_WRAP_MARGIN;
        for animal in &mut self.animals {
            animal.pos.x += animal.speed * animal.direction;

            if animal.pos.x < -ANIMAL_WRAP_MARGIN {
                animal.pos.x = right_bound;
                animal.direction = -1.0;
            } else if animal.pos.x > right_bound {
                animal.pos.x = -ANIMAL_WRAP_MARGIN;
                animal.direction = 1.0;
            }
        }
    }

    pub fn animals(&self) -> &[GroundAnimal] {
        &self.animals
    }

    pub fn animals_mut(&mut self) -> &mut [GroundAnimal] {
        &mut self.animals
    }

    pub fn clear(&mut self) {
        self.animals.clear();
    }

    /// Queue each animal's sprite shrunk 5x, centred on its position
    pub fn draw(&self, sizes: &SpriteSizes, list: &mut DrawList) {
        for animal in &self.animals {
            let sprite = SpriteId::Animal(animal.kind);
            let full = sizes.get(sprite);
            let size = UVec2::new(full.x / ANIMAL_SCALE_DIVISOR, full.y / ANIMAL_SCALE_DIVISOR);
            let center = Vec2::new(animal.pos.x.trunc(), animal.pos.y.trunc());
            list.sprite(sprite, center, size, 0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{GROUND_Y, SCREEN_WIDTH};
    use crate::renderer::DrawCommand;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn single(kind: AnimalKind, x: f32, direction: f32) -> GroundAnimals {
        let mut animals = GroundAnimals::new(SCREEN_WIDTH, GROUND_Y);
        let mut animal = GroundAnimal::new(kind, x, GROUND_Y);
        animal.direction = direction;
        animals.animals.push(animal);
        animals
    }

    #[test]
    fn test_spawn_cycles_kinds() {
        let mut animals = GroundAnimals::new(SCREEN_WIDTH, GROUND_Y);
        animals.spawn(5, &mut Pcg32::seed_from_u64(1));

        let kinds: Vec<_> = animals.animals().iter().map(|a| a.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                AnimalKind::Fat,
                AnimalKind::Normal,
                AnimalKind::Tall,
                AnimalKind::Fat,
                AnimalKind::Normal
            ]
        );
        for animal in animals.animals() {
            assert!(animal.pos.x >= 0.0 && animal.pos.x < SCREEN_WIDTH);
            assert_eq!(animal.pos.x.fract(), 0.0);
            assert_eq!(animal.direction, 1.0);
            assert_eq!(animal.pos.y, GROUND_Y - animal.kind().ground_offset());
            assert_eq!(animal.speed(), animal.kind().speed());
        }
    }

    #[test]
    fn test_spawn_is_deterministic_per_seed() {
        let mut a = GroundAnimals::new(SCREEN_WIDTH, GROUND_Y);
        let mut b = GroundAnimals::new(SCREEN_WIDTH, GROUND_Y);
        a.spawn(3, &mut Pcg32::seed_from_u64(42));
        b.spawn(3, &mut Pcg32::seed_from_u64(42));
        assert_eq!(a.animals(), b.animals());
    }

    #[test]
    fn test_kind_parameters() {
        assert_eq!(AnimalKind::Fat.ground_offset(), 20.0);
        assert_eq!(AnimalKind::Normal.ground_offset(), 15.0);
        assert_eq!(AnimalKind::Tall.ground_offset(), 25.0);
        assert_eq!(AnimalKind::Fat.speed(), 0.5);
        assert_eq!(AnimalKind::Normal.speed(), 1.0);
        assert_eq!(AnimalKind::Tall.speed(), 2.0);
    }

    #[test]
    fn test_moves_by_speed() {
        let mut animals = single(AnimalKind::Tall, 100.0, 1.0);
        animals.update();
        assert_eq!(animals.animals()[0].pos.x, 102.0);

        let mut animals = single(AnimalKind::Normal, 100.0, -1.0);
        animals.update();
        assert_eq!(animals.animals()[0].pos.x, 99.0);
    }

    #[test]
    fn test_left_wrap_turns_around() {
        let mut animals = single(AnimalKind::Fat, -21.0, 1.0);
        animals.update();
        let animal = &animals.animals()[0];
        assert_eq!(animal.pos.x, SCREEN_WIDTH + 20.0);
        assert_eq!(animal.direction, -1.0);
    }

    #[test]
    fn test_right_wrap_resets_heading_right() {
        let mut animals = single(AnimalKind::Fat, SCREEN_WIDTH + 21.0, -1.0);
        animals.update();
        let animal = &animals.animals()[0];
        assert_eq!(animal.pos.x, -20.0);
        assert_eq!(animal.direction, 1.0);
    }

    #[test]
    fn test_rightward_animal_never_reverses() {
        // Animals spawned heading right only ever take the right-bound wrap
        let mut animals = single(AnimalKind::Tall, 0.0, 1.0);
        for _ in 0..1_000 {
            animals.update();
            assert_eq!(animals.animals()[0].direction, 1.0);
        }
    }

    #[test]
    fn test_draw_shrinks_sprite() {
        let mut animals = single(AnimalKind::Normal, 10.7, 1.0);
        animals.animals_mut()[0].pos.y = 380.9;
        let sizes = SpriteSizes::nominal().with(SpriteId::Animal(AnimalKind::Normal), UVec2::new(104, 98));
        let mut list = DrawList::new();
        animals.draw(&sizes, &mut list);

        match list.commands()[0] {
            DrawCommand::Sprite { center, size, .. } => {
                assert_eq!(size, UVec2::new(20, 19));
                assert_eq!(center, Vec2::new(10.0, 380.0));
            }
            ref other => panic!("unexpected command {other:?}"),
        }
    }
}
