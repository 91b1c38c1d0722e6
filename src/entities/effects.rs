use crate::geometry::{Direction, Playfield, Rect, Vec2};

use super::{Entity, Player};

// ── Explosions ────────────────────────────────────────────────────────────────

pub const EXPLOSION_SIZE: f32 = 60.0;
pub const ENEMY_EXPLOSION_LIFE: i32 = 100;
pub const BOMB_EXPLOSION_LIFE: i32 = 50;

/// Frames each of the two explosion images is shown before swapping.
const FRAME_SPAN: i32 = 10;

#[derive(Clone, Debug)]
pub struct Explosion {
    pub rect: Rect,
    pub life: i32,
    /// 0 = plain image, 1 = flipped image.
    pub frame: usize,
    pub alive: bool,
}

impl Explosion {
    /// An explosion centred where `at` was when it was destroyed.
    pub fn new(at: &Rect, life: i32) -> Self {
        Self {
            rect: Rect::new(at.center, EXPLOSION_SIZE, EXPLOSION_SIZE),
            life,
            frame: 0,
            alive: true,
        }
    }

    pub fn is_flipped(&self) -> bool {
        self.frame == 1
    }
}

impl Entity for Explosion {
    fn hitbox(&self) -> Rect {
        self.rect
    }

    fn update(&mut self, _field: &Playfield) {
        self.life -= 1;
        self.frame = self.life.div_euclid(FRAME_SPAN).rem_euclid(2) as usize;
        if self.life < 0 {
            self.alive = false;
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

// ── Shield ────────────────────────────────────────────────────────────────────

pub const SHIELD_LIFETIME: i32 = 400;
pub const SHIELD_THICKNESS: f32 = 20.0;

/// A wall raised in front of the player. Its placement and orientation are
/// frozen when it is raised; it does not follow the player.
#[derive(Clone, Debug)]
pub struct Shield {
    pub rect: Rect,
    pub facing: Direction,
    pub life: i32,
    pub alive: bool,
}

impl Shield {
    pub fn new(owner: &Player, life: i32) -> Self {
        let facing = owner.facing;
        let offset = facing.vector() * owner.rect.width;
        let center: Vec2 = owner.rect.center + offset;
        Self {
            rect: Rect::rotated(
                center,
                SHIELD_THICKNESS,
                owner.rect.height * 2.0,
                facing.heading(),
            ),
            facing,
            life,
            alive: true,
        }
    }
}

impl Entity for Shield {
    fn hitbox(&self) -> Rect {
        self.rect
    }

    fn update(&mut self, _field: &Playfield) {
        self.life -= 1;
        if self.life <= 0 {
            self.alive = false;
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}
