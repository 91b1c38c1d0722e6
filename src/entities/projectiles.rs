use std::ops::RangeInclusive;

use rand::Rng;

use crate::geometry::{direction_vector, Direction, Playfield, Rect, Vec2};

use super::{Enemy, Entity, Player};

// ── Beams ─────────────────────────────────────────────────────────────────────

pub const BEAM_SPEED: f32 = 10.0;
pub const BEAM_LENGTH: f32 = 48.0;
pub const BEAM_THICKNESS: f32 = 12.0;
/// A multi-beam volley fans out over ±this many degrees.
pub const SPREAD_DEGREES: f32 = 50.0;

#[derive(Clone, Debug)]
pub struct Beam {
    pub rect: Rect,
    /// Unit vector of travel.
    pub velocity: Vec2,
    /// Screen heading in degrees, used to orient the sprite.
    pub heading: f32,
    pub speed: f32,
    pub alive: bool,
}

impl Beam {
    /// A beam leaving `firer` along `facing` turned by `offset_degrees`
    /// (counter-clockwise positive). It starts half the firer's size away
    /// from the firer's center.
    pub fn new(firer: &Rect, facing: Direction, offset_degrees: f32) -> Self {
        let heading = facing.heading() + offset_degrees;
        let velocity = Vec2::from_heading(heading);
        let center = firer.center
            + Vec2::new(
                velocity.x * firer.width / 2.0,
                velocity.y * firer.height / 2.0,
            );
        Self {
            rect: Rect::rotated(center, BEAM_LENGTH, BEAM_THICKNESS, heading),
            velocity,
            heading,
            speed: BEAM_SPEED,
            alive: true,
        }
    }

    pub fn fire(player: &Player, offset_degrees: f32) -> Self {
        Self::new(&player.rect, player.facing, offset_degrees)
    }
}

impl Entity for Beam {
    fn hitbox(&self) -> Rect {
        self.rect
    }

    fn update(&mut self, field: &Playfield) {
        self.rect.translate(self.velocity * self.speed);
        if !field.contains(&self.rect) {
            self.alive = false;
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

/// A fan of beams fired in one volley.
pub struct MultiBeam;

impl MultiBeam {
    /// Angle offsets of a `count`-beam fan, evenly spaced from
    /// -`SPREAD_DEGREES` to +`SPREAD_DEGREES`. Fewer than two beams cannot
    /// span the fan, so that case degenerates to a single straight shot.
    pub fn offsets(count: usize) -> Vec<f32> {
        if count < 2 {
            return vec![0.0];
        }
        let step = 2.0 * SPREAD_DEGREES / (count - 1) as f32;
        (0..count)
            .map(|i| -SPREAD_DEGREES + step * i as f32)
            .collect()
    }

    pub fn generate(player: &Player, count: usize) -> Vec<Beam> {
        Self::offsets(count)
            .into_iter()
            .map(|offset| Beam::fire(player, offset))
            .collect()
    }
}

// ── Bombs ─────────────────────────────────────────────────────────────────────

pub const BOMB_SPEED: f32 = 6.0;
pub const BOMB_RADIUS: RangeInclusive<u32> = 10..=50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BombState {
    Active,
    /// Neutralized by an EMP: slower, and harmless on contact.
    Inactive,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BombColor {
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
}

impl BombColor {
    pub const PALETTE: [BombColor; 6] = [
        BombColor::Red,
        BombColor::Green,
        BombColor::Blue,
        BombColor::Yellow,
        BombColor::Magenta,
        BombColor::Cyan,
    ];
}

#[derive(Clone, Debug)]
pub struct Bomb {
    pub rect: Rect,
    pub radius: u32,
    pub color: BombColor,
    /// Unit vector fixed at launch; bombs never re-aim.
    pub direction: Vec2,
    pub speed: f32,
    pub state: BombState,
    pub alive: bool,
}

impl Bomb {
    /// A bomb dropped from the bottom-centre of `source`, aimed at where
    /// `target` is right now. `None` if the two centers coincide.
    pub fn new(source: &Rect, target: &Rect, radius: u32, color: BombColor) -> Option<Self> {
        let direction = direction_vector(source, target)?;
        let center = Vec2::new(source.center.x, source.center.y + source.height / 2.0);
        let diameter = 2.0 * radius as f32;
        Some(Self {
            rect: Rect::new(center, diameter, diameter),
            radius,
            color,
            direction,
            speed: BOMB_SPEED,
            state: BombState::Active,
            alive: true,
        })
    }

    /// Drop a bomb with random size and colour from `enemy` toward `player`.
    pub fn spawn(enemy: &Enemy, player: &Player, rng: &mut impl Rng) -> Option<Self> {
        let radius = rng.gen_range(BOMB_RADIUS);
        let color = BombColor::PALETTE[rng.gen_range(0..BombColor::PALETTE.len())];
        Self::new(&enemy.rect, &player.rect, radius, color)
    }

    pub fn neutralize(&mut self) {
        self.speed /= 2.0;
        self.state = BombState::Inactive;
    }

    pub fn is_active(&self) -> bool {
        self.state == BombState::Active
    }
}

impl Entity for Bomb {
    fn hitbox(&self) -> Rect {
        self.rect
    }

    fn update(&mut self, field: &Playfield) {
        self.rect.translate(self.direction * self.speed);
        if !field.contains(&self.rect) {
            self.alive = false;
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}
