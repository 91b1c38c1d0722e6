use rand::Rng;

use crate::geometry::{Playfield, Rect, Vec2};

use super::Entity;

pub const ENEMY_WIDTH: f32 = 64.0;
pub const ENEMY_HEIGHT: f32 = 48.0;
pub const DESCENT_SPEED: f32 = 6.0;
/// Number of alien sprites an enemy may be drawn with.
pub const ENEMY_VARIANTS: u8 = 3;

const MIN_BOUND: f32 = 50.0;
const MIN_DROP_INTERVAL: u64 = 50;
const MAX_DROP_INTERVAL: u64 = 300;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyState {
    Descending,
    Stopped,
}

/// How often a stopped enemy drops a bomb.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropCadence {
    /// On every frame number divisible by the interval.
    Every(u64),
    /// Disabled for good by an EMP.
    Never,
}

impl DropCadence {
    pub fn fires_on(self, frame: u64) -> bool {
        match self {
            DropCadence::Every(interval) => interval != 0 && frame % interval == 0,
            DropCadence::Never => false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub rect: Rect,
    pub velocity: Vec2,
    /// Altitude at which descent stops.
    pub bound: f32,
    pub state: EnemyState,
    pub cadence: DropCadence,
    /// Set by an EMP; drawn differently.
    pub disabled: bool,
    pub variant: u8,
}

impl Enemy {
    /// An enemy centred on the top edge at `x`.
    pub fn new(x: f32, bound: f32, drop_interval: u64, variant: u8) -> Self {
        Self {
            rect: Rect::new(Vec2::new(x, 0.0), ENEMY_WIDTH, ENEMY_HEIGHT),
            velocity: Vec2::new(0.0, DESCENT_SPEED),
            bound,
            state: EnemyState::Descending,
            cadence: DropCadence::Every(drop_interval),
            disabled: false,
            variant,
        }
    }

    /// A fresh enemy at a random column with a random stop altitude and
    /// bomb cadence.
    pub fn spawn(rng: &mut impl Rng, field: &Playfield) -> Self {
        let x = rng.gen_range(0.0..=field.width);
        let bound = rng.gen_range(MIN_BOUND..=(field.height / 2.0).max(MIN_BOUND));
        let interval = rng.gen_range(MIN_DROP_INTERVAL..=MAX_DROP_INTERVAL);
        let variant = rng.gen_range(0..ENEMY_VARIANTS);
        Self::new(x, bound, interval, variant)
    }

    /// Whether this enemy drops a bomb on `frame`.
    pub fn drops_bomb_on(&self, frame: u64) -> bool {
        self.state == EnemyState::Stopped && self.cadence.fires_on(frame)
    }

    pub fn disable(&mut self) {
        self.cadence = DropCadence::Never;
        self.disabled = true;
    }
}

impl Entity for Enemy {
    fn hitbox(&self) -> Rect {
        self.rect
    }

    fn update(&mut self, _field: &Playfield) {
        if self.rect.center.y > self.bound {
            self.velocity = Vec2::ZERO;
            self.state = EnemyState::Stopped;
        }
        self.rect.translate(self.velocity);
    }

    /// Enemies only leave play by being shot.
    fn is_alive(&self) -> bool {
        true
    }
}
