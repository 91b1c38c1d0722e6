use crate::geometry::{Direction, Playfield, Rect, Vec2};
use crate::input::InputState;

use super::Entity;

pub const PLAYER_WIDTH: f32 = 56.0;
pub const PLAYER_HEIGHT: f32 = 48.0;

/// Pixels per frame per axis.
pub const NORMAL_SPEED: f32 = 10.0;
pub const BOOST_SPEED: f32 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifeState {
    Normal,
    Invincible,
}

/// Which face the bird shows. `Facing` is the directional image; the other
/// two are one-off reactions that last until the bird next moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expression {
    Facing,
    Joy,
    Sorrow,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    pub speed: f32,
    pub facing: Direction,
    pub state: LifeState,
    /// Only meaningful while `state` is `Invincible`.
    pub invincible_frames: i32,
    pub expression: Expression,
    pub alive: bool,
}

impl Player {
    pub fn new(center: Vec2) -> Self {
        Self {
            rect: Rect::new(center, PLAYER_WIDTH, PLAYER_HEIGHT),
            speed: NORMAL_SPEED,
            facing: Direction::Right,
            state: LifeState::Normal,
            invincible_frames: -1,
            expression: Expression::Facing,
            alive: true,
        }
    }

    /// Move according to the held keys. A move that would leave the
    /// playfield on either axis is undone on both axes.
    pub fn apply_input(&mut self, input: &InputState, field: &Playfield) {
        self.speed = if input.boost { BOOST_SPEED } else { NORMAL_SPEED };

        let (dx, dy) = input.movement();
        let delta = Vec2::new(dx as f32, dy as f32) * self.speed;
        self.rect.translate(delta);
        if !field.contains(&self.rect) {
            self.rect.translate(-delta);
        }

        if let Some(direction) = Direction::from_components(dx, dy) {
            self.facing = direction;
            self.expression = Expression::Facing;
        }
    }

    /// Count down invincibility; falls back to normal once it runs out.
    pub fn tick_invincibility(&mut self) {
        if self.state != LifeState::Invincible {
            return;
        }
        self.invincible_frames -= 1;
        if self.invincible_frames < 0 {
            self.state = LifeState::Normal;
        }
    }

    pub fn set_state(&mut self, state: LifeState, duration_frames: i32) {
        self.state = state;
        self.invincible_frames = duration_frames;
    }

    pub fn is_invincible(&self) -> bool {
        self.state == LifeState::Invincible
    }

    pub fn cheer(&mut self) {
        self.expression = Expression::Joy;
    }

    pub fn destroy(&mut self) {
        self.expression = Expression::Sorrow;
        self.alive = false;
    }
}

impl Entity for Player {
    fn hitbox(&self) -> Rect {
        self.rect
    }

    /// Movement comes from [`Player::apply_input`]; the frame tick itself
    /// only runs the invincibility timer.
    fn update(&mut self, _field: &Playfield) {
        self.tick_invincibility();
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}
