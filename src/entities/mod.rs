//! Game entities. Each one owns its hitbox and its per-frame motion rules;
//! nothing here reads or mutates another entity except through explicit
//! arguments (bomb aim, shield placement, the EMP sweep).

mod effects;
mod emp;
mod enemy;
mod player;
mod projectiles;

pub use effects::{
    Explosion, Shield, BOMB_EXPLOSION_LIFE, ENEMY_EXPLOSION_LIFE, EXPLOSION_SIZE,
    SHIELD_LIFETIME, SHIELD_THICKNESS,
};
pub use emp::trigger_emp;
pub use enemy::{
    DropCadence, Enemy, EnemyState, DESCENT_SPEED, ENEMY_HEIGHT, ENEMY_VARIANTS, ENEMY_WIDTH,
};
pub use player::{
    Expression, LifeState, Player, BOOST_SPEED, NORMAL_SPEED, PLAYER_HEIGHT, PLAYER_WIDTH,
};
pub use projectiles::{
    Beam, Bomb, BombColor, BombState, MultiBeam, BEAM_LENGTH, BEAM_SPEED, BEAM_THICKNESS,
    BOMB_RADIUS, BOMB_SPEED, SPREAD_DEGREES,
};

use crate::geometry::{Playfield, Rect};

/// Capability shared by everything that moves, collides and is drawn.
pub trait Entity {
    /// Current collision rectangle.
    fn hitbox(&self) -> Rect;

    /// Advance one frame.
    fn update(&mut self, field: &Playfield);

    /// `false` once the entity should leave every collection.
    fn is_alive(&self) -> bool;
}

/// Update every entity in `group` and drop the ones that died doing so.
pub fn update_group<E: Entity>(group: &mut Vec<E>, field: &Playfield) {
    for entity in group.iter_mut() {
        entity.update(field);
    }
    group.retain(|entity| entity.is_alive());
}
