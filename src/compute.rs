//! Per-frame game logic.
//!
//! [`step`] advances a [`GameState`] by exactly one frame: abilities, spawns,
//! the four collision passes and entity motion, in a fixed order. Drawing
//! and frame pacing are left to [`crate::game_loop`]. All randomness comes
//! through the injected RNG so tests can seed it.

use rand::Rng;

use crate::collision::{group_collide, sprite_collide};
use crate::config::GameConfig;
use crate::entities::{
    trigger_emp, update_group, Beam, Bomb, Enemy, Entity, Explosion, LifeState, MultiBeam, Player,
    Shield, BOMB_EXPLOSION_LIFE, ENEMY_EXPLOSION_LIFE, PLAYER_HEIGHT, PLAYER_WIDTH,
};
use crate::geometry::{Playfield, Vec2};
use crate::input::{Action, FrameInput};
use crate::score::{Ability, Score, BOMB_POINTS, ENEMY_POINTS};

const PLAYER_START: Vec2 = Vec2::new(900.0, 400.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Gameplay tunables that stay fixed for a whole run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rules {
    pub enemy_spawn_interval: u64,
    pub invincibility_frames: i32,
    pub shield_lifetime: i32,
    pub multi_beam_count: usize,
}

impl From<&GameConfig> for Rules {
    fn from(config: &GameConfig) -> Self {
        Self {
            enemy_spawn_interval: config.enemy_spawn_interval,
            invincibility_frames: config.invincibility_frames,
            shield_lifetime: config.shield_lifetime,
            multi_beam_count: config.multi_beam_count,
        }
    }
}

/// The entire game state, owned by the loop and handed to each subsystem.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bombs: Vec<Bomb>,
    pub beams: Vec<Beam>,
    pub explosions: Vec<Explosion>,
    /// Never more than one.
    pub shields: Vec<Shield>,
    pub score: Score,
    pub status: GameStatus,
    pub frame: u64,
    pub field: Playfield,
    pub rules: Rules,
}

/// How a frame ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
    PlayerDestroyed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameReport {
    pub outcome: FrameOutcome,
    /// An EMP went off this frame; the loop shows its flash.
    pub emp_fired: bool,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the opening state: bird on the right facing right, nothing else in
/// play, frame counter at zero.
pub fn init_state(config: &GameConfig) -> GameState {
    let field = config.playfield();
    let start = Vec2::new(
        PLAYER_START.x.min(field.width - PLAYER_WIDTH / 2.0).max(PLAYER_WIDTH / 2.0),
        PLAYER_START.y.min(field.height - PLAYER_HEIGHT / 2.0).max(PLAYER_HEIGHT / 2.0),
    );
    GameState {
        player: Player::new(start),
        enemies: Vec::new(),
        bombs: Vec::new(),
        beams: Vec::new(),
        explosions: Vec::new(),
        shields: Vec::new(),
        score: Score::new(config.starting_score),
        status: GameStatus::Playing,
        frame: 0,
        field,
        rules: Rules::from(config),
    }
}

// ── Input-driven actions ─────────────────────────────────────────────────────

/// Fire one beam, or a full fan while the boost key is held.
pub fn fire(state: &mut GameState, multi: bool) {
    if multi {
        let volley = MultiBeam::generate(&state.player, state.rules.multi_beam_count);
        state.beams.extend(volley);
    } else {
        state.beams.push(Beam::fire(&state.player, 0.0));
    }
}

/// Returns whether the pulse went off.
pub fn activate_emp(state: &mut GameState) -> bool {
    if !state.score.spend(Ability::Emp) {
        tracing::debug!(score = state.score.value(), "EMP refused");
        return false;
    }
    trigger_emp(&mut state.enemies, &mut state.bombs);
    true
}

/// Only from the normal state; re-activating while invincible is refused.
pub fn activate_invincibility(state: &mut GameState) -> bool {
    if state.player.is_invincible() || !state.score.spend(Ability::Invincibility) {
        tracing::debug!(score = state.score.value(), "invincibility refused");
        return false;
    }
    state
        .player
        .set_state(LifeState::Invincible, state.rules.invincibility_frames);
    tracing::info!(frames = state.rules.invincibility_frames, "invincibility on");
    true
}

/// At most one shield at a time.
pub fn raise_shield(state: &mut GameState) -> bool {
    if !state.shields.is_empty() || !state.score.spend(Ability::Shield) {
        tracing::debug!(score = state.score.value(), "shield refused");
        return false;
    }
    state
        .shields
        .push(Shield::new(&state.player, state.rules.shield_lifetime));
    tracing::info!(facing = ?state.player.facing, "shield raised");
    true
}

// ── Spawning ─────────────────────────────────────────────────────────────────

pub fn spawn_enemies(state: &mut GameState, rng: &mut impl Rng) {
    if state.frame % state.rules.enemy_spawn_interval.max(1) != 0 {
        return;
    }
    let enemy = Enemy::spawn(rng, &state.field);
    tracing::debug!(x = enemy.rect.center.x, bound = enemy.bound, "enemy spawned");
    state.enemies.push(enemy);
}

/// Every stopped enemy whose cadence lands on this frame drops a bomb aimed
/// at the player's current position.
pub fn drop_bombs(state: &mut GameState, rng: &mut impl Rng) {
    for enemy in &state.enemies {
        if !enemy.drops_bomb_on(state.frame) {
            continue;
        }
        match Bomb::spawn(enemy, &state.player, rng) {
            Some(bomb) => state.bombs.push(bomb),
            None => tracing::debug!("enemy sits on the player; bomb skipped"),
        }
    }
}

// ── Collision passes ─────────────────────────────────────────────────────────

pub fn resolve_beam_enemy(state: &mut GameState) {
    for hit in group_collide(&mut state.enemies, &mut state.beams) {
        state
            .explosions
            .push(Explosion::new(&hit.first.hitbox(), ENEMY_EXPLOSION_LIFE));
        state.score.add(ENEMY_POINTS);
        state.player.cheer();
        tracing::debug!(beams = hit.struck.len(), "enemy shot down");
    }
}

pub fn resolve_beam_bomb(state: &mut GameState) {
    for hit in group_collide(&mut state.bombs, &mut state.beams) {
        state
            .explosions
            .push(Explosion::new(&hit.first.hitbox(), BOMB_EXPLOSION_LIFE));
        state.score.add(BOMB_POINTS);
    }
}

/// Returns `true` if an active bomb reached an unprotected player.
pub fn resolve_player_bomb(state: &mut GameState) -> bool {
    let hitbox = state.player.hitbox();
    for bomb in sprite_collide(&hitbox, &mut state.bombs) {
        if !bomb.is_active() {
            continue;
        }
        if state.player.is_invincible() {
            state
                .explosions
                .push(Explosion::new(&bomb.hitbox(), BOMB_EXPLOSION_LIFE));
            state.score.add(BOMB_POINTS);
        } else {
            state.player.destroy();
            state.status = GameStatus::GameOver;
            return true;
        }
    }
    false
}

pub fn resolve_shield_bomb(state: &mut GameState) {
    for hit in group_collide(&mut state.shields, &mut state.bombs) {
        state
            .explosions
            .push(Explosion::new(&hit.first.hitbox(), BOMB_EXPLOSION_LIFE));
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// A finished game stays finished: once the status is `GameOver`, every
/// further call reports `PlayerDestroyed` and leaves the state untouched.
pub fn step(state: &mut GameState, input: &FrameInput, rng: &mut impl Rng) -> FrameReport {
    let mut emp_fired = false;

    if state.status == GameStatus::GameOver {
        return FrameReport {
            outcome: FrameOutcome::PlayerDestroyed,
            emp_fired,
        };
    }

    // ── 1. Discrete actions ──────────────────────────────────────────────────
    for action in &input.actions {
        match action {
            Action::Quit => {
                tracing::info!(frame = state.frame, "quit requested");
                return FrameReport {
                    outcome: FrameOutcome::Quit,
                    emp_fired,
                };
            }
            Action::Fire => fire(state, input.held.boost),
            Action::Emp => emp_fired |= activate_emp(state),
            Action::Invincibility => {
                activate_invincibility(state);
            }
            Action::Shield => {
                raise_shield(state);
            }
        }
    }

    // ── 2. Spawns ────────────────────────────────────────────────────────────
    spawn_enemies(state, rng);
    drop_bombs(state, rng);

    // ── 3. Collisions ────────────────────────────────────────────────────────
    resolve_beam_enemy(state);
    resolve_beam_bomb(state);
    if resolve_player_bomb(state) {
        tracing::info!(
            frame = state.frame,
            score = state.score.value(),
            "player destroyed"
        );
        return FrameReport {
            outcome: FrameOutcome::PlayerDestroyed,
            emp_fired,
        };
    }
    resolve_shield_bomb(state);

    // ── 4. Motion ────────────────────────────────────────────────────────────
    let field = state.field;
    state.player.apply_input(&input.held, &field);
    state.player.update(&field);
    update_group(&mut state.beams, &field);
    update_group(&mut state.enemies, &field);
    update_group(&mut state.bombs, &field);
    update_group(&mut state.explosions, &field);
    update_group(&mut state.shields, &field);

    state.frame += 1;

    FrameReport {
        outcome: FrameOutcome::Continue,
        emp_fired,
    }
}
