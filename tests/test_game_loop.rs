use std::collections::VecDeque;
use std::time::Duration;

use bird_shooter::compute::{init_state, raise_shield, GameState};
use bird_shooter::config::GameConfig;
use bird_shooter::entities::*;
use bird_shooter::error::Result;
use bird_shooter::game_loop::*;
use bird_shooter::geometry::{Direction, Playfield, Rect, Vec2};
use bird_shooter::input::{Action, FrameInput, InputState};

use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Fakes ─────────────────────────────────────────────────────────────────────

/// Replays queued frames, then reports idle input forever.
struct ScriptedInput {
    frames: VecDeque<FrameInput>,
}

impl ScriptedInput {
    fn new(frames: impl IntoIterator<Item = FrameInput>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Result<FrameInput> {
        Ok(self.frames.pop_front().unwrap_or_default())
    }
}

#[derive(Default)]
struct RecordingRenderer {
    frames: Vec<Vec<&'static str>>,
    current: Vec<&'static str>,
    flashes: usize,
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self, _field: &Playfield) -> Result<()> {
        self.current.clear();
        Ok(())
    }

    fn draw(&mut self, sprite: Sprite<'_>) -> Result<()> {
        self.current.push(match sprite {
            Sprite::Player(_) => "player",
            Sprite::Beam(_) => "beam",
            Sprite::Enemy(_) => "enemy",
            Sprite::Bomb(_) => "bomb",
            Sprite::Explosion(_) => "explosion",
            Sprite::Score(_) => "score",
            Sprite::Shield(_) => "shield",
        });
        Ok(())
    }

    fn flash_overlay(&mut self) -> Result<()> {
        self.flashes += 1;
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        self.frames.push(std::mem::take(&mut self.current));
        Ok(())
    }
}

#[derive(Default)]
struct RecordingClock {
    waits: usize,
    pauses: Vec<Duration>,
}

impl FrameClock for RecordingClock {
    fn wait_for_next_frame(&mut self) {
        self.waits += 1;
    }

    fn pause(&mut self, duration: Duration) {
        self.pauses.push(duration);
    }
}

fn quit() -> FrameInput {
    FrameInput::with_actions(InputState::default(), [Action::Quit])
}

fn play(
    state: &mut GameState,
    inputs: impl IntoIterator<Item = FrameInput>,
) -> (GameOutcome, RecordingRenderer, RecordingClock) {
    let config = GameConfig::default();
    let mut rng = StdRng::seed_from_u64(7);
    let mut input = ScriptedInput::new(inputs);
    let mut renderer = RecordingRenderer::default();
    let mut clock = RecordingClock::default();
    let outcome = run(
        state,
        &config,
        &mut rng,
        &mut input,
        &mut renderer,
        &mut clock,
    )
    .unwrap();
    (outcome, renderer, clock)
}

fn fresh_state() -> GameState {
    let mut s = init_state(&GameConfig::default());
    s.frame = 1;
    s
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn quit_ends_the_loop_cleanly() {
    let mut s = fresh_state();
    let (outcome, renderer, clock) = play(&mut s, [FrameInput::idle(), FrameInput::idle(), quit()]);
    assert_eq!(
        outcome,
        GameOutcome::Quit {
            score: 10_000,
            frames: 3
        }
    );
    assert_eq!(renderer.frames.len(), 2);
    assert_eq!(clock.waits, 2);
    assert!(clock.pauses.is_empty());
}

#[test]
fn sprites_are_drawn_in_fixed_order() {
    let mut s = fresh_state();
    s.beams.push(Beam::new(
        &Rect::new(Vec2::new(100.0, 500.0), 10.0, 10.0),
        Direction::Right,
        0.0,
    ));
    s.enemies.push(Enemy::new(300.0, 200.0, 60, 0));
    let src = Rect::new(Vec2::new(600.0, 80.0), ENEMY_WIDTH, ENEMY_HEIGHT);
    s.bombs
        .push(Bomb::new(&src, &s.player.rect, 10, BombColor::Cyan).unwrap());
    s.explosions.push(Explosion::new(
        &Rect::new(Vec2::new(200.0, 200.0), 10.0, 10.0),
        BOMB_EXPLOSION_LIFE,
    ));
    assert!(raise_shield(&mut s));

    let (_, renderer, _) = play(&mut s, [FrameInput::idle(), quit()]);
    assert_eq!(
        renderer.frames[0],
        vec!["player", "beam", "enemy", "bomb", "explosion", "score", "shield"]
    );
}

#[test]
fn player_destroyed_ends_with_final_frame_and_pause() {
    let mut s = fresh_state();
    let center = s.player.rect.center;
    let src = Rect::new(Vec2::new(center.x, center.y - 200.0), ENEMY_WIDTH, ENEMY_HEIGHT);
    let mut bomb = Bomb::new(&src, &s.player.rect, 10, BombColor::Red).unwrap();
    bomb.rect.center = center;
    s.bombs.push(bomb);

    let (outcome, renderer, clock) = play(&mut s, [FrameInput::idle()]);
    assert_eq!(
        outcome,
        GameOutcome::Destroyed {
            score: 10_000,
            frames: 1
        }
    );
    assert_eq!(renderer.frames.len(), 1);
    assert_eq!(renderer.frames[0], vec!["player", "score"]);
    assert_eq!(clock.pauses, vec![Duration::from_millis(2000)]);
    assert_eq!(clock.waits, 0);
    assert_eq!(s.player.expression, Expression::Sorrow);
}

#[test]
fn invincible_player_survives_the_same_hit() {
    let mut s = fresh_state();
    s.player.set_state(LifeState::Invincible, 500);
    let center = s.player.rect.center;
    let src = Rect::new(Vec2::new(center.x, center.y - 200.0), ENEMY_WIDTH, ENEMY_HEIGHT);
    let mut bomb = Bomb::new(&src, &s.player.rect, 10, BombColor::Red).unwrap();
    bomb.rect.center = center;
    s.bombs.push(bomb);

    let (outcome, renderer, _) = play(&mut s, [FrameInput::idle(), quit()]);
    assert_eq!(
        outcome,
        GameOutcome::Quit {
            score: 10_001,
            frames: 2
        }
    );
    assert_eq!(renderer.frames[0], vec!["player", "explosion", "score"]);
}

#[test]
fn emp_flashes_and_pauses_briefly() {
    let mut s = fresh_state();
    let emp = FrameInput::with_actions(InputState::default(), [Action::Emp]);
    let (outcome, renderer, clock) = play(&mut s, [emp, quit()]);
    assert_eq!(
        outcome,
        GameOutcome::Quit {
            score: 9_980,
            frames: 2
        }
    );
    assert_eq!(renderer.flashes, 1);
    assert_eq!(clock.pauses, vec![Duration::from_millis(50)]);
}

#[test]
fn draw_frame_skips_empty_groups() {
    let s = fresh_state();
    let mut renderer = RecordingRenderer::default();
    draw_frame(&s, &mut renderer).unwrap();
    assert_eq!(renderer.frames, vec![vec!["player", "score"]]);
}
