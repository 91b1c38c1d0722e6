//! The frame loop and the collaborators it drives.
//!
//! The loop itself is terminal-agnostic: keyboard reading, drawing and
//! frame pacing come in through [`InputSource`], [`Renderer`] and
//! [`FrameClock`].

use std::time::Duration;

use rand::Rng;

use crate::compute::{step, FrameOutcome, GameState};
use crate::config::GameConfig;
use crate::entities::{Beam, Bomb, Enemy, Explosion, Player, Shield};
use crate::error::Result;
use crate::geometry::Playfield;
use crate::input::FrameInput;

pub trait InputSource {
    /// Held keys plus the actions pressed since the previous poll.
    fn poll(&mut self) -> Result<FrameInput>;
}

/// Anything the renderer may be asked to draw.
#[derive(Clone, Copy, Debug)]
pub enum Sprite<'a> {
    Player(&'a Player),
    Beam(&'a Beam),
    Enemy(&'a Enemy),
    Bomb(&'a Bomb),
    Explosion(&'a Explosion),
    Score(u32),
    Shield(&'a Shield),
}

pub trait Renderer {
    fn begin_frame(&mut self, field: &Playfield) -> Result<()>;
    fn draw(&mut self, sprite: Sprite<'_>) -> Result<()>;
    /// Translucent full-screen flash shown when an EMP goes off.
    fn flash_overlay(&mut self) -> Result<()>;
    fn end_frame(&mut self) -> Result<()>;
}

pub trait FrameClock {
    /// Block until at least one frame period has passed since the last call.
    fn wait_for_next_frame(&mut self);
    fn pause(&mut self, duration: Duration);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Quit { score: u32, frames: u64 },
    Destroyed { score: u32, frames: u64 },
}

/// Draw every live entity, in the fixed layering order.
pub fn draw_frame<R: Renderer + ?Sized>(state: &GameState, renderer: &mut R) -> Result<()> {
    renderer.begin_frame(&state.field)?;
    renderer.draw(Sprite::Player(&state.player))?;
    for beam in &state.beams {
        renderer.draw(Sprite::Beam(beam))?;
    }
    for enemy in &state.enemies {
        renderer.draw(Sprite::Enemy(enemy))?;
    }
    for bomb in &state.bombs {
        renderer.draw(Sprite::Bomb(bomb))?;
    }
    for explosion in &state.explosions {
        renderer.draw(Sprite::Explosion(explosion))?;
    }
    renderer.draw(Sprite::Score(state.score.value()))?;
    for shield in &state.shields {
        renderer.draw(Sprite::Shield(shield))?;
    }
    renderer.end_frame()
}

/// Run frames until the player is destroyed or quits.
pub fn run<I, R, C>(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut impl Rng,
    input: &mut I,
    renderer: &mut R,
    clock: &mut C,
) -> Result<GameOutcome>
where
    I: InputSource + ?Sized,
    R: Renderer + ?Sized,
    C: FrameClock + ?Sized,
{
    tracing::info!(
        width = state.field.width,
        height = state.field.height,
        fps = config.fps,
        score = state.score.value(),
        "game started"
    );

    loop {
        let frame_input = input.poll()?;
        let report = step(state, &frame_input, rng);

        if report.emp_fired {
            renderer.flash_overlay()?;
            clock.pause(config.emp_pulse());
        }

        match report.outcome {
            FrameOutcome::Continue => {
                draw_frame(state, renderer)?;
                clock.wait_for_next_frame();
            }
            FrameOutcome::Quit => {
                return Ok(GameOutcome::Quit {
                    score: state.score.value(),
                    frames: state.frame,
                });
            }
            FrameOutcome::PlayerDestroyed => {
                // Final frame shows the sorrowful bird and the last score.
                draw_frame(state, renderer)?;
                clock.pause(config.game_over_pause());
                tracing::info!(score = state.score.value(), frames = state.frame, "game over");
                return Ok(GameOutcome::Destroyed {
                    score: state.score.value(),
                    frames: state.frame,
                });
            }
        }
    }
}
