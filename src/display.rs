//! Rendering layer. All terminal drawing lives here.
//!
//! The 1100×650 world is scaled onto whatever grid the terminal offers.
//! No game logic is performed; this module only translates sprites into
//! terminal commands.

use std::io::Write;

use bird_shooter::entities::{Beam, Bomb, BombColor, Enemy, Explosion, Expression, Player, Shield};
use bird_shooter::error::Result;
use bird_shooter::game_loop::{Renderer, Sprite};
use bird_shooter::geometry::{Playfield, Rect, Vec2};
use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Blue;
const C_PLAYER: Color = Color::White;
const C_PLAYER_INVINCIBLE: Color = Color::Magenta;
const C_PLAYER_JOY: Color = Color::Yellow;
const C_PLAYER_SORROW: Color = Color::Red;
const C_ENEMY: Color = Color::Green;
const C_ENEMY_DISABLED: Color = Color::DarkGrey;
const C_BEAM: Color = Color::Cyan;
const C_BOMB_INACTIVE: Color = Color::DarkGrey;
const C_SHIELD: Color = Color::Blue;
const C_EMP: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

/// Player glyph per 45° heading step, starting at 0° (right), counter-clockwise.
const PLAYER_GLYPHS: [char; 8] = ['→', '↗', '↑', '↖', '←', '↙', '↓', '↘'];
/// Beam glyph per 45° heading step, folded onto a half turn.
const BEAM_GLYPHS: [char; 4] = ['─', '╱', '│', '╲'];
const ENEMY_SPRITES: [&str; 3] = ["«▼»", "(◎)", "╚═╝"];
const EXPLOSION_GLYPHS: [char; 2] = ['✶', '✷'];

const HINT: &str =
    "←↑→↓/WASD Move  Shift Boost  SPACE Shoot  E EMP  I Invincible  F Shield  Q Quit";

pub struct TerminalRenderer<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    field: Playfield,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> std::io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self {
            out,
            cols,
            rows,
            field: Playfield::new(1.0, 1.0),
        })
    }

    /// Terminal cell for a world position. Row 0 is the HUD, the last row the
    /// hint line, and the outermost columns/rows the border.
    fn cell(&self, p: Vec2) -> (u16, u16) {
        let inner_w = self.cols.saturating_sub(2).max(1) as f32;
        let inner_h = self.rows.saturating_sub(4).max(1) as f32;
        let col = (p.x / self.field.width * inner_w).clamp(0.0, inner_w - 1.0) as u16 + 1;
        let row = (p.y / self.field.height * inner_h).clamp(0.0, inner_h - 1.0) as u16 + 2;
        (col, row)
    }

    fn put(&mut self, p: Vec2, color: Color, text: &str) -> Result<()> {
        let (col, row) = self.cell(p);
        let half = text.chars().count() as u16 / 2;
        self.out
            .queue(cursor::MoveTo(col.saturating_sub(half).max(1), row))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(text))?;
        Ok(())
    }

    fn fill(&mut self, rect: &Rect, color: Color, glyph: char) -> Result<()> {
        let (left, top) = self.cell(Vec2::new(rect.left(), rect.top()));
        let (right, bottom) = self.cell(Vec2::new(rect.right(), rect.bottom()));
        let run: String = std::iter::repeat(glyph)
            .take((right - left + 1) as usize)
            .collect();
        self.out.queue(style::SetForegroundColor(color))?;
        for row in top..=bottom {
            self.out.queue(cursor::MoveTo(left, row))?;
            self.out.queue(Print(&run))?;
        }
        Ok(())
    }

    fn draw_border(&mut self) -> Result<()> {
        let w = self.cols as usize;
        let h = self.rows;

        self.out.queue(style::SetForegroundColor(C_BORDER))?;

        // Row 1: top bar
        self.out.queue(cursor::MoveTo(0, 1))?;
        self.out
            .queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

        // Row h-2: bottom bar
        self.out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
        self.out
            .queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

        // Side walls
        for row in 2..h.saturating_sub(2) {
            self.out.queue(cursor::MoveTo(0, row))?;
            self.out.queue(Print("│"))?;
            self.out
                .queue(cursor::MoveTo(self.cols.saturating_sub(1), row))?;
            self.out.queue(Print("│"))?;
        }
        Ok(())
    }

    // ── Entities ──────────────────────────────────────────────────────────────

    fn draw_player(&mut self, player: &Player) -> Result<()> {
        let heading = player.facing.orientation().heading();
        let glyph = PLAYER_GLYPHS[heading_step(heading, 8)];
        let (text, color) = match player.expression {
            Expression::Joy => (format!("♪{}", glyph), C_PLAYER_JOY),
            Expression::Sorrow => (format!("×{}", glyph), C_PLAYER_SORROW),
            Expression::Facing if player.is_invincible() => {
                (format!("◆{}", glyph), C_PLAYER_INVINCIBLE)
            }
            Expression::Facing => (format!("◇{}", glyph), C_PLAYER),
        };
        self.put(player.rect.center, color, &text)
    }

    fn draw_beam(&mut self, beam: &Beam) -> Result<()> {
        let glyph = BEAM_GLYPHS[heading_step(beam.heading, 8) % 4];
        self.put(beam.rect.center, C_BEAM, &glyph.to_string())
    }

    fn draw_enemy(&mut self, enemy: &Enemy) -> Result<()> {
        let sprite = ENEMY_SPRITES[enemy.variant as usize % ENEMY_SPRITES.len()];
        let color = if enemy.disabled { C_ENEMY_DISABLED } else { C_ENEMY };
        self.put(enemy.rect.center, color, sprite)
    }

    fn draw_bomb(&mut self, bomb: &Bomb) -> Result<()> {
        let glyph = match bomb.radius {
            0..=20 => "•",
            21..=35 => "●",
            _ => "⬤",
        };
        let color = if bomb.is_active() {
            bomb_color(bomb.color)
        } else {
            C_BOMB_INACTIVE
        };
        self.put(bomb.rect.center, color, glyph)
    }

    fn draw_explosion(&mut self, explosion: &Explosion) -> Result<()> {
        let (glyph, color) = if explosion.is_flipped() {
            (EXPLOSION_GLYPHS[1], Color::Red)
        } else {
            (EXPLOSION_GLYPHS[0], Color::Yellow)
        };
        self.put(explosion.rect.center, color, &glyph.to_string())
    }

    fn draw_shield(&mut self, shield: &Shield) -> Result<()> {
        self.fill(&shield.rect, C_SHIELD, '▓')
    }

    fn draw_score(&mut self, score: u32) -> Result<()> {
        self.out.queue(cursor::MoveTo(1, 0))?;
        self.out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
        self.out.queue(Print(format!("Score: {}", score)))?;
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn begin_frame(&mut self, field: &Playfield) -> Result<()> {
        self.field = *field;
        let (cols, rows) = terminal::size()?;
        self.cols = cols;
        self.rows = rows;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.draw_border()
    }

    fn draw(&mut self, sprite: Sprite<'_>) -> Result<()> {
        match sprite {
            Sprite::Player(player) => self.draw_player(player),
            Sprite::Beam(beam) => self.draw_beam(beam),
            Sprite::Enemy(enemy) => self.draw_enemy(enemy),
            Sprite::Bomb(bomb) => self.draw_bomb(bomb),
            Sprite::Explosion(explosion) => self.draw_explosion(explosion),
            Sprite::Score(score) => self.draw_score(score),
            Sprite::Shield(shield) => self.draw_shield(shield),
        }
    }

    fn flash_overlay(&mut self) -> Result<()> {
        let whole = Rect::new(
            Vec2::new(self.field.width / 2.0, self.field.height / 2.0),
            self.field.width,
            self.field.height,
        );
        self.fill(&whole, C_EMP, '░')?;
        self.out.queue(style::ResetColor)?;
        self.out.flush()?;
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        self.out
            .queue(cursor::MoveTo(1, self.rows.saturating_sub(1)))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out.queue(Print(HINT))?;

        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out
            .queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()?;
        Ok(())
    }
}

/// Nearest of `steps` evenly spaced headings, counter-clockwise from 0°.
fn heading_step(degrees: f32, steps: usize) -> usize {
    let span = 360.0 / steps as f32;
    ((degrees.rem_euclid(360.0) / span).round() as usize) % steps
}

fn bomb_color(color: BombColor) -> Color {
    match color {
        BombColor::Red => Color::Red,
        BombColor::Green => Color::Green,
        BombColor::Blue => Color::Blue,
        BombColor::Yellow => Color::Yellow,
        BombColor::Magenta => Color::Magenta,
        BombColor::Cyan => Color::Cyan,
    }
}
