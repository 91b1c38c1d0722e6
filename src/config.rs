//! Tunables read from an optional TOML file. Every field has a default, so
//! an empty file (or no file at all) yields the stock game.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{GameError, Result};
use crate::geometry::Playfield;

const CONFIG_DIR: &str = "bird_shooter";
const CONFIG_FILE: &str = "config.toml";

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Playfield width in world units.
    pub width: u32,
    /// Playfield height in world units.
    pub height: u32,
    /// Target frame rate.
    pub fps: u32,
    pub starting_score: u32,
    /// A new enemy appears every this many frames.
    pub enemy_spawn_interval: u64,
    pub invincibility_frames: i32,
    pub shield_lifetime: i32,
    /// Beams per multi-beam volley; must be at least 2.
    pub multi_beam_count: usize,
    pub emp_pulse_ms: u64,
    pub game_over_pause_ms: u64,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 1100,
            height: 650,
            fps: 50,
            starting_score: 10_000,
            enemy_spawn_interval: 200,
            invincibility_frames: 500,
            shield_lifetime: 400,
            multi_beam_count: 5,
            emp_pulse_ms: 50,
            game_over_pause_ms: 2000,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig =
            toml::from_str(&content).map_err(|source| GameError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Explicit path if given, else the per-user config file if present,
    /// else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::InvalidConfig(format!(
                "playfield must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.fps == 0 {
            return Err(GameError::InvalidConfig("fps must be positive".into()));
        }
        if self.enemy_spawn_interval == 0 {
            return Err(GameError::InvalidConfig(
                "enemy_spawn_interval must be positive".into(),
            ));
        }
        if self.multi_beam_count < 2 {
            return Err(GameError::InvalidConfig(format!(
                "multi_beam_count must be at least 2, got {}",
                self.multi_beam_count
            )));
        }
        Ok(())
    }

    pub fn playfield(&self) -> Playfield {
        Playfield::new(self.width as f32, self.height as f32)
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    pub fn emp_pulse(&self) -> Duration {
        Duration::from_millis(self.emp_pulse_ms)
    }

    pub fn game_over_pause(&self) -> Duration {
        Duration::from_millis(self.game_over_pause_ms)
    }
}

/// `<config_dir>/bird_shooter/config.toml`, if the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}
