use std::time::Duration;

use bird_shooter::config::GameConfig;
use bird_shooter::error::GameError;

fn write_config(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn defaults_match_the_stock_game() {
    let c = GameConfig::default();
    assert_eq!((c.width, c.height), (1100, 650));
    assert_eq!(c.fps, 50);
    assert_eq!(c.starting_score, 10_000);
    assert_eq!(c.enemy_spawn_interval, 200);
    assert_eq!(c.invincibility_frames, 500);
    assert_eq!(c.shield_lifetime, 400);
    assert_eq!(c.multi_beam_count, 5);
    assert_eq!(c.seed, None);
    assert_eq!(c.frame_duration(), Duration::from_millis(20));
    assert_eq!(c.emp_pulse(), Duration::from_millis(50));
    assert_eq!(c.game_over_pause(), Duration::from_secs(2));
    assert!(c.validate().is_ok());
}

#[test]
fn partial_file_keeps_other_defaults() {
    let (_dir, path) = write_config("width = 800\nmulti_beam_count = 3\nseed = 9\n");
    let c = GameConfig::load(&path).unwrap();
    assert_eq!(c.width, 800);
    assert_eq!(c.multi_beam_count, 3);
    assert_eq!(c.seed, Some(9));
    assert_eq!(c.height, 650);
    assert_eq!(c.playfield().width, 800.0);
}

#[test]
fn empty_file_is_the_default_config() {
    let (_dir, path) = write_config("");
    assert_eq!(GameConfig::load(&path).unwrap(), GameConfig::default());
}

#[test]
fn single_beam_fan_is_rejected() {
    let (_dir, path) = write_config("multi_beam_count = 1\n");
    let err = GameConfig::load(&path).unwrap_err();
    assert!(matches!(err, GameError::InvalidConfig(_)));
}

#[test]
fn zero_sized_field_is_rejected() {
    let c = GameConfig {
        height: 0,
        ..GameConfig::default()
    };
    assert!(matches!(c.validate(), Err(GameError::InvalidConfig(_))));
}

#[test]
fn zero_spawn_interval_is_rejected() {
    let c = GameConfig {
        enemy_spawn_interval: 0,
        ..GameConfig::default()
    };
    assert!(matches!(c.validate(), Err(GameError::InvalidConfig(_))));
}

#[test]
fn unknown_keys_fail_to_parse() {
    let (_dir, path) = write_config("widht = 800\n");
    let err = GameConfig::load(&path).unwrap_err();
    assert!(matches!(err, GameError::ConfigParse { .. }));
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.toml");
    let err = GameConfig::load(&path).unwrap_err();
    match err {
        GameError::ConfigRead { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn discover_prefers_explicit_path() {
    let (_dir, path) = write_config("fps = 30\n");
    let c = GameConfig::discover(Some(&path)).unwrap();
    assert_eq!(c.fps, 30);
}
