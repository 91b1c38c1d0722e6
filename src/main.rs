mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        ModifierKeyCode, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use bird_shooter::compute::init_state;
use bird_shooter::config::GameConfig;
use bird_shooter::error::GameError;
use bird_shooter::game_loop::{run, FrameClock, GameOutcome, InputSource};
use bird_shooter::input::{Action, FrameInput, InputState};

use display::TerminalRenderer;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 6 frames (≈120 ms at
/// 50 FPS) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 6;

#[derive(Parser, Debug)]
#[command(name = "bird_shooter", about = "Dodge the bombs, shoot the aliens")]
struct Cli {
    /// TOML config file (defaults to the per-user config if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log; the terminal itself is busy with the game
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Turns the raw event stream into per-frame input.
///
/// Instead of acting on each key event individually, we record the frame of
/// the last press/repeat event for every key and treat keys seen within
/// `HOLD_WINDOW` frames as held. Release events, where the terminal sends
/// them, drop the key immediately.
struct KeyboardInput {
    rx: mpsc::Receiver<Event>,
    key_frame: HashMap<KeyCode, u64>,
    shift_frame: Option<u64>,
    frame: u64,
}

impl KeyboardInput {
    fn new(rx: mpsc::Receiver<Event>) -> Self {
        Self {
            rx,
            key_frame: HashMap::new(),
            shift_frame: None,
            frame: 0,
        }
    }

    fn is_held(&self, key: KeyCode) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn any_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|&key| self.is_held(key))
    }

    fn held_state(&self) -> InputState {
        let shift = self
            .shift_frame
            .map(|last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false);
        InputState {
            up: self.any_held(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')]),
            down: self.any_held(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')]),
            left: self.any_held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
            right: self.any_held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
            boost: shift || self.is_held(KeyCode::Modifier(ModifierKeyCode::LeftShift)),
        }
    }
}

fn action_for(code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    match code {
        KeyCode::Char(' ') => Some(Action::Fire),
        KeyCode::Char('e') | KeyCode::Char('E') => Some(Action::Emp),
        KeyCode::Char('i') | KeyCode::Char('I') => Some(Action::Invincibility),
        KeyCode::Modifier(ModifierKeyCode::RightShift) => Some(Action::Invincibility),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(Action::Shield),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

impl InputSource for KeyboardInput {
    fn poll(&mut self) -> Result<FrameInput, GameError> {
        self.frame += 1;
        let mut actions = Vec::new();

        // Drain all pending events (non-blocking)
        while let Ok(event) = self.rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = event
            else {
                continue;
            };
            if modifiers.contains(KeyModifiers::SHIFT) && kind != KeyEventKind::Release {
                self.shift_frame = Some(self.frame);
            }
            match kind {
                KeyEventKind::Press => {
                    self.key_frame.insert(code, self.frame);
                    if let Some(action) = action_for(code, modifiers) {
                        actions.push(action);
                    }
                }
                KeyEventKind::Repeat => {
                    self.key_frame.insert(code, self.frame);
                }
                KeyEventKind::Release => {
                    self.key_frame.remove(&code);
                    if code == KeyCode::Modifier(ModifierKeyCode::LeftShift) {
                        self.shift_frame = None;
                    }
                }
            }
        }

        Ok(FrameInput {
            held: self.held_state(),
            actions,
        })
    }
}

// ── Clock ─────────────────────────────────────────────────────────────────────

struct SleepClock {
    period: Duration,
    frame_start: Instant,
}

impl SleepClock {
    fn new(period: Duration) -> Self {
        Self {
            period,
            frame_start: Instant::now(),
        }
    }
}

impl FrameClock for SleepClock {
    fn wait_for_next_frame(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.period {
            thread::sleep(self.period - elapsed);
        }
        self.frame_start = Instant::now();
    }

    fn pause(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(|| std::env::temp_dir().join("bird_shooter.log"));
    let file = std::fs::File::create(&path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file)?;

    let mut config =
        GameConfig::discover(cli.config.as_deref()).context("Failed to load configuration")?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("Failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = play(&config, &mut rng, rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    match result? {
        GameOutcome::Quit { score, .. } => println!("Quit with score {}", score),
        GameOutcome::Destroyed { score, frames } => {
            println!("Game over after {} frames. Final score: {}", frames, score)
        }
    }
    Ok(())
}

fn play(
    config: &GameConfig,
    rng: &mut StdRng,
    rx: mpsc::Receiver<Event>,
) -> anyhow::Result<GameOutcome> {
    let mut state = init_state(config);
    let mut input = KeyboardInput::new(rx);
    let mut renderer = TerminalRenderer::new(BufWriter::new(stdout()))?;
    let mut clock = SleepClock::new(config.frame_duration());
    let outcome = run(
        &mut state,
        config,
        rng,
        &mut input,
        &mut renderer,
        &mut clock,
    )?;
    Ok(outcome)
}
