mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context as _, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use boss_rush::compute::{init_state, reset, tick};
use boss_rush::config::{self, GameConfig};
use boss_rush::entities::{BossKind, BossSelection, FrameInput, GameStatus, SimulationContext};
use boss_rush::geometry::Vec2;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// Ticks the boss entrance plays before the fight starts.
const INTRO_FRAMES: u32 = 90;

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|key| {
        key_frame
            .get(key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    })
}

// ── Command line ──────────────────────────────────────────────────────────────

/// Single-screen boss rush in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Boss to face (circle, square, triangle, heart, oval, hexagon,
    /// hourglass, math, star) or "random". Skips the menu.
    #[arg(long)]
    boss: Option<BossSelection>,

    /// Enemy bullet speed multiplier, 0.5 to 2.0
    #[arg(long, value_parser = parse_speed_scale)]
    bullet_speed: Option<f32>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file with defaults for the options above
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs here (filter via RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_speed_scale(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|e| format!("{e}"))?;
    config::validate_speed_scale(value).map_err(|e| e.to_string())
}

/// File first, then CLI flags on top.
fn resolve_config(args: &Args) -> Result<(Option<BossSelection>, f32, Option<u64>)> {
    let file = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let selection = match (args.boss, &args.config) {
        (Some(sel), _) => Some(sel),
        (None, Some(_)) => Some(file.selection()?),
        (None, None) => None,
    };
    let scale = args.bullet_speed.unwrap_or(file.bullet_speed_scale);
    Ok((selection, scale, args.seed.or(file.seed)))
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    // stdout belongs to the terminal UI
    let Some(path) = path else {
        return Ok(());
    };
    let file = std::fs::File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(BossSelection),
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    speed_scale: &mut f32,
) -> std::io::Result<MenuResult> {
    loop {
        draw_menu(out, *speed_scale)?;

        // Block until the user makes a choice
        let Ok(Event::Key(KeyEvent { code, kind, .. })) = rx.recv() else {
            continue;
        };
        if kind == KeyEventKind::Release {
            continue;
        }
        match code {
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c as usize - '1' as usize;
                return Ok(MenuResult::Start(BossSelection::Fixed(BossKind::ALL[idx])));
            }
            KeyCode::Char('r') | KeyCode::Char('R') => return Ok(MenuResult::Start(BossSelection::Random)),
            KeyCode::Char('+') | KeyCode::Char('=') => *speed_scale = config::step_speed_scale(*speed_scale, true),
            KeyCode::Char('-') | KeyCode::Char('_') => *speed_scale = config::step_speed_scale(*speed_scale, false),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(MenuResult::Quit),
            _ => {}
        }
    }
}

fn draw_menu<W: Write>(out: &mut W, speed_scale: f32) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "◆  BOSS  RUSH  ◆";
    out.queue(cursor::MoveTo(cx.saturating_sub(title.chars().count() as u16 / 2), cy.saturating_sub(8)))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy.saturating_sub(6)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Select a boss:"))?;

    for (i, kind) in BossKind::ALL.iter().enumerate() {
        let row = cy.saturating_sub(5) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(12), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", i + 1)))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(kind.name().to_uppercase()))?;
    }
    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy + 4))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("[R] "))?;
    out.queue(style::SetForegroundColor(Color::Magenta))?;
    out.queue(Print("RANDOM"))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy + 6))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(format!("Bullet speed: {speed_scale:.1}x   (+/-)")))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy + 8))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("WASD / arrows : Move   SPACE : Shield   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn movement(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> Vec2 {
    let held = |keys: &[KeyCode]| is_held(key_frame, keys, frame);
    let mut v = Vec2::ZERO;
    if held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]) {
        v.x -= 1.0;
    }
    if held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]) {
        v.x += 1.0;
    }
    if held(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')]) {
        v.y -= 1.0;
    }
    if held(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')]) {
        v.y += 1.0;
    }
    v
}

/// Returns `true` → quit program, `false` → back to menu.
///
/// Input model: a `key_frame` map records the frame of the last press or
/// repeat event for every key. Each frame the keys still inside
/// `HOLD_WINDOW` are folded into one movement vector, so diagonals and
/// shield presses work together. On keyboard-enhancement terminals
/// (Ghostty, kitty, etc.) release events drop keys immediately; elsewhere
/// they expire after the window.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut SimulationContext,
    speed_scale: f32,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> std::io::Result<bool> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    for i in 0..INTRO_FRAMES {
        let frame_start = Instant::now();
        while let Ok(Event::Key(KeyEvent { code, .. })) = rx.try_recv() {
            if matches!(code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
                return Ok(true);
            }
        }
        display::render_intro(out, state.boss.kind, i as f32 / INTRO_FRAMES as f32)?;
        pace(frame_start);
    }

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut shield = false;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(true),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),
                        KeyCode::Char('r') | KeyCode::Char('R') if state.status != GameStatus::Playing => {
                            return Ok(false);
                        }
                        KeyCode::Char(' ') => shield = true,
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let input = FrameInput {
            movement: movement(&key_frame, frame),
            activate_shield: shield,
            bullet_speed_scale: speed_scale,
        };
        *state = tick(state, &input, rng);

        display::render(out, state)?;
        pace(frame_start);
    }
}

fn pace(frame_start: Instant) {
    let elapsed = frame_start.elapsed();
    if elapsed < FRAME {
        thread::sleep(FRAME - elapsed);
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;
    let (selection, speed_scale, seed) = resolve_config(&args)?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, selection, speed_scale, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("terminal I/O failed")
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    mut preselected: Option<BossSelection>,
    mut speed_scale: f32,
    rng: &mut StdRng,
) -> std::io::Result<()> {
    let mut previous: Option<SimulationContext> = None;

    loop {
        let selection = match preselected.take() {
            Some(selection) => selection,
            None => match show_menu(out, rx, &mut speed_scale)? {
                MenuResult::Quit => break,
                MenuResult::Start(selection) => selection,
            },
        };

        let mut state = match &previous {
            Some(prev) => reset(prev, selection, rng),
            None => init_state(selection, speed_scale, rng),
        };
        let quit = game_loop(out, &mut state, speed_scale, rx, rng)?;
        info!(boss = state.boss.kind.name(), score = state.score, status = ?state.status, "run finished");
        previous = Some(state);

        if quit {
            break;
        }
        // Otherwise loop back to the menu
    }
    Ok(())
}
