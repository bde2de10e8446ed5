mod display;

use std::collections::HashMap;
use std::io::{self, stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;
use tracing::{info, warn};

use bolt_shooter::assets::{Assets, ASSETS_ENV};
use bolt_shooter::clock::{Clock, SystemClock};
use bolt_shooter::config::{load_tuning, Tuning};
use bolt_shooter::frame::{Frame, Viewport};
use bolt_shooter::input::{Action, KeysDown};
use bolt_shooter::session::{FrameOutcome, GameSession};

/// Stand-in for the display refresh: ≈60 ticks per second.
const FRAME: Duration = Duration::from_millis(16);

/// A key counts as held if its last press/repeat event arrived within this
/// many frames.  Covers terminals that never report key releases: OS key
/// repeat is ≥ 15 Hz, so 8 frames (≈130 ms) is refreshed before it expires.
const HOLD_WINDOW: u64 = 8;

const LOG_ENV: &str = "BOLT_SHOOTER_LOG";
const DEFAULT_LOG_FILE: &str = "bolt_shooter.log";

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal belongs to the game, so logs go to a file.
fn init_tracing() -> anyhow::Result<()> {
    let path = std::env::var(LOG_ENV).unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {path}"))?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact()
        .init();

    std::panic::set_hook(Box::new(|info| {
        // Put the terminal back before anything is printed.
        restore_terminal(&mut stdout(), false);
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
        eprintln!("{info}");
    }));
    Ok(())
}

// ── Terminal ──────────────────────────────────────────────────────────────────

/// Undo everything [`TerminalGuard::enter`] set up.  Errors are ignored:
/// this also runs while panicking.
fn restore_terminal(out: &mut impl Write, keyboard_enhanced: bool) {
    if keyboard_enhanced {
        let _ = out.queue(PopKeyboardEnhancementFlags);
    }
    let _ = out.queue(cursor::Show);
    let _ = out.queue(terminal::LeaveAlternateScreen);
    let _ = out.flush();
    let _ = terminal::disable_raw_mode();
}

/// Owns the game's output while the terminal is in raw mode on the alternate
/// screen.  Dropping it, including during unwinding, restores the terminal.
struct TerminalGuard<W: Write> {
    out: W,
    keyboard_enhanced: bool,
}

impl<W: Write> TerminalGuard<W> {
    fn enter(out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut guard = Self {
            out,
            keyboard_enhanced: false,
        };
        guard.out.execute(terminal::EnterAlternateScreen)?;
        guard.out.execute(cursor::Hide)?;

        // Request key-release (and key-repeat) events from the terminal.
        // Kitty-protocol terminals support this; others fall back to HOLD_WINDOW.
        guard.keyboard_enhanced = guard
            .out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
        Ok(guard)
    }

    fn out(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        restore_terminal(&mut self.out, self.keyboard_enhanced);
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

fn action_for(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::MoveRight),
        KeyCode::Char(' ') => Some(Action::Jump),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Action::AimUp),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Action::AimDown),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::FireLeft),
        KeyCode::Char('e') | KeyCode::Char('E') => Some(Action::FireRight),
        _ => None,
    }
}

/// Tracks the frame each action was last seen on and turns that into the
/// live pressed/released map the game reads.
#[derive(Default)]
struct HeldKeys {
    last_seen: HashMap<Action, u64>,
}

impl HeldKeys {
    fn seen(&mut self, action: Action, frame: u64) {
        self.last_seen.insert(action, frame);
    }

    fn released(&mut self, action: Action) {
        self.last_seen.remove(&action);
    }

    fn clear(&mut self) {
        self.last_seen.clear();
    }

    fn snapshot(&self, frame: u64, keys: &mut KeysDown) {
        for action in Action::ALL {
            let held = self
                .last_seen
                .get(&action)
                .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
                .unwrap_or(false);
            if held {
                keys.press(action);
            } else {
                keys.release(action);
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Quit,
    Start,
}

/// `Esc` and `Ctrl-C` quit at any time; `X` only quits from the menu.
fn command_for(code: KeyCode, modifiers: KeyModifiers, in_menu: bool) -> Option<Command> {
    match code {
        KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('x') | KeyCode::Char('X') if in_menu => Some(Command::Quit),
        KeyCode::Enter => Some(Command::Start),
        _ => None,
    }
}

/// Drain pending terminal events.  Returns a menu/quit command if one was
/// pressed; movement keys only update `held`.
fn drain_events(
    rx: &mpsc::Receiver<Event>,
    held: &mut HeldKeys,
    frame: u64,
    in_menu: bool,
) -> Option<Command> {
    let mut command = None;
    while let Ok(ev) = rx.try_recv() {
        let Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        }) = ev
        else {
            continue;
        };
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                match command_for(code, modifiers, in_menu) {
                    Some(Command::Quit) => return Some(Command::Quit),
                    Some(Command::Start) => command = Some(Command::Start),
                    None => {}
                }
                if let Some(action) = action_for(code) {
                    held.seen(action, frame);
                }
            }
            KeyEventKind::Release => {
                if let Some(action) = action_for(code) {
                    held.released(action);
                }
            }
        }
    }
    command
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  The loop keeps ticking in the menu; only the
/// session decides whether a tick simulates anything.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    tuning: Tuning,
) -> anyhow::Result<()> {
    let mut rng = thread_rng();

    let (cols, rows) = terminal::size()?;
    let mut frame = Frame::new(cols, rows, Viewport::default());
    let bounds = frame.bounds(tuning.floor_height);
    let max_dt = tuning.max_frame_dt;
    let mut session = GameSession::new(tuning, bounds);

    let asset_dir = std::env::var(ASSETS_ENV).ok().map(PathBuf::from);
    let assets = Assets::load(asset_dir);

    let mut held = HeldKeys::default();
    let mut keys = KeysDown::new();
    let mut clock = SystemClock::new();
    let mut tick: u64 = 0;

    display::show_menu(out, session.last_score())?;

    loop {
        let frame_start = Instant::now();
        tick += 1;

        match drain_events(rx, &mut held, tick, !session.is_active()) {
            Some(Command::Quit) => {
                info!("quit requested");
                return Ok(());
            }
            Some(Command::Start) if !session.is_active() => {
                held.clear();
                session.start_game(&mut rng);
            }
            _ => {}
        }
        held.snapshot(tick, &mut keys);

        let dt = clock.delta(max_dt);
        match session.run_frame(dt, &keys, &mut rng, &mut frame, &assets) {
            FrameOutcome::Drawn => display::present(out, &frame)?,
            FrameOutcome::GameOver { .. } => display::show_menu(out, session.last_score())?,
            FrameOutcome::Idle => {}
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing()?;

    let tuning = load_tuning().unwrap_or_else(|e| {
        warn!(error = %e, "using default tuning");
        Tuning::default()
    });

    let mut guard = TerminalGuard::enter(BufWriter::new(stdout()))?;

    // Blocking event reads live on their own thread so the loop never waits.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(guard.out(), &rx, tuning);
    drop(guard);

    if let Err(e) = &result {
        tracing::error!(error = %e, "terminated with error");
    }
    result
}
