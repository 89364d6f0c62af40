use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::mpsc::{self, TryRecvError};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use void_raiders::config::{GameConfig, CONFIG_FILE};
use void_raiders::display::{self, Viewport};
use void_raiders::input::KeyTracker;
use void_raiders::score::ScoreManager;
use void_raiders::session::{Flow, Session};
use void_raiders::sound::SoundManager;
use void_raiders::sprites::SpriteSheet;

// ── Logging ───────────────────────────────────────────────────────────────────

/// The alternate screen owns stdout, so logs go to a file.  Filter with
/// `RUST_LOG`, default `info`.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the session asks to quit or the terminal goes away.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    rx: &mpsc::Receiver<Event>,
    fps: u32,
) -> std::io::Result<()> {
    let frame_budget = Duration::from_secs(1) / fps;
    let mut rng = thread_rng();
    let mut tracker = KeyTracker::new();
    let (cols, rows) = terminal::size()?;
    let mut viewport = Viewport::new(cols, rows);

    loop {
        let frame_start = Instant::now();

        // ── Fold queued terminal events into the tracker ──────────────────────
        loop {
            match rx.try_recv() {
                Ok(Event::Resize(cols, rows)) => viewport = Viewport::new(cols, rows),
                Ok(ev) => tracker.handle(&ev, &viewport),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    info!("terminal event stream closed");
                    return Ok(());
                }
            }
        }

        let input = tracker.take_frame();
        if session.step(&input, &mut rng) == Flow::Quit {
            return Ok(());
        }

        display::render(out, session, &viewport)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let (config, config_error) = GameConfig::load_or_default(Path::new(CONFIG_FILE));
    init_logging(&config.log_path)?;
    if let Some(e) = config_error {
        warn!("{e}; using defaults");
    }
    info!("starting with {:?}", config);

    // Sprites are required; fail before touching the terminal.
    let sprites = SpriteSheet::load(&config.sprites_dir(), config.cell_width, config.cell_height)
        .context("cannot start without sprite assets")?;
    let scores = ScoreManager::open(&config.high_score_path);
    let sound = SoundManager::from_assets(&config.assets_dir);
    let mut session = Session::new(sprites, scores, sound);

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Release events make held keys stop on key-up.  Terminals without
    // the kitty protocol refuse this and the hold window takes over.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads happen on their own thread; the loop only polls.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = game_loop(&mut out, &mut session, &rx, config.fps);

    // Undo the terminal setup even when the loop failed.
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!("exiting");
    result.context("terminal i/o failed")
}
