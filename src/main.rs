use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;

mod apps;
mod data;
mod dispatch;
mod input;
mod nav;
mod registry;
mod shell;
mod snake;
mod sound;
mod status;
mod store;
mod ui;

use shell::Shell;
use store::Store;
use ui::Term;

/// Event poll interval. Short enough that game ticks fire on time and the
/// clock never lags visibly.
const POLL_INTERVAL: Duration = Duration::from_millis(33);

// ── Terminal setup / teardown ─────────────────────────────────────────────────

fn init_terminal() -> Result<Term> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(ratatui::Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

// ── Main loop ─────────────────────────────────────────────────────────────────

fn run(terminal: &mut Term, shell: &mut Shell) -> Result<()> {
    loop {
        shell.on_tick(Instant::now());
        terminal.draw(|f| shell.render(f))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if !shell.on_key(&key) {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => shell.on_mouse(&mouse),
            _ => {}
        }
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// Log to a file next to the store. Never to the terminal, which the UI owns.
/// Setup failures are ignored; the phone works fine without a log.
fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let base = dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("brickphone");
    let _ = std::fs::create_dir_all(&base);
    if let Ok(file) = std::fs::File::create(base.join("brickphone.log")) {
        let _ = simplelog::WriteLogger::init(level, simplelog::Config::default(), file);
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let muted = args.iter().any(|a| a == "--no-sound");
    let verbose = args.iter().any(|a| a == "--verbose");

    init_logging(verbose);
    log::info!("starting (muted: {muted})");

    let store = Store::open_default();
    if !store.is_persistent() {
        log::warn!("running with in-memory state only");
    }
    let mut shell = Shell::new(store, muted);

    let mut terminal = init_terminal()?;

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        run(&mut terminal, &mut shell)
    }));

    // Always restore the terminal, panic or not.
    restore_terminal(&mut terminal).ok();

    match result {
        Ok(outcome) => outcome,
        Err(panic) => {
            log::error!("panicked: {panic:?}");
            eprintln!("brickphone crashed; see the log in the data directory.");
            Ok(())
        }
    }
}
