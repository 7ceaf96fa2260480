use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use modal_snake::app::App;
use modal_snake::error::Error;
use modal_snake::input::InputHandler;
use modal_snake::logging::init_file_logging;
use modal_snake::settings::{load_settings, load_settings_from_path, Overrides};
use modal_snake::terminal_runtime::{restore_terminal, TerminalSession};
use tracing::info;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Tiles per side of the square board.
    #[arg(long = "tiles")]
    tiles: Option<u16>,

    /// Milliseconds between game ticks.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Show on-screen direction buttons (clickable with the mouse).
    #[arg(long)]
    buttons: bool,

    /// Seed for reproducible food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Settings file to use instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write tracing output to this file. Filter with `RUST_LOG`.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("modal-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    if let Some(path) = &cli.log_file {
        init_file_logging(path)?;
    }

    let settings = match &cli.config {
        Some(path) => load_settings_from_path(path)?,
        None => load_settings()?,
    };
    let settings = settings
        .with_overrides(Overrides {
            tile_count: cli.tiles,
            tick_interval_ms: cli.tick_ms,
            show_buttons: cli.buttons,
        })
        .validate()?;
    info!(?settings, seed = ?cli.seed, "starting");

    install_panic_hook();

    let mut session = TerminalSession::enter()?;
    let mut app = App::new(settings.engine_config(cli.seed), settings.show_buttons)?;
    let mut input = InputHandler::new();

    loop {
        let now = Instant::now();
        app.update(now);
        session.terminal_mut().draw(|frame| app.draw(frame, now))?;

        if app.should_quit() {
            break;
        }

        let timeout = app.poll_timeout(Instant::now());
        if let Some(command) = input.poll_command(timeout, app.dialog_open())? {
            app.apply(command, Instant::now());
        }
    }

    info!("exiting");
    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}
