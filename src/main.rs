mod app;
mod debug;
mod menu;
mod ui;

use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

#[derive(Debug, Default, PartialEq)]
struct Options {
    debug: bool,
}

fn parse_args(args: &[String]) -> Options {
    let program = args.first().map(String::as_str).unwrap_or("foosball");
    let mut options = Options::default();

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--debug" | "-d" => options.debug = true,
            "--help" | "-h" => {
                print_usage(program);
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage(program);
                std::process::exit(1);
            }
        }
    }
    options
}

fn print_usage(program: &str) {
    println!("Foosball - table football in the terminal");
    println!();
    println!("Usage:");
    println!("  {}            # Play", program);
    println!("  {} --debug    # Play and log to {}", program, debug::log_path().display());
    println!();
    println!("Settings and key bindings: {}", foosball::config::get_config_path().display());
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    debug::init(options.debug)?;
    let config = foosball::config::load_config().context("loading configuration")?;

    // Setup terminal
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture).context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating terminal")?;

    let result = app::run(&mut terminal, config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Game loop failed");
    }
    result
}
