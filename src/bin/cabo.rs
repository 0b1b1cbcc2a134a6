use cabo_rs::logging::{init_file_logging, LOG_ENV};
use cabo_rs::tui::{app::AppState, controller};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::prelude::*;
use std::io::{self, IsTerminal, Stdout};
use std::path::PathBuf;
use std::time::Duration;

const LOG_FILE: &str = "cabo-rs.log";

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> io::Result<()> {
    if !io::stdout().is_terminal() {
        println!(
            "cabo-rs TUI requires a real terminal (TTY).\nRun in Terminal and press q in the menu to quit. Version: {}",
            cabo_rs::VERSION
        );
        return Ok(());
    }
    // Logging is opt-in; the file sits next to where the game was started.
    if std::env::var_os(LOG_ENV).is_some() {
        if let Err(err) = init_file_logging(&PathBuf::from(LOG_FILE)) {
            eprintln!("cabo-rs: {err}");
        }
    }

    let mut terminal = setup_terminal()?;
    let tick_rate = Duration::from_millis(100);
    let mut app = AppState::default();

    let res = controller::run(&mut terminal, &mut app, tick_rate);

    // Always attempt to restore terminal
    restore_terminal(terminal)?;
    res
}
