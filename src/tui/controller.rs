use crate::tui::app::{AppState, InputAction, Scene};
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut AppState,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, key.code) {
                    break;
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.agents_on_turn();
            last_tick = Instant::now();
        }
    }
    Ok(())
}

/// Map a key to an input action. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, code: KeyCode) -> bool {
    let help_toggle = matches!(code, KeyCode::Char('?'));
    let history_toggle = matches!(code, KeyCode::Char('h') | KeyCode::Char('H'));
    if help_toggle {
        let _ = app.handle_input(InputAction::ToggleHelp);
        return false;
    }
    if history_toggle {
        let _ = app.handle_input(InputAction::ToggleHistory);
        return false;
    }
    if app.help_open() {
        if matches!(code, KeyCode::Esc) {
            let _ = app.handle_input(InputAction::ToggleHelp);
        }
        return false;
    }
    if app.history_open() {
        match code {
            KeyCode::Up => {
                let _ = app.handle_input(InputAction::HistoryUp);
            }
            KeyCode::Down => {
                let _ = app.handle_input(InputAction::HistoryDown);
            }
            KeyCode::Esc => {
                let _ = app.handle_input(InputAction::ToggleHistory);
            }
            _ => {}
        }
        return false;
    }

    match app.scene {
        Scene::Menu => match code {
            KeyCode::Up => {
                let _ = app.handle_input(InputAction::MenuPrev);
            }
            KeyCode::Down => {
                let _ = app.handle_input(InputAction::MenuNext);
            }
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
                let _ = app.handle_input(InputAction::MenuInc);
            }
            KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Left => {
                let _ = app.handle_input(InputAction::MenuDec);
            }
            KeyCode::Enter => {
                let _ = app.handle_input(InputAction::MenuApply);
            }
            KeyCode::Esc => {
                let _ = app.handle_input(InputAction::MenuCancel);
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                let _ = app.handle_input(InputAction::ToggleMenu);
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            _ => {}
        },
        Scene::Table => {
            let action = match code {
                KeyCode::Char('m') | KeyCode::Char('M') => Some(InputAction::ToggleMenu),
                KeyCode::Char(' ') => Some(InputAction::NewRound),
                KeyCode::Char('d') | KeyCode::Char('D') => Some(InputAction::DrawDeck),
                KeyCode::Char('p') | KeyCode::Char('P') => Some(InputAction::DrawDiscard),
                KeyCode::Char('u') | KeyCode::Char('U') => Some(InputAction::UseAction),
                KeyCode::Char('s') | KeyCode::Char('S') => Some(InputAction::SkipDrawn),
                KeyCode::Char('c') | KeyCode::Char('C') => Some(InputAction::Continue),
                KeyCode::Char('k') | KeyCode::Char('K') => Some(InputAction::CallCabo),
                KeyCode::Char(c @ '1'..='4') => {
                    Some(InputAction::SelectOwn((c as u8 - b'1') as usize))
                }
                KeyCode::Char(c) => opponent_slot_key(c).map(InputAction::SelectOpponent),
                _ => None,
            };
            if let Some(action) = action {
                let _ = app.handle_input(action);
            }
        }
    }
    false
}

/// `Q W E R` address the opponent's slots 1-4.
fn opponent_slot_key(c: char) -> Option<usize> {
    match c.to_ascii_lowercase() {
        'q' => Some(0),
        'w' => Some(1),
        'e' => Some(2),
        'r' => Some(3),
        _ => None,
    }
}
