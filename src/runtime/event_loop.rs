use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Mode};
use crate::config;
use crate::ui;

/// Main terminal event loop: draws the UI and routes key events to the
/// session state machine. One event is processed to completion before the
/// next draw. Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Handle one key press. Returns `true` when the application should quit.
fn handle_key_event(key: KeyEvent, app: &mut App) -> bool {
    // Interrupt-equivalent: quit from anywhere.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    match app.mode {
        Mode::Browse => match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('j') | KeyCode::Down => app.browser.select_next(),
            KeyCode::Char('k') | KeyCode::Up => app.browser.select_previous(),
            KeyCode::Char('g') => app.browser.select_first(),
            KeyCode::Char('G') => app.browser.select_last(),
            KeyCode::Char('h') | KeyCode::Backspace | KeyCode::Left => app.browser.go_up(),
            KeyCode::Enter => app.activate_browser_entry(),
            _ => {}
        },
        Mode::ViewMetadata => match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc => app.back_to_browse(),
            KeyCode::Char('j') | KeyCode::Down => app.cursor_down(),
            KeyCode::Char('k') | KeyCode::Up => app.cursor_up(),
            KeyCode::Char('g') => app.cursor_first(),
            KeyCode::Char('G') => app.cursor_last(),
            KeyCode::Enter => app.begin_edit(),
            _ => {}
        },
        Mode::EditField => match key.code {
            KeyCode::Esc => app.cancel_edit(),
            KeyCode::Enter => app.commit_edit(),
            KeyCode::Backspace => app.pop_edit_char(),
            KeyCode::Char(c) if !c.is_control() => app.push_edit_char(c),
            _ => {}
        },
    }

    false
}
