//! Input handling for the dicebag TUI.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::App;
use crate::view::InputMode;

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(250);

/// Wait briefly for one terminal event and handle it.
/// Returns true if the app should quit.
pub fn handle_events(app: &mut App) -> Result<bool> {
    if event::poll(INPUT_POLL_TIMEOUT)?
        && let Event::Key(key) = event::read()?
    {
        handle_key(app, key);
    }

    Ok(app.should_quit())
}

/// Apply a single key press.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Only handle key press events (not release) - important for Windows
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.request_quit();
        return;
    }

    if matches!(app.input_mode(), InputMode::Normal) {
        handle_normal_mode(app, key);
    } else {
        handle_prompt_mode(app, key);
    }
}

/// Control and Alt chords are not bindings of their own.
fn is_chord(key: KeyEvent) -> bool {
    key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    if is_chord(key) {
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.request_quit(),
        KeyCode::Char('n') => app.add_group(),
        KeyCode::Char('r') => app.start_rename(),
        KeyCode::Char('a') => app.start_add_die(),
        KeyCode::Enter | KeyCode::Char(' ') => app.roll_selected(),
        KeyCode::Char('x') | KeyCode::Delete => app.remove_selected_die(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev_group(),
        KeyCode::Char('j') | KeyCode::Down => app.select_next_group(),
        KeyCode::Char('h') | KeyCode::Left => app.select_prev_die(),
        KeyCode::Char('l') | KeyCode::Right => app.select_next_die(),
        KeyCode::Esc => app.clear_status(),
        _ => {}
    }
}

fn handle_prompt_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Enter => app.commit_input(),
        KeyCode::Backspace => app.view_mut().pop_char(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.view_mut().clear_draft();
        }
        KeyCode::Char(c) if !is_chord(key) => app.view_mut().push_char(c),
        _ => {}
    }
}
