use crate::app::{AppState, Modal};
use crate::domain::Screen;
use anyhow::Result;
use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent, now: DateTime<Utc>) -> Result<bool> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    // Overlays take every key until closed
    match app.modal {
        Some(Modal::Alert(_)) => {
            app.dismiss_modal();
            return Ok(false);
        }
        Some(Modal::CategoryPicker { .. }) => return handle_picker(app, key),
        Some(Modal::ConfirmDelete { .. }) => return handle_confirm_delete(app, key),
        None => {}
    }

    match app.screen {
        Screen::Config => handle_config_screen(app, key),
        Screen::Timer => handle_timer_screen(app, key, now),
        Screen::History => handle_history_screen(app, key),
    }
}

/// Handle keys on the configuration form
fn handle_config_screen(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => {
            app.submit_config();
            Ok(false)
        }

        // Back to the timer, only once something is saved
        KeyCode::Esc => {
            if app.config.is_configured() {
                app.go_to_timer();
                Ok(false)
            } else {
                Ok(true)
            }
        }

        // Switch between salary and hours
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.config_form_toggle_field();
            Ok(false)
        }

        KeyCode::Backspace => {
            app.config_form_backspace();
            Ok(false)
        }

        KeyCode::Char(c) => {
            app.config_form_add_char(c);
            Ok(false)
        }

        _ => Ok(false),
    }
}

/// Handle keys on the stopwatch screen
fn handle_timer_screen(app: &mut AppState, key: KeyEvent, now: DateTime<Utc>) -> Result<bool> {
    match key.code {
        // Start or finish a break
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.toggle_timer(now);
            Ok(false)
        }

        KeyCode::Char('h') | KeyCode::Char('H') => {
            app.go_to_history();
            Ok(false)
        }

        KeyCode::Char('c') | KeyCode::Char('C') => {
            app.go_to_config();
            Ok(false)
        }

        // A running break keeps going after quitting and is recovered on restart
        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),

        _ => Ok(false),
    }
}

/// Handle keys on the history list
fn handle_history_screen(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection_down();
            Ok(false)
        }

        KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Enter => {
            app.open_category_picker();
            Ok(false)
        }

        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
            app.request_delete();
            Ok(false)
        }

        KeyCode::Char('r') => {
            app.reload_history();
            Ok(false)
        }

        KeyCode::Char('t') | KeyCode::Char('T') | KeyCode::Esc => {
            app.go_to_timer();
            Ok(false)
        }

        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),

        _ => Ok(false),
    }
}

fn handle_picker(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.picker_move(false),
        KeyCode::Down | KeyCode::Char('j') => app.picker_move(true),
        KeyCode::Enter => app.confirm_category(),
        KeyCode::Esc => app.dismiss_modal(),
        _ => {}
    }
    Ok(false)
}

fn handle_confirm_delete(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.dismiss_modal(),
        _ => {}
    }
    Ok(false)
}
