use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::session::{MonitorSession, ViewMode};
use crate::tui::state::{AppState, StatusLevel};

/// Handle keyboard events on the servers table (no popups open)
pub async fn handle_main_view(
    state: &mut AppState,
    key: KeyEvent,
    session: &mut MonitorSession,
) -> Result<bool> {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return Ok(false);
    }

    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Esc => {
            return Ok(true); // Signal to quit
        }

        // Help toggle
        KeyCode::Char('h') | KeyCode::Char('?') => {
            state.show_help = !state.show_help;
        }

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => state.next_server(),
        KeyCode::Char('k') | KeyCode::Up => state.prev_server(),
        KeyCode::Char('g') | KeyCode::Home => state.first_server(),
        KeyCode::Char('G') | KeyCode::End => state.last_server(),

        // Actions
        KeyCode::Char('a') | KeyCode::Char('A') => {
            session.switch_mode(ViewMode::Add).await;
            state.mode = ViewMode::Add;
        }
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
            if state.selected_server().is_some() {
                state.show_delete_confirm = true;
            }
        }
        KeyCode::Enter => {
            if state.selected_server().is_some() {
                state.show_detail = true;
            }
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            session.refresh();
            state.set_status("Probing all servers", StatusLevel::Info);
        }

        _ => {}
    }

    Ok(false)
}
