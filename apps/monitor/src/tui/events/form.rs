use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::session::{MonitorSession, ViewMode};
use crate::tui::state::AppState;

/// Handle keyboard events in the registration form
pub async fn handle_form(
    state: &mut AppState,
    key: KeyEvent,
    session: &mut MonitorSession,
) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            state.cancel_form();
            session.switch_mode(ViewMode::View).await;
            state.mode = ViewMode::View;
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            state.form.field = state.form.field.next();
        }
        KeyCode::Enter => {
            if let Err(e) = state.submit_form(session).await {
                tracing::error!(error = %e, "Failed to save server");
            }
        }
        KeyCode::Backspace => {
            state.form.current_text_mut().pop();
            let servers = state.servers.clone();
            state.form.revalidate_current(&servers);
        }
        KeyCode::Char(c)
            if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
        {
            state.form.current_text_mut().push(c);
            let servers = state.servers.clone();
            state.form.revalidate_current(&servers);
        }
        _ => {}
    }

    Ok(false)
}
