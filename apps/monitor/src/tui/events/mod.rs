pub mod form;
pub mod keyboard;
pub mod mouse;

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::session::{MonitorSession, ViewMode};
use crate::tui::state::{AppState, StatusLevel};

/// Handle all events and return true if should quit
pub async fn handle_event(
    state: &mut AppState,
    event: Event,
    session: &mut MonitorSession,
) -> Result<bool> {
    match event {
        Event::Key(k) => {
            // Only process key press events, ignore releases and repeats
            if k.kind != KeyEventKind::Press {
                return Ok(false);
            }

            if k.code == KeyCode::Char('c') && k.modifiers.contains(KeyModifiers::CONTROL) {
                return Ok(true);
            }

            // Handle popup-specific keyboard events first
            if state.show_help {
                match k.code {
                    KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('?') | KeyCode::Char('q') => {
                        state.show_help = false;
                    }
                    _ => {}
                }
                return Ok(false);
            }

            if state.show_delete_confirm {
                match k.code {
                    KeyCode::Char('y') => {
                        state.show_delete_confirm = false;
                        if let Some(name) = state.selected_server().map(|s| s.name.clone()) {
                            match session.remove(&name).await {
                                Ok(_) => {
                                    state.set_status(format!("Removed '{name}'"), StatusLevel::Success)
                                }
                                Err(e) => {
                                    tracing::error!(error = %e, name, "Failed to remove server");
                                    state.set_status(e.to_string(), StatusLevel::Error);
                                }
                            }
                        }
                    }
                    KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('q') => {
                        state.show_delete_confirm = false;
                    }
                    _ => {}
                }
                return Ok(false);
            }

            if state.show_detail {
                if matches!(k.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter) {
                    state.show_detail = false;
                }
                return Ok(false);
            }

            match state.mode {
                ViewMode::Add => form::handle_form(state, k, session).await,
                ViewMode::View => keyboard::handle_main_view(state, k, session).await,
            }
        }

        Event::Mouse(m) => {
            // Only handle mouse events if no popup is blocking
            if !state.any_popup_open() && state.mode == ViewMode::View {
                mouse::handle_mouse(state, m);
            }
            Ok(false)
        }

        _ => Ok(false),
    }
}
