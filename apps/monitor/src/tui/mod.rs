mod events;
mod state;
mod types;
mod ui;

use anyhow::Result;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::time::Duration;

use crate::monitoring::SlotTable;
use crate::session::MonitorSession;

use state::AppState;

/// Run the interactive monitor until the user quits
pub async fn run_tui(mut session: MonitorSession, slots: SlotTable) -> Result<()> {
    session.enter_initial_mode().await;

    let mut state = AppState::new(session.scheduler().interval());
    state.sync(&session, &slots).await;

    // Init terminal in alternate screen
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(&mut stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let outcome = event_loop(&mut terminal, &mut state, &mut session, &slots).await;

    // Cleanup terminal even when the loop failed
    drop(terminal);
    let exec_result = execute!(stdout, DisableMouseCapture, Show, LeaveAlternateScreen);
    let raw_mode_result = disable_raw_mode();
    session.stop();

    outcome?;
    exec_result.and(raw_mode_result)?;
    Ok(())
}

async fn event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    state: &mut AppState,
    session: &mut MonitorSession,
    slots: &SlotTable,
) -> Result<()> {
    loop {
        // Pull live slot updates written by running sweeps
        state.sync(session, slots).await;
        state.clear_expired_status();

        terminal.draw(|f| {
            ui::render(f, state);
        })?;

        // Poll for events
        if event::poll(Duration::from_millis(250))? {
            let ev = event::read()?;
            let should_quit = events::handle_event(state, ev, session).await?;

            if should_quit {
                tracing::info!("Quitting monitor");
                return Ok(());
            }
        }
    }
}
