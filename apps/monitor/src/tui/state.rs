use super::types::{FormField, FrameAreas};
use crate::monitoring::{SlotState, SlotTable};
use crate::registry::{RegistrationError, ServerRecord};
use crate::session::{MonitorSession, ViewMode};
use crate::validation::{self, ValidationResult};
use ratatui::widgets::TableState;
use std::time::{Duration, Instant};

/// Status notification level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Error,
}

/// Registration form contents and per-field validity
#[derive(Debug, Clone)]
pub struct FormState {
    pub name: String,
    pub host: String,
    pub field: FormField,
    /// `None` until the field has been edited or submitted
    pub name_check: Option<ValidationResult>,
    pub host_check: Option<ValidationResult>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            name: String::new(),
            host: String::new(),
            field: FormField::Name,
            name_check: None,
            host_check: None,
        }
    }
}

impl FormState {
    pub fn current_text_mut(&mut self) -> &mut String {
        match self.field {
            FormField::Name => &mut self.name,
            FormField::Host => &mut self.host,
        }
    }

    /// Re-check the focused field against the current registry
    pub fn revalidate_current(&mut self, servers: &[ServerRecord]) {
        match self.field {
            FormField::Name => {
                self.name_check = Some(validation::validate_server_name(&self.name, servers));
            }
            FormField::Host => {
                self.host_check = Some(validation::validate_server_host(&self.host));
            }
        }
    }
}

/// Application state
pub struct AppState {
    pub servers: Vec<ServerRecord>,
    pub slots: Vec<SlotState>,
    pub mode: ViewMode,
    pub selected: usize,
    pub form: FormState,
    pub show_help: bool,
    pub show_detail: bool,
    pub show_delete_confirm: bool,
    pub areas: Option<FrameAreas>,
    /// Kept across frames so the scroll offset survives
    pub table_state: TableState,
    pub interval: Duration,
    pub sweeps: u64,
    pub status_message: Option<(String, Instant, StatusLevel)>,
}

impl AppState {
    pub fn new(interval: Duration) -> Self {
        Self {
            servers: Vec::new(),
            slots: Vec::new(),
            mode: ViewMode::Add,
            selected: 0,
            form: FormState::default(),
            show_help: false,
            show_detail: false,
            show_delete_confirm: false,
            areas: None,
            table_state: TableState::default(),
            interval,
            sweeps: 0,
            status_message: None,
        }
    }

    /// Copy registry, mode and slot contents out of the session
    pub async fn sync(&mut self, session: &MonitorSession, slots: &SlotTable) {
        self.servers = session.servers().await;
        self.slots = slots.snapshot();
        self.mode = session.mode();
        self.sweeps = session.scheduler().sweeps_started();
        if self.selected >= self.servers.len() {
            self.selected = self.servers.len().saturating_sub(1);
        }
    }

    /// Set a status notification (auto-clears after 5 seconds)
    pub fn set_status(&mut self, msg: impl Into<String>, level: StatusLevel) {
        self.status_message = Some((msg.into(), Instant::now(), level));
    }

    /// Clear expired status messages
    pub fn clear_expired_status(&mut self) {
        if let Some((_, created, _)) = &self.status_message {
            if created.elapsed() > Duration::from_secs(5) {
                self.status_message = None;
            }
        }
    }

    /// Returns true if any popup overlay is open
    pub fn any_popup_open(&self) -> bool {
        self.show_help || self.show_detail || self.show_delete_confirm
    }

    pub fn selected_server(&self) -> Option<&ServerRecord> {
        self.servers.get(self.selected)
    }

    pub fn selected_slot(&self) -> Option<&SlotState> {
        self.slots.get(self.selected)
    }

    /// Navigate to next server (with wrapping)
    pub fn next_server(&mut self) {
        if !self.servers.is_empty() {
            self.selected = (self.selected + 1) % self.servers.len();
        }
    }

    /// Navigate to previous server (with wrapping)
    pub fn prev_server(&mut self) {
        if !self.servers.is_empty() {
            self.selected =
                if self.selected == 0 { self.servers.len() - 1 } else { self.selected - 1 };
        }
    }

    pub fn first_server(&mut self) {
        self.selected = 0;
    }

    pub fn last_server(&mut self) {
        self.selected = self.servers.len().saturating_sub(1);
    }

    /// Counts of (up, down, pending) slots
    pub fn status_counts(&self) -> (usize, usize, usize) {
        use crate::monitoring::SlotStatus;
        self.slots.iter().fold((0, 0, 0), |(up, down, pending), slot| match slot.status {
            SlotStatus::Up { .. } => (up + 1, down, pending),
            SlotStatus::Down { .. } => (up, down + 1, pending),
            SlotStatus::Pending => (up, down, pending + 1),
        })
    }

    /// Submit the registration form through the session.
    ///
    /// On success the form is cleared; on rejection both field checks are
    /// shown.
    pub async fn submit_form(&mut self, session: &mut MonitorSession) -> anyhow::Result<()> {
        let name = self.form.name.clone();
        let host = self.form.host.clone();

        match session.register(&name, &host).await {
            Ok(record) => {
                self.form = FormState::default();
                self.mode = session.mode();
                self.set_status(format!("Added '{}'", record.name), StatusLevel::Success);
                Ok(())
            }
            Err(RegistrationError::Invalid(check)) => {
                self.form.name_check = Some(check.name);
                self.form.host_check = Some(check.host);
                Ok(())
            }
            Err(e) => {
                self.set_status(format!("Failed to save: {e}"), StatusLevel::Error);
                Err(e.into())
            }
        }
    }

    /// Leave the form without saving
    pub fn cancel_form(&mut self) {
        self.form = FormState::default();
    }
}
