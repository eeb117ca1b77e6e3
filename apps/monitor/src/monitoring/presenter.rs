//! Status presentation.
//!
//! The monitoring core only talks to [`StatusSink`]; what a "slot" looks
//! like is up to the implementation (TUI table, log lines, stdout).

use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local};

use super::types::ProbeResult;
use crate::registry::ServerRecord;

/// Capability the scheduler reports probe results through
pub trait StatusSink: Send + Sync {
    /// Project one probe result onto the slot at `index` (registry position
    /// of `server` when its sweep started)
    fn update_slot(
        &self,
        index: usize,
        server: &ServerRecord,
        result: &ProbeResult,
        observed_at: DateTime<Local>,
    );

    /// Reset every slot for a (possibly changed) server list
    fn rebuild(&self, _servers: &[ServerRecord]) {}
}

/// Id of the status cell for a registry position
pub fn status_cell_id(index: usize) -> String {
    format!("status-{index}")
}

/// Id of the last-checked cell for a registry position
pub fn time_cell_id(index: usize) -> String {
    format!("time-{index}")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SlotStatus {
    /// Not checked since the table was built
    #[default]
    Pending,
    Up { latency_ms: u64 },
    Down { reason: String },
}

/// Display state of one table row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotState {
    pub status: SlotStatus,
    pub last_checked: Option<DateTime<Local>>,
}

impl SlotState {
    /// Apply a probe result; the timestamp moves regardless of outcome
    pub fn present(&mut self, result: &ProbeResult, observed_at: DateTime<Local>) {
        self.status = match result {
            ProbeResult::Reachable { latency_ms } => SlotStatus::Up { latency_ms: *latency_ms },
            ProbeResult::Unreachable { reason } => SlotStatus::Down { reason: reason.clone() },
        };
        self.last_checked = Some(observed_at);
    }

    /// Status cell text: indicator plus latency when up
    pub fn label(&self) -> String {
        match &self.status {
            SlotStatus::Pending => "…".to_string(),
            SlotStatus::Up { latency_ms } => format!("✅ ({latency_ms}ms)"),
            SlotStatus::Down { .. } => "❌".to_string(),
        }
    }

    /// Failure reason, shown on demand
    pub fn reason(&self) -> Option<&str> {
        match &self.status {
            SlotStatus::Down { reason } => Some(reason),
            _ => None,
        }
    }

    /// Last-checked cell text in local time
    pub fn time_label(&self) -> String {
        self.last_checked.map(|t| t.format("%H:%M:%S").to_string()).unwrap_or_default()
    }
}

#[derive(Default)]
struct Rows {
    servers: Vec<ServerRecord>,
    slots: Vec<SlotState>,
}

/// In-memory table of slots, shared between the scheduler and a renderer
#[derive(Clone, Default)]
pub struct SlotTable {
    rows: Arc<Mutex<Rows>>,
}

impl SlotTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Rows> {
        self.rows.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn snapshot(&self) -> Vec<SlotState> {
        self.lock().slots.clone()
    }

    #[cfg(test)]
    pub fn get(&self, index: usize) -> Option<SlotState> {
        self.lock().slots.get(index).cloned()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lock().slots.len()
    }
}

impl StatusSink for SlotTable {
    fn update_slot(
        &self,
        index: usize,
        server: &ServerRecord,
        result: &ProbeResult,
        observed_at: DateTime<Local>,
    ) {
        let mut rows = self.lock();
        // A sweep started before a rebuild still reports by its old
        // positions; the row must still hold the server that was probed
        if rows.servers.get(index) != Some(server) {
            tracing::debug!(index, name = %server.name, "Dropping update for moved or missing row");
            return;
        }
        if let Some(slot) = rows.slots.get_mut(index) {
            slot.present(result, observed_at);
        }
    }

    fn rebuild(&self, servers: &[ServerRecord]) {
        let mut rows = self.lock();
        rows.servers = servers.to_vec();
        rows.slots = vec![SlotState::default(); servers.len()];
    }
}

/// Logs every slot update; used when running without a terminal UI
pub struct TracingSink;

impl StatusSink for TracingSink {
    fn update_slot(
        &self,
        index: usize,
        server: &ServerRecord,
        result: &ProbeResult,
        observed_at: DateTime<Local>,
    ) {
        let cell = status_cell_id(index);
        let at = observed_at.format("%H:%M:%S").to_string();
        let (name, host) = (&server.name, &server.host);
        match result {
            ProbeResult::Reachable { latency_ms } => {
                tracing::info!(index, %cell, %name, %host, latency_ms, %at, "Host reachable");
            }
            ProbeResult::Unreachable { reason } => {
                tracing::warn!(index, %cell, %name, %host, %reason, %at, "Host unreachable");
            }
        }
    }

    fn rebuild(&self, servers: &[ServerRecord]) {
        tracing::info!(count = servers.len(), "Monitoring table rebuilt");
    }
}

/// Writes one line per slot update
pub struct LineSink<W: Write + Send> {
    out: Mutex<W>,
}

impl LineSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> LineSink<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send> StatusSink for LineSink<W> {
    fn update_slot(
        &self,
        index: usize,
        server: &ServerRecord,
        result: &ProbeResult,
        observed_at: DateTime<Local>,
    ) {
        let mut slot = SlotState::default();
        slot.present(result, observed_at);
        let reason = slot.reason().map(|r| format!(" {r}")).unwrap_or_default();

        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writeln!(
            out,
            "#{} {} {} {} {}{reason}",
            index + 1,
            server.name,
            server.host,
            slot.time_label(),
            slot.label()
        ) {
            tracing::warn!(error = %e, "Failed to write status line");
        }
    }
}
