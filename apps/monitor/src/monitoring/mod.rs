/// Monitoring engine module - the polling loop
///
/// This module is responsible for:
/// - Probing hosts with a timeout race
/// - Scheduling sweeps over the registry
/// - Projecting results onto display slots
pub mod presenter;
pub mod prober;
pub mod scheduler;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;
#[cfg(test)]
mod tests;

pub use presenter::{
    LineSink, SlotState, SlotStatus, SlotTable, StatusSink, TracingSink, status_cell_id, time_cell_id,
};
pub use prober::{HttpTransport, Prober, Transport};
pub use scheduler::{PollScheduler, SharedRegistry, SweepReport, sweep};
pub use types::{OverlapPolicy, ProbeResult};
