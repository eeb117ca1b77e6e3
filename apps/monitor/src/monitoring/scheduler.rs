use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Local;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use super::presenter::StatusSink;
use super::prober::Prober;
use super::types::OverlapPolicy;
use crate::registry::{HostRegistry, ServerRecord};

/// Registry shared between the session (writer) and sweeps (readers)
pub type SharedRegistry = Arc<RwLock<HostRegistry>>;

/// Summary of one completed sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub probed: usize,
    pub reachable: usize,
}

/// Probe every server once, strictly in order, reporting each result
/// before the next probe starts.
pub async fn sweep(prober: &Prober, servers: &[ServerRecord], sink: &dyn StatusSink) -> SweepReport {
    let mut report = SweepReport::default();

    for (index, server) in servers.iter().enumerate() {
        let result = prober.probe(&server.host).await;
        if result.is_reachable() {
            report.reachable += 1;
        }
        report.probed += 1;
        tracing::debug!(index, host = %server.host, %result, "Probed host");
        sink.update_slot(index, server, &result, Local::now());
    }

    report
}

/// The currently armed repeating timer. Dropping it cancels the timer.
pub struct ScheduleHandle {
    timer: JoinHandle<()>,
}

impl ScheduleHandle {
    pub fn is_active(&self) -> bool {
        !self.timer.is_finished()
    }
}

impl Drop for ScheduleHandle {
    fn drop(&mut self) {
        self.timer.abort();
    }
}

#[derive(Clone)]
struct SweepContext {
    prober: Arc<Prober>,
    registry: SharedRegistry,
    sink: Arc<dyn StatusSink>,
    sweeps: Arc<AtomicU64>,
}

impl SweepContext {
    /// Spawn one sweep over a snapshot of the registry
    fn spawn_sweep(&self) -> JoinHandle<()> {
        let ctx = self.clone();
        let number = ctx.sweeps.fetch_add(1, Ordering::SeqCst) + 1;

        tokio::spawn(async move {
            let servers = ctx.registry.read().await.servers().to_vec();
            if servers.is_empty() {
                tracing::debug!(sweep = number, "Registry empty, nothing to probe");
                return;
            }

            let started = Instant::now();
            let report = sweep(&ctx.prober, &servers, ctx.sink.as_ref()).await;
            tracing::info!(
                sweep = number,
                probed = report.probed,
                reachable = report.reachable,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Sweep finished"
            );
        })
    }
}

/// Poll scheduler - one immediate sweep, then one per interval tick
pub struct PollScheduler {
    ctx: SweepContext,
    interval: Duration,
    overlap: OverlapPolicy,
    active: Option<ScheduleHandle>,
}

impl PollScheduler {
    pub fn new(
        prober: Arc<Prober>,
        registry: SharedRegistry,
        sink: Arc<dyn StatusSink>,
        interval: Duration,
        overlap: OverlapPolicy,
    ) -> Self {
        Self {
            ctx: SweepContext { prober, registry, sink, sweeps: Arc::new(AtomicU64::new(0)) },
            interval,
            overlap,
            active: None,
        }
    }

    /// Replace any active schedule: sweep now, then every `interval`.
    ///
    /// Sweeps already in flight are not cancelled; only the timer is.
    pub fn start(&mut self) {
        self.stop();

        let first = self.ctx.spawn_sweep();
        let ctx = self.ctx.clone();
        let period = self.interval;
        let overlap = self.overlap;

        let timer = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut last_sweep = first;

            loop {
                ticker.tick().await;

                if overlap == OverlapPolicy::Skip && !last_sweep.is_finished() {
                    tracing::warn!("Previous sweep still running, skipping tick");
                    continue;
                }
                last_sweep = ctx.spawn_sweep();
            }
        });

        tracing::info!(interval_ms = period.as_millis() as u64, %overlap, "Monitoring schedule started");
        self.active = Some(ScheduleHandle { timer });
    }

    /// Cancel the repeating timer, if any
    pub fn stop(&mut self) {
        if self.active.take().is_some() {
            tracing::debug!("Monitoring schedule cancelled");
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.as_ref().is_some_and(ScheduleHandle::is_active)
    }

    /// Total sweeps started over the scheduler's lifetime
    pub fn sweeps_started(&self) -> u64 {
        self.ctx.sweeps.load(Ordering::SeqCst)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}
