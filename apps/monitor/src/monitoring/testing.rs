//! Scripted network and display doubles shared by the monitoring tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use tokio::time::sleep;
use url::Url;

use super::presenter::StatusSink;
use super::prober::{Transport, TransportError};
use super::types::ProbeResult;
use crate::registry::ServerRecord;

#[derive(Debug, Clone)]
enum Behavior {
    Respond(u64),
    Fail(u64, String),
    Hang,
    Panic,
}

/// Shared counters describing what the transport was asked to do
#[derive(Default)]
pub struct CallLog {
    hosts: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    finished: AtomicUsize,
}

impl CallLog {
    pub fn started(&self) -> usize {
        self.hosts.lock().unwrap().len()
    }

    pub fn finished(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Hosts in the order requests were issued
    pub fn hosts(&self) -> Vec<String> {
        self.hosts.lock().unwrap().clone()
    }
}

/// Transport that answers per host from a script.
///
/// Each host holds a queue of behaviors; the last one repeats.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<HashMap<String, VecDeque<Behavior>>>,
    log: Arc<CallLog>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(self, host: &str, behavior: Behavior) -> Self {
        self.script.lock().unwrap().entry(host.to_string()).or_default().push_back(behavior);
        self
    }

    pub fn respond(self, host: &str, after_ms: u64) -> Self {
        self.push(host, Behavior::Respond(after_ms))
    }

    pub fn fail(self, host: &str, after_ms: u64, message: &str) -> Self {
        self.push(host, Behavior::Fail(after_ms, message.to_string()))
    }

    pub fn hang(self, host: &str) -> Self {
        self.push(host, Behavior::Hang)
    }

    pub fn panic_on(self, host: &str) -> Self {
        self.push(host, Behavior::Panic)
    }

    pub fn calls(&self) -> Arc<CallLog> {
        self.log.clone()
    }

    fn next_behavior(&self, host: &str) -> Behavior {
        let mut script = self.script.lock().unwrap();
        match script.get_mut(host) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap_or(Behavior::Hang),
            None => Behavior::Fail(0, format!("unscripted host {host}")),
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn request(&self, url: &Url) -> Result<(), TransportError> {
        let host = url.host_str().unwrap_or_default().to_string();
        let behavior = self.next_behavior(&host);

        self.log.hosts.lock().unwrap().push(host);
        let now = self.log.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.log.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let outcome = match behavior {
            Behavior::Respond(ms) => {
                sleep(Duration::from_millis(ms)).await;
                Ok(())
            }
            Behavior::Fail(ms, message) => {
                sleep(Duration::from_millis(ms)).await;
                Err(TransportError::Request(message))
            }
            Behavior::Hang => std::future::pending().await,
            Behavior::Panic => panic!("scripted transport panic"),
        };

        self.log.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.log.finished.fetch_add(1, Ordering::SeqCst);
        outcome
    }
}

/// Sink that records every slot update in arrival order
#[derive(Default)]
pub struct RecordingSink {
    updates: Mutex<Vec<(usize, ProbeResult)>>,
    rebuilds: AtomicUsize,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn updates(&self) -> Vec<(usize, ProbeResult)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn rebuilds(&self) -> usize {
        self.rebuilds.load(Ordering::SeqCst)
    }
}

impl StatusSink for RecordingSink {
    fn update_slot(
        &self,
        index: usize,
        _server: &ServerRecord,
        result: &ProbeResult,
        _observed_at: DateTime<Local>,
    ) {
        self.updates.lock().unwrap().push((index, result.clone()));
    }

    fn rebuild(&self, _servers: &[ServerRecord]) {
        self.rebuilds.fetch_add(1, Ordering::SeqCst);
    }
}
