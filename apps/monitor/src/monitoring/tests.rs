/// End-to-end scenarios for the monitoring loop
///
/// These tests drive a full session (registry, scheduler, prober, slot
/// table) against a scripted transport under paused time.
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use super::presenter::{SlotStatus, SlotTable};
use super::prober::Prober;
use super::testing::ScriptedTransport;
use super::types::{OverlapPolicy, TIMEOUT_REASON};
use crate::registry::{HostRegistry, RegistrationError};
use crate::session::{MonitorSession, ViewMode};
use crate::storage::{KeyValueStore, MemoryStore};

async fn open_session(
    transport: ScriptedTransport,
    store: Arc<MemoryStore>,
    overlap: OverlapPolicy,
) -> (MonitorSession, SlotTable) {
    let slots = SlotTable::new();
    let prober = Arc::new(Prober::new(Arc::new(transport), Duration::from_millis(6000), "https"));
    let session = MonitorSession::open(
        store,
        prober,
        Arc::new(slots.clone()),
        Duration::from_millis(10_000),
        overlap,
    )
    .await
    .unwrap();
    (session, slots)
}

async fn seeded_store(servers: &[(&str, &str)]) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    let mut registry = HostRegistry::new();
    for (name, host) in servers {
        registry.register(store.as_ref(), name, host).await.unwrap();
    }
    store
}

#[tokio::test(start_paused = true)]
async fn test_two_reachable_hosts_show_latency() {
    let transport = ScriptedTransport::new().respond("example.com", 40).respond("10.0.0.5", 120);
    let store = seeded_store(&[("web", "example.com"), ("db", "10.0.0.5")]).await;
    let (mut session, slots) = open_session(transport, store, OverlapPolicy::Allow).await;

    session.enter_initial_mode().await;
    assert_eq!(session.mode(), ViewMode::View);
    sleep(Duration::from_millis(500)).await;

    let table = slots.snapshot();
    assert_eq!(table.len(), 2);
    match (&table[0].status, &table[1].status) {
        (SlotStatus::Up { latency_ms: web }, SlotStatus::Up { latency_ms: db }) => {
            assert!((40..=41).contains(web), "web latency {web}");
            assert!((120..=121).contains(db), "db latency {db}");
        }
        other => panic!("unexpected statuses: {other:?}"),
    }
    assert!(table[0].label().starts_with("✅ (4"));
    assert!(table[1].label().starts_with("✅ (12"));
    assert!(table.iter().all(|slot| slot.last_checked.is_some()));
}

#[tokio::test(start_paused = true)]
async fn test_duplicate_name_is_rejected() {
    let store = seeded_store(&[("web", "example.com")]).await;
    let before = store.get("serverList").await.unwrap();
    let (mut session, _slots) =
        open_session(ScriptedTransport::new(), store.clone(), OverlapPolicy::Allow).await;
    session.enter_initial_mode().await;

    let err = session.register("web", "other.example.com").await.unwrap_err();

    match err {
        RegistrationError::Invalid(check) => {
            assert!(!check.name.is_valid);
            assert!(check.name.error.is_some());
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(session.servers().await.len(), 1);
    assert_eq!(store.get("serverList").await.unwrap(), before);
}

#[tokio::test(start_paused = true)]
async fn test_garbage_host_is_rejected() {
    let (mut session, _slots) = open_session(
        ScriptedTransport::new(),
        Arc::new(MemoryStore::new()),
        OverlapPolicy::Allow,
    )
    .await;
    session.enter_initial_mode().await;

    let err = session.register("web", "not a host!!").await.unwrap_err();

    assert!(matches!(err, RegistrationError::Invalid(ref check) if !check.host.is_valid));
    assert!(session.servers().await.is_empty());
    assert_eq!(session.mode(), ViewMode::Add);
}

#[tokio::test(start_paused = true)]
async fn test_silent_host_shows_timeout_after_deadline() {
    let transport = ScriptedTransport::new().hang("example.com");
    let store = seeded_store(&[("web", "example.com")]).await;
    let (mut session, slots) = open_session(transport, store, OverlapPolicy::Allow).await;

    session.enter_initial_mode().await;

    sleep(Duration::from_millis(5_900)).await;
    assert_eq!(slots.get(0).unwrap().status, SlotStatus::Pending);

    sleep(Duration::from_millis(200)).await;
    let slot = slots.get(0).unwrap();
    assert_eq!(slot.label(), "❌");
    assert_eq!(slot.reason(), Some(TIMEOUT_REASON));
    assert!(slot.last_checked.is_some());
}

#[tokio::test(start_paused = true)]
async fn test_registration_then_monitoring() {
    let transport = ScriptedTransport::new().respond("example.com", 15);
    let store = Arc::new(MemoryStore::new());
    let (mut session, slots) = open_session(transport, store.clone(), OverlapPolicy::Allow).await;
    session.enter_initial_mode().await;
    assert_eq!(session.mode(), ViewMode::Add);

    session.register("web", "example.com").await.unwrap();
    sleep(Duration::from_millis(100)).await;

    assert!(matches!(slots.get(0).unwrap().status, SlotStatus::Up { .. }));
    assert_eq!(HostRegistry::load(store.as_ref()).await.unwrap().len(), 1);
}

/// Overlapping sweeps are not serialized: a stale sweep that finishes late
/// overwrites the fresher result for the same slot (last write wins).
#[tokio::test(start_paused = true)]
async fn test_overlapping_sweeps_can_show_stale_status() {
    // Sweep 1 (t=0): "a" takes 5.9s, then "b" is slow (5.5s) and fails.
    // Sweep 2 (t=10): "a" takes 0.2s, then "b" answers fast.
    // Sweep 1 writes b's failure at t=11.4, after sweep 2 wrote success at
    // t=10.25.
    let transport = ScriptedTransport::new()
        .respond("a.example.com", 5_900)
        .respond("a.example.com", 200)
        .fail("b.example.com", 5_500, "stale failure")
        .respond("b.example.com", 50);
    let store = seeded_store(&[("a", "a.example.com"), ("b", "b.example.com")]).await;
    let (mut session, slots) = open_session(transport, store, OverlapPolicy::Allow).await;

    session.enter_initial_mode().await;

    sleep(Duration::from_millis(10_300)).await;
    assert!(matches!(slots.get(1).unwrap().status, SlotStatus::Up { .. }));

    sleep(Duration::from_millis(1_200)).await;
    assert_eq!(slots.get(1).unwrap().reason(), Some("Request failed: stale failure"));
}

/// A sweep still running when a server is removed must not write its
/// results onto the rows that shifted up.
#[tokio::test(start_paused = true)]
async fn test_removal_does_not_shift_stale_results_onto_other_rows() {
    let transport = ScriptedTransport::new().hang("a.example.com").respond("b.example.com", 10);
    let store = seeded_store(&[("a", "a.example.com"), ("b", "b.example.com")]).await;
    let (mut session, slots) = open_session(transport, store, OverlapPolicy::Allow).await;

    session.enter_initial_mode().await;
    sleep(Duration::from_millis(1_000)).await;
    session.remove("a").await.unwrap();

    sleep(Duration::from_millis(100)).await;
    assert_eq!(slots.len(), 1);
    assert!(matches!(slots.get(0).unwrap().status, SlotStatus::Up { .. }));

    // The first sweep times out on "a" at t=6s and then probes "b" at its
    // old position
    sleep(Duration::from_millis(5_500)).await;
    let slot = slots.get(0).unwrap();
    assert!(matches!(slot.status, SlotStatus::Up { .. }), "row 0 shows {slot:?}");
    assert_eq!(slot.reason(), None);
}
