use std::cell::{Cell, RefCell};

use super::*;
use crate::api::Method;
use crate::test_support::{FakeServer, material_json};

// =============================================================
// MarkerWatch
// =============================================================

#[test]
fn first_observation_is_never_a_change() {
    let mut watch = MarkerWatch::new();
    assert!(!watch.observe("A"));
    assert_eq!(watch.last(), Some("A"));
}

#[test]
fn same_marker_is_not_a_change() {
    let mut watch = MarkerWatch::new();
    watch.observe("A");
    assert!(!watch.observe("A"));
}

#[test]
fn different_marker_is_a_change_once() {
    let mut watch = MarkerWatch::new();
    watch.observe("A");
    assert!(watch.observe("B"));
    assert!(!watch.observe("B"));
    assert_eq!(watch.last(), Some("B"));
}

#[test]
fn markers_compare_exactly_without_ordering() {
    let mut watch = MarkerWatch::new();
    watch.observe("2026-10-14T08:00:01");
    assert!(watch.observe("2026-10-14T08:00:00"), "an older-looking marker still counts as a change");
}

// =============================================================
// tick
// =============================================================

#[tokio::test]
async fn first_tick_establishes_baseline_without_refetch() {
    let server = FakeServer::new();
    let api = server.client();
    server.push_marker("A");
    let mut poller = FreshnessPoller::default();

    assert_eq!(poller.tick(&api).await, TickOutcome::Baseline);
    assert_eq!(server.count(Method::Get, "/materiels/"), 0);
}

#[tokio::test]
async fn unchanged_marker_does_not_refetch() {
    let server = FakeServer::new();
    let api = server.client();
    server.push_marker("A");
    server.push_marker("A");
    let mut poller = FreshnessPoller::default();

    poller.tick(&api).await;
    assert_eq!(poller.tick(&api).await, TickOutcome::Unchanged);
    assert_eq!(server.count(Method::Get, "/materiels/"), 0);
}

#[tokio::test]
async fn changed_marker_refetches_exactly_once() {
    let server = FakeServer::new();
    let api = server.client();
    server.seed("/materiels/", material_json("TR-01"));
    server.push_marker("A");
    server.push_marker("B");
    let mut poller = FreshnessPoller::default();

    poller.tick(&api).await;
    let outcome = poller.tick(&api).await;

    let TickOutcome::Refreshed(materials) = outcome else {
        panic!("expected refresh, got {outcome:?}");
    };
    assert_eq!(materials.len(), 1);
    assert_eq!(server.count(Method::Get, "/materiels/"), 1);
}

#[tokio::test]
async fn marker_failure_is_skipped_and_keeps_baseline() {
    let server = FakeServer::new();
    let api = server.client();
    server.push_marker("A");
    server.push_marker_failure();
    server.push_marker("A");
    let mut poller = FreshnessPoller::default();

    assert_eq!(poller.tick(&api).await, TickOutcome::Baseline);
    assert_eq!(poller.tick(&api).await, TickOutcome::MarkerFailed);
    assert_eq!(poller.tick(&api).await, TickOutcome::Unchanged);
    assert_eq!(poller.watch().last(), Some("A"));
}

#[tokio::test]
async fn refetch_failure_after_change_is_reported() {
    let server = FakeServer::new();
    let api = server.client();
    server.push_marker("A");
    let mut poller = FreshnessPoller::default();
    poller.tick(&api).await;

    server.force_next(200, serde_json::json!({ "last_update": "B" }));
    server.force_next(500, serde_json::json!({ "detail": "db down" }));

    assert_eq!(poller.tick(&api).await, TickOutcome::RefreshFailed);
    assert_eq!(poller.watch().last(), Some("B"));
}

// =============================================================
// run loop
// =============================================================

#[tokio::test]
async fn run_delivers_refreshes_only_on_change_and_stops_when_dead() {
    let server = FakeServer::new();
    let api = server.client();
    server.seed("/materiels/", material_json("TR-01"));
    for marker in ["A", "A", "B", "B"] {
        server.push_marker(marker);
    }
    let sleeps = Cell::new(0_u32);
    let delivered = RefCell::new(Vec::new());

    FreshnessPoller::new(Duration::from_millis(10))
        .run(
            &api,
            |interval| {
                assert_eq!(interval, Duration::from_millis(10));
                sleeps.set(sleeps.get() + 1);
                std::future::ready(())
            },
            || sleeps.get() <= 4,
            |materials| delivered.borrow_mut().push(materials.len()),
        )
        .await;

    assert_eq!(sleeps.get(), 5);
    assert_eq!(*delivered.borrow(), vec![1]);
    assert_eq!(server.count(Method::Get, "/materiels/events"), 4);
    assert_eq!(server.count(Method::Get, "/materiels/"), 1);
}

#[tokio::test]
async fn run_never_ticks_when_unmounted_before_first_interval() {
    let server = FakeServer::new();
    let api = server.client();

    FreshnessPoller::default().run(&api, |_| std::future::ready(()), || false, |_| {}).await;

    assert_eq!(server.request_count(), 0);
}
