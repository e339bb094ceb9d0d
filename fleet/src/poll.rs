//! Materials freshness poller.
//!
//! The backend has no push channel. Instead `/materiels/events` exposes an
//! opaque `last_update` marker; the poller fetches it on a fixed interval and
//! refetches the full list only when the marker moved.
//!
//! INVARIANTS
//! ==========
//! - The first marker ever observed only establishes a baseline and never
//!   triggers a refetch ([`MarkerWatch::observe`]).
//! - Markers compare by exact string equality; there is no ordering.
//! - After each successful marker fetch the stored marker is replaced,
//!   whether or not it changed.
//! - A failed tick is logged and skipped; the schedule is not altered.

#[cfg(test)]
#[path = "poll_test.rs"]
mod poll_test;

use std::future::Future;
use std::time::Duration;

use crate::api::{ApiClient, Transport};
use crate::model::Material;
use crate::session::TokenStorage;

/// Remembers the last marker and decides whether a new one is a change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarkerWatch {
    last: Option<String>,
}

impl MarkerWatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `marker` and report whether it differs from a previously seen one.
    ///
    /// Returns `false` for the very first observation.
    pub fn observe(&mut self, marker: &str) -> bool {
        let changed = self.last.as_deref().is_some_and(|previous| previous != marker);
        self.last = Some(marker.to_owned());
        changed
    }

    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

/// What a single poll tick did.
#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// First marker recorded; nothing refetched.
    Baseline,
    Unchanged,
    /// Marker moved and the list was refetched.
    Refreshed(Vec<Material>),
    MarkerFailed,
    /// Marker moved but the list refetch failed.
    RefreshFailed,
}

/// Fixed-interval marker poller. One instance per mounted Materials view.
#[derive(Clone, Debug)]
pub struct FreshnessPoller {
    watch: MarkerWatch,
    interval: Duration,
}

impl FreshnessPoller {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);

    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self { watch: MarkerWatch::new(), interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn watch(&self) -> &MarkerWatch {
        &self.watch
    }

    /// Fetch the marker once and refetch the list if it moved.
    pub async fn tick<T: Transport, S: TokenStorage>(&mut self, api: &ApiClient<T, S>) -> TickOutcome {
        let marker = match api.last_update().await {
            Ok(update) => update.last_update,
            Err(error) => {
                tracing::warn!(%error, "materials marker poll failed");
                return TickOutcome::MarkerFailed;
            }
        };

        let had_baseline = self.watch.last().is_some();
        if !self.watch.observe(&marker) {
            return if had_baseline { TickOutcome::Unchanged } else { TickOutcome::Baseline };
        }

        tracing::debug!(marker, "materials marker moved; refetching");
        match api.list::<Material>().await {
            Ok(materials) => TickOutcome::Refreshed(materials),
            Err(error) => {
                tracing::warn!(%error, "materials refetch after marker change failed");
                TickOutcome::RefreshFailed
            }
        }
    }

    /// Sleep, tick, repeat while `alive()` holds.
    ///
    /// `sleep` is the host timer (`gloo-timers` in the browser, `tokio` in the
    /// CLI). `alive` is checked after every sleep and again before a refreshed
    /// list is delivered, so an unmounted view never receives a late update.
    pub async fn run<T, S, Sleep, Fut, Alive, OnRefresh>(
        mut self,
        api: &ApiClient<T, S>,
        mut sleep: Sleep,
        alive: Alive,
        mut on_refresh: OnRefresh,
    ) where
        T: Transport,
        S: TokenStorage,
        Sleep: FnMut(Duration) -> Fut,
        Fut: Future<Output = ()>,
        Alive: Fn() -> bool,
        OnRefresh: FnMut(Vec<Material>),
    {
        loop {
            sleep(self.interval).await;
            if !alive() {
                break;
            }
            if let TickOutcome::Refreshed(materials) = self.tick(api).await {
                if alive() {
                    on_refresh(materials);
                }
            }
        }
        tracing::debug!("materials poller stopped");
    }
}

impl Default for FreshnessPoller {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}
