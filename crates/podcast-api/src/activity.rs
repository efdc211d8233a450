// Request activity tracking
//
// A process-wide "something is loading" flag toggled around every outbound
// request, plus the retry policy that sits in the same wrapping layer.
// Presentation code watches the flag to show or hide a spinner.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::client::Fetch;
use crate::error::Error;

/// Retries applied to transient failures by [`Tracked`] unless overridden.
pub const DEFAULT_RETRIES: u32 = 3;

// ── ActivityTracker ──────────────────────────────────────────────────

/// Counts outbound requests currently in flight.
///
/// Cheaply cloneable; every clone observes the same counter. The tracker is
/// active while the count is non-zero, so overlapping requests cannot switch
/// the flag off early.
#[derive(Debug, Clone)]
pub struct ActivityTracker {
    in_flight: Arc<watch::Sender<usize>>,
}

impl ActivityTracker {
    pub fn new() -> Self {
        let (in_flight, _) = watch::channel(0usize);
        Self {
            in_flight: Arc::new(in_flight),
        }
    }

    /// Mark a request as started. The returned guard marks it finished when
    /// dropped, whatever the outcome.
    pub fn start(&self) -> ActivityGuard {
        self.in_flight.send_modify(|n| *n += 1);
        ActivityGuard {
            tracker: self.clone(),
        }
    }

    /// `true` while at least one request is in flight.
    pub fn is_active(&self) -> bool {
        *self.in_flight.borrow() > 0
    }

    /// Number of requests currently in flight.
    pub fn in_flight(&self) -> usize {
        *self.in_flight.borrow()
    }

    /// Subscribe to in-flight count changes.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.in_flight.subscribe()
    }

    fn finish(&self) {
        self.in_flight.send_modify(|n| *n = n.saturating_sub(1));
    }
}

impl Default for ActivityTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Held for the duration of one request; see [`ActivityTracker::start`].
#[derive(Debug)]
pub struct ActivityGuard {
    tracker: ActivityTracker,
}

impl Drop for ActivityGuard {
    fn drop(&mut self) {
        self.tracker.finish();
    }
}

// ── Tracked ──────────────────────────────────────────────────────────

/// Wraps a [`Fetch`] implementation with activity tracking and retries.
///
/// The tracker is raised once per logical request (not per attempt) and is
/// lowered when the last attempt resolves or the future is dropped.
#[derive(Debug, Clone)]
pub struct Tracked<F> {
    inner: F,
    tracker: ActivityTracker,
    retries: u32,
}

impl<F: Fetch> Tracked<F> {
    pub fn new(inner: F, tracker: ActivityTracker) -> Self {
        Self {
            inner,
            tracker,
            retries: DEFAULT_RETRIES,
        }
    }

    /// Override how many times a transient failure is retried.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }
}

impl<F: Fetch> Fetch for Tracked<F> {
    async fn get<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, Error>
    where
        T: DeserializeOwned + Send,
    {
        let _guard = self.tracker.start();
        let mut attempt = 0u32;

        loop {
            match self.inner.get::<T>(path, query).await {
                Ok(value) => {
                    debug!(path, attempt, "request completed");
                    return Ok(value);
                }
                Err(e) if e.is_transient() && attempt < self.retries => {
                    attempt += 1;
                    warn!(path, attempt, error = %e, "transient failure, retrying");
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    /// Fails with a 503 a fixed number of times, then succeeds.
    struct Flaky {
        failures: u32,
        calls: AtomicU32,
        tracker: ActivityTracker,
        seen_active: AtomicU32,
    }

    impl Fetch for Flaky {
        async fn get<T>(&self, path: &str, _query: &[(&str, &str)]) -> Result<T, Error>
        where
            T: DeserializeOwned + Send,
        {
            if self.tracker.is_active() {
                self.seen_active.fetch_add(1, Ordering::SeqCst);
            }
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                return Err(Error::Status {
                    status: 503,
                    url: path.to_owned(),
                });
            }
            serde_json::from_str("[]").map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: "[]".into(),
            })
        }
    }

    fn flaky(failures: u32, tracker: &ActivityTracker) -> Flaky {
        Flaky {
            failures,
            calls: AtomicU32::new(0),
            tracker: tracker.clone(),
            seen_active: AtomicU32::new(0),
        }
    }

    #[test]
    fn guard_lowers_flag_on_drop() {
        let tracker = ActivityTracker::new();
        assert!(!tracker.is_active());

        let a = tracker.start();
        let b = tracker.start();
        assert_eq!(tracker.in_flight(), 2);

        drop(a);
        assert!(tracker.is_active(), "one request still outstanding");
        drop(b);
        assert!(!tracker.is_active());
    }

    #[tokio::test]
    async fn subscribers_see_the_flag_rise_and_fall() {
        let tracker = ActivityTracker::new();
        let mut rx = tracker.subscribe();

        let guard = tracker.start();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 1);

        drop(guard);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 0);
    }

    #[tokio::test]
    async fn retries_transient_failures_until_success() {
        let tracker = ActivityTracker::new();
        let tracked = Tracked::new(flaky(2, &tracker), tracker.clone());

        let out: Vec<u32> = tracked.get("/podcasts", &[]).await.unwrap();

        assert!(out.is_empty());
        assert_eq!(tracked.inner().calls.load(Ordering::SeqCst), 3);
        assert_eq!(tracked.inner().seen_active.load(Ordering::SeqCst), 3);
        assert!(!tracker.is_active());
    }

    #[tokio::test]
    async fn gives_up_after_configured_retries() {
        let tracker = ActivityTracker::new();
        let tracked = Tracked::new(flaky(10, &tracker), tracker.clone()).with_retries(1);

        let err = tracked.get::<Vec<u32>>("/podcasts", &[]).await.unwrap_err();

        assert_eq!(err.status(), Some(503));
        assert_eq!(tracked.inner().calls.load(Ordering::SeqCst), 2);
        assert!(!tracker.is_active(), "flag must reset after failure");
    }
}
