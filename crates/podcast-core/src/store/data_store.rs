// ── Central reactive podcast store ──
//
// Owns the `StoreState` aggregate behind a `watch` channel. Every mutation is
// a single `send_modify` patch, so readers always see a whole snapshot.
// Derived views are recomputed from the latest snapshot on read.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::{broadcast, watch};
use tracing::debug;

use super::derived::{self, Memo};
use super::refresh::InFlight;
use super::state::{Collection, StoreState};
use crate::error::RefreshFailure;
use crate::model::{Filter, Podcast, SortOrder, SubscribedPodcast};
use crate::service::PodcastSource;
use crate::stream::StateStream;

const EVENT_CHANNEL_SIZE: usize = 64;

/// Notifications about refresh progress.
///
/// Every refresh that starts is followed by exactly one `RefreshCompleted` or
/// `RefreshFailed` for the same collection.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    RefreshStarted { collection: Collection },
    RefreshCompleted { collection: Collection, count: usize },
    RefreshFailed(RefreshFailure),
}

/// Reactive store for podcasts and the user's subscriptions.
///
/// Cheaply cloneable via `Arc`. The store is the only writer of its state;
/// consumers read snapshots and derived views, or subscribe to changes.
pub struct PodcastStore<S> {
    pub(crate) inner: Arc<StoreInner<S>>,
}

pub(crate) struct StoreInner<S> {
    pub(crate) source: S,
    pub(crate) state: watch::Sender<Arc<StoreState>>,
    pub(crate) events: broadcast::Sender<StoreEvent>,
    pub(crate) podcasts_refresh: Mutex<Option<InFlight>>,
    pub(crate) my_podcasts_refresh: Mutex<Option<InFlight>>,
    initialized: AtomicBool,
    subscribed_view: Memo<Vec<Podcast>>,
    sorted_view: Memo<Vec<Podcast>>,
    flagged_view: Memo<Vec<SubscribedPodcast>>,
    sorted_flagged_view: Memo<Vec<SubscribedPodcast>>,
}

impl<S> Clone for PodcastStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: PodcastSource> PodcastStore<S> {
    /// Create a store with default state. Does NOT fetch anything; call
    /// [`initialize()`](Self::initialize) once from the composing root.
    pub fn new(source: S) -> Self {
        Self::with_filter(source, Filter::default())
    }

    /// Create a store whose filter starts from `filter` instead of the default.
    pub fn with_filter(source: S, filter: Filter) -> Self {
        let (state, _) = watch::channel(Arc::new(StoreState::with_filter(filter)));
        let (events, _) = broadcast::channel(EVENT_CHANNEL_SIZE);

        Self {
            inner: Arc::new(StoreInner {
                source,
                state,
                events,
                podcasts_refresh: Mutex::new(None),
                my_podcasts_refresh: Mutex::new(None),
                initialized: AtomicBool::new(false),
                subscribed_view: Memo::new(),
                sorted_view: Memo::new(),
                flagged_view: Memo::new(),
                sorted_flagged_view: Memo::new(),
            }),
        }
    }

    /// Load all podcasts the first time this is called; later calls do
    /// nothing and return `Ok(())`.
    pub async fn initialize(&self) -> Result<(), RefreshFailure> {
        if self.inner.initialized.swap(true, Ordering::SeqCst) {
            debug!("store already initialized");
            return Ok(());
        }
        self.refresh_all_podcasts().await
    }

    /// Re-fetch every public podcast.
    ///
    /// If a refresh of the same collection is already running, this joins it
    /// instead of issuing a second request.
    pub async fn refresh_all_podcasts(&self) -> Result<(), RefreshFailure> {
        self.refresh(Collection::Podcasts).await
    }

    /// Re-fetch the user's subscriptions. Coalesces like
    /// [`refresh_all_podcasts`](Self::refresh_all_podcasts).
    pub async fn refresh_my_podcasts(&self) -> Result<(), RefreshFailure> {
        self.refresh(Collection::MyPodcasts).await
    }

    // ── Filter operations ────────────────────────────────────────────

    /// Store the current search text. No matching is applied here.
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        if self.inner.state.borrow().filter().query == query {
            return;
        }
        self.patch(|s| s.set_query(query));
    }

    pub fn set_order(&self, order: SortOrder) {
        if self.inner.state.borrow().filter().order == order {
            return;
        }
        self.patch(|s| s.set_order(order));
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    /// The latest committed state.
    pub fn state(&self) -> Arc<StoreState> {
        self.inner.state.borrow().clone()
    }

    pub fn podcasts(&self) -> Arc<Vec<Podcast>> {
        Arc::clone(self.state().podcasts())
    }

    pub fn my_podcasts(&self) -> Arc<Vec<Podcast>> {
        Arc::clone(self.state().my_podcasts())
    }

    pub fn loading(&self) -> bool {
        self.inner.state.borrow().loading()
    }

    pub fn filter(&self) -> Filter {
        self.inner.state.borrow().filter().clone()
    }

    // ── Derived views ────────────────────────────────────────────────

    /// Podcasts the user subscribes to, in `podcasts` order.
    pub fn subscribed_podcasts(&self) -> Arc<Vec<Podcast>> {
        let state = self.state();
        self.inner
            .subscribed_view
            .get_or_compute(&state, derived::subscribed_podcasts)
    }

    /// All podcasts sorted by rating in the current filter order.
    pub fn sort_by_rating(&self) -> Arc<Vec<Podcast>> {
        let state = self.state();
        self.inner
            .sorted_view
            .get_or_compute(&state, derived::sort_by_rating)
    }

    /// All podcasts, each flagged with whether the user subscribes to it.
    pub fn podcasts_with_subscription(&self) -> Arc<Vec<SubscribedPodcast>> {
        let state = self.state();
        self.inner
            .flagged_view
            .get_or_compute(&state, derived::with_subscription)
    }

    /// [`sort_by_rating`](Self::sort_by_rating), each entry flagged with
    /// whether the user subscribes to it.
    pub fn sort_by_rating_with_subscription(&self) -> Arc<Vec<SubscribedPodcast>> {
        let state = self.state();
        self.inner
            .sorted_flagged_view
            .get_or_compute(&state, derived::sorted_with_subscription)
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe(&self) -> StateStream {
        StateStream::new(self.inner.state.subscribe())
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<StoreEvent> {
        self.inner.events.subscribe()
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Apply one atomic patch to the state.
    pub(crate) fn patch(&self, f: impl FnOnce(&mut StoreState)) {
        // `send_modify` updates unconditionally, even with zero receivers.
        self.inner
            .state
            .send_modify(|state| f(Arc::make_mut(state)));
    }

    pub(crate) fn emit(&self, event: StoreEvent) {
        // No receivers is not an error.
        let _ = self.inner.events.send(event);
    }
}
