// ── Store state aggregate ──
//
// The single record presentation reads from. Every mutation goes through one
// of the `pub(crate)` patch methods below and bumps `version`, which is what
// derived-view memoization keys on.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use strum::{Display, EnumString};

use crate::model::{Filter, Podcast, SortOrder};

/// The collections the store refreshes from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
pub enum Collection {
    #[strum(serialize = "podcasts")]
    #[serde(rename = "podcasts")]
    Podcasts,
    #[strum(serialize = "myPodcasts")]
    #[serde(rename = "myPodcasts")]
    MyPodcasts,
}

/// Lifecycle of one tracked collection.
///
/// `Idle -> Loading -> Loaded | Failed`, and back to `Loading` on the next
/// refresh. A failed refresh keeps whatever data was loaded before.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CollectionStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Immutable snapshot of the store.
///
/// Readers hold an `Arc<StoreState>`; a patch never changes a snapshot that
/// has already been handed out.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreState {
    podcasts: Arc<Vec<Podcast>>,
    my_podcasts: Arc<Vec<Podcast>>,
    loading: bool,
    filter: Filter,
    podcasts_status: CollectionStatus,
    my_podcasts_status: CollectionStatus,
    #[serde(skip)]
    version: u64,
}

impl StoreState {
    pub(crate) fn with_filter(filter: Filter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn podcasts(&self) -> &Arc<Vec<Podcast>> {
        &self.podcasts
    }

    pub fn my_podcasts(&self) -> &Arc<Vec<Podcast>> {
        &self.my_podcasts
    }

    /// `true` while at least one store-initiated refresh is in flight.
    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn status(&self, collection: Collection) -> CollectionStatus {
        match collection {
            Collection::Podcasts => self.podcasts_status,
            Collection::MyPodcasts => self.my_podcasts_status,
        }
    }

    /// Monotonic patch counter.
    pub fn version(&self) -> u64 {
        self.version
    }

    // ── Patches ──────────────────────────────────────────────────────

    /// Enter `Loading` for `collection`.
    pub(crate) fn begin(&mut self, collection: Collection) {
        *self.status_mut(collection) = CollectionStatus::Loading;
        self.settle();
    }

    /// Replace `collection` with fresh data and mark it `Loaded`.
    pub(crate) fn commit(&mut self, collection: Collection, items: Vec<Podcast>) {
        let items = Arc::new(dedup_by_id(items));
        match collection {
            Collection::Podcasts => self.podcasts = items,
            Collection::MyPodcasts => self.my_podcasts = items,
        }
        *self.status_mut(collection) = CollectionStatus::Loaded;
        self.settle();
    }

    /// Mark `collection` as `Failed`, leaving its data untouched.
    pub(crate) fn fail(&mut self, collection: Collection) {
        *self.status_mut(collection) = CollectionStatus::Failed;
        self.settle();
    }

    pub(crate) fn set_query(&mut self, query: String) {
        self.filter.query = query;
        self.settle();
    }

    pub(crate) fn set_order(&mut self, order: SortOrder) {
        self.filter.order = order;
        self.settle();
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn status_mut(&mut self, collection: Collection) -> &mut CollectionStatus {
        match collection {
            Collection::Podcasts => &mut self.podcasts_status,
            Collection::MyPodcasts => &mut self.my_podcasts_status,
        }
    }

    /// Recompute `loading` from the per-collection statuses and bump the
    /// version. Called at the end of every patch.
    fn settle(&mut self) {
        self.loading = self.podcasts_status == CollectionStatus::Loading
            || self.my_podcasts_status == CollectionStatus::Loading;
        self.version += 1;
    }
}

/// Keep the first occurrence of each id, preserving order.
fn dedup_by_id(items: Vec<Podcast>) -> Vec<Podcast> {
    let mut seen = HashSet::with_capacity(items.len());
    items.into_iter().filter(|p| seen.insert(p.id)).collect()
}
