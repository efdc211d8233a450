// ── Refresh orchestration ──
//
// Fetches a collection through the store's source and commits the result.
// Overlapping refreshes of the same collection are coalesced: the first call
// starts a shared in-flight operation, later calls await that same operation,
// and exactly one fetch and one commit happen. Different collections refresh
// independently. A panicking source is reported as a failed refresh, so the
// slot is always cleared and `loading` always settles.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::{Mutex, PoisonError};

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use tracing::{debug, error, info, warn};

use super::data_store::{PodcastStore, StoreEvent};
use super::state::Collection;
use crate::error::{RefreshError, RefreshFailure};
use crate::model::Podcast;
use crate::service::PodcastSource;

/// A refresh every caller of the same collection can await.
pub(crate) type InFlight = Shared<BoxFuture<'static, Result<(), RefreshFailure>>>;

impl<S: PodcastSource> PodcastStore<S> {
    pub(crate) async fn refresh(&self, collection: Collection) -> Result<(), RefreshFailure> {
        let in_flight = self.join_or_start(collection);
        in_flight.await
    }

    /// Return the running refresh for `collection`, starting one if none is
    /// running.
    ///
    /// The slot lock is held while the `Loading` patch is applied, so a
    /// concurrent caller either sees the slot filled or starts the only
    /// refresh itself.
    fn join_or_start(&self, collection: Collection) -> InFlight {
        let mut slot = lock(self.slot(collection));

        if let Some(running) = slot.as_ref() {
            debug!(%collection, "joining in-flight refresh");
            return running.clone();
        }

        self.patch(|s| s.begin(collection));
        self.emit(StoreEvent::RefreshStarted { collection });
        debug!(%collection, "refresh started");

        let store = self.clone();
        let in_flight: InFlight = async move { store.run(collection).await }
            .boxed()
            .shared();

        // Drive the refresh on its own task so it completes and commits even
        // if every caller drops its future.
        tokio::spawn(in_flight.clone());

        *slot = Some(in_flight.clone());
        in_flight
    }

    async fn run(self, collection: Collection) -> Result<(), RefreshFailure> {
        let fetch = async {
            match collection {
                Collection::Podcasts => self.inner.source.all_podcasts().await,
                Collection::MyPodcasts => self.inner.source.my_podcasts().await,
            }
        };

        let result = match AssertUnwindSafe(fetch).catch_unwind().await {
            Ok(result) => result.map_err(RefreshError::from),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(%collection, %message, "podcast source panicked");
                Err(RefreshError::Aborted { message })
            }
        };
        self.finish(collection, result)
    }

    /// Clear the in-flight slot and commit the outcome as one step.
    fn finish(
        &self,
        collection: Collection,
        result: Result<Vec<Podcast>, RefreshError>,
    ) -> Result<(), RefreshFailure> {
        let mut slot = lock(self.slot(collection));
        *slot = None;

        match result {
            Ok(items) => {
                let count = items.len();
                self.patch(|s| s.commit(collection, items));
                info!(%collection, count, "refresh complete");
                self.emit(StoreEvent::RefreshCompleted { collection, count });
                Ok(())
            }
            Err(e) => {
                self.patch(|s| s.fail(collection));
                let failure = RefreshFailure::new(collection, e);
                warn!(%collection, error = %failure.error, "refresh failed, keeping previous data");
                self.emit(StoreEvent::RefreshFailed(failure.clone()));
                Err(failure)
            }
        }
    }

    fn slot(&self, collection: Collection) -> &Mutex<Option<InFlight>> {
        match collection {
            Collection::Podcasts => &self.inner.podcasts_refresh,
            Collection::MyPodcasts => &self.inner.my_podcasts_refresh,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "podcast source panicked".to_owned()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
