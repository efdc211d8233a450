// ── Reactive state streams ──
//
// Subscription types for consuming store changes.

pub mod search;

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::store::StoreState;

pub use search::{DEFAULT_DEBOUNCE, debounce_queries, drive_queries};

/// A subscription to the store's state.
///
/// Provides both point-in-time snapshot access and reactive change
/// notification via the `changed()` method or by converting to a `Stream`.
pub struct StateStream {
    current: Arc<StoreState>,
    receiver: watch::Receiver<Arc<StoreState>>,
}

impl StateStream {
    pub(crate) fn new(receiver: watch::Receiver<Arc<StoreState>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// Get the snapshot captured at creation time (or at the last `changed()`).
    pub fn current(&self) -> &Arc<StoreState> {
        &self.current
    }

    /// Wait for the next patch, returning the new snapshot.
    /// Returns `None` if the store has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<StoreState>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = Arc::clone(&snap);
        Some(snap)
    }

    /// Wait until `loading` is false, returning that snapshot.
    pub async fn settled(&mut self) -> Option<Arc<StoreState>> {
        let snap = self
            .receiver
            .wait_for(|s| !s.loading())
            .await
            .ok()?
            .clone();
        self.current = Arc::clone(&snap);
        Some(snap)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    pub fn into_stream(self) -> StateWatchStream {
        StateWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
///
/// Yields the current snapshot first, then a new one after each patch.
pub struct StateWatchStream {
    inner: WatchStream<Arc<StoreState>>,
}

impl Stream for StateWatchStream {
    type Item = Arc<StoreState>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
