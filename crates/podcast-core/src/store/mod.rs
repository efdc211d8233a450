// ── Reactive data store ──
//
// Single-writer podcast state with push-based change notification and
// derived views.

mod data_store;
mod derived;
mod refresh;
mod state;

pub use data_store::{PodcastStore, StoreEvent};
pub use state::{Collection, CollectionStatus, StoreState};
