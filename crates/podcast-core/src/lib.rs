// podcast-core: Reactive data layer between podcast-api and consumers (CLI).

pub mod client;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod service;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use client::{HttpFetch, HttpStore, PodcastClient};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{CoreError, RefreshError, RefreshFailure};
pub use service::{EpisodesService, PodcastService, PodcastSource};
pub use store::{Collection, CollectionStatus, PodcastStore, StoreEvent, StoreState};
pub use stream::{StateStream, debounce_queries, drive_queries};

// Re-export model types at the crate root for ergonomics.
pub use model::{Episode, Filter, Podcast, PodcastId, SortOrder, SubscribedPodcast};
