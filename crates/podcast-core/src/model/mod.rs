// ── Domain model ──
//
// View-model shapes consumed by presentation. They are produced from the
// backend transfer objects by the adapters in `convert`.

pub mod episode;
pub mod filter;
pub mod podcast;

pub use episode::Episode;
pub use filter::{Filter, SortOrder};
pub use podcast::{Podcast, PodcastId, SubscribedPodcast};
