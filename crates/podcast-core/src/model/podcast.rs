// ── Podcast domain types ──

use serde::{Deserialize, Serialize};

/// Stable backend identifier of a podcast.
pub type PodcastId = u64;

/// The canonical Podcast type.
///
/// Country and listener counts from the backend are dropped;
/// nothing downstream displays them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Podcast {
    pub id: PodcastId,
    pub title: String,
    pub description: String,
    pub image: String,
    pub category: String,
    pub language: String,
    pub website: String,
    pub subscribers: u64,
    pub rating: f64,
}

/// A podcast annotated with whether it is in the user's subscriptions.
///
/// Always computed from the store, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscribedPodcast {
    #[serde(flatten)]
    pub podcast: Podcast,
    pub subscribed: bool,
}
