// Backend response types
//
// Transfer objects exactly as the backend serves them. Field names follow the
// backend's snake_case JSON; the view-model shapes live in `podcast-core`.

use serde::{Deserialize, Serialize};

// ── Podcast ──────────────────────────────────────────────────────────

/// A podcast ("broadcast") as returned by `GET /podcasts` and `GET /myPodcasts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPodcast {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub subscribers: u64,
    #[serde(default)]
    pub monthly_listeners: u64,
    #[serde(default)]
    pub average_rating: f64,
}

// ── Episode ──────────────────────────────────────────────────────────

/// An episode ("chapter") as returned by `GET /episodes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEpisode {
    pub id: u64,
    #[serde(default)]
    pub podcast_id: Option<u64>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub audio_url: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub episode_number: u32,
    #[serde(default)]
    pub listeners: u64,
    #[serde(default)]
    pub rating: f64,
    /// Not every backend build sends a category for episodes.
    #[serde(default)]
    pub category: Option<String>,
}
