// ── Episode domain types ──

use serde::{Deserialize, Serialize};

/// The canonical Episode type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub published_date: String,
    pub mp3: String,
    pub image: String,
    pub episode_number: u32,
    pub category: String,
}
