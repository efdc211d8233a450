// ── API-to-domain type conversions ──
//
// Bridges raw `podcast_api` transfer objects into the view-model types in
// `podcast_core::model`. Pure projections: no I/O, no filtering, output has
// the same length and order as the input.

use podcast_api::{RawEpisode, RawPodcast};

use crate::model::{Episode, Podcast};

// ── Podcast ────────────────────────────────────────────────────────

impl From<RawPodcast> for Podcast {
    fn from(raw: RawPodcast) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            description: raw.description,
            image: raw.image,
            category: raw.category,
            language: raw.language,
            website: raw.website,
            subscribers: raw.subscribers,
            rating: raw.average_rating,
        }
    }
}

/// Adapt a backend podcast list into view-model podcasts.
pub fn adapt_podcasts(raw: Vec<RawPodcast>) -> Vec<Podcast> {
    raw.into_iter().map(Podcast::from).collect()
}

// ── Episode ────────────────────────────────────────────────────────

impl From<RawEpisode> for Episode {
    fn from(raw: RawEpisode) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            description: raw.description,
            duration: raw.duration,
            published_date: raw.release_date,
            mp3: raw.audio_url,
            image: raw.image,
            episode_number: raw.episode_number,
            category: raw.category.unwrap_or_default(),
        }
    }
}

/// Adapt a backend episode list into view-model episodes.
pub fn adapt_episodes(raw: Vec<RawEpisode>) -> Vec<Episode> {
    raw.into_iter().map(Episode::from).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn raw_podcast(id: u64, rating: f64) -> RawPodcast {
        RawPodcast {
            id,
            title: format!("Podcast {id}"),
            description: "about things".into(),
            image: format!("https://img.example/{id}.png"),
            category: "Technology".into(),
            language: "en".into(),
            country: "US".into(),
            website: "https://example.com".into(),
            subscribers: 100,
            monthly_listeners: 5000,
            average_rating: rating,
        }
    }

    #[test]
    fn podcast_adapter_maps_rating_and_keeps_order() {
        let adapted = adapt_podcasts(vec![raw_podcast(1, 4.5), raw_podcast(2, 3.0)]);

        assert_eq!(adapted.len(), 2);
        assert_eq!(adapted[0].id, 1);
        assert!((adapted[0].rating - 4.5).abs() < f64::EPSILON);
        assert_eq!(adapted[1].id, 2);
        assert!((adapted[1].rating - 3.0).abs() < f64::EPSILON);
        assert_eq!(adapted[1].website, "https://example.com");
    }

    #[test]
    fn podcast_adapter_drops_backend_only_fields() {
        let value = serde_json::to_value(Podcast::from(raw_podcast(7, 1.0))).unwrap();
        let obj = value.as_object().unwrap();

        assert!(!obj.contains_key("country"));
        assert!(!obj.contains_key("monthly_listeners"));
        assert!(!obj.contains_key("average_rating"));
        assert!(obj.contains_key("rating"));
    }

    #[test]
    fn episode_adapter_renames_fields() {
        let raw: RawEpisode = serde_json::from_value(json!({
            "id": 9,
            "title": "Pilot",
            "release_date": "2024-01-01",
            "episode_number": 3,
            "audio_url": "a.mp3"
        }))
        .unwrap();

        let episode = Episode::from(raw);

        assert_eq!(episode.id, 9);
        assert_eq!(episode.published_date, "2024-01-01");
        assert_eq!(episode.episode_number, 3);
        assert_eq!(episode.mp3, "a.mp3");
        assert_eq!(episode.category, "");
    }

    #[test]
    fn episode_serializes_with_view_model_names() {
        let raw: RawEpisode = serde_json::from_value(json!({
            "id": 9,
            "title": "Pilot",
            "release_date": "2024-01-01",
            "episode_number": 3,
            "audio_url": "a.mp3",
            "category": "Tech"
        }))
        .unwrap();

        let value = serde_json::to_value(Episode::from(raw)).unwrap();

        assert_eq!(value["publishedDate"], "2024-01-01");
        assert_eq!(value["episodeNumber"], 3);
        assert_eq!(value["mp3"], "a.mp3");
        assert_eq!(value["category"], "Tech");
    }

    #[test]
    fn adapters_accept_empty_input() {
        assert!(adapt_podcasts(Vec::new()).is_empty());
        assert!(adapt_episodes(Vec::new()).is_empty());
    }
}
