// ── Domain services ──
//
// One service per backend resource. Each call builds the resource path,
// fetches through a `Fetch` implementation and adapts the payload. Nothing is
// fetched until the returned future is awaited.

use std::future::Future;

use podcast_api::{Fetch, RawEpisode, RawPodcast};
use tracing::debug;

use crate::convert::{adapt_episodes, adapt_podcasts};
use crate::model::{Episode, Podcast};

/// Where the store gets its podcast collections from.
///
/// [`PodcastService`] is the production implementation; tests drive the
/// store through hand-written sources.
pub trait PodcastSource: Send + Sync + 'static {
    /// Every public podcast.
    fn all_podcasts(&self)
    -> impl Future<Output = Result<Vec<Podcast>, podcast_api::Error>> + Send;

    /// The podcasts the user subscribes to.
    fn my_podcasts(&self) -> impl Future<Output = Result<Vec<Podcast>, podcast_api::Error>> + Send;
}

// ── Podcasts ─────────────────────────────────────────────────────────

/// Podcast resource: `GET /podcasts` and `GET /myPodcasts`.
#[derive(Debug, Clone)]
pub struct PodcastService<F> {
    api: F,
}

impl<F: Fetch> PodcastService<F> {
    pub const PATH: &'static str = "/podcasts";
    pub const MY_PATH: &'static str = "/myPodcasts";

    pub fn new(api: F) -> Self {
        Self { api }
    }

    /// All public podcasts.
    pub async fn get_all(&self) -> Result<Vec<Podcast>, podcast_api::Error> {
        let raw: Vec<RawPodcast> = self.api.get(Self::PATH, &[]).await?;
        debug!(count = raw.len(), "fetched podcasts");
        Ok(adapt_podcasts(raw))
    }

    /// The subscribed subset, served by its own endpoint.
    pub async fn get_my_podcasts(&self) -> Result<Vec<Podcast>, podcast_api::Error> {
        let raw: Vec<RawPodcast> = self.api.get(Self::MY_PATH, &[]).await?;
        debug!(count = raw.len(), "fetched my podcasts");
        Ok(adapt_podcasts(raw))
    }
}

impl<F: Fetch + 'static> PodcastSource for PodcastService<F> {
    fn all_podcasts(
        &self,
    ) -> impl Future<Output = Result<Vec<Podcast>, podcast_api::Error>> + Send {
        self.get_all()
    }

    fn my_podcasts(
        &self,
    ) -> impl Future<Output = Result<Vec<Podcast>, podcast_api::Error>> + Send {
        self.get_my_podcasts()
    }
}

// ── Episodes ─────────────────────────────────────────────────────────

/// Episode resource: `GET /episodes`.
#[derive(Debug, Clone)]
pub struct EpisodesService<F> {
    api: F,
}

impl<F: Fetch> EpisodesService<F> {
    pub const PATH: &'static str = "/episodes";

    pub fn new(api: F) -> Self {
        Self { api }
    }

    /// Every episode.
    pub async fn get_all_episodes(&self) -> Result<Vec<Episode>, podcast_api::Error> {
        let raw: Vec<RawEpisode> = self.api.get(Self::PATH, &[]).await?;
        debug!(count = raw.len(), "fetched episodes");
        Ok(adapt_episodes(raw))
    }
}
