// ── Client facade ──
//
// Wires the HTTP client, the activity tracker, the domain services and the
// store together from a `ClientConfig`. This is the composing root consumers
// (the CLI) hold on to.

use std::sync::Arc;

use podcast_api::{ActivityTracker, ApiClient, TransportConfig, Tracked};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::model::{Episode, Filter};
use crate::service::{EpisodesService, PodcastService};
use crate::store::PodcastStore;

/// The `Fetch` stack used in production: HTTP with activity tracking and
/// retries.
pub type HttpFetch = Tracked<ApiClient>;

/// Store type backed by the production HTTP stack.
pub type HttpStore = PodcastStore<PodcastService<HttpFetch>>;

/// Main entry point for consumers.
///
/// Cheaply cloneable via `Arc`. Construction does not contact the backend;
/// call [`store()`](Self::store) and then `initialize()` or a refresh.
#[derive(Clone)]
pub struct PodcastClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: ClientConfig,
    activity: ActivityTracker,
    store: HttpStore,
    episodes: EpisodesService<HttpFetch>,
}

impl PodcastClient {
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig::default().with_timeout(config.timeout);
        let api = ApiClient::new(&config.base_url, &transport)?;
        let activity = ActivityTracker::new();
        debug!(base_url = api.base_url(), retries = config.retries, "client configured");

        let tracked = Tracked::new(api, activity.clone()).with_retries(config.retries);
        let filter = Filter {
            order: config.default_order,
            ..Filter::default()
        };
        let store = PodcastStore::with_filter(PodcastService::new(tracked.clone()), filter);
        let episodes = EpisodesService::new(tracked);

        Ok(Self {
            inner: Arc::new(ClientInner {
                config,
                activity,
                store,
                episodes,
            }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// The reactive podcast store.
    pub fn store(&self) -> &HttpStore {
        &self.inner.store
    }

    /// Process-wide request activity, independent of the store's `loading`.
    pub fn activity(&self) -> &ActivityTracker {
        &self.inner.activity
    }

    /// Fetch every episode. Episodes are not cached in the store.
    pub async fn list_episodes(&self) -> Result<Vec<Episode>, CoreError> {
        Ok(self.inner.episodes.get_all_episodes().await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::model::SortOrder;

    fn config_for(server: &MockServer) -> ClientConfig {
        let mut config = ClientConfig::new(Url::parse(&server.uri()).unwrap());
        config.retries = 0;
        config
    }

    #[tokio::test]
    async fn subscribed_view_joins_both_endpoints() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/podcasts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 1, "title": "A", "average_rating": 4.5 },
                { "id": 2, "title": "B", "average_rating": 3.0 },
                { "id": 3, "title": "C", "average_rating": 4.0 }
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/myPodcasts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 2, "title": "B", "average_rating": 3.0 }
            ])))
            .mount(&server)
            .await;

        let client = PodcastClient::new(config_for(&server)).unwrap();
        let store = client.store();
        store.initialize().await.unwrap();
        store.refresh_my_podcasts().await.unwrap();

        let subscribed: Vec<u64> = store.subscribed_podcasts().iter().map(|p| p.id).collect();
        let sorted: Vec<u64> = store.sort_by_rating().iter().map(|p| p.id).collect();
        assert_eq!(subscribed, vec![2]);
        assert_eq!(sorted, vec![2, 3, 1]);
        assert!(!client.activity().is_active());
    }

    #[tokio::test]
    async fn default_order_seeds_the_store_filter() {
        let server = MockServer::start().await;
        let mut config = config_for(&server);
        config.default_order = SortOrder::Desc;

        let client = PodcastClient::new(config).unwrap();

        assert_eq!(client.store().filter().order, SortOrder::Desc);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn episode_failures_translate_to_core_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/episodes"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = PodcastClient::new(config_for(&server)).unwrap();
        let err = client.list_episodes().await.unwrap_err();

        assert!(matches!(err, CoreError::NotFound { .. }));
    }
}
