// ── Runtime connection configuration ──
//
// Describes how to reach the podcast backend. Never touches disk: the CLI
// builds a `ClientConfig` (usually from `podcast-config`) and hands it in.

use std::time::Duration;

use url::Url;

use crate::model::SortOrder;

/// Backend address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Configuration for one backend connection.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend root, e.g. `http://localhost:3000`. Resource paths are
    /// appended to it.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Extra attempts for transient request failures. 0 disables retries.
    pub retries: u32,
    /// Initial sort order for the store's filter.
    pub default_order: SortOrder,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(30),
            retries: podcast_api::activity::DEFAULT_RETRIES,
            default_order: SortOrder::default(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        let base_url = Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid");
        Self::new(base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url.as_str(), "http://localhost:3000/");
        assert_eq!(config.retries, 3);
        assert_eq!(config.default_order, SortOrder::Asc);
    }
}
