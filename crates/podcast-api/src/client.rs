// Backend HTTP client
//
// Wraps `reqwest::Client` with base-path URL construction and JSON decoding.
// No retries, no caching: those belong to wrapping layers such as
// `activity::Tracked`.

use std::future::Future;

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Anything that can issue a typed GET against the backend.
///
/// Implemented by [`ApiClient`] and by wrapping layers, so services can be
/// handed either the raw client or a decorated one.
pub trait Fetch: Send + Sync {
    /// GET `{base}{path}` with the given query parameters and decode the
    /// JSON body as `T`.
    fn get<T>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> impl Future<Output = Result<T, Error>> + Send
    where
        T: DeserializeOwned + Send;
}

/// Raw HTTP client for the podcast backend.
///
/// All paths are appended verbatim to the configured base path, so a base of
/// `https://host/api` and a path of `/podcasts` yields
/// `https://host/api/podcasts`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client from a `TransportConfig`.
    pub fn new(base_url: &Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let url = Url::parse(base_url)?;
        Ok(Self::with_client(http, &url))
    }

    fn with_client(http: reqwest::Client, base_url: &Url) -> Self {
        Self {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_owned(),
        }
    }

    /// The base path every request is resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build the full URL for `path`: `{base}{path}`.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        let full = if path.starts_with('/') || path.is_empty() {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        };
        Ok(Url::parse(&full)?)
    }

    // ── Response handling ────────────────────────────────────────────

    async fn parse_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url: resp.url().to_string(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}

impl Fetch for ApiClient {
    async fn get<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, Error>
    where
        T: DeserializeOwned + Send,
    {
        let url = self.url(path)?;
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_json(resp).await
    }
}
