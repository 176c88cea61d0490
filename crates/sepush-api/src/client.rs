//! `EskomSePushClient` - EskomSePush API client implementation.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result as AnyResult};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use crate::api::LocalEskomSePushApi;
use crate::endpoint::{Endpoint, TOKEN_HEADER, TestMode};
use crate::error::{RequestError, Result, decode};
use crate::fixtures::{FixtureLoader, FixtureSource};
use crate::types::{
    AreaInformation, AreasNearby, AreasSearch, CheckAllowance, Status, TopicsNearby,
};

/// Default base URL for the Business API 2.0.
const DEFAULT_BASE_URL: &str = "https://developer.sepush.co.za/business/2.0/";

/// Default User-Agent.
const DEFAULT_USER_AGENT: &str = concat!("sepush-api/", env!("CARGO_PKG_VERSION"));

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// API token. Never printed.
#[derive(Clone)]
struct Token(String);

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(<redacted>)")
    }
}

/// EskomSePush API client.
///
/// Every call is a single attempt: no retries, caching or rate limiting.
/// When built in offline mode, calls decode bundled documents instead of
/// touching the network.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct EskomSePushClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// API token sent in the `token` header.
    token: Token,
    /// Offline document loader (`None` = live calls).
    offline: Option<FixtureLoader>,
}

/// Builder for `EskomSePushClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct EskomSePushClientBuilder {
    base_url: Option<Url>,
    token: Option<Token>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    offline: bool,
    fixture_dir: Option<PathBuf>,
}

impl EskomSePushClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            token: None,
            user_agent: None,
            timeout: None,
            offline: false,
            fixture_dir: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API token (required).
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(Token(token.into()));
        self
    }

    /// Sets the User-Agent (default: `sepush-api/<version>`).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the request timeout (default: 30s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Serves bundled documents instead of calling the API (default: `false`).
    #[must_use]
    pub const fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Reads offline documents from `dir` instead of the bundled ones.
    #[must_use]
    pub fn fixture_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fixture_dir = Some(dir.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `token` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> AnyResult<EskomSePushClient> {
        let token = self.token.context("token is required")?;

        let mut base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL).context("invalid default base URL")?,
        };
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| String::from(DEFAULT_USER_AGENT));

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .context("failed to build HTTP client")?;

        let offline = self.offline.then(|| {
            FixtureLoader::new(
                self.fixture_dir
                    .map_or(FixtureSource::Embedded, FixtureSource::Directory),
            )
        });

        Ok(EskomSePushClient {
            http_client,
            base_url,
            token,
            offline,
        })
    }
}

impl EskomSePushClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> EskomSePushClientBuilder {
        EskomSePushClientBuilder::new()
    }

    /// Creates an online client with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(token: impl Into<String>) -> AnyResult<Self> {
        Self::builder().token(token).build()
    }

    /// Returns `true` if calls are served from offline documents.
    #[must_use]
    pub const fn is_offline(&self) -> bool {
        self.offline.is_some()
    }

    /// Dispatches to the offline loader or the live API.
    async fn fetch<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T> {
        match &self.offline {
            Some(loader) => loader.load(&endpoint).await,
            None => self.execute(&endpoint).await,
        }
    }

    /// Sends a single GET request for `endpoint` and decodes the body.
    #[instrument(skip_all, fields(endpoint = endpoint.name()))]
    async fn execute<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T> {
        let descriptor = endpoint.descriptor();

        let url = self.base_url.join(descriptor.path).map_err(|_| {
            RequestError::InvalidUrl(format!("{}{}", self.base_url, descriptor.path))
        })?;

        let mut request = self
            .http_client
            .request(descriptor.method, url.clone())
            .header(TOKEN_HEADER, &self.token.0)
            .query(&descriptor.query);
        for (name, value) in descriptor.headers {
            request = request.header(name, value);
        }

        tracing::debug!(%url, "EskomSePush API request");

        let response = request
            .send()
            .await
            .map_err(|source| RequestError::NoResponse {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        tracing::debug!(%status, "EskomSePush API response");

        if let Some(err) = RequestError::from_status(status.as_u16(), response.url().as_str()) {
            return Err(err);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| RequestError::Decode {
                source_name: String::from(descriptor.path),
                reason: e.to_string(),
            })?;
        decode(descriptor.path, &body)
    }
}

impl LocalEskomSePushApi for EskomSePushClient {
    #[instrument(skip_all)]
    async fn status(&self) -> Result<Status> {
        self.fetch(Endpoint::Status).await
    }

    #[instrument(skip_all)]
    async fn area_information(&self, id: &str, test: Option<TestMode>) -> Result<AreaInformation> {
        self.fetch(Endpoint::AreaInformation {
            id: String::from(id),
            test,
        })
        .await
    }

    #[instrument(skip_all)]
    async fn areas_nearby(&self, lat: f64, lon: f64) -> Result<AreasNearby> {
        self.fetch(Endpoint::AreasNearby { lat, lon }).await
    }

    #[instrument(skip_all)]
    async fn areas_search(&self, text: &str) -> Result<AreasSearch> {
        self.fetch(Endpoint::AreasSearch {
            text: String::from(text),
        })
        .await
    }

    #[instrument(skip_all)]
    async fn topics_nearby(&self, lat: f64, lon: f64) -> Result<TopicsNearby> {
        self.fetch(Endpoint::TopicsNearby { lat, lon }).await
    }

    #[instrument(skip_all)]
    async fn check_allowance(&self) -> Result<CheckAllowance> {
        self.fetch(Endpoint::CheckAllowance).await
    }
}
