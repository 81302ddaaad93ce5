//! Catalogue server client.

use crate::error::{CatalogueError, Result};
use crate::playlists::PlaylistClient;
use async_trait::async_trait;
use cue_playback::{CatalogueGateway, CatalogueQuery, GatewayError, MasterList, PageData};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Connection settings for the catalogue server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogueConfig {
    /// Base URL of the server (e.g. "https://tracks.example.com")
    pub base_url: String,

    /// Path of the paginated rows endpoint
    pub page_path: String,

    /// Path of the master list endpoint
    pub master_path: String,

    /// Whole-request timeout in seconds (default: 30)
    pub timeout_secs: u64,

    /// Connect timeout in seconds (default: 10)
    pub connect_timeout_secs: u64,

    /// User agent override
    pub user_agent: Option<String>,
}

impl CatalogueConfig {
    /// Config with default endpoints for `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            page_path: "/api/tracks/page".to_string(),
            master_path: "/api/tracks/snapshot".to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: None,
        }
    }
}

/// Client for the catalogue server
///
/// Answers the synchronizer's page requests through [`CatalogueGateway`]
/// and gives access to playlist membership.
///
/// # Example
///
/// ```ignore
/// use cue_catalogue::{CatalogueClient, CatalogueConfig};
/// use cue_playback::CatalogueQuery;
///
/// let client = CatalogueClient::new(CatalogueConfig::new("https://tracks.example.com"))?;
/// let page = client.page(&CatalogueQuery::default(), 1).await?;
/// println!("{} rows of {} pages", page.tracks.len(), page.pagination.total_pages);
/// ```
#[derive(Debug, Clone)]
pub struct CatalogueClient {
    http: Client,
    base_url: String,
    config: CatalogueConfig,
}

impl CatalogueClient {
    /// Create a client, validating the base URL
    pub fn new(config: CatalogueConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(CatalogueError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(CatalogueError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        Url::parse(&base_url).map_err(|e| CatalogueError::InvalidUrl(e.to_string()))?;

        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("Cue/{}", env!("CARGO_PKG_VERSION")));
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            http,
            base_url,
            config,
        })
    }

    /// Server base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one page of rows under `query`
    pub async fn page(&self, query: &CatalogueQuery, page: u32) -> Result<PageData> {
        let url = self.endpoint(&self.config.page_path, query.to_page_query_pairs(page))?;
        debug!(url = %url, "Fetching catalogue page");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(CatalogueError::from_transport)?;
        let data: PageData = decode(response, "page").await?;

        debug!(
            page = data.pagination.page,
            total_pages = data.pagination.total_pages,
            rows = data.tracks.len(),
            "Fetched catalogue page"
        );
        Ok(data)
    }

    /// Fetch the full ordered id sequence under `query`
    pub async fn master(&self, query: &CatalogueQuery) -> Result<MasterList> {
        let mut pairs = query.to_query_pairs();
        pairs.push(("limit".to_string(), query.limit.to_string()));
        let url = self.endpoint(&self.config.master_path, pairs)?;
        debug!(url = %url, "Fetching master list");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(CatalogueError::from_transport)?;
        let master: MasterList = decode(response, "master list").await?;

        info!(tracks = master.len(), "Fetched master list");
        Ok(master)
    }

    /// Playlist operations
    pub fn playlists(&self) -> PlaylistClient<'_> {
        PlaylistClient::new(&self.http, &self.base_url)
    }

    fn endpoint(&self, path: &str, pairs: Vec<(String, String)>) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| CatalogueError::InvalidUrl(e.to_string()))?;
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }
}

#[async_trait]
impl CatalogueGateway for CatalogueClient {
    async fn fetch_page(&self, query: &CatalogueQuery, page: u32) -> std::result::Result<PageData, GatewayError> {
        self.page(query, page).await.map_err(GatewayError::from)
    }

    async fn fetch_master(&self, query: &CatalogueQuery) -> std::result::Result<MasterList, GatewayError> {
        self.master(query).await.map_err(GatewayError::from)
    }
}

/// Fail on non-success statuses
pub(crate) async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    if status.as_u16() == 404 {
        Err(CatalogueError::NotFound(message))
    } else {
        Err(CatalogueError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

/// Check the status and decode a JSON body
pub(crate) async fn decode<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    let response = check(response).await?;
    response
        .json()
        .await
        .map_err(|e| CatalogueError::Parse(format!("Failed to parse {what} response: {e}")))
}
