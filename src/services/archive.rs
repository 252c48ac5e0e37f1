// src/services/archive.rs

//! Concert archive client.
//!
//! Reads the per-year show counts and the most recent shows from the
//! archive's JSON API.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{
    ApiKey, ArchiveConfig, ArchiveResponse, ShowRecord, Snapshot, YearSummary, http_url,
};
use crate::utils::endpoint_url;
use crate::utils::http::read_success_body;

const YEARS_ENDPOINT: &str = "years";
const SHOWS_ENDPOINT: &str = "shows";

/// Read access to the concert archive.
#[async_trait]
pub trait ShowArchive: Send + Sync {
    /// Fetch the current per-year show count table.
    async fn fetch_snapshot(&self) -> Result<Snapshot>;

    /// Fetch the `count` most recent shows, newest first.
    async fn fetch_latest_shows(&self, count: usize) -> Result<Vec<ShowRecord>>;
}

/// HTTP client for the archive API.
pub struct ArchiveClient {
    client: Client,
    base_url: Url,
    years_path: String,
    shows_path: String,
    api_key: Option<ApiKey>,
}

impl ArchiveClient {
    /// Create a client for the configured archive.
    pub fn new(config: &ArchiveConfig, client: Client) -> Result<Self> {
        Ok(Self {
            client,
            base_url: http_url("archive.base_url", &config.base_url)?,
            years_path: config.years_path.clone(),
            shows_path: config.shows_path.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn years_url(&self) -> Result<Url> {
        Ok(endpoint_url(
            &self.base_url,
            &self.years_path,
            &[
                ("include_show_counts", "true".to_string()),
                ("sort_dir", "desc".to_string()),
            ],
        )?)
    }

    fn shows_url(&self, count: usize) -> Result<Url> {
        Ok(endpoint_url(
            &self.base_url,
            &self.shows_path,
            &[
                ("sort_dir", "desc".to_string()),
                ("sort_attr", "date".to_string()),
                ("per_page", count.to_string()),
            ],
        )?)
    }

    async fn get(&self, endpoint: &str, url: Url) -> Result<String> {
        log::debug!("GET {}", url);
        let mut request = self.client.get(url);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key.expose());
        }
        let response = request
            .send()
            .await
            .map_err(|e| AppError::fetch(endpoint, e))?;
        read_success_body(endpoint, response).await
    }
}

#[async_trait]
impl ShowArchive for ArchiveClient {
    async fn fetch_snapshot(&self) -> Result<Snapshot> {
        let body = self.get(YEARS_ENDPOINT, self.years_url()?).await?;
        parse_snapshot(&body)
    }

    async fn fetch_latest_shows(&self, count: usize) -> Result<Vec<ShowRecord>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let body = self.get(SHOWS_ENDPOINT, self.shows_url(count)?).await?;
        parse_shows(&body, count)
    }
}

/// Parse a years listing into a snapshot.
///
/// An empty listing is rejected so it can never replace a real snapshot.
pub fn parse_snapshot(body: &str) -> Result<Snapshot> {
    let response: ArchiveResponse<YearSummary> =
        serde_json::from_str(body).map_err(|e| AppError::fetch(YEARS_ENDPOINT, e))?;
    if response.data.is_empty() {
        return Err(AppError::fetch(YEARS_ENDPOINT, "response contained no years"));
    }
    Ok(Snapshot::new(response.data))
}

/// Parse a show listing, keeping at most `count` shows.
pub fn parse_shows(body: &str, count: usize) -> Result<Vec<ShowRecord>> {
    let response: ArchiveResponse<ShowRecord> =
        serde_json::from_str(body).map_err(|e| AppError::fetch(SHOWS_ENDPOINT, e))?;
    let mut shows = response.data;
    shows.truncate(count);
    Ok(shows)
}
