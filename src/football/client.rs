use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use super::models::{ApiResponse, FixtureId};
use super::provider::FootballApi;
use crate::error::UpstreamError;

/// Client for the API-Football v3 REST API.
/// Docs: <https://www.api-football.com/documentation-v3>
#[derive(Clone)]
pub struct ApiFootballClient {
    http: Client,
    /// Base URL for overriding in tests
    base_url: String,
    api_host: String,
    api_key: String,
}

impl ApiFootballClient {
    pub fn new(base_url: &str, api_host: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiFootballClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_host: api_host.to_string(),
            api_key: api_key.to_string(),
        })
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<ApiResponse, UpstreamError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let resp = self
            .http
            .get(&url)
            .query(query)
            .header("x-rapidapi-host", &self.api_host)
            .header("x-rapidapi-key", &self.api_key)
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(path, e))?;

        if !resp.status().is_success() {
            return Err(UpstreamError::Status {
                status: resp.status().as_u16(),
                path: path.to_string(),
            });
        }

        let payload: ApiResponse = resp
            .json()
            .await
            .map_err(|e| UpstreamError::from_reqwest(path, e))?;

        if let Some(errors) = payload.upstream_errors() {
            warn!("Upstream reported errors for {}: {}", path, errors);
        }
        Ok(payload)
    }
}

#[async_trait]
impl FootballApi for ApiFootballClient {
    async fn live_fixtures(&self) -> Result<ApiResponse, UpstreamError> {
        self.get("fixtures", &[("live", "all")]).await
    }

    async fn fixture(&self, id: &FixtureId) -> Result<ApiResponse, UpstreamError> {
        self.get("fixtures", &[("id", id.as_str())]).await
    }

    async fn lineups(&self, id: &FixtureId) -> Result<ApiResponse, UpstreamError> {
        self.get("fixtures/lineups", &[("fixture", id.as_str())])
            .await
    }

    async fn statistics(&self, id: &FixtureId) -> Result<ApiResponse, UpstreamError> {
        self.get("fixtures/statistics", &[("fixture", id.as_str())])
            .await
    }

    async fn head_to_head(
        &self,
        home_team_id: &str,
        away_team_id: &str,
    ) -> Result<ApiResponse, UpstreamError> {
        let key = format!("{}-{}", home_team_id, away_team_id);
        self.get("fixtures/headtohead", &[("h2h", key.as_str())])
            .await
    }
}
