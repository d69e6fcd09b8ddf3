use async_trait::async_trait;
use std::sync::Arc;

use super::models::{ApiResponse, FixtureId};
use crate::error::UpstreamError;

/// The upstream football-data API, one method per endpoint this service uses.
#[async_trait]
pub trait FootballApi: Send + Sync {
    /// All fixtures the upstream currently classifies as live.
    async fn live_fixtures(&self) -> Result<ApiResponse, UpstreamError>;

    /// A single fixture by id.
    async fn fixture(&self, id: &FixtureId) -> Result<ApiResponse, UpstreamError>;

    async fn lineups(&self, id: &FixtureId) -> Result<ApiResponse, UpstreamError>;

    async fn statistics(&self, id: &FixtureId) -> Result<ApiResponse, UpstreamError>;

    /// Past meetings between two teams, keyed `home-away`.
    async fn head_to_head(
        &self,
        home_team_id: &str,
        away_team_id: &str,
    ) -> Result<ApiResponse, UpstreamError>;
}

pub type FootballApiHandle = Arc<dyn FootballApi>;
