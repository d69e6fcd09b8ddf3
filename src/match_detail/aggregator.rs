use futures_util::future::join3;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ProxyError, UpstreamError};
use crate::football::{ApiResponse, FixtureId, FootballApiHandle, MatchTeams};

/// Everything the detail endpoint returns for one fixture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchDetailBundle {
    pub details: Value,
    pub lineups: Vec<Value>,
    pub statistics: Vec<Value>,
    pub h2h: Vec<Value>,
}

/// Builds a `MatchDetailBundle` from four upstream calls.
///
/// The details lookup and team extraction are fatal and short-circuit before
/// any other call is made. Lineups, statistics and head-to-head run
/// concurrently afterwards and each degrades to an empty list on failure.
#[derive(Clone)]
pub struct MatchDetailAggregator {
    api: FootballApiHandle,
}

impl MatchDetailAggregator {
    pub fn new(api: FootballApiHandle) -> Self {
        MatchDetailAggregator { api }
    }

    pub async fn get_match_detail(&self, id: &FixtureId) -> Result<MatchDetailBundle, ProxyError> {
        let details = self.fetch_details(id).await?;

        let teams = MatchTeams::from_details(&details).map_err(|missing| {
            warn!("Match {} is missing the {} team id", id, missing);
            ProxyError::IncompleteTeamData {
                fixture_id: id.to_string(),
                missing,
            }
        })?;
        debug!(
            "Match {}: {} vs {} (h2h {})",
            id,
            teams.home.name.as_deref().unwrap_or("?"),
            teams.away.name.as_deref().unwrap_or("?"),
            teams.h2h_key()
        );

        let (lineups, statistics, h2h) = join3(
            self.api.lineups(id),
            self.api.statistics(id),
            self.api.head_to_head(&teams.home.id, &teams.away.id),
        )
        .await;

        Ok(MatchDetailBundle {
            details,
            lineups: or_empty(id, "lineups", lineups),
            statistics: or_empty(id, "statistics", statistics),
            h2h: or_empty(id, "head-to-head", h2h),
        })
    }

    /// First record of the fixture lookup; failure or no records is a miss.
    async fn fetch_details(&self, id: &FixtureId) -> Result<Value, ProxyError> {
        let not_found = || ProxyError::MatchNotFound {
            fixture_id: id.to_string(),
        };

        let payload = self.api.fixture(id).await.map_err(|e| {
            warn!("Fixture lookup for {} failed: {}", id, e);
            not_found()
        })?;

        payload.into_records().into_iter().next().ok_or_else(|| {
            warn!("Fixture lookup for {} returned no records", id);
            not_found()
        })
    }
}

fn or_empty(
    id: &FixtureId,
    section: &str,
    result: Result<ApiResponse, UpstreamError>,
) -> Vec<Value> {
    match result {
        Ok(payload) => payload.into_records(),
        Err(e) => {
            warn!("Match {}: {} unavailable, returning empty: {}", id, section, e);
            Vec::new()
        }
    }
}
