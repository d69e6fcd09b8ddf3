pub mod client;
pub mod models;
pub mod provider;

pub use client::ApiFootballClient;
pub use models::{ApiResponse, FixtureId, MatchTeams, TeamSide};
pub use provider::FootballApiHandle;
