use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// The upstream response envelope.
///
/// Only `response` is interpreted. Every other top-level field (`get`,
/// `parameters`, `errors`, `results`, `paging`) is kept as-is so a fresh
/// listing can be handed back to clients in the upstream's own shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub response: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiResponse {
    /// The `response` array, or `None` when the field is missing or not an array.
    pub fn records(&self) -> Option<&[Value]> {
        self.response.as_array().map(Vec::as_slice)
    }

    pub fn into_records(self) -> Vec<Value> {
        match self.response {
            Value::Array(records) => records,
            _ => Vec::new(),
        }
    }

    /// Errors reported inside a 200 response (bad key, quota, bad params).
    /// The upstream sends `[]` when there are none and an object otherwise.
    pub fn upstream_errors(&self) -> Option<&Value> {
        match self.extra.get("errors") {
            Some(Value::Array(a)) if a.is_empty() => None,
            Some(Value::Object(o)) if o.is_empty() => None,
            Some(Value::Null) | None => None,
            Some(other) => Some(other),
        }
    }
}

/// Opaque fixture identifier supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixtureId(String);

impl FixtureId {
    /// Trim the raw path segment; blank ids are rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(FixtureId(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FixtureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamSide {
    Home,
    Away,
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamSide::Home => f.write_str("home"),
            TeamSide::Away => f.write_str("away"),
        }
    }
}

/// One side of a fixture as found under `teams.home` / `teams.away`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRef {
    pub id: String,
    pub name: Option<String>,
}

impl TeamRef {
    fn from_value(team: &Value) -> Option<Self> {
        let id = match &team["id"] {
            Value::Number(n) => n.to_string(),
            Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => return None,
        };
        let name = team["name"].as_str().map(str::to_string);
        Some(TeamRef { id, name })
    }
}

/// Both teams of a fixture. Only constructed when both ids are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTeams {
    pub home: TeamRef,
    pub away: TeamRef,
}

impl MatchTeams {
    /// Extract both teams from a fixture details record, reporting the first
    /// side whose id is missing or empty.
    pub fn from_details(details: &Value) -> Result<Self, TeamSide> {
        let teams = &details["teams"];
        let home = TeamRef::from_value(&teams["home"]).ok_or(TeamSide::Home)?;
        let away = TeamRef::from_value(&teams["away"]).ok_or(TeamSide::Away)?;
        Ok(MatchTeams { home, away })
    }

    /// Key for the head-to-head lookup.
    pub fn h2h_key(&self) -> String {
        format!("{}-{}", self.home.id, self.away.id)
    }
}
