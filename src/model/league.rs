use serde::{Deserialize, Serialize};

/// One map elimination during a match's veto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanRecord {
    pub team: String,
    pub map: String,
    /// 1-based position in the veto order.
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamScore {
    pub name: String,
    pub score: u32,
}

/// Final scoreline of a single map, as reported by the stats service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub map_name: String,
    pub teams: [TeamScore; 2],
}

impl MatchResult {
    pub fn new(map_name: &str, first: (&str, u32), second: (&str, u32)) -> Self {
        MatchResult {
            map_name: map_name.to_string(),
            teams: [
                TeamScore {
                    name: first.0.to_string(),
                    score: first.1,
                },
                TeamScore {
                    name: second.0.to_string(),
                    score: second.1,
                },
            ],
        }
    }

    pub fn involves(&self, team: &str) -> bool {
        self.teams.iter().any(|t| t.name == team)
    }
}

/// A franchise team resolved from a prefix and tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTeam {
    pub name: String,
    pub tier: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RosterStatus {
    Signed,
    /// Temporary substitute; shown with a ` (S)` marker.
    Temp,
    Inactive,
}

impl RosterStatus {
    /// Core reports contract types like `SIGNED`, `SIGNED_PROMOTED` or `TEMP_SIGNED`.
    pub fn from_contract_type(raw: &str) -> Self {
        if raw.contains("TEMP") {
            RosterStatus::Temp
        } else if raw.contains("SIGNED") {
            RosterStatus::Signed
        } else {
            RosterStatus::Inactive
        }
    }

    pub fn is_active(self) -> bool {
        !matches!(self, RosterStatus::Inactive)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub status: RosterStatus,
}

impl RosterEntry {
    pub fn is_substitute(&self) -> bool {
        self.status == RosterStatus::Temp
    }
}

/// A player's rating for one played map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerMapRating {
    pub player: String,
    pub map_name: String,
    pub rating: f64,
}

/// Cumulative rounds won and played by a team over a season.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTotals {
    pub wins: u32,
    pub rounds: u32,
}
