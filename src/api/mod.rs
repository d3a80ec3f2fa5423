//! Remote league data: franchise rosters and bans from core, match and player numbers from stats.

pub mod client;
pub mod models;
pub mod queries;

use crate::error::ScoutError;
use crate::model::{BanRecord, MatchResult, PlayerMapRating, ResolvedTeam, RosterEntry};

/// League data needed for a team summary. Every call is scoped to one season.
pub trait LeagueSource {
    /// `InvalidTeam` when no active franchise team matches.
    fn resolve_team(&self, franchise: &str, tier: &str) -> Result<ResolvedTeam, ScoutError>;

    fn roster(&self, team: &str) -> Result<Vec<RosterEntry>, ScoutError>;

    /// Every regulation map played in `tier`.
    fn tier_results(&self, tier: &str) -> Result<Vec<MatchResult>, ScoutError>;

    fn team_bans(&self, team: &str) -> Result<Vec<BanRecord>, ScoutError>;

    fn player_map_ratings(&self, player: &str) -> Result<Vec<PlayerMapRating>, ScoutError>;

    /// Values in the order of `keys`.
    fn player_season_stats(&self, player: &str, keys: &[&str]) -> Result<Vec<f64>, ScoutError>;
}
