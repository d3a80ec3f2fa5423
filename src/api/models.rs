use crate::error::ScoutError;
use crate::model::{BanRecord, MatchResult, PlayerMapRating, RosterEntry, RosterStatus};
use serde::Deserialize;
use std::collections::HashMap;

// GraphQL envelope
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

// core: franchises(active: true)
#[derive(Debug, Deserialize)]
pub struct FranchisesData {
    pub franchises: Vec<FranchiseDto>,
}

#[derive(Debug, Deserialize)]
pub struct FranchiseDto {
    pub prefix: String,
    #[serde(default)]
    pub teams: Vec<FranchiseTeamDto>,
}

#[derive(Debug, Deserialize)]
pub struct FranchiseTeamDto {
    pub name: String,
    pub tier: TierDto,
}

#[derive(Debug, Deserialize)]
pub struct TierDto {
    pub name: String,
}

// core: team(teamName) { players { name type } }
#[derive(Debug, Deserialize)]
pub struct TeamPlayersData {
    pub team: Option<TeamPlayersDto>,
}

#[derive(Debug, Deserialize)]
pub struct TeamPlayersDto {
    #[serde(default)]
    pub players: Vec<PlayerDto>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerDto {
    pub name: String,
    #[serde(rename = "type", default)]
    pub contract_type: String,
}

impl From<PlayerDto> for RosterEntry {
    fn from(dto: PlayerDto) -> Self {
        RosterEntry {
            status: RosterStatus::from_contract_type(&dto.contract_type),
            name: dto.name,
        }
    }
}

// core: team(teamName) { id }
#[derive(Debug, Deserialize)]
pub struct TeamIdData {
    pub team: Option<TeamIdDto>,
}

#[derive(Debug, Deserialize)]
pub struct TeamIdDto {
    pub id: String,
}

// core: matches(season, teamId) { lobby { mapBans } }
#[derive(Debug, Deserialize)]
pub struct TeamMatchesData {
    #[serde(default)]
    pub matches: Vec<TeamMatchDto>,
}

#[derive(Debug, Deserialize)]
pub struct TeamMatchDto {
    pub lobby: Option<LobbyDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbyDto {
    #[serde(default)]
    pub map_bans: Vec<MapBanDto>,
}

#[derive(Debug, Deserialize)]
pub struct MapBanDto {
    pub team: BanTeamDto,
    pub map: String,
    pub number: u32,
}

#[derive(Debug, Deserialize)]
pub struct BanTeamDto {
    pub name: String,
}

impl From<MapBanDto> for BanRecord {
    fn from(dto: MapBanDto) -> Self {
        BanRecord {
            team: dto.team.name,
            map: dto.map,
            order: dto.number,
        }
    }
}

// stats: findManyMatch { mapName teamStats { name score } }
#[derive(Debug, Deserialize)]
pub struct MatchScoresData {
    #[serde(rename = "findManyMatch", default)]
    pub matches: Vec<MatchScoreDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScoreDto {
    pub map_name: String,
    #[serde(default)]
    pub team_stats: Vec<TeamStatDto>,
}

#[derive(Debug, Deserialize)]
pub struct TeamStatDto {
    pub name: String,
    pub score: u32,
}

impl TryFrom<MatchScoreDto> for MatchResult {
    type Error = ScoutError;

    fn try_from(dto: MatchScoreDto) -> Result<Self, Self::Error> {
        match dto.team_stats.as_slice() {
            [first, second] => Ok(MatchResult::new(
                &dto.map_name,
                (first.name.as_str(), first.score),
                (second.name.as_str(), second.score),
            )),
            other => Err(ScoutError::Decode(format!(
                "{} match has {} team lines, expected 2",
                dto.map_name,
                other.len()
            ))),
        }
    }
}

// stats: findManyMatch { mapName matchStats { rating } }
#[derive(Debug, Deserialize)]
pub struct PlayerMatchesData {
    #[serde(rename = "findManyMatch", default)]
    pub matches: Vec<PlayerMatchDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMatchDto {
    pub map_name: String,
    #[serde(default)]
    pub match_stats: Vec<RatingDto>,
}

#[derive(Debug, Deserialize)]
pub struct RatingDto {
    pub rating: f64,
}

impl PlayerMatchDto {
    pub fn into_rating(self, player: &str) -> Option<PlayerMapRating> {
        let rating = self.match_stats.first()?.rating;
        Some(PlayerMapRating {
            player: player.to_string(),
            map_name: self.map_name,
            rating,
        })
    }
}

// stats: playerSeasonStats(name, season) { ... }
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSeasonStatsData {
    pub player_season_stats: Option<HashMap<String, Option<f64>>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_roster() {
        let raw = r#"{"data": {"team": {"players": [
            {"name": "Alex", "type": "TEMP_SIGNED"},
            {"name": "Blake", "type": "SIGNED"},
            {"name": "Casey", "type": "INACTIVE_RESERVE"}
        ]}}}"#;

        let response: GraphQlResponse<TeamPlayersData> = serde_json::from_str(raw).unwrap();
        let roster: Vec<RosterEntry> = response
            .data
            .unwrap()
            .team
            .unwrap()
            .players
            .into_iter()
            .map(RosterEntry::from)
            .collect();

        let statuses: Vec<_> = roster.iter().map(|e| (e.name.as_str(), e.status)).collect();
        assert_eq!(
            statuses,
            vec![
                ("Alex", RosterStatus::Temp),
                ("Blake", RosterStatus::Signed),
                ("Casey", RosterStatus::Inactive),
            ]
        );
    }

    #[test]
    fn scoreline_needs_two_teams() {
        let raw = r#"{"findManyMatch": [
            {"mapName": "de_nuke", "teamStats": [{"name": "Alpha", "score": 13}, {"name": "Bravo", "score": 9}]},
            {"mapName": "de_mirage", "teamStats": [{"name": "Alpha", "score": 13}]}
        ]}"#;

        let data: MatchScoresData = serde_json::from_str(raw).unwrap();
        let mut results = data.matches.into_iter().map(MatchResult::try_from);

        assert_eq!(
            results.next().unwrap().unwrap(),
            MatchResult::new("de_nuke", ("Alpha", 13), ("Bravo", 9))
        );
        assert!(matches!(results.next().unwrap(), Err(ScoutError::Decode(_))));
    }

    #[test]
    fn errors_envelope() {
        let raw = r#"{"data": null, "errors": [{"message": "player not found"}]}"#;
        let response: GraphQlResponse<PlayerSeasonStatsData> = serde_json::from_str(raw).unwrap();
        assert!(response.data.is_none());
        assert_eq!(response.errors[0].message, "player not found");
    }
}
