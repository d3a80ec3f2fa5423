use crate::analysis::team_stats::RoundTotalsSource;
use crate::config::Config;
use crate::error::ScoutError;
use crate::model::{BanRecord, MatchResult, PlayerMapRating, ResolvedTeam, RosterEntry, RoundTotals};
use governor::{clock::DefaultClock, state::{InMemoryState, NotKeyed}, Quota, RateLimiter};
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

use super::models::*;
use super::queries;
use super::LeagueSource;

const USER_AGENT: &str = "csc_scout/0.1.0";
const REQUESTS_PER_SECOND: u32 = 5;
const MAX_RETRIES: u32 = 3;

pub struct StatsApiClient {
    stats_endpoint: String,
    core_endpoint: String,
    season: u32,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl StatsApiClient {
    pub fn new(config: &Config) -> Self {
        let per_second = NonZeroU32::new(REQUESTS_PER_SECOND).unwrap_or(NonZeroU32::MIN);
        StatsApiClient {
            stats_endpoint: config.stats_endpoint.clone(),
            core_endpoint: config.core_endpoint.clone(),
            season: config.season,
            rate_limiter: RateLimiter::direct(Quota::per_second(per_second)),
        }
    }

    fn wait_for_slot(&self) {
        while self.rate_limiter.check().is_err() {
            thread::sleep(Duration::from_millis(50));
        }
    }

    fn execute<T: DeserializeOwned>(&self, endpoint: &str, query: &str) -> Result<T, ScoutError> {
        let mut retry_count = 0;

        loop {
            self.wait_for_slot();
            debug!(%endpoint, %query, "graphql request");

            let response = ureq::post(endpoint)
                .set("User-Agent", USER_AGENT)
                .send_json(serde_json::json!({ "query": query }));

            match response {
                Ok(resp) => {
                    let body: GraphQlResponse<T> =
                        resp.into_json().map_err(|e| ScoutError::Json(e.to_string()))?;

                    if let Some(err) = body.errors.first() {
                        return Err(ScoutError::Query(err.message.clone()));
                    }
                    return body
                        .data
                        .ok_or_else(|| ScoutError::Json("response carried no data".to_string()));
                }
                Err(ureq::Error::Status(429, _)) => {
                    if retry_count >= MAX_RETRIES {
                        return Err(ScoutError::RateLimited);
                    }
                    let wait_ms = 2000 * (retry_count + 1) as u64;
                    warn!(wait_ms, "rate limited by stats service, retrying");
                    thread::sleep(Duration::from_millis(wait_ms));
                    retry_count += 1;
                }
                Err(e) => {
                    return Err(ScoutError::Http(e.to_string()));
                }
            }
        }
    }

    fn stats<T: DeserializeOwned>(&self, query: &str) -> Result<T, ScoutError> {
        self.execute(&self.stats_endpoint, query)
    }

    fn core<T: DeserializeOwned>(&self, query: &str) -> Result<T, ScoutError> {
        self.execute(&self.core_endpoint, query)
    }

    /// Round totals for `team` across every regulation match of the season.
    pub fn fetch_team_round_totals(&self, team: &str) -> Result<Option<RoundTotals>, ScoutError> {
        let data: MatchScoresData = self.stats(&queries::team_results_query(self.season, team))?;

        let mut totals = RoundTotals::default();
        for dto in data.matches {
            let result = MatchResult::try_from(dto)?;
            let [first, second] = &result.teams;
            let own = if first.name == team { first.score } else { second.score };
            totals.wins += own;
            totals.rounds += first.score + second.score;
        }

        if totals.rounds == 0 {
            return Ok(None);
        }
        Ok(Some(totals))
    }
}

impl RoundTotalsSource for StatsApiClient {
    fn round_totals(&self, team: &str) -> Result<Option<RoundTotals>, ScoutError> {
        self.fetch_team_round_totals(team)
    }
}

impl LeagueSource for StatsApiClient {
    fn resolve_team(&self, franchise: &str, tier: &str) -> Result<ResolvedTeam, ScoutError> {
        let prefix = queries::normalize_franchise(franchise);
        let tier_name = queries::normalize_tier(tier);

        let data: FranchisesData = self.core(queries::FRANCHISES_QUERY)?;
        data.franchises
            .into_iter()
            .filter(|f| f.prefix == prefix)
            .flat_map(|f| f.teams)
            .find(|t| t.tier.name == tier_name)
            .map(|t| ResolvedTeam {
                name: t.name,
                tier: tier_name.clone(),
            })
            .ok_or_else(|| ScoutError::InvalidTeam {
                franchise: franchise.to_string(),
                tier: tier.to_string(),
            })
    }

    fn roster(&self, team: &str) -> Result<Vec<RosterEntry>, ScoutError> {
        let data: TeamPlayersData = self.core(&queries::team_players_query(team))?;
        let team_dto = data
            .team
            .ok_or_else(|| ScoutError::NoData(format!("core has no team named {}", team)))?;

        Ok(team_dto.players.into_iter().map(RosterEntry::from).collect())
    }

    fn tier_results(&self, tier: &str) -> Result<Vec<MatchResult>, ScoutError> {
        let data: MatchScoresData = self.stats(&queries::tier_results_query(self.season, tier))?;
        data.matches.into_iter().map(MatchResult::try_from).collect()
    }

    fn team_bans(&self, team: &str) -> Result<Vec<BanRecord>, ScoutError> {
        let id: TeamIdData = self.core(&queries::team_id_query(team))?;
        let team_id = id
            .team
            .ok_or_else(|| ScoutError::NoData(format!("core has no team named {}", team)))?
            .id;

        let data: TeamMatchesData = self.core(&queries::team_map_bans_query(self.season, &team_id))?;
        Ok(data
            .matches
            .into_iter()
            .filter_map(|m| m.lobby)
            .flat_map(|lobby| lobby.map_bans)
            .map(BanRecord::from)
            .collect())
    }

    fn player_map_ratings(&self, player: &str) -> Result<Vec<PlayerMapRating>, ScoutError> {
        let data: PlayerMatchesData = self.stats(&queries::player_map_ratings_query(self.season, player))?;
        Ok(data
            .matches
            .into_iter()
            .filter_map(|m| m.into_rating(player))
            .collect())
    }

    fn player_season_stats(&self, player: &str, keys: &[&str]) -> Result<Vec<f64>, ScoutError> {
        let data: PlayerSeasonStatsData =
            self.stats(&queries::player_season_stats_query(self.season, player, keys))?;
        let stats = data
            .player_season_stats
            .ok_or_else(|| ScoutError::NoData(format!("no season stats for {}", player)))?;

        keys.iter()
            .map(|key| {
                stats
                    .get(*key)
                    .copied()
                    .flatten()
                    .ok_or_else(|| ScoutError::NoData(format!("{} has no {} value", player, key)))
            })
            .collect()
    }
}
