use super::bans::BanTracker;
use super::classifier::{self, BuyTypeStrategy};
use super::table::OrderedTable;
use super::team_stats::{MapOpponentStats, RoundTotalsSource, TeamStatsTracker};
use super::utility::UtilityTracker;
use super::window::extract_window;
use crate::error::ScoutError;
use crate::model::{BanRecord, MatchRecord, MatchResult, RoundRecord};
use serde::Serialize;
use tracing::{debug, info, trace, warn};

/// Everything derived from one pass over a match set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregates {
    pub focal_team: Option<String>,
    pub teams: TeamStatsTracker,
    pub maps: OrderedTable<String, MapOpponentStats>,
    pub utility: UtilityTracker,
    pub bans: Option<BanTracker>,
    pub rounds_processed: usize,
    pub rounds_skipped: usize,
}

impl Aggregates {
    pub fn map_stats(&self, map: &str) -> Option<&MapOpponentStats> {
        self.maps.get(map)
    }

    pub fn avg_opponent_rwp(&self, map: &str, source: &dyn RoundTotalsSource) -> Result<f64, ScoutError> {
        self.map_stats(map)
            .ok_or_else(|| ScoutError::NoData(format!("no matches on {}", map)))?
            .avg_opponent_rwp(source)
    }
}

pub struct Aggregator {
    focal_team: Option<String>,
    strategy: BuyTypeStrategy,
    teams: TeamStatsTracker,
    maps: OrderedTable<String, MapOpponentStats>,
    utility: UtilityTracker,
    bans: Option<BanTracker>,
    rounds_processed: usize,
    rounds_skipped: usize,
}

impl Aggregator {
    pub fn new(focal_team: Option<&str>, strategy: BuyTypeStrategy) -> Self {
        Aggregator {
            focal_team: focal_team.map(str::to_string),
            strategy,
            teams: TeamStatsTracker::new(),
            maps: OrderedTable::new(),
            utility: UtilityTracker::new(),
            bans: focal_team.map(BanTracker::new),
            rounds_processed: 0,
            rounds_skipped: 0,
        }
    }

    pub fn add_match(&mut self, record: &MatchRecord) -> Result<(), ScoutError> {
        let (first, last) = match (record.first_round(), record.last_round()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                debug!(match_id = %record.match_id, "match has no rounds");
                return Ok(());
            }
        };

        debug!(
            match_id = %record.match_id,
            map = %record.map_name,
            rounds = record.game_rounds.len(),
            "aggregating match"
        );

        // Opponent is fixed for the whole match by whoever lined up in the first round.
        let mut opponent_added = false;
        if let Some(focal) = self.focal_team.clone() {
            if let Some(side) = first.side_of(&focal) {
                let opponent = first.team_on(side.opposite()).to_string();
                self.map_entry(&record.map_name).add_opponent(&opponent);
                opponent_added = true;
            }
        }

        for round in &record.game_rounds {
            self.add_round(record, round)?;
        }

        let leader = classifier::leading_side(last)?;
        debug!(match_id = %record.match_id, winner = %last.team_on(leader), "match decided");

        self.teams.record_result(
            (last.ct_team.as_str(), last.end_ct_score),
            (last.t_team.as_str(), last.end_t_score),
        )?;

        if let Some(focal) = self.focal_team.clone() {
            match last.side_of(&focal) {
                Some(side) if opponent_added => {
                    let own = last.end_score(side);
                    let other = last.end_score(side.opposite());
                    self.map_entry(&record.map_name).record_result(own, other)?;
                }
                Some(_) => {
                    warn!(match_id = %record.match_id, %focal, "focal team missing from first round, result not recorded");
                }
                None => {}
            }
        }

        Ok(())
    }

    fn add_round(&mut self, record: &MatchRecord, round: &RoundRecord) -> Result<(), ScoutError> {
        let winner = classifier::winning_side(round)?;
        self.teams
            .record_round(round.team_on(winner), round.team_on(winner.opposite()));
        self.rounds_processed += 1;

        let focal = match self.focal_team.clone() {
            Some(focal) => focal,
            None => return Ok(()),
        };

        let classification = match classifier::classify(round, &focal, self.strategy) {
            Ok(c) => c,
            Err(ScoutError::NotParticipant { team, round }) => {
                warn!(%team, round, match_id = %record.match_id, "focal team not in round, skipping");
                self.rounds_skipped += 1;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        trace!(
            round = round.round_num,
            side = %classification.focal_side,
            buy = %classification.buy_type,
            winner = %classification.winner,
            "classified round"
        );

        self.map_entry(&record.map_name)
            .record_round(classification.winner == focal);

        let window = extract_window(round, classification.focal_side, record.tick_rate)?;
        self.utility.record_window(
            &record.map_name,
            classification.focal_side,
            classification.buy_type,
            window,
        );

        Ok(())
    }

    /// Adds a map known only by its final scoreline.
    pub fn add_result(&mut self, result: &MatchResult) -> Result<(), ScoutError> {
        self.teams.record_scoreline(result)?;

        let focal = match self.focal_team.clone() {
            Some(focal) if result.involves(&focal) => focal,
            _ => return Ok(()),
        };

        let [first, second] = &result.teams;
        let (own, other) = if first.name == focal { (first, second) } else { (second, first) };

        self.map_entry(&result.map_name)
            .record_scoreline(&other.name, own.score, other.score)
    }

    pub fn add_ban(&mut self, ban: &BanRecord) {
        if let Some(bans) = self.bans.as_mut() {
            bans.record(ban);
        }
    }

    fn map_entry(&mut self, map: &str) -> &mut MapOpponentStats {
        self.maps
            .get_or_insert_with(map.to_string(), MapOpponentStats::default)
    }

    pub fn finish(self) -> Aggregates {
        info!(
            teams = self.teams.len(),
            maps = self.maps.len(),
            rounds = self.rounds_processed,
            skipped = self.rounds_skipped,
            "aggregation finished"
        );

        Aggregates {
            focal_team: self.focal_team,
            teams: self.teams,
            maps: self.maps,
            utility: self.utility,
            bans: self.bans,
            rounds_processed: self.rounds_processed,
            rounds_skipped: self.rounds_skipped,
        }
    }
}

/// Aggregates `matches` in match-id order so that first-encounter ordering is stable
/// no matter how the records were gathered.
pub fn aggregate(
    matches: &[MatchRecord],
    focal_team: Option<&str>,
    strategy: BuyTypeStrategy,
) -> Result<Aggregates, ScoutError> {
    let mut ordered: Vec<&MatchRecord> = matches.iter().collect();
    ordered.sort_by(|a, b| a.match_id.cmp(&b.match_id));

    let mut aggregator = Aggregator::new(focal_team, strategy);
    for record in ordered {
        aggregator.add_match(record)?;
    }

    Ok(aggregator.finish())
}

/// Round totals of every team in `matches`, for rating opponents against their whole season.
pub fn league_round_totals(matches: &[MatchRecord]) -> Result<TeamStatsTracker, ScoutError> {
    Ok(aggregate(matches, None, BuyTypeStrategy::default())?.teams)
}
