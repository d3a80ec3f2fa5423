use super::table::OrderedTable;
use crate::error::ScoutError;
use crate::model::{MatchResult, RoundTotals};
use serde::Serialize;
use tracing::warn;

/// A map the loser took at least this many rounds on counts as close.
pub const CLOSE_GAME_ROUNDS: u32 = 10;

/// `numerator / denominator`, or `NoData` naming `what` when nothing was recorded.
pub fn ratio(numerator: u32, denominator: u32, what: &str) -> Result<f64, ScoutError> {
    if denominator == 0 {
        return Err(ScoutError::NoData(format!("no rounds recorded for {}", what)));
    }

    Ok(numerator as f64 / denominator as f64)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TeamMapStats {
    pub wins: u32,
    pub losses: u32,
    pub round_wins: u32,
    pub round_losses: u32,
    pub easy_wins: u32,
    pub close: u32,
    pub hard_losses: u32,
}

impl TeamMapStats {
    pub fn rounds(&self) -> u32 {
        self.round_wins + self.round_losses
    }

    pub fn rwp(&self) -> Result<f64, ScoutError> {
        ratio(self.round_wins, self.rounds(), "team")
    }

    fn record_result(&mut self, own: u32, other: u32) {
        if own > other {
            self.wins += 1;
            if other >= CLOSE_GAME_ROUNDS {
                self.close += 1;
            } else {
                self.easy_wins += 1;
            }
        } else {
            self.losses += 1;
            if own >= CLOSE_GAME_ROUNDS {
                self.close += 1;
            } else {
                self.hard_losses += 1;
            }
        }
    }
}

/// Where an opponent's overall round record comes from.
pub trait RoundTotalsSource {
    /// `Ok(None)` when the source has never seen the team.
    fn round_totals(&self, team: &str) -> Result<Option<RoundTotals>, ScoutError>;
}

/// Asks `primary` first and `fallback` only for teams `primary` has nothing on.
pub struct WithFallback<'a> {
    pub primary: &'a dyn RoundTotalsSource,
    pub fallback: &'a dyn RoundTotalsSource,
}

impl RoundTotalsSource for WithFallback<'_> {
    fn round_totals(&self, team: &str) -> Result<Option<RoundTotals>, ScoutError> {
        match self.primary.round_totals(team)? {
            Some(totals) => Ok(Some(totals)),
            None => self.fallback.round_totals(team),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamStatsTracker {
    stats: OrderedTable<String, TeamMapStats>,
}

impl TeamStatsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, team: &str) -> &mut TeamMapStats {
        self.stats
            .get_or_insert_with(team.to_string(), TeamMapStats::default)
    }

    pub fn record_round(&mut self, winner: &str, loser: &str) {
        self.entry(winner).round_wins += 1;
        self.entry(loser).round_losses += 1;
    }

    /// Map result for both teams. Rounds are not touched.
    pub fn record_result(&mut self, first: (&str, u32), second: (&str, u32)) -> Result<(), ScoutError> {
        if first.1 == second.1 {
            return Err(ScoutError::InvariantViolation(format!(
                "{} and {} tied {}-{}",
                first.0, second.0, first.1, second.1
            )));
        }

        self.entry(first.0).record_result(first.1, second.1);
        self.entry(second.0).record_result(second.1, first.1);
        Ok(())
    }

    /// Scoreline-only result: the scores are the rounds each team won.
    pub fn record_scoreline(&mut self, result: &MatchResult) -> Result<(), ScoutError> {
        let [first, second] = &result.teams;

        self.record_result((first.name.as_str(), first.score), (second.name.as_str(), second.score))?;

        let a = self.entry(&first.name);
        a.round_wins += first.score;
        a.round_losses += second.score;

        let b = self.entry(&second.name);
        b.round_wins += second.score;
        b.round_losses += first.score;
        Ok(())
    }

    pub fn get(&self, team: &str) -> Option<&TeamMapStats> {
        self.stats.get(team)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TeamMapStats)> {
        self.stats.iter()
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}

impl RoundTotalsSource for TeamStatsTracker {
    fn round_totals(&self, team: &str) -> Result<Option<RoundTotals>, ScoutError> {
        Ok(self.get(team).map(|stats| RoundTotals {
            wins: stats.round_wins,
            rounds: stats.rounds(),
        }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Opponent {
    pub name: String,
    /// Final score from the focal team's point of view, once the match is complete.
    pub score: Option<(u32, u32)>,
}

impl Opponent {
    /// `Team B (13-9)`, or just the name when no final score was recorded.
    pub fn with_score(&self) -> String {
        match self.score {
            Some((own, other)) => format!("{} ({}-{})", self.name, own, other),
            None => self.name.clone(),
        }
    }
}

/// The focal team's record on one map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MapOpponentStats {
    pub opponents: Vec<Opponent>,
    pub wins: u32,
    pub losses: u32,
    pub round_wins: u32,
    pub round_losses: u32,
}

impl MapOpponentStats {
    pub fn add_opponent(&mut self, name: &str) {
        self.opponents.push(Opponent {
            name: name.to_string(),
            score: None,
        });
    }

    pub fn record_round(&mut self, won: bool) {
        if won {
            self.round_wins += 1;
        } else {
            self.round_losses += 1;
        }
    }

    /// Closes the most recently added opponent with its final score.
    pub fn record_result(&mut self, own: u32, other: u32) -> Result<(), ScoutError> {
        if own == other {
            return Err(ScoutError::InvariantViolation(format!(
                "map ended tied {}-{}",
                own, other
            )));
        }

        if own > other {
            self.wins += 1;
        } else {
            self.losses += 1;
        }

        if let Some(last) = self.opponents.last_mut() {
            last.score = Some((own, other));
        }
        Ok(())
    }

    /// A whole map known only by its final score.
    pub fn record_scoreline(&mut self, opponent: &str, own: u32, other: u32) -> Result<(), ScoutError> {
        if own == other {
            return Err(ScoutError::InvariantViolation(format!(
                "map against {} ended tied {}-{}",
                opponent, own, other
            )));
        }

        self.add_opponent(opponent);
        self.round_wins += own;
        self.round_losses += other;
        self.record_result(own, other)
    }

    pub fn rwp(&self) -> Result<f64, ScoutError> {
        ratio(self.round_wins, self.round_wins + self.round_losses, "map")
    }

    /// Pooled round win percentage of every opponent faced on this map.
    pub fn avg_opponent_rwp(&self, source: &dyn RoundTotalsSource) -> Result<f64, ScoutError> {
        let mut wins = 0;
        let mut rounds = 0;

        for opponent in &self.opponents {
            match source.round_totals(&opponent.name)? {
                Some(totals) => {
                    wins += totals.wins;
                    rounds += totals.rounds;
                }
                None => warn!(opponent = %opponent.name, "no round totals for opponent"),
            }
        }

        ratio(wins, rounds, "opponents")
    }
}
