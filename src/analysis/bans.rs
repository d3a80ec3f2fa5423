use super::table::OrderedTable;
use crate::error::ScoutError;
use crate::model::BanRecord;
use serde::Serialize;

/// Vetoes alternate, so two bans make up one ban round.
pub fn ban_round(order: u32) -> u32 {
    (order + 1) / 2
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MapBanStats {
    pub ban_rounds: Vec<u32>,
}

impl MapBanStats {
    pub fn times_banned(&self) -> usize {
        self.ban_rounds.len()
    }

    pub fn avg_ban_round(&self) -> Result<f64, ScoutError> {
        if self.ban_rounds.is_empty() {
            return Err(ScoutError::NoData("map was never banned".to_string()));
        }

        let total: u32 = self.ban_rounds.iter().sum();
        Ok(total as f64 / self.ban_rounds.len() as f64)
    }
}

/// Ban tendencies of one team. Bans by anyone else are ignored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BanTracker {
    team: String,
    maps: OrderedTable<String, MapBanStats>,
}

impl BanTracker {
    pub fn new(team: &str) -> Self {
        BanTracker {
            team: team.to_string(),
            maps: OrderedTable::new(),
        }
    }

    pub fn record(&mut self, ban: &BanRecord) {
        if ban.team != self.team {
            return;
        }

        self.maps
            .get_or_insert_with(ban.map.clone(), MapBanStats::default)
            .ban_rounds
            .push(ban_round(ban.order));
    }

    /// Maps the team banned at least once, in first-ban order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &MapBanStats)> {
        self.maps.iter().filter(|(_, stats)| stats.times_banned() > 0)
    }

    pub fn get(&self, map: &str) -> Option<&MapBanStats> {
        self.maps.get(map)
    }
}
