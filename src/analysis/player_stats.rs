use super::table::OrderedTable;
use crate::error::ScoutError;
use crate::model::{PlayerMapRating, RosterEntry};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RatingSum {
    pub total: f64,
    pub samples: u32,
}

impl RatingSum {
    pub fn average(&self) -> Result<f64, ScoutError> {
        if self.samples == 0 {
            return Err(ScoutError::NoData("no ratings recorded".to_string()));
        }

        Ok(self.total / self.samples as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerMaps {
    pub substitute: bool,
    pub maps: OrderedTable<String, RatingSum>,
}

/// Per-map average rating for every active player on a roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerStatsTracker {
    players: OrderedTable<String, PlayerMaps>,
    maps: Vec<String>,
}

impl PlayerStatsTracker {
    /// Seeds one row per signed or temporary player, in roster order.
    pub fn new(roster: &[RosterEntry]) -> Self {
        let mut players = OrderedTable::new();
        for entry in roster.iter().filter(|e| e.status.is_active()) {
            players.get_or_insert_with(entry.name.clone(), || PlayerMaps {
                substitute: entry.is_substitute(),
                maps: OrderedTable::new(),
            });
        }

        PlayerStatsTracker {
            players,
            maps: Vec::new(),
        }
    }

    /// Ratings for players outside the roster are dropped.
    pub fn record(&mut self, rating: &PlayerMapRating) -> bool {
        let player = match self.players.get_mut(rating.player.as_str()) {
            Some(player) => player,
            None => return false,
        };
        let sum = player
            .maps
            .get_or_insert_with(rating.map_name.clone(), RatingSum::default);
        sum.total += rating.rating;
        sum.samples += 1;

        if !self.maps.contains(&rating.map_name) {
            self.maps.push(rating.map_name.clone());
        }
        true
    }

    /// Maps in the order any player first played them.
    pub fn maps(&self) -> &[String] {
        &self.maps
    }

    pub fn players(&self) -> impl Iterator<Item = (&String, &PlayerMaps)> {
        self.players.iter()
    }

    pub fn average(&self, player: &str, map: &str) -> Result<f64, ScoutError> {
        self.players
            .get(player)
            .and_then(|p| p.maps.get(map))
            .ok_or_else(|| ScoutError::NoData(format!("{} has not played {}", player, map)))?
            .average()
    }
}

/// One player's season numbers, in the order of the requested stat columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonStatLine {
    pub player: String,
    pub substitute: bool,
    pub values: Vec<f64>,
}
