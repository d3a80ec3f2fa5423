use super::table::OrderedTable;
use super::window::RoundWindow;
use crate::model::{BuyType, GrenadeThrow, Position, Side};
use serde::Serialize;

/// Setups for one (side, buy type) cell: where each player stood and what they threw.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuyUtility {
    pub positions: OrderedTable<String, Vec<Position>>,
    pub grenades: OrderedTable<String, Vec<GrenadeThrow>>,
}

impl BuyUtility {
    pub fn sample_count(&self) -> usize {
        self.positions.values().map(Vec::len).sum()
    }

    fn record(&mut self, window: RoundWindow) {
        for player in window.positions {
            self.positions
                .get_or_insert_with(player.name, Vec::new)
                .push(player.position);
        }

        for grenade in window.grenades {
            self.grenades
                .get_or_insert_with(grenade.thrower_name.clone(), Vec::new)
                .push(grenade);
        }
    }
}

/// Every side and buy type for one map. All ten cells exist from the start so that
/// renderers always get the full grid, empty or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapUtility {
    pub sides: OrderedTable<Side, OrderedTable<BuyType, BuyUtility>>,
}

impl Default for MapUtility {
    fn default() -> Self {
        let mut sides = OrderedTable::new();
        for side in Side::ALL {
            let buys = sides.get_or_insert_with(side, OrderedTable::new);
            for buy in BuyType::ALL {
                buys.get_or_insert_with(buy, BuyUtility::default);
            }
        }
        MapUtility { sides }
    }
}

impl MapUtility {
    pub fn cell(&self, side: Side, buy: BuyType) -> Option<&BuyUtility> {
        self.sides.get(&side).and_then(|buys| buys.get(&buy))
    }

    fn cell_mut(&mut self, side: Side, buy: BuyType) -> &mut BuyUtility {
        self.sides
            .get_or_insert_with(side, OrderedTable::new)
            .get_or_insert_with(buy, BuyUtility::default)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UtilityTracker {
    maps: OrderedTable<String, MapUtility>,
}

impl UtilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_window(&mut self, map: &str, side: Side, buy: BuyType, window: RoundWindow) {
        self.maps
            .get_or_insert_with(map.to_string(), MapUtility::default)
            .cell_mut(side, buy)
            .record(window);
    }

    pub fn map(&self, map: &str) -> Option<&MapUtility> {
        self.maps.get(map)
    }

    pub fn cell(&self, map: &str, side: Side, buy: BuyType) -> Option<&BuyUtility> {
        self.map(map).and_then(|m| m.cell(side, buy))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MapUtility)> {
        self.maps.iter()
    }
}
