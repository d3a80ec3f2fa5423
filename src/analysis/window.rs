use crate::error::ScoutError;
use crate::model::{GrenadeThrow, Position, RoundRecord, Side};
use serde::{Deserialize, Serialize};

/// Seconds after freeze-time end at which setups are sampled.
pub const WINDOW_SECONDS: f64 = 12.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerPosition {
    pub name: String,
    pub position: Position,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundWindow {
    pub positions: Vec<PlayerPosition>,
    pub grenades: Vec<GrenadeThrow>,
}

pub fn elapsed_seconds(tick: u64, freeze_time_end_tick: u64, tick_rate: f64) -> f64 {
    (tick as f64 - freeze_time_end_tick as f64) / tick_rate
}

/// Positions of `side` at the first frame past the window, and every grenade that side threw
/// inside it. A round that ends before the window closes yields no positions.
pub fn extract_window(round: &RoundRecord, side: Side, tick_rate: f64) -> Result<RoundWindow, ScoutError> {
    if !(tick_rate > 0.0) {
        return Err(ScoutError::Decode(format!(
            "tick rate must be positive, got {}",
            tick_rate
        )));
    }

    let positions = round
        .frames
        .iter()
        .find(|frame| elapsed_seconds(frame.tick, round.freeze_time_end_tick, tick_rate) > WINDOW_SECONDS)
        .map(|frame| {
            frame
                .players(side)
                .iter()
                .map(|player| PlayerPosition {
                    name: player.name.clone(),
                    position: player.position(),
                })
                .collect()
        })
        .unwrap_or_default();

    let grenades = round
        .grenades
        .iter()
        .filter(|g| g.thrower_side == side && g.throw_seconds <= WINDOW_SECONDS)
        .cloned()
        .collect();

    Ok(RoundWindow { positions, grenades })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GrenadeType;
    use crate::test_support::RoundBuilder;
    use pretty_assertions::assert_eq;

    #[test]
    fn takes_first_frame_past_window_only() {
        // 64 tick: 12s is tick offset 768
        let round = RoundBuilder::new(2, "Alpha", "Bravo")
            .freeze_end(1_000)
            .frame(1_640, &["a1"], &["b1"])
            .frame(1_768, &["a1"], &["b1"])
            .frame(1_832, &["a1", "a2"], &["b1"])
            .frame(1_896, &["a3"], &["b1"])
            .build();

        let window = extract_window(&round, Side::Defense, 64.0).unwrap();

        let names: Vec<_> = window.positions.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a1", "a2"]);
        assert_eq!(window.positions[0].position.x, 1_832.0);
    }

    #[test]
    fn short_round_has_no_positions() {
        let round = RoundBuilder::new(2, "Alpha", "Bravo")
            .freeze_end(0)
            .frame(320, &["a1"], &["b1"])
            .frame(640, &["a1"], &["b1"])
            .build();

        let window = extract_window(&round, Side::Attack, 64.0).unwrap();
        assert!(window.positions.is_empty());
    }

    #[test]
    fn grenades_filtered_by_side_and_time_not_type() {
        let round = RoundBuilder::new(2, "Alpha", "Bravo")
            .grenade("a1", Side::Defense, GrenadeType::Smoke, 3.0)
            .grenade("a2", Side::Defense, GrenadeType::Decoy, 12.0)
            .grenade("a1", Side::Defense, GrenadeType::Flashbang, 12.01)
            .grenade("b1", Side::Attack, GrenadeType::Molotov, 5.0)
            .build();

        let window = extract_window(&round, Side::Defense, 64.0).unwrap();

        let kinds: Vec<_> = window.grenades.iter().map(|g| g.grenade_type).collect();
        assert_eq!(kinds, vec![GrenadeType::Smoke, GrenadeType::Decoy]);
    }

    #[test]
    fn rejects_non_positive_tick_rate() {
        let round = RoundBuilder::new(2, "Alpha", "Bravo").build();
        assert!(matches!(
            extract_window(&round, Side::Defense, 0.0),
            Err(ScoutError::Decode(_))
        ));
    }

    #[test]
    fn elapsed_is_fractional() {
        assert_eq!(elapsed_seconds(96, 0, 64.0), 1.5);
        assert_eq!(elapsed_seconds(0, 128, 128.0), -1.0);
    }
}
