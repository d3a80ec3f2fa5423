//! Builders for hand-written match records used across unit tests.

use crate::model::{
    BuyType, Frame, FrameSide, GrenadeThrow, GrenadeType, MatchRecord, PlayerState, RoundRecord, Side,
};

pub struct RoundBuilder {
    round: RoundRecord,
}

impl RoundBuilder {
    pub fn new(round_num: u32, ct_team: &str, t_team: &str) -> Self {
        RoundBuilder {
            round: RoundRecord {
                round_num,
                ct_team: ct_team.to_string(),
                t_team: t_team.to_string(),
                freeze_time_end_tick: 0,
                winning_side: None,
                winning_team: None,
                end_ct_score: 0,
                end_t_score: 0,
                ct_buy_type: None,
                t_buy_type: None,
                ct_freeze_time_end_eq_val: None,
                t_freeze_time_end_eq_val: None,
                frames: Vec::new(),
                grenades: Vec::new(),
            },
        }
    }

    pub fn buy_types(mut self, ct: BuyType, t: BuyType) -> Self {
        self.round.ct_buy_type = Some(ct);
        self.round.t_buy_type = Some(t);
        self
    }

    pub fn equipment(mut self, ct: u32, t: u32) -> Self {
        self.round.ct_freeze_time_end_eq_val = Some(ct);
        self.round.t_freeze_time_end_eq_val = Some(t);
        self
    }

    pub fn scores(mut self, ct: u32, t: u32) -> Self {
        self.round.end_ct_score = ct;
        self.round.end_t_score = t;
        self
    }

    pub fn freeze_end(mut self, tick: u64) -> Self {
        self.round.freeze_time_end_tick = tick;
        self
    }

    pub fn ct_wins(self) -> Self {
        self.winner(Side::Defense)
    }

    pub fn t_wins(self) -> Self {
        self.winner(Side::Attack)
    }

    fn winner(mut self, side: Side) -> Self {
        self.round.winning_side = Some(side);
        self.round.winning_team = Some(self.round.team_on(side).to_string());
        self
    }

    pub fn frame(mut self, tick: u64, ct: &[&str], t: &[&str]) -> Self {
        let players = |names: &[&str]| FrameSide {
            players: names
                .iter()
                .enumerate()
                .map(|(i, name)| PlayerState {
                    name: name.to_string(),
                    x: tick as f64,
                    y: i as f64,
                    z: 0.0,
                })
                .collect(),
        };

        self.round.frames.push(Frame {
            tick,
            ct: players(ct),
            t: players(t),
        });
        self
    }

    pub fn grenade(mut self, thrower: &str, side: Side, grenade_type: GrenadeType, seconds: f64) -> Self {
        self.round.grenades.push(GrenadeThrow {
            thrower_name: thrower.to_string(),
            thrower_side: side,
            grenade_type,
            throw_seconds: seconds,
            thrower_x: 0.0,
            thrower_y: 0.0,
            thrower_z: 0.0,
            grenade_x: seconds,
            grenade_y: seconds,
            grenade_z: 0.0,
        });
        self
    }

    pub fn build(self) -> RoundRecord {
        self.round
    }
}

pub fn match_record(match_id: &str, map_name: &str, rounds: Vec<RoundRecord>) -> MatchRecord {
    MatchRecord {
        match_id: match_id.to_string(),
        map_name: map_name.to_string(),
        tick_rate: 64.0,
        game_rounds: rounds,
    }
}

/// A match where `ct_team` keeps the CT side and wins `ct_rounds` of the opening rounds,
/// then the remaining `t_rounds` go to the T side. Every round carries full-buy labels.
pub fn scripted_match(
    match_id: &str,
    map_name: &str,
    ct_team: &str,
    t_team: &str,
    ct_rounds: u32,
    t_rounds: u32,
) -> MatchRecord {
    let mut rounds = Vec::new();
    let mut ct_score = 0;
    let mut t_score = 0;

    for round_num in 1..=(ct_rounds + t_rounds) {
        let ct_wins = round_num <= ct_rounds;
        if ct_wins {
            ct_score += 1;
        } else {
            t_score += 1;
        }

        let builder = RoundBuilder::new(round_num, ct_team, t_team)
            .buy_types(BuyType::FullBuy, BuyType::FullBuy)
            .scores(ct_score, t_score);
        let builder = if ct_wins { builder.ct_wins() } else { builder.t_wins() };
        rounds.push(builder.build());
    }

    match_record(match_id, map_name, rounds)
}
