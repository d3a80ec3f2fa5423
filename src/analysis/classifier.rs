use crate::error::ScoutError;
use crate::model::{BuyType, RoundRecord, Side};
use std::str::FromStr;

/// Equipment value thresholds, checked in order. Anything at or above the last one is a full buy.
const FULL_ECO_BELOW: u32 = 5_000;
const SEMI_ECO_BELOW: u32 = 10_000;
const SEMI_BUY_BELOW: u32 = 20_000;

/// Where a round's buy type comes from when it is not a pistol round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BuyTypeStrategy {
    /// Use the buy-type label the decoder wrote for each side.
    #[default]
    Label,
    /// Derive it from the side's summed equipment value at freeze-time end.
    EquipmentValue,
}

impl FromStr for BuyTypeStrategy {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "label" => Ok(BuyTypeStrategy::Label),
            "equipment" | "equipment-value" => Ok(BuyTypeStrategy::EquipmentValue),
            other => Err(ScoutError::Config(format!(
                "unknown buy type strategy '{}', expected 'label' or 'equipment'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundClassification {
    pub focal_side: Side,
    pub buy_type: BuyType,
    pub winner: String,
}

pub fn is_pistol_round(round_num: u32) -> bool {
    round_num == 1 || round_num == 16
}

pub fn buy_type_from_equipment(value: u32) -> BuyType {
    if value < FULL_ECO_BELOW {
        BuyType::FullEco
    } else if value < SEMI_ECO_BELOW {
        BuyType::SemiEco
    } else if value < SEMI_BUY_BELOW {
        BuyType::SemiBuy
    } else {
        BuyType::FullBuy
    }
}

pub fn buy_type(round: &RoundRecord, side: Side, strategy: BuyTypeStrategy) -> Result<BuyType, ScoutError> {
    if is_pistol_round(round.round_num) {
        return Ok(BuyType::Pistol);
    }

    match strategy {
        BuyTypeStrategy::Label => round.buy_type_label(side).ok_or_else(|| {
            ScoutError::Decode(format!("round {} has no {} buy type", round.round_num, side))
        }),
        BuyTypeStrategy::EquipmentValue => round
            .equipment_value(side)
            .map(buy_type_from_equipment)
            .ok_or_else(|| {
                ScoutError::Decode(format!(
                    "round {} has no {} freeze-time equipment value",
                    round.round_num, side
                ))
            }),
    }
}

/// Side that won the round. The recorded side and team name must agree when both are present.
pub fn winning_side(round: &RoundRecord) -> Result<Side, ScoutError> {
    let by_team = round.winning_team.as_deref().and_then(|team| round.side_of(team));

    match (round.winning_side, by_team) {
        (Some(side), Some(team_side)) if side != team_side => Err(ScoutError::InvariantViolation(format!(
            "round {} names {} as winner but the winning side is {}",
            round.round_num,
            round.team_on(team_side),
            side
        ))),
        (Some(side), _) => Ok(side),
        (None, Some(team_side)) => Ok(team_side),
        (None, None) => Err(ScoutError::InvariantViolation(format!(
            "round {} reports no winner",
            round.round_num
        ))),
    }
}

/// Side leading on end score. Equal scores cannot happen at the end of a finished match.
pub fn leading_side(round: &RoundRecord) -> Result<Side, ScoutError> {
    let ct = round.end_score(Side::Defense);
    let t = round.end_score(Side::Attack);

    if ct > t {
        Ok(Side::Defense)
    } else if t > ct {
        Ok(Side::Attack)
    } else {
        Err(ScoutError::InvariantViolation(format!(
            "round {} ends tied at {}-{}",
            round.round_num, ct, t
        )))
    }
}

pub fn classify(
    round: &RoundRecord,
    focal_team: &str,
    strategy: BuyTypeStrategy,
) -> Result<RoundClassification, ScoutError> {
    let focal_side = round.side_of(focal_team).ok_or_else(|| ScoutError::NotParticipant {
        team: focal_team.to_string(),
        round: round.round_num,
    })?;

    let buy_type = buy_type(round, focal_side, strategy)?;
    let winner = round.team_on(winning_side(round)?).to_string();

    Ok(RoundClassification {
        focal_side,
        buy_type,
        winner,
    })
}
