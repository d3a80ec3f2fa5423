use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// The decoder writes `null` for a side with no players alive.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Which half of the map a team is playing. Attack is the T side, defense is CT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "T", alias = "TERRORIST", alias = "t")]
    Attack,
    #[serde(rename = "CT", alias = "ct")]
    Defense,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Attack, Side::Defense];

    pub fn opposite(self) -> Side {
        match self {
            Side::Attack => Side::Defense,
            Side::Defense => Side::Attack,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Attack => write!(f, "T"),
            Side::Defense => write!(f, "CT"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BuyType {
    Pistol,
    #[serde(rename = "Full Eco")]
    FullEco,
    #[serde(rename = "Semi Eco")]
    SemiEco,
    #[serde(rename = "Semi Buy")]
    SemiBuy,
    #[serde(rename = "Full Buy")]
    FullBuy,
}

impl BuyType {
    pub const ALL: [BuyType; 5] = [
        BuyType::Pistol,
        BuyType::FullEco,
        BuyType::SemiEco,
        BuyType::SemiBuy,
        BuyType::FullBuy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BuyType::Pistol => "Pistol",
            BuyType::FullEco => "Full Eco",
            BuyType::SemiEco => "Semi Eco",
            BuyType::SemiBuy => "Semi Buy",
            BuyType::FullBuy => "Full Buy",
        }
    }
}

impl fmt::Display for BuyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrenadeType {
    #[serde(rename = "Incendiary Grenade", alias = "Incendiary")]
    Incendiary,
    Molotov,
    #[serde(rename = "Smoke Grenade", alias = "Smoke")]
    Smoke,
    #[serde(rename = "HE Grenade", alias = "HE")]
    HighExplosive,
    Flashbang,
    #[serde(rename = "Decoy Grenade", alias = "Decoy")]
    Decoy,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Position { x, y, z }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PlayerState {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y, self.z)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameSide {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub players: Vec<PlayerState>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub tick: u64,
    #[serde(default)]
    pub ct: FrameSide,
    #[serde(default)]
    pub t: FrameSide,
}

impl Frame {
    pub fn players(&self, side: Side) -> &[PlayerState] {
        match side {
            Side::Attack => &self.t.players,
            Side::Defense => &self.ct.players,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrenadeThrow {
    pub thrower_name: String,
    pub thrower_side: Side,
    pub grenade_type: GrenadeType,
    pub throw_seconds: f64,
    #[serde(rename = "throwerX")]
    pub thrower_x: f64,
    #[serde(rename = "throwerY")]
    pub thrower_y: f64,
    #[serde(rename = "throwerZ")]
    pub thrower_z: f64,
    #[serde(rename = "grenadeX")]
    pub grenade_x: f64,
    #[serde(rename = "grenadeY")]
    pub grenade_y: f64,
    #[serde(rename = "grenadeZ")]
    pub grenade_z: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRecord {
    pub round_num: u32,
    pub ct_team: String,
    pub t_team: String,
    pub freeze_time_end_tick: u64,
    #[serde(default)]
    pub winning_side: Option<Side>,
    #[serde(default)]
    pub winning_team: Option<String>,
    #[serde(rename = "endCTScore")]
    pub end_ct_score: u32,
    #[serde(rename = "endTScore")]
    pub end_t_score: u32,
    #[serde(default)]
    pub ct_buy_type: Option<BuyType>,
    #[serde(default)]
    pub t_buy_type: Option<BuyType>,
    #[serde(default)]
    pub ct_freeze_time_end_eq_val: Option<u32>,
    #[serde(default)]
    pub t_freeze_time_end_eq_val: Option<u32>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub frames: Vec<Frame>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub grenades: Vec<GrenadeThrow>,
}

impl RoundRecord {
    pub fn team_on(&self, side: Side) -> &str {
        match side {
            Side::Attack => &self.t_team,
            Side::Defense => &self.ct_team,
        }
    }

    pub fn side_of(&self, team: &str) -> Option<Side> {
        if self.ct_team == team {
            Some(Side::Defense)
        } else if self.t_team == team {
            Some(Side::Attack)
        } else {
            None
        }
    }

    pub fn end_score(&self, side: Side) -> u32 {
        match side {
            Side::Attack => self.end_t_score,
            Side::Defense => self.end_ct_score,
        }
    }

    pub fn buy_type_label(&self, side: Side) -> Option<BuyType> {
        match side {
            Side::Attack => self.t_buy_type,
            Side::Defense => self.ct_buy_type,
        }
    }

    pub fn equipment_value(&self, side: Side) -> Option<u32> {
        match side {
            Side::Attack => self.t_freeze_time_end_eq_val,
            Side::Defense => self.ct_freeze_time_end_eq_val,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    /// Identifier used to order matches; the loader fills it from the file name when absent.
    #[serde(default)]
    pub match_id: String,
    pub map_name: String,
    pub tick_rate: f64,
    #[serde(default)]
    pub game_rounds: Vec<RoundRecord>,
}

impl MatchRecord {
    pub fn first_round(&self) -> Option<&RoundRecord> {
        self.game_rounds.first()
    }

    pub fn last_round(&self) -> Option<&RoundRecord> {
        self.game_rounds.last()
    }
}
