pub mod league;
pub mod match_record;

pub use league::{BanRecord, MatchResult, PlayerMapRating, ResolvedTeam, RosterEntry, RosterStatus, RoundTotals, TeamScore};
pub use match_record::{
    BuyType, Frame, FrameSide, GrenadeThrow, GrenadeType, MatchRecord, PlayerState, Position, RoundRecord, Side,
};
