pub mod aggregator;
pub mod bans;
pub mod classifier;
pub mod player_stats;
pub mod table;
pub mod team_stats;
pub mod utility;
pub mod window;
