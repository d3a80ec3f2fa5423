//! Scouting reports for CSC teams, built from decoded demos and the league stats services.

pub mod analysis;
pub mod api;
pub mod config;
pub mod display;
pub mod error;
pub mod loader;
pub mod logging;
pub mod model;
pub mod summary;

#[cfg(test)]
mod test_support;

pub use analysis::aggregator::{aggregate, league_round_totals, Aggregates, Aggregator};
pub use analysis::classifier::{classify, BuyTypeStrategy, RoundClassification};
pub use analysis::team_stats::{RoundTotalsSource, WithFallback};
pub use analysis::window::{extract_window, RoundWindow};
pub use config::Config;
pub use error::ScoutError;
