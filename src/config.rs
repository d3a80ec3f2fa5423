use crate::analysis::classifier::BuyTypeStrategy;
use crate::error::ScoutError;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_STATS_ENDPOINT: &str = "https://stats.csconfederation.com/graphql";
pub const DEFAULT_CORE_ENDPOINT: &str = "https://core.csconfederation.com/graphql";
pub const DEFAULT_SEASON: u32 = 14;

#[derive(Debug, Clone)]
pub struct Config {
    pub stats_endpoint: String,
    pub core_endpoint: String,
    pub season: u32,
    pub demo_dir: PathBuf,
    pub buy_strategy: BuyTypeStrategy,
}

impl Config {
    pub fn from_env() -> Result<Self, ScoutError> {
        dotenvy::dotenv().ok();

        let stats_endpoint =
            env::var("CSC_STATS_ENDPOINT").unwrap_or_else(|_| DEFAULT_STATS_ENDPOINT.to_string());
        let core_endpoint =
            env::var("CSC_CORE_ENDPOINT").unwrap_or_else(|_| DEFAULT_CORE_ENDPOINT.to_string());

        let season = match env::var("CSC_SEASON") {
            Ok(raw) => parse_season(&raw)?,
            Err(_) => DEFAULT_SEASON,
        };

        let demo_dir = env::var("CSC_DEMO_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_demo_dir());

        let buy_strategy = match env::var("CSC_BUY_STRATEGY") {
            Ok(raw) => raw.parse()?,
            Err(_) => BuyTypeStrategy::default(),
        };

        Ok(Config {
            stats_endpoint,
            core_endpoint,
            season,
            demo_dir,
            buy_strategy,
        })
    }
}

pub fn parse_season(raw: &str) -> Result<u32, ScoutError> {
    raw.trim()
        .parse()
        .map_err(|_| ScoutError::Config(format!("CSC_SEASON must be a number, got '{}'", raw)))
}

fn default_demo_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".csc_scout")
        .join("demos")
}
