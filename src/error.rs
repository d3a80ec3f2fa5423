use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("{team} did not play in round {round}")]
    NotParticipant { team: String, round: u32 },

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    #[error("No data: {0}")]
    NoData(String),

    #[error("Failed to decode match record: {0}")]
    Decode(String),

    #[error("Invalid Team and / or Tier Name")]
    InvalidTeam { franchise: String, tier: String },

    #[error("Rate limit exceeded, please try again later")]
    RateLimited,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Stats service rejected the query: {0}")]
    Query(String),

    #[error("JSON parsing error: {0}")]
    Json(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScoutError {
    /// Rows whose ratio has no data are dropped from tables instead of failing the report.
    pub fn is_no_data(&self) -> bool {
        matches!(self, ScoutError::NoData(_))
    }
}

pub type Result<T, E = ScoutError> = std::result::Result<T, E>;
