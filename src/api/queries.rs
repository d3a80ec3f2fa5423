//! GraphQL query text for the stats and core services.
//!
//! Names are embedded as JSON string literals, which GraphQL accepts verbatim, so quotes
//! inside team or player names cannot break out of the query. Tiers are enum values and go
//! in bare.

/// Franchise prefixes are upper case except for `dB`.
pub fn normalize_franchise(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    if upper == "DB" {
        "dB".to_string()
    } else {
        upper
    }
}

/// `contender` / `CONTENDER` -> `Contender`
pub fn normalize_tier(raw: &str) -> String {
    let raw = raw.trim();
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn quoted(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

pub const FRANCHISES_QUERY: &str = "query { franchises(active: true) { prefix teams { name tier { name } } } }";

pub fn team_players_query(team: &str) -> String {
    format!(
        "query {{ team(teamName: {}) {{ players {{ name type }} }} }}",
        quoted(team)
    )
}

pub fn team_id_query(team: &str) -> String {
    format!("query {{ team(teamName: {}) {{ id }} }}", quoted(team))
}

pub fn team_map_bans_query(season: u32, team_id: &str) -> String {
    format!(
        "query {{ matches(season: {}, teamId: {}) {{ lobby {{ mapBans {{ team {{ name id }} map number }} }} }} }}",
        season,
        quoted(team_id)
    )
}

const REGULATION: &str = "matchType: {equals: Regulation}, matchDay: {not: {equals: \"\"}}";

pub fn tier_results_query(season: u32, tier: &str) -> String {
    format!(
        "query {{ findManyMatch(where: {{season: {{equals: {}}}, tier: {{equals: {}}}, {}}}) {{ mapName teamStats {{ name score }} }} }}",
        season, tier, REGULATION
    )
}

pub fn team_results_query(season: u32, team: &str) -> String {
    format!(
        "query {{ findManyMatch(where: {{season: {{equals: {}}}, {}, teamStats: {{some: {{name: {{equals: {}}}}}}}}}) {{ mapName teamStats {{ name score }} }} }}",
        season,
        REGULATION,
        quoted(team)
    )
}

/// Side 4 is the whole-map line in the stats service.
pub fn player_map_ratings_query(season: u32, player: &str) -> String {
    let name = quoted(player);
    format!(
        "query {{ findManyMatch(where: {{season: {{equals: {}}}, {}, matchStats: {{some: {{name: {{equals: {}}}}}}}}}) {{ mapName matchStats(where: {{name: {{equals: {}}}, AND: {{side: {{equals: 4}}}}}}) {{ rating }} }} }}",
        season, REGULATION, name, name
    )
}

pub fn player_season_stats_query(season: u32, player: &str, keys: &[&str]) -> String {
    format!(
        "query {{ playerSeasonStats(name: {}, season: {}, matchType: \"Regulation\") {{ {} }} }}",
        quoted(player),
        season,
        keys.join(" ")
    )
}
