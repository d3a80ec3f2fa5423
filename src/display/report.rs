//! Chat-ready report sections.
//!
//! Every function here is a pure rendering of aggregate data. Ratios whose denominator is
//! zero drop their row (or metric) instead of failing the report; any other error is passed
//! back to the caller.

use super::table::{
    format_ratio, player_label, shorten_map_name, TextTable, MAP_WIDTH, MISSING, PLAYER_WIDTH,
    STAT_PLAYER_WIDTH,
};
use crate::analysis::aggregator::Aggregates;
use crate::analysis::bans::BanTracker;
use crate::analysis::player_stats::{PlayerStatsTracker, SeasonStatLine};
use crate::analysis::team_stats::{MapOpponentStats, RoundTotalsSource, TeamMapStats};
use crate::error::ScoutError;
use tracing::debug;

/// A titled season stat table over fixed `(api key, column label)` pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatSet {
    pub title: &'static str,
    pub columns: &'static [(&'static str, &'static str)],
}

impl StatSet {
    pub fn keys(&self) -> Vec<&'static str> {
        self.columns.iter().map(|(key, _)| *key).collect()
    }
}

pub const MISC_STATS: StatSet = StatSet {
    title: "Misc Stats",
    columns: &[
        ("ef", "EF"),
        ("fAssists", "FAss"),
        ("util", "Util"),
        ("awpR", "Awp/r"),
        ("savesR", "Saves/r"),
        ("odr", "ODR"),
        ("odaR", "ODA/r"),
    ],
};

pub const FRAGGING_STATS: StatSet = StatSet {
    title: "Fragging Stats",
    columns: &[
        ("rating", "Rating"),
        ("adr", "ADR"),
        ("kast", "KAST"),
        ("hs", "HS%"),
        ("tradesR", "Trades/r"),
        ("multiR", "Multi/r"),
        ("adp", "ADP"),
    ],
};

pub const ENTRY_STATS: StatSet = StatSet {
    title: "Entry Stats",
    columns: &[("odaR", "ODA/r"), ("odr", "ODR"), ("tRatio", "TRatio")],
};

pub const UTILITY_STATS: StatSet = StatSet {
    title: "Utility Stats",
    columns: &[("util", "Util"), ("ef", "EF"), ("fAssists", "FAss"), ("utilDmg", "UD")],
};

pub const AWP_STATS: StatSet = StatSet {
    title: "Awp Stats",
    columns: &[("awpR", "Awp/r"), ("savesR", "Saves/r"), ("saveRate", "SRate")],
};

pub const CLUTCH_STATS: StatSet = StatSet {
    title: "Clutch Stats",
    columns: &[
        ("clutchR", "Clutch/r"),
        ("cl_1", "1v1"),
        ("cl_2", "1v2"),
        ("cl_3", "1v3"),
        ("cl_4", "1v4"),
        ("cl_5", "1v5"),
    ],
};

/// Blocks of the first advanced message; the rest go in the second.
pub const ADVANCED_FIRST: &[StatSet] = &[FRAGGING_STATS, ENTRY_STATS, UTILITY_STATS];
pub const ADVANCED_SECOND: &[StatSet] = &[AWP_STATS, CLUTCH_STATS];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SummaryKind {
    #[default]
    Basic,
    Advanced,
}

impl SummaryKind {
    pub fn stat_sets(self) -> Vec<StatSet> {
        match self {
            SummaryKind::Basic => vec![MISC_STATS],
            SummaryKind::Advanced => ADVANCED_FIRST.iter().chain(ADVANCED_SECOND).copied().collect(),
        }
    }
}

/// Season stat lines gathered for one [`StatSet`].
#[derive(Debug, Clone)]
pub struct StatBlock {
    pub set: StatSet,
    pub lines: Vec<SeasonStatLine>,
}

const CODE_FENCE: &str = "```";

/// Recovers `NoData` as `None`; everything else propagates.
fn optional(value: Result<f64, ScoutError>) -> Result<Option<f64>, ScoutError> {
    match value {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.is_no_data() => Ok(None),
        Err(e) => Err(e),
    }
}

/// `## Team` followed by `**W-L**    *easy-close-hard*      0.56 RWP`.
pub fn team_header(team: &str, stats: Option<&TeamMapStats>) -> String {
    let empty = TeamMapStats::default();
    let stats = stats.unwrap_or(&empty);

    let mut out = format!(
        "## {}\n**{}-{}**    *{}-{}-{}*",
        team, stats.wins, stats.losses, stats.easy_wins, stats.close, stats.hard_losses
    );
    if let Ok(rwp) = stats.rwp() {
        out.push_str(&format!("      {} RWP", format_ratio(rwp)));
    }
    out.push('\n');
    out
}

pub fn team_map_stats(aggregates: &Aggregates, source: &dyn RoundTotalsSource) -> Result<String, ScoutError> {
    let mut table =
        TextTable::with_leading(MAP_WIDTH, 4).header(["", "Wins", "Losses", "RWP", "Avg Opp Rwp"]);

    for (map, stats) in aggregates.maps.iter() {
        let rwp = optional(stats.rwp())?;
        let opp = optional(stats.avg_opponent_rwp(source))?;

        let (rwp, opp) = match (rwp, opp) {
            (Some(rwp), Some(opp)) => (rwp, opp),
            _ => {
                debug!(%map, "no round data, leaving map out of the table");
                continue;
            }
        };

        table.push_row([
            shorten_map_name(map),
            stats.wins.to_string(),
            stats.losses.to_string(),
            format_ratio(rwp),
            format_ratio(opp),
        ]);
    }

    Ok(format!("Team Map Stats: \n{}", table.render()))
}

pub fn ban_stats(bans: &BanTracker) -> String {
    let mut table = TextTable::with_leading(MAP_WIDTH, 2).header(["", "# Banned", "Avg Ban Round"]);

    for (map, stats) in bans.iter() {
        if let Ok(avg) = stats.avg_ban_round() {
            table.push_row([
                shorten_map_name(map),
                stats.times_banned().to_string(),
                format_ratio(avg),
            ]);
        }
    }

    format!("Map Ban Stats:\n{}", table.render())
}

pub fn player_map_stats(players: &PlayerStatsTracker) -> String {
    let maps = players.maps();

    let mut header = vec![String::new()];
    header.extend(maps.iter().map(|m| shorten_map_name(m)));
    let mut table = TextTable::with_leading(PLAYER_WIDTH, maps.len()).header(header);

    for (name, player) in players.players() {
        let mut row = vec![player_label(name, player.substitute)];
        for map in maps {
            let cell = match player.maps.get(map.as_str()).map(|sum| sum.average()) {
                Some(Ok(avg)) => format_ratio(avg),
                _ => MISSING.to_string(),
            };
            row.push(cell);
        }
        table.push_row(row);
    }

    format!("Player Map Stats:\n{}", table.render())
}

/// One row per player, one column per `(api key, label)` pair.
pub fn season_stats(columns: &[(&str, &str)], lines: &[SeasonStatLine]) -> String {
    let mut header = vec![String::new()];
    header.extend(columns.iter().map(|(_, label)| label.to_string()));
    let mut table = TextTable::with_leading(STAT_PLAYER_WIDTH, columns.len()).header(header);

    for line in lines {
        let mut row = vec![player_label(&line.player, line.substitute)];
        row.extend(line.values.iter().map(|v| format_ratio(*v)));
        table.push_row(row);
    }

    table.render()
}

/// `Title: ` followed by the block's season table.
pub fn stat_block(block: &StatBlock) -> String {
    format!("{}: \n{}", block.set.title, season_stats(block.set.columns, &block.lines))
}

/// `Bravo (13-9), Charlie (9-13)`
pub fn opponents_line(stats: &MapOpponentStats) -> String {
    stats
        .opponents
        .iter()
        .map(|o| o.with_score())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Report built from local match records.
pub fn scouting_report(aggregates: &Aggregates, source: &dyn RoundTotalsSource) -> Result<String, ScoutError> {
    let team = aggregates
        .focal_team
        .as_deref()
        .ok_or_else(|| ScoutError::NoData("no focal team to report on".to_string()))?;

    let mut out = team_header(team, aggregates.teams.get(team));
    out.push_str(CODE_FENCE);
    out.push_str(&team_map_stats(aggregates, source)?);

    out.push_str("\nOpponents:\n");
    for (map, stats) in aggregates.maps.iter() {
        if !stats.opponents.is_empty() {
            out.push_str(&format!("{}: {}\n", shorten_map_name(map), opponents_line(stats)));
        }
    }

    if let Some(bans) = &aggregates.bans {
        if bans.iter().next().is_some() {
            out.push('\n');
            out.push_str(&ban_stats(bans));
        }
    }

    out.push_str(CODE_FENCE);
    Ok(out)
}

/// Everything the league summary needs, already gathered.
#[derive(Debug, Clone)]
pub struct SummaryReport {
    pub team: String,
    pub season: u32,
    pub kind: SummaryKind,
    pub aggregates: Aggregates,
    pub players: PlayerStatsTracker,
    pub stat_blocks: Vec<StatBlock>,
}

/// Header, then the fenced team map, ban and player map tables. The fence is left open.
fn summary_sections(report: &SummaryReport) -> Result<String, ScoutError> {
    let aggregates = &report.aggregates;

    let mut out = team_header(&report.team, aggregates.teams.get(&report.team));
    out.push_str(CODE_FENCE);
    out.push_str(&team_map_stats(aggregates, &aggregates.teams)?);

    if let Some(bans) = &aggregates.bans {
        out.push('\n');
        out.push_str(&ban_stats(bans));
    }

    out.push('\n');
    out.push_str(&player_map_stats(&report.players));
    Ok(out)
}

fn push_blocks<'a>(out: &mut String, blocks: impl Iterator<Item = &'a StatBlock>) {
    for block in blocks {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&stat_block(block));
    }
}

pub fn summary_message(report: &SummaryReport) -> Result<String, ScoutError> {
    let mut out = summary_sections(report)?;
    push_blocks(&mut out, report.stat_blocks.iter());
    out.push_str(CODE_FENCE);
    out.push_str(&format!(
        "\n-# All stats are from season {}, roster information is current from core.",
        report.season
    ));

    Ok(out)
}

/// Two messages: the summary sections with fragging, entry and utility blocks, then awp and clutch.
pub fn advanced_summary_messages(report: &SummaryReport) -> Result<[String; 2], ScoutError> {
    let mut first = summary_sections(report)?;
    push_blocks(
        &mut first,
        report.stat_blocks.iter().filter(|b| ADVANCED_FIRST.contains(&b.set)),
    );
    first.push_str(CODE_FENCE);

    let mut second = String::new();
    push_blocks(
        &mut second,
        report.stat_blocks.iter().filter(|b| ADVANCED_SECOND.contains(&b.set)),
    );
    second = format!(
        "{}{}{}\n*Map and player stats are pulled from season {}, roster information is current from core.*",
        CODE_FENCE, second, CODE_FENCE, report.season
    );

    Ok([first, second])
}

/// The chat messages for `report.kind`, in send order.
pub fn summary_messages(report: &SummaryReport) -> Result<Vec<String>, ScoutError> {
    match report.kind {
        SummaryKind::Basic => Ok(vec![summary_message(report)?]),
        SummaryKind::Advanced => Ok(Vec::from(advanced_summary_messages(report)?)),
    }
}
