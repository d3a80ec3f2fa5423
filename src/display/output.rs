use crate::model::MatchRecord;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

use super::table::shorten_map_name;

#[derive(Tabled)]
struct MatchRow {
    #[tabled(rename = "#")]
    number: String,
    map: String,
    opponent: String,
    score: String,
    rounds: String,
}

/// One overview row for `record` as seen by `team`.
fn match_row(number: usize, record: &MatchRecord, team: &str) -> MatchRow {
    let (opponent, score) = match record.last_round() {
        Some(last) => match last.side_of(team) {
            Some(side) => {
                let own = last.end_score(side);
                let other = last.end_score(side.opposite());
                let score = if own > other {
                    format!("{}-{}", own, other).green().to_string()
                } else {
                    format!("{}-{}", own, other).red().to_string()
                };
                (last.team_on(side.opposite()).to_string(), score)
            }
            None => (
                format!("{} vs {}", last.ct_team, last.t_team),
                format!("{}-{}", last.end_ct_score, last.end_t_score),
            ),
        },
        None => ("-".to_string(), "-".to_string()),
    };

    MatchRow {
        number: number.to_string(),
        map: shorten_map_name(&record.map_name),
        opponent,
        score,
        rounds: record.game_rounds.len().to_string(),
    }
}

pub fn display_match_overview(matches: &[MatchRecord], team: &str) {
    println!(
        "\n{}",
        format!("📊 {} - {} matches loaded", team, matches.len())
            .bold()
            .cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());

    if matches.is_empty() {
        println!("{}", "No matches found for this team".yellow());
        return;
    }

    let rows: Vec<_> = matches
        .iter()
        .enumerate()
        .map(|(idx, record)| match_row(idx + 1, record, team))
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_report(report: &str) {
    println!("{}", report);
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
