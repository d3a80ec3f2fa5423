use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use csc_scout::analysis::bans::BanTracker;
use csc_scout::api::client::StatsApiClient;
use csc_scout::api::LeagueSource;
use csc_scout::display::output::{display_error, display_info, display_match_overview, display_report, display_success};
use csc_scout::display::report::{ban_stats, scouting_report, summary_messages, SummaryKind};
use csc_scout::{
    aggregate, league_round_totals, loader, logging, summary, Aggregates, BuyTypeStrategy, Config,
    ScoutError, WithFallback,
};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "CSC Scout")]
#[command(about = "Scouting reports for CSC teams from demos and league stats", long_about = None)]
struct Args {
    /// Season to report on (default: CSC_SEASON or 14)
    #[arg(short, long, global = true)]
    season: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a report from decoded demo files of one team
    Scout {
        /// Team name as it appears in the demos
        team: String,

        /// Directory of decoded match JSON (default: CSC_DEMO_DIR)
        #[arg(short, long)]
        demos: Option<PathBuf>,

        /// Buy type source: label or equipment
        #[arg(short, long)]
        buy_strategy: Option<BuyTypeStrategy>,

        /// Ask the stats service for opponents missing from the demos
        #[arg(long)]
        remote_opponents: bool,

        /// Write positions, grenades and tallies as JSON
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Season summary for a franchise team from the league services
    Summary {
        /// Franchise prefix
        franchise: String,

        /// Tier name (Recruit, Prospect, Contender, Challenger, Elite, Premier)
        tier: String,

        /// Fragging, entry, utility, awp and clutch tables instead of misc stats
        #[arg(short, long)]
        advanced: bool,
    },

    /// Map ban tendencies of a franchise team
    Bans {
        franchise: String,
        tier: String,
    },
}

#[derive(Serialize)]
struct Export<'a> {
    generated_at: DateTime<Utc>,
    team: &'a str,
    aggregates: &'a Aggregates,
}

fn main() {
    logging::init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = Config::from_env()?;
    if let Some(season) = args.season {
        config.season = season;
    }

    match args.command {
        Command::Scout {
            team,
            demos,
            buy_strategy,
            remote_opponents,
            export,
        } => {
            if let Some(dir) = demos {
                config.demo_dir = dir;
            }
            if let Some(strategy) = buy_strategy {
                config.buy_strategy = strategy;
            }
            scout(&config, &team, remote_opponents, export.as_deref())
        }
        Command::Summary {
            franchise,
            tier,
            advanced,
        } => {
            let kind = if advanced { SummaryKind::Advanced } else { SummaryKind::Basic };
            league_summary(&config, &franchise, &tier, kind)
        }
        Command::Bans { franchise, tier } => bans(&config, &franchise, &tier),
    }
}

fn scout(config: &Config, team: &str, remote_opponents: bool, export: Option<&Path>) -> Result<()> {
    display_info(&format!("Looking for {} demos in {}", team, config.demo_dir.display()));
    let files = loader::demo_files_for_team(&config.demo_dir, team)
        .with_context(|| format!("reading demo directory {}", config.demo_dir.display()))?;

    if files.is_empty() {
        display_info("No demo files matched this team");
        return Ok(());
    }

    let matches = loader::load_matches(&files)?;
    display_success(&format!("Loaded {} matches", matches.len()));
    display_match_overview(&matches, team);

    let aggregates = aggregate(&matches, Some(team), config.buy_strategy)?;

    // Opponents are rated on every demo in the directory, not only their games against `team`.
    let all_files = loader::demo_files(&config.demo_dir)?;
    let local = if all_files.len() == files.len() {
        league_round_totals(&matches)?
    } else {
        league_round_totals(&loader::load_matches(&all_files)?)?
    };

    let report = if remote_opponents {
        let client = StatsApiClient::new(config);
        let source = WithFallback {
            primary: &client,
            fallback: &local,
        };
        scouting_report(&aggregates, &source)?
    } else {
        scouting_report(&aggregates, &local)?
    };
    display_report(&report);

    if let Some(path) = export {
        write_export(path, team, &aggregates)?;
        display_success(&format!("Exported aggregates to {}", path.display()));
    }

    Ok(())
}

fn write_export(path: &Path, team: &str, aggregates: &Aggregates) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let export = Export {
        generated_at: Utc::now(),
        team,
        aggregates,
    };
    serde_json::to_writer_pretty(BufWriter::new(file), &export)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn league_summary(config: &Config, franchise: &str, tier: &str, kind: SummaryKind) -> Result<()> {
    let client = StatsApiClient::new(config);
    display_info(&format!("Fetching season {} summary for {} {}", config.season, franchise, tier));

    match summary::gather_summary(&client, franchise, tier, config.season, kind) {
        Ok(report) => {
            for message in summary_messages(&report)? {
                display_report(&message);
            }
        }
        Err(e @ ScoutError::InvalidTeam { .. }) => display_report(&e.to_string()),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn bans(config: &Config, franchise: &str, tier: &str) -> Result<()> {
    let client = StatsApiClient::new(config);

    let team = match client.resolve_team(franchise, tier) {
        Ok(team) => team,
        Err(e @ ScoutError::InvalidTeam { .. }) => {
            display_report(&e.to_string());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let mut tracker = BanTracker::new(&team.name);
    for ban in client.team_bans(&team.name)? {
        tracker.record(&ban);
    }

    display_report(&format!("## {}\n{}", team.name, ban_stats(&tracker)));
    Ok(())
}
