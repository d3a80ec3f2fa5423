//! Gathers a franchise team's season from the league services into a [`SummaryReport`].

use crate::analysis::aggregator::Aggregator;
use crate::analysis::classifier::BuyTypeStrategy;
use crate::analysis::player_stats::{PlayerStatsTracker, SeasonStatLine};
use crate::api::LeagueSource;
use crate::display::report::{StatBlock, SummaryKind, SummaryReport};
use crate::error::ScoutError;
use tracing::{info, warn};

/// Gathers the sections of `kind`. A player whose season lookup fails is left out of that block only.
pub fn gather_summary(
    source: &dyn LeagueSource,
    franchise: &str,
    tier: &str,
    season: u32,
    kind: SummaryKind,
) -> Result<SummaryReport, ScoutError> {
    let team = source.resolve_team(franchise, tier)?;
    info!(team = %team.name, tier = %team.tier, season, "resolved team");

    // Scorelines carry no round detail, so the buy strategy is never consulted.
    let mut aggregator = Aggregator::new(Some(team.name.as_str()), BuyTypeStrategy::default());
    for result in source.tier_results(&team.tier)? {
        aggregator.add_result(&result)?;
    }
    for ban in source.team_bans(&team.name)? {
        aggregator.add_ban(&ban);
    }

    let roster = source.roster(&team.name)?;
    let mut players = PlayerStatsTracker::new(&roster);
    let mut stat_blocks: Vec<StatBlock> = kind
        .stat_sets()
        .into_iter()
        .map(|set| StatBlock {
            set,
            lines: Vec::new(),
        })
        .collect();

    for entry in roster.iter().filter(|e| e.status.is_active()) {
        for rating in source.player_map_ratings(&entry.name)? {
            players.record(&rating);
        }

        for block in stat_blocks.iter_mut() {
            match source.player_season_stats(&entry.name, &block.set.keys()) {
                Ok(values) => block.lines.push(SeasonStatLine {
                    player: entry.name.clone(),
                    substitute: entry.is_substitute(),
                    values,
                }),
                Err(e @ (ScoutError::Query(_) | ScoutError::NoData(_))) => {
                    warn!(player = %entry.name, block = block.set.title, error = %e, "skipping season stats");
                }
                Err(e) => return Err(e),
            }
        }
    }

    Ok(SummaryReport {
        team: team.name,
        season,
        kind,
        aggregates: aggregator.finish(),
        players,
        stat_blocks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::report::{summary_messages, MISC_STATS};
    use crate::model::{
        BanRecord, MatchResult, PlayerMapRating, ResolvedTeam, RosterEntry, RosterStatus,
    };
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    struct FakeLeague;

    impl LeagueSource for FakeLeague {
        fn resolve_team(&self, franchise: &str, tier: &str) -> Result<ResolvedTeam, ScoutError> {
            if franchise == "ALP" && tier == "Contender" {
                Ok(ResolvedTeam {
                    name: "Alpha".to_string(),
                    tier: "Contender".to_string(),
                })
            } else {
                Err(ScoutError::InvalidTeam {
                    franchise: franchise.to_string(),
                    tier: tier.to_string(),
                })
            }
        }

        fn roster(&self, _team: &str) -> Result<Vec<RosterEntry>, ScoutError> {
            Ok(vec![
                RosterEntry {
                    name: "Alex".to_string(),
                    status: RosterStatus::Temp,
                },
                RosterEntry {
                    name: "Blake".to_string(),
                    status: RosterStatus::Signed,
                },
                RosterEntry {
                    name: "Casey".to_string(),
                    status: RosterStatus::Inactive,
                },
            ])
        }

        fn tier_results(&self, _tier: &str) -> Result<Vec<MatchResult>, ScoutError> {
            Ok(vec![
                MatchResult::new("de_mirage", ("Alpha", 13), ("Bravo", 2)),
                MatchResult::new("de_nuke", ("Charlie", 9), ("Alpha", 13)),
                MatchResult::new("de_anubis", ("Alpha", 5), ("Delta", 13)),
                MatchResult::new("de_nuke", ("Bravo", 13), ("Delta", 11)),
            ])
        }

        fn team_bans(&self, _team: &str) -> Result<Vec<BanRecord>, ScoutError> {
            Ok(vec![
                BanRecord {
                    team: "Alpha".to_string(),
                    map: "de_vertigo".to_string(),
                    order: 1,
                },
                BanRecord {
                    team: "Bravo".to_string(),
                    map: "de_inferno".to_string(),
                    order: 2,
                },
            ])
        }

        fn player_map_ratings(&self, player: &str) -> Result<Vec<PlayerMapRating>, ScoutError> {
            Ok(vec![PlayerMapRating {
                player: player.to_string(),
                map_name: "de_nuke".to_string(),
                rating: if player == "Alex" { 1.234 } else { 0.9 },
            }])
        }

        fn player_season_stats(&self, player: &str, keys: &[&str]) -> Result<Vec<f64>, ScoutError> {
            if player == "Blake" {
                return Err(ScoutError::Query("player not found".to_string()));
            }
            if player == "Alex" && keys.contains(&"clutchR") {
                return Err(ScoutError::NoData("Alex has no clutchR value".to_string()));
            }
            Ok(keys.iter().map(|_| 1.0).collect())
        }
    }

    #[test]
    #[traced_test]
    fn gathers_every_section() {
        let report = gather_summary(&FakeLeague, "ALP", "Contender", 14, SummaryKind::Basic).unwrap();

        assert_eq!(report.team, "Alpha");
        let alpha = report.aggregates.teams.get("Alpha").unwrap();
        assert_eq!((alpha.wins, alpha.losses), (2, 1));
        assert_eq!(report.aggregates.maps.len(), 3);

        let bans = report.aggregates.bans.as_ref().unwrap();
        assert_eq!(bans.iter().count(), 1);

        let players: Vec<_> = report.players.players().map(|(n, _)| n.as_str()).collect();
        assert_eq!(players, vec!["Alex", "Blake"]);
        assert!((report.players.average("Alex", "de_nuke").unwrap() - 1.234).abs() < 1e-9);

        assert_eq!(report.stat_blocks.len(), 1);
        let misc = &report.stat_blocks[0];
        assert_eq!(misc.set, MISC_STATS);
        assert_eq!(misc.lines.len(), 1);
        assert_eq!(misc.lines[0].values.len(), MISC_STATS.columns.len());
        assert!(logs_contain("skipping season stats"));

        let messages = summary_messages(&report).unwrap();
        assert_eq!(messages.len(), 1);
        let message = &messages[0];
        assert!(message.contains("Alex (S)       1.23      \n"));
        assert!(message.contains("Vertigo   1         1.00      \n"));
    }

    #[test]
    #[traced_test]
    fn advanced_gathers_every_block() {
        let report = gather_summary(&FakeLeague, "ALP", "Contender", 14, SummaryKind::Advanced).unwrap();
        let rows: Vec<_> = report
            .stat_blocks
            .iter()
            .map(|b| (b.set.title, b.lines.len()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("Fragging Stats", 1),
                ("Entry Stats", 1),
                ("Utility Stats", 1),
                ("Awp Stats", 1),
                ("Clutch Stats", 0),
            ]
        );
        assert!(logs_contain("Clutch Stats"));

        let messages = summary_messages(&report).unwrap();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("Fragging Stats: \n"));
        assert!(messages[1].starts_with("```Awp Stats: \n"));
        assert!(messages[1].contains("Alex (S)      1.00      1.00      1.00      \n"));
    }

    #[test]
    fn unknown_team_reports_single_message() {
        let err = gather_summary(&FakeLeague, "ZZZ", "Premier", 14, SummaryKind::Basic).unwrap_err();
        assert_eq!(err.to_string(), "Invalid Team and / or Tier Name");
    }
}
