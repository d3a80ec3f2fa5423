use csc_scout::display::report::scouting_report;
use csc_scout::model::{BuyType, MatchRecord, Side};
use csc_scout::{aggregate, league_round_totals, loader, BuyTypeStrategy, ScoutError};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

fn player(name: &str, x: f64) -> Value {
    json!({ "name": name, "x": x, "y": 0.0, "z": 0.0 })
}

fn grenade(thrower: &str, side: &str, kind: &str, seconds: f64) -> Value {
    json!({
        "throwerName": thrower,
        "throwerSide": side,
        "grenadeType": kind,
        "throwSeconds": seconds,
        "throwerX": 1.0, "throwerY": 2.0, "throwerZ": 0.0,
        "grenadeX": 10.0, "grenadeY": 20.0, "grenadeZ": 0.0
    })
}

fn round(num: u32, ct: &str, t: &str, winner: &str, score: (u32, u32), buys: (&str, &str)) -> Value {
    let winning_team = if winner == "CT" { ct } else { t };
    json!({
        "roundNum": num,
        "ctTeam": ct,
        "tTeam": t,
        "freezeTimeEndTick": 1000,
        "winningSide": winner,
        "winningTeam": winning_team,
        "endCTScore": score.0,
        "endTScore": score.1,
        "ctBuyType": buys.0,
        "tBuyType": buys.1,
        "frames": [],
        "grenades": []
    })
}

/// Alpha on CT against Bravo on Mirage, and on T against Charlie on Nuke. Alpha wins both 2-1.
/// Bravo also beats Delta 2-1 on Inferno.
fn write_demos(dir: &TempDir) {
    let mut pistol = round(1, "Alpha", "Bravo", "CT", (1, 0), ("Pistol", "Pistol"));
    pistol["frames"] = json!([
        { "tick": 1640, "ct": { "players": [player("a1", 1.0)] }, "t": { "players": null } },
        { "tick": 1832, "ct": { "players": [player("a1", 5.0), player("a2", 6.0)] }, "t": { "players": [player("b1", 7.0)] } }
    ]);
    pistol["grenades"] = json!([
        grenade("a1", "CT", "Smoke Grenade", 4.0),
        grenade("a2", "CT", "Flashbang", 13.0),
        grenade("b1", "T", "Molotov", 3.0)
    ]);

    let mirage = json!({
        "mapName": "de_mirage",
        "tickRate": 64,
        "gameRounds": [
            pistol,
            round(2, "Alpha", "Bravo", "T", (1, 1), ("Semi Buy", "Full Eco")),
            round(3, "Alpha", "Bravo", "CT", (2, 1), ("Full Buy", "Full Buy")),
        ]
    });

    let nuke = json!({
        "mapName": "de_nuke",
        "tickRate": 64,
        "gameRounds": [
            round(1, "Charlie", "Alpha", "T", (0, 1), ("Pistol", "Pistol")),
            round(2, "Charlie", "Alpha", "CT", (1, 1), ("Full Buy", "Full Buy")),
            round(3, "Charlie", "Alpha", "T", (1, 2), ("Full Buy", "Semi Eco")),
        ]
    });

    // Bravo's other game, which the focal team's file list never picks up.
    let inferno = json!({
        "mapName": "de_inferno",
        "tickRate": 64,
        "gameRounds": [
            round(1, "Bravo", "Delta", "CT", (1, 0), ("Pistol", "Pistol")),
            round(2, "Bravo", "Delta", "T", (1, 1), ("Full Buy", "Semi Buy")),
            round(3, "Bravo", "Delta", "CT", (2, 1), ("Full Buy", "Full Buy")),
        ]
    });

    for (name, doc) in [
        ("w2_Charlie_vs_Alpha.json", nuke),
        ("w1_Alpha_vs_Bravo.json", mirage),
        ("w3_Bravo_vs_Delta.json", inferno),
    ] {
        fs::write(dir.path().join(name), serde_json::to_string_pretty(&doc).unwrap()).unwrap();
    }
}

fn load(dir: &TempDir) -> Vec<MatchRecord> {
    write_demos(dir);
    let files = loader::demo_files_for_team(dir.path(), "Alpha").unwrap();
    loader::load_matches(&files).unwrap()
}

#[test]
fn report_from_demo_files() {
    let dir = TempDir::new().unwrap();
    let matches = load(&dir);
    let aggregates = aggregate(&matches, Some("Alpha"), BuyTypeStrategy::Label).unwrap();

    let everything = loader::load_matches(&loader::demo_files(dir.path()).unwrap()).unwrap();
    assert_eq!(everything.len(), 3);
    let league = league_round_totals(&everything).unwrap();

    assert_eq!(
        scouting_report(&aggregates, &league).unwrap(),
        "## Alpha\n\
         **2-0**    *2-0-0*      0.67 RWP\n\
         ```Team Map Stats: \n\
         \x20         Wins      Losses    RWP       Avg Opp Rwp\n\
         Mirage    1         0         0.67      0.50      \n\
         Nuke      1         0         0.67      0.33      \n\
         \n\
         Opponents:\n\
         Mirage: Bravo (2-1)\n\
         Nuke: Charlie (2-1)\n\
         ```"
    );
}

#[test]
fn setups_are_sampled_per_side_and_buy() {
    let dir = TempDir::new().unwrap();
    let matches = load(&dir);
    let aggregates = aggregate(&matches, Some("Alpha"), BuyTypeStrategy::Label).unwrap();

    let pistol = aggregates
        .utility
        .cell("de_mirage", Side::Defense, BuyType::Pistol)
        .unwrap();
    let positions: Vec<_> = pistol
        .positions
        .iter()
        .map(|(name, seen)| (name.as_str(), seen[0].x))
        .collect();
    assert_eq!(positions, vec![("a1", 5.0), ("a2", 6.0)]);

    let thrown: Vec<_> = pistol.grenades.keys().map(String::as_str).collect();
    assert_eq!(thrown, vec!["a1"]);

    // Rounds without frames still fill their cell with nothing.
    let semi_buy = aggregates
        .utility
        .cell("de_mirage", Side::Defense, BuyType::SemiBuy)
        .unwrap();
    assert_eq!(semi_buy.sample_count(), 0);
    assert!(aggregates
        .utility
        .cell("de_nuke", Side::Attack, BuyType::SemiEco)
        .is_some());
}

#[test]
fn reruns_are_identical() {
    let dir = TempDir::new().unwrap();
    let matches = load(&dir);
    let mut reversed = matches.clone();
    reversed.reverse();

    let first = aggregate(&matches, Some("Alpha"), BuyTypeStrategy::Label).unwrap();
    let second = aggregate(&reversed, Some("Alpha"), BuyTypeStrategy::Label).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        scouting_report(&first, &first.teams).unwrap(),
        scouting_report(&second, &second.teams).unwrap()
    );
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn equipment_strategy_needs_equipment_values() {
    let dir = TempDir::new().unwrap();
    let matches = load(&dir);

    let err = aggregate(&matches, Some("Alpha"), BuyTypeStrategy::EquipmentValue).unwrap_err();
    assert!(matches!(err, ScoutError::Decode(_)));
}

#[test]
fn export_nests_map_side_and_buy() {
    let dir = TempDir::new().unwrap();
    let matches = load(&dir);
    let aggregates = aggregate(&matches, Some("Alpha"), BuyTypeStrategy::Label).unwrap();

    let exported = serde_json::to_value(&aggregates).unwrap();
    let cell = &exported["utility"]["maps"]["de_mirage"]["sides"]["CT"]["Pistol"];
    assert_eq!(cell["positions"]["a2"][0]["x"], json!(6.0));
    assert_eq!(cell["grenades"]["a1"][0]["grenadeType"], json!("Smoke Grenade"));
    assert_eq!(exported["maps"]["de_nuke"]["opponents"][0]["name"], json!("Charlie"));
}
