//! Reads decoded match records from disk.

use crate::error::ScoutError;
use crate::model::MatchRecord;
use indicatif::ProgressBar;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const DEMO_EXTENSION: &str = "json";

/// Every decoded demo file in `dir`, sorted by file name.
pub fn demo_files(dir: &Path) -> Result<Vec<PathBuf>, ScoutError> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(DEMO_EXTENSION) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!(dir = %dir.display(), found = files.len(), "collected demo files");
    Ok(files)
}

/// The subset of [`demo_files`] whose name contains `team` with spaces removed.
pub fn demo_files_for_team(dir: &Path, team: &str) -> Result<Vec<PathBuf>, ScoutError> {
    let needle: String = team.split_whitespace().collect();

    Ok(demo_files(dir)?
        .into_iter()
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.contains(&needle))
                .unwrap_or(false)
        })
        .collect())
}

pub fn load_match(path: &Path) -> Result<MatchRecord, ScoutError> {
    let raw = fs::read_to_string(path)?;
    let mut record: MatchRecord = serde_json::from_str(&raw)
        .map_err(|e| ScoutError::Decode(format!("{}: {}", path.display(), e)))?;

    if record.match_id.is_empty() {
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            record.match_id = stem.to_string();
        }
    }

    Ok(record)
}

pub fn load_matches(paths: &[PathBuf]) -> Result<Vec<MatchRecord>, ScoutError> {
    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_message("Loading match records");

    let mut matches = Vec::with_capacity(paths.len());
    for path in paths {
        matches.push(load_match(path)?);
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(matches)
}
