//! Flat-file CSV archive of scored messages, grouped by ticker and category.
//!
//! Layout under the data directory is one subdirectory per ticker, holding
//! one append-only CSV per sentiment category plus timestamped snapshot
//! files subject to retention. File names are deterministic so downstream
//! readers can glob by ticker or category.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use thiserror::Error;

use stocksent_core::ScoredMessage;

/// Timestamp rendering used in CSV rows.
const ROW_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp format embedded in retention-swept file names.
const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

const CSV_HEADER: [&str; 7] = [
    "ticker",
    "platform",
    "text",
    "timestamp",
    "score_a",
    "score_b",
    "category",
];

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("archive io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv write error: {0}")]
    Csv(#[from] csv::Error),
}

/// A group write that failed; the other groups were still attempted.
#[derive(Debug)]
pub struct FailedGroup {
    pub path: PathBuf,
    pub error: ArchiveError,
}

fn category_file(data_dir: &Path, ticker: &str, category: &str) -> PathBuf {
    data_dir
        .join(ticker)
        .join(format!("{ticker}_{category}_sentiment.csv"))
}

fn append_group(path: &Path, rows: &[&ScoredMessage]) -> Result<(), ArchiveError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let existed = path.exists();
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);

    if !existed {
        writer.write_record(CSV_HEADER)?;
    }
    for m in rows {
        writer.write_record([
            m.ticker.as_str(),
            m.platform.as_str(),
            m.text.as_str(),
            &m.timestamp.format(ROW_TIMESTAMP_FORMAT).to_string(),
            &m.lexicon_score.to_string(),
            &m.vader_score.to_string(),
            m.category.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Append scored messages to their per-(ticker, category) CSV files.
///
/// Each group gets its own file, created with a header when absent. Groups
/// are written independently and best-effort: a failure on one file is
/// logged and returned, but never blocks the remaining groups.
pub fn append_by_category(data_dir: &Path, messages: &[ScoredMessage]) -> Vec<FailedGroup> {
    let mut groups: BTreeMap<PathBuf, Vec<&ScoredMessage>> = BTreeMap::new();
    for m in messages {
        let path = category_file(data_dir, &m.ticker, m.category.as_str());
        groups.entry(path).or_default().push(m);
    }

    let mut failures = Vec::new();
    for (path, rows) in groups {
        match append_group(&path, &rows) {
            Ok(()) => {
                tracing::info!(path = %path.display(), rows = rows.len(), "appended rows");
            }
            Err(error) => {
                tracing::error!(path = %path.display(), error = %error, "group append failed");
                failures.push(FailedGroup { path, error });
            }
        }
    }
    failures
}

/// Parse the `_YYYYMMDD_HHMMSS` suffix embedded in a snapshot file stem.
fn embedded_timestamp(stem: &str) -> Option<NaiveDateTime> {
    let parts: Vec<&str> = stem.split('_').collect();
    if parts.len() < 2 {
        return None;
    }
    let candidate = format!("{}_{}", parts[parts.len() - 2], parts[parts.len() - 1]);
    NaiveDateTime::parse_from_str(&candidate, FILE_TIMESTAMP_FORMAT).ok()
}

/// Delete a ticker's snapshot CSVs older than the retention window.
///
/// Only files matching `{ticker}_sentiment_*.csv` are considered. A file
/// whose name does not parse as a timestamp is skipped with a warning,
/// never deleted. Returns the number of files removed.
///
/// # Errors
///
/// Returns [`ArchiveError::Io`] only if the ticker directory cannot be
/// read; per-file delete failures are logged and skipped.
pub fn sweep_expired(
    data_dir: &Path,
    ticker: &str,
    retention_days: i64,
) -> Result<usize, ArchiveError> {
    let ticker_dir = data_dir.join(ticker);
    if !ticker_dir.exists() {
        return Ok(0);
    }
    let cutoff = Local::now().naive_local() - chrono::Duration::days(retention_days);
    let prefix = format!("{ticker}_sentiment_");

    let mut removed = 0;
    for entry in fs::read_dir(&ticker_dir)? {
        let entry = entry?;
        let path = entry.path();
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let is_csv = path.extension().is_some_and(|e| e == "csv");
        if !is_csv || !stem.starts_with(&prefix) {
            continue;
        }
        match embedded_timestamp(stem) {
            Some(file_time) if file_time < cutoff => match fs::remove_file(&path) {
                Ok(()) => {
                    tracing::info!(path = %path.display(), "deleted expired sentiment file");
                    removed += 1;
                }
                Err(error) => {
                    tracing::warn!(path = %path.display(), error = %error, "delete failed");
                }
            },
            Some(_) => {}
            None => {
                tracing::warn!(path = %path.display(), "unparseable file timestamp, skipping");
            }
        }
    }
    Ok(removed)
}
