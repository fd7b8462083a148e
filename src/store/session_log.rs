use anyhow::Result;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::models::session::SessionRecord;

/// Returns the first candidate path that exists on disk, in order.
pub fn find_sessions_log(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|path| path.exists()).cloned()
}

/// Reads a sessions log line by line. Blank lines are skipped and malformed
/// lines are dropped with a debug log entry; a corrupt line never aborts the
/// load.
pub fn load_sessions(path: &Path) -> Result<Vec<SessionRecord>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<SessionRecord>(trimmed) {
            Ok(record) => records.push(record),
            Err(e) => {
                log::debug!(
                    "Skipping malformed line {} in {}: {}",
                    index + 1,
                    path.display(),
                    e
                );
            }
        }
    }
    Ok(records)
}

/// Replaces the sessions log with fresh records, one JSON object per line.
/// The parent directory is created if missing and an existing file is
/// deleted first, never appended to.
pub fn write_sessions(path: &Path, records: &[SessionRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    if path.exists() {
        fs::remove_file(path)?;
    }
    let mut file = File::create(path)?;
    for record in records {
        let line = serde_json::to_string(record)?;
        writeln!(file, "{}", line)?;
    }
    Ok(())
}
