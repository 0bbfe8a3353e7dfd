// ABOUTME: CSV persistence for extraction results.
// ABOUTME: Writes one ArticleRecord as a header-plus-row CSV file named from the current timestamp.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::pipeline::ArticleRecord;

/// Errors produced while persisting a record.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Build the deterministic file name for a record written at `timestamp`.
pub fn csv_file_name(timestamp: DateTime<Local>) -> String {
    format!("noticia_{}.csv", timestamp.format("%Y%m%d_%H%M%S"))
}

/// Write `record` as a single-row CSV file under `dir`, named from the
/// current local time. Returns the path of the file written.
///
/// The header row comes from the record's serialization keys, so the
/// columns match the presentation mapping (URL, Título, Autor, ...).
pub fn write_csv(record: &ArticleRecord, dir: &Path) -> Result<PathBuf, StoreError> {
    write_csv_at(record, dir, Local::now())
}

/// Like [`write_csv`] but with an explicit timestamp, for deterministic tests.
pub fn write_csv_at(
    record: &ArticleRecord,
    dir: &Path,
    timestamp: DateTime<Local>,
) -> Result<PathBuf, StoreError> {
    let path = dir.join(csv_file_name(timestamp));
    let mut writer = csv::Writer::from_path(&path)?;
    writer.serialize(record)?;
    writer.flush()?;
    Ok(path)
}
