//! Data loading: CSV ingest, field coercion, cleaning and the dataset cache.

pub mod cache;
pub mod clean;
pub mod ingest;
pub mod parse;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{CleanStats, CleanedTable};

pub use cache::{load_cached, DatasetCache};
pub use ingest::{RawOrderRow, REQUIRED_COLUMNS};

/// Errors from loading the source dataset. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("missing required column '{column}' in {}", path.display())]
    MissingColumn { column: String, path: PathBuf },

    #[error(
        "dataset already loaded from {} for this process; cannot switch to {}",
        cached.display(),
        requested.display()
    )]
    CacheSourceMismatch { cached: PathBuf, requested: PathBuf },
}

/// Read and clean the dataset at `path`.
pub fn load_and_clean(path: &Path) -> Result<CleanedTable, DataError> {
    let file = File::open(path).map_err(|e| DataError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    clean_reader(path, BufReader::new(file))
}

/// Clean CSV content from any reader; `source` is only used for reporting.
pub fn clean_reader<R: Read>(source: &Path, reader: R) -> Result<CleanedTable, DataError> {
    let mut records = Vec::new();
    let rows_read = ingest::read_rows(source, reader, |row| {
        if let Some(record) = clean::clean_row(row) {
            records.push(record);
        }
    })?;

    let stats = CleanStats {
        rows_read,
        rows_dropped: rows_read - records.len(),
    };
    info!(
        source = %source.display(),
        rows_read = stats.rows_read,
        rows_kept = stats.rows_kept(),
        rows_dropped = stats.rows_dropped,
        "dataset cleaned"
    );
    if stats.rows_dropped > 0 {
        debug!(dropped = stats.rows_dropped, "rows with missing or unparseable required fields dropped");
    }

    Ok(CleanedTable::new(source, records, stats))
}
