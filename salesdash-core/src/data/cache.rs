//! Process-lifetime dataset cache.
//!
//! The cleaned table is computed at most once per process and shared as an
//! `Arc`. There is no invalidation: the first successful load wins for the
//! rest of the process. A failed load leaves the cell empty.

use std::path::Path;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::{debug, info};

use super::{load_and_clean, DataError};
use crate::domain::CleanedTable;

/// A lazily initialised, write-once holder for the cleaned dataset.
#[derive(Debug)]
pub struct DatasetCache {
    cell: OnceCell<Arc<CleanedTable>>,
}

impl DatasetCache {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Return the cached table, loading it from `path` on first use.
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<CleanedTable>, DataError> {
        self.get_or_load_with(path, load_and_clean)
    }

    /// Same as [`get_or_load`](Self::get_or_load) with a custom loader.
    ///
    /// `loader` runs only if the cell is empty. Concurrent callers block on
    /// the initialisation barrier and observe the same result.
    pub fn get_or_load_with<F>(&self, path: &Path, loader: F) -> Result<Arc<CleanedTable>, DataError>
    where
        F: FnOnce(&Path) -> Result<CleanedTable, DataError>,
    {
        let table = self.cell.get_or_try_init(|| {
            info!(source = %path.display(), "loading dataset");
            loader(path).map(Arc::new)
        })?;

        if table.source() != path {
            return Err(DataError::CacheSourceMismatch {
                cached: table.source().to_path_buf(),
                requested: path.to_path_buf(),
            });
        }

        debug!(source = %path.display(), rows = table.len(), "dataset served from cache");
        Ok(Arc::clone(table))
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new()
    }
}

static DATASET: DatasetCache = DatasetCache::new();

/// Load the dataset through the process-wide cache.
pub fn load_cached(path: &Path) -> Result<Arc<CleanedTable>, DataError> {
    DATASET.get_or_load(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CleanStats, OrderRecord};
    use chrono::NaiveDate;
    use std::cell::Cell;
    use std::io::Write;

    fn one_row_table(path: &Path) -> CleanedTable {
        let rec = OrderRecord::new(
            NaiveDate::from_ymd_opt(2023, 1, 5).unwrap(),
            10.0,
            1.0,
            0.0,
            "East",
            "Tech",
        );
        CleanedTable::new(path, vec![rec], CleanStats { rows_read: 1, rows_dropped: 0 })
    }

    #[test]
    fn loader_runs_once() {
        let cache = DatasetCache::new();
        let calls = Cell::new(0);
        let path = Path::new("orders.csv");

        let first = cache
            .get_or_load_with(path, |p| {
                calls.set(calls.get() + 1);
                Ok(one_row_table(p))
            })
            .unwrap();
        let second = cache
            .get_or_load_with(path, |p| {
                calls.set(calls.get() + 1);
                Ok(one_row_table(p))
            })
            .unwrap();

        assert_eq!(calls.get(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn failed_load_leaves_cache_empty() {
        let cache = DatasetCache::new();
        let path = Path::new("orders.csv");

        let err = cache.get_or_load_with(path, |p| {
            Err(DataError::MissingColumn {
                column: "sales".into(),
                path: p.to_path_buf(),
            })
        });
        assert!(err.is_err());
        assert!(!cache.is_loaded());

        let table = cache.get_or_load_with(path, |p| Ok(one_row_table(p))).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn different_source_is_rejected() {
        let cache = DatasetCache::new();
        cache
            .get_or_load_with(Path::new("a.csv"), |p| Ok(one_row_table(p)))
            .unwrap();

        match cache.get_or_load_with(Path::new("b.csv"), |p| Ok(one_row_table(p))) {
            Err(DataError::CacheSourceMismatch { cached, requested }) => {
                assert_eq!(cached, Path::new("a.csv"));
                assert_eq!(requested, Path::new("b.csv"));
            }
            other => panic!("expected CacheSourceMismatch, got {other:?}"),
        }
    }

    #[test]
    fn cached_table_survives_file_removal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "order_date,sales,profit,discount,region,category").unwrap();
        writeln!(file, "2023-01-05,\"1,200\",100,0.1,East,Tech").unwrap();
        drop(file);

        let cache = DatasetCache::new();
        let first = cache.get_or_load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let second = cache.get_or_load(&path).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.records()[0].sales, 1200.0);
    }
}
