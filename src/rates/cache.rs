//! Persisted rate snapshot
//!
//! A single JSON record under a fixed file name holds the last fetched table
//! and its fetch timestamp. On startup the snapshot seeds the live table,
//! but only while it is younger than 24 hours and still quotes the pivot at
//! exactly 1.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::table::{RateTable, PIVOT_CURRENCY};

/// Fixed cache file name under the cache directory
pub const CACHE_FILE_NAME: &str = "exchange_rates_usd.json";

/// Snapshots older than this are ignored
pub const MAX_CACHE_AGE_MS: i64 = 24 * 60 * 60 * 1000;

/// Why a cached snapshot could not be used
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache record is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("cached rates are {age_ms} ms old, past the 24 hour limit")]
    Stale { age_ms: i64 },

    #[error("cached rates do not quote the pivot at exactly 1")]
    BadPivot,
}

/// On-disk cache record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateSnapshot {
    /// Fetch time, epoch milliseconds
    pub timestamp_ms: i64,
    /// Pivot-relative rates at fetch time
    pub rates: HashMap<String, f64>,
}

impl RateSnapshot {
    /// Snapshot the given table as of now.
    pub fn capture(table: &RateTable) -> Self {
        Self {
            timestamp_ms: Utc::now().timestamp_millis(),
            rates: table.rates().clone(),
        }
    }

    /// Milliseconds since the snapshot was taken
    pub fn age_ms(&self) -> i64 {
        Utc::now().timestamp_millis() - self.timestamp_ms
    }
}

/// Load the cached table from `dir`, rejecting stale or corrupt snapshots.
pub fn load_cached(dir: &Path) -> Result<RateTable, CacheError> {
    let raw = fs::read_to_string(dir.join(CACHE_FILE_NAME))?;
    let snapshot: RateSnapshot = serde_json::from_str(&raw)?;

    let age_ms = snapshot.age_ms();
    if age_ms >= MAX_CACHE_AGE_MS {
        return Err(CacheError::Stale { age_ms });
    }
    if snapshot.rates.get(PIVOT_CURRENCY) != Some(&1.0) {
        return Err(CacheError::BadPivot);
    }

    Ok(RateTable::from_rates(snapshot.rates))
}

/// Persist the table to `dir` with a fresh timestamp.
pub fn persist(dir: &Path, table: &RateTable) -> Result<(), CacheError> {
    fs::create_dir_all(dir)?;
    let snapshot = RateSnapshot::capture(table);
    let raw = serde_json::to_string(&snapshot)?;
    fs::write(dir.join(CACHE_FILE_NAME), raw)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_snapshot(dir: &Path, snapshot: &RateSnapshot) {
        fs::write(
            dir.join(CACHE_FILE_NAME),
            serde_json::to_string(snapshot).unwrap(),
        )
        .unwrap();
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let table = RateTable::default();

        persist(dir.path(), &table).unwrap();
        let restored = load_cached(dir.path()).unwrap();

        assert_eq!(restored, table);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_cached(dir.path()),
            Err(CacheError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound
        ));
    }

    #[test]
    fn test_stale_snapshot_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut snapshot = RateSnapshot::capture(&RateTable::default());
        snapshot.timestamp_ms -= MAX_CACHE_AGE_MS + 1;
        write_snapshot(dir.path(), &snapshot);

        assert!(matches!(
            load_cached(dir.path()),
            Err(CacheError::Stale { .. })
        ));
    }

    #[test]
    fn test_bad_pivot_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut snapshot = RateSnapshot::capture(&RateTable::default());
        snapshot.rates.insert(PIVOT_CURRENCY.to_string(), 1.02);
        write_snapshot(dir.path(), &snapshot);

        assert!(matches!(load_cached(dir.path()), Err(CacheError::BadPivot)));
    }

    #[test]
    fn test_corrupt_record_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CACHE_FILE_NAME), "not json").unwrap();

        assert!(matches!(load_cached(dir.path()), Err(CacheError::Parse(_))));
    }
}
