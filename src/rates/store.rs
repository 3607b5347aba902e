//! Owned lifecycle for the process-wide rate table
//!
//! The store starts on the built-in table, optionally seeded from a young
//! cached snapshot, and swaps in a freshly fetched table wholesale on each
//! successful refresh. Failures leave the current table untouched and only
//! move the status to `Offline`.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::cache::{self, CacheError};
use super::fetch::{fetch_live_rates, RateFetchError};
use super::table::RateTable;

/// Freshness of the rates currently served
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateStatus {
    /// Serving the built-in or cached table; no live fetch has succeeded
    Offline,
    /// A fetch is outstanding
    Loading,
    /// The table reflects the latest successful fetch
    Live,
}

/// Rate table plus refresh lifecycle
#[derive(Debug)]
pub struct RateStore {
    table: RateTable,
    status: RateStatus,
    cache_dir: Option<PathBuf>,
}

impl Default for RateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RateStore {
    /// Store on the built-in table, without snapshot persistence
    pub fn new() -> Self {
        Self {
            table: RateTable::default(),
            status: RateStatus::Offline,
            cache_dir: None,
        }
    }

    /// Store seeded from the snapshot under `dir` when one is young enough;
    /// successful refreshes persist back to the same directory.
    pub fn with_cache_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let table = match cache::load_cached(&dir) {
            Ok(table) => {
                log::debug!("seeded rates from cached snapshot");
                table
            }
            Err(CacheError::Io(err)) if err.kind() == ErrorKind::NotFound => RateTable::default(),
            Err(err) => {
                log::warn!("ignoring cached rates: {}", err);
                RateTable::default()
            }
        };
        Self {
            table,
            status: RateStatus::Offline,
            cache_dir: Some(dir),
        }
    }

    /// Table currently served
    pub fn table(&self) -> &RateTable {
        &self.table
    }

    pub fn status(&self) -> RateStatus {
        self.status
    }

    /// Convert against the current table. See [`RateTable::convert`].
    pub fn convert(&self, amount: f64, from: &str, to: &str) -> f64 {
        self.table.convert(amount, from, to)
    }

    /// Run one fetch-merge-persist cycle.
    ///
    /// The status reads `Loading` for the duration of the request; the
    /// table itself only changes once the fetch has succeeded.
    pub async fn refresh(&mut self) -> RateStatus {
        self.status = RateStatus::Loading;
        let outcome = fetch_live_rates().await;
        self.apply_fetch(outcome)
    }

    /// Apply a fetch outcome: on success, merge the payload over the known
    /// currency set, swap the table in whole, and persist a fresh snapshot;
    /// on failure, keep the current table and go `Offline`.
    pub fn apply_fetch(
        &mut self,
        outcome: Result<HashMap<String, f64>, RateFetchError>,
    ) -> RateStatus {
        match outcome {
            Ok(fetched) => {
                let next = self.table.merged_with_known(&fetched);
                if let Some(dir) = &self.cache_dir {
                    if let Err(err) = cache::persist(dir, &next) {
                        log::warn!("failed to persist rate snapshot: {}", err);
                    }
                }
                self.table = next;
                self.status = RateStatus::Live;
                log::info!("live exchange rates applied");
            }
            Err(err) => {
                log::warn!("rate fetch failed, keeping current table: {}", err);
                self.status = RateStatus::Offline;
            }
        }
        self.status
    }
}
