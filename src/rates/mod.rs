//! Currency conversion over a pivot-relative rate table
//!
//! Conversion itself is pure table arithmetic. The table starts from a
//! built-in snapshot, may be seeded from a cached snapshot younger than 24
//! hours, and is replaced wholesale by each successful live fetch.

mod cache;
mod fetch;
mod store;
mod table;

pub use cache::{load_cached, persist, CacheError, RateSnapshot, CACHE_FILE_NAME, MAX_CACHE_AGE_MS};
pub use fetch::{fetch_live_rates, parse_rates, RateFetchError, RATES_ENDPOINT};
pub use store::{RateStatus, RateStore};
pub use table::{RateTable, PIVOT_CURRENCY, SUPPORTED_CURRENCIES};
