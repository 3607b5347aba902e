//! Pivot-relative exchange-rate table

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::numeric::finite_or;

/// Currency every rate in the table is expressed against; its own rate is 1.
pub const PIVOT_CURRENCY: &str = "USD";

/// Currencies quoted by the built-in table
pub const SUPPORTED_CURRENCIES: [&str; 7] = ["USD", "TRY", "EUR", "GBP", "AUD", "CAD", "JPY"];

/// Mapping from currency code to its rate against the pivot.
///
/// Tables are replaced wholesale on refresh, never mutated in place, so a
/// reader always sees a consistent snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    rates: HashMap<String, f64>,
}

impl Default for RateTable {
    /// Built-in fallback snapshot used before any live fetch succeeds
    fn default() -> Self {
        let rates = [
            ("USD", 1.0),
            ("EUR", 0.91),
            ("TRY", 34.0),
            ("GBP", 0.77),
            ("AUD", 1.48),
            ("CAD", 1.35),
            ("JPY", 155.0),
        ];
        Self {
            rates: rates
                .into_iter()
                .map(|(code, rate)| (code.to_string(), rate))
                .collect(),
        }
    }
}

impl RateTable {
    /// Build a table from raw pivot-relative rates.
    pub fn from_rates(rates: HashMap<String, f64>) -> Self {
        Self { rates }
    }

    /// Rate for a currency code, if quoted
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    /// Whether the table quotes the given code
    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(code)
    }

    /// Raw code-to-rate mapping
    pub fn rates(&self) -> &HashMap<String, f64> {
        &self.rates
    }

    /// Whether the pivot currency is quoted at exactly 1
    pub fn pivot_is_unit(&self) -> bool {
        self.rate(PIVOT_CURRENCY) == Some(1.0)
    }

    /// Convert an amount between two currency codes.
    ///
    /// Identical codes convert to the amount unchanged. A code that is
    /// missing, or quoted at a non-positive rate, makes the pair
    /// unconvertible and the result is 0.
    pub fn convert(&self, amount: f64, from: &str, to: &str) -> f64 {
        let amount = finite_or(amount, 0.0);
        if from == to {
            return amount;
        }
        match (self.rate(from), self.rate(to)) {
            (Some(from_rate), Some(to_rate)) if from_rate > 0.0 && to_rate > 0.0 => {
                amount / from_rate * to_rate
            }
            _ => 0.0,
        }
    }

    /// New table with fetched rates merged over the codes this table already
    /// quotes. Unknown codes in the payload are ignored, so the quoted
    /// currency set stays fixed; non-positive or non-finite rates are
    /// rejected per code. The pivot keeps its unit quote no matter what the
    /// payload claims.
    pub fn merged_with_known(&self, fetched: &HashMap<String, f64>) -> RateTable {
        let mut rates = self.rates.clone();
        for (code, rate) in rates.iter_mut() {
            if code == PIVOT_CURRENCY {
                continue;
            }
            if let Some(&fresh) = fetched.get(code) {
                if fresh.is_finite() && fresh > 0.0 {
                    *rate = fresh;
                }
            }
        }
        RateTable { rates }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_same_code_is_identity() {
        let table = RateTable::default();
        assert_eq!(table.convert(123.45, "TRY", "TRY"), 123.45);
        assert_eq!(table.convert(0.0, "XXX", "XXX"), 0.0);
    }

    #[test]
    fn test_convert_uses_pivot_ratio() {
        let table = RateTable::default();
        assert_relative_eq!(table.convert(100.0, "USD", "TRY"), 3_400.0);
        assert_relative_eq!(table.convert(100.0, "EUR", "GBP"), 100.0 / 0.91 * 0.77);
    }

    #[test]
    fn test_round_trip_recovers_amount() {
        let table = RateTable::default();
        let there = table.convert(250.0, "GBP", "JPY");
        let back = table.convert(there, "JPY", "GBP");
        assert_relative_eq!(back, 250.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unknown_code_is_unconvertible() {
        let table = RateTable::default();
        assert_eq!(table.convert(100.0, "USD", "XAU"), 0.0);
        assert_eq!(table.convert(100.0, "XAU", "USD"), 0.0);
    }

    #[test]
    fn test_non_positive_rate_is_unconvertible() {
        let mut rates = HashMap::new();
        rates.insert("USD".to_string(), 1.0);
        rates.insert("BAD".to_string(), 0.0);
        let table = RateTable::from_rates(rates);
        assert_eq!(table.convert(100.0, "BAD", "USD"), 0.0);
    }

    #[test]
    fn test_merge_only_refreshes_known_codes() {
        let table = RateTable::default();
        let mut fetched = HashMap::new();
        fetched.insert("TRY".to_string(), 36.5);
        fetched.insert("XAU".to_string(), 0.0005);
        fetched.insert("EUR".to_string(), f64::NAN);

        let merged = table.merged_with_known(&fetched);
        assert_eq!(merged.rate("TRY"), Some(36.5));
        assert_eq!(merged.rate("EUR"), Some(0.91));
        assert!(!merged.contains("XAU"));
        assert!(merged.pivot_is_unit());
    }

    #[test]
    fn test_default_table_quotes_supported_set() {
        let table = RateTable::default();
        for code in SUPPORTED_CURRENCIES {
            assert!(table.contains(code), "missing {}", code);
        }
        assert!(table.pivot_is_unit());
    }
}
