//! Live exchange-rate retrieval
//!
//! One HTTP GET against a public endpoint, pivot as the base currency. Any
//! failure (transport, status, payload shape) maps to a typed error so the
//! caller can fall back to its current table.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use super::table::PIVOT_CURRENCY;

/// Public endpoint serving pivot-relative rates
pub const RATES_ENDPOINT: &str = "https://api.exchangerate.host/latest";

/// Why a live fetch produced no usable rates
#[derive(Debug, Error)]
pub enum RateFetchError {
    #[error("rate request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate endpoint answered with status {0}")]
    Status(reqwest::StatusCode),

    #[error("rate payload is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("rate payload carries no rates")]
    MissingRates,
}

#[derive(Debug, Deserialize)]
struct RatesPayload {
    rates: Option<HashMap<String, f64>>,
}

/// Extract the rates mapping from a response body.
pub fn parse_rates(body: &str) -> Result<HashMap<String, f64>, RateFetchError> {
    let payload: RatesPayload = serde_json::from_str(body)?;
    match payload.rates {
        Some(rates) if !rates.is_empty() => Ok(rates),
        _ => Err(RateFetchError::MissingRates),
    }
}

/// Fetch live pivot-relative rates.
///
/// Exactly one request per call; retry policy is the caller's business.
pub async fn fetch_live_rates() -> Result<HashMap<String, f64>, RateFetchError> {
    let url = format!("{}?base={}", RATES_ENDPOINT, PIVOT_CURRENCY);
    let response = reqwest::get(&url).await?;
    if !response.status().is_success() {
        return Err(RateFetchError::Status(response.status()));
    }
    let body = response.text().await?;
    parse_rates(&body)
}
