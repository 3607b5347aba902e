//! Progressive income-tax calculation
//!
//! Income is sliced across an ordered list of marginal brackets. Each slice
//! is taxed at its bracket rate; an unbounded final bracket absorbs exactly
//! whatever income remains, so the slices always sum back to the income.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::numeric::non_negative;

/// One marginal bracket: a rate up to an upper bound
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Cumulative income this bracket reaches up to; `None` means unbounded
    pub upper_bound: Option<f64>,
    /// Marginal rate in [0, 1]
    pub rate: f64,
}

impl TaxBracket {
    /// Bracket reaching up to a cumulative income bound
    pub fn up_to(upper_bound: f64, rate: f64) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
        }
    }

    /// Unbounded top bracket
    pub fn unbounded(rate: f64) -> Self {
        Self {
            upper_bound: None,
            rate,
        }
    }
}

/// Why a bracket list cannot be used
#[derive(Debug, Error, PartialEq)]
pub enum TaxScheduleError {
    #[error("bracket list is empty")]
    Empty,

    #[error("bracket {index} upper bound must be finite and non-decreasing")]
    BadBound { index: usize },

    #[error("bracket {index} rate {rate} is outside [0, 1]")]
    RateOutOfRange { index: usize, rate: f64 },

    #[error("only the last bracket may be unbounded, bracket {index} is not last")]
    UnboundedNotLast { index: usize },
}

/// Validated, ordered bracket list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketSchedule {
    brackets: Vec<TaxBracket>,
}

impl BracketSchedule {
    /// Validate and adopt a bracket list: bounds finite and non-decreasing,
    /// rates in [0, 1], at most one unbounded bracket and only in last
    /// position.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, TaxScheduleError> {
        if brackets.is_empty() {
            return Err(TaxScheduleError::Empty);
        }
        let mut previous_bound = 0.0;
        let last_index = brackets.len() - 1;
        for (index, bracket) in brackets.iter().enumerate() {
            if !(0.0..=1.0).contains(&bracket.rate) {
                return Err(TaxScheduleError::RateOutOfRange {
                    index,
                    rate: bracket.rate,
                });
            }
            match bracket.upper_bound {
                Some(bound) => {
                    if !bound.is_finite() || bound < previous_bound {
                        return Err(TaxScheduleError::BadBound { index });
                    }
                    previous_bound = bound;
                }
                None if index != last_index => {
                    return Err(TaxScheduleError::UnboundedNotLast { index });
                }
                None => {}
            }
        }
        Ok(Self { brackets })
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }
}

/// Taxed slice of income within one bracket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BracketSlice {
    /// Cumulative income bound the bracket reached up to
    pub cap: f64,
    /// Income taxed inside this bracket
    pub taxable_slice: f64,
    /// Marginal rate applied
    pub rate: f64,
    /// Tax due on the slice
    pub tax_due: f64,
}

/// Total tax with its per-bracket breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxResult {
    pub total_tax: f64,
    /// Total tax over total income; 0 for zero income
    pub effective_rate: f64,
    /// Brackets that received a positive slice, in bracket order
    pub breakdown: Vec<BracketSlice>,
}

/// Slice an annual income across the schedule's marginal brackets.
pub fn compute_tax(annual_income: f64, schedule: &BracketSchedule) -> TaxResult {
    let income = non_negative(annual_income);

    let mut remaining = income;
    let mut last_cap = 0.0;
    let mut total_tax = 0.0;
    let mut breakdown = Vec::new();

    for bracket in schedule.brackets() {
        // An unbounded final bracket absorbs exactly the remaining income.
        let cap = bracket.upper_bound.unwrap_or(remaining + last_cap);
        let taxable_slice = remaining.min(cap - last_cap).max(0.0);
        let tax_due = taxable_slice * bracket.rate;
        if taxable_slice > 0.0 {
            breakdown.push(BracketSlice {
                cap,
                taxable_slice,
                rate: bracket.rate,
                tax_due,
            });
        }
        total_tax += tax_due;
        remaining -= taxable_slice;
        last_cap = cap;
        if remaining <= 0.0 {
            break;
        }
    }

    let effective_rate = if income > 0.0 { total_tax / income } else { 0.0 };
    TaxResult {
        total_tax,
        effective_rate,
        breakdown,
    }
}
