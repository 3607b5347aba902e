//! Mortgage payment composition
//!
//! Derives the financed principal from home price and down payment, runs the
//! amortization engine, and layers recurring escrow costs (property tax,
//! insurance, HOA) on top of the principal-and-interest payment.

use serde::{Deserialize, Serialize};

use crate::loan::{amortize, AmortizationResult, LoanTerms};
use crate::numeric::{finite_or, non_negative};

/// Inputs for a mortgage estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MortgageTerms {
    /// Purchase price of the home
    pub home_price: f64,
    /// Down payment as a percentage of the price, clamped to [0, 100]
    pub down_payment_pct: f64,
    /// Nominal annual interest rate, in percent
    pub annual_rate_pct: f64,
    /// Loan term in years
    pub term_years: f64,
    /// Monthly property tax
    pub tax_monthly: f64,
    /// Monthly homeowner's insurance
    pub insurance_monthly: f64,
    /// Monthly HOA dues
    pub hoa_monthly: f64,
}

impl MortgageTerms {
    pub fn new(
        home_price: f64,
        down_payment_pct: f64,
        annual_rate_pct: f64,
        term_years: f64,
        tax_monthly: f64,
        insurance_monthly: f64,
        hoa_monthly: f64,
    ) -> Self {
        Self {
            home_price,
            down_payment_pct,
            annual_rate_pct,
            term_years,
            tax_monthly,
            insurance_monthly,
            hoa_monthly,
        }
    }
}

/// Mortgage estimate: amortization plus escrow extras
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageResult {
    /// Financed amount after the down payment
    pub principal: f64,
    /// Monthly principal-and-interest payment
    pub base_monthly: f64,
    /// Full amortization schedule for the financed amount
    pub schedule: AmortizationResult,
    /// Interest accrued across the whole schedule
    pub total_interest: f64,
    /// Recurring monthly escrow costs (tax + insurance + HOA)
    pub monthly_extras: f64,
    /// Base payment plus escrow extras
    pub total_monthly: f64,
    /// Total cost over the life of the loan, escrow included
    pub total_paid: f64,
}

/// Compose a mortgage estimate from price, down payment, and escrow costs.
pub fn compose(terms: &MortgageTerms) -> MortgageResult {
    let home_price = non_negative(terms.home_price);
    let down_payment_pct = finite_or(terms.down_payment_pct, 0.0).clamp(0.0, 100.0);
    let principal = (home_price - home_price * down_payment_pct / 100.0).max(0.0);

    let schedule = amortize(&LoanTerms::new(
        principal,
        terms.annual_rate_pct,
        terms.term_years,
    ));

    let monthly_extras = non_negative(terms.tax_monthly)
        + non_negative(terms.insurance_monthly)
        + non_negative(terms.hoa_monthly);
    let total_monthly = schedule.base_payment + monthly_extras;
    let total_paid = schedule.total_paid + monthly_extras * schedule.months_to_payoff as f64;

    MortgageResult {
        principal,
        base_monthly: schedule.base_payment,
        total_interest: schedule.total_interest,
        monthly_extras,
        total_monthly,
        total_paid,
        schedule,
    }
}
