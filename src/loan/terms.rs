//! Loan input structures

use serde::{Deserialize, Serialize};

use crate::numeric::finite_or;

/// A single extra principal payment applied at one specific month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OneTimeExtra {
    /// Month the payment lands on (1-based)
    pub month: u32,
    /// Payment amount
    pub amount: f64,
}

/// Recurring and one-off extra principal payments
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtraPayments {
    /// Added to every monthly payment
    pub monthly: f64,
    /// Added once per year, at every 12th month
    pub yearly: f64,
    /// Single lump payment at a chosen month
    pub once: Option<OneTimeExtra>,
}

impl ExtraPayments {
    /// Extra principal due in the given month (1-based).
    ///
    /// Yearly extras land every 12th month. The combined amount is clamped
    /// below at zero so extras can only accelerate payoff.
    pub fn amount_for_month(&self, month: u32) -> f64 {
        let mut extra = finite_or(self.monthly, 0.0);
        if month % 12 == 0 {
            extra += finite_or(self.yearly, 0.0);
        }
        if let Some(once) = self.once {
            if once.month == month {
                extra += finite_or(once.amount, 0.0);
            }
        }
        extra.max(0.0)
    }

    /// Whether any extra payment will ever apply
    pub fn is_active(&self) -> bool {
        self.monthly > 0.0
            || self.yearly > 0.0
            || self.once.map_or(false, |once| once.amount > 0.0)
    }
}

/// Immutable input to a single amortization run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed
    pub principal: f64,
    /// Nominal annual interest rate, in percent
    pub annual_rate_pct: f64,
    /// Loan term in years; fractional terms round to whole months
    pub term_years: f64,
    /// Optional extra principal payments
    pub extra: ExtraPayments,
}

impl LoanTerms {
    /// Terms with no extra payments
    pub fn new(principal: f64, annual_rate_pct: f64, term_years: f64) -> Self {
        Self {
            principal,
            annual_rate_pct,
            term_years,
            extra: ExtraPayments::default(),
        }
    }

    /// Attach extra payment rules
    pub fn with_extra(mut self, extra: ExtraPayments) -> Self {
        self.extra = extra;
        self
    }
}
