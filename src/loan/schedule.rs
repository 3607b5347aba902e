//! Amortization schedule output structures

use serde::{Deserialize, Serialize};

/// One month of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Month number, starting at 1
    pub month: u32,
    /// Scheduled payment from the annuity formula
    pub base_payment: f64,
    /// Extra principal paid this month
    pub extra: f64,
    /// Base payment plus extras
    pub total_payment: f64,
    /// Interest accrued this month
    pub interest: f64,
    /// Principal retired this month
    pub principal_paid: f64,
    /// Balance remaining after this month's payment
    pub ending_balance: f64,
}

/// Complete output of one amortization run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    /// Fixed monthly payment before extras
    pub base_payment: f64,
    /// Schedule rows in strictly increasing month order
    pub rows: Vec<ScheduleRow>,
    /// Interest accrued across the whole schedule
    pub total_interest: f64,
    /// Sum of `total_payment` across the whole schedule
    pub total_paid: f64,
    /// Number of months until the balance reached zero
    pub months_to_payoff: u32,
    /// True when the payoff ceiling cut the schedule short. The balance never
    /// amortized, which points at misconfigured inputs.
    pub capped: bool,
}

impl AmortizationResult {
    /// Empty schedule for inputs where nothing is owed
    pub(crate) fn empty() -> Self {
        Self {
            base_payment: 0.0,
            rows: Vec::new(),
            total_interest: 0.0,
            total_paid: 0.0,
            months_to_payoff: 0,
            capped: false,
        }
    }

    /// Principal retired across the whole schedule
    pub fn total_principal(&self) -> f64 {
        self.rows.iter().map(|row| row.principal_paid).sum()
    }

    /// Balance remaining after the last scheduled month
    pub fn final_balance(&self) -> f64 {
        self.rows.last().map_or(0.0, |row| row.ending_balance)
    }
}
