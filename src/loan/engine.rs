//! Fixed-payment amortization engine
//!
//! Produces a monthly schedule for a fixed-rate loan, optionally accelerated
//! by extra principal payments. Interest accrues monthly on the outstanding
//! balance; the scheduled payment comes from the standard annuity formula.

use super::schedule::{AmortizationResult, ScheduleRow};
use super::terms::LoanTerms;
use crate::numeric::finite_or;

/// Residual balance below this is float rounding noise, not real debt.
const BALANCE_EPSILON: f64 = 1e-6;

/// Configuration for an amortization run
#[derive(Debug, Clone)]
pub struct AmortizationConfig {
    /// Months past the nominal term the schedule may run before it is cut
    /// off. A schedule that reaches this ceiling never amortizes, so the
    /// inputs are flagged rather than looping unbounded.
    pub payoff_overrun_months: u32,
}

impl Default for AmortizationConfig {
    fn default() -> Self {
        Self {
            payoff_overrun_months: 1000,
        }
    }
}

/// Build an amortization schedule with the default payoff ceiling.
pub fn amortize(terms: &LoanTerms) -> AmortizationResult {
    amortize_with_config(terms, &AmortizationConfig::default())
}

/// Build an amortization schedule.
///
/// Degenerate inputs fall back rather than fail: a non-positive principal
/// yields an empty schedule, a term that rounds below one month is due
/// immediately in full, and a negative rate is treated as zero.
pub fn amortize_with_config(
    terms: &LoanTerms,
    config: &AmortizationConfig,
) -> AmortizationResult {
    let principal = finite_or(terms.principal, 0.0);
    let annual_rate_pct = finite_or(terms.annual_rate_pct, 0.0);
    let term_years = finite_or(terms.term_years, 0.0);

    if principal <= 0.0 {
        return AmortizationResult::empty();
    }

    let months = (term_years * 12.0).round();
    if months < 1.0 {
        return immediate_payoff(principal);
    }
    let n = months as u32;
    let r = if annual_rate_pct > 0.0 {
        annual_rate_pct / 1200.0
    } else {
        0.0
    };

    // 1 - (1+r)^-n stays finite for extreme rate/term combinations where
    // (1+r)^n alone would overflow.
    let base_payment = if r == 0.0 {
        principal / months
    } else {
        principal * r / (1.0 - (1.0 + r).powf(-months))
    };

    let plain_installments = r == 0.0 && !terms.extra.is_active();
    let ceiling = n.saturating_add(config.payoff_overrun_months);

    let mut rows = Vec::new();
    let mut balance = principal;
    let mut total_interest = 0.0;
    let mut total_paid = 0.0;
    let mut month: u32 = 1;
    let mut capped = false;

    while balance > 0.0 {
        if month > ceiling {
            capped = true;
            log::warn!(
                "amortization stopped {} months past the {}-month term with {:.2} outstanding; payment does not amortize the balance",
                config.payoff_overrun_months,
                n,
                balance
            );
            break;
        }

        let interest = r * balance;
        let extra = terms.extra.amount_for_month(month);
        let mut principal_paid = (base_payment - interest + extra).min(balance);
        if balance - principal_paid < BALANCE_EPSILON {
            principal_paid = balance;
        }
        if plain_installments && month >= n {
            // Plain fixed-installment division: the last scheduled month
            // clears whatever rounding drift is left.
            principal_paid = balance;
        }
        let ending_balance = (balance - principal_paid).max(0.0);
        let total_payment = base_payment + extra;

        rows.push(ScheduleRow {
            month,
            base_payment,
            extra,
            total_payment,
            interest,
            principal_paid,
            ending_balance,
        });

        total_interest += interest;
        total_paid += total_payment;
        balance = ending_balance;
        month += 1;
    }

    let months_to_payoff = rows.len() as u32;
    AmortizationResult {
        base_payment,
        rows,
        total_interest,
        total_paid,
        months_to_payoff,
        capped,
    }
}

/// Terms shorter than one month: the whole balance is due at once.
fn immediate_payoff(principal: f64) -> AmortizationResult {
    let row = ScheduleRow {
        month: 1,
        base_payment: principal,
        extra: 0.0,
        total_payment: principal,
        interest: 0.0,
        principal_paid: principal,
        ending_balance: 0.0,
    };
    AmortizationResult {
        base_payment: principal,
        rows: vec![row],
        total_interest: 0.0,
        total_paid: principal,
        months_to_payoff: 1,
        capped: false,
    }
}
