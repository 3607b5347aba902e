//! Loan amortization: terms, engine, and schedule output

mod engine;
mod schedule;
mod terms;

pub use engine::{amortize, amortize_with_config, AmortizationConfig};
pub use schedule::{AmortizationResult, ScheduleRow};
pub use terms::{ExtraPayments, LoanTerms, OneTimeExtra};
