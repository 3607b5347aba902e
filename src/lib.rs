//! Finance Toolkit - personal-finance calculation engine
//!
//! This library provides:
//! - Fixed-payment loan amortization with extra-payment acceleration
//! - Mortgage composition (down payment, escrow extras) over the loan engine
//! - Currency conversion against a USD-pivoted rate table with a
//!   cached-then-live refresh lifecycle
//! - Progressive income-tax bracket slicing
//! - Retirement future-value projection, nominal and inflation-adjusted
//! - Crypto trade P&L with break-even solving, and stock-split rebasing
//! - Delimited-text schedule export
//!
//! Every calculator is a pure function of its inputs; the rate table is the
//! only stateful piece and is owned explicitly by [`rates::RateStore`].

pub mod export;
pub mod loan;
pub mod mortgage;
pub mod numeric;
pub mod rates;
pub mod retirement;
pub mod tax;
pub mod trade;

// Re-export commonly used types
pub use export::{schedule_csv, schedule_csv_detailed, ExportError};
pub use loan::{amortize, AmortizationResult, ExtraPayments, LoanTerms, ScheduleRow};
pub use mortgage::{compose, MortgageResult, MortgageTerms};
pub use rates::{RateStatus, RateStore, RateTable};
pub use retirement::{project, RetirementPlan, RetirementProjection};
pub use tax::{compute_tax, BracketSchedule, TaxBracket, TaxResult};
pub use trade::{crypto_pnl, stock_split, CryptoPnl, CryptoTrade, SplitResult};
