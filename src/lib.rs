//! Loan Lifecycle - month-by-month repayment simulation for loan portfolios
//!
//! This library provides:
//! - Per-loan amortization with exact decimal arithmetic
//! - Multi-loan orchestration with a shared extra-payment pool
//! - Priority ordering policies (due date, interest rate, balance)
//! - A chronological series of per-due-date payment buckets with range queries
//! - Base-vs-custom scenario comparison for repayment breakdowns

pub mod error;
pub mod lifecycle;
pub mod loan;
pub mod scenario;

// Re-export commonly used types
pub use error::LifecycleError;
pub use lifecycle::{
    LifecycleConfig, LifecycleEngine, LifecycleSeries, LifecycleTotals, LoanAccount,
    PaymentReceipt, PeriodBucket, RangeTotals, SearchResult,
};
pub use loan::{load_loans, AllocationPolicy, LoanDescriptor};
pub use scenario::{RepaymentBreakdown, ScenarioComparison, ScenarioRunner};
