//! Lifecycle simulation engine for single and multi-loan portfolios

mod account;
mod engine;
mod series;

pub use account::{LoanAccount, PaymentReceipt};
pub use engine::{LifecycleConfig, LifecycleEngine};
pub use series::{LifecycleSeries, LifecycleTotals, PeriodBucket, RangeTotals, SearchResult};

/// Default iteration ceiling: 100 years of monthly periods
///
/// A portfolio whose minimum payments cannot outpace interest accrual never
/// pays off; `run()` fails with `NonConvergence` at this ceiling instead of
/// looping forever.
pub const DEFAULT_MAX_MONTHS: u32 = 1200;
