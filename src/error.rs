//! Error taxonomy for the lifecycle engine
//!
//! Construction fails fast on a missing or malformed portfolio; the only
//! runtime failure is the non-convergence ceiling, which is a hardening
//! addition over the source system (which would spin forever on a portfolio
//! that can never pay off).

use thiserror::Error;

/// Errors surfaced by engine construction and `run()`
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// No loan descriptors were supplied; the simulation never starts
    #[error("no loans provided")]
    NoLoans,

    /// A loan descriptor failed validation before the loop began
    #[error("loan {index}: {reason}")]
    InvalidLoan { index: usize, reason: String },

    /// The simulation exceeded the month ceiling with accounts still alive
    #[error("simulation exceeded {limit} months without full payoff")]
    NonConvergence { limit: u32 },
}
