//! Loan data structures and descriptor loading

mod data;
pub mod loader;

pub use data::{AllocationPolicy, LoanDescriptor};
pub use loader::{load_loans, load_loans_from_reader};
