//! Loan descriptors and allocation policy selection

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LifecycleError;

/// Input description of one debt instrument
///
/// Amounts are exact decimals; `interest_rate` is the periodic (monthly)
/// rate, e.g. `0.01` for 1% per month. `due_date` is a day of month and is
/// restricted to 1..=28 so every simulated month has the day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanDescriptor {
    /// Outstanding balance at simulation start
    pub balance: Decimal,

    /// Periodic interest rate applied to the pre-payment balance
    #[serde(rename = "interestRate")]
    pub interest_rate: Decimal,

    /// Contractual minimum payment per period
    #[serde(rename = "minimumPayment")]
    pub minimum_payment: Decimal,

    /// Day of month the payment falls on (1..=28)
    #[serde(rename = "dueDate")]
    pub due_date: u8,
}

impl LoanDescriptor {
    /// Validate the descriptor before the simulation loop begins
    ///
    /// Malformed input is rejected here rather than discovered mid-simulation.
    pub fn validate(&self, index: usize) -> Result<(), LifecycleError> {
        if self.balance < Decimal::ZERO {
            return Err(LifecycleError::InvalidLoan {
                index,
                reason: format!("balance {} is negative", self.balance),
            });
        }
        if self.interest_rate < Decimal::ZERO {
            return Err(LifecycleError::InvalidLoan {
                index,
                reason: format!("interest rate {} is negative", self.interest_rate),
            });
        }
        if self.minimum_payment < Decimal::ZERO {
            return Err(LifecycleError::InvalidLoan {
                index,
                reason: format!("minimum payment {} is negative", self.minimum_payment),
            });
        }
        if !(1..=28).contains(&self.due_date) {
            return Err(LifecycleError::InvalidLoan {
                index,
                reason: format!("due date {} is outside 1..=28", self.due_date),
            });
        }
        Ok(())
    }
}

/// Ordering rule deciding which account gets first claim on the extra pool
///
/// All three policies sort ascending on their key. Note that ascending
/// `HiInterest` hands the pool to the lowest-rate account first; see
/// `LifecycleConfig::avalanche_order` for the descending variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationPolicy {
    /// Sort by due date (no acceleration preference)
    #[serde(rename = "NONE")]
    None,
    /// Sort by interest rate
    #[serde(rename = "HI_INTEREST")]
    HiInterest,
    /// Sort by balance (snowball-style, smallest balance first)
    #[serde(rename = "LO_BALANCE")]
    LoBalance,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        AllocationPolicy::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn descriptor() -> LoanDescriptor {
        LoanDescriptor {
            balance: dec!(1000),
            interest_rate: dec!(0.01),
            minimum_payment: dec!(100),
            due_date: 1,
        }
    }

    #[test]
    fn test_valid_descriptor() {
        assert!(descriptor().validate(0).is_ok());
    }

    #[test]
    fn test_negative_balance_rejected() {
        let mut d = descriptor();
        d.balance = dec!(-1);
        assert!(matches!(
            d.validate(3),
            Err(LifecycleError::InvalidLoan { index: 3, .. })
        ));
    }

    #[test]
    fn test_due_date_range() {
        let mut d = descriptor();
        d.due_date = 0;
        assert!(d.validate(0).is_err());
        d.due_date = 29;
        assert!(d.validate(0).is_err());
        d.due_date = 28;
        assert!(d.validate(0).is_ok());
    }

    #[test]
    fn test_policy_serde_names() {
        let json = serde_json::to_string(&AllocationPolicy::HiInterest).unwrap();
        assert_eq!(json, "\"HI_INTEREST\"");
        let parsed: AllocationPolicy = serde_json::from_str("\"LO_BALANCE\"").unwrap();
        assert_eq!(parsed, AllocationPolicy::LoBalance);
    }

    #[test]
    fn test_policy_default() {
        assert_eq!(AllocationPolicy::default(), AllocationPolicy::None);
    }
}
