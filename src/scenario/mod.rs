//! Base-vs-custom scenario comparison
//!
//! The visualization layer renders two stacked bars: a baseline run with no
//! extra funds and no ordering preference, and the user's configured run. It
//! reads exactly five totals per scenario; this module produces those as
//! value copies so no consumer ever holds a reference into engine state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LifecycleError;
use crate::lifecycle::{LifecycleConfig, LifecycleEngine, LifecycleTotals};
use crate::loan::{AllocationPolicy, LoanDescriptor};

/// The five repayment totals a rendering collaborator consumes per scenario
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepaymentBreakdown {
    pub total_principal_paid: Decimal,
    pub total_principal_paid_by_extra: Decimal,
    pub total_interest_paid: Decimal,
    pub total_interest_paid_by_extra: Decimal,
    pub total_paid: Decimal,
}

impl From<&LifecycleTotals> for RepaymentBreakdown {
    fn from(totals: &LifecycleTotals) -> Self {
        Self {
            total_principal_paid: totals.total_principal_paid,
            total_principal_paid_by_extra: totals.total_principal_paid_by_extra,
            total_interest_paid: totals.total_interest_paid,
            total_interest_paid_by_extra: totals.total_interest_paid_by_extra,
            total_paid: totals.total_paid,
        }
    }
}

/// Paired breakdowns for the two bars
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub base: RepaymentBreakdown,
    pub custom: RepaymentBreakdown,
}

/// Runs the baseline and the configured scenario over the same portfolio
pub struct ScenarioRunner {
    descriptors: Vec<LoanDescriptor>,
    config: LifecycleConfig,
}

impl ScenarioRunner {
    pub fn new(descriptors: Vec<LoanDescriptor>, config: LifecycleConfig) -> Self {
        Self {
            descriptors,
            config,
        }
    }

    /// Run both scenarios and return their breakdowns
    ///
    /// The two runs are independent simulations over copies of the same
    /// descriptors, so they execute in parallel.
    pub fn compare(&self) -> Result<ScenarioComparison, LifecycleError> {
        let base_config = LifecycleConfig {
            policy: AllocationPolicy::None,
            extra: Decimal::ZERO,
            ..self.config.clone()
        };
        let custom_config = self.config.clone();

        let (base, custom) = rayon::join(
            || LifecycleEngine::simulate(&self.descriptors, base_config),
            || LifecycleEngine::simulate(&self.descriptors, custom_config),
        );

        Ok(ScenarioComparison {
            base: RepaymentBreakdown::from(base?.totals()),
            custom: RepaymentBreakdown::from(custom?.totals()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn loans() -> Vec<LoanDescriptor> {
        vec![
            LoanDescriptor {
                balance: dec!(1000),
                interest_rate: dec!(0.01),
                minimum_payment: dec!(100),
                due_date: 1,
            },
            LoanDescriptor {
                balance: dec!(500),
                interest_rate: dec!(0.02),
                minimum_payment: dec!(50),
                due_date: 15,
            },
        ]
    }

    fn config(extra: Decimal) -> LifecycleConfig {
        LifecycleConfig {
            policy: AllocationPolicy::HiInterest,
            extra,
            start_date: Some(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()),
            ..Default::default()
        }
    }

    #[test]
    fn test_base_scenario_has_no_extra() {
        let runner = ScenarioRunner::new(loans(), config(dec!(200)));
        let comparison = runner.compare().unwrap();

        assert_eq!(comparison.base.total_principal_paid_by_extra, Decimal::ZERO);
        assert_eq!(comparison.base.total_interest_paid_by_extra, Decimal::ZERO);
    }

    #[test]
    fn test_extra_reduces_interest() {
        let runner = ScenarioRunner::new(loans(), config(dec!(200)));
        let comparison = runner.compare().unwrap();

        let base_interest =
            comparison.base.total_interest_paid + comparison.base.total_interest_paid_by_extra;
        let custom_interest =
            comparison.custom.total_interest_paid + comparison.custom.total_interest_paid_by_extra;
        assert!(custom_interest < base_interest);
        assert!(comparison.custom.total_paid < comparison.base.total_paid);
    }

    #[test]
    fn test_breakdown_conservation() {
        let runner = ScenarioRunner::new(loans(), config(dec!(75)));
        let comparison = runner.compare().unwrap();

        for breakdown in [&comparison.base, &comparison.custom] {
            assert_eq!(
                breakdown.total_paid,
                breakdown.total_principal_paid
                    + breakdown.total_principal_paid_by_extra
                    + breakdown.total_interest_paid
                    + breakdown.total_interest_paid_by_extra
            );
        }
    }

    #[test]
    fn test_identical_configs_match() {
        // With no extra and no ordering preference the two bars coincide
        let runner = ScenarioRunner::new(
            loans(),
            LifecycleConfig {
                start_date: Some(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()),
                ..Default::default()
            },
        );
        let comparison = runner.compare().unwrap();
        assert_eq!(comparison.base, comparison.custom);
    }

    #[test]
    fn test_principal_totals_match_across_scenarios() {
        // Every scenario repays the same principal; only interest differs
        let runner = ScenarioRunner::new(loans(), config(dec!(120)));
        let comparison = runner.compare().unwrap();

        let base_principal = comparison.base.total_principal_paid
            + comparison.base.total_principal_paid_by_extra;
        let custom_principal = comparison.custom.total_principal_paid
            + comparison.custom.total_principal_paid_by_extra;
        assert_eq!(base_principal, dec!(1500));
        assert_eq!(custom_principal, dec!(1500));
    }
}
