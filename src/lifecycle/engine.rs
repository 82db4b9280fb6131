//! Multi-loan orchestration loop
//!
//! The engine owns one `LoanAccount` per descriptor plus a shared extra-funds
//! pool. Each period it re-sorts the accounts by the allocation policy, ages
//! and pays each live account in that order (the earliest account gets first
//! claim on the remaining pool), folds the receipts into per-due-date buckets,
//! and appends the buckets to the series. The loop ends when every account is
//! dead, or errors once the month ceiling is exceeded.

use std::cmp::Ordering;

use chrono::{Datelike, Local, NaiveDate};
use log::{debug, info};
use rust_decimal::Decimal;

use crate::error::LifecycleError;
use crate::lifecycle::account::LoanAccount;
use crate::lifecycle::series::{LifecycleSeries, PeriodBucket, SearchResult};
use crate::lifecycle::DEFAULT_MAX_MONTHS;
use crate::loan::{AllocationPolicy, LoanDescriptor};

/// Knobs for one simulation run
#[derive(Debug, Clone)]
pub struct LifecycleConfig {
    /// Ordering rule for extra-funds priority
    pub policy: AllocationPolicy,

    /// Shared extra funds made available each period
    pub extra: Decimal,

    /// Month ceiling; `run()` errors instead of looping past it
    pub max_months: u32,

    /// Sort `HiInterest` descending so the highest rate gets first claim.
    ///
    /// The default (`false`) keeps the ascending sort, which hands the pool
    /// to the *lowest*-rate account first. That matches the system this
    /// engine reproduces, even though the policy name suggests otherwise.
    pub avalanche_order: bool,

    /// Base date for period zero; defaults to today
    pub start_date: Option<NaiveDate>,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            policy: AllocationPolicy::None,
            extra: Decimal::ZERO,
            max_months: DEFAULT_MAX_MONTHS,
            avalanche_order: false,
            start_date: None,
        }
    }
}

type AccountComparator = fn(&LoanAccount, &LoanAccount) -> Ordering;

/// Map the policy to a concrete comparator once, at construction
fn comparator(policy: AllocationPolicy, avalanche_order: bool) -> AccountComparator {
    match (policy, avalanche_order) {
        (AllocationPolicy::None, _) => |a, b| a.due_date().cmp(&b.due_date()),
        (AllocationPolicy::HiInterest, false) => |a, b| a.interest_rate().cmp(&b.interest_rate()),
        (AllocationPolicy::HiInterest, true) => |a, b| b.interest_rate().cmp(&a.interest_rate()),
        (AllocationPolicy::LoBalance, _) => |a, b| a.balance().cmp(&b.balance()),
    }
}

/// Due-date of `day` in the month `month_offset` periods after `base`
fn payment_date(base: NaiveDate, month_offset: u32, day: u8) -> NaiveDate {
    let months = base.month0() + month_offset;
    let year = base.year() + (months / 12) as i32;
    let month = months % 12 + 1;
    // day is validated to 1..=28, so every month has it
    NaiveDate::from_ymd_opt(year, month, u32::from(day)).unwrap_or(base)
}

/// Month-by-month simulation of a loan portfolio
pub struct LifecycleEngine {
    accounts: Vec<LoanAccount>,
    extra: Decimal,
    compare: AccountComparator,
    max_months: u32,
    base_date: NaiveDate,
    month_index: u32,
    series: LifecycleSeries,
}

impl LifecycleEngine {
    /// Build the engine without running it
    ///
    /// Fails fast on an empty descriptor list or a descriptor that fails
    /// validation. The loop only advances through `step()` or `run()`, so
    /// tests can drive the simulation period by period.
    pub fn new(
        descriptors: &[LoanDescriptor],
        config: LifecycleConfig,
    ) -> Result<Self, LifecycleError> {
        if descriptors.is_empty() {
            return Err(LifecycleError::NoLoans);
        }
        for (index, descriptor) in descriptors.iter().enumerate() {
            descriptor.validate(index)?;
        }

        Ok(Self {
            accounts: descriptors.iter().map(LoanAccount::from_descriptor).collect(),
            extra: config.extra.max(Decimal::ZERO),
            compare: comparator(config.policy, config.avalanche_order),
            max_months: config.max_months,
            base_date: config
                .start_date
                .unwrap_or_else(|| Local::now().date_naive()),
            month_index: 0,
            series: LifecycleSeries::default(),
        })
    }

    /// Build and run to completion, returning the finished series
    pub fn simulate(
        descriptors: &[LoanDescriptor],
        config: LifecycleConfig,
    ) -> Result<LifecycleSeries, LifecycleError> {
        let mut engine = Self::new(descriptors, config)?;
        engine.run()?;
        Ok(engine.into_series())
    }

    /// Whether every account has paid off
    pub fn is_complete(&self) -> bool {
        self.accounts.iter().all(|a| !a.alive())
    }

    pub fn series(&self) -> &LifecycleSeries {
        &self.series
    }

    pub fn into_series(self) -> LifecycleSeries {
        self.series
    }

    /// Periods simulated so far
    pub fn months_elapsed(&self) -> u32 {
        self.month_index
    }

    /// Range query over the series produced so far
    ///
    /// Pure read; callable mid-simulation.
    pub fn search(
        &self,
        range: (NaiveDate, NaiveDate),
        return_elements: bool,
    ) -> SearchResult {
        self.series.search(range, return_elements)
    }

    /// Run the main loop until every account is dead
    ///
    /// Errors with `NonConvergence` past the month ceiling rather than
    /// spinning unbounded on a portfolio that can never pay off.
    pub fn run(&mut self) -> Result<(), LifecycleError> {
        while !self.is_complete() {
            if self.month_index >= self.max_months {
                return Err(LifecycleError::NonConvergence {
                    limit: self.max_months,
                });
            }
            self.step();
        }

        self.series.finish(Local::now().date_naive());
        info!(
            "lifecycle complete after {} months, total paid {}",
            self.month_index,
            self.series.totals().total_paid
        );
        Ok(())
    }

    /// Advance the simulation by exactly one period
    pub fn step(&mut self) {
        // Stable sort over all accounts, dead ones sorted along with the rest
        let compare = self.compare;
        self.accounts.sort_by(compare);

        // Period scratch state: aggregate snapshot across live accounts and
        // one bucket per distinct due date, created in sorted order
        let mut pool = self.extra;
        let mut balance = Decimal::ZERO;
        let mut principal = Decimal::ZERO;
        let mut interest = Decimal::ZERO;
        let mut buckets: Vec<PeriodBucket> = Vec::new();

        for account in &self.accounts {
            if !account.alive() {
                continue;
            }
            if !buckets.iter().any(|b| b.due_date == account.due_date()) {
                let date = payment_date(self.base_date, self.month_index, account.due_date());
                buckets.push(PeriodBucket::new(account.due_date(), date));
            }
            balance += account.balance();
            principal += account.principal();
            interest += account.interest_accrued();
        }

        // Pay in sorted order: each live account sees the pool that is left
        // after the accounts ahead of it took their share
        for account in &mut self.accounts {
            if !account.alive() {
                continue;
            }
            account.age();
            let due_date = account.due_date();
            let receipt = account.make_payment(pool);
            pool -= receipt.extra_consumed();

            if let Some(bucket) = buckets.iter_mut().find(|b| b.due_date == due_date) {
                bucket.absorb(&receipt);
            }
            self.series.totals_mut().absorb(&receipt);
        }

        // Fold the buckets into the series in creation order, rolling the
        // aggregate snapshot forward through each
        for mut bucket in buckets {
            balance -= bucket.amount_paid;
            principal -= bucket.principal_paid + bucket.principal_paid_by_extra;
            interest += bucket.interest_paid + bucket.interest_paid_by_extra;
            bucket.balance = balance;
            bucket.principal = principal;
            bucket.interest = interest;
            self.series.push(bucket);
        }

        self.month_index += 1;
        debug!(
            "month {}: {} accounts alive, pool remaining {}",
            self.month_index,
            self.accounts.iter().filter(|a| a.alive()).count(),
            pool
        );
    }
}
