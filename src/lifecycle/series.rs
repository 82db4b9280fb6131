//! Period buckets, the append-only series, and range queries

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lifecycle::account::PaymentReceipt;

/// Aggregated payment results for one due date within one period
///
/// Buckets accumulate only while their period is in progress; once appended
/// to the series they are never modified.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodBucket {
    /// Day of month the payments fell on
    pub due_date: u8,
    /// Calendar date of the payments
    pub date: NaiveDate,
    /// Number of payments folded into this bucket
    pub payments: u32,

    /// Portfolio balance snapshot after this bucket's payments
    pub balance: Decimal,
    /// Portfolio principal snapshot after this bucket's payments
    pub principal: Decimal,
    /// Cumulative portfolio interest snapshot after this bucket's payments
    pub interest: Decimal,

    pub amount_paid: Decimal,
    pub extra_paid: Decimal,
    pub interest_paid: Decimal,
    pub interest_paid_by_extra: Decimal,
    pub principal_paid: Decimal,
    pub principal_paid_by_extra: Decimal,
}

impl PeriodBucket {
    pub(crate) fn new(due_date: u8, date: NaiveDate) -> Self {
        Self {
            due_date,
            date,
            ..Default::default()
        }
    }

    /// Fold one payment receipt into the bucket
    pub(crate) fn absorb(&mut self, receipt: &PaymentReceipt) {
        self.payments += 1;
        self.amount_paid += receipt.amount_paid;
        self.extra_paid += receipt.extra_consumed();
        self.principal_paid += receipt.principal_paid;
        self.principal_paid_by_extra += receipt.principal_paid_by_extra;
        self.interest_paid += receipt.interest_paid;
        self.interest_paid_by_extra += receipt.interest_paid_by_extra;
    }
}

/// Portfolio-wide running totals across the whole simulation
///
/// Every field is monotonically non-decreasing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleTotals {
    pub total_paid: Decimal,
    pub total_extra_paid: Decimal,
    pub total_principal_paid: Decimal,
    pub total_principal_paid_by_extra: Decimal,
    pub total_interest_paid: Decimal,
    pub total_interest_paid_by_extra: Decimal,
}

impl LifecycleTotals {
    pub(crate) fn absorb(&mut self, receipt: &PaymentReceipt) {
        self.total_paid += receipt.amount_paid;
        self.total_extra_paid += receipt.extra_consumed();
        self.total_principal_paid += receipt.principal_paid;
        self.total_principal_paid_by_extra += receipt.principal_paid_by_extra;
        self.total_interest_paid += receipt.interest_paid;
        self.total_interest_paid_by_extra += receipt.interest_paid_by_extra;
    }
}

/// Paid-field totals folded from a date range of the series
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeTotals {
    pub total_paid: Decimal,
    pub total_principal_paid: Decimal,
    pub total_principal_paid_by_extra: Decimal,
    pub total_interest_paid: Decimal,
    pub total_interest_paid_by_extra: Decimal,
}

/// Result of a range query: the matching buckets or their folded totals
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SearchResult {
    Elements(Vec<PeriodBucket>),
    Totals(RangeTotals),
}

/// Chronological, append-only record of all buckets across the simulation
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleSeries {
    buckets: Vec<PeriodBucket>,
    totals: LifecycleTotals,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl LifecycleSeries {
    pub fn buckets(&self) -> &[PeriodBucket] {
        &self.buckets
    }

    pub fn totals(&self) -> &LifecycleTotals {
        &self.totals
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub(crate) fn totals_mut(&mut self) -> &mut LifecycleTotals {
        &mut self.totals
    }

    /// Append a finished bucket, setting the start date on the first ever
    pub(crate) fn push(&mut self, bucket: PeriodBucket) {
        if self.start_date.is_none() {
            self.start_date = Some(bucket.date);
        }
        self.buckets.push(bucket);
    }

    /// Close the series: end date is the last bucket's date, or `fallback`
    /// when nothing was ever appended
    pub(crate) fn finish(&mut self, fallback: NaiveDate) {
        self.end_date = Some(self.buckets.last().map(|b| b.date).unwrap_or(fallback));
        if self.start_date.is_none() {
            self.start_date = Some(fallback);
        }
    }

    /// Scan the series for buckets dated within `[min_date, max_date]`
    /// inclusive
    ///
    /// Pure read: returns either the matching buckets verbatim or their paid
    /// fields folded into fresh totals. Safe to call mid-simulation.
    pub fn search(
        &self,
        (min_date, max_date): (NaiveDate, NaiveDate),
        return_elements: bool,
    ) -> SearchResult {
        let matching = self
            .buckets
            .iter()
            .filter(|b| b.date >= min_date && b.date <= max_date);

        if return_elements {
            SearchResult::Elements(matching.cloned().collect())
        } else {
            let mut totals = RangeTotals::default();
            for bucket in matching {
                totals.total_paid += bucket.amount_paid;
                totals.total_principal_paid += bucket.principal_paid;
                totals.total_principal_paid_by_extra += bucket.principal_paid_by_extra;
                totals.total_interest_paid += bucket.interest_paid;
                totals.total_interest_paid_by_extra += bucket.interest_paid_by_extra;
            }
            SearchResult::Totals(totals)
        }
    }
}
