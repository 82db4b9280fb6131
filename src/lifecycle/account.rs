//! Per-loan amortization state
//!
//! A `LoanAccount` is created from a descriptor when the engine is built and
//! mutated exactly once per period by the engine loop: `age()`, then
//! `make_payment()`. Once the balance reaches zero the account is dead and
//! stays dead; further payments are no-ops.

use rust_decimal::Decimal;

use crate::loan::LoanDescriptor;

/// Split of one period's payment between interest and principal
///
/// `amount_paid` always equals the sum of the four component fields, so the
/// caller can fold receipts into aggregates without double counting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaymentReceipt {
    pub amount_paid: Decimal,
    pub principal_paid: Decimal,
    pub principal_paid_by_extra: Decimal,
    pub interest_paid: Decimal,
    pub interest_paid_by_extra: Decimal,
}

impl PaymentReceipt {
    /// Extra funds actually consumed by this payment
    ///
    /// Never exceeds what was offered; the unused remainder is the offer
    /// minus this amount.
    pub fn extra_consumed(&self) -> Decimal {
        self.principal_paid_by_extra + self.interest_paid_by_extra
    }
}

/// Amortization state of a single debt instrument
#[derive(Debug, Clone)]
pub struct LoanAccount {
    /// Remaining principal
    principal: Decimal,
    /// Accrued interest not yet paid (carried on the balance)
    interest_carry: Decimal,
    /// Cumulative interest accrued over the account's lifetime
    interest_accrued: Decimal,
    interest_rate: Decimal,
    minimum_payment: Decimal,
    due_date: u8,
    age_months: u32,
    alive: bool,
}

impl LoanAccount {
    /// Initialize from a validated descriptor
    pub fn from_descriptor(descriptor: &LoanDescriptor) -> Self {
        Self {
            principal: descriptor.balance,
            interest_carry: Decimal::ZERO,
            interest_accrued: Decimal::ZERO,
            interest_rate: descriptor.interest_rate,
            minimum_payment: descriptor.minimum_payment,
            due_date: descriptor.due_date,
            age_months: 0,
            alive: descriptor.balance > Decimal::ZERO,
        }
    }

    /// Total owed: remaining principal plus carried interest
    pub fn balance(&self) -> Decimal {
        self.principal + self.interest_carry
    }

    /// Remaining principal
    pub fn principal(&self) -> Decimal {
        self.principal
    }

    /// Cumulative interest accrued to date
    pub fn interest_accrued(&self) -> Decimal {
        self.interest_accrued
    }

    pub fn interest_rate(&self) -> Decimal {
        self.interest_rate
    }

    pub fn minimum_payment(&self) -> Decimal {
        self.minimum_payment
    }

    pub fn due_date(&self) -> u8 {
        self.due_date
    }

    pub fn age_months(&self) -> u32 {
        self.age_months
    }

    /// Whether the account still carries a balance
    pub fn alive(&self) -> bool {
        self.alive
    }

    /// Advance the account's age by one period
    ///
    /// Side effect only; interest is computed as part of `make_payment`.
    pub fn age(&mut self) {
        self.age_months += 1;
    }

    /// Consume the minimum payment plus up to `extra_offered` of additional
    /// funds for one period
    ///
    /// Interest accrues on the pre-payment balance. Payments cover carried
    /// interest before principal. The extra actually consumed is capped by
    /// both the offer and what fully retires the account. Payments on a dead
    /// account are no-ops producing an all-zero receipt.
    pub fn make_payment(&mut self, extra_offered: Decimal) -> PaymentReceipt {
        if !self.alive {
            return PaymentReceipt::default();
        }

        let interest_due = self.balance() * self.interest_rate;
        self.interest_carry += interest_due;
        self.interest_accrued += interest_due;

        // Minimum portion, capped so the balance never goes negative
        let payment = self.minimum_payment.min(self.balance());
        let interest_paid = payment.min(self.interest_carry);
        let principal_paid = payment - interest_paid;
        self.interest_carry -= interest_paid;
        self.principal -= principal_paid;

        // Extra portion: no more than offered, no more than what retires the
        // account, interest first
        let extra_total = extra_offered.max(Decimal::ZERO).min(self.balance());
        let interest_paid_by_extra = extra_total.min(self.interest_carry);
        let principal_paid_by_extra = extra_total - interest_paid_by_extra;
        self.interest_carry -= interest_paid_by_extra;
        self.principal -= principal_paid_by_extra;

        if self.balance().is_zero() {
            self.alive = false;
        }

        PaymentReceipt {
            amount_paid: payment + extra_total,
            principal_paid,
            principal_paid_by_extra,
            interest_paid,
            interest_paid_by_extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn account(balance: Decimal, rate: Decimal, minimum: Decimal) -> LoanAccount {
        LoanAccount::from_descriptor(&crate::loan::LoanDescriptor {
            balance,
            interest_rate: rate,
            minimum_payment: minimum,
            due_date: 1,
        })
    }

    #[test]
    fn test_payment_split() {
        let mut acct = account(dec!(1000), dec!(0.01), dec!(100));
        let receipt = acct.make_payment(Decimal::ZERO);

        // 1% of 1000 = 10 interest, remainder of the 100 goes to principal
        assert_eq!(receipt.interest_paid, dec!(10));
        assert_eq!(receipt.principal_paid, dec!(90));
        assert_eq!(receipt.amount_paid, dec!(100));
        assert_eq!(acct.balance(), dec!(910));
        assert!(acct.alive());
    }

    #[test]
    fn test_receipt_conservation() {
        let mut acct = account(dec!(1000), dec!(0.015), dec!(75));
        let receipt = acct.make_payment(dec!(40));
        assert_eq!(
            receipt.amount_paid,
            receipt.principal_paid
                + receipt.principal_paid_by_extra
                + receipt.interest_paid
                + receipt.interest_paid_by_extra
        );
    }

    #[test]
    fn test_extra_capped_by_payoff() {
        let mut acct = account(dec!(50), dec!(0.01), dec!(100));
        let receipt = acct.make_payment(dec!(500));

        // Balance after accrual is 50.50, fully covered by the minimum; no
        // extra is needed, so none is consumed
        assert_eq!(receipt.amount_paid, dec!(50.50));
        assert_eq!(receipt.extra_consumed(), Decimal::ZERO);
        assert!(!acct.alive());
        assert_eq!(acct.balance(), Decimal::ZERO);
    }

    #[test]
    fn test_extra_retires_account() {
        let mut acct = account(dec!(1000), dec!(0.01), dec!(100));
        let receipt = acct.make_payment(dec!(2000));

        // 1010 owed after accrual: 100 minimum, 910 extra, nothing more
        assert_eq!(receipt.extra_consumed(), dec!(910));
        assert_eq!(receipt.amount_paid, dec!(1010));
        assert!(!acct.alive());
    }

    #[test]
    fn test_dead_account_noop() {
        let mut acct = account(Decimal::ZERO, dec!(0.01), dec!(100));
        assert!(!acct.alive());

        let receipt = acct.make_payment(dec!(500));
        assert_eq!(receipt, PaymentReceipt::default());
        assert_eq!(acct.balance(), Decimal::ZERO);
        assert!(!acct.alive());
    }

    #[test]
    fn test_dead_stays_dead() {
        let mut acct = account(dec!(50), Decimal::ZERO, dec!(100));
        acct.make_payment(Decimal::ZERO);
        assert!(!acct.alive());
        acct.make_payment(dec!(100));
        assert!(!acct.alive());
    }

    #[test]
    fn test_unpaid_interest_carries() {
        // Minimum below the accrual: balance grows, principal untouched
        let mut acct = account(dec!(1000), dec!(0.02), dec!(10));
        let receipt = acct.make_payment(Decimal::ZERO);

        assert_eq!(receipt.interest_paid, dec!(10));
        assert_eq!(receipt.principal_paid, Decimal::ZERO);
        assert_eq!(acct.balance(), dec!(1010));
        assert_eq!(acct.principal(), dec!(1000));
    }

    #[test]
    fn test_age_counter() {
        let mut acct = account(dec!(100), dec!(0.01), dec!(10));
        assert_eq!(acct.age_months(), 0);
        acct.age();
        acct.age();
        assert_eq!(acct.age_months(), 2);
    }
}
