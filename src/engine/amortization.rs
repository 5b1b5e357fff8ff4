use crate::domain::money::{Money, Percent};
use crate::domain::scenario::PayoffSummary;
use rust_decimal::{Decimal, MathematicalOps};

/// One month of a debt schedule, recorded after interest and payment post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyStep {
    /// 1-based month number.
    pub month_index: u32,
    /// Balance remaining at the end of the month. Never negative.
    pub balance: Money,
    pub interest_accrued: Money,
    /// Amount actually paid; the final month pays only what is due.
    pub payment: Money,
}

/// A lazy, bounded month-by-month debt schedule.
///
/// The iterator ends when the balance reaches zero or the horizon cap is hit.
/// Cloning before iterating restarts the schedule from the opening balance.
#[derive(Debug, Clone)]
pub struct AmortizationSchedule {
    balance: Money,
    monthly_rate: Decimal,
    payment: Money,
    month: u32,
    max_months: u32,
    overflowed: bool,
}

impl AmortizationSchedule {
    pub fn new(balance: Money, apr: Percent, payment: Money, max_months: u32) -> Self {
        Self {
            balance,
            monthly_rate: apr.monthly_rate(),
            payment,
            month: 0,
            max_months,
            overflowed: false,
        }
    }

    pub fn remaining_balance(&self) -> Money {
        self.balance
    }

    pub fn is_paid_off(&self) -> bool {
        !self.balance.is_positive()
    }
}

impl Iterator for AmortizationSchedule {
    type Item = MonthlyStep;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_paid_off() || self.overflowed || self.month >= self.max_months {
            return None;
        }

        // A payment that never covers interest can grow the balance past what
        // `Decimal` represents; treat that as running out of horizon.
        let Some((interest, due)) = self
            .balance
            .checked_mul(self.monthly_rate)
            .and_then(|interest| self.balance.checked_add(interest).map(|due| (interest, due)))
        else {
            self.overflowed = true;
            return None;
        };

        let paid = self.payment.min(due);
        self.balance = due - paid;
        self.month += 1;

        Some(MonthlyStep {
            month_index: self.month,
            balance: self.balance,
            interest_accrued: interest,
            payment: paid,
        })
    }
}

/// Debt payoff under a constant monthly payment.
#[derive(Debug, Clone, Copy)]
pub struct AmortizationSimulator {
    max_months: u32,
}

impl AmortizationSimulator {
    pub fn new(max_months: u32) -> Self {
        Self { max_months }
    }

    pub fn max_months(&self) -> u32 {
        self.max_months
    }

    pub fn schedule(
        &self,
        balance: Money,
        apr: Percent,
        monthly_payment: Money,
    ) -> AmortizationSchedule {
        AmortizationSchedule::new(balance, apr, monthly_payment, self.max_months)
    }

    /// Runs the schedule to completion.
    ///
    /// A payment too small to amortize the debt is not an error: the result
    /// comes back with `capped` set and `months_to_payoff` equal to the cap.
    /// Totals are unrounded.
    pub fn simulate(&self, balance: Money, apr: Percent, monthly_payment: Money) -> PayoffSummary {
        let mut schedule = self.schedule(balance, apr, monthly_payment);
        let mut total_interest = Money::ZERO;
        let mut total_paid = Money::ZERO;
        let mut months = 0;

        for step in schedule.by_ref() {
            total_interest = total_interest.saturating_add(step.interest_accrued);
            total_paid = total_paid.saturating_add(step.payment);
            months = step.month_index;
        }

        let capped = !schedule.is_paid_off();
        if capped {
            log::debug!(
                "amortization capped: balance={balance} apr={apr} payment={monthly_payment} \
                 remaining={}",
                schedule.remaining_balance()
            );
            months = self.max_months;
        }

        PayoffSummary {
            monthly_payment,
            months_to_payoff: months,
            total_interest,
            total_paid,
            capped,
        }
    }
}

/// The level payment that retires `balance` in exactly `months` months,
/// `balance * r * (1+r)^n / ((1+r)^n - 1)`, or `balance / n` at zero APR.
///
/// Unrounded. `months` must be positive.
pub fn amortized_payment(balance: Money, apr: Percent, months: u32) -> Money {
    let rate = apr.monthly_rate();
    let n = Decimal::from(months);
    if rate.is_zero() {
        return Money(balance.0 / n);
    }
    // `rate / (1 - (1+r)^-n)` keeps intermediates near the balance in size.
    let factor = (Decimal::ONE + rate)
        .checked_powi(i64::from(months))
        .filter(|growth| *growth > Decimal::ONE)
        .and_then(|growth| Decimal::ONE.checked_div(growth))
        .and_then(|discount| rate.checked_div(Decimal::ONE - discount))
        // Horizon so long the payment is effectively interest-only.
        .unwrap_or(rate);
    balance.saturating_mul(factor)
}
