use crate::domain::money::{Money, Percent};
use crate::domain::scenario::TargetTimeline;
use crate::error::{Result, ScenarioError};
use rust_decimal::{Decimal, MathematicalOps};

/// Compound growth of a savings balance with a fixed end-of-month contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavingsProjection {
    pub final_balance: Money,
    pub total_contributions: Money,
    pub interest_earned: Money,
    /// Present only when a target was supplied.
    pub months_to_target: Option<TargetTimeline>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavingsStep {
    /// 1-based month number.
    pub month_index: u32,
    pub balance: Money,
    pub contributions: Money,
    pub interest_earned: Money,
}

/// Month-by-month savings recurrence `b' = b * (1 + r) + c`, bounded by a horizon cap.
#[derive(Debug, Clone)]
pub struct SavingsSchedule {
    opening: Money,
    balance: Money,
    monthly_rate: Decimal,
    contribution: Money,
    month: u32,
    max_months: u32,
    overflowed: bool,
}

impl SavingsSchedule {
    pub fn new(opening: Money, contribution: Money, annual_rate: Percent, max_months: u32) -> Self {
        Self {
            opening,
            balance: opening,
            monthly_rate: annual_rate.monthly_rate(),
            contribution,
            month: 0,
            max_months,
            overflowed: false,
        }
    }
}

impl Iterator for SavingsSchedule {
    type Item = SavingsStep;

    fn next(&mut self) -> Option<Self::Item> {
        if self.overflowed || self.month >= self.max_months {
            return None;
        }
        let Some(balance) = self
            .balance
            .checked_mul(Decimal::ONE + self.monthly_rate)
            .and_then(|grown| grown.checked_add(self.contribution))
        else {
            self.overflowed = true;
            return None;
        };

        self.balance = balance;
        self.month += 1;
        let contributions = self.contribution * Decimal::from(self.month);
        Some(SavingsStep {
            month_index: self.month,
            balance,
            contributions,
            interest_earned: balance - self.opening - contributions,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SavingsProjector {
    max_months: u32,
}

impl SavingsProjector {
    pub fn new(max_months: u32) -> Self {
        Self { max_months }
    }

    pub fn schedule(
        &self,
        current_balance: Money,
        monthly_contribution: Money,
        annual_rate: Percent,
    ) -> SavingsSchedule {
        SavingsSchedule::new(current_balance, monthly_contribution, annual_rate, self.max_months)
    }

    /// Projects the balance after `months` months using the closed-form future
    /// value `c * ((1+r)^n - 1) / r + b * (1+r)^n`, or `b + c * n` at zero rate.
    ///
    /// Unrounded.
    pub fn project(
        &self,
        current_balance: Money,
        monthly_contribution: Money,
        annual_rate: Percent,
        months: u32,
        target_amount: Option<Money>,
    ) -> Result<SavingsProjection> {
        let rate = annual_rate.monthly_rate();
        let n = Decimal::from(months);
        let total_contributions = monthly_contribution * n;

        let final_balance = if rate.is_zero() {
            current_balance + total_contributions
        } else {
            (Decimal::ONE + rate)
                .checked_powi(i64::from(months))
                .and_then(|growth| {
                    let annuity = monthly_contribution
                        .0
                        .checked_mul(growth - Decimal::ONE)?
                        .checked_div(rate)?;
                    let compounded = current_balance.0.checked_mul(growth)?;
                    annuity.checked_add(compounded)
                })
                .map(Money)
                .ok_or_else(|| {
                    ScenarioError::validation("savings projection exceeds representable amounts")
                })?
        };

        let months_to_target = target_amount.map(|target| {
            self.months_to_target(current_balance, monthly_contribution, annual_rate, target)
        });

        Ok(SavingsProjection {
            final_balance,
            total_contributions,
            interest_earned: final_balance - current_balance - total_contributions,
            months_to_target,
        })
    }

    fn months_to_target(
        &self,
        current_balance: Money,
        monthly_contribution: Money,
        annual_rate: Percent,
        target: Money,
    ) -> TargetTimeline {
        if current_balance >= target {
            return TargetTimeline::Reached { months: 0 };
        }
        let grows = monthly_contribution.is_positive()
            || (current_balance.is_positive() && annual_rate.value() > Decimal::ZERO);
        if !grows {
            return TargetTimeline::Unreachable;
        }
        self.schedule(current_balance, monthly_contribution, annual_rate)
            .find(|step| step.balance >= target)
            .map_or(TargetTimeline::Unreachable, |step| TargetTimeline::Reached {
                months: step.month_index,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn projector() -> SavingsProjector {
        SavingsProjector::new(600)
    }

    #[test]
    fn test_future_value_of_annuity() {
        let projection = projector()
            .project(
                Money::ZERO,
                Money::new(dec!(500)),
                Percent::new(dec!(4.5)),
                12,
                None,
            )
            .unwrap();
        assert_eq!(projection.final_balance.round_cents(), Money::new(dec!(6125.31)));
        assert_eq!(projection.total_contributions, Money::new(dec!(6000)));
        assert_eq!(projection.interest_earned.round_cents(), Money::new(dec!(125.31)));
        assert_eq!(projection.months_to_target, None);
    }

    #[test]
    fn test_closed_form_matches_recurrence() {
        let current = Money::new(dec!(1500));
        let contribution = Money::new(dec!(250));
        let rate = Percent::new(dec!(5.25));
        let projection = projector().project(current, contribution, rate, 36, None).unwrap();
        let last = projector()
            .schedule(current, contribution, rate)
            .take(36)
            .last()
            .unwrap();
        assert_eq!(last.month_index, 36);
        assert_eq!(last.balance.round_cents(), projection.final_balance.round_cents());
    }

    #[test]
    fn test_zero_rate_is_linear() {
        let projection = projector()
            .project(
                Money::new(dec!(100)),
                Money::new(dec!(50)),
                Percent::ZERO,
                12,
                Some(Money::new(dec!(700))),
            )
            .unwrap();
        assert_eq!(projection.final_balance, Money::new(dec!(700)));
        assert_eq!(projection.interest_earned, Money::ZERO);
        assert_eq!(
            projection.months_to_target,
            Some(TargetTimeline::Reached { months: 12 })
        );
    }

    #[test]
    fn test_months_to_target_with_interest() {
        let projection = projector()
            .project(
                Money::ZERO,
                Money::new(dec!(500)),
                Percent::new(dec!(4.5)),
                12,
                Some(Money::new(dec!(3000))),
            )
            .unwrap();
        assert_eq!(
            projection.months_to_target,
            Some(TargetTimeline::Reached { months: 6 })
        );
    }

    #[test]
    fn test_interest_alone_can_reach_target() {
        let projection = projector()
            .project(
                Money::new(dec!(1000)),
                Money::ZERO,
                Percent::new(dec!(4.5)),
                12,
                Some(Money::new(dec!(1010))),
            )
            .unwrap();
        assert_eq!(
            projection.months_to_target,
            Some(TargetTimeline::Reached { months: 3 })
        );
    }

    #[test]
    fn test_target_already_met() {
        let projection = projector()
            .project(
                Money::new(dec!(5000)),
                Money::ZERO,
                Percent::ZERO,
                12,
                Some(Money::new(dec!(4000))),
            )
            .unwrap();
        assert_eq!(
            projection.months_to_target,
            Some(TargetTimeline::Reached { months: 0 })
        );
    }

    #[test]
    fn test_no_contribution_no_growth_is_unreachable() {
        let projection = projector()
            .project(
                Money::new(dec!(100)),
                Money::ZERO,
                Percent::ZERO,
                12,
                Some(Money::new(dec!(1000))),
            )
            .unwrap();
        assert_eq!(projection.months_to_target, Some(TargetTimeline::Unreachable));

        let projection = projector()
            .project(
                Money::ZERO,
                Money::ZERO,
                Percent::new(dec!(4.5)),
                12,
                Some(Money::new(dec!(1000))),
            )
            .unwrap();
        assert_eq!(projection.months_to_target, Some(TargetTimeline::Unreachable));
    }

    #[test]
    fn test_target_beyond_horizon_is_unreachable() {
        let projection = SavingsProjector::new(24)
            .project(
                Money::ZERO,
                Money::new(dec!(10)),
                Percent::ZERO,
                12,
                Some(Money::new(dec!(1000))),
            )
            .unwrap();
        assert_eq!(projection.months_to_target, Some(TargetTimeline::Unreachable));
    }
}
