use crate::domain::account::SubscriptionItem;
use crate::domain::money::{Money, Percent};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionImpact {
    pub monthly_savings: Money,
    pub annual_savings: Money,
    /// Share of the baseline recurring spend removed, in `[0, 100]`.
    pub percent_reduction: Percent,
}

/// Savings from cancelling recurring charges. No time dimension.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubscriptionImpactCalculator;

impl SubscriptionImpactCalculator {
    /// `baseline_recurring_spend` is the caller's total monthly recurring spend;
    /// without one, or when it is zero, the reduction is reported as zero.
    pub fn calculate(
        &self,
        subscriptions: &[SubscriptionItem],
        baseline_recurring_spend: Option<Money>,
    ) -> SubscriptionImpact {
        let monthly_savings: Money = subscriptions.iter().map(|s| s.monthly_amount).sum();
        let percent_reduction = baseline_recurring_spend
            .map(|baseline| {
                Percent::ratio(monthly_savings, baseline)
                    .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
            })
            .unwrap_or(Percent::ZERO);

        SubscriptionImpact {
            monthly_savings,
            annual_savings: monthly_savings.annualized(),
            percent_reduction,
        }
    }
}
