use super::ScenarioEngine;
use super::narrative;
use crate::config::ComparisonPolicy;
use crate::domain::money::Money;
use crate::domain::scenario::{
    BetterScenario, ComparisonBasis, ComparisonResult, ScenarioRequest, ScenarioResult,
};
use crate::error::{Result, ScenarioError};
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// Ranks two hypotheticals.
///
/// Scenarios of the same single type are ranked by that type's primary metric.
/// Anything else is ranked by annualized benefit under the configured
/// [`ComparisonPolicy`], so raw metrics of different kinds are never compared.
/// Equal metrics go to the scenario asking the smaller monthly commitment.
pub struct ScenarioComparator<'a> {
    engine: &'a ScenarioEngine,
    policy: &'a ComparisonPolicy,
}

impl<'a> ScenarioComparator<'a> {
    pub fn new(engine: &'a ScenarioEngine, policy: &'a ComparisonPolicy) -> Self {
        Self { engine, policy }
    }

    pub fn compare(
        &self,
        scenario_a: &ScenarioRequest,
        scenario_b: &ScenarioRequest,
    ) -> Result<ComparisonResult> {
        for request in [scenario_a, scenario_b] {
            if let ScenarioRequest::Compare(_) = request {
                return Err(ScenarioError::validation(
                    "a comparison cannot contain another comparison",
                ));
            }
        }

        let result_a = self.engine.run(scenario_a)?;
        let result_b = self.engine.run(scenario_b)?;

        let basis = basis_for(&result_a, &result_b);
        let metric_a = self.metric(&result_a, basis).round_cents();
        let metric_b = self.metric(&result_b, basis).round_cents();

        let (better_scenario, by_effort) = match metric_a.cmp(&metric_b) {
            Ordering::Greater => (BetterScenario::A, false),
            Ordering::Less => (BetterScenario::B, false),
            Ordering::Equal => match effort(&result_a).cmp(&effort(&result_b)) {
                Ordering::Less => (BetterScenario::A, true),
                Ordering::Greater => (BetterScenario::B, true),
                Ordering::Equal => (BetterScenario::Tie, false),
            },
        };
        log::debug!(
            "compared {} vs {} on {basis:?}: {metric_a} vs {metric_b} -> {better_scenario:?}",
            result_a.scenario_type(),
            result_b.scenario_type()
        );

        let recommendation = narrative::comparison(
            better_scenario,
            metric_a.saturating_sub(metric_b).abs(),
            basis_label(basis),
            by_effort,
        );
        Ok(ComparisonResult {
            result_a: Box::new(result_a),
            result_b: Box::new(result_b),
            basis,
            metric_a,
            metric_b,
            better_scenario,
            recommendation,
        })
    }

    fn metric(&self, result: &ScenarioResult, basis: ComparisonBasis) -> Money {
        match (basis, result) {
            (ComparisonBasis::InterestSaved, ScenarioResult::ExtraCreditPayment(r)) => {
                r.interest_saved
            }
            (ComparisonBasis::InterestSaved, ScenarioResult::GoalBasedPayment(r)) => {
                r.interest_saved
            }
            (ComparisonBasis::MonthlySavings, ScenarioResult::SubscriptionCancellation(r)) => {
                r.monthly_savings
            }
            (ComparisonBasis::FinalBalance, ScenarioResult::IncreasedSavings(r)) => {
                r.final_balance
            }
            _ => self.annualized_benefit(result),
        }
    }

    /// Money gained per year: interest avoided, spend cancelled, or interest earned,
    /// each spread over the horizon it accrues across and weighted by policy.
    pub fn annualized_benefit(&self, result: &ScenarioResult) -> Money {
        match result {
            ScenarioResult::ExtraCreditPayment(r) => {
                per_year(r.interest_saved, r.scenario.months_to_payoff)
                    .saturating_mul(self.policy.debt_weight)
            }
            ScenarioResult::GoalBasedPayment(r) => {
                per_year(r.interest_saved, r.goal.months_to_payoff)
                    .saturating_mul(self.policy.debt_weight)
            }
            ScenarioResult::SubscriptionCancellation(r) => {
                r.annual_savings.saturating_mul(self.policy.subscription_weight)
            }
            ScenarioResult::IncreasedSavings(r) => {
                per_year(r.interest_earned, r.projection_months)
                    .saturating_mul(self.policy.savings_weight)
            }
            ScenarioResult::Combined(r) => r
                .individual_results
                .iter()
                .map(|sub| self.annualized_benefit(sub))
                .sum(),
            ScenarioResult::Compare(_) => Money::ZERO,
        }
    }
}

fn is_debt_payment(result: &ScenarioResult) -> bool {
    matches!(
        result,
        ScenarioResult::ExtraCreditPayment(_) | ScenarioResult::GoalBasedPayment(_)
    )
}

fn basis_for(a: &ScenarioResult, b: &ScenarioResult) -> ComparisonBasis {
    match (a, b) {
        _ if is_debt_payment(a) && is_debt_payment(b) => ComparisonBasis::InterestSaved,
        (
            ScenarioResult::SubscriptionCancellation(_),
            ScenarioResult::SubscriptionCancellation(_),
        ) => ComparisonBasis::MonthlySavings,
        (ScenarioResult::IncreasedSavings(_), ScenarioResult::IncreasedSavings(_)) => {
            ComparisonBasis::FinalBalance
        }
        _ => ComparisonBasis::AnnualizedBenefit,
    }
}

fn basis_label(basis: ComparisonBasis) -> &'static str {
    match basis {
        ComparisonBasis::InterestSaved => "interest saved",
        ComparisonBasis::MonthlySavings => "monthly savings",
        ComparisonBasis::FinalBalance => "final balance",
        ComparisonBasis::AnnualizedBenefit => "annualized benefit",
    }
}

fn per_year(amount: Money, months: u32) -> Money {
    Money(amount.value() / Decimal::from(months.max(1))).annualized()
}

/// The monthly amount a scenario asks the user to commit.
fn effort(result: &ScenarioResult) -> Money {
    match result {
        ScenarioResult::ExtraCreditPayment(r) => r.extra_payment.abs(),
        ScenarioResult::GoalBasedPayment(r) => {
            (r.goal.monthly_payment - r.current_minimum_payment).floor_zero()
        }
        ScenarioResult::SubscriptionCancellation(r) => r.monthly_savings.abs(),
        ScenarioResult::IncreasedSavings(r) => r.monthly_contribution.abs(),
        ScenarioResult::Combined(r) => r.individual_results.iter().map(effort).sum(),
        ScenarioResult::Compare(_) => Money::ZERO,
    }
}
