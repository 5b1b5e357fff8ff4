use super::ScenarioEngine;
use super::narrative;
use crate::domain::money::Money;
use crate::domain::scenario::{CombinedResult, ScenarioRequest, ScenarioResult};
use crate::error::{Result, ScenarioError};

/// Sums the independent effects of several single scenarios.
///
/// Each sub-scenario runs in isolation through the single-scenario components.
/// Interactions are not modeled: cash freed by a cancellation is not fed back
/// into a debt payoff, and the result says so.
pub struct CombinedScenarioAggregator<'a> {
    engine: &'a ScenarioEngine,
}

#[derive(Default)]
struct Totals {
    monthly_cash_flow: Money,
    interest_saved: Money,
    subscription_monthly: Money,
    frees_cash: bool,
    uses_cash: bool,
    debt_scenarios: usize,
}

impl<'a> CombinedScenarioAggregator<'a> {
    pub fn new(engine: &'a ScenarioEngine) -> Self {
        Self { engine }
    }

    pub fn aggregate(
        &self,
        scenarios: &[ScenarioRequest],
        months: Option<u32>,
    ) -> Result<CombinedResult> {
        if scenarios.is_empty() {
            return Err(ScenarioError::validation(
                "combined scenario needs at least one sub-scenario",
            ));
        }
        let projection_months = self.engine.projection_months(months)?;

        let mut totals = Totals::default();
        let mut results = Vec::with_capacity(scenarios.len());
        for request in scenarios {
            let result = self.run_one(&with_months(request, months))?;
            totals.add(&result);
            results.push(result);
        }

        let mut summary: Vec<String> = results.iter().map(narrative::summary_line).collect();
        if (totals.frees_cash && totals.uses_cash) || totals.debt_scenarios > 1 {
            summary.push(narrative::INDEPENDENT_MODELING_NOTE.to_string());
        }

        let monthly = totals.monthly_cash_flow.round_cents();
        let interest_saved = totals.interest_saved.round_cents();
        let subscription_annual = totals.subscription_monthly.annualized().round_cents();
        Ok(CombinedResult {
            individual_results: results,
            monthly_cash_flow_impact: monthly,
            annual_cash_flow_impact: monthly.annualized().round_cents(),
            total_interest_saved: interest_saved,
            total_subscription_savings: subscription_annual,
            projection_months,
            summary,
            recommendation: narrative::combined(monthly, interest_saved, subscription_annual),
        })
    }

    fn run_one(&self, request: &ScenarioRequest) -> Result<ScenarioResult> {
        match request {
            ScenarioRequest::ExtraCreditPayment(p) => {
                self.engine.extra_credit_payment(p).map(ScenarioResult::ExtraCreditPayment)
            }
            ScenarioRequest::SubscriptionCancellation(p) => self
                .engine
                .subscription_cancellation(p)
                .map(ScenarioResult::SubscriptionCancellation),
            ScenarioRequest::IncreasedSavings(p) => {
                self.engine.increased_savings(p).map(ScenarioResult::IncreasedSavings)
            }
            ScenarioRequest::GoalBasedPayment(p) => {
                self.engine.goal_based_payment(p).map(ScenarioResult::GoalBasedPayment)
            }
            ScenarioRequest::Combined(_) | ScenarioRequest::Compare(_) => {
                Err(ScenarioError::Validation(format!(
                    "a combined scenario cannot contain a '{}' scenario",
                    request.scenario_type()
                )))
            }
        }
    }
}

impl Totals {
    fn add(&mut self, result: &ScenarioResult) {
        match result {
            ScenarioResult::ExtraCreditPayment(r) => {
                self.monthly_cash_flow = self.monthly_cash_flow.saturating_sub(r.extra_payment);
                self.interest_saved = self.interest_saved.saturating_add(r.interest_saved);
                self.uses_cash = true;
                self.debt_scenarios += 1;
            }
            ScenarioResult::GoalBasedPayment(r) => {
                let increase = (r.goal.monthly_payment - r.current_minimum_payment).floor_zero();
                self.monthly_cash_flow = self.monthly_cash_flow.saturating_sub(increase);
                self.interest_saved = self.interest_saved.saturating_add(r.interest_saved);
                self.uses_cash = true;
                self.debt_scenarios += 1;
            }
            ScenarioResult::SubscriptionCancellation(r) => {
                self.monthly_cash_flow = self.monthly_cash_flow.saturating_add(r.monthly_savings);
                self.subscription_monthly =
                    self.subscription_monthly.saturating_add(r.monthly_savings);
                self.frees_cash = true;
            }
            ScenarioResult::IncreasedSavings(r) => {
                self.monthly_cash_flow =
                    self.monthly_cash_flow.saturating_sub(r.monthly_contribution);
                self.uses_cash = true;
            }
            // Rejected before they run.
            ScenarioResult::Combined(_) | ScenarioResult::Compare(_) => {}
        }
    }
}

/// Applies the plan-level horizon to sub-scenarios that did not set their own.
fn with_months(request: &ScenarioRequest, months: Option<u32>) -> ScenarioRequest {
    let mut request = request.clone();
    if let Some(months) = months {
        match &mut request {
            ScenarioRequest::ExtraCreditPayment(p) => {
                p.months.get_or_insert(months);
            }
            ScenarioRequest::SubscriptionCancellation(p) => {
                p.months.get_or_insert(months);
            }
            ScenarioRequest::IncreasedSavings(p) => {
                p.months.get_or_insert(months);
            }
            _ => {}
        }
    }
    request
}
