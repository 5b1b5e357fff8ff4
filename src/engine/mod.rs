//! The what-if scenario engine.
//!
//! Every call is a pure function of its request: accounts arrive as snapshots
//! inside the params, nothing is fetched, and all loops are bounded by the
//! configured horizon and search-step caps.

pub mod amortization;
pub mod combined;
pub mod compare;
pub mod goal_seek;
mod narrative;
pub mod savings;
mod scenarios;
pub mod subscription;

use crate::config::EngineConfig;
use crate::domain::scenario::{ScenarioRequest, ScenarioResult, ScenarioType};
use crate::error::{Result, ScenarioError};
use amortization::AmortizationSimulator;
use combined::CombinedScenarioAggregator;
use compare::ScenarioComparator;
use goal_seek::GoalSeekSolver;
use savings::SavingsProjector;
use subscription::SubscriptionImpactCalculator;

pub struct ScenarioEngine {
    config: EngineConfig,
    simulator: AmortizationSimulator,
    solver: GoalSeekSolver,
    projector: SavingsProjector,
    subscriptions: SubscriptionImpactCalculator,
}

impl ScenarioEngine {
    pub fn new(config: EngineConfig) -> Self {
        let simulator = AmortizationSimulator::new(config.max_months);
        Self {
            solver: GoalSeekSolver::new(simulator, config.max_search_steps),
            projector: SavingsProjector::new(config.max_months),
            subscriptions: SubscriptionImpactCalculator,
            simulator,
            config,
        }
    }

    /// Runs one request to completion.
    ///
    /// Account references must already be resolved to snapshots; an
    /// unresolved `account_id` surfaces as [`ScenarioError::NotFound`].
    pub fn run(&self, request: &ScenarioRequest) -> Result<ScenarioResult> {
        log::debug!("running {} scenario", request.scenario_type());
        match request {
            ScenarioRequest::ExtraCreditPayment(p) => {
                self.extra_credit_payment(p).map(ScenarioResult::ExtraCreditPayment)
            }
            ScenarioRequest::SubscriptionCancellation(p) => self
                .subscription_cancellation(p)
                .map(ScenarioResult::SubscriptionCancellation),
            ScenarioRequest::IncreasedSavings(p) => {
                self.increased_savings(p).map(ScenarioResult::IncreasedSavings)
            }
            ScenarioRequest::GoalBasedPayment(p) => {
                self.goal_based_payment(p).map(ScenarioResult::GoalBasedPayment)
            }
            ScenarioRequest::Combined(p) => CombinedScenarioAggregator::new(self)
                .aggregate(&p.scenarios, p.months)
                .map(ScenarioResult::Combined),
            ScenarioRequest::Compare(p) => ScenarioComparator::new(self, &self.config.comparison)
                .compare(&p.scenario_a, &p.scenario_b)
                .map(ScenarioResult::Compare),
        }
    }

    /// Untyped entry point: `params` is the JSON object for `scenario_type`.
    /// Missing, mistyped or unknown keys are validation errors.
    pub fn run_scenario(
        &self,
        scenario_type: ScenarioType,
        params: serde_json::Value,
    ) -> Result<ScenarioResult> {
        let envelope = serde_json::json!({
            "scenario_type": scenario_type.as_str(),
            "params": params,
        });
        let request: ScenarioRequest = serde_json::from_value(envelope).map_err(|e| {
            ScenarioError::Validation(format!("invalid params for {scenario_type}: {e}"))
        })?;
        self.run(&request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Money;
    use crate::domain::scenario::TargetTimeline;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn engine() -> ScenarioEngine {
        ScenarioEngine::new(EngineConfig::default())
    }

    fn card() -> serde_json::Value {
        json!({"balance": "3400", "apr": "22", "minimum_payment": "102"})
    }

    #[test]
    fn test_extra_payment_saves_interest_and_months() {
        let result = engine()
            .run_scenario(
                ScenarioType::ExtraCreditPayment,
                json!({"account": card(), "extra_monthly_payment": 300}),
            )
            .unwrap();
        let ScenarioResult::ExtraCreditPayment(r) = result else {
            panic!("expected extra payment result");
        };
        assert_eq!(r.baseline.months_to_payoff, 52);
        assert_eq!(r.scenario.months_to_payoff, 10);
        assert_eq!(r.months_saved, 42);
        assert!(r.interest_saved.is_positive());
        assert_eq!(r.timeline.len(), 10);
    }

    #[test]
    fn test_zero_extra_reproduces_baseline() {
        let result = engine()
            .run_scenario(
                ScenarioType::ExtraCreditPayment,
                json!({"account": card(), "extra_monthly_payment": 0}),
            )
            .unwrap();
        let ScenarioResult::ExtraCreditPayment(r) = result else {
            panic!("expected extra payment result");
        };
        assert_eq!(r.baseline, r.scenario);
        assert_eq!(r.interest_saved, Money::ZERO);
        assert_eq!(r.months_saved, 0);
    }

    #[test]
    fn test_subscription_cancellation_totals() {
        let result = engine()
            .run_scenario(
                ScenarioType::SubscriptionCancellation,
                json!({"subscriptions": [
                    {"name": "Netflix", "monthly_amount": 15.99},
                    {"name": "Spotify", "monthly_amount": 10.99}
                ]}),
            )
            .unwrap();
        let ScenarioResult::SubscriptionCancellation(r) = result else {
            panic!("expected subscription result");
        };
        assert_eq!(r.monthly_savings, Money::new(dec!(26.98)));
        assert_eq!(r.annual_savings, Money::new(dec!(323.76)));
        assert_eq!(r.alternative_uses.len(), 4);
        assert!(r.alternative_uses[0].contains("$26.98/month"));
        assert!(r.alternative_uses[3].contains("$323.76/year"));
    }

    #[test]
    fn test_savings_projection() {
        let result = engine()
            .run_scenario(
                ScenarioType::IncreasedSavings,
                json!({
                    "current_balance": 0,
                    "monthly_amount": 500,
                    "annual_rate": 4.5,
                    "months": 12
                }),
            )
            .unwrap();
        let ScenarioResult::IncreasedSavings(r) = result else {
            panic!("expected savings result");
        };
        assert_eq!(r.final_balance, Money::new(dec!(6125.31)));
        assert_eq!(r.interest_earned, Money::new(dec!(125.31)));
        assert_eq!(r.timeline.len(), 12);
        assert_eq!(r.months_to_target, None);
    }

    #[test]
    fn test_goal_payment_round_trips_through_simulation() {
        let engine = engine();
        let result = engine
            .run_scenario(
                ScenarioType::GoalBasedPayment,
                json!({
                    "account": {"balance": 5000, "apr": 18.99, "minimum_payment": 150},
                    "target_months": 12
                }),
            )
            .unwrap();
        let ScenarioResult::GoalBasedPayment(r) = result else {
            panic!("expected goal result");
        };
        assert!(r.is_feasible);
        assert_eq!(r.goal.months_to_payoff, 12);
        assert_eq!(r.actual_months_if_capped, None);
        assert!(r.interest_saved.is_positive());
    }

    #[test]
    fn test_zero_rates_do_not_divide_by_zero() {
        let engine = engine();
        let account = json!({"balance": 1200, "apr": 0, "minimum_payment": 100});
        let zero_rate_savings = json!({
            "current_balance": 0,
            "monthly_amount": 100,
            "annual_rate": 0,
            "target_amount": 1000
        });
        for (scenario_type, params) in [
            (
                ScenarioType::ExtraCreditPayment,
                json!({"account": account.clone(), "extra_monthly_payment": 50}),
            ),
            (
                ScenarioType::GoalBasedPayment,
                json!({"account": account.clone(), "target_months": 6}),
            ),
            (ScenarioType::IncreasedSavings, zero_rate_savings.clone()),
        ] {
            engine.run_scenario(scenario_type, params).unwrap();
        }

        let savings = engine
            .run_scenario(ScenarioType::IncreasedSavings, zero_rate_savings)
            .unwrap();
        let ScenarioResult::IncreasedSavings(r) = savings else {
            panic!("expected savings result");
        };
        assert_eq!(r.months_to_target, Some(TargetTimeline::Reached { months: 10 }));
    }

    #[test]
    fn test_identical_inputs_serialize_identically() {
        let engine = engine();
        let params = json!({
            "scenario_a": {"scenario_type": "extra_credit_payment",
                           "params": {"account": card(), "extra_monthly_payment": 300}},
            "scenario_b": {"scenario_type": "increased_savings",
                           "params": {"current_balance": 0, "monthly_amount": 300}}
        });
        let first = engine.run_scenario(ScenarioType::Compare, params.clone()).unwrap();
        let second = engine.run_scenario(ScenarioType::Compare, params).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_invalid_params_are_validation_errors() {
        let engine = engine();
        let cases = [
            (ScenarioType::ExtraCreditPayment, json!({"extra_monthly_payment": 10})),
            (
                ScenarioType::ExtraCreditPayment,
                json!({"account": card(), "extra_monthly_payment": -10}),
            ),
            (
                ScenarioType::GoalBasedPayment,
                json!({"account": card(), "target_months": 0}),
            ),
            (
                ScenarioType::IncreasedSavings,
                json!({"current_balance": 0, "monthly_amount": 100, "months": 0}),
            ),
            (
                ScenarioType::SubscriptionCancellation,
                json!({"subscriptions": [], "unexpected": true}),
            ),
            (ScenarioType::Combined, json!({"scenarios": []})),
        ];
        for (scenario_type, params) in cases {
            let result = engine.run_scenario(scenario_type, params.clone());
            assert!(
                matches!(result, Err(ScenarioError::Validation(_))),
                "{scenario_type} {params} gave {result:?}"
            );
        }
    }

    #[test]
    fn test_oversized_amounts_are_validation_errors() {
        let engine = engine();
        let huge = "70000000000000000000000000000";
        let cases = [
            (
                ScenarioType::GoalBasedPayment,
                json!({
                    "account": {
                        "balance": "1000000000000000000000000000",
                        "apr": 20,
                        "minimum_payment": 100
                    },
                    "target_months": 12
                }),
            ),
            (
                ScenarioType::ExtraCreditPayment,
                json!({
                    "account": {"balance": 5000, "apr": 20, "minimum_payment": huge},
                    "extra_monthly_payment": huge
                }),
            ),
            (
                ScenarioType::SubscriptionCancellation,
                json!({
                    "subscriptions": [{"name": "Yacht", "monthly_amount": "10000000000"}],
                    "baseline_recurring_spend": "0.000000000000000001"
                }),
            ),
            (
                ScenarioType::SubscriptionCancellation,
                json!({"subscriptions": [
                    {"name": "Jet", "monthly_amount": huge},
                    {"name": "Island", "monthly_amount": huge}
                ]}),
            ),
            (
                ScenarioType::IncreasedSavings,
                json!({"current_balance": 0, "monthly_amount": huge}),
            ),
            (
                ScenarioType::IncreasedSavings,
                json!({
                    "current_balance": 1000,
                    "monthly_amount": 100,
                    "monthly_expenses": "0.0000000000000000000000000001"
                }),
            ),
        ];
        for (scenario_type, params) in cases {
            let result = engine.run_scenario(scenario_type, params.clone());
            assert!(
                matches!(result, Err(ScenarioError::Validation(_))),
                "{scenario_type} {params} gave {result:?}"
            );
        }
    }

    #[test]
    fn test_largest_accepted_subscription_saturates_reduction() {
        let result = engine()
            .run_scenario(
                ScenarioType::SubscriptionCancellation,
                json!({
                    "subscriptions": [{"name": "Yacht", "monthly_amount": "1000000000"}],
                    "baseline_recurring_spend": "0.000000000000000001"
                }),
            )
            .unwrap();
        let ScenarioResult::SubscriptionCancellation(r) = result else {
            panic!("expected subscription result");
        };
        assert_eq!(r.percent_reduction.value(), dec!(100));
        assert_eq!(r.annual_savings, Money::new(dec!(12000000000)));
    }

    #[test]
    fn test_runaway_balances_report_capped_results() {
        let engine = engine();
        let runaway = json!({
            "account": {"balance": "1000000000", "apr": 100, "minimum_payment": 0},
            "extra_monthly_payment": 0
        });
        let result = engine
            .run_scenario(ScenarioType::ExtraCreditPayment, runaway.clone())
            .unwrap();
        let ScenarioResult::ExtraCreditPayment(r) = result else {
            panic!("expected extra payment result");
        };
        assert!(r.baseline.capped);
        assert_eq!(r.baseline.months_to_payoff, engine.config.max_months);
        assert!(r.recommendation.contains("at least"));

        let plan = json!({"scenarios": [
            {"scenario_type": "extra_credit_payment", "params": runaway.clone()},
            {"scenario_type": "extra_credit_payment", "params": runaway.clone()},
            {"scenario_type": "goal_based_payment", "params": {
                "account": {"balance": "1000000000", "apr": 100, "minimum_payment": 0},
                "target_months": 600
            }}
        ]});
        let ScenarioResult::Combined(combined) =
            engine.run_scenario(ScenarioType::Combined, plan).unwrap()
        else {
            panic!("expected combined result");
        };
        assert_eq!(combined.individual_results.len(), 3);
        assert!(!combined.total_interest_saved.value().is_sign_negative());

        let compare = json!({
            "scenario_a": {"scenario_type": "extra_credit_payment", "params": runaway},
            "scenario_b": {"scenario_type": "increased_savings", "params": {
                "current_balance": "1000000000",
                "monthly_amount": "1000000000"
            }}
        });
        engine.run_scenario(ScenarioType::Compare, compare).unwrap();
    }

    #[test]
    fn test_unresolved_account_is_not_found() {
        let result = engine().run_scenario(
            ScenarioType::ExtraCreditPayment,
            json!({"account": {"account_id": "visa-1"}, "extra_monthly_payment": 50}),
        );
        assert!(matches!(result, Err(ScenarioError::NotFound(_))));
    }
}
