//! Scenario requests and results.
//!
//! A request is the pair `(scenario_type, params)`; on the wire it is an
//! adjacently tagged object `{"scenario_type": "...", "params": {...}}`.
//! Results are immutable value objects tagged by the same `scenario_type`.

use super::account::{AccountRef, SubscriptionItem};
use super::money::{Money, Percent};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioType {
    ExtraCreditPayment,
    SubscriptionCancellation,
    IncreasedSavings,
    GoalBasedPayment,
    Combined,
    Compare,
}

impl ScenarioType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioType::ExtraCreditPayment => "extra_credit_payment",
            ScenarioType::SubscriptionCancellation => "subscription_cancellation",
            ScenarioType::IncreasedSavings => "increased_savings",
            ScenarioType::GoalBasedPayment => "goal_based_payment",
            ScenarioType::Combined => "combined",
            ScenarioType::Compare => "compare",
        }
    }
}

impl fmt::Display for ScenarioType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scenario_type", content = "params", rename_all = "snake_case")]
pub enum ScenarioRequest {
    ExtraCreditPayment(ExtraPaymentParams),
    SubscriptionCancellation(SubscriptionParams),
    IncreasedSavings(SavingsParams),
    GoalBasedPayment(GoalPaymentParams),
    Combined(CombinedParams),
    Compare(CompareParams),
}

impl ScenarioRequest {
    pub fn scenario_type(&self) -> ScenarioType {
        match self {
            ScenarioRequest::ExtraCreditPayment(_) => ScenarioType::ExtraCreditPayment,
            ScenarioRequest::SubscriptionCancellation(_) => ScenarioType::SubscriptionCancellation,
            ScenarioRequest::IncreasedSavings(_) => ScenarioType::IncreasedSavings,
            ScenarioRequest::GoalBasedPayment(_) => ScenarioType::GoalBasedPayment,
            ScenarioRequest::Combined(_) => ScenarioType::Combined,
            ScenarioRequest::Compare(_) => ScenarioType::Compare,
        }
    }

    /// Mutable access to every account reference in the request tree, nested
    /// scenarios included.
    pub fn account_refs_mut(&mut self) -> Vec<&mut AccountRef> {
        match self {
            ScenarioRequest::ExtraCreditPayment(p) => vec![&mut p.account],
            ScenarioRequest::GoalBasedPayment(p) => vec![&mut p.account],
            ScenarioRequest::SubscriptionCancellation(_) | ScenarioRequest::IncreasedSavings(_) => {
                Vec::new()
            }
            ScenarioRequest::Combined(p) => p
                .scenarios
                .iter_mut()
                .flat_map(|s| s.account_refs_mut())
                .collect(),
            ScenarioRequest::Compare(p) => {
                let mut refs = p.scenario_a.account_refs_mut();
                refs.extend(p.scenario_b.account_refs_mut());
                refs
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtraPaymentParams {
    pub account: AccountRef,
    pub extra_monthly_payment: Money,
    /// Length of the reported balance timeline.
    #[serde(default)]
    pub months: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubscriptionParams {
    pub subscriptions: Vec<SubscriptionItem>,
    #[serde(default)]
    pub baseline_recurring_spend: Option<Money>,
    /// Length of the reported cumulative savings timeline.
    #[serde(default)]
    pub months: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SavingsParams {
    pub current_balance: Money,
    pub monthly_amount: Money,
    #[serde(default)]
    pub target_amount: Option<Money>,
    #[serde(default)]
    pub annual_rate: Option<Percent>,
    #[serde(default)]
    pub months: Option<u32>,
    /// Average monthly expenses, used to derive emergency-fund coverage.
    #[serde(default)]
    pub monthly_expenses: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GoalPaymentParams {
    pub account: AccountRef,
    pub target_months: i64,
    #[serde(default)]
    pub max_monthly_payment: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CombinedParams {
    pub scenarios: Vec<ScenarioRequest>,
    #[serde(default)]
    pub months: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompareParams {
    pub scenario_a: Box<ScenarioRequest>,
    pub scenario_b: Box<ScenarioRequest>,
}

/// Outcome of one amortization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffSummary {
    pub monthly_payment: Money,
    pub months_to_payoff: u32,
    pub total_interest: Money,
    pub total_paid: Money,
    /// The horizon cap was reached before the balance hit zero.
    pub capped: bool,
}

impl PayoffSummary {
    pub fn rounded(self) -> Self {
        Self {
            monthly_payment: self.monthly_payment.round_cents(),
            total_interest: self.total_interest.round_cents(),
            total_paid: self.total_paid.round_cents(),
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancePoint {
    pub month: u32,
    pub balance: Money,
    pub interest_accrued: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utilization: Option<Percent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraPaymentResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    pub current_balance: Money,
    pub apr: Percent,
    pub extra_payment: Money,
    pub baseline: PayoffSummary,
    pub scenario: PayoffSummary,
    pub interest_saved: Money,
    pub months_saved: u32,
    pub percent_interest_saved: Percent,
    pub timeline: Vec<BalancePoint>,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CumulativeSavings {
    pub month: u32,
    pub cumulative_savings: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionResult {
    pub subscriptions: Vec<SubscriptionItem>,
    pub monthly_savings: Money,
    pub annual_savings: Money,
    pub percent_reduction: Percent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_recurring_spend: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_recurring_spend: Option<Money>,
    pub timeline: Vec<CumulativeSavings>,
    /// Ways to redirect the freed cash.
    pub alternative_uses: Vec<String>,
    pub recommendation: String,
}

/// When a savings target is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TargetTimeline {
    Reached { months: u32 },
    /// Not reachable within the projection horizon cap.
    Unreachable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsPoint {
    pub month: u32,
    pub balance: Money,
    pub contributions: Money,
    pub interest_earned: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsResult {
    pub current_balance: Money,
    pub monthly_contribution: Money,
    pub annual_rate: Percent,
    pub projection_months: u32,
    pub final_balance: Money,
    pub total_contributions: Money,
    pub interest_earned: Money,
    pub balance_increase: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub months_to_target: Option<TargetTimeline>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_fund_months: Option<Decimal>,
    pub timeline: Vec<SavingsPoint>,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalPaymentResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    pub current_balance: Money,
    pub apr: Percent,
    pub target_months: u32,
    pub required_monthly_payment: Money,
    pub is_feasible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_monthly_payment: Option<Money>,
    /// Payoff horizon at `max_monthly_payment` when the goal is infeasible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_months_if_capped: Option<u32>,
    pub current_minimum_payment: Money,
    pub payment_increase: Money,
    pub baseline: PayoffSummary,
    /// Payoff at the payment the plan actually uses: the required payment,
    /// or the maximum affordable one when infeasible.
    pub goal: PayoffSummary,
    pub interest_saved: Money,
    pub months_saved: u32,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedResult {
    pub individual_results: Vec<ScenarioResult>,
    pub monthly_cash_flow_impact: Money,
    pub annual_cash_flow_impact: Money,
    pub total_interest_saved: Money,
    /// Annual savings from all subscription cancellations.
    pub total_subscription_savings: Money,
    pub projection_months: u32,
    pub summary: Vec<String>,
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetterScenario {
    A,
    B,
    Tie,
}

/// The metric two scenarios were ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonBasis {
    InterestSaved,
    MonthlySavings,
    FinalBalance,
    AnnualizedBenefit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub result_a: Box<ScenarioResult>,
    pub result_b: Box<ScenarioResult>,
    pub basis: ComparisonBasis,
    pub metric_a: Money,
    pub metric_b: Money,
    pub better_scenario: BetterScenario,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scenario_type", rename_all = "snake_case")]
pub enum ScenarioResult {
    ExtraCreditPayment(ExtraPaymentResult),
    SubscriptionCancellation(SubscriptionResult),
    IncreasedSavings(SavingsResult),
    GoalBasedPayment(GoalPaymentResult),
    Combined(CombinedResult),
    Compare(ComparisonResult),
}

impl ScenarioResult {
    pub fn scenario_type(&self) -> ScenarioType {
        match self {
            ScenarioResult::ExtraCreditPayment(_) => ScenarioType::ExtraCreditPayment,
            ScenarioResult::SubscriptionCancellation(_) => ScenarioType::SubscriptionCancellation,
            ScenarioResult::IncreasedSavings(_) => ScenarioType::IncreasedSavings,
            ScenarioResult::GoalBasedPayment(_) => ScenarioType::GoalBasedPayment,
            ScenarioResult::Combined(_) => ScenarioType::Combined,
            ScenarioResult::Compare(_) => ScenarioType::Compare,
        }
    }
}
