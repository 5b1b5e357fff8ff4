//! Human-readable recommendation lines attached to results.

use crate::domain::money::Money;
use crate::domain::scenario::{BetterScenario, ScenarioResult, TargetTimeline};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub(crate) fn extra_payment(
    interest_saved: Money,
    months_saved: u32,
    baseline_capped: bool,
) -> String {
    if baseline_capped {
        return format!(
            "Your minimum payment barely covers interest, so the balance would not be paid off at \
             this rate. The extra payment saves at least {interest_saved} in interest."
        );
    }
    if interest_saved > Money::new(dec!(1000)) {
        format!(
            "Excellent impact! Paying extra saves {interest_saved} in interest and gets you \
             debt-free {months_saved} months sooner."
        )
    } else if interest_saved > Money::new(dec!(500)) {
        format!(
            "Good strategy. You'll save {interest_saved} in interest and pay off your balance \
             {months_saved} months faster."
        )
    } else {
        format!("This saves {interest_saved} and shortens your payoff by {months_saved} months.")
    }
}

pub(crate) fn subscriptions(monthly_savings: Money, count: usize) -> String {
    let annual = monthly_savings.annualized();
    if monthly_savings > Money::new(dec!(100)) {
        format!(
            "Significant savings opportunity! Cancelling these {count} subscriptions frees up \
             {monthly_savings}/month ({annual}/year)."
        )
    } else {
        format!("Cancelling these subscriptions saves {monthly_savings}/month ({annual}/year).")
    }
}

pub(crate) fn alternative_uses(monthly_savings: Money) -> Vec<String> {
    vec![
        format!("Emergency fund: add {monthly_savings}/month to savings"),
        format!("Debt payoff: put {monthly_savings}/month toward credit card balances"),
        format!("Investment: contribute {monthly_savings}/month to retirement"),
        format!(
            "Annual savings: {}/year for major goals",
            monthly_savings.annualized()
        ),
    ]
}

pub(crate) fn savings(
    monthly_amount: Money,
    final_balance: Money,
    coverage_months: Option<Decimal>,
    months_to_target: Option<TargetTimeline>,
) -> String {
    if let Some(coverage) = coverage_months {
        let coverage = coverage.round_dp(1);
        if coverage >= dec!(6) {
            return format!(
                "Excellent! At {coverage} months of coverage, you'll have a robust emergency fund."
            );
        }
        if coverage >= dec!(3) {
            return format!(
                "Good progress. You'll reach {coverage} months of emergency coverage, within the \
                 recommended 3-6 month range."
            );
        }
    }
    match months_to_target {
        Some(TargetTimeline::Reached { months }) => format!(
            "You'll reach your savings goal in {months} months at {monthly_amount}/month."
        ),
        Some(TargetTimeline::Unreachable) => format!(
            "At {monthly_amount}/month your goal is out of reach; consider raising the \
             contribution."
        ),
        None => format!("Saving {monthly_amount}/month grows your balance to {final_balance}."),
    }
}

pub(crate) fn goal(
    required: Money,
    current_minimum: Money,
    target_months: u32,
    actual_months: Option<u32>,
    max_payment: Option<Money>,
    interest_saved: Money,
    baseline_capped: bool,
) -> String {
    // A capped baseline only counts interest up to the horizon.
    let at_least = if baseline_capped { "at least " } else { "" };
    let text = match (actual_months, max_payment) {
        (Some(actual), Some(max)) => format!(
            "Paying off in {target_months} months needs {required}/month. At your maximum of \
             {max}/month it takes {actual} months, still saving {at_least}{interest_saved} in \
             interest compared to minimum payments."
        ),
        _ => format!(
            "To pay off your debt in {target_months} months, raise your monthly payment from \
             {current_minimum} to {required}. This saves {at_least}{interest_saved} in interest."
        ),
    };
    if baseline_capped {
        format!("Your minimum payment barely covers interest. {text}")
    } else {
        text
    }
}

pub(crate) fn combined(
    net_monthly: Money,
    interest_saved: Money,
    annual_subscription: Money,
) -> String {
    if net_monthly.is_positive() {
        format!(
            "This plan improves your cash flow by {net_monthly}/month, saves {interest_saved} in \
             interest and frees up {annual_subscription}/year from subscriptions."
        )
    } else if net_monthly.is_zero() {
        format!(
            "This plan is cash-flow neutral, saves {interest_saved} in interest and frees up \
             {annual_subscription}/year from subscriptions."
        )
    } else {
        format!(
            "This plan needs {}/month of additional cash flow but saves {interest_saved} in \
             interest and frees up {annual_subscription}/year from subscriptions. Consider \
             phasing the changes in gradually.",
            net_monthly.abs()
        )
    }
}

/// One summary line per sub-scenario of a combined plan.
pub(crate) fn summary_line(result: &ScenarioResult) -> String {
    match result {
        ScenarioResult::ExtraCreditPayment(r) => {
            format!("Save {} in credit card interest", r.interest_saved)
        }
        ScenarioResult::GoalBasedPayment(r) => format!(
            "Pay off {} in {} months at {}/month",
            r.current_balance,
            r.goal.months_to_payoff,
            r.goal.monthly_payment
        ),
        ScenarioResult::SubscriptionCancellation(r) => {
            format!("Free up {}/month from subscriptions", r.monthly_savings)
        }
        ScenarioResult::IncreasedSavings(r) => format!("Grow savings to {}", r.final_balance),
        ScenarioResult::Combined(r) => format!(
            "Combined plan changing cash flow by {}/month",
            r.monthly_cash_flow_impact
        ),
        ScenarioResult::Compare(_) => "Scenario comparison".to_string(),
    }
}

pub(crate) const INDEPENDENT_MODELING_NOTE: &str =
    "Scenarios are modeled independently: cash freed by one change is not reinvested in another, \
     so the combined effect could compound further.";

pub(crate) fn comparison(
    better: BetterScenario,
    difference: Money,
    what: &str,
    by_effort: bool,
) -> String {
    let label = match better {
        BetterScenario::A => "A",
        BetterScenario::B => "B",
        BetterScenario::Tie => {
            return format!(
                "Both scenarios are equivalent in {what} and ask the same monthly effort; choose \
                 whichever fits your priorities."
            );
        }
    };
    if by_effort {
        format!(
            "Both scenarios are equivalent in {what}; Scenario {label} gets there with less \
             monthly effort."
        )
    } else {
        format!("Scenario {label} comes out ahead by {difference} in {what}.")
    }
}
