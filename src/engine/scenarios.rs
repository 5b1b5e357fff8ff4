//! Validation and result assembly for the four single scenarios.

use super::ScenarioEngine;
use super::narrative;
use crate::domain::account::AccountSnapshot;
use crate::domain::money::{Money, Percent};
use crate::domain::scenario::{
    BalancePoint, CumulativeSavings, ExtraPaymentParams, ExtraPaymentResult, GoalPaymentParams,
    GoalPaymentResult, SavingsParams, SavingsPoint, SavingsResult, SubscriptionParams,
    SubscriptionResult,
};
use crate::error::{Result, ScenarioError};
use rust_decimal::Decimal;

impl ScenarioEngine {
    pub(crate) fn projection_months(&self, months: Option<u32>) -> Result<u32> {
        let Some(months) = months else {
            return Ok(self.config.default_projection_months);
        };
        if months == 0 || months > self.config.max_months {
            return Err(ScenarioError::Validation(format!(
                "months must be between 1 and {} (got {months})",
                self.config.max_months
            )));
        }
        Ok(months)
    }

    fn valid_account<'a>(&self, account: &'a AccountSnapshot) -> Result<&'a AccountSnapshot> {
        account.validate(self.config.max_apr, self.config.max_amount)?;
        Ok(account)
    }

    fn amount(&self, amount: Money, field: &str) -> Result<Money> {
        Money::bounded(amount.value(), self.config.max_amount, field)
    }

    pub(crate) fn extra_credit_payment(
        &self,
        params: &ExtraPaymentParams,
    ) -> Result<ExtraPaymentResult> {
        let account = self.valid_account(params.account.snapshot()?)?;
        let extra = self.amount(params.extra_monthly_payment, "extra_monthly_payment")?;
        let months = self.projection_months(params.months)?;

        let baseline = self
            .simulator
            .simulate(account.balance, account.apr, account.minimum_payment);
        let new_payment = account.minimum_payment + extra;
        let scenario = self.simulator.simulate(account.balance, account.apr, new_payment);
        if baseline.capped {
            log::warn!(
                "minimum payment {} does not amortize balance {} within {} months",
                account.minimum_payment,
                account.balance,
                self.simulator.max_months()
            );
        }

        let interest_saved = (baseline.total_interest - scenario.total_interest).floor_zero();
        let months_saved = baseline
            .months_to_payoff
            .saturating_sub(scenario.months_to_payoff);
        let percent_interest_saved =
            Percent::ratio(interest_saved, baseline.total_interest).round_dp(2);

        let credit_limit = account.credit_limit.filter(Money::is_positive);
        let timeline = self
            .simulator
            .schedule(account.balance, account.apr, new_payment)
            .take(months as usize)
            .map(|step| BalancePoint {
                month: step.month_index,
                balance: step.balance.round_cents(),
                interest_accrued: step.interest_accrued.round_cents(),
                utilization: credit_limit
                    .map(|limit| Percent::ratio(step.balance, limit).round_dp(2)),
            })
            .collect();

        let interest_saved = interest_saved.round_cents();
        Ok(ExtraPaymentResult {
            account_id: account.account_id.clone(),
            current_balance: account.balance.round_cents(),
            apr: account.apr,
            extra_payment: extra.round_cents(),
            baseline: baseline.rounded(),
            scenario: scenario.rounded(),
            interest_saved,
            months_saved,
            percent_interest_saved,
            timeline,
            recommendation: narrative::extra_payment(interest_saved, months_saved, baseline.capped),
        })
    }

    pub(crate) fn subscription_cancellation(
        &self,
        params: &SubscriptionParams,
    ) -> Result<SubscriptionResult> {
        if params.subscriptions.is_empty() {
            return Err(ScenarioError::validation(
                "subscriptions must list at least one item to cancel",
            ));
        }
        for item in &params.subscriptions {
            item.validate(self.config.max_amount)?;
        }
        let baseline = params
            .baseline_recurring_spend
            .map(|b| self.amount(b, "baseline_recurring_spend"))
            .transpose()?;
        let months = self.projection_months(params.months)?;

        let impact = self.subscriptions.calculate(&params.subscriptions, baseline);
        let timeline = (0..=months)
            .map(|month| CumulativeSavings {
                month,
                cumulative_savings: impact
                    .monthly_savings
                    .saturating_mul(Decimal::from(month))
                    .round_cents(),
            })
            .collect();
        let monthly_savings = impact.monthly_savings.round_cents();

        Ok(SubscriptionResult {
            subscriptions: params.subscriptions.clone(),
            monthly_savings,
            annual_savings: impact.annual_savings.round_cents(),
            percent_reduction: impact.percent_reduction.round_dp(2),
            baseline_recurring_spend: baseline.map(Money::round_cents),
            new_recurring_spend: baseline
                .map(|b| (b - impact.monthly_savings).floor_zero().round_cents()),
            timeline,
            alternative_uses: narrative::alternative_uses(monthly_savings),
            recommendation: narrative::subscriptions(
                impact.monthly_savings,
                params.subscriptions.len(),
            ),
        })
    }

    pub(crate) fn increased_savings(&self, params: &SavingsParams) -> Result<SavingsResult> {
        let current = self.amount(params.current_balance, "current_balance")?;
        let contribution = self.amount(params.monthly_amount, "monthly_amount")?;
        let target = params
            .target_amount
            .map(|t| self.amount(t, "target_amount"))
            .transpose()?;
        let expenses = params
            .monthly_expenses
            .map(|e| self.amount(e, "monthly_expenses"))
            .transpose()?;
        let rate = match params.annual_rate {
            Some(rate) => Percent::bounded(rate.value(), self.config.max_apr, "annual_rate")?,
            None => self.config.default_savings_rate,
        };
        let months = self.projection_months(params.months)?;

        let projection = self
            .projector
            .project(current, contribution, rate, months, target)?;

        // Coverage is derived from the projection, not computed by the projector.
        let emergency_fund_months = expenses
            .filter(Money::is_positive)
            .map(|e| {
                projection
                    .final_balance
                    .value()
                    .checked_div(e.value())
                    .map(|months| months.round_dp(1))
                    .ok_or_else(|| {
                        ScenarioError::validation("monthly_expenses too small to measure coverage")
                    })
            })
            .transpose()?;

        let timeline = self
            .projector
            .schedule(current, contribution, rate)
            .take(months as usize)
            .map(|step| SavingsPoint {
                month: step.month_index,
                balance: step.balance.round_cents(),
                contributions: step.contributions.round_cents(),
                interest_earned: step.interest_earned.round_cents(),
            })
            .collect();

        let final_balance = projection.final_balance.round_cents();
        Ok(SavingsResult {
            current_balance: current.round_cents(),
            monthly_contribution: contribution.round_cents(),
            annual_rate: rate,
            projection_months: months,
            final_balance,
            total_contributions: projection.total_contributions.round_cents(),
            interest_earned: projection.interest_earned.round_cents(),
            balance_increase: (projection.final_balance - current).round_cents(),
            target_amount: target.map(Money::round_cents),
            months_to_target: projection.months_to_target,
            emergency_fund_months,
            timeline,
            recommendation: narrative::savings(
                contribution,
                final_balance,
                emergency_fund_months,
                projection.months_to_target,
            ),
        })
    }

    pub(crate) fn goal_based_payment(
        &self,
        params: &GoalPaymentParams,
    ) -> Result<GoalPaymentResult> {
        let account = self.valid_account(params.account.snapshot()?)?;
        let max_payment = params
            .max_monthly_payment
            .map(|m| self.amount(m, "max_monthly_payment"))
            .transpose()?;

        let outcome = self.solver.solve_required_payment(
            account.balance,
            account.apr,
            params.target_months,
            max_payment,
        )?;
        let target_months = u32::try_from(params.target_months)
            .map_err(|_| ScenarioError::validation("target_months out of range"))?;

        let planned_payment = match (outcome.is_feasible, max_payment) {
            (false, Some(max)) => max,
            _ => outcome.required_monthly_payment,
        };
        let baseline = self
            .simulator
            .simulate(account.balance, account.apr, account.minimum_payment);
        let goal = self.simulator.simulate(account.balance, account.apr, planned_payment);

        let interest_saved = (baseline.total_interest - goal.total_interest)
            .floor_zero()
            .round_cents();
        let months_saved = baseline.months_to_payoff.saturating_sub(goal.months_to_payoff);

        Ok(GoalPaymentResult {
            account_id: account.account_id.clone(),
            current_balance: account.balance.round_cents(),
            apr: account.apr,
            target_months,
            required_monthly_payment: outcome.required_monthly_payment,
            is_feasible: outcome.is_feasible,
            max_monthly_payment: max_payment.map(Money::round_cents),
            actual_months_if_capped: outcome.actual_months_if_capped,
            current_minimum_payment: account.minimum_payment.round_cents(),
            payment_increase: (outcome.required_monthly_payment - account.minimum_payment)
                .floor_zero()
                .round_cents(),
            baseline: baseline.rounded(),
            goal: goal.rounded(),
            interest_saved,
            months_saved,
            recommendation: narrative::goal(
                outcome.required_monthly_payment,
                account.minimum_payment,
                target_months,
                outcome.actual_months_if_capped,
                max_payment,
                interest_saved,
                baseline.capped,
            ),
        })
    }
}
