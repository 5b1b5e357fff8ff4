use super::amortization::{AmortizationSimulator, amortized_payment};
use crate::domain::money::{Money, Percent};
use crate::error::{Result, ScenarioError};
use rust_decimal::Decimal;

/// Answer to "what constant payment retires this debt in N months?"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredPayment {
    /// Smallest whole-cent payment that pays the debt off within the target.
    pub required_monthly_payment: Money,
    /// False when the required payment exceeds the caller's maximum.
    pub is_feasible: bool,
    /// Payoff horizon at the maximum payment, reported only when infeasible.
    /// Equals the horizon cap if the maximum payment never amortizes the debt.
    pub actual_months_if_capped: Option<u32>,
    /// Search steps used.
    pub steps: u32,
}

/// Inverts [`AmortizationSimulator`] by bisection over whole cents.
///
/// Payoff time is non-increasing in the payment, so the feasible payments form
/// an upward-closed interval and bisection finds its lower edge. The search is
/// bracketed below by the closed-form level payment and above by the payment
/// that clears the balance in a single month.
#[derive(Debug, Clone, Copy)]
pub struct GoalSeekSolver {
    simulator: AmortizationSimulator,
    max_steps: u32,
}

impl GoalSeekSolver {
    pub fn new(simulator: AmortizationSimulator, max_steps: u32) -> Self {
        Self {
            simulator,
            max_steps,
        }
    }

    pub fn solve_required_payment(
        &self,
        balance: Money,
        apr: Percent,
        target_months: i64,
        max_monthly_payment: Option<Money>,
    ) -> Result<RequiredPayment> {
        if target_months <= 0 {
            return Err(ScenarioError::Validation(format!(
                "target_months must be positive (got {target_months})"
            )));
        }
        let target = u32::try_from(target_months)
            .ok()
            .filter(|months| *months <= self.simulator.max_months())
            .ok_or_else(|| {
                ScenarioError::Validation(format!(
                    "target_months of {target_months} exceeds the {}-month horizon",
                    self.simulator.max_months()
                ))
            })?;

        let (required, steps) = if balance.is_positive() {
            self.bisect(balance, apr, target)
        } else {
            (Money::ZERO.round_cents(), 0)
        };

        let mut outcome = RequiredPayment {
            required_monthly_payment: required,
            is_feasible: true,
            actual_months_if_capped: None,
            steps,
        };

        if let Some(max) = max_monthly_payment
            && required > max
        {
            let best = self.simulator.simulate(balance, apr, max);
            outcome.is_feasible = false;
            outcome.actual_months_if_capped = Some(best.months_to_payoff);
        }

        Ok(outcome)
    }

    fn bisect(&self, balance: Money, apr: Percent, target: u32) -> (Money, u32) {
        let pays_off = |cents: i128| {
            let summary = self
                .simulator
                .simulate(balance, apr, Money::from_cents(cents));
            !summary.capped && summary.months_to_payoff <= target
        };

        // Any payment below the level payment leaves a balance after `target` months.
        let level = amortized_payment(balance, apr, target);
        let mut lo = (level.floor_cents().to_cents() - 1).max(0);
        if lo > 0 && pays_off(lo) {
            lo = 0;
        }
        let one_month = balance.saturating_mul(Decimal::ONE + apr.monthly_rate());
        let mut hi = one_month.ceil_cents().to_cents();

        let mut steps = 0;
        while hi - lo > 1 {
            if steps == self.max_steps {
                log::warn!(
                    "goal seek exhausted {steps} steps for balance={balance} apr={apr} \
                     target={target}; using {}",
                    Money::from_cents(hi)
                );
                break;
            }
            let mid = lo + (hi - lo) / 2;
            if pays_off(mid) {
                hi = mid;
            } else {
                lo = mid;
            }
            steps += 1;
        }

        log::debug!(
            "goal seek converged in {steps} steps: balance={balance} apr={apr} target={target} \
             payment={}",
            Money::from_cents(hi)
        );
        (Money::from_cents(hi), steps)
    }
}
