use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use whatif::config::EngineConfig;
use whatif::domain::account::AccountSnapshot;
use whatif::domain::money::{Money, Percent};
use whatif::domain::scenario::{ExtraPaymentParams, ScenarioRequest, ScenarioResult};
use whatif::engine::ScenarioEngine;
use whatif::engine::amortization::AmortizationSimulator;
use whatif::engine::goal_seek::GoalSeekSolver;

fn cents(rng: &mut StdRng, range: std::ops::Range<i64>) -> Money {
    Money::new(Decimal::new(rng.gen_range(range), 2))
}

fn apr(rng: &mut StdRng) -> Percent {
    Percent::new(Decimal::new(rng.gen_range(0..3500), 2))
}

#[test]
fn test_payoff_time_is_non_increasing_in_payment() {
    let mut rng = StdRng::seed_from_u64(7);
    let simulator = AmortizationSimulator::new(600);

    for _ in 0..50 {
        let balance = cents(&mut rng, 100..2_000_000);
        let apr = apr(&mut rng);
        let mut payment = cents(&mut rng, 1..5_000);
        let mut previous = simulator.simulate(balance, apr, payment).months_to_payoff;

        for _ in 0..10 {
            payment += cents(&mut rng, 1..20_000);
            let months = simulator.simulate(balance, apr, payment).months_to_payoff;
            assert!(
                months <= previous,
                "balance {balance} apr {apr}: {payment} took {months} > {previous} months"
            );
            previous = months;
        }
    }
}

#[test]
fn test_extra_payment_never_costs_interest() {
    let mut rng = StdRng::seed_from_u64(11);
    let engine = ScenarioEngine::new(EngineConfig::default());

    for _ in 0..30 {
        let account = AccountSnapshot::new(
            cents(&mut rng, 100..1_000_000),
            apr(&mut rng),
            cents(&mut rng, 1_000..50_000),
        );
        let request = ScenarioRequest::ExtraCreditPayment(ExtraPaymentParams {
            account: account.into(),
            extra_monthly_payment: cents(&mut rng, 0..100_000),
            months: None,
        });
        let ScenarioResult::ExtraCreditPayment(result) = engine.run(&request).unwrap() else {
            panic!("expected extra payment result");
        };
        assert!(result.interest_saved >= Money::ZERO);
        assert!(result.scenario.months_to_payoff <= result.baseline.months_to_payoff);
    }
}

#[test]
fn test_required_payment_is_sufficient_and_minimal() {
    let mut rng = StdRng::seed_from_u64(42);
    let simulator = AmortizationSimulator::new(600);
    let solver = GoalSeekSolver::new(simulator, 64);

    for _ in 0..40 {
        let balance = cents(&mut rng, 100..5_000_000);
        let apr = apr(&mut rng);
        let target = rng.gen_range(1..=120u32);

        let outcome = solver
            .solve_required_payment(balance, apr, i64::from(target), None)
            .unwrap();
        assert!(outcome.is_feasible);
        let required = outcome.required_monthly_payment;

        let at_required = simulator.simulate(balance, apr, required);
        assert!(!at_required.capped);
        assert!(
            at_required.months_to_payoff <= target,
            "{balance} at {apr} in {target}: {required} took {} months",
            at_required.months_to_payoff
        );

        let one_cent_less = simulator.simulate(balance, apr, required - Money::CENT);
        assert!(
            one_cent_less.months_to_payoff > target,
            "{balance} at {apr} in {target}: {required} is not minimal"
        );
    }
}
