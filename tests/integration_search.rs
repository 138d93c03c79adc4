mod common;

use gridmix::error::GridError;
use gridmix::generation::GenerationMix;
use gridmix::search::bayes::BayesianMinimizer;
use gridmix::search::capacity::{CapacitySearch, optimize};
use gridmix::search::random::RandomSearch;

#[test]
fn over_budget_points_get_the_sentinel_without_simulating() {
    let problem = common::small_problem();
    let sentinel = 1e30;
    // 8 turbines + 2 reactors = 1.6 MEUR against a 1 MEUR budget.
    assert_eq!(problem.objective(&[8.0, 0.0, 2.0], sentinel), sentinel);
    // Exactly the budget leaves zero storage, which is also infeasible.
    assert_eq!(problem.objective(&[10.0, 0.0, 0.0], sentinel), sentinel);
}

#[test]
fn sentinel_dominates_every_feasible_objective() {
    let problem = common::small_problem();
    let annual_demand = problem.demand.sum();
    let sentinel = 1e30;
    for point in [[0.0, 0.0, 0.0], [1.0, 500.0, 0.0], [0.0, 0.0, 2.0], [4.0, 100.0, 1.0]] {
        let allocation = problem.allocation(&GenerationMix::from_point(&point));
        assert!(allocation.is_feasible(), "point {point:?} should be within budget");

        let value = problem.objective(&point, sentinel);
        assert!(value < sentinel, "point {point:?} gave the sentinel");
        assert!(value <= annual_demand, "point {point:?} gave {value}");
    }
}

#[test]
fn same_seed_reproduces_search() {
    let problem = common::small_problem();
    let config = common::small_budget_config().search;

    let first = optimize(&problem, &config).expect("first search");
    let second = optimize(&problem, &config).expect("second search");

    assert_eq!(first.search.trajectory(), second.search.trajectory());
    assert_eq!(first.mix, second.mix);
    assert_eq!(first.search.evaluations.len(), config.evaluations);
}

#[test]
fn parallel_initial_batch_does_not_change_results() {
    let problem = common::small_problem();
    let sequential = CapacitySearch::new(BayesianMinimizer::new(20, 300, false), 25, 5, 1e30)
        .run(&problem)
        .expect("sequential search");
    let parallel = CapacitySearch::new(BayesianMinimizer::new(20, 300, true), 25, 5, 1e30)
        .run(&problem)
        .expect("parallel search");
    assert_eq!(sequential.search, parallel.search);
    assert_eq!(sequential.mix, parallel.mix);
}

#[test]
fn every_candidate_respects_bounds() {
    let problem = common::small_problem();
    let bounds = problem.bounds();
    let outcome = CapacitySearch::new(RandomSearch::new(true), 60, 11, 1e30)
        .run(&problem)
        .expect("random search");
    for evaluation in &outcome.search.evaluations {
        for (x, &(low, high)) in evaluation.point.iter().zip(bounds.ranges()) {
            assert!(*x >= low && *x <= high, "{x} outside [{low}, {high}]");
        }
    }
}

#[test]
fn reported_mix_is_whole_and_affordable() {
    let problem = common::small_problem();
    let outcome = optimize(&problem, &common::small_budget_config().search).expect("search");
    for count in outcome.mix.to_point() {
        assert!(count >= 0.0);
        assert_eq!(count.fract(), 0.0);
    }
    assert!(outcome.report.allocation.is_feasible());
    assert!(outcome.report.totals.backup_kwh <= problem.demand.sum());
}

#[test]
fn sentinel_below_annual_demand_is_rejected() {
    let problem = common::small_problem();
    let err = CapacitySearch::new(RandomSearch::default(), 10, 1, 1000.0)
        .run(&problem)
        .expect_err("sentinel cannot dominate");
    assert!(matches!(&err, GridError::Config(e) if e.field == "search.infeasible_sentinel"));
}
