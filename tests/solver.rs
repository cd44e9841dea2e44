use std::collections::HashSet;

#[cfg(not(feature = "no-jobs"))]
use rayon::prelude::*;
use strum::IntoEnumIterator;

use queens::board::{Placement, BOARD_SIZE};
use queens::config::{BacktrackingConfig, SearchConfig};
use queens::solver::*;

const CASES: [[i8; BOARD_SIZE]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7],
    [7, 6, 5, 4, 3, 2, 1, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [0, 2, 4, 6, 0, 2, 4, 6],
    [1, 3, 1, 3, 1, 3, 1, 3],
    [0, 2, 2, 5, 5, 7, 7, 1],
    [4, 4, 2, 2, 0, 0, 6, 6],
    [0, 3, 1, 4, 2, 5, 3, 6],
    [1, 1, 1, 1, 2, 2, 2, 2],
    [0, 1, 0, 1, 0, 1, 0, 1],
];

// counted from scratch so the library's own conflict code is not trusted
fn attacking_pairs(columns: &[i8; BOARD_SIZE]) -> usize {
    let mut pairs = 0;
    for a in 0..BOARD_SIZE {
        for b in a + 1..BOARD_SIZE {
            if columns[a] < 0 || columns[b] < 0 {
                continue;
            }
            let dx = (columns[a] - columns[b]).unsigned_abs() as usize;
            if dx == 0 || dx == b - a {
                pairs += 1;
            }
        }
    }
    pairs
}

fn is_goal(columns: &[i8; BOARD_SIZE]) -> bool {
    columns.iter().all(|&column| column >= 0) && attacking_pairs(columns) == 0
}

fn for_each_case<F>(check: F)
where
    F: Fn(usize, &[i8; BOARD_SIZE]) + Send + Sync,
{
    #[cfg(feature = "no-jobs")]
    for (index, columns) in CASES.iter().enumerate() {
        check(index, columns);
    }

    #[cfg(not(feature = "no-jobs"))]
    CASES.par_iter().enumerate().for_each(|(index, columns)| check(index, columns));
}

fn run(kind: StrategyKind, columns: &[i8], seed: u64) -> (Placement, SolveStatus) {
    let placement = Placement::from_columns(columns).expect("test case is well formed");
    let mut solver = Solver::with_seed(placement, kind, &SearchConfig::default(), seed);
    let status = solver.solve();
    (solver.placement, status)
}

#[test]
fn backtracking_solves_every_case() {
    for_each_case(|index, columns| {
        let (placement, status) = run(StrategyKind::Backtracking, columns, 0);

        assert_eq!(status, SolveStatus::Solved, "case {index}");
        assert!(is_goal(&placement.to_columns()), "case {index} :: {placement}");
    });
}

#[test]
fn astar_solves_every_case() {
    for_each_case(|index, columns| {
        let (placement, status) = run(StrategyKind::AStar, columns, 0);

        assert_eq!(status, SolveStatus::Solved, "case {index}");
        assert!(is_goal(&placement.to_columns()), "case {index} :: {placement}");
        assert!(placement.move_count() > 0);
    });
}

#[test]
fn hill_climbing_terminates_without_getting_worse() {
    for_each_case(|index, columns| {
        let (placement, status) = run(StrategyKind::HillClimbing, columns, 0);

        assert!(
            matches!(status, SolveStatus::Solved | SolveStatus::LocalOptimum),
            "case {index} :: {status:?}"
        );
        assert!(attacking_pairs(&placement.to_columns()) <= attacking_pairs(columns));
        assert_eq!(status.is_solved(), is_goal(&placement.to_columns()));
    });
}

#[test]
fn stochastic_strategies_report_consistent_status() {
    for kind in [StrategyKind::SimulatedAnnealing, StrategyKind::Genetic] {
        for_each_case(|index, columns| {
            let (placement, status) = run(kind, columns, index as u64);
            let result = placement.to_columns();

            assert!(placement.is_complete(), "{kind} :: case {index}");
            assert_eq!(status.is_solved(), is_goal(&result), "{kind} :: case {index} :: {placement}");
            assert_eq!(placement.is_valid(), attacking_pairs(&result) == 0);
        });
    }
}

#[test]
fn genetic_results_are_permutations() {
    for_each_case(|index, columns| {
        let (placement, _status) = run(StrategyKind::Genetic, columns, 7);
        let distinct = placement.to_columns().into_iter().collect::<HashSet<_>>();

        assert_eq!(distinct.len(), BOARD_SIZE, "case {index} :: {placement}");
        assert_eq!(placement.move_count(), 1);
    });
}

#[test]
fn same_seed_same_result() {
    for kind in [StrategyKind::SimulatedAnnealing, StrategyKind::Genetic] {
        let (first, _) = run(kind, &CASES[2], 42);
        let (second, _) = run(kind, &CASES[2], 42);

        assert_eq!(first.to_columns(), second.to_columns(), "{kind}");
        assert_eq!(first.move_count(), second.move_count(), "{kind}");
    }
}

#[test]
fn every_strategy_handles_an_empty_board() {
    for kind in StrategyKind::iter() {
        let (placement, status) = run(kind, &[], 3);

        assert!(placement.is_complete(), "{kind}");
        assert_eq!(status.is_solved(), is_goal(&placement.to_columns()), "{kind}");
    }
}

#[test]
fn empty_board_has_92_solutions() {
    let solutions = Backtracking::new(BacktrackingConfig { solution_limit: None }).find_solutions(&mut Placement::new());
    let solutions = solutions.iter().map(queens::board::to_columns).collect::<HashSet<_>>();

    assert_eq!(solutions.len(), 92);
    assert!(solutions.iter().all(is_goal));
}

#[test]
fn malformed_input_is_rejected() {
    assert!(Placement::from_columns(&[0; BOARD_SIZE + 1]).is_err());
    assert!(Placement::from_columns(&[0, 8]).is_err());
    assert!(Placement::from_columns(&[-3]).is_err());
}
