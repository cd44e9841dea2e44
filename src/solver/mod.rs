use rand::rngs::SmallRng;
use rand::SeedableRng;
use strum::{Display, EnumCount, EnumIter, EnumString};

use crate::board::{Column, Placement, BOARD_SIZE};
use crate::config::SearchConfig;
use crate::conflict;
use crate::random::Random;

pub mod annealing;
pub mod astar;
pub mod backtracking;
pub mod genetic;
pub mod hill_climbing;
#[cfg(feature = "tracing")]
pub mod tracing;

pub use annealing::SimulatedAnnealing;
pub use astar::AStar;
pub use backtracking::Backtracking;
pub use genetic::Genetic;
pub use hill_climbing::HillClimbing;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    Solved,
    /// Every branch was explored without reaching a solution.
    NoSolution,
    /// The step, iteration or generation cap was hit first.
    BudgetExhausted,
    /// No neighbour improves on the current state.
    LocalOptimum,
}

impl SolveStatus {
    #[must_use]
    pub const fn is_solved(self) -> bool {
        matches!(self, Self::Solved)
    }
}

/// A way of turning a (possibly partial or conflicting) placement into a finished one.
///
/// Strategies mutate the placement in place, committing moves through it so its move counter
/// reflects the work done. Failure is reported through [`SolveStatus`], never as an error.
pub trait SearchStrategy {
    fn solve(&mut self, placement: &mut Placement, rng: &mut dyn Random) -> SolveStatus;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, EnumString, EnumIter, EnumCount)]
#[strum(serialize_all = "kebab-case")]
pub enum StrategyKind {
    Backtracking,
    #[strum(to_string = "astar", serialize = "a-star")]
    AStar,
    #[strum(to_string = "annealing", serialize = "simulated-annealing")]
    SimulatedAnnealing,
    Genetic,
    HillClimbing,
}

impl StrategyKind {
    #[must_use]
    pub fn build(self, config: &SearchConfig) -> Box<dyn SearchStrategy> {
        match self {
            Self::Backtracking => Box::new(Backtracking::new(config.backtracking)),
            Self::AStar => Box::new(AStar::new(config.astar)),
            Self::SimulatedAnnealing => Box::new(SimulatedAnnealing::new(config.annealing)),
            Self::Genetic => Box::new(Genetic::new(config.genetic)),
            Self::HillClimbing => Box::new(HillClimbing::new(config.hill_climbing)),
        }
    }
}

pub struct Solver {
    pub placement: Placement,
    pub kind: StrategyKind,

    strategy: Box<dyn SearchStrategy>,
    rng: SmallRng,
}

impl Solver {
    #[must_use]
    pub fn new(placement: Placement, kind: StrategyKind, config: &SearchConfig) -> Self {
        Self::with_rng(placement, kind, config, SmallRng::from_entropy())
    }

    /// Same as [`Solver::new`] but with a reproducible source of randomness.
    #[must_use]
    pub fn with_seed(placement: Placement, kind: StrategyKind, config: &SearchConfig, seed: u64) -> Self {
        Self::with_rng(placement, kind, config, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(placement: Placement, kind: StrategyKind, config: &SearchConfig, rng: SmallRng) -> Self {
        Self {
            placement,
            kind,
            strategy: kind.build(config),
            rng,
        }
    }

    pub fn solve(&mut self) -> SolveStatus {
        let status = self.strategy.solve(&mut self.placement, &mut self.rng);

        match status {
            SolveStatus::Solved => {
                #[cfg(feature = "tracing")]
                {
                    let queens = *self.placement.queens();
                    self.placement.trace.events.push(tracing::Event::Solved { queens });
                }
            }
            SolveStatus::NoSolution => log::warn!("{} :: no solution exists for {}", self.kind, self.placement),
            SolveStatus::BudgetExhausted => log::warn!("{} :: budget exhausted at {}", self.kind, self.placement),
            SolveStatus::LocalOptimum => log::debug!("{} :: stuck in a local optimum at {}", self.kind, self.placement),
        }

        status
    }
}

/// Fills every unoccupied row, top to bottom, with the column attacked by the fewest queens placed
/// so far (lowest column on ties). Local search works on complete boards only.
pub(crate) fn complete_placement(placement: &mut Placement) {
    for row in 0..BOARD_SIZE {
        if placement.get(row).is_some() {
            continue;
        }
        let column = (0..BOARD_SIZE as Column)
            .min_by_key(|&column| conflict::conflicts_at(placement.queens(), row, column))
            .unwrap_or_default();
        placement.place_queen(row, column);
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn strategy_names_round_trip() {
        for kind in StrategyKind::iter() {
            assert_eq!(StrategyKind::from_str(&kind.to_string()).unwrap(), kind);
        }
        assert_eq!(StrategyKind::from_str("annealing").unwrap(), StrategyKind::SimulatedAnnealing);
        assert_eq!(StrategyKind::from_str("hill-climbing").unwrap(), StrategyKind::HillClimbing);
        assert!(StrategyKind::from_str("bogosort").is_err());
    }

    #[test]
    fn completion_fills_empty_rows_greedily() {
        let mut placement = Placement::from_columns(&[0, -1, 4]).unwrap();
        complete_placement(&mut placement);

        assert!(placement.is_complete());
        assert_eq!(placement.get(0), Some(0));
        assert_eq!(placement.get(2), Some(4));
        // columns 0 and 1 are attacked by row 0
        assert_eq!(placement.get(1), Some(2));
        assert_eq!(placement.move_count(), 6);
    }

    #[test]
    fn completion_keeps_complete_boards() {
        let mut placement = Placement::from_columns(&[0, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        complete_placement(&mut placement);
        assert_eq!(placement.to_columns(), [0; BOARD_SIZE]);
        assert_eq!(placement.move_count(), 0);
    }

    #[test]
    fn solver_reports_solved_boards() {
        let placement = Placement::from_columns(&[0, 4, 7, 5, 2, 6, 1, 3]).unwrap();
        for kind in StrategyKind::iter() {
            let mut solver = Solver::with_seed(placement.clone(), kind, &SearchConfig::default(), 0);
            assert_eq!(solver.solve(), SolveStatus::Solved, "{kind}");
            assert!(solver.placement.is_solved());
        }
    }
}
