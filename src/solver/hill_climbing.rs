use crate::board::{Column, Placement, Queens, BOARD_SIZE};
use crate::config::HillClimbingConfig;
use crate::conflict;
use crate::random::Random;

use super::{complete_placement, SearchStrategy, SolveStatus};

/// Steepest ascent over single queen moves, without sideways moves or restarts.
#[derive(Debug, Clone)]
pub struct HillClimbing {
    config: HillClimbingConfig,
}

enum Step {
    Solve(usize, Column),
    Improve(usize, Column, usize),
    Stuck,
}

impl HillClimbing {
    #[must_use]
    pub const fn new(config: HillClimbingConfig) -> Self {
        Self { config }
    }

    // Scans neighbours row major, columns ascending. The first neighbour without conflicts ends the
    // scan even if a cheaper one could come later.
    fn best_step(queens: &Queens, current: usize) -> Step {
        let mut best = None;
        let mut best_conflicts = current;

        for row in 0..BOARD_SIZE {
            for column in (0..BOARD_SIZE as Column).filter(|&column| queens[row] != Some(column)) {
                let mut neighbour = *queens;
                neighbour[row] = Some(column);

                let conflicts = conflict::conflict_count(&neighbour);
                if conflicts < best_conflicts {
                    if conflicts == 0 {
                        return Step::Solve(row, column);
                    }
                    best_conflicts = conflicts;
                    best = Some((row, column));
                }
            }
        }

        match best {
            Some((row, column)) => Step::Improve(row, column, best_conflicts),
            None => Step::Stuck,
        }
    }
}

impl SearchStrategy for HillClimbing {
    fn solve(&mut self, placement: &mut Placement, _rng: &mut dyn Random) -> SolveStatus {
        complete_placement(placement);

        let mut conflicts = placement.conflict_count();
        for _ in 0..self.config.max_iterations {
            if conflicts == 0 {
                return SolveStatus::Solved;
            }

            match Self::best_step(placement.queens(), conflicts) {
                Step::Solve(row, column) => {
                    placement.place_queen(row, column);
                    return SolveStatus::Solved;
                }
                Step::Improve(row, column, improved) => {
                    log::trace!("hill climbing :: {conflicts} -> {improved} conflicts");
                    placement.place_queen(row, column);
                    conflicts = improved;
                }
                Step::Stuck => {
                    log::debug!("hill climbing :: local optimum with {conflicts} conflicts");
                    return SolveStatus::LocalOptimum;
                }
            }
        }

        if conflicts == 0 {
            SolveStatus::Solved
        } else {
            SolveStatus::BudgetExhausted
        }
    }
}
