use crate::board::{Column, Placement, Queens, BOARD_SIZE};
use crate::config::BacktrackingConfig;
use crate::conflict;
use crate::random::Random;

use super::{SearchStrategy, SolveStatus};

/// Row by row depth first search.
///
/// A row left empty by the caller tries every column in ascending order and is cleared again when
/// its branch fails. A row seeded by the caller keeps its seed when that is safe and only then
/// falls back to the other columns, restoring the seed after each failed branch. On an empty board
/// this is plain exhaustive backtracking.
#[derive(Debug, Clone)]
pub struct Backtracking {
    config: BacktrackingConfig,
    solutions: Vec<Queens>,
}

impl Backtracking {
    #[must_use]
    pub const fn new(config: BacktrackingConfig) -> Self {
        Self {
            config,
            solutions: vec![],
        }
    }

    /// Every solution found before the configured limit was reached, in search order.
    ///
    /// If the limit was reached the placement holds the last solution, otherwise all rows are back
    /// to their seeds.
    pub fn find_solutions(&mut self, placement: &mut Placement) -> Vec<Queens> {
        let _limit_reached = self.run(placement);
        std::mem::take(&mut self.solutions)
    }

    fn run(&mut self, placement: &mut Placement) -> bool {
        self.solutions.clear();
        let seeds = *placement.queens();
        self.solve_row(placement, &seeds, 0)
    }

    fn solve_row(&mut self, placement: &mut Placement, seeds: &Queens, row: usize) -> bool {
        if row >= BOARD_SIZE {
            return self.record_solution(placement);
        }

        match seeds[row] {
            Some(seed) => self.repair_row(placement, seeds, row, seed),
            None => self.fill_row(placement, seeds, row),
        }
    }

    // true once enough solutions were collected, which unwinds the whole search
    fn record_solution(&mut self, placement: &Placement) -> bool {
        self.solutions.push(*placement.queens());
        self.config
            .solution_limit
            .is_some_and(|limit| self.solutions.len() >= limit.get())
    }

    fn fill_row(&mut self, placement: &mut Placement, seeds: &Queens, row: usize) -> bool {
        for column in 0..BOARD_SIZE as Column {
            if conflict::is_safe(placement.queens(), row, column) {
                placement.place_queen(row, column);
                if self.solve_row(placement, seeds, row + 1) {
                    return true;
                }
                placement.remove_queen(row);
            }
        }
        false
    }

    fn repair_row(&mut self, placement: &mut Placement, seeds: &Queens, row: usize, seed: Column) -> bool {
        if conflict::is_safe(placement.queens(), row, seed) && self.solve_row(placement, seeds, row + 1) {
            return true;
        }

        for column in (0..BOARD_SIZE as Column).filter(|&column| column != seed) {
            if conflict::is_safe(placement.queens(), row, column) {
                placement.place_queen(row, column);
                if self.solve_row(placement, seeds, row + 1) {
                    return true;
                }
                placement.place_queen(row, seed);
            }
        }
        false
    }
}

impl SearchStrategy for Backtracking {
    fn solve(&mut self, placement: &mut Placement, _rng: &mut dyn Random) -> SolveStatus {
        let limit_reached = self.run(placement);

        match self.solutions.last() {
            None => SolveStatus::NoSolution,
            Some(&last) => {
                // exhausting the tree rewinds the board, put the last solution back
                if !limit_reached {
                    placement.set_queens(last);
                }
                log::debug!("backtracking :: {} solution(s) after {} moves", self.solutions.len(), placement.move_count());
                SolveStatus::Solved
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;
    use std::num::NonZeroUsize;

    use super::*;
    use crate::board::to_columns;
    use crate::random::test::TestRandom;

    fn all_solutions() -> Backtracking {
        Backtracking::new(BacktrackingConfig { solution_limit: None })
    }

    #[test]
    fn empty_board_finds_lexicographically_first_solution() {
        let mut placement = Placement::new();
        let status = Backtracking::new(BacktrackingConfig::default()).solve(&mut placement, &mut TestRandom::default());

        assert_eq!(status, SolveStatus::Solved);
        assert_eq!(placement.to_columns(), [0, 4, 7, 5, 2, 6, 1, 3]);
        assert_eq!(placement.conflict_count(), 0);
    }

    #[test]
    fn enumerates_all_92_solutions() {
        let mut placement = Placement::new();
        let solutions = all_solutions().find_solutions(&mut placement);

        assert_eq!(solutions.len(), 92);
        assert!(solutions.iter().all(conflict::is_valid_placement));
        assert!(solutions.iter().all(|queens| queens.iter().all(Option::is_some)));
        assert_eq!(solutions.iter().collect::<HashSet<_>>().len(), 92);

        // the board is rewound once the tree is exhausted
        assert_eq!(placement.to_columns(), [-1; BOARD_SIZE]);
    }

    #[test]
    fn seeds_only_change_the_order_of_enumeration() {
        let mut placement = Placement::from_columns(&[3, 3, 3, 3, 3, 3, 3, 3]).unwrap();
        let solutions = all_solutions().find_solutions(&mut placement);

        assert_eq!(solutions.len(), 92);
        assert_eq!(solutions.iter().collect::<HashSet<_>>().len(), 92);
        assert_eq!(placement.to_columns(), [3; BOARD_SIZE]);
    }

    #[test]
    fn stops_after_solution_limit() {
        let mut placement = Placement::new();
        let mut backtracking = Backtracking::new(BacktrackingConfig {
            solution_limit: NonZeroUsize::new(3),
        });
        let solutions = backtracking.find_solutions(&mut placement);

        let solutions = solutions.iter().map(to_columns).collect::<Vec<_>>();
        assert_eq!(
            solutions,
            vec![
                [0, 4, 7, 5, 2, 6, 1, 3],
                [0, 5, 7, 2, 6, 3, 1, 4],
                [0, 6, 3, 5, 7, 1, 4, 2],
            ]
        );
        assert_eq!(placement.to_columns(), [0, 6, 3, 5, 7, 1, 4, 2]);
    }

    #[test]
    fn valid_seed_is_kept_without_moves() {
        let mut placement = Placement::from_columns(&[2, 4, 6, 0, 3, 1, 7, 5]).unwrap();
        let status = Backtracking::new(BacktrackingConfig::default()).solve(&mut placement, &mut TestRandom::default());

        assert_eq!(status, SolveStatus::Solved);
        assert_eq!(placement.to_columns(), [2, 4, 6, 0, 3, 1, 7, 5]);
        assert_eq!(placement.move_count(), 0);
    }

    #[test]
    fn repairs_column_collision() {
        let mut placement = Placement::from_columns(&[0, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(placement.conflict_count(), 28);

        let status = Backtracking::new(BacktrackingConfig::default()).solve(&mut placement, &mut TestRandom::default());

        assert_eq!(status, SolveStatus::Solved);
        assert!(placement.is_solved());
        // the first row keeps its seed, the others cannot use column 0 anyway
        assert_eq!(placement.to_columns(), [0, 4, 7, 5, 2, 6, 1, 3]);
    }

    #[test]
    fn limit_above_solution_count_still_leaves_a_solution() {
        let mut placement = Placement::new();
        let mut backtracking = Backtracking::new(BacktrackingConfig {
            solution_limit: NonZeroUsize::new(100),
        });
        let status = backtracking.solve(&mut placement, &mut TestRandom::default());

        assert_eq!(status, SolveStatus::Solved);
        assert!(placement.is_solved());
    }
}
