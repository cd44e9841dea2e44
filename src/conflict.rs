use crate::board::{Column, Queens, BOARD_SIZE};

/// Heuristic cost of a row that holds no queen yet.
pub const UNPLACED_PENALTY: usize = 3;
/// Heuristic cost of a pair of attacking queens.
pub const CONFLICT_WEIGHT: usize = 2;

/// Whether queens on two different rows share a column or a diagonal.
#[inline(always)]
#[must_use]
pub const fn attacks(row_a: usize, col_a: Column, row_b: usize, col_b: Column) -> bool {
    col_a == col_b || col_a.abs_diff(col_b) as usize == row_a.abs_diff(row_b)
}

/// 28 for an 8x8 board.
#[must_use]
pub const fn max_non_attacking_pairs() -> usize {
    BOARD_SIZE * (BOARD_SIZE - 1) / 2
}

fn occupied(queens: &Queens) -> impl Iterator<Item = (usize, Column)> + '_ {
    queens
        .iter()
        .enumerate()
        .filter_map(|(row, queen)| queen.map(|column| (row, column)))
}

/// Number of unordered pairs of placed queens that attack each other.
#[must_use]
pub fn conflict_count(queens: &Queens) -> usize {
    let mut conflicts = 0;
    for (row_a, col_a) in occupied(queens) {
        for (row_b, col_b) in occupied(queens).skip_while(|&(row_b, _)| row_b <= row_a) {
            if attacks(row_a, col_a, row_b, col_b) {
                conflicts += 1;
            }
        }
    }
    conflicts
}

/// Checks the rows above `row` only; unoccupied rows are skipped.
#[must_use]
pub fn is_safe(queens: &Queens, row: usize, column: Column) -> bool {
    queens[..row]
        .iter()
        .enumerate()
        .all(|(other_row, queen)| queen.map_or(true, |other| !attacks(other_row, other, row, column)))
}

/// Number of queens on rows other than `row` that would attack a queen at `(row, column)`.
#[must_use]
pub fn conflicts_at(queens: &Queens, row: usize, column: Column) -> usize {
    occupied(queens)
        .filter(|&(other_row, other)| other_row != row && attacks(other_row, other, row, column))
        .count()
}

#[must_use]
pub fn is_valid_placement(queens: &Queens) -> bool {
    conflict_count(queens) == 0
}

/// A* heuristic. Double counts attacking pairs relative to [`conflict_count`] and charges a fixed
/// penalty for every empty row, so it is zero exactly on solved boards.
#[must_use]
pub fn weighted_conflicts(queens: &Queens) -> usize {
    let unplaced = queens.iter().filter(|queen| queen.is_none()).count();
    unplaced * UNPLACED_PENALTY + conflict_count(queens) * CONFLICT_WEIGHT
}
