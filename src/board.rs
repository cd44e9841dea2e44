#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]

use cli_table::{Style, Table};
use std::fmt;
use thiserror::Error;

use crate::conflict;

#[cfg(feature = "tracing")]
use crate::solver::tracing::{Event, Trace};

pub const BOARD_SIZE: usize = 8;

/// Sentinel used by the external column representation for an unoccupied row.
pub const UNOCCUPIED: i8 = -1;

pub type Column = u8;

/// `queens[row]` is the column of the queen in `row`, `None` if the row is unoccupied.
pub type Queens = [Option<Column>; BOARD_SIZE];

pub const EMPTY_QUEENS: Queens = [None; BOARD_SIZE];

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("expected at most {max} rows, got {0}", max = BOARD_SIZE)]
    TooManyRows(usize),
    #[error("column {column} in row {row} is outside {min}..={max}", min = UNOCCUPIED, max = BOARD_SIZE - 1)]
    ColumnOutOfRange { row: usize, column: i8 },
}

/// One queen per row, plus the number of moves committed so far.
#[derive(Debug, Clone)]
pub struct Placement {
    queens: Queens,
    move_count: usize,

    #[cfg(feature = "tracing")]
    pub trace: Trace,
}

impl Default for Placement {
    fn default() -> Self {
        Self::from_queens(EMPTY_QUEENS)
    }
}

impl Placement {
    /// An empty board, every row unoccupied.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_queens(queens: Queens) -> Self {
        Self {
            queens,
            move_count: 0,

            #[cfg(feature = "tracing")]
            trace: Trace::new(queens),
        }
    }

    /// Seeds a placement from the external column representation.
    ///
    /// Shorter inputs leave the remaining rows unoccupied. Inputs that are too long or contain a
    /// column outside `-1..=7` are rejected rather than clamped.
    pub fn from_columns(columns: &[i8]) -> Result<Self, PlacementError> {
        if columns.len() > BOARD_SIZE {
            return Err(PlacementError::TooManyRows(columns.len()));
        }

        let mut queens = EMPTY_QUEENS;
        for (row, &column) in columns.iter().enumerate() {
            queens[row] = match column {
                UNOCCUPIED => None,
                c if (0..BOARD_SIZE as i8).contains(&c) => Some(c as Column),
                _ => return Err(PlacementError::ColumnOutOfRange { row, column }),
            };
        }

        Ok(Self::from_queens(queens))
    }

    #[must_use]
    pub const fn queens(&self) -> &Queens {
        &self.queens
    }

    #[must_use]
    pub const fn get(&self, row: usize) -> Option<Column> {
        self.queens[row]
    }

    #[must_use]
    pub const fn move_count(&self) -> usize {
        self.move_count
    }

    /// Places or moves the queen of `row` to `column`. Counts as one move.
    pub fn place_queen(&mut self, row: usize, column: Column) {
        #[cfg(feature = "paranoid")]
        debug_assert!((column as usize) < BOARD_SIZE, "column {column} is off the board");

        let from = self.queens[row];
        match from {
            Some(old) if old != column => log::trace!("move queen in row {row} from column {old} to column {column}"),
            _ => log::trace!("place queen at row {row}, column {column}"),
        }

        self.queens[row] = Some(column);
        self.move_count += 1;

        #[cfg(feature = "tracing")]
        self.trace.events.push(Event::Place {
            row,
            from,
            to: column,
            queens: self.queens,
        });
    }

    /// Takes the queen of `row` off the board. Undoing a placement is not a move.
    pub fn remove_queen(&mut self, row: usize) {
        self.queens[row] = None;

        #[cfg(feature = "tracing")]
        self.trace.events.push(Event::Remove {
            row,
            queens: self.queens,
        });
    }

    /// Replaces the whole board at once. Counts as one move.
    pub fn set_queens(&mut self, queens: Queens) {
        log::trace!("set queens to {}", format_columns(&queens));
        self.queens = queens;
        self.move_count += 1;

        #[cfg(feature = "tracing")]
        self.trace.events.push(Event::Set { queens });
    }

    /// The external representation, `-1` for an unoccupied row.
    #[must_use]
    pub fn to_columns(&self) -> [i8; BOARD_SIZE] {
        to_columns(&self.queens)
    }

    #[must_use]
    pub fn conflict_count(&self) -> usize {
        conflict::conflict_count(&self.queens)
    }

    /// No pair of placed queens attacks each other.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        conflict::is_valid_placement(&self.queens)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.queens.iter().all(Option::is_some)
    }

    /// A goal state: every row holds a queen and none of them attack each other.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.is_complete() && self.is_valid()
    }
}

#[must_use]
pub fn to_columns(queens: &Queens) -> [i8; BOARD_SIZE] {
    queens.map(|queen| queen.map_or(UNOCCUPIED, |c| c as i8))
}

fn format_columns(queens: &Queens) -> String {
    format!("{:?}", to_columns(queens))
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", format_columns(&self.queens))
    }
}

pub fn print_board(placement: &Placement) -> std::io::Result<()> {
    let rows = placement
        .queens()
        .iter()
        .map(|queen| {
            (0..BOARD_SIZE as Column)
                .map(|column| if *queen == Some(column) { 'Q' } else { '.' })
                .collect::<Vec<char>>()
        })
        .collect::<Vec<_>>();

    let table = rows.table().bold(true).display()?;
    println!("\n{table}\n");
    Ok(())
}
