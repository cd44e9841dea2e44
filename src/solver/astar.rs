use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::board::{Column, Placement, Queens, BOARD_SIZE};
use crate::config::AStarConfig;
use crate::conflict;
use crate::random::Random;

use super::{SearchStrategy, SolveStatus};

/// `(row, new column)`
type Move = (usize, Column);

#[derive(Debug, Clone)]
struct Node {
    queens: Queens,
    g_cost: usize,
    h_cost: usize,
    moves: Vec<Move>,

    // insertion order, breaks ties the cost pair leaves open
    sequence: usize,
}

impl Node {
    fn new(queens: Queens, g_cost: usize, moves: Vec<Move>, sequence: usize) -> Self {
        Self {
            queens,
            g_cost,
            h_cost: conflict::weighted_conflicts(&queens),
            moves,
            sequence,
        }
    }

    const fn f_cost(&self) -> usize {
        self.g_cost + self.h_cost
    }

    const fn is_goal(&self) -> bool {
        self.h_cost == 0
    }

    /// Every board reachable by moving (or placing) the queen of a single row, row major with
    /// columns ascending.
    fn successors(&self) -> impl Iterator<Item = (Queens, Move)> + '_ {
        (0..BOARD_SIZE).flat_map(move |row| {
            (0..BOARD_SIZE as Column)
                .filter(move |&column| self.queens[row] != Some(column))
                .map(move |column| {
                    let mut queens = self.queens;
                    queens[row] = Some(column);
                    (queens, (row, column))
                })
        })
    }
}

// `BinaryHeap` is a max heap, so the cheapest node has to compare as the greatest
impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_cost()
            .cmp(&self.f_cost())
            .then_with(|| other.h_cost.cmp(&self.h_cost))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Node {}

/// Best first search over whole boards, one queen move per edge.
///
/// The heuristic is [`conflict::weighted_conflicts`], so the goal is a complete board without
/// attacks. Nothing is written to the placement unless a goal is found within the budget; the path
/// to it is then replayed move by move.
#[derive(Debug, Clone)]
pub struct AStar {
    config: AStarConfig,
}

impl AStar {
    #[must_use]
    pub const fn new(config: AStarConfig) -> Self {
        Self { config }
    }

    fn search(&self, initial: Queens) -> Option<Vec<Move>> {
        let root = Node::new(initial, 0, vec![], 0);
        if root.is_goal() {
            return Some(vec![]);
        }

        let mut open_set = BinaryHeap::from([root]);
        let mut closed_set = FxHashSet::default();
        let mut visited = FxHashMap::default();
        visited.insert(initial, 0);

        let mut sequence = 0;
        let mut iteration = 0;

        while iteration < self.config.max_iterations {
            let Some(current) = open_set.pop() else {
                break;
            };
            iteration += 1;

            if current.is_goal() {
                log::debug!("astar :: goal after {iteration} expansions, path of {} moves", current.moves.len());
                return Some(current.moves);
            }

            if !closed_set.insert(current.queens) {
                continue;
            }

            Self::expand(&current, &closed_set, &mut visited, &mut sequence, &mut open_set);
        }

        log::debug!("astar :: gave up after {iteration} expansions, {} nodes still open", open_set.len());
        None
    }

    // A successor is skipped once closed or once it was reached with a `g` no worse than its own.
    fn expand(
        current: &Node,
        closed_set: &FxHashSet<Queens>,
        visited: &mut FxHashMap<Queens, usize>,
        sequence: &mut usize,
        open_set: &mut BinaryHeap<Node>,
    ) {
        let g_cost = current.g_cost + 1;
        for (queens, step) in current.successors() {
            if visited.get(&queens).is_some_and(|&best| best <= g_cost) || closed_set.contains(&queens) {
                continue;
            }
            visited.insert(queens, g_cost);

            let mut moves = current.moves.clone();
            moves.push(step);
            *sequence += 1;
            open_set.push(Node::new(queens, g_cost, moves, *sequence));
        }
    }
}

impl SearchStrategy for AStar {
    fn solve(&mut self, placement: &mut Placement, _rng: &mut dyn Random) -> SolveStatus {
        match self.search(*placement.queens()) {
            Some(moves) => {
                for (row, column) in moves {
                    placement.place_queen(row, column);
                }
                SolveStatus::Solved
            }
            None => SolveStatus::BudgetExhausted,
        }
    }
}
