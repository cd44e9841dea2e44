use crate::board::{Column, Placement, BOARD_SIZE};
use crate::config::AnnealingConfig;
use crate::conflict;
use crate::random::Random;

use super::{complete_placement, SearchStrategy, SolveStatus};

/// Random single queen moves, accepted by the Metropolis criterion on the conflict count.
///
/// The board never goes back to an earlier state, whatever it holds when the schedule runs out is
/// the answer.
#[derive(Debug, Clone)]
pub struct SimulatedAnnealing {
    config: AnnealingConfig,
}

impl SimulatedAnnealing {
    #[must_use]
    pub const fn new(config: AnnealingConfig) -> Self {
        Self { config }
    }

    fn accepts(delta: f64, temperature: f64, rng: &mut dyn Random) -> bool {
        delta > 0.0 || rng.generate_f64() < (delta / temperature).exp()
    }
}

impl SearchStrategy for SimulatedAnnealing {
    fn solve(&mut self, placement: &mut Placement, rng: &mut dyn Random) -> SolveStatus {
        complete_placement(placement);

        let mut temperature = self.config.initial_temperature;
        let mut conflicts = placement.conflict_count();
        let mut steps = 0;

        while steps < self.config.max_steps && conflicts > 0 {
            steps += 1;

            let row = rng.generate_usize_in_range(0..BOARD_SIZE);
            let column = loop {
                let column = rng.generate_usize_in_range(0..BOARD_SIZE) as Column;
                if placement.get(row) != Some(column) {
                    break column;
                }
            };

            let mut neighbour = *placement.queens();
            neighbour[row] = Some(column);
            let new_conflicts = conflict::conflict_count(&neighbour);

            #[allow(clippy::cast_precision_loss)]
            let delta = conflicts as f64 - new_conflicts as f64;
            if Self::accepts(delta, temperature, rng) {
                placement.place_queen(row, column);
                conflicts = new_conflicts;
            }

            temperature *= self.config.cooling_rate;
            if temperature < self.config.min_temperature {
                break;
            }
        }

        log::debug!("annealing :: stopped after {steps} steps at temperature {temperature:.4} with {conflicts} conflicts");

        if conflicts == 0 {
            SolveStatus::Solved
        } else {
            SolveStatus::BudgetExhausted
        }
    }
}
