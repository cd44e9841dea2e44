//! Parameters of the search strategies. The defaults reproduce the classic exercise settings; tests
//! pass smaller values to keep runs short.

use std::num::NonZeroUsize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BacktrackingConfig {
    /// Stop after this many solutions, `None` enumerates all of them.
    pub solution_limit: Option<NonZeroUsize>,
}

impl Default for BacktrackingConfig {
    fn default() -> Self {
        Self {
            solution_limit: NonZeroUsize::new(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AStarConfig {
    /// Maximum number of nodes popped from the open set.
    pub max_iterations: usize,
}

impl Default for AStarConfig {
    fn default() -> Self {
        Self { max_iterations: 10_000 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnealingConfig {
    pub initial_temperature: f64,
    /// Multiplied into the temperature after every step.
    pub cooling_rate: f64,
    pub min_temperature: f64,
    pub max_steps: usize,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 500.0,
            cooling_rate: 0.99,
            min_temperature: 0.001,
            max_steps: 10_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneticConfig {
    pub population_size: usize,
    pub max_generations: usize,
    pub mutation_rate: f64,
    pub crossover_rate: f64,
    pub tournament_size: usize,
    /// Share of each generation carried over unchanged, at least one chromosome.
    pub elite_fraction: f64,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 1000,
            mutation_rate: 0.1,
            crossover_rate: 0.8,
            tournament_size: 3,
            elite_fraction: 0.1,
        }
    }
}

impl GeneticConfig {
    #[must_use]
    pub fn elite_size(&self) -> usize {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
        let elite = (self.population_size as f64 * self.elite_fraction) as usize;
        elite.clamp(1, self.population_size.max(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HillClimbingConfig {
    /// Guard on the number of climbing steps.
    pub max_iterations: usize,
}

impl Default for HillClimbingConfig {
    fn default() -> Self {
        Self { max_iterations: 1000 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SearchConfig {
    pub backtracking: BacktrackingConfig,
    pub astar: AStarConfig,
    pub annealing: AnnealingConfig,
    pub genetic: GeneticConfig,
    pub hill_climbing: HillClimbingConfig,
}
