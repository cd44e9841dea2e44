use std::cmp::Reverse;

use crate::board::{Column, Placement, Queens, BOARD_SIZE};
use crate::config::GeneticConfig;
use crate::conflict;
use crate::random::{sample_indices, shuffle, Random};

use super::{SearchStrategy, SolveStatus};

/// Column per row, always a permutation of `0..BOARD_SIZE`.
pub type Chromosome = [Column; BOARD_SIZE];

const MAX_FITNESS: usize = conflict::max_non_attacking_pairs();

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Individual {
    chromosome: Chromosome,
    fitness: usize,
}

impl Individual {
    fn new(chromosome: Chromosome) -> Self {
        #[cfg(feature = "paranoid")]
        debug_assert!(is_permutation(&chromosome), "{chromosome:?} is not a permutation");

        Self {
            chromosome,
            fitness: fitness(&chromosome),
        }
    }
}

#[must_use]
pub fn fitness(chromosome: &Chromosome) -> usize {
    MAX_FITNESS - conflict::conflict_count(&chromosome.map(Some))
}

#[must_use]
pub fn is_permutation(chromosome: &Chromosome) -> bool {
    let mut seen = [false; BOARD_SIZE];
    chromosome
        .iter()
        .all(|&gene| (gene as usize) < BOARD_SIZE && !std::mem::replace(&mut seen[gene as usize], true))
}

fn identity() -> Chromosome {
    std::array::from_fn(|i| i as Column)
}

// Empty slots take the donors' genes in order, skipping any already present, then whatever
// columns are still missing in ascending order.
fn fill_gaps<I>(genes: [Option<Column>; BOARD_SIZE], donors: I) -> Chromosome
where
    I: IntoIterator<Item = Column>,
{
    let mut used = [false; BOARD_SIZE];
    for &gene in genes.iter().flatten() {
        used[gene as usize] = true;
    }

    let mut remaining = donors
        .into_iter()
        .chain(0..BOARD_SIZE as Column)
        .filter(|&gene| !std::mem::replace(&mut used[gene as usize], true));

    genes.map(|gene| gene.or_else(|| remaining.next()).unwrap_or_default())
}

/// Turns an arbitrary board into a permutation: the first queen seen in each column keeps its
/// place, duplicates and empty rows get the missing columns in ascending order.
#[must_use]
pub fn repair_permutation(queens: &Queens) -> Chromosome {
    let mut seen = [false; BOARD_SIZE];
    let genes = queens.map(|queen| queen.filter(|&column| !std::mem::replace(&mut seen[column as usize], true)));
    fill_gaps(genes, std::iter::empty())
}

/// Order crossover: a random slice of `first` stays in place, the rest is filled in the order the
/// genes appear in `second`.
fn order_crossover(first: &Chromosome, second: &Chromosome, rng: &mut dyn Random) -> Chromosome {
    let cuts = sample_indices(rng, BOARD_SIZE, 2);
    let (start, end) = (cuts[0].min(cuts[1]), cuts[0].max(cuts[1]));

    let mut genes = [None; BOARD_SIZE];
    for position in start..end {
        genes[position] = Some(first[position]);
    }
    fill_gaps(genes, second.iter().copied())
}

fn swap_mutation(chromosome: &mut Chromosome, rng: &mut dyn Random) {
    let positions = sample_indices(rng, BOARD_SIZE, 2);
    chromosome.swap(positions[0], positions[1]);
}

/// Evolves a population of permutations; the answer is the fittest chromosome ever seen, not the
/// fittest of the last generation.
#[derive(Debug, Clone)]
pub struct Genetic {
    config: GeneticConfig,
}

impl Genetic {
    #[must_use]
    pub const fn new(config: GeneticConfig) -> Self {
        Self { config }
    }

    // index of the fittest of a random sample, the first one on ties
    fn tournament(&self, population: &[Individual], rng: &mut dyn Random) -> usize {
        sample_indices(rng, population.len(), self.config.tournament_size)
            .into_iter()
            .min_by_key(|&index| Reverse(population[index].fitness))
            .unwrap_or_default()
    }

    fn breed(&self, population: &[Individual], rng: &mut dyn Random) -> Individual {
        let first = population[self.tournament(population, rng)].chromosome;
        let second = population[self.tournament(population, rng)].chromosome;

        let mut child = if rng.generate_bool(self.config.crossover_rate) {
            order_crossover(&first, &second, rng)
        } else {
            first
        };
        if rng.generate_bool(self.config.mutation_rate) {
            swap_mutation(&mut child, rng);
        }
        Individual::new(child)
    }

    fn initial_population(&self, seed: Chromosome, rng: &mut dyn Random) -> Vec<Individual> {
        let size = self.config.population_size.max(1);
        let mut population = Vec::with_capacity(size);
        population.push(Individual::new(seed));
        for _ in 1..size {
            let mut chromosome = identity();
            shuffle(rng, &mut chromosome);
            population.push(Individual::new(chromosome));
        }
        population
    }
}

impl SearchStrategy for Genetic {
    fn solve(&mut self, placement: &mut Placement, rng: &mut dyn Random) -> SolveStatus {
        let size = self.config.population_size.max(1);
        let elite_size = self.config.elite_size();

        let mut population = self.initial_population(repair_permutation(placement.queens()), rng);
        let mut best = population[0];

        for generation in 0..self.config.max_generations {
            population.sort_by(|a, b| b.fitness.cmp(&a.fitness));

            if population[0].fitness > best.fitness {
                best = population[0];
                log::debug!("genetic :: generation {generation} :: fitness {} {:?}", best.fitness, best.chromosome);
            }
            if best.fitness == MAX_FITNESS {
                break;
            }

            let mut next_generation = population[..elite_size].to_vec();
            while next_generation.len() < size {
                next_generation.push(self.breed(&population, rng));
            }
            population = next_generation;
        }

        placement.set_queens(best.chromosome.map(Some));

        if best.fitness == MAX_FITNESS {
            SolveStatus::Solved
        } else {
            SolveStatus::BudgetExhausted
        }
    }
}
