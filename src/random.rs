use std::fmt::Debug;
use std::ops::Range;

use rand::Rng;
use rand::SeedableRng;

/// Source of randomness for the stochastic strategies.
///
/// Any seedable generator implements it; tests can instead script the exact values a strategy
/// will draw (see `TestRandom` in the test module).
pub trait Random: Debug {
    /// Generates a bool with probability `probability` of being true, `probability ∈ [0, 1]`.
    fn generate_bool(&mut self, probability: f64) -> bool;

    /// Samples uniformly from `[range.start, range.end)`.
    fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize;

    /// Generate a random float in the range 0..1.
    fn generate_f64(&mut self) -> f64;
}

impl<T> Random for T
where
    T: SeedableRng + Rng + Debug,
{
    fn generate_bool(&mut self, probability: f64) -> bool {
        #[cfg(feature = "paranoid")]
        debug_assert!(
            (0.0..=1.0).contains(&probability),
            "It should hold that 0.0 <= {probability} <= 1.0"
        );

        self.gen_bool(probability)
    }

    fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize {
        self.gen_range(range)
    }

    fn generate_f64(&mut self) -> f64 {
        self.gen_range(0.0..1.0)
    }
}

/// Fisher-Yates shuffle driven by a [`Random`].
pub fn shuffle<T>(rng: &mut dyn Random, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.generate_usize_in_range(0..i + 1);
        items.swap(i, j);
    }
}

/// `amount` distinct indices out of `0..len`, in the order they were drawn.
pub fn sample_indices(rng: &mut dyn Random, len: usize, amount: usize) -> Vec<usize> {
    let amount = amount.min(len);
    let mut pool = (0..len).collect::<Vec<_>>();
    for i in 0..amount {
        let j = rng.generate_usize_in_range(i..len);
        pool.swap(i, j);
    }
    pool.truncate(amount);
    pool
}
