//! Chromosome storage and the random source shared by every operator.

use std::fmt;

use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// A symbol that can occupy one chromosome position.
pub trait Symbol: Copy + PartialEq + fmt::Debug {
    /// Printable rendering of the symbol.
    fn to_char(self) -> char;
}

impl Symbol for bool {
    #[inline]
    fn to_char(self) -> char {
        if self { '1' } else { '0' }
    }
}

impl Symbol for char {
    #[inline]
    fn to_char(self) -> char {
        self
    }
}

/// Fixed-length ordered sequence of symbols.
///
/// Operators only ever rewrite positions in place or splice two parents of
/// equal length, so the length never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chromosome<S> {
    genes: Vec<S>,
}

impl<S: Symbol> Chromosome<S> {
    /// Wrap a gene vector.
    pub fn new(genes: Vec<S>) -> Self {
        Self { genes }
    }

    /// Number of positions.
    #[inline]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Borrow the genes.
    #[inline]
    pub fn genes(&self) -> &[S] {
        &self.genes
    }

    /// Symbol at `pos`.
    #[inline]
    pub fn get(&self, pos: usize) -> Option<S> {
        self.genes.get(pos).copied()
    }

    /// Overwrite the symbol at `pos`.
    #[inline]
    pub fn set(&mut self, pos: usize, symbol: S) {
        self.genes[pos] = symbol;
    }

    /// Single-point splice: `left[..pos]` followed by `right[pos..]`.
    pub fn splice(left: &Self, right: &Self, pos: usize) -> Self {
        debug_assert_eq!(left.len(), right.len());
        let mut genes = Vec::with_capacity(right.len());
        genes.extend_from_slice(&left.genes[..pos]);
        genes.extend_from_slice(&right.genes[pos..]);
        Self { genes }
    }
}

impl<S: Symbol> FromIterator<S> for Chromosome<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<S: Symbol> fmt::Display for Chromosome<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &symbol in &self.genes {
            write!(f, "{}", symbol.to_char())?;
        }
        Ok(())
    }
}

/// Seeded random source threaded through sampling, crossover and mutation.
pub struct EvolutionRng {
    rng: StdRng,
}

impl EvolutionRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Bernoulli trial that fires with probability `rate`.
    ///
    /// `rate` of 0.0 never fires and 1.0 always does.
    #[inline]
    pub fn trial(&mut self, rate: f64) -> bool {
        self.rng.r#gen::<f64>() < rate
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Uniform `u64` in `0..bound`. `bound` must be non-zero.
    #[inline]
    pub fn below(&mut self, bound: u64) -> u64 {
        self.rng.gen_range(0..bound)
    }

    /// Uniformly chosen element of a non-empty slice.
    #[inline]
    pub fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        items.choose(&mut self.rng).copied()
    }
}
