//! Double-buffered generation storage.

use super::genome::{Chromosome, EvolutionRng, Symbol};
use super::representation::Representation;

/// The (current, next) pair of population buffers.
///
/// Both buffers always hold `population_size` chromosomes. Operators read
/// `current` and write `next`; [`GenerationPair::swap`] then exchanges the
/// roles without copying any chromosome.
#[derive(Debug, Clone)]
pub struct GenerationPair<S> {
    current: Vec<Chromosome<S>>,
    next: Vec<Chromosome<S>>,
}

impl<S: Symbol> GenerationPair<S> {
    /// Sample both buffers independently from `repr`.
    pub fn random<R>(repr: &R, population_size: usize, rng: &mut EvolutionRng) -> Self
    where
        R: Representation<Symbol = S>,
    {
        let current = (0..population_size)
            .map(|_| repr.random_chromosome(rng))
            .collect();
        let next = (0..population_size)
            .map(|_| repr.random_chromosome(rng))
            .collect();
        Self { current, next }
    }

    /// Pair with no chromosomes, before sampling.
    pub fn empty() -> Self {
        Self {
            current: Vec::new(),
            next: Vec::new(),
        }
    }

    /// Build from explicit buffers of equal length.
    ///
    /// # Panics
    ///
    /// Panics if `current` and `next` differ in length.
    pub fn from_buffers(current: Vec<Chromosome<S>>, next: Vec<Chromosome<S>>) -> Self {
        assert_eq!(
            current.len(),
            next.len(),
            "generation buffers must have equal size"
        );
        Self { current, next }
    }

    /// Population size.
    #[inline]
    pub fn len(&self) -> usize {
        self.current.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// The generation being read.
    #[inline]
    pub fn current(&self) -> &[Chromosome<S>] {
        &self.current
    }

    /// The generation being written.
    #[inline]
    pub fn next(&self) -> &[Chromosome<S>] {
        &self.next
    }

    /// Mutable access to the generation being written.
    #[inline]
    pub fn next_mut(&mut self) -> &mut [Chromosome<S>] {
        &mut self.next
    }

    /// Read `current` while writing `next`.
    #[inline]
    pub fn split_mut(&mut self) -> (&[Chromosome<S>], &mut [Chromosome<S>]) {
        (&self.current, &mut self.next)
    }

    /// Exchange the roles of the two buffers.
    #[inline]
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }
}
