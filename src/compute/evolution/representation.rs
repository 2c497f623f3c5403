//! Chromosome representations: binary-encoded real intervals and symbol strings.
//!
//! The evolution loop only talks to the [`Representation`] trait, so both
//! problems share one implementation of selection, crossover and mutation.

use std::fmt;

use crate::schema::{ConfigError, IntervalConfig};

use super::genome::{Chromosome, EvolutionRng, Symbol};

/// Feasible symbols for string reconstruction: ASCII letters, digits,
/// punctuation and whitespace.
pub const FEASIBLE_SYMBOLS: &str = concat!(
    "abcdefghijklmnopqrstuvwxyz",
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "0123456789",
    "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~",
    " \t\n\r\x0b\x0c",
);

/// Conversion between chromosomes and domain values.
pub trait Representation {
    /// Symbol stored at each chromosome position.
    type Symbol: Symbol;
    /// Decoded domain value.
    type Value: Clone + fmt::Debug;

    /// Fixed chromosome length for the run.
    fn chromosome_len(&self) -> usize;

    /// Symbols a position may take.
    fn alphabet(&self) -> &[Self::Symbol];

    /// Sample a fresh chromosome for the initial population.
    fn random_chromosome(&self, rng: &mut EvolutionRng) -> Chromosome<Self::Symbol>;

    /// Map a chromosome to its domain value.
    fn decode(&self, chromosome: &Chromosome<Self::Symbol>) -> Self::Value;

    /// Replacement symbol for a point mutation.
    fn mutate_symbol(&self, current: Self::Symbol, rng: &mut EvolutionRng) -> Self::Symbol;
}

/// Binary encoding of a discretized real interval.
///
/// `[lower, upper)` is split into `floor(width / precision)` enumerated
/// points, each given a left-zero-padded chromosome of
/// `ceil(log2(width / precision))` bits. Decoding scales over the full
/// `2^length` range, so bit patterns past the enumerated points (reachable
/// only through crossover or mutation) decode to values initial sampling
/// never produces.
#[derive(Debug, Clone)]
pub struct BinaryInterval {
    interval: IntervalConfig,
    length: usize,
    point_count: u64,
    denominator: f64,
}

const BITS: [bool; 2] = [false, true];

impl BinaryInterval {
    /// Create from validated interval settings.
    pub fn new(interval: IntervalConfig) -> Result<Self, ConfigError> {
        interval.validate()?;
        let length = interval
            .binary_length()
            .ok_or(ConfigError::PrecisionTooCoarse {
                width: interval.width(),
                precision: interval.precision,
            })?;
        let point_count = (interval.width() / interval.precision).floor() as u64;

        Ok(Self {
            interval,
            length,
            point_count,
            denominator: 2f64.powi(length as i32),
        })
    }

    /// Interval settings.
    pub fn interval(&self) -> &IntervalConfig {
        &self.interval
    }

    /// Number of enumerated points.
    #[inline]
    pub fn point_count(&self) -> u64 {
        self.point_count
    }

    /// Chromosome for the enumerated point `index`, most significant bit first.
    pub fn encode_index(&self, index: u64) -> Chromosome<bool> {
        (0..self.length)
            .map(|bit| (index >> (self.length - 1 - bit)) & 1 == 1)
            .collect()
    }

    /// Every enumerated chromosome, in index order.
    pub fn encode(&self) -> Vec<Chromosome<bool>> {
        (0..self.point_count)
            .map(|index| self.encode_index(index))
            .collect()
    }

    /// Unsigned integer spelled by the bits.
    pub fn to_integer(chromosome: &Chromosome<bool>) -> u64 {
        chromosome
            .genes()
            .iter()
            .fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit))
    }
}

impl Representation for BinaryInterval {
    type Symbol = bool;
    type Value = f64;

    #[inline]
    fn chromosome_len(&self) -> usize {
        self.length
    }

    fn alphabet(&self) -> &[bool] {
        &BITS
    }

    fn random_chromosome(&self, rng: &mut EvolutionRng) -> Chromosome<bool> {
        self.encode_index(rng.below(self.point_count))
    }

    fn decode(&self, chromosome: &Chromosome<bool>) -> f64 {
        let b = Self::to_integer(chromosome) as f64;
        self.interval.lower_bound + b * self.interval.width() / self.denominator
    }

    #[inline]
    fn mutate_symbol(&self, current: bool, _rng: &mut EvolutionRng) -> bool {
        !current
    }
}

/// Fixed-alphabet string whose chromosome is the candidate value itself.
#[derive(Debug, Clone)]
pub struct SymbolString {
    target: Vec<char>,
    alphabet: Vec<char>,
}

impl SymbolString {
    /// Create a representation sized to `target`.
    pub fn new(target: &str) -> Result<Self, ConfigError> {
        if target.is_empty() {
            return Err(ConfigError::EmptyTarget);
        }
        let repr = Self {
            target: target.chars().collect(),
            alphabet: FEASIBLE_SYMBOLS.chars().collect(),
        };
        if !repr.is_representable() {
            log::warn!(
                "Target {:?} contains symbols outside the feasible alphabet; \
                 an exact match is unreachable",
                target
            );
        }
        Ok(repr)
    }

    /// Target symbols.
    pub fn target(&self) -> &[char] {
        &self.target
    }

    /// Whether every target symbol belongs to the alphabet.
    pub fn is_representable(&self) -> bool {
        self.target.iter().all(|c| self.alphabet.contains(c))
    }
}

impl Representation for SymbolString {
    type Symbol = char;
    type Value = String;

    #[inline]
    fn chromosome_len(&self) -> usize {
        self.target.len()
    }

    fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    fn random_chromosome(&self, rng: &mut EvolutionRng) -> Chromosome<char> {
        (0..self.target.len())
            .map(|_| self.alphabet[rng.index(self.alphabet.len())])
            .collect()
    }

    fn decode(&self, chromosome: &Chromosome<char>) -> String {
        chromosome.genes().iter().collect()
    }

    fn mutate_symbol(&self, current: char, rng: &mut EvolutionRng) -> char {
        rng.pick(&self.alphabet).unwrap_or(current)
    }
}
