//! Fitness evaluation for the two search problems.
//!
//! Fitness is never cached: every call recomputes it from the chromosome,
//! trading extra objective calls for simpler bookkeeping.

use crate::schema::{ConfigError, Direction, IntervalConfig};

use super::genome::Chromosome;
use super::representation::{BinaryInterval, Representation, SymbolString};

/// Symbol type of an evaluator's representation.
pub type SymbolOf<E> = <<E as FitnessEvaluator>::Repr as Representation>::Symbol;

/// Domain value type of an evaluator's representation.
pub type ValueOf<E> = <<E as FitnessEvaluator>::Repr as Representation>::Value;

/// Errors raised while scoring a chromosome.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error("Objective returned non-finite value {value} at x = {input}")]
    NonFinite { input: f64, value: f64 },
    #[error("Objective failed at x = {input}: {source}")]
    Objective {
        input: f64,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// A real-valued objective `f(x)`.
///
/// Objectives should be deterministic and side-effect free so runs replay
/// under a fixed seed.
pub trait Objective {
    fn value(&self, x: f64) -> Result<f64, EvaluationError>;
}

impl<F> Objective for F
where
    F: Fn(f64) -> f64,
{
    #[inline]
    fn value(&self, x: f64) -> Result<f64, EvaluationError> {
        Ok(self(x))
    }
}

/// Adapter for objectives that can fail.
pub struct Fallible<F>(pub F);

impl<F, E> Objective for Fallible<F>
where
    F: Fn(f64) -> Result<f64, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    fn value(&self, x: f64) -> Result<f64, EvaluationError> {
        (self.0)(x).map_err(|e| EvaluationError::Objective {
            input: x,
            source: Box::new(e),
        })
    }
}

/// Scores chromosomes of one representation.
pub trait FitnessEvaluator {
    type Repr: Representation;

    /// Representation the evaluator decodes with.
    fn representation(&self) -> &Self::Repr;

    /// Whether higher or lower fitness is better.
    fn direction(&self) -> Direction;

    /// Fitness of a single chromosome.
    fn fitness(
        &self,
        chromosome: &Chromosome<<Self::Repr as Representation>::Symbol>,
    ) -> Result<f64, EvaluationError>;
}

/// Maximizes `objective(decode(chromosome))` over a binary-encoded interval.
pub struct FunctionMaximum<O> {
    repr: BinaryInterval,
    objective: O,
}

impl<O: Objective> FunctionMaximum<O> {
    /// Create for `objective` over `interval`.
    pub fn new(interval: IntervalConfig, objective: O) -> Result<Self, ConfigError> {
        Ok(Self {
            repr: BinaryInterval::new(interval)?,
            objective,
        })
    }
}

impl<O: Objective> FitnessEvaluator for FunctionMaximum<O> {
    type Repr = BinaryInterval;

    fn representation(&self) -> &BinaryInterval {
        &self.repr
    }

    fn direction(&self) -> Direction {
        Direction::Maximize
    }

    fn fitness(&self, chromosome: &Chromosome<bool>) -> Result<f64, EvaluationError> {
        let x = self.repr.decode(chromosome);
        let value = self.objective.value(x)?;
        if !value.is_finite() {
            return Err(EvaluationError::NonFinite { input: x, value });
        }
        Ok(value)
    }
}

/// Minimizes the mean absolute code-point distance to a target string.
pub struct StringMatch {
    repr: SymbolString,
}

impl StringMatch {
    /// Create for `target`.
    pub fn new(target: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            repr: SymbolString::new(target)?,
        })
    }
}

impl FitnessEvaluator for StringMatch {
    type Repr = SymbolString;

    fn representation(&self) -> &SymbolString {
        &self.repr
    }

    fn direction(&self) -> Direction {
        Direction::Minimize
    }

    fn fitness(&self, chromosome: &Chromosome<char>) -> Result<f64, EvaluationError> {
        let target = self.repr.target();
        let distance: u64 = chromosome
            .genes()
            .iter()
            .zip(target)
            .map(|(&c, &t)| u64::from(u32::from(c).abs_diff(u32::from(t))))
            .sum();
        Ok(distance as f64 / target.len() as f64)
    }
}
