//! Progress and result types produced by an evolutionary run.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Optimization direction of a fitness function.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Direction {
    /// Higher fitness is better.
    Maximize,
    /// Lower fitness is better.
    Minimize,
}

impl Direction {
    /// Order two fitness values so that the better one sorts first.
    #[inline]
    pub fn rank(self, a: f64, b: f64) -> Ordering {
        let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        match self {
            Direction::Maximize => ord.reverse(),
            Direction::Minimize => ord,
        }
    }

    /// Whether `candidate` is strictly better than `incumbent`.
    #[inline]
    pub fn is_better(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Direction::Maximize => candidate > incumbent,
            Direction::Minimize => candidate < incumbent,
        }
    }

    /// Whether `fitness` has reached `threshold` from the good side.
    #[inline]
    pub fn meets(self, fitness: f64, threshold: f64) -> bool {
        match self {
            Direction::Maximize => fitness >= threshold,
            Direction::Minimize => fitness <= threshold,
        }
    }
}

/// Per-generation report handed to the progress sink.
///
/// `best_fitness` and `best_value` describe slot 0 of the freshly swapped-in
/// population, read without re-sorting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationReport<V> {
    /// Zero-based index of the generation that just completed.
    pub generation: usize,
    /// Fitness of the leading individual.
    pub best_fitness: f64,
    /// Decoded domain value of the leading individual.
    pub best_value: V,
}

/// Best individual found during a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BestIndividual<V> {
    /// Decoded domain value.
    pub value: V,
    /// Fitness of the individual.
    pub fitness: f64,
    /// Symbol rendering of the chromosome.
    pub chromosome: String,
    /// Generation in which it was ranked.
    pub generation: usize,
}

/// Fitness history for plotting.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EvolutionHistory {
    /// Best fitness of each ranked generation.
    pub best_fitness: Vec<f64>,
    /// Mean fitness of each ranked generation.
    pub mean_fitness: Vec<f64>,
}

/// Current phase of the engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum EvolutionPhase {
    /// Buffers not yet sampled.
    #[default]
    Initializing,
    /// Generations are being produced.
    Evolving,
    /// A termination condition was met.
    Terminated,
}

/// Reason evolution stopped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StopReason {
    /// Ran the configured number of generations.
    MaxGenerations,
    /// Leading individual met the error criterion.
    Converged,
    /// Convergence run hit its optional generation ceiling.
    GenerationCap,
}

/// Statistics from an evolutionary run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionStats {
    /// Generations executed.
    pub generations: usize,
    /// Fitness evaluations performed.
    pub total_evaluations: u64,
    /// Best fitness achieved.
    pub best_fitness: f64,
    /// Time taken (in seconds).
    pub elapsed_seconds: f64,
    /// Evaluations per second.
    pub evaluations_per_second: f64,
    /// Reason for stopping.
    pub stop_reason: StopReason,
}

/// Final result of an evolutionary run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionResult<V> {
    /// Best individual found.
    pub best: BestIndividual<V>,
    /// Statistics from the run.
    pub stats: EvolutionStats,
    /// Full history for analysis.
    pub history: EvolutionHistory,
}
