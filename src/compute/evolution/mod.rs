//! Evolutionary search over fixed-length chromosomes.
//!
//! # Overview
//!
//! The search system consists of:
//!
//! - **Genome** (`genome`): chromosome storage and the seeded random source
//! - **Representations** (`representation`): binary-encoded intervals and symbol strings
//! - **Fitness Functions** (`fitness`): objective wrappers with an optimization direction
//! - **Population Store** (`population`): the double-buffered (current, next) pair
//! - **Operators** (`operators`): elitist selection, single-point crossover and mutation
//! - **Search Loop** (`search`): the generational engine and its termination policy
//!
//! # Example
//!
//! ```rust,no_run
//! use genetic_search::compute::evolution::{EvolutionEngine, FunctionMaximum};
//! use genetic_search::schema::{EvolutionParams, IntervalConfig, Termination};
//!
//! let evaluator = FunctionMaximum::new(IntervalConfig::default(), |x: f64| {
//!     x + 10.0 * (5.0 * x).sin() + 7.0 * (4.0 * x).cos()
//! })?;
//! let mut engine = EvolutionEngine::new(
//!     EvolutionParams::default(),
//!     Termination::Generations { num_generations: 100 },
//!     evaluator,
//!     Some(42),
//! )?;
//!
//! let result = engine.run_with_callback(|report| {
//!     println!("{} {:.4} {}", report.generation, report.best_fitness, report.best_value);
//! })?;
//! println!("Best x = {}", result.best.value);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod fitness;
mod genome;
mod operators;
mod population;
mod representation;
mod search;

pub use fitness::{
    EvaluationError, Fallible, FitnessEvaluator, FunctionMaximum, Objective, StringMatch,
    SymbolOf, ValueOf,
};
pub use genome::{Chromosome, EvolutionRng, Symbol};
pub use operators::{Ranking, crossover, mutate, select_elites};
pub use population::GenerationPair;
pub use representation::{BinaryInterval, FEASIBLE_SYMBOLS, Representation, SymbolString};
pub use search::{EvolutionEngine, EvolutionError};
