//! Genetic search - Elitist generational evolution over bounded search spaces.
//!
//! This crate provides one evolutionary loop (elitist selection, single-point
//! crossover, single-point mutation over a double-buffered population) and two
//! problems built on it: maximizing a real function over a binary-encoded
//! interval, and reconstructing a target string.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration, report and result types
//! - `compute`: Representations, fitness, operators and the search engine
//!
//! # Example
//!
//! ```rust,no_run
//! use genetic_search::{
//!     compute::{EvolutionEngine, StringMatch},
//!     schema::{EvolutionParams, Termination},
//! };
//!
//! let params = EvolutionParams {
//!     population_size: 2048,
//!     elite_rate: 0.2,
//!     cross_rate: 0.5,
//!     mutate_rate: 0.1,
//! };
//! let termination = Termination::Convergence {
//!     error_criterion: 1e-8,
//!     max_generations: None,
//! };
//!
//! let mut engine = EvolutionEngine::new(
//!     params,
//!     termination,
//!     StringMatch::new("Hello World!")?,
//!     None,
//! )?;
//! let result = engine.run()?;
//!
//! println!("Matched {:?} after {} generations", result.best.value, result.stats.generations);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{EvolutionEngine, EvolutionError, FunctionMaximum, StringMatch};
pub use schema::{EvolutionConfig, EvolutionParams, ProblemConfig, Termination};
