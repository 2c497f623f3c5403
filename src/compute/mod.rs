//! Compute module - Evolutionary search machinery.

pub mod evolution;

pub use evolution::{EvolutionEngine, EvolutionError, FunctionMaximum, StringMatch};
