//! Configuration types for evolutionary search runs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Largest binary chromosome the interval encoding supports (decoded into a `u64`).
pub const MAX_BINARY_LENGTH: usize = 63;

/// Top-level configuration for one evolutionary run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Population size and operator rates.
    pub population: EvolutionParams,
    /// Which problem to solve and how the run terminates.
    pub problem: ProblemConfig,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

/// Population size and operator rates shared by every problem.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EvolutionParams {
    /// Number of chromosomes in each generation buffer.
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Fraction of the population carried forward unchanged (0.0-1.0).
    #[serde(default = "default_elite_rate")]
    pub elite_rate: f64,
    /// Probability that a non-elite slot is rewritten by crossover (0.0-1.0).
    #[serde(default = "default_cross_rate")]
    pub cross_rate: f64,
    /// Probability that a non-elite slot receives a point mutation (0.0-1.0).
    #[serde(default = "default_mutate_rate")]
    pub mutate_rate: f64,
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            elite_rate: default_elite_rate(),
            cross_rate: default_cross_rate(),
            mutate_rate: default_mutate_rate(),
        }
    }
}

fn default_population_size() -> usize {
    2048
}
fn default_elite_rate() -> f64 {
    0.2
}
fn default_cross_rate() -> f64 {
    0.5
}
fn default_mutate_rate() -> f64 {
    0.1
}

impl EvolutionParams {
    /// Number of elites: `floor(elite_rate * population_size)`.
    #[inline]
    pub fn elite_size(&self) -> usize {
        let elite = (self.elite_rate * self.population_size as f64).floor() as usize;
        elite.min(self.population_size)
    }

    /// Validate population size and rates.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        check_rate("elite_rate", self.elite_rate)?;
        check_rate("cross_rate", self.cross_rate)?;
        check_rate("mutate_rate", self.mutate_rate)?;
        Ok(())
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::RateOutOfRange { name, value })
    }
}

/// Bounds and resolution of the real interval searched by the binary encoding.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct IntervalConfig {
    /// Inclusive lower bound.
    pub lower_bound: f64,
    /// Exclusive upper bound.
    pub upper_bound: f64,
    /// Requested resolution of the search.
    pub precision: f64,
}

impl Default for IntervalConfig {
    fn default() -> Self {
        Self {
            lower_bound: 0.0,
            upper_bound: 9.0,
            precision: 1e-4,
        }
    }
}

impl IntervalConfig {
    /// Width of the interval.
    #[inline]
    pub fn width(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }

    /// Binary chromosome length: `ceil(log2(width / precision))`.
    ///
    /// Returns `None` when the ratio yields no usable length.
    pub fn binary_length(&self) -> Option<usize> {
        let bits = (self.width() / self.precision).log2().ceil();
        if bits.is_finite() && bits >= 1.0 {
            Some(bits as usize)
        } else {
            None
        }
    }

    /// Validate bounds, precision and the derived chromosome length.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.lower_bound.is_finite() || !self.upper_bound.is_finite() {
            return Err(ConfigError::NonFiniteBounds);
        }
        if self.upper_bound <= self.lower_bound {
            return Err(ConfigError::EmptyInterval {
                lower: self.lower_bound,
                upper: self.upper_bound,
            });
        }
        if !self.width().is_finite() {
            return Err(ConfigError::NonFiniteBounds);
        }
        if !(self.precision.is_finite() && self.precision > 0.0) {
            return Err(ConfigError::InvalidPrecision(self.precision));
        }
        // Overflowing ratio: more points than any chromosome can address.
        if (self.width() / self.precision).is_infinite() {
            return Err(self.too_fine());
        }
        match self.binary_length() {
            None => Err(ConfigError::PrecisionTooCoarse {
                width: self.width(),
                precision: self.precision,
            }),
            Some(length) if length > MAX_BINARY_LENGTH => Err(self.too_fine()),
            Some(_) => Ok(()),
        }
    }

    fn too_fine(&self) -> ConfigError {
        ConfigError::PrecisionTooFine {
            width: self.width(),
            precision: self.precision,
        }
    }
}

/// How a run decides it is finished.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Termination {
    /// Run exactly this many generations.
    Generations { num_generations: usize },
    /// Run until the leading individual meets `error_criterion`.
    ///
    /// Without `max_generations` the loop has no ceiling.
    Convergence {
        error_criterion: f64,
        #[serde(default)]
        max_generations: Option<usize>,
    },
}

impl Termination {
    /// Validate the termination settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Termination::Generations { num_generations } => {
                if num_generations == 0 {
                    return Err(ConfigError::NoGenerations);
                }
            }
            Termination::Convergence {
                error_criterion,
                max_generations,
            } => {
                if !(error_criterion.is_finite() && error_criterion > 0.0) {
                    return Err(ConfigError::InvalidErrorCriterion(error_criterion));
                }
                if max_generations == Some(0) {
                    return Err(ConfigError::NoGenerations);
                }
            }
        }
        Ok(())
    }
}

/// Problem selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ProblemConfig {
    /// Maximize a real function over a bounded interval.
    FunctionMaximum {
        lower_bound: f64,
        upper_bound: f64,
        precision: f64,
        #[serde(default = "default_num_generations")]
        num_generations: usize,
    },
    /// Reconstruct a target string.
    StringMatch {
        target: String,
        #[serde(default = "default_error_criterion")]
        error_criterion: f64,
        #[serde(default)]
        max_generations: Option<usize>,
    },
}

impl Default for ProblemConfig {
    fn default() -> Self {
        Self::StringMatch {
            target: "Hello World!".to_string(),
            error_criterion: default_error_criterion(),
            max_generations: None,
        }
    }
}

fn default_num_generations() -> usize {
    1000
}
fn default_error_criterion() -> f64 {
    1e-8
}

impl ProblemConfig {
    /// Termination policy implied by the problem.
    pub fn termination(&self) -> Termination {
        match self {
            ProblemConfig::FunctionMaximum {
                num_generations, ..
            } => Termination::Generations {
                num_generations: *num_generations,
            },
            ProblemConfig::StringMatch {
                error_criterion,
                max_generations,
                ..
            } => Termination::Convergence {
                error_criterion: *error_criterion,
                max_generations: *max_generations,
            },
        }
    }

    /// Interval searched by a function-maximum problem.
    pub fn interval(&self) -> Option<IntervalConfig> {
        match *self {
            ProblemConfig::FunctionMaximum {
                lower_bound,
                upper_bound,
                precision,
                ..
            } => Some(IntervalConfig {
                lower_bound,
                upper_bound,
                precision,
            }),
            ProblemConfig::StringMatch { .. } => None,
        }
    }

    /// Target of a string-match problem.
    pub fn target(&self) -> Option<&str> {
        match self {
            ProblemConfig::StringMatch { target, .. } => Some(target.as_str()),
            ProblemConfig::FunctionMaximum { .. } => None,
        }
    }

    /// Validate problem-specific settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(interval) = self.interval() {
            interval.validate()?;
        }
        if let ProblemConfig::StringMatch { target, .. } = self
            && target.is_empty()
        {
            return Err(ConfigError::EmptyTarget);
        }
        self.termination().validate()
    }
}

impl EvolutionConfig {
    /// Validate the whole configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.population.validate()?;
        self.problem.validate()
    }

    /// Read and validate a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Population size must be non-zero")]
    EmptyPopulation,
    #[error("{name} must lie in [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f64 },
    #[error("Interval bounds and width must be finite")]
    NonFiniteBounds,
    #[error("Upper bound ({upper}) must exceed lower bound ({lower})")]
    EmptyInterval { lower: f64, upper: f64 },
    #[error("Precision must be positive, got {0}")]
    InvalidPrecision(f64),
    #[error("Precision {precision} is too coarse for interval width {width}")]
    PrecisionTooCoarse { width: f64, precision: f64 },
    #[error(
        "Precision {precision} is too fine for interval width {width}: \
         chromosomes are limited to {max} bits",
        max = MAX_BINARY_LENGTH
    )]
    PrecisionTooFine { width: f64, precision: f64 },
    #[error("Target string must not be empty")]
    EmptyTarget,
    #[error("Generation count must be positive")]
    NoGenerations,
    #[error("Error criterion must be positive, got {0}")]
    InvalidErrorCriterion(f64),
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
