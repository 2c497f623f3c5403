//! Generational evolution engine.

use std::time::Instant;

use crate::schema::{
    BestIndividual, ConfigError, EvolutionHistory, EvolutionParams, EvolutionPhase,
    EvolutionResult, EvolutionStats, GenerationReport, StopReason, Termination,
};

use super::fitness::{EvaluationError, FitnessEvaluator, SymbolOf, ValueOf};
use super::genome::EvolutionRng;
use super::operators::{self, Ranking};
use super::population::GenerationPair;
use super::representation::Representation;

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum EvolutionError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Fitness evaluation failed: {0}")]
    Evaluation(#[from] EvaluationError),
}

/// Evolution engine that runs the search.
///
/// The loop is written once against [`FitnessEvaluator`]; the evaluator's
/// representation decides what a chromosome means.
pub struct EvolutionEngine<E: FitnessEvaluator> {
    params: EvolutionParams,
    termination: Termination,
    evaluator: E,
    rng: EvolutionRng,
    population: GenerationPair<SymbolOf<E>>,
    phase: EvolutionPhase,
    generation: usize,
    evaluations: u64,
    best: Option<BestIndividual<ValueOf<E>>>,
    history: EvolutionHistory,
}

impl<E: FitnessEvaluator> EvolutionEngine<E> {
    /// Create a new evolution engine.
    ///
    /// Every setting is validated here, before any generation runs.
    pub fn new(
        params: EvolutionParams,
        termination: Termination,
        evaluator: E,
        random_seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        params.validate()?;
        termination.validate()?;

        let seed = random_seed.unwrap_or_else(rand::random);
        log::debug!("Evolution engine seeded with {}", seed);

        Ok(Self {
            params,
            termination,
            evaluator,
            rng: EvolutionRng::new(seed),
            population: GenerationPair::empty(),
            phase: EvolutionPhase::Initializing,
            generation: 0,
            evaluations: 0,
            best: None,
            history: EvolutionHistory::default(),
        })
    }

    /// Run parameters.
    pub fn params(&self) -> &EvolutionParams {
        &self.params
    }

    /// Fitness evaluator.
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// The (current, next) generation buffers.
    pub fn population(&self) -> &GenerationPair<SymbolOf<E>> {
        &self.population
    }

    /// Current phase.
    pub fn phase(&self) -> EvolutionPhase {
        self.phase
    }

    /// Generations completed so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Fitness evaluations performed so far.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Best individual ranked so far.
    pub fn best(&self) -> Option<&BestIndividual<ValueOf<E>>> {
        self.best.as_ref()
    }

    /// Fitness history of every ranked generation.
    pub fn history(&self) -> &EvolutionHistory {
        &self.history
    }

    /// Sample both generation buffers and reset run state.
    pub fn initialize(&mut self) {
        let repr = self.evaluator.representation();
        self.population =
            GenerationPair::random(repr, self.params.population_size, &mut self.rng);
        self.phase = EvolutionPhase::Evolving;
        self.generation = 0;
        self.evaluations = 0;
        self.best = None;
        self.history = EvolutionHistory::default();
    }

    fn ensure_initialized(&mut self) {
        if self.phase == EvolutionPhase::Initializing {
            self.initialize();
        }
    }

    /// Fitness of slot 0 of the current generation, without re-sorting.
    fn leading_fitness(&mut self) -> Result<f64, EvaluationError> {
        self.evaluations += 1;
        self.evaluator.fitness(&self.population.current()[0])
    }

    /// Check if evolution should stop.
    ///
    /// Convergence runs evaluate the leading individual on every check.
    pub fn should_stop(&mut self) -> Result<Option<StopReason>, EvaluationError> {
        self.ensure_initialized();

        let reason = match self.termination {
            Termination::Generations { num_generations } => {
                (self.generation >= num_generations).then_some(StopReason::MaxGenerations)
            }
            Termination::Convergence {
                error_criterion,
                max_generations,
            } => {
                let fitness = self.leading_fitness()?;
                if self.evaluator.direction().meets(fitness, error_criterion) {
                    Some(StopReason::Converged)
                } else if let Some(cap) = max_generations
                    && self.generation >= cap
                {
                    log::warn!(
                        "Stopping after {} generations without meeting error criterion {} \
                         (leading fitness {})",
                        self.generation,
                        error_criterion,
                        fitness
                    );
                    Some(StopReason::GenerationCap)
                } else {
                    None
                }
            }
        };

        if reason.is_some() {
            self.phase = EvolutionPhase::Terminated;
        }
        Ok(reason)
    }

    /// Run one generation: selection, crossover, mutation, then swap.
    ///
    /// Returns the report for slot 0 of the new current generation.
    pub fn step(&mut self) -> Result<GenerationReport<ValueOf<E>>, EvolutionError> {
        self.ensure_initialized();

        let elite_size = self.params.elite_size();
        let ranking = operators::select_elites(&self.evaluator, &mut self.population, elite_size)?;
        self.evaluations += self.population.len() as u64;
        self.record_ranking(&ranking);

        operators::crossover(
            &mut self.population,
            elite_size,
            self.params.cross_rate,
            &mut self.rng,
        );
        operators::mutate(
            self.evaluator.representation(),
            &mut self.population,
            elite_size,
            self.params.mutate_rate,
            &mut self.rng,
        );
        self.population.swap();

        let report = GenerationReport {
            generation: self.generation,
            best_fitness: self.leading_fitness()?,
            best_value: self
                .evaluator
                .representation()
                .decode(&self.population.current()[0]),
        };
        log::debug!(
            "Generation {}: best fitness {:.4}, best value {:?}",
            report.generation,
            report.best_fitness,
            report.best_value
        );

        self.generation += 1;
        Ok(report)
    }

    /// Append a ranked generation to the history and track the best individual.
    fn record_ranking(&mut self, ranking: &Ranking) {
        let Some(index) = ranking.best_index() else {
            return;
        };
        let fitness = ranking.fitness()[index];

        self.history.best_fitness.push(fitness);
        self.history.mean_fitness.push(ranking.mean_fitness());
        self.consider_candidate(index, fitness);
    }

    /// Keep slot `index` of the current generation if it beats the tracked best.
    fn consider_candidate(&mut self, index: usize, fitness: f64) {
        let direction = self.evaluator.direction();
        let improves = self
            .best
            .as_ref()
            .is_none_or(|b| direction.is_better(fitness, b.fitness));
        if !improves {
            return;
        }

        let chromosome = &self.population.current()[index];
        self.best = Some(BestIndividual {
            value: self.evaluator.representation().decode(chromosome),
            fitness,
            chromosome: chromosome.to_string(),
            generation: self.generation,
        });
    }

    /// Rank the terminal generation so its unranked offspring are considered.
    fn rank_final_generation(&mut self) -> Result<(), EvaluationError> {
        let ranking = Ranking::rank(&self.evaluator, self.population.current())?;
        self.evaluations += self.population.len() as u64;

        if let Some(index) = ranking.best_index() {
            self.consider_candidate(index, ranking.fitness()[index]);
        }
        Ok(())
    }

    /// Run evolution with a per-generation report sink.
    pub fn run_with_callback<F>(
        &mut self,
        mut callback: F,
    ) -> Result<EvolutionResult<ValueOf<E>>, EvolutionError>
    where
        F: FnMut(&GenerationReport<ValueOf<E>>),
    {
        let start_time = Instant::now();

        self.initialize();
        log::info!(
            "Starting evolution: population {}, elites {}, chromosome length {}",
            self.params.population_size,
            self.params.elite_size(),
            self.evaluator.representation().chromosome_len()
        );

        let stop_reason = loop {
            if let Some(reason) = self.should_stop()? {
                break reason;
            }
            let report = self.step()?;
            callback(&report);
        };

        self.rank_final_generation()?;

        let elapsed = start_time.elapsed().as_secs_f64();
        // Only an empty population leaves nothing to rank.
        let Some(best) = self.best.clone() else {
            return Err(ConfigError::EmptyPopulation.into());
        };

        log::info!(
            "Evolution stopped after {} generations ({:?}): best fitness {:.4}",
            self.generation,
            stop_reason,
            best.fitness
        );

        Ok(EvolutionResult {
            stats: EvolutionStats {
                generations: self.generation,
                total_evaluations: self.evaluations,
                best_fitness: best.fitness,
                elapsed_seconds: elapsed,
                evaluations_per_second: self.evaluations as f64 / elapsed.max(f64::EPSILON),
                stop_reason,
            },
            best,
            history: self.history.clone(),
        })
    }

    /// Run evolution (blocking).
    pub fn run(&mut self) -> Result<EvolutionResult<ValueOf<E>>, EvolutionError> {
        self.run_with_callback(|_| {})
    }
}
