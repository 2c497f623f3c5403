//! Genetic search CLI - Run evolutionary searches from JSON configuration.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use genetic_search::{
    compute::evolution::{FitnessEvaluator, ValueOf},
    compute::{EvolutionEngine, EvolutionError, FunctionMaximum, StringMatch},
    schema::{EvolutionConfig, EvolutionParams, EvolutionResult, IntervalConfig, ProblemConfig},
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        usage(&args[0]);
    }

    if args[1] == "--example" {
        match args.get(2).and_then(|kind| example_config(kind)) {
            Some(config) => print_config(&config),
            None => usage(&args[0]),
        }
        return;
    }

    let config_path = PathBuf::from(&args[1]);
    let as_json = args.iter().skip(2).any(|a| a == "--json");

    let config = EvolutionConfig::from_json_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Error loading config: {}", e);
        std::process::exit(1);
    });

    println!("Genetic Search");
    println!("==============");
    println!(
        "Population: {} (elites {}), crossover {}, mutation {}",
        config.population.population_size,
        config.population.elite_size(),
        config.population.cross_rate,
        config.population.mutate_rate
    );
    println!();

    let outcome = match (config.problem.interval(), config.problem.target()) {
        (Some(interval), _) => run_function_maximum(&config, interval, as_json),
        (None, target) => run_string_match(&config, target.unwrap_or_default(), as_json),
    };

    if let Err(e) = outcome {
        eprintln!("Evolution failed: {}", e);
        std::process::exit(1);
    }
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <config.json> [--json]", program);
    eprintln!("       {} --example <function|string>", program);
    eprintln!();
    eprintln!("Run an evolutionary search from JSON configuration.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  config.json  Path to run configuration file");
    eprintln!("  --json       Print the final result as JSON");
    eprintln!("  --example    Print a demo configuration");
    eprintln!();
    eprintln!("FunctionMaximum problems maximize x + 10 sin(5x) + 7 cos(4x).");
    std::process::exit(1);
}

/// Demo objective with many local maxima on [0, 9].
fn wave(x: f64) -> f64 {
    x + 10.0 * (5.0 * x).sin() + 7.0 * (4.0 * x).cos()
}

fn run_function_maximum(
    config: &EvolutionConfig,
    interval: IntervalConfig,
    as_json: bool,
) -> Result<(), EvolutionError> {
    let evaluator = FunctionMaximum::new(interval, wave)?;
    let result = run(config, evaluator, |generation, fitness, x| {
        println!("{} {:.4} {}", generation, fitness, x)
    })?;
    print_summary(&result, as_json);
    Ok(())
}

fn run_string_match(
    config: &EvolutionConfig,
    target: &str,
    as_json: bool,
) -> Result<(), EvolutionError> {
    let evaluator = StringMatch::new(target)?;
    let result = run(config, evaluator, |_generation, fitness, value| {
        println!("{:.2} {}", fitness, value)
    })?;
    print_summary(&result, as_json);
    Ok(())
}

fn run<E, P>(
    config: &EvolutionConfig,
    evaluator: E,
    print: P,
) -> Result<EvolutionResult<ValueOf<E>>, EvolutionError>
where
    E: FitnessEvaluator,
    P: Fn(usize, f64, &ValueOf<E>),
{
    let mut engine = EvolutionEngine::new(
        config.population,
        config.problem.termination(),
        evaluator,
        config.random_seed,
    )?;
    engine.run_with_callback(|report| {
        print(report.generation, report.best_fitness, &report.best_value)
    })
}

fn print_summary<V>(result: &EvolutionResult<V>, as_json: bool)
where
    V: fmt::Debug + Serialize,
{
    if as_json {
        match serde_json::to_string_pretty(result) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error serializing result: {}", e),
        }
        return;
    }

    let stats = &result.stats;
    println!();
    println!("Result:");
    println!("  Best value:   {:?}", result.best.value);
    println!("  Best fitness: {:.6}", result.best.fitness);
    println!("  Chromosome:   {}", result.best.chromosome);
    println!("  Stop reason:  {:?}", stats.stop_reason);
    println!(
        "  Time: {:.2}s, {} generations, {} evaluations ({:.1} evals/s)",
        stats.elapsed_seconds, stats.generations, stats.total_evaluations, stats.evaluations_per_second
    );
}

fn example_config(kind: &str) -> Option<EvolutionConfig> {
    let config = match kind {
        "string" => EvolutionConfig {
            population: EvolutionParams {
                population_size: 2048,
                elite_rate: 0.2,
                cross_rate: 0.5,
                mutate_rate: 0.1,
            },
            problem: ProblemConfig::StringMatch {
                target: "Hello World!".to_string(),
                error_criterion: 1e-8,
                max_generations: None,
            },
            random_seed: None,
        },
        "function" => EvolutionConfig {
            population: EvolutionParams {
                population_size: 9000,
                elite_rate: 0.1,
                cross_rate: 0.8,
                mutate_rate: 0.9,
            },
            problem: ProblemConfig::FunctionMaximum {
                lower_bound: 0.0,
                upper_bound: 9.0,
                precision: 1e-4,
                num_generations: 100,
            },
            random_seed: None,
        },
        _ => return None,
    };
    Some(config)
}

fn print_config(config: &EvolutionConfig) {
    match serde_json::to_string_pretty(config) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing example: {}", e),
    }
}
