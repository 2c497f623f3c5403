//! Benchmarks for one generation of the evolution engine.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use genetic_search::{
    EvolutionEngine, EvolutionParams, FunctionMaximum, StringMatch, Termination,
    schema::IntervalConfig,
};

fn params(population_size: usize) -> EvolutionParams {
    EvolutionParams {
        population_size,
        elite_rate: 0.1,
        cross_rate: 0.8,
        mutate_rate: 0.9,
    }
}

fn wave(x: f64) -> f64 {
    x + 10.0 * (5.0 * x).sin() + 7.0 * (4.0 * x).cos()
}

fn bench_function_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("function_generation");

    for size in [256, 1024, 4096, 9000] {
        let evaluator = FunctionMaximum::new(IntervalConfig::default(), wave)
            .expect("valid interval");
        let mut engine = EvolutionEngine::new(
            params(size),
            Termination::Generations {
                num_generations: usize::MAX,
            },
            evaluator,
            Some(42),
        )
        .expect("valid params");
        engine.initialize();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(engine.step().expect("step")));
        });
    }

    group.finish();
}

fn bench_string_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("string_generation");

    for size in [256, 1024, 2048] {
        let evaluator = StringMatch::new("Hello World!").expect("valid target");
        let mut engine = EvolutionEngine::new(
            params(size),
            Termination::Convergence {
                error_criterion: 1e-8,
                max_generations: None,
            },
            evaluator,
            Some(42),
        )
        .expect("valid params");
        engine.initialize();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(engine.step().expect("step")));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_function_generation, bench_string_generation);
criterion_main!(benches);
