//! Elitist selection, single-point crossover and single-point mutation.
//!
//! Each operator reads the current generation and writes the non-elite or
//! elite slots of the next one. Slots `[0, elite_size)` of `next` belong to
//! selection and are never touched by crossover or mutation.

use super::fitness::{EvaluationError, FitnessEvaluator, SymbolOf};
use super::genome::{Chromosome, EvolutionRng, Symbol};
use super::population::GenerationPair;
use super::representation::Representation;

/// Fitness of one generation, ordered best first.
#[derive(Debug, Clone)]
pub struct Ranking {
    order: Vec<usize>,
    fitness: Vec<f64>,
}

impl Ranking {
    /// Evaluate and rank `population`.
    ///
    /// Sorting is stable, so equal fitness keeps positional order.
    pub fn rank<E: FitnessEvaluator>(
        evaluator: &E,
        population: &[Chromosome<SymbolOf<E>>],
    ) -> Result<Self, EvaluationError> {
        let fitness = population
            .iter()
            .map(|c| evaluator.fitness(c))
            .collect::<Result<Vec<_>, _>>()?;

        let direction = evaluator.direction();
        let mut order: Vec<usize> = (0..population.len()).collect();
        order.sort_by(|&a, &b| direction.rank(fitness[a], fitness[b]));

        Ok(Self { order, fitness })
    }

    /// Population indices, best first.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Fitness by population index.
    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    /// Index of the best individual.
    pub fn best_index(&self) -> Option<usize> {
        self.order.first().copied()
    }

    /// Fitness of the best individual.
    pub fn best_fitness(&self) -> Option<f64> {
        self.best_index().map(|i| self.fitness[i])
    }

    /// Mean fitness of the generation.
    pub fn mean_fitness(&self) -> f64 {
        if self.fitness.is_empty() {
            0.0
        } else {
            self.fitness.iter().sum::<f64>() / self.fitness.len() as f64
        }
    }
}

/// Rank `current` and copy its `elite_size` best chromosomes into the
/// leading slots of `next`.
pub fn select_elites<E: FitnessEvaluator>(
    evaluator: &E,
    pair: &mut GenerationPair<SymbolOf<E>>,
    elite_size: usize,
) -> Result<Ranking, EvaluationError> {
    let ranking = Ranking::rank(evaluator, pair.current())?;
    let (current, next) = pair.split_mut();
    for (slot, &index) in ranking.order.iter().take(elite_size).enumerate() {
        next[slot].clone_from(&current[index]);
    }
    Ok(ranking)
}

/// Single-point crossover into every non-elite slot of `next`.
///
/// Each slot fires independently with probability `rate`. A slot whose
/// trial does not fire keeps whatever it held from two generations back.
pub fn crossover<S: Symbol>(
    pair: &mut GenerationPair<S>,
    elite_size: usize,
    rate: f64,
    rng: &mut EvolutionRng,
) {
    let (current, next) = pair.split_mut();
    let size = current.len();
    for slot in next.iter_mut().skip(elite_size) {
        if rng.trial(rate) {
            let left = &current[rng.index(size)];
            let right = &current[rng.index(size)];
            let pos = rng.index(left.len());
            *slot = Chromosome::splice(left, right, pos);
        }
    }
}

/// Single-point mutation of every non-elite slot of `next`.
///
/// Each slot fires independently with probability `rate`; the symbol at a
/// uniformly chosen position is replaced via the representation.
pub fn mutate<R: Representation>(
    repr: &R,
    pair: &mut GenerationPair<R::Symbol>,
    elite_size: usize,
    rate: f64,
    rng: &mut EvolutionRng,
) {
    for slot in pair.next_mut().iter_mut().skip(elite_size) {
        if rng.trial(rate) {
            let pos = rng.index(slot.len());
            if let Some(current) = slot.get(pos) {
                let replacement = repr.mutate_symbol(current, rng);
                slot.set(pos, replacement);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::evolution::fitness::StringMatch;
    use crate::compute::evolution::representation::BinaryInterval;
    use crate::schema::IntervalConfig;

    fn chromosomes(words: &[&str]) -> Vec<Chromosome<char>> {
        words.iter().map(|w| w.chars().collect()).collect()
    }

    fn string_pair(current: &[&str], next: &[&str]) -> GenerationPair<char> {
        GenerationPair::from_buffers(chromosomes(current), chromosomes(next))
    }

    #[test]
    fn test_ranking_minimizes() {
        let eval = StringMatch::new("cat").unwrap();
        let population = chromosomes(&["dog", "cat", "cas", "bat"]);
        let ranking = Ranking::rank(&eval, &population).unwrap();

        assert_eq!(ranking.best_index(), Some(1));
        assert_eq!(ranking.best_fitness(), Some(0.0));
        assert_eq!(&ranking.order()[1..], &[2, 3, 0]);
    }

    #[test]
    fn test_ranking_ties_keep_position() {
        let eval = StringMatch::new("aaa").unwrap();
        let population = chromosomes(&["aab", "aba", "baa", "aaa"]);
        let ranking = Ranking::rank(&eval, &population).unwrap();
        assert_eq!(ranking.order(), &[3, 0, 1, 2]);
    }

    #[test]
    fn test_select_copies_elites() {
        let eval = StringMatch::new("cat").unwrap();
        let mut pair = string_pair(
            &["dog", "cat", "cas", "bat"],
            &["zzz", "yyy", "xxx", "www"],
        );

        select_elites(&eval, &mut pair, 2).unwrap();
        assert_eq!(pair.next(), chromosomes(&["cat", "cas", "xxx", "www"]).as_slice());
        // Selection never reorders the generation it reads.
        assert_eq!(pair.current(), chromosomes(&["dog", "cat", "cas", "bat"]).as_slice());
    }

    #[test]
    fn test_select_zero_elites_is_noop() {
        let eval = StringMatch::new("cat").unwrap();
        let mut pair = string_pair(&["dog", "cat"], &["zzz", "yyy"]);
        select_elites(&eval, &mut pair, 0).unwrap();
        assert_eq!(pair.next(), chromosomes(&["zzz", "yyy"]).as_slice());
    }

    #[test]
    fn test_zero_rates_leave_next_untouched() {
        let eval = StringMatch::new("cat").unwrap();
        let mut rng = EvolutionRng::new(9);
        let mut pair = string_pair(
            &["dog", "cat", "cas", "bat"],
            &["zzz", "yyy", "xxx", "www"],
        );

        select_elites(&eval, &mut pair, 1).unwrap();
        crossover(&mut pair, 1, 0.0, &mut rng);
        mutate(eval.representation(), &mut pair, 1, 0.0, &mut rng);

        // Failed trials keep the stale values rather than copying from current.
        assert_eq!(pair.next(), chromosomes(&["cat", "yyy", "xxx", "www"]).as_slice());
    }

    #[test]
    fn test_crossover_splices_parents() {
        let mut rng = EvolutionRng::new(21);
        let mut pair = string_pair(
            &["aaaaaaaa", "bbbbbbbb"],
            &["zzzzzzzz", "zzzzzzzz"],
        );

        for _ in 0..50 {
            crossover(&mut pair, 0, 1.0, &mut rng);
            for child in pair.next() {
                let genes = child.genes();
                assert!(genes.iter().all(|&c| c == 'a' || c == 'b'));
                let switches = genes.windows(2).filter(|w| w[0] != w[1]).count();
                assert!(switches <= 1, "not a single-point splice: {child}");
            }
        }
    }

    #[test]
    fn test_crossover_spares_elites() {
        let mut rng = EvolutionRng::new(4);
        let mut pair = string_pair(&["aaaa", "bbbb", "cccc"], &["eeee", "ffff", "gggg"]);

        crossover(&mut pair, 2, 1.0, &mut rng);
        assert_eq!(&pair.next()[..2], chromosomes(&["eeee", "ffff"]).as_slice());
        assert_ne!(pair.next()[2].to_string(), "gggg");
    }

    #[test]
    fn test_mutation_flips_one_bit() {
        let repr = BinaryInterval::new(IntervalConfig::default()).unwrap();
        let mut rng = EvolutionRng::new(13);
        let zeros = Chromosome::new(vec![false; repr.chromosome_len()]);
        let mut pair = GenerationPair::from_buffers(vec![zeros.clone(); 6], vec![zeros; 6]);

        mutate(&repr, &mut pair, 2, 1.0, &mut rng);

        for (slot, c) in pair.next().iter().enumerate() {
            let ones = c.genes().iter().filter(|&&b| b).count();
            assert_eq!(ones, if slot < 2 { 0 } else { 1 });
            assert_eq!(c.len(), repr.chromosome_len());
        }
    }

    #[test]
    fn test_string_mutation_uses_alphabet() {
        let eval = StringMatch::new("abcdef").unwrap();
        let repr = eval.representation();
        let mut rng = EvolutionRng::new(17);
        let mut pair = string_pair(&["abcdef"; 4], &["abcdef"; 4]);

        for _ in 0..20 {
            mutate(repr, &mut pair, 0, 1.0, &mut rng);
        }
        for c in pair.next() {
            assert_eq!(c.len(), 6);
            assert!(c.genes().iter().all(|s| repr.alphabet().contains(s)));
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn test_operators_preserve_shape(
                seed in any::<u64>(),
                size in 1usize..24,
                elite_rate in 0.0f64..=1.0,
                cross_rate in 0.0f64..=1.0,
                mutate_rate in 0.0f64..=1.0,
            ) {
                let eval = StringMatch::new("shape").unwrap();
                let repr = eval.representation();
                let mut rng = EvolutionRng::new(seed);
                let mut pair = GenerationPair::random(repr, size, &mut rng);
                let elite_size = ((size as f64 * elite_rate).floor() as usize).min(size);

                for _ in 0..3 {
                    let ranking = select_elites(&eval, &mut pair, elite_size).unwrap();
                    let elites: Vec<_> = ranking
                        .order()
                        .iter()
                        .take(elite_size)
                        .map(|&i| pair.current()[i].clone())
                        .collect();

                    crossover(&mut pair, elite_size, cross_rate, &mut rng);
                    mutate(repr, &mut pair, elite_size, mutate_rate, &mut rng);

                    prop_assert_eq!(&pair.next()[..elite_size], elites.as_slice());
                    pair.swap();
                }

                prop_assert_eq!(pair.len(), size);
                for c in pair.current().iter().chain(pair.next()) {
                    prop_assert_eq!(c.len(), 5);
                    prop_assert!(c.genes().iter().all(|s| repr.alphabet().contains(s)));
                }
            }

            #[test]
            fn test_binary_mutation_changes_at_most_one_bit(seed in any::<u64>()) {
                let repr = BinaryInterval::new(IntervalConfig::default()).unwrap();
                let mut rng = EvolutionRng::new(seed);
                let mut pair = GenerationPair::random(&repr, 8, &mut rng);
                let before = pair.next().to_vec();

                mutate(&repr, &mut pair, 0, 0.5, &mut rng);

                for (old, new) in before.iter().zip(pair.next()) {
                    let flipped = old
                        .genes()
                        .iter()
                        .zip(new.genes())
                        .filter(|(a, b)| a != b)
                        .count();
                    prop_assert!(flipped <= 1);
                }
            }
        }
    }
}
