//! Statement-level crossover between genomes.

use crate::error::Result;
use crate::genome::genome::Genome;
use rand::Rng;

/// Structural phase of a crossover. Implementations rearrange whole
/// statements; value-level blending happens elsewhere.
pub trait StructuralCrossover {
    fn crossover<R: Rng>(&self, rng: &mut R, first: &mut Genome, second: &mut Genome)
        -> Result<()>;
}

/// Swaps the tails of both genomes at one shared cut point.
#[derive(Debug, Clone, Copy, Default)]
pub struct SinglePointCrossover;

impl StructuralCrossover for SinglePointCrossover {
    fn crossover<R: Rng>(
        &self,
        rng: &mut R,
        first: &mut Genome,
        second: &mut Genome,
    ) -> Result<()> {
        if first.len() <= 1 || second.len() <= 1 {
            return Ok(());
        }
        let min_len = first.len().min(second.len());
        let cut = rng.gen_range(1..min_len);
        let tail1 = first.split_off(cut);
        let tail2 = second.split_off(cut);
        first.append_tail(tail2);
        second.append_tail(tail1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::statement::Statement;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn genome_of(labels: &[&str]) -> Genome {
        let mut genome = Genome::new();
        for label in labels {
            genome.push(Statement::String(label.to_string()));
        }
        genome
    }

    fn labels(genome: &Genome) -> Vec<String> {
        genome
            .statements()
            .iter()
            .map(|s| match s {
                Statement::String(v) => v.clone(),
                other => panic!("unexpected statement: {:?}", other),
            })
            .collect()
    }

    #[test]
    fn short_genomes_are_left_alone() {
        let crossover = SinglePointCrossover;
        let mut rng = StdRng::seed_from_u64(1);
        let mut first = genome_of(&["a"]);
        let mut second = genome_of(&["b", "c", "d"]);
        crossover
            .crossover(&mut rng, &mut first, &mut second)
            .unwrap();

        assert_eq!(labels(&first), vec!["a"]);
        assert_eq!(labels(&second), vec!["b", "c", "d"]);
        let mut untouched = StdRng::seed_from_u64(1);
        assert_eq!(rng.gen::<u64>(), untouched.gen::<u64>());
    }

    #[test]
    fn two_statement_genomes_swap_their_tails() {
        let crossover = SinglePointCrossover;
        let mut rng = StdRng::seed_from_u64(2);
        let mut first = genome_of(&["a1", "a2"]);
        let mut second = genome_of(&["b1", "b2"]);
        crossover
            .crossover(&mut rng, &mut first, &mut second)
            .unwrap();

        assert_eq!(labels(&first), vec!["a1", "b2"]);
        assert_eq!(labels(&second), vec!["b1", "a2"]);
    }

    #[test]
    fn unequal_lengths_swap_and_conserve_statements() {
        let crossover = SinglePointCrossover;
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut first = genome_of(&["a1", "a2", "a3"]);
            let mut second = genome_of(&["b1", "b2", "b3", "b4", "b5"]);
            crossover
                .crossover(&mut rng, &mut first, &mut second)
                .unwrap();

            assert_eq!(first.len() + second.len(), 8);
            assert_eq!(first.len().min(second.len()), 3);
            assert_eq!(labels(&first)[0], "a1");
            assert_eq!(labels(&second)[0], "b1");
        }
    }
}
