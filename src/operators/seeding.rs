//! Corpus seeding for string genes.

use crate::config::MutationConfig;
use crate::genome::constant_pool::ConstantPool;
use crate::genome::genome::Genome;
use crate::genome::statement::Statement;
use crate::payload::json;
use crate::payload::{PayloadKind, PayloadMutator};
use rand::Rng;

/// Replaces string genes with harvested seed values. Each string gene is
/// replaced with probability 1/n, where n is the number of string genes in
/// the genome.
#[derive(Debug, Clone, Default)]
pub struct SeedInjector {
    seeds: Vec<String>,
}

impl SeedInjector {
    pub fn new(seeds: Vec<String>) -> Self {
        Self { seeds }
    }

    pub fn inject<R: Rng>(&self, rng: &mut R, genome: &mut Genome) {
        if self.seeds.is_empty() {
            return;
        }
        let count = count_string_genes(genome);
        if count == 0 {
            return;
        }
        let rate = 1.0 / count as f64;
        for statement in genome.statements_mut() {
            if let Statement::String(value) = statement {
                if rng.gen::<f64>() <= rate {
                    *value = self.seeds[rng.gen_range(0..self.seeds.len())].clone();
                }
            }
        }
    }
}

/// Applies structured delta passes to string genes that hold parseable JSON
/// text, leaving other strings alone. Selection works like seed injection:
/// each string gene is considered with probability 1/n.
#[derive(Debug, Clone)]
pub struct PayloadStringFuzzer {
    max_rounds: usize,
}

impl PayloadStringFuzzer {
    pub fn new(max_rounds: usize) -> Self {
        Self {
            max_rounds: max_rounds.max(1),
        }
    }

    pub fn from_config(config: &MutationConfig) -> Self {
        Self::new(config.fuzz_rounds)
    }

    pub fn fuzz<R: Rng>(
        &self,
        rng: &mut R,
        pool: &ConstantPool,
        mutator: &PayloadMutator,
        genome: &mut Genome,
    ) {
        let count = count_string_genes(genome);
        if count == 0 {
            return;
        }
        let rate = 1.0 / count as f64;
        for statement in genome.statements_mut() {
            if let Statement::String(value) = statement {
                if rng.gen::<f64>() <= rate {
                    self.fuzz_value(rng, pool, mutator, value);
                }
            }
        }
    }

    fn fuzz_value<R: Rng>(
        &self,
        rng: &mut R,
        pool: &ConstantPool,
        mutator: &PayloadMutator,
        value: &mut String,
    ) {
        let mut tree = match json::deserialize(value) {
            Ok(tree) => tree,
            Err(_) => return,
        };
        let rounds = rng.gen_range(0..self.max_rounds) + 1;
        for _ in 0..rounds {
            mutator.delta(rng, pool, &mut tree, PayloadKind::Json);
        }
        if let Ok(text) = json::serialize(&tree) {
            *value = text;
        }
    }
}

fn count_string_genes(genome: &Genome) -> usize {
    genome
        .statements()
        .iter()
        .filter(|s| matches!(s, Statement::String(_)))
        .count()
}
