//! Two-phase crossover: structural statement exchange followed by
//! value-level blending of parameters on matching calls.

use std::collections::BTreeMap;

use crate::config::CrossoverConfig;
use crate::error::Result;
use crate::genome::genome::Genome;
use crate::genome::statement::Statement;
use crate::operators::sbx::SimulatedBinaryCrossover;
use crate::operators::structural::StructuralCrossover;
use rand::Rng;

/// Runs the structural phase, then with the configured rate walks calls
/// shared by both genomes and blends their parameter values. Constructors
/// match on signature, methods on declaring type plus signature.
#[derive(Debug, Clone)]
pub struct HybridCrossover<S: StructuralCrossover> {
    structural: S,
    data_rate: f64,
    sbx: SimulatedBinaryCrossover,
}

impl<S: StructuralCrossover> HybridCrossover<S> {
    pub fn new(structural: S, config: &CrossoverConfig) -> Self {
        Self {
            structural,
            data_rate: config.data_crossover_rate,
            sbx: SimulatedBinaryCrossover::from_config(config),
        }
    }

    pub fn crossover<R: Rng>(
        &self,
        rng: &mut R,
        first: &mut Genome,
        second: &mut Genome,
    ) -> Result<()> {
        self.structural.crossover(rng, first, second)?;
        if rng.gen::<f64>() <= self.data_rate {
            self.crossover_data(rng, first, second);
        }
        Ok(())
    }

    /// One matched call per shared signature, constructors first. Signature
    /// maps are sorted, so the walk order does not depend on statement
    /// positions.
    fn crossover_data<R: Rng>(&self, rng: &mut R, first: &mut Genome, second: &mut Genome) {
        let second_ctors = signature_positions(second, constructor_key);
        for (signature, positions1) in signature_positions(first, constructor_key) {
            if let Some(positions2) = second_ctors.get(&signature) {
                let pos1 = positions1[rng.gen_range(0..positions1.len())];
                let pos2 = positions2[rng.gen_range(0..positions2.len())];
                self.crossover_call(rng, first, pos1, second, pos2);
            }
        }

        let second_methods = signature_positions(second, method_key);
        for (signature, positions1) in signature_positions(first, method_key) {
            if let Some(positions2) = second_methods.get(&signature) {
                let pos1 = positions1[rng.gen_range(0..positions1.len())];
                let pos2 = positions2[rng.gen_range(0..positions2.len())];
                self.crossover_call(rng, first, pos1, second, pos2);
            }
        }
    }

    /// Pairs the two calls' parameters by position and blends each pair.
    fn crossover_call<R: Rng>(
        &self,
        rng: &mut R,
        first: &mut Genome,
        pos1: usize,
        second: &mut Genome,
        pos2: usize,
    ) {
        let params1 = match first.statement(pos1) {
            Some(Statement::Constructor(call)) | Some(Statement::Method(call)) => {
                call.parameters.clone()
            }
            _ => return,
        };
        let params2 = match second.statement(pos2) {
            Some(Statement::Constructor(call)) | Some(Statement::Method(call)) => {
                call.parameters.clone()
            }
            _ => return,
        };
        for (r1, r2) in params1.iter().zip(params2.iter()) {
            self.crossover_parameter(rng, first, r1.position(), second, r2.position());
        }
    }

    fn crossover_parameter<R: Rng>(
        &self,
        rng: &mut R,
        first: &mut Genome,
        pos1: usize,
        second: &mut Genome,
        pos2: usize,
    ) {
        if let (Some(stmt1), Some(stmt2)) = (first.statement_mut(pos1), second.statement_mut(pos2))
        {
            match (stmt1, stmt2) {
                (Statement::String(a), Statement::String(b)) => {
                    self.crossover_strings(rng, a, b);
                }
                (Statement::Numeric(a), Statement::Numeric(b)) => {
                    self.sbx.crossover(rng, a, b);
                }
                _ => {
                    log::debug!("skipping data crossover for unsupported parameter pairing");
                }
            }
        }
    }

    /// Splices two strings at independent cut points. When exactly one side
    /// is empty the other is split instead, head to the first gene and tail
    /// to the second.
    fn crossover_strings<R: Rng>(&self, rng: &mut R, first: &mut String, second: &mut String) {
        let len1 = first.chars().count();
        let len2 = second.chars().count();
        match (len1 > 0, len2 > 0) {
            (false, false) => {}
            (true, false) => {
                let cut = rng.gen_range(0..len1);
                let (head, tail) = split_at_pos(first, cut);
                *first = head;
                *second = tail;
            }
            (false, true) => {
                let cut = rng.gen_range(0..len2);
                let (head, tail) = split_at_pos(second, cut);
                *first = head;
                *second = tail;
            }
            (true, true) => {
                let cut1 = rng.gen_range(0..len1);
                let cut2 = rng.gen_range(0..len2);
                splice_at(first, second, cut1, cut2);
            }
        }
    }
}

fn constructor_key(statement: &Statement) -> Option<String> {
    match statement {
        Statement::Constructor(call) => Some(call.signature.clone()),
        _ => None,
    }
}

fn method_key(statement: &Statement) -> Option<String> {
    match statement {
        Statement::Method(call) => Some(format!("{}|{}", call.declaring_type, call.signature)),
        _ => None,
    }
}

/// Positions of every statement the key function accepts, grouped by key.
fn signature_positions(
    genome: &Genome,
    key: fn(&Statement) -> Option<String>,
) -> BTreeMap<String, Vec<usize>> {
    let mut map: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (index, statement) in genome.statements().iter().enumerate() {
        if let Some(signature) = key(statement) {
            map.entry(signature).or_default().push(index);
        }
    }
    map
}

/// Head-swap splice at fixed character positions.
fn splice_at(first: &mut String, second: &mut String, cut1: usize, cut2: usize) {
    let chars1: Vec<char> = first.chars().collect();
    let chars2: Vec<char> = second.chars().collect();
    *first = chars1[..cut1].iter().chain(chars2[cut2..].iter()).collect();
    *second = chars2[..cut2].iter().chain(chars1[cut1..].iter()).collect();
}

fn split_at_pos(source: &str, cut: usize) -> (String, String) {
    let chars: Vec<char> = source.chars().collect();
    (
        chars[..cut].iter().collect(),
        chars[cut..].iter().collect(),
    )
}
