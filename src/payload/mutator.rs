//! Recursive mutation over structured payload trees.
//!
//! One engine serves both payload kinds. Containers grow, shrink and change
//! through uniform random entry selection; insertions can redirect one level
//! into an existing compound child, which biases growth toward shallow
//! nesting. Fresh leaves are sampled from the constant pool.

use crate::config::MutationConfig;
use crate::genome::constant_pool::ConstantPool;
use crate::genome::statement::StructuredGene;
use crate::operators::string_mutator::{random_char, StringMutator};
use crate::payload::node::{Number, PayloadKind, PayloadNode};
use rand::Rng;
use rand_distr::StandardNormal;

/// Probability of each independent delta phase.
const PHASE_RATE: f64 = 1.0 / 3.0;

enum InsertChoice {
    NullMarker,
    Primitive,
    EmptyArray,
    EmptyObject,
}

/// Tree mutation engine for structured payload genes.
#[derive(Debug, Clone)]
pub struct PayloadMutator {
    config: MutationConfig,
    strings: StringMutator,
}

impl PayloadMutator {
    pub fn new(config: &MutationConfig) -> Self {
        Self {
            config: config.clone(),
            strings: StringMutator::from_config(config),
        }
    }

    /// Builds a fresh root and populates it with a random number of elements
    /// in `[0, max_elements]`. The JSON kind roots an array with the array
    /// weight, otherwise an object; the attribute-map kind always roots a
    /// map.
    pub fn randomize<R: Rng>(
        &self,
        rng: &mut R,
        pool: &ConstantPool,
        kind: PayloadKind,
    ) -> PayloadNode {
        let mut root = match kind {
            PayloadKind::Json => {
                if rng.gen::<f64>() <= self.config.array_weight {
                    PayloadNode::Array(Vec::new())
                } else {
                    PayloadNode::empty_object()
                }
            }
            PayloadKind::AttrMap => PayloadNode::empty_object(),
        };
        let count = rng.gen_range(0..=self.config.max_elements);
        for _ in 0..count {
            self.insert_element(rng, pool, &mut root, kind);
        }
        root
    }

    /// Inserts one element. With the nested weight the insertion redirects
    /// into a uniformly chosen compound child and adds a primitive leaf
    /// there; otherwise the container itself gains a fresh element chosen by
    /// the weight chain.
    pub fn insert_element<R: Rng>(
        &self,
        rng: &mut R,
        pool: &ConstantPool,
        container: &mut PayloadNode,
        kind: PayloadKind,
    ) {
        if rng.gen::<f64>() <= self.config.nested_weight {
            if let Some(child) = random_compound_child(rng, container) {
                self.insert_leaf(rng, pool, child);
                return;
            }
        }
        self.insert_fresh(rng, pool, container, kind, 0);
    }

    /// Removes one uniformly random entry, with the same nested redirection
    /// as insertion. Finding a candidate is terminal even when the candidate
    /// is empty. No draws happen on an empty container.
    pub fn delete_element<R: Rng>(&self, rng: &mut R, container: &mut PayloadNode) {
        if container.child_count() == 0 {
            return;
        }
        if rng.gen::<f64>() <= self.config.nested_weight {
            if let Some(child) = random_compound_child(rng, container) {
                let count = child.child_count();
                if count > 0 {
                    let index = rng.gen_range(0..count);
                    child.remove_child(index);
                }
                return;
            }
        }
        let index = rng.gen_range(0..container.child_count());
        container.remove_child(index);
    }

    /// Mutates one uniformly random entry: Null values are replaced by a
    /// fresh primitive, object keys may be renamed, and other values mutate
    /// by type. Compound values recurse one level and mutate a primitive
    /// grandchild when the pick lands on one. No draws happen on an empty
    /// container.
    pub fn change_element<R: Rng>(
        &self,
        rng: &mut R,
        pool: &ConstantPool,
        container: &mut PayloadNode,
        kind: PayloadKind,
    ) {
        let count = container.child_count();
        if count == 0 {
            return;
        }
        let index = rng.gen_range(0..count);

        if matches!(container.child_at_mut(index), Some(PayloadNode::Null)) {
            let fresh = self.random_primitive(rng, pool);
            if let Some(slot) = container.child_at_mut(index) {
                *slot = fresh;
            }
            return;
        }

        if let PayloadNode::Object(map) = container {
            if rng.gen::<f64>() <= self.config.rename_weight {
                if let Some((key, value)) = map.shift_remove_index(index) {
                    let new_key = self.strings.mutate_string(rng, &key);
                    map.insert(new_key, value);
                }
                return;
            }
        }

        match container.child_at_mut(index) {
            Some(PayloadNode::Bool(b)) => *b = !*b,
            Some(PayloadNode::Num(number)) => self.change_number(rng, pool, number, kind),
            Some(PayloadNode::Text(text)) => *text = self.strings.mutate_string(rng, text),
            Some(child) if child.is_compound() => self.change_grandchild(rng, pool, child, kind),
            _ => {}
        }
    }

    /// Applies delete, change and insert to the root, each independently
    /// with probability 1/3, in that order. Non-compound roots draw nothing.
    pub fn delta<R: Rng>(
        &self,
        rng: &mut R,
        pool: &ConstantPool,
        tree: &mut PayloadNode,
        kind: PayloadKind,
    ) {
        if !tree.is_compound() {
            return;
        }
        if rng.gen::<f64>() <= PHASE_RATE {
            self.delete_element(rng, tree);
        }
        if rng.gen::<f64>() <= PHASE_RATE {
            self.change_element(rng, pool, tree, kind);
        }
        if rng.gen::<f64>() <= PHASE_RATE {
            self.insert_element(rng, pool, tree, kind);
        }
    }

    /// Smallest useful step for a gene: primitive roots step in place,
    /// container and Null roots take a delta pass. The cached text is
    /// refreshed before returning.
    pub fn increment<R: Rng>(&self, rng: &mut R, pool: &ConstantPool, gene: &mut StructuredGene) {
        let kind = gene.kind();
        let tree = gene.tree_mut();
        if matches!(
            tree,
            PayloadNode::Null | PayloadNode::Array(_) | PayloadNode::Object(_)
        ) {
            self.delta(rng, pool, tree, kind);
        } else {
            match tree {
                PayloadNode::Bool(b) => *b = !*b,
                PayloadNode::Num(Number::Int(i)) => *i = i.wrapping_add(1),
                PayloadNode::Num(Number::Float(f)) => *f += 1.0,
                PayloadNode::Text(s) => {
                    let mut chars: Vec<char> = s.chars().collect();
                    if chars.is_empty() {
                        chars.push(random_char(rng));
                    } else {
                        let position = rng.gen_range(0..chars.len());
                        chars[position] = random_char(rng);
                    }
                    *s = chars.into_iter().collect();
                }
                _ => {}
            }
        }
        gene.refresh_text();
    }

    /// Mutates a gene until its tree differs from the starting snapshot or
    /// the retry limit runs out. Each attempt rebuilds the whole tree with
    /// the perturbation weight, otherwise applies a delta pass. Returns
    /// whether the tree changed; an unchanged result is an accepted outcome.
    pub fn mutate<R: Rng>(
        &self,
        rng: &mut R,
        pool: &ConstantPool,
        gene: &mut StructuredGene,
    ) -> bool {
        let snapshot = gene.tree().clone();
        let kind = gene.kind();
        let mut attempts = 0;
        while gene.tree() == &snapshot && attempts < self.config.retry_limit {
            if rng.gen::<f64>() <= self.config.perturbation_rate {
                *gene.tree_mut() = self.randomize(rng, pool, kind);
            } else {
                self.delta(rng, pool, gene.tree_mut(), kind);
            }
            attempts += 1;
        }
        gene.refresh_text();
        gene.tree() != &snapshot
    }

    fn insert_fresh<R: Rng>(
        &self,
        rng: &mut R,
        pool: &ConstantPool,
        container: &mut PayloadNode,
        kind: PayloadKind,
        depth: usize,
    ) {
        let choice = self.choose_insert(rng, kind);
        match container {
            PayloadNode::Object(map) => {
                let key = pool.random_string(rng);
                let value = self.materialize(rng, pool, choice, depth);
                map.insert(key, value);
            }
            PayloadNode::Array(items) => {
                let value = self.materialize(rng, pool, choice, depth);
                items.push(value);
            }
            _ => {}
        }
    }

    /// Weight chain deciding what an insertion produces. Each step draws its
    /// own trial; the array step only exists for the JSON kind.
    fn choose_insert<R: Rng>(&self, rng: &mut R, kind: PayloadKind) -> InsertChoice {
        if rng.gen::<f64>() <= self.config.null_weight {
            InsertChoice::NullMarker
        } else if rng.gen::<f64>() <= self.config.primitive_weight {
            InsertChoice::Primitive
        } else if kind == PayloadKind::Json && rng.gen::<f64>() <= self.config.array_weight {
            InsertChoice::EmptyArray
        } else {
            InsertChoice::EmptyObject
        }
    }

    /// Builds the chosen element. At the depth bound compound choices fall
    /// back to a primitive so nesting stays bounded.
    fn materialize<R: Rng>(
        &self,
        rng: &mut R,
        pool: &ConstantPool,
        choice: InsertChoice,
        depth: usize,
    ) -> PayloadNode {
        match choice {
            InsertChoice::NullMarker => PayloadNode::Null,
            InsertChoice::Primitive => self.random_primitive(rng, pool),
            InsertChoice::EmptyArray => {
                if depth < self.config.max_depth {
                    PayloadNode::Array(Vec::new())
                } else {
                    self.random_primitive(rng, pool)
                }
            }
            InsertChoice::EmptyObject => {
                if depth < self.config.max_depth {
                    PayloadNode::empty_object()
                } else {
                    self.random_primitive(rng, pool)
                }
            }
        }
    }

    /// Primitive leaf added by a nested redirection. Objects draw their key
    /// before the value.
    fn insert_leaf<R: Rng>(&self, rng: &mut R, pool: &ConstantPool, container: &mut PayloadNode) {
        match container {
            PayloadNode::Object(map) => {
                let key = pool.random_string(rng);
                let value = self.random_primitive(rng, pool);
                map.insert(key, value);
            }
            PayloadNode::Array(items) => {
                let value = self.random_primitive(rng, pool);
                items.push(value);
            }
            _ => {}
        }
    }

    /// One uniform draw over six equal bands: bool, int, long, double,
    /// float, string. Values come from the pool's matching bucket.
    fn random_primitive<R: Rng>(&self, rng: &mut R, pool: &ConstantPool) -> PayloadNode {
        let p: f64 = rng.gen();
        if p <= 1.0 / 6.0 {
            PayloadNode::Bool(pool.random_bool(rng))
        } else if p <= 2.0 / 6.0 {
            PayloadNode::Num(Number::Int(pool.random_int(rng) as i64))
        } else if p <= 3.0 / 6.0 {
            PayloadNode::Num(Number::Int(pool.random_long(rng)))
        } else if p <= 4.0 / 6.0 {
            PayloadNode::Num(Number::Float(pool.random_double(rng)))
        } else if p <= 5.0 / 6.0 {
            PayloadNode::Num(Number::Float(pool.random_float(rng) as f64))
        } else {
            PayloadNode::Text(pool.random_string(rng))
        }
    }

    fn change_number<R: Rng>(
        &self,
        rng: &mut R,
        pool: &ConstantPool,
        number: &mut Number,
        kind: PayloadKind,
    ) {
        match kind {
            // Full replacement with a pool literal of the same subtype.
            PayloadKind::Json => {
                *number = match number {
                    Number::Int(_) => Number::Int(pool.random_long(rng)),
                    Number::Float(_) => Number::Float(pool.random_double(rng)),
                };
            }
            // Whole-unit Gaussian step scaled by the configured delta.
            PayloadKind::AttrMap => {
                let g: f64 = rng.sample(StandardNormal);
                let delta = (g * self.config.max_delta).floor();
                match number {
                    Number::Int(i) => *i = i.wrapping_add(delta as i64),
                    Number::Float(f) => *f += delta,
                }
            }
        }
    }

    fn change_grandchild<R: Rng>(
        &self,
        rng: &mut R,
        pool: &ConstantPool,
        child: &mut PayloadNode,
        kind: PayloadKind,
    ) {
        let count = child.child_count();
        if count == 0 {
            return;
        }
        let index = rng.gen_range(0..count);
        match child.child_at_mut(index) {
            Some(PayloadNode::Bool(b)) => *b = !*b,
            Some(PayloadNode::Num(number)) => self.change_number(rng, pool, number, kind),
            Some(PayloadNode::Text(text)) => *text = self.strings.mutate_string(rng, text),
            // Null and compound grandchildren stay as they are.
            _ => {}
        }
    }
}

/// Uniform pick among direct compound children. No draw when none exist.
fn random_compound_child<'a, R: Rng>(
    rng: &mut R,
    container: &'a mut PayloadNode,
) -> Option<&'a mut PayloadNode> {
    let candidates = container.compound_child_indices();
    if candidates.is_empty() {
        return None;
    }
    let pick = candidates[rng.gen_range(0..candidates.len())];
    container.child_at_mut(pick)
}
