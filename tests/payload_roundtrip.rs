use evokit::config::MutationConfig;
use evokit::genome::ConstantPool;
use evokit::payload::{attrmap, json, PayloadKind, PayloadMutator, PayloadNode};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn nesting(node: &PayloadNode) -> usize {
    match node {
        PayloadNode::Array(items) => 1 + items.iter().map(nesting).max().unwrap_or(0),
        PayloadNode::Object(map) => 1 + map.values().map(nesting).max().unwrap_or(0),
        _ => 0,
    }
}

fn seeded_pool() -> ConstantPool {
    let mut pool = ConstantPool::new();
    pool.add_bool(true);
    pool.add_int(-3);
    pool.add_long(1_000_000_007);
    pool.add_float(1.5);
    pool.add_double(-2.25);
    pool.add_string("alpha");
    pool.add_string("<tag attr=\"x\"> & friends");
    pool
}

#[test]
fn test_random_json_trees_round_trip() {
    let mutator = PayloadMutator::new(&MutationConfig::default());
    let pool = seeded_pool();
    for seed in 0..100 {
        let mut rng = StdRng::seed_from_u64(seed);
        let tree = mutator.randomize(&mut rng, &pool, PayloadKind::Json);
        let text = json::serialize(&tree).unwrap();
        let back = json::deserialize(&text).unwrap();
        assert_eq!(back, tree, "seed {} failed: {}", seed, text);
    }
}

#[test]
fn test_random_attr_trees_round_trip() {
    let mutator = PayloadMutator::new(&MutationConfig::default());
    let pool = seeded_pool();
    for seed in 0..100 {
        let mut rng = StdRng::seed_from_u64(seed);
        let tree = mutator.randomize(&mut rng, &pool, PayloadKind::AttrMap);
        let text = attrmap::serialize(&tree).unwrap();
        let back = attrmap::deserialize(&text).unwrap();
        assert_eq!(back, tree, "seed {} failed: {}", seed, text);
    }
}

#[test]
fn test_mutated_trees_stay_serializable() {
    let mutator = PayloadMutator::new(&MutationConfig::default());
    let pool = seeded_pool();
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        for kind in [PayloadKind::Json, PayloadKind::AttrMap] {
            let mut tree = mutator.randomize(&mut rng, &pool, kind);
            for _ in 0..10 {
                mutator.delta(&mut rng, &pool, &mut tree, kind);
            }
            let (text, back) = match kind {
                PayloadKind::Json => {
                    let text = json::serialize(&tree).unwrap();
                    (text.clone(), json::deserialize(&text).unwrap())
                }
                PayloadKind::AttrMap => {
                    let text = attrmap::serialize(&tree).unwrap();
                    (text.clone(), attrmap::deserialize(&text).unwrap())
                }
            };
            assert_eq!(back, tree, "seed {} failed: {}", seed, text);
        }
    }
}

#[test]
fn test_depth_bound_limits_nesting() {
    let pool = seeded_pool();
    for max_depth in [0usize, 1, 2] {
        let mutator = PayloadMutator::new(&MutationConfig {
            max_depth,
            ..Default::default()
        });
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            for kind in [PayloadKind::Json, PayloadKind::AttrMap] {
                let tree = mutator.randomize(&mut rng, &pool, kind);
                assert!(
                    nesting(&tree) <= max_depth + 1,
                    "depth bound {} exceeded at seed {}",
                    max_depth,
                    seed
                );
            }
        }
    }
}

#[test]
fn test_hostile_pool_strings_survive_attr_round_trip() {
    let mut pool = ConstantPool::new();
    pool.add_string("a<b>&\"c\"");
    let mutator = PayloadMutator::new(&MutationConfig {
        null_weight: 0.0,
        primitive_weight: 1.0,
        nested_weight: 0.0,
        ..Default::default()
    });
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let tree = mutator.randomize(&mut rng, &pool, PayloadKind::AttrMap);
        let text = attrmap::serialize(&tree).unwrap();
        let back = attrmap::deserialize(&text).unwrap();
        assert_eq!(back, tree, "seed {} failed: {}", seed, text);
    }
}
