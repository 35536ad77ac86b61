use rand::distributions::Alphanumeric;
use rand::Rng;

/// Bound for synthesized numeric literals when a bucket is empty.
const SYNTH_NUMERIC_BOUND: i64 = 2048;
/// Length range for synthesized string literals.
const SYNTH_STRING_MAX_LEN: usize = 8;

/// Corpus of previously observed literals, one bucket per scalar kind.
/// Sampling is uniform over a bucket; an empty bucket synthesizes a fresh
/// in-range value instead.
#[derive(Debug, Clone, Default)]
pub struct ConstantPool {
    bools: Vec<bool>,
    ints: Vec<i32>,
    longs: Vec<i64>,
    floats: Vec<f32>,
    doubles: Vec<f64>,
    strings: Vec<String>,
}

impl ConstantPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_bool(&mut self, value: bool) {
        self.bools.push(value);
    }

    pub fn add_int(&mut self, value: i32) {
        self.ints.push(value);
    }

    pub fn add_long(&mut self, value: i64) {
        self.longs.push(value);
    }

    pub fn add_float(&mut self, value: f32) {
        self.floats.push(value);
    }

    pub fn add_double(&mut self, value: f64) {
        self.doubles.push(value);
    }

    pub fn add_string(&mut self, value: &str) {
        self.strings.push(value.to_string());
    }

    pub fn random_bool<R: Rng>(&self, rng: &mut R) -> bool {
        match choice(&self.bools, rng) {
            Some(v) => *v,
            None => rng.gen(),
        }
    }

    pub fn random_int<R: Rng>(&self, rng: &mut R) -> i32 {
        let bound = SYNTH_NUMERIC_BOUND as i32;
        match choice(&self.ints, rng) {
            Some(v) => *v,
            None => rng.gen_range(-bound..=bound),
        }
    }

    pub fn random_long<R: Rng>(&self, rng: &mut R) -> i64 {
        match choice(&self.longs, rng) {
            Some(v) => *v,
            None => rng.gen_range(-SYNTH_NUMERIC_BOUND..=SYNTH_NUMERIC_BOUND),
        }
    }

    pub fn random_float<R: Rng>(&self, rng: &mut R) -> f32 {
        let bound = SYNTH_NUMERIC_BOUND as f32;
        match choice(&self.floats, rng) {
            Some(v) => *v,
            None => rng.gen_range(-bound..bound),
        }
    }

    pub fn random_double<R: Rng>(&self, rng: &mut R) -> f64 {
        let bound = SYNTH_NUMERIC_BOUND as f64;
        match choice(&self.doubles, rng) {
            Some(v) => *v,
            None => rng.gen_range(-bound..bound),
        }
    }

    pub fn random_string<R: Rng>(&self, rng: &mut R) -> String {
        if let Some(v) = choice(&self.strings, rng) {
            return v.clone();
        }
        let len = rng.gen_range(1..=SYNTH_STRING_MAX_LEN);
        rng.sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }
}

fn choice<'a, T, R: Rng>(bucket: &'a [T], rng: &mut R) -> Option<&'a T> {
    if bucket.is_empty() {
        None
    } else {
        Some(&bucket[rng.gen_range(0..bucket.len())])
    }
}
