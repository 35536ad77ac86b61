use crate::config::MutationConfig;
use rand::Rng;

/// Probability of each independent edit phase.
const PHASE_RATE: f64 = 1.0 / 3.0;

/// Printable ASCII, the character alphabet for random edits.
pub(crate) fn random_char<R: Rng>(rng: &mut R) -> char {
    rng.gen_range(32u8..127) as char
}

/// Character-level string mutation. One pass applies, independently with
/// probability 1/3 each: a deletion, a replacement, then an insertion run at
/// a single position. All positions are character positions, so multi-byte
/// text never gets split mid-sequence.
#[derive(Debug, Clone)]
pub struct StringMutator {
    max_length: usize,
}

impl StringMutator {
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }

    pub fn from_config(config: &MutationConfig) -> Self {
        Self::new(config.max_string_length)
    }

    pub fn mutate_string<R: Rng>(&self, rng: &mut R, input: &str) -> String {
        let mut chars: Vec<char> = input.chars().collect();

        // Delete
        if rng.gen::<f64>() <= PHASE_RATE && !chars.is_empty() {
            let position = rng.gen_range(0..chars.len());
            chars.remove(position);
        }

        // Change
        if rng.gen::<f64>() <= PHASE_RATE && !chars.is_empty() {
            let position = rng.gen_range(0..chars.len());
            chars[position] = random_char(rng);
        }

        // Insert: geometric run at one position, halving odds per character.
        if rng.gen::<f64>() <= PHASE_RATE {
            let position = if chars.is_empty() {
                0
            } else {
                rng.gen_range(0..chars.len())
            };
            let mut count = 1;
            while rng.gen::<f64>() <= 0.5f64.powi(count) && chars.len() < self.max_length {
                chars.insert(position, random_char(rng));
                count += 1;
            }
        }

        chars.into_iter().collect()
    }
}
