//! Simulated binary crossover for numeric genes.

use crate::config::CrossoverConfig;
use crate::genome::statement::NumericGene;
use rand::Rng;

/// Distribution index. Larger values keep offspring closer to the parents.
const ETA: f64 = 2.5;

/// Blends two numeric genes of the same subtype, clamping results to a
/// symmetric bound. Mismatched subtypes are left untouched.
#[derive(Debug, Clone)]
pub struct SimulatedBinaryCrossover {
    value_bound: f64,
}

impl SimulatedBinaryCrossover {
    pub fn new(value_bound: f64) -> Self {
        Self { value_bound }
    }

    pub fn from_config(config: &CrossoverConfig) -> Self {
        Self::new(config.value_bound)
    }

    pub fn crossover<R: Rng>(&self, rng: &mut R, first: &mut NumericGene, second: &mut NumericGene) {
        match (first, second) {
            (NumericGene::Int(a), NumericGene::Int(b)) => {
                let new1 = self.blend(rng, *a as f64, *b as f64);
                let new2 = self.blend(rng, *b as f64, *a as f64);
                *a = new1 as i32;
                *b = new2 as i32;
            }
            (NumericGene::Long(a), NumericGene::Long(b)) => {
                let new1 = self.blend(rng, *a as f64, *b as f64);
                let new2 = self.blend(rng, *b as f64, *a as f64);
                *a = new1 as i64;
                *b = new2 as i64;
            }
            (NumericGene::Short(a), NumericGene::Short(b)) => {
                let new1 = self.blend(rng, *a as f64, *b as f64);
                let new2 = self.blend(rng, *b as f64, *a as f64);
                *a = new1 as i16;
                *b = new2 as i16;
            }
            (NumericGene::Float(a), NumericGene::Float(b)) => {
                let new1 = self.blend(rng, *a as f64, *b as f64);
                let new2 = self.blend(rng, *b as f64, *a as f64);
                *a = new1 as f32;
                *b = new2 as f32;
            }
            (NumericGene::Double(a), NumericGene::Double(b)) => {
                let new1 = self.blend(rng, *a, *b);
                let new2 = self.blend(rng, *b, *a);
                *a = new1;
                *b = new2;
            }
            _ => {
                log::debug!("skipping numeric crossover between mismatched subtypes");
            }
        }
    }

    /// One offspring value. The spread factor contracts for small draws and
    /// expands for large ones; at exactly one half it is neutral.
    fn blend<R: Rng>(&self, rng: &mut R, v1: f64, v2: f64) -> f64 {
        let u: f64 = rng.gen();
        let beta = if u < 0.5 {
            (2.0 * u).powf(1.0 / (ETA + 1.0))
        } else if u > 0.5 {
            (0.5 / (1.0 - u)).powf(1.0 / (ETA + 1.0))
        } else {
            1.0
        };
        let mid = (v1 - v2) * 0.5;
        let spread = beta * 0.5 * (v1 - v2).abs();
        let value = if rng.gen::<bool>() {
            mid - spread
        } else {
            mid + spread
        };
        value.clamp(-self.value_bound, self.value_bound)
    }
}
