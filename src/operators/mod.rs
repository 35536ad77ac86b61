//! Genetic operators over genomes and their value genes.

pub mod hybrid;
pub mod sbx;
pub mod seeding;
pub mod string_mutator;
pub mod structural;

pub use hybrid::HybridCrossover;
pub use sbx::SimulatedBinaryCrossover;
pub use seeding::{PayloadStringFuzzer, SeedInjector};
pub use string_mutator::StringMutator;
pub use structural::{SinglePointCrossover, StructuralCrossover};
