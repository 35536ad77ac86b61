pub mod traits;
pub mod crossover;
pub mod mutation;
pub mod manager;

pub use manager::{AppConfig, ConfigManager};
pub use crossover::CrossoverConfig;
pub use mutation::MutationConfig;
