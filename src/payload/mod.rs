//! Structured payload trees and the machinery that mutates them.

pub mod attrmap;
pub mod json;
pub mod mutator;
pub mod node;

pub use mutator::PayloadMutator;
pub use node::{Number, PayloadKind, PayloadMap, PayloadNode};
