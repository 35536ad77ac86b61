pub mod constant_pool;
pub mod genome;
pub mod statement;

pub use constant_pool::ConstantPool;
pub use genome::Genome;
pub use statement::{CallStatement, NumericGene, ParamRef, Statement, StructuredGene};
