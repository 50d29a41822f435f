pub mod ast;
pub mod context;
pub mod engine;
pub mod error;
pub mod functions;
pub mod parser;
pub mod set;
pub mod value;

pub use ast::{BinaryOperator, Expression, UnaryOperator};
pub use context::{Attributes, Feature, MapFeature};
pub use engine::{EvaluationContext, evaluate};
pub use error::ExprError;
pub use parser::parse_expression;
pub use set::ExpressionSet;
pub use value::Value;
