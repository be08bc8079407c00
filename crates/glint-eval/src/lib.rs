//! Value model and evaluator for compiled glint templates.

mod context;
mod error;
mod eval;
mod registry;
mod value;

pub use context::{Context, ExecutionContext, LoopContext};
pub use error::EvalError;
pub use eval::{eval_expr, execute, Flow};
pub use registry::{FilterFn, FilterRegistry, TagRegistry, BUILTIN_TAGS};
pub use value::{FieldAccess, IterEntry, Value, ValueError, ValueMap};
