//! Evaluation module for executing JavaScript AST.
//!
//! A tree-walking interpreter. Statements produce completion records;
//! exceptions propagate as `Err(JErrorType)` and become script values only
//! when a `catch` clause receives them.

pub mod expression;
pub mod function;
pub mod statement;
pub mod types;

pub use types::{Completion, CompletionType, EvalResult, ValueResult};
