//! Skald Eval - operator dispatch for Skald values.
//!
//! This crate provides:
//! - Binary operator dispatch with coercion and promotion (`evaluate_binary`)
//! - Compound assignment (`evaluate_compound`)
//! - Unary operator dispatch (`evaluate_unary`)
//! - The external regular-expression adapter (`regex`)
//!
//! Dispatch is dynamic: no operation looks at static type information, every
//! kind question is answered at the moment the operator executes.

mod operators;
pub mod regex;
mod unary_operators;


pub use operators::{evaluate_binary, evaluate_compound};
pub use unary_operators::evaluate_unary;

// Re-export the value vocabulary so engine callers need a single import.
pub use skald_value::{BinaryOp, Side, UnaryOp, Value, ValueError, ValueErrorKind, ValueResult};
