//! Skald Value - Universal dynamic value type for the Skald runtime.
//!
//! This crate provides:
//! - The tagged `Value` type and its `Heap<T>` payload wrapper
//! - Coercions between kinds (`to_bool`, `to_int`, `to_float`, `to_text`)
//! - The collection protocol (`size`, `exists`, `get`, `set`, `push`,
//!   `shift`, `join`, `split`, `keys`)
//! - The `CustomValue` extension trait for host-defined kinds
//! - Recoverable error types (`ValueError`, `ValueResult`)
//!
//! # Value Types
//!
//! The value module provides runtime values with enforced Arc usage:
//! - All heap allocations go through `Value::` factory methods
//! - `Heap<T>` wrapper enforces this invariant
//! - Thread-safe reference counting via `Arc`
//!
//! # Aliasing
//!
//! Cloning a composite value aliases its payload. Mutation through one alias
//! is visible through every other; see the `Value` docs for the contract.

mod collections;
mod custom;
mod errors;
mod handles;
mod ops;
mod value;

pub use custom::{CustomValue, Side};
pub use errors::{ValueError, ValueErrorKind, ValueResult};
pub use handles::{FileHandle, ProcessHandle, ThreadHandle};
pub use ops::{BinaryOp, UnaryOp};
pub use value::{Heap, HostFn, ListPayload, MapPayload, Value};

// Re-export error constructors for use by other crates
pub use errors::{
    division_by_zero, empty_collection, index_out_of_range, key_not_found, kind_mismatch,
    modulo_by_zero, not_callable, unimplemented_operation, unsupported_operation,
    unsupported_unary_op,
};
