//! Skald JSON - embedded JSON decoder producing Skald values.
//!
//! This crate provides:
//! - A whole-buffer recursive-descent decoder (`decode`, `decode_with`)
//! - Decoder configuration (`DecodeOptions`, `#` line comments opt-in)
//! - A structural error type with line and context (`DecodeError`)
//! - The narrow file facility (`read_bytes`, `decode_file`)
//!
//! The accepted grammar is JSON with the spellings `True`/`False`/`Null`,
//! `NaN` normalized to 0.0, Latin-1 single-byte strings, and optional `#`
//! line comments. There is no encoder.

mod decoder;
mod error;
mod source;

pub use decoder::{decode, decode_with, DecodeOptions};
pub use error::DecodeError;
pub use source::{decode_file, read_bytes};
