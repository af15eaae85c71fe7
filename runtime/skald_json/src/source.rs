//! Narrow file facility.
//!
//! The decoder only ever sees an in-memory byte range, so reading a file is
//! a whole-buffer read followed by a normal decode.

use std::io;
use std::path::Path;

use tracing::debug;

use skald_value::Value;

use crate::decoder::{decode_with, DecodeOptions};
use crate::error::DecodeError;

/// Read a whole file into memory.
pub fn read_bytes(path: impl AsRef<Path>) -> io::Result<Vec<u8>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    debug!(path = %path.display(), len = bytes.len(), "read source file");
    Ok(bytes)
}

/// Read and decode a file in one step.
///
/// An I/O failure surfaces as a decode error at line 0.
pub fn decode_file(path: impl AsRef<Path>, options: DecodeOptions) -> Result<Value, DecodeError> {
    let path = path.as_ref();
    let bytes = read_bytes(path)
        .map_err(|e| DecodeError::new(0, format!("cannot read {}: {e}", path.display()), ""))?;
    decode_with(&bytes, options)
}
