//! Decode error type.

use std::fmt;

/// A structural violation found while decoding.
///
/// Carries the 1-based line number where decoding stopped and a short
/// window of the surrounding source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeError {
    /// 1-based line number where the error was detected.
    pub line: u32,
    /// What went wrong.
    pub message: String,
    /// A short window of source text at the error position. Empty at end
    /// of input.
    pub context: String,
}

impl DecodeError {
    pub(crate) fn new(line: u32, message: impl Into<String>, context: impl Into<String>) -> Self {
        DecodeError {
            line,
            message: message.into(),
            context: context.into(),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error at line {}: {}", self.line, self.message)?;
        if !self.context.is_empty() {
            write!(f, " near \"{}\"", self.context)?;
        }
        Ok(())
    }
}

impl std::error::Error for DecodeError {}
