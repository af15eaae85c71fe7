//! Recursive-descent JSON decoder over a byte cursor.
//!
//! The input is read one byte at a time as Latin-1: one byte, one codepoint,
//! nothing above 0xFF. Escaped codepoints above 0xFF are rejected for the
//! same reason. The grammar is JSON with three relaxations carried over
//! from the format this decoder is compatible with: the identifiers are
//! spelled `True`, `False` and `Null`; `NaN` (or `nan`) is accepted and
//! decodes to 0.0; and `#` starts a line comment when
//! [`DecodeOptions::allow_comments`] is set.

use rustc_hash::FxHashMap;
use tracing::debug;

use skald_value::Value;

use crate::error::DecodeError;

/// Window of source text attached to a decode error.
const CONTEXT_BYTES: usize = 12;

/// Decoder configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct DecodeOptions {
    /// Accept `#` line comments between tokens.
    pub allow_comments: bool,
}

/// Decode a whole buffer with default options.
pub fn decode(input: &[u8]) -> Result<Value, DecodeError> {
    decode_with(input, DecodeOptions::default())
}

/// Decode a whole buffer.
///
/// The buffer must hold exactly one JSON expression; trailing non-trivia
/// input is an error.
pub fn decode_with(input: &[u8], options: DecodeOptions) -> Result<Value, DecodeError> {
    let mut decoder = Decoder::new(input, options);
    let value = decoder.parse_expr()?;
    decoder.skip_trivia();
    if !decoder.at_eof() {
        return Err(decoder.error("unexpected trailing input"));
    }
    Ok(value)
}

struct Decoder<'a> {
    buf: &'a [u8],
    pos: usize,
    line: u32,
    allow_comments: bool,
}

impl<'a> Decoder<'a> {
    fn new(buf: &'a [u8], options: DecodeOptions) -> Self {
        Decoder {
            buf,
            pos: 0,
            line: 1,
            allow_comments: options.allow_comments,
        }
    }

    // === Cursor ===

    fn at_eof(&self) -> bool {
        self.pos >= self.buf.len()
    }

    fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        if byte == b'\n' {
            self.line += 1;
        }
        Some(byte)
    }

    /// Skip whitespace and, when enabled, `#` line comments.
    fn skip_trivia(&mut self) {
        while let Some(byte) = self.peek() {
            match byte {
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.advance();
                }
                b'#' if self.allow_comments => {
                    while self.peek().is_some_and(|b| b != b'\n') {
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn error(&self, message: impl Into<String>) -> DecodeError {
        let window = self.buf[self.pos..]
            .iter()
            .take(CONTEXT_BYTES)
            .take_while(|&&b| b != b'\n')
            .map(|&b| b as char)
            .collect::<String>();
        DecodeError::new(self.line, message, window)
    }

    // === Grammar ===

    /// One expression, dispatched on lookahead.
    fn parse_expr(&mut self) -> Result<Value, DecodeError> {
        self.skip_trivia();
        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some(b'{') => self.parse_map(),
            Some(b'[') => self.parse_list(),
            Some(b'"') => Ok(Value::string(self.parse_string()?)),
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(b) if b.is_ascii_alphabetic() => self.parse_ident(),
            Some(b) => Err(self.error(format!("unexpected byte `{}`", b as char))),
        }
    }

    fn parse_map(&mut self) -> Result<Value, DecodeError> {
        self.advance(); // {
        let mut entries = FxHashMap::default();
        self.skip_trivia();
        if self.peek() == Some(b'}') {
            self.advance();
            return Ok(Value::map(entries));
        }
        loop {
            self.skip_trivia();
            if self.peek() != Some(b'"') {
                return Err(self.error("expected a string map key"));
            }
            let key = self.parse_string()?;
            self.skip_trivia();
            if self.peek() != Some(b':') {
                return Err(self.error("expected `:` after map key"));
            }
            self.advance();
            let value = self.parse_expr()?;
            entries.insert(key, value); // duplicate keys: last one wins
            self.skip_trivia();
            match self.peek() {
                Some(b',') => {
                    self.advance();
                }
                Some(b'}') => {
                    self.advance();
                    return Ok(Value::map(entries));
                }
                _ => return Err(self.error("expected `,` or `}` in map")),
            }
        }
    }

    fn parse_list(&mut self) -> Result<Value, DecodeError> {
        self.advance(); // [
        let mut items = Vec::new();
        self.skip_trivia();
        if self.peek() == Some(b']') {
            self.advance();
            return Ok(Value::list(items));
        }
        loop {
            items.push(self.parse_expr()?);
            self.skip_trivia();
            match self.peek() {
                Some(b',') => {
                    self.advance();
                }
                Some(b']') => {
                    self.advance();
                    return Ok(Value::list(items));
                }
                _ => return Err(self.error("expected `,` or `]` in list")),
            }
        }
    }

    /// A quoted string. Bytes are Latin-1; `\uXXXX` above 0xFF has no
    /// single-byte representation and is rejected.
    fn parse_string(&mut self) -> Result<String, DecodeError> {
        self.advance(); // "
        let mut out = String::new();
        loop {
            let Some(byte) = self.advance() else {
                return Err(self.error("unterminated string"));
            };
            match byte {
                b'"' => return Ok(out),
                b'\\' => {
                    let Some(escape) = self.advance() else {
                        return Err(self.error("unterminated string"));
                    };
                    match escape {
                        b'b' => out.push('\u{8}'),
                        b'f' => out.push('\u{c}'),
                        b'n' => out.push('\n'),
                        b'r' => out.push('\r'),
                        b't' => out.push('\t'),
                        b'"' => out.push('"'),
                        b'\\' => out.push('\\'),
                        b'/' => out.push('/'),
                        b'u' => out.push(self.parse_unicode_escape()?),
                        other => {
                            return Err(
                                self.error(format!("unknown escape `\\{}`", other as char))
                            );
                        }
                    }
                }
                other => out.push(other as char),
            }
        }
    }

    fn parse_unicode_escape(&mut self) -> Result<char, DecodeError> {
        let mut code: u32 = 0;
        for _ in 0..4 {
            let Some(digit) = self.advance().and_then(|b| (b as char).to_digit(16)) else {
                return Err(self.error("expected four hex digits after `\\u`"));
            };
            code = code * 16 + digit;
        }
        // one byte, one codepoint: nothing above 0xFF is representable
        let Ok(byte) = u8::try_from(code) else {
            return Err(self.error(format!("escape `\\u{code:04X}` is above 0xFF")));
        };
        Ok(byte as char)
    }

    /// `-?digits(.digits)?([eE][+-]?digits)?`. Integer-shaped tokens decode
    /// to Int, everything else to Float.
    fn parse_number(&mut self) -> Result<Value, DecodeError> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.advance();
        }
        if !self.eat_digits() {
            return Err(self.error("expected digits in number"));
        }
        let mut integer_shaped = true;
        if self.peek() == Some(b'.') {
            integer_shaped = false;
            self.advance();
            if !self.eat_digits() {
                return Err(self.error("expected digits after decimal point"));
            }
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            integer_shaped = false;
            self.advance();
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.advance();
            }
            if !self.eat_digits() {
                return Err(self.error("expected digits in exponent"));
            }
        }

        // the token is ASCII by construction
        let text: String = self.buf[start..self.pos].iter().map(|&b| b as char).collect();
        if integer_shaped {
            if let Ok(n) = text.parse::<i64>() {
                return Ok(Value::int(n));
            }
            debug!(token = %text, "integer literal overflows i64, decoding as float");
        }
        text.parse::<f64>()
            .map(Value::float)
            .map_err(|_| self.error(format!("malformed number `{text}`")))
    }

    fn eat_digits(&mut self) -> bool {
        let mut any = false;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.advance();
            any = true;
        }
        any
    }

    /// Bare identifiers: the spellings this format uses for the scalar
    /// constants. `NaN` decodes to 0.0, a deliberate normalization.
    fn parse_ident(&mut self) -> Result<Value, DecodeError> {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
            self.advance();
        }
        let text: String = self.buf[start..self.pos].iter().map(|&b| b as char).collect();
        match text.as_str() {
            "True" => Ok(Value::Bool(true)),
            "False" => Ok(Value::Bool(false)),
            "Null" => Ok(Value::Undefined),
            "NaN" | "nan" => Ok(Value::float(0.0)),
            other => Err(self.error(format!("unknown identifier `{other}`"))),
        }
    }
}

#[cfg(test)]
mod tests;
