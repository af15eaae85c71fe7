//! Adapter for the external regular-expression engine.
//!
//! Patterns, subjects and replacements are values coerced to text. Options
//! travel as a short character string: `i` selects case-insensitive
//! matching and `g` selects all occurrences instead of the first. The
//! grammar-selector characters `j`, `p`, `P`, `a` and `G` are accepted for
//! interface compatibility and ignored; the engine has a single grammar.

use ::regex::{Captures, Regex, RegexBuilder};
use tracing::debug;

use skald_value::{Value, ValueError, ValueResult};

/// Parsed option characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegexOptions {
    /// `i`: case-insensitive matching.
    pub case_insensitive: bool,
    /// `g`: every occurrence instead of the first.
    pub global: bool,
}

impl RegexOptions {
    /// Parse an option string. Unknown characters are an error; the legacy
    /// grammar selectors are ignored with a debug log.
    pub fn parse(opts: &str) -> Result<Self, ValueError> {
        let mut parsed = RegexOptions::default();
        for c in opts.chars() {
            match c {
                'i' => parsed.case_insensitive = true,
                'g' => parsed.global = true,
                'j' | 'p' | 'P' | 'a' | 'G' => {
                    debug!(option = %c, "ignoring regex grammar selector");
                }
                other => {
                    return Err(ValueError::new(format!("unknown regex option `{other}`")));
                }
            }
        }
        Ok(parsed)
    }
}

fn compile(pattern: &str, options: RegexOptions) -> Result<Regex, ValueError> {
    RegexBuilder::new(pattern)
        .case_insensitive(options.case_insensitive)
        .build()
        .map_err(|e| ValueError::new(format!("invalid regex pattern: {e}")))
}

/// Match `pattern` against `text`.
///
/// Without `g`, returns a list of the captured groups of the first match
/// (index 0 is the whole match, unmatched groups are Undefined), or
/// Undefined when the pattern does not match at all. With `g`, returns a
/// list holding one such capture list per match.
pub fn matches(text: &Value, pattern: &Value, opts: &str) -> ValueResult {
    let options = RegexOptions::parse(opts)?;
    let subject = text.to_text()?;
    let re = compile(&pattern.to_text()?, options)?;

    if options.global {
        let hits = re
            .captures_iter(&subject)
            .map(|caps| capture_list(&caps))
            .collect();
        Ok(Value::list(hits))
    } else {
        match re.captures(&subject) {
            Some(caps) => Ok(capture_list(&caps)),
            None => Ok(Value::Undefined),
        }
    }
}

fn capture_list(caps: &Captures<'_>) -> Value {
    let groups = caps
        .iter()
        .map(|group| match group {
            Some(m) => Value::string(m.as_str()),
            None => Value::Undefined,
        })
        .collect();
    Value::list(groups)
}

/// Replace occurrences of `pattern` in `text` with an expanded template.
///
/// The template understands `$n` (capture group n), `$&` (whole match),
/// `` $` `` (text before the match), `$'` (text after the match) and `$$`
/// (a literal dollar). With `g` every occurrence is replaced, otherwise
/// only the first.
pub fn substitute(text: &Value, pattern: &Value, replacement: &Value, opts: &str) -> ValueResult {
    let options = RegexOptions::parse(opts)?;
    let subject = text.to_text()?;
    let template = replacement.to_text()?;
    let re = compile(&pattern.to_text()?, options)?;

    let mut out = String::with_capacity(subject.len());
    let mut last_end = 0;
    for caps in re.captures_iter(&subject) {
        let whole = caps
            .get(0)
            .unwrap_or_else(|| unreachable!("capture 0 always participates"));
        out.push_str(&subject[last_end..whole.start()]);
        expand_template(&template, &caps, &subject, whole.start(), whole.end(), &mut out);
        last_end = whole.end();
        if !options.global {
            break;
        }
    }
    out.push_str(&subject[last_end..]);
    Ok(Value::string(out))
}

fn expand_template(
    template: &str,
    caps: &Captures<'_>,
    subject: &str,
    match_start: usize,
    match_end: usize,
    out: &mut String,
) {
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('$') => {
                chars.next();
                out.push('$');
            }
            Some('&') => {
                chars.next();
                out.push_str(&subject[match_start..match_end]);
            }
            Some('`') => {
                chars.next();
                out.push_str(&subject[..match_start]);
            }
            Some('\'') => {
                chars.next();
                out.push_str(&subject[match_end..]);
            }
            Some(d) if d.is_ascii_digit() => {
                // saturate on absurd digit runs; no group at that index,
                // so the reference expands to nothing
                let mut index = 0usize;
                while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
                    chars.next();
                    index = index
                        .saturating_mul(10)
                        .saturating_add(d as usize - '0' as usize);
                }
                if let Some(group) = caps.get(index) {
                    out.push_str(group.as_str());
                }
            }
            // a lone trailing `$` or `$x` passes through verbatim
            _ => out.push('$'),
        }
    }
}
