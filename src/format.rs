//! Cell formatting.
//!
//! Decides whether one cell needs quoting for a given delimiter and applies
//! it. A cell is quoted only when it contains the delimiter, a quote, `\n` or
//! `\r`; embedded quotes are then doubled. Nothing is trimmed here, trimming
//! belongs to the tokenizer.
//!
//! ```rust
//! use serde_dsv::{format::format_cell, Delimiter, Value};
//!
//! assert_eq!(format_cell(&Value::from("plain"), Delimiter::COMMA), "plain");
//! assert_eq!(format_cell(&Value::from("a,b"), Delimiter::COMMA), "\"a,b\"");
//! assert_eq!(format_cell(&Value::from("a,b"), Delimiter::PIPE), "a,b");
//! assert_eq!(format_cell(&Value::from("say \"hi\""), Delimiter::PIPE), "\"say \"\"hi\"\"\"");
//! assert_eq!(format_cell(&Value::Null, Delimiter::COMMA), "");
//! ```

use crate::{Delimiter, Value};
use std::borrow::Cow;

const QUOTE: char = '"';

/// Returns `true` if `s` must be quoted to survive tokenizing with `delimiter`.
#[inline]
#[must_use]
pub fn needs_quotes(s: &str, delimiter: Delimiter) -> bool {
    let delimiter = delimiter.as_char();
    s.contains(|c: char| c == delimiter || c == QUOTE || c == '\n' || c == '\r')
}

/// Appends `s` to `output` as one cell, quoting and escaping when needed.
pub fn write_cell(output: &mut String, s: &str, delimiter: Delimiter) {
    if needs_quotes(s, delimiter) {
        output.reserve(s.len() + 2);
        output.push(QUOTE);
        for ch in s.chars() {
            if ch == QUOTE {
                output.push(QUOTE);
            }
            output.push(ch);
        }
        output.push(QUOTE);
    } else {
        output.push_str(s);
    }
}

/// Formats text as one cell, borrowing when no quoting is needed.
#[must_use]
pub fn format_text(s: &str, delimiter: Delimiter) -> Cow<'_, str> {
    if needs_quotes(s, delimiter) {
        let mut output = String::with_capacity(s.len() + 2);
        write_cell(&mut output, s, delimiter);
        Cow::Owned(output)
    } else {
        Cow::Borrowed(s)
    }
}

/// Formats a value as one cell. Null becomes an empty, unquoted cell.
#[must_use]
pub fn format_cell(value: &Value, delimiter: Delimiter) -> String {
    match value.to_text() {
        Some(text) => format_text(&text, delimiter).into_owned(),
        None => String::new(),
    }
}
