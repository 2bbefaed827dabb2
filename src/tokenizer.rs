//! Delimited-text tokenizer.
//!
//! Splits text into a [`Grid`] of rows of fields in a single left-to-right
//! pass. The scan tracks one bit of state (inside or outside quotes) plus the
//! field and row being accumulated:
//!
//! - **Outside quotes**: the delimiter ends a field, `\n`, `\r` or `\r\n` end
//!   a row, and `"` opens a quoted section
//! - **Inside quotes**: `""` is a literal quote, a lone `"` closes the
//!   section, and everything else (delimiters and line breaks included) is
//!   field content
//!
//! Unquoted fields are trimmed of ASCII whitespace; quoted content is kept as
//! written. Rows whose fields are all blank are dropped, which suppresses
//! empty lines. The tokenizer accepts any text: an unterminated quote consumes
//! the rest of the input, and the row it left open is discarded.
//!
//! ```rust
//! use serde_dsv::{tokenizer::tokenize, Delimiter};
//!
//! let grid = tokenize("a,\"b, c\"\n\n1,\"say \"\"hi\"\"\"", Delimiter::COMMA);
//! assert_eq!(grid, vec![vec!["a", "b, c"], vec!["1", "say \"hi\""]]);
//! ```
//!
//! An opening quote discards whatever the field held before it, so
//! `ab"cd"` reads as `cd`.

use crate::Delimiter;
use std::iter::Peekable;

const QUOTE: char = '"';

/// An ordered sequence of fields.
pub type Row = Vec<String>;

/// An ordered sequence of rows. Rows may differ in length.
pub type Grid = Vec<Row>;

/// Splits `text` into rows of fields separated by `delimiter`.
#[must_use]
pub fn tokenize(text: &str, delimiter: Delimiter) -> Grid {
    let _span = tracing::trace_span!("tokenize", len = text.len()).entered();
    let grid = Tokenizer::new(delimiter).run(text);
    tracing::debug!(rows = grid.len(), "tokenized delimited text");
    grid
}

#[inline]
fn is_blank(field: &str) -> bool {
    field.trim_matches(|c: char| c.is_ascii_whitespace()).is_empty()
}

struct Tokenizer {
    delimiter: char,
    in_quotes: bool,
    field: String,
    // Byte length of `field` when its quoted section closed. Content up to
    // here is kept verbatim; anything after it is unquoted tail.
    quoted_end: Option<usize>,
    row: Row,
    rows: Grid,
}

impl Tokenizer {
    fn new(delimiter: Delimiter) -> Self {
        Tokenizer {
            delimiter: delimiter.as_char(),
            in_quotes: false,
            field: String::new(),
            quoted_end: None,
            row: Vec::new(),
            rows: Vec::new(),
        }
    }

    fn run(mut self, text: &str) -> Grid {
        let data = text.trim_matches(|c: char| c.is_ascii_whitespace());
        if data.is_empty() {
            return self.rows;
        }

        // The trailing newline flushes the last field and row.
        let mut chars = data.chars().chain(std::iter::once('\n')).peekable();
        while let Some(ch) = chars.next() {
            if self.in_quotes {
                self.quoted_char(ch, &mut chars);
            } else {
                self.unquoted_char(ch, &mut chars);
            }
        }

        if self.in_quotes {
            // The row opened by an unterminated quote never ends.
            tracing::trace!(after = self.rows.len(), "dropped row with unterminated quote");
        }

        self.rows
    }

    fn quoted_char<I>(&mut self, ch: char, chars: &mut Peekable<I>)
    where
        I: Iterator<Item = char>,
    {
        if ch != QUOTE {
            self.field.push(ch);
        } else if chars.peek() == Some(&QUOTE) {
            self.field.push(QUOTE);
            chars.next();
        } else {
            self.in_quotes = false;
            self.quoted_end = Some(self.field.len());
        }
    }

    fn unquoted_char<I>(&mut self, ch: char, chars: &mut Peekable<I>)
    where
        I: Iterator<Item = char>,
    {
        if ch == QUOTE {
            self.field.clear();
            self.quoted_end = None;
            self.in_quotes = true;
        } else if ch == self.delimiter {
            self.end_field();
        } else if ch == '\n' || ch == '\r' {
            if ch == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
            self.end_row();
        } else {
            self.field.push(ch);
        }
    }

    fn end_field(&mut self) {
        let mut field = std::mem::take(&mut self.field);
        match self.quoted_end.take() {
            Some(end) => {
                let kept = end + field[end..].trim_end_matches(|c: char| c.is_ascii_whitespace()).len();
                field.truncate(kept);
            }
            None => {
                let trimmed = field.trim_matches(|c: char| c.is_ascii_whitespace());
                if trimmed.len() != field.len() {
                    field = trimmed.to_string();
                }
            }
        }
        self.row.push(field);
    }

    fn end_row(&mut self) {
        self.end_field();
        let row = std::mem::take(&mut self.row);
        if row.iter().all(|field| is_blank(field)) {
            tracing::trace!(after = self.rows.len(), "dropped blank row");
        } else {
            self.rows.push(row);
        }
    }
}
