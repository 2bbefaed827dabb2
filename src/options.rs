//! Configuration options for delimited-text conversion.
//!
//! This module provides the types that configure every public operation:
//!
//! - [`Delimiter`]: the single field-separator character
//! - [`DsvOptions`]: delimiter, header handling and explicit output columns
//! - [`MarkupOptions`]: element names and layout for markup output
//!
//! ## Examples
//!
//! ```rust
//! use serde_dsv::{to_records_with_options, Delimiter, DsvOptions};
//!
//! let options = DsvOptions::new().with_delimiter(Delimiter::PIPE);
//! let records = to_records_with_options("a|b\n1|2", &options);
//! assert_eq!(records[0].get("b").and_then(|v| v.as_str()), Some("2"));
//! ```

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

const QUOTE: char = '"';

/// Field separator for delimited text.
///
/// Any single character can separate fields except the quote character and
/// the two line-break characters, which the tokenizer always interprets
/// itself. The check happens once, at construction, so every operation that
/// takes a `Delimiter` is total.
///
/// # Examples
///
/// ```rust
/// use serde_dsv::Delimiter;
///
/// assert_eq!(Delimiter::COMMA.as_char(), ',');
/// assert_eq!(Delimiter::new(';').unwrap(), Delimiter::SEMICOLON);
/// assert!(Delimiter::new('"').is_err());
/// assert_eq!("|".parse::<Delimiter>().unwrap(), Delimiter::PIPE);
/// assert!("::".parse::<Delimiter>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Delimiter(char);

impl Delimiter {
    pub const COMMA: Delimiter = Delimiter(',');
    pub const TAB: Delimiter = Delimiter('\t');
    pub const PIPE: Delimiter = Delimiter('|');
    pub const SEMICOLON: Delimiter = Delimiter(';');

    /// Creates a delimiter from a character.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDelimiter`] for `"`, `\n` and `\r`.
    pub fn new(ch: char) -> Result<Self> {
        match ch {
            QUOTE => Err(Error::invalid_delimiter(
                &ch.to_string(),
                "the quote character cannot separate fields",
            )),
            '\n' | '\r' => Err(Error::invalid_delimiter(
                &ch.to_string(),
                "line breaks end rows and cannot separate fields",
            )),
            _ => Ok(Delimiter(ch)),
        }
    }

    /// Returns the separator character.
    #[inline]
    #[must_use]
    pub const fn as_char(self) -> char {
        self.0
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Delimiter::COMMA
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<char> for Delimiter {
    type Error = Error;

    fn try_from(ch: char) -> Result<Self> {
        Delimiter::new(ch)
    }
}

impl FromStr for Delimiter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Delimiter::new(ch),
            _ => Err(Error::invalid_delimiter(
                s,
                "a delimiter must be exactly one character",
            )),
        }
    }
}

/// Options for parsing and serializing delimited text.
///
/// | option        | default | meaning                                         |
/// |---------------|---------|-------------------------------------------------|
/// | `delimiter`   | `,`     | field separator, used in both directions        |
/// | `has_headers` | `true`  | first parsed row names the columns              |
/// | `columns`     | none    | explicit output columns (serialize direction)   |
///
/// # Examples
///
/// ```rust
/// use serde_dsv::{Delimiter, DsvOptions};
///
/// let options = DsvOptions::new()
///     .with_delimiter(Delimiter::SEMICOLON)
///     .with_headers(false)
///     .with_columns(["id", "name"]);
/// assert!(!options.has_headers);
/// assert_eq!(options.columns.as_deref(), Some(&["id".to_string(), "name".to_string()][..]));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DsvOptions {
    pub delimiter: Delimiter,
    pub has_headers: bool,
    pub columns: Option<Vec<String>>,
}

impl Default for DsvOptions {
    fn default() -> Self {
        DsvOptions {
            delimiter: Delimiter::default(),
            has_headers: true,
            columns: None,
        }
    }
}

impl DsvOptions {
    /// Creates default options (comma delimiter, header row, inferred columns).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for tab-separated text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dsv::{Delimiter, DsvOptions};
    ///
    /// assert_eq!(DsvOptions::tsv().delimiter, Delimiter::TAB);
    /// ```
    #[must_use]
    pub fn tsv() -> Self {
        DsvOptions {
            delimiter: Delimiter::TAB,
            ..Default::default()
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether the first parsed row holds the column names.
    ///
    /// Without a header row, columns are named `col1`, `col2`, ...
    #[must_use]
    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// Sets the columns to write, in order.
    ///
    /// Columns absent from a record become empty cells; record keys not in
    /// the list are left out.
    #[must_use]
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }
}

/// Options for markup output.
///
/// # Examples
///
/// ```rust
/// use serde_dsv::MarkupOptions;
///
/// let options = MarkupOptions::new()
///     .with_root_name("Inventory")
///     .with_row_name("Item")
///     .with_indent(4);
/// assert_eq!(options.root_name, "Inventory");
/// assert!(!options.strict_names);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MarkupOptions {
    pub root_name: String,
    pub row_name: String,
    pub indent: usize,
    /// Reject keys whose sanitized element names collide or come out empty.
    pub strict_names: bool,
}

impl Default for MarkupOptions {
    fn default() -> Self {
        MarkupOptions {
            root_name: "root".to_string(),
            row_name: "row".to_string(),
            indent: 2,
            strict_names: false,
        }
    }
}

impl MarkupOptions {
    /// Creates default options (`<root>` with `<row>` children, 2-space indent).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name of the document element.
    #[must_use]
    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = name.into();
        self
    }

    /// Sets the name of the element wrapping each record.
    #[must_use]
    pub fn with_row_name(mut self, name: impl Into<String>) -> Self {
        self.row_name = name.into();
        self
    }

    /// Sets the indentation size (number of spaces per level).
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Turns sanitized-name collisions into errors instead of emitting
    /// duplicate child elements.
    #[must_use]
    pub fn with_strict_names(mut self, strict: bool) -> Self {
        self.strict_names = strict;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiter_rejects_reserved_chars() {
        for ch in ['"', '\n', '\r'] {
            assert!(matches!(
                Delimiter::new(ch),
                Err(Error::InvalidDelimiter { .. })
            ));
        }
        assert_eq!(Delimiter::new('\t').unwrap(), Delimiter::TAB);
        assert_eq!(Delimiter::try_from('#').unwrap().as_char(), '#');
    }

    #[test]
    fn test_delimiter_from_str_requires_one_char() {
        assert!("".parse::<Delimiter>().is_err());
        assert!(",,".parse::<Delimiter>().is_err());
        assert_eq!("\t".parse::<Delimiter>().unwrap(), Delimiter::TAB);
        assert_eq!("é".parse::<Delimiter>().unwrap().as_char(), 'é');
    }

    #[test]
    fn test_defaults() {
        let options = DsvOptions::default();
        assert_eq!(options.delimiter, Delimiter::COMMA);
        assert!(options.has_headers);
        assert!(options.columns.is_none());

        let markup = MarkupOptions::default();
        assert_eq!(markup.root_name, "root");
        assert_eq!(markup.row_name, "row");
        assert_eq!(markup.indent, 2);
    }
}
