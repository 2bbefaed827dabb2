//! # serde_dsv
//!
//! Bidirectional conversion between delimiter-separated text (CSV, TSV,
//! pipe- or semicolon-separated) and ordered records.
//!
//! ## Pipeline
//!
//! - **Tokenizer** ([`tokenizer`]): text to a grid of rows of fields, in one
//!   quote-aware pass
//! - **Record mapper** ([`mapper`]): grid to records keyed by the header row,
//!   and records back to text
//! - **Cell formatter** ([`format`]): quotes and escapes a single cell only
//!   when the delimiter, a quote or a line break would otherwise break it
//! - **Markup renderer** ([`markup`]): records to an XML-style document
//!
//! Records ([`Record`]) keep their columns in insertion order, so headers
//! inferred from the first record are deterministic.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_dsv::{to_delimited, to_records, Value};
//!
//! let records = to_records("Name,Note\nAlice,\"Item A, for sales\"\nBob");
//! assert_eq!(records[0].get("Note").and_then(|v| v.as_str()), Some("Item A, for sales"));
//! assert_eq!(records[1].get("Note"), Some(&Value::Null));
//!
//! assert_eq!(to_delimited(&records), "Name,Note\nAlice,\"Item A, for sales\"\nBob,");
//! ```
//!
//! ### Custom delimiters
//!
//! ```rust
//! use serde_dsv::{to_records_with_options, Delimiter, DsvOptions};
//!
//! let options = DsvOptions::new().with_delimiter(Delimiter::PIPE);
//! let records = to_records_with_options("\"Name\"|\"Value\"\nAlice|100, ok", &options);
//! assert_eq!(records[0].get("Value").and_then(|v| v.as_str()), Some("100, ok"));
//! ```
//!
//! ### Typed rows with Serde
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_dsv::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Product { id: u32, name: String, price: f64 }
//!
//! let products = vec![
//!     Product { id: 1, name: "Widget".to_string(), price: 9.99 },
//!     Product { id: 2, name: "Gadget, XL".to_string(), price: 14.5 },
//! ];
//!
//! let text = to_string(&products).unwrap();
//! assert_eq!(text, "id,name,price\n1,Widget,9.99\n2,\"Gadget, XL\",14.5");
//!
//! let back: Vec<Product> = from_str(&text).unwrap();
//! assert_eq!(back, products);
//! ```
//!
//! ## Errors
//!
//! Parsing and writing never fail: malformed quoting, ragged rows and empty
//! input all have defined results. Errors come only from invalid arguments
//! (see [`Delimiter::new`] and [`MarkupOptions`]) and from typed Serde
//! conversions.

pub mod de;
pub mod error;
pub mod format;
pub mod macros;
pub mod map;
pub mod mapper;
pub mod markup;
pub mod options;
pub mod ser;
pub mod tokenizer;
pub mod value;

pub use de::{CellDeserializer, RecordDeserializer};
pub use error::{Error, Result};
pub use map::{Record, RecordSet};
pub use options::{Delimiter, DsvOptions, MarkupOptions};
pub use ser::{RecordSerializer, ValueSerializer};
pub use tokenizer::{Grid, Row};
pub use value::{Number, Value};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Splits comma-separated text into rows of fields.
///
/// # Examples
///
/// ```rust
/// use serde_dsv::parse;
///
/// assert_eq!(parse("a,b\n\n\nc,d"), vec![vec!["a", "b"], vec!["c", "d"]]);
/// ```
#[must_use]
pub fn parse(text: &str) -> Grid {
    parse_with_options(text, &DsvOptions::default())
}

/// Splits delimited text into rows of fields using the configured delimiter.
#[must_use]
pub fn parse_with_options(text: &str, options: &DsvOptions) -> Grid {
    tokenizer::tokenize(text, options.delimiter)
}

/// Parses comma-separated text with a header row into records.
///
/// # Examples
///
/// ```rust
/// use serde_dsv::{record, to_records};
///
/// assert_eq!(
///     to_records("ColA,ColB,ColC\nData1,Data2\nData3"),
///     vec![
///         record! { "ColA" => "Data1", "ColB" => "Data2", "ColC" => null },
///         record! { "ColA" => "Data3", "ColB" => null, "ColC" => null },
///     ]
/// );
/// ```
#[must_use]
pub fn to_records(text: &str) -> RecordSet {
    to_records_with_options(text, &DsvOptions::default())
}

/// Parses delimited text into records with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_dsv::{to_records_with_options, DsvOptions};
///
/// let records = to_records_with_options("1,2\nA,B", &DsvOptions::new().with_headers(false));
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[1].get("col2").and_then(|v| v.as_str()), Some("B"));
/// ```
#[must_use]
pub fn to_records_with_options(text: &str, options: &DsvOptions) -> RecordSet {
    mapper::to_records(text, options)
}

/// Writes records as comma-separated text, columns taken from the first record.
///
/// # Examples
///
/// ```rust
/// use serde_dsv::{record, to_delimited};
///
/// let records = vec![record! { "A" => 1, "B" => "Value", "C" => null }];
/// assert_eq!(to_delimited(&records), "A,B,C\n1,Value,");
/// assert_eq!(to_delimited(&[]), "");
/// ```
#[must_use]
pub fn to_delimited(records: &[Record]) -> String {
    to_delimited_with_options(records, &DsvOptions::default())
}

/// Writes records as delimited text with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_dsv::{record, to_delimited_with_options, DsvOptions};
///
/// let records = vec![record! { "id" => 1, "name" => "A" }];
/// let options = DsvOptions::new().with_columns(["id", "extra", "name"]);
/// assert_eq!(to_delimited_with_options(&records, &options), "id,extra,name\n1,,A");
/// ```
#[must_use]
pub fn to_delimited_with_options(records: &[Record], options: &DsvOptions) -> String {
    mapper::to_delimited(records, options)
}

/// Renders records as a markup document with `<root>` and `<row>` elements.
///
/// # Errors
///
/// See [`markup::render`].
pub fn to_markup(records: &[Record]) -> Result<String> {
    to_markup_with_options(records, &MarkupOptions::default())
}

/// Renders records as a markup document with custom element names.
///
/// # Errors
///
/// See [`markup::render`].
pub fn to_markup_with_options(records: &[Record], options: &MarkupOptions) -> Result<String> {
    markup::render(records, options)
}

/// Parses delimited text into records and renders them as markup.
///
/// # Examples
///
/// ```rust
/// use serde_dsv::{delimited_to_markup, Delimiter, DsvOptions, MarkupOptions};
///
/// let markup = delimited_to_markup(
///     "Name|Value\nAlice|100",
///     &DsvOptions::new().with_delimiter(Delimiter::PIPE),
///     &MarkupOptions::new().with_root_name("Inventory").with_row_name("Item"),
/// )
/// .unwrap();
/// assert!(markup.contains("<Item>\n    <Name>Alice</Name>"));
/// ```
///
/// # Errors
///
/// See [`markup::render`].
pub fn delimited_to_markup(
    text: &str,
    options: &DsvOptions,
    markup_options: &MarkupOptions,
) -> Result<String> {
    let records = to_records_with_options(text, options);
    to_markup_with_options(&records, markup_options)
}

/// Convert a scalar `T: Serialize` to a cell [`Value`].
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] for sequences, maps and structs.
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Convert a struct or string-keyed map to a [`Record`], columns in field order.
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] if `value` is not a struct or map, or
/// if one of its fields is not a scalar.
pub fn to_record<T>(value: &T) -> Result<Record>
where
    T: ?Sized + Serialize,
{
    value.serialize(RecordSerializer)
}

/// Serialize rows of `T: Serialize` to comma-separated text.
///
/// # Errors
///
/// Returns an error if a row cannot be converted to a record.
pub fn to_string<T>(rows: &[T]) -> Result<String>
where
    T: Serialize,
{
    to_string_with_options(rows, &DsvOptions::default())
}

/// Serialize rows of `T: Serialize` to delimited text with custom options.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_dsv::{to_string_with_options, DsvOptions};
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let points = [Point { x: 1, y: 2 }, Point { x: -3, y: 4 }];
/// assert_eq!(to_string_with_options(&points, &DsvOptions::tsv()).unwrap(), "x\ty\n1\t2\n-3\t4");
/// ```
///
/// # Errors
///
/// Returns an error if a row cannot be converted to a record.
pub fn to_string_with_options<T>(rows: &[T], options: &DsvOptions) -> Result<String>
where
    T: Serialize,
{
    let records = rows.iter().map(to_record).collect::<Result<RecordSet>>()?;
    Ok(to_delimited_with_options(&records, options))
}

/// Deserialize a `T` from one record.
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] if a cell cannot be converted to its field type.
pub fn from_record<T>(record: Record) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(RecordDeserializer::new(record))
}

/// Deserialize rows of `T` from comma-separated text with a header row.
///
/// # Errors
///
/// Returns an error if a row cannot be deserialized to `T`.
pub fn from_str<T>(text: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    from_str_with_options(text, &DsvOptions::default())
}

/// Deserialize rows of `T` from delimited text with custom options.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use serde_dsv::{from_str_with_options, Delimiter, DsvOptions};
///
/// #[derive(Deserialize, Debug, PartialEq)]
/// struct Pair { col1: String, col2: u8 }
///
/// let options = DsvOptions::new().with_delimiter(Delimiter::SEMICOLON).with_headers(false);
/// let pairs: Vec<Pair> = from_str_with_options("a;1\nb;2", &options).unwrap();
/// assert_eq!(pairs[1], Pair { col1: "b".to_string(), col2: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if a row cannot be deserialized to `T`.
pub fn from_str_with_options<T>(text: &str, options: &DsvOptions) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    to_records_with_options(text, options)
        .into_iter()
        .map(from_record)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
    }

    #[test]
    fn test_struct_rows_roundtrip() {
        let users = vec![
            User {
                id: 1,
                name: "Alice".to_string(),
                active: true,
            },
            User {
                id: 2,
                name: "Bob \"B\" Jones".to_string(),
                active: false,
            },
        ];
        let text = to_string(&users).unwrap();
        assert_eq!(
            text,
            "id,name,active\n1,Alice,true\n2,\"Bob \"\"B\"\" Jones\",false"
        );
        let back: Vec<User> = from_str(&text).unwrap();
        assert_eq!(back, users);
    }

    #[test]
    fn test_to_value() {
        assert_eq!(to_value(&5u8).unwrap(), Value::Number(Number::Integer(5)));
        assert!(to_value(&vec![1, 2]).is_err());
    }

    #[test]
    fn test_empty_inputs() {
        assert!(parse("").is_empty());
        assert!(to_records("").is_empty());
        assert_eq!(to_delimited(&[]), "");
        assert!(from_str::<User>("").unwrap().is_empty());
        assert_eq!(to_string::<User>(&[]).unwrap(), "");
    }

    #[test]
    fn test_from_record() {
        let user: User = from_record(record! { "id" => "9", "name" => "Zed", "active" => "false" }).unwrap();
        assert_eq!(
            user,
            User {
                id: 9,
                name: "Zed".to_string(),
                active: false,
            }
        );
    }
}
