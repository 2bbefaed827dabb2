//! Error types for delimited-text conversion.
//!
//! The tokenizer, the record mapper and the cell formatter are total: they
//! never fail on any text input. Errors only come from two places:
//!
//! - **Argument validation**: a delimiter that cannot separate fields, or a
//!   markup element name that is not a valid name
//! - **Typed conversion**: mapping records to and from Rust types through Serde
//!
//! ## Examples
//!
//! ```rust
//! use serde_dsv::{Delimiter, Error};
//!
//! let err = Delimiter::new('"').unwrap_err();
//! assert!(matches!(err, Error::InvalidDelimiter { .. }));
//! ```

use serde::de::{Expected, Unexpected};
use std::fmt;
use thiserror::Error;

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The delimiter cannot be used to separate fields
    #[error("Invalid delimiter {delimiter:?}: {reason}")]
    InvalidDelimiter { delimiter: String, reason: String },

    /// A markup element name is empty or contains characters not allowed in a name
    #[error("Invalid element name {name:?}: {reason}")]
    InvalidElementName { name: String, reason: String },

    /// Two distinct record keys map to the same markup element name
    #[error("Keys {first:?} and {second:?} both map to element <{element}>")]
    ElementNameCollision {
        first: String,
        second: String,
        element: String,
    },

    /// Unsupported type for a record or a cell
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// A cell could not be converted to the requested type
    #[error("Type mismatch in column {column:?}: expected {expected}, found {found:?}")]
    TypeMismatch {
        column: String,
        expected: String,
        found: String,
    },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an invalid delimiter error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dsv::Error;
    ///
    /// let err = Error::invalid_delimiter("\n", "line breaks end rows");
    /// assert!(err.to_string().contains("line breaks"));
    /// ```
    pub fn invalid_delimiter(delimiter: &str, reason: &str) -> Self {
        Error::InvalidDelimiter {
            delimiter: delimiter.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates an invalid element name error.
    pub fn invalid_element_name(name: &str, reason: &str) -> Self {
        Error::InvalidElementName {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates an error for two keys that sanitize to the same element name.
    pub fn element_name_collision(first: &str, second: &str, element: &str) -> Self {
        Error::ElementNameCollision {
            first: first.to_string(),
            second: second.to_string(),
            element: element.to_string(),
        }
    }

    /// Creates an unsupported type error.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a type mismatch error for a cell that failed to convert.
    ///
    /// The column is filled in later by the record deserializer, so it may be
    /// empty when the error is first raised.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dsv::Error;
    ///
    /// let err = Error::type_mismatch("age", "u32", "forty");
    /// assert!(err.to_string().contains("expected u32"));
    /// ```
    pub fn type_mismatch(column: &str, expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            column: column.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dsv::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Attaches a column name to a type mismatch that was raised without one.
    pub(crate) fn in_column(self, name: &str) -> Self {
        match self {
            Error::TypeMismatch {
                column,
                expected,
                found,
            } if column.is_empty() => Error::TypeMismatch {
                column: name.to_string(),
                expected,
                found,
            },
            other => other,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

// Type and value errors raised by Serde visitors become mismatches, so the
// record deserializer can name the column they came from.
impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    fn invalid_type(unexp: Unexpected<'_>, exp: &dyn Expected) -> Self {
        Error::type_mismatch("", &exp.to_string(), &unexpected_cell(unexp))
    }

    fn invalid_value(unexp: Unexpected<'_>, exp: &dyn Expected) -> Self {
        Error::type_mismatch("", &exp.to_string(), &unexpected_cell(unexp))
    }

    fn unknown_variant(variant: &str, expected: &'static [&'static str]) -> Self {
        Error::type_mismatch("", &format!("one of {}", expected.join(", ")), variant)
    }
}

// Cell-style text for the value a visitor rejected.
fn unexpected_cell(unexp: Unexpected<'_>) -> String {
    match unexp {
        Unexpected::Unit | Unexpected::Option => "null".to_string(),
        Unexpected::Bool(b) => b.to_string(),
        Unexpected::Signed(i) => i.to_string(),
        Unexpected::Unsigned(u) => u.to_string(),
        Unexpected::Float(f) => f.to_string(),
        Unexpected::Char(c) => c.to_string(),
        Unexpected::Str(s) => s.to_string(),
        other => other.to_string(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
