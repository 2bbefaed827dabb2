//! Markup output.
//!
//! Renders a record set as an XML-style document: a declaration line, one
//! element per record under the root element, and one child element per
//! column. Column names are reduced to `[A-Za-z0-9_]` to form element names
//! and cell text is entity-escaped.
//!
//! ```rust
//! use serde_dsv::{record, to_markup};
//!
//! let records = vec![record! { "Name" => "Tom & Jerry", "Note" => null }];
//! assert_eq!(
//!     to_markup(&records).unwrap(),
//!     "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
//!      <root>\n  <row>\n    <Name>Tom &amp; Jerry</Name>\n    <Note/>\n  </row>\n</root>"
//! );
//! ```
//!
//! A sanitized name that starts with a digit gets a leading `_`, and one
//! with nothing left becomes `_`.
//!
//! Sanitizing can map two different columns to the same element name
//! (`a-b` and `ab` both become `ab`). By default such elements are written
//! side by side; with [`MarkupOptions::strict_names`] the collision is
//! reported as an error.

use crate::{Error, MarkupOptions, Record, Result};
use std::borrow::Cow;
use std::collections::HashMap;

const DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

/// Escapes `& < > " '` for use in element content.
///
/// # Examples
///
/// ```rust
/// use serde_dsv::markup::escape_markup;
///
/// assert_eq!(escape_markup("plain"), "plain");
/// assert_eq!(escape_markup("<a href='x'>\"&\"</a>"), "&lt;a href=&apos;x&apos;&gt;&quot;&amp;&quot;&lt;/a&gt;");
/// ```
#[must_use]
pub fn escape_markup(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut output = String::with_capacity(s.len() + 16);
    for ch in s.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&apos;"),
            _ => output.push(ch),
        }
    }
    Cow::Owned(output)
}

/// Removes every character outside `[A-Za-z0-9_]` from a column name.
///
/// # Examples
///
/// ```rust
/// use serde_dsv::markup::sanitize_element_name;
///
/// assert_eq!(sanitize_element_name("Value, Metric"), "ValueMetric");
/// assert_eq!(sanitize_element_name("user_id"), "user_id");
/// assert_eq!(sanitize_element_name("名前"), "");
/// ```
#[must_use]
pub fn sanitize_element_name(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

fn validate_element_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(Error::invalid_element_name(name, "name is empty"));
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(Error::invalid_element_name(
            name,
            "name must start with a letter or underscore",
        ));
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')) {
        return Err(Error::invalid_element_name(
            name,
            "name may only contain letters, digits, '_', '-' and '.'",
        ));
    }
    Ok(())
}

// Maps every column seen in the record set to its element name.
fn element_names(records: &[Record], strict: bool) -> Result<HashMap<String, String>> {
    let mut names = HashMap::new();
    let mut owners: HashMap<String, String> = HashMap::new();
    for key in records.iter().flat_map(Record::keys) {
        if names.contains_key(key) {
            continue;
        }
        let mut element = sanitize_element_name(key);
        if element.is_empty() {
            if strict {
                return Err(Error::invalid_element_name(
                    key,
                    "no letters, digits or underscores left after sanitizing",
                ));
            }
            element.push('_');
        } else if validate_element_name(&element).is_err() {
            if strict {
                return Err(Error::invalid_element_name(
                    key,
                    "sanitized name must start with a letter or underscore",
                ));
            }
            element.insert(0, '_');
        }
        if strict {
            if let Some(first) = owners.get(&element) {
                return Err(Error::element_name_collision(first, key, &element));
            }
            owners.insert(element.clone(), key.clone());
        }
        names.insert(key.clone(), element);
    }
    Ok(names)
}

/// Renders records as a markup document.
///
/// # Errors
///
/// Returns [`Error::InvalidElementName`] when the root or row name is not a
/// valid element name, and, with [`MarkupOptions::strict_names`], when
/// column names collide or vanish after sanitizing.
pub fn render(records: &[Record], options: &MarkupOptions) -> Result<String> {
    validate_element_name(&options.root_name)?;
    validate_element_name(&options.row_name)?;
    let names = element_names(records, options.strict_names)?;

    let root = options.root_name.as_str();
    let row = options.row_name.as_str();
    let mut output = String::with_capacity(DECLARATION.len() + 64 * (records.len() + 1));
    output.push_str(DECLARATION);
    output.push('\n');

    if records.is_empty() {
        output.push('<');
        output.push_str(root);
        output.push_str("/>");
        return Ok(output);
    }

    let row_indent = " ".repeat(options.indent);
    let cell_indent = " ".repeat(options.indent * 2);
    output.push_str(&format!("<{}>", root));
    for record in records {
        output.push('\n');
        output.push_str(&format!("{}<{}>", row_indent, row));
        for (key, value) in record {
            let element = names.get(key).map_or(key.as_str(), String::as_str);
            output.push('\n');
            output.push_str(&cell_indent);
            match value.to_text() {
                Some(text) => output.push_str(&format!(
                    "<{0}>{1}</{0}>",
                    element,
                    escape_markup(&text)
                )),
                None => output.push_str(&format!("<{}/>", element)),
            }
        }
        output.push('\n');
        output.push_str(&format!("{}</{}>", row_indent, row));
    }
    output.push('\n');
    output.push_str(&format!("</{}>", root));

    tracing::debug!(
        records = records.len(),
        bytes = output.len(),
        "rendered markup"
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;

    fn body(output: &str) -> &str {
        output
            .strip_prefix(DECLARATION)
            .and_then(|rest| rest.strip_prefix('\n'))
            .unwrap()
    }

    #[test]
    fn test_empty_records_self_close_root() {
        let output = render(&[], &MarkupOptions::new().with_root_name("Inventory")).unwrap();
        assert_eq!(body(&output), "<Inventory/>");
    }

    #[test]
    fn test_rows_and_children() {
        let records = vec![
            record! { "Name" => "Alice", "Value" => 100 },
            record! { "Name" => "Charlie \"The King\"", "Value" => 300 },
        ];
        let options = MarkupOptions::new()
            .with_root_name("Inventory")
            .with_row_name("Item");
        let output = render(&records, &options).unwrap();
        assert_eq!(
            body(&output),
            "<Inventory>\n  <Item>\n    <Name>Alice</Name>\n    <Value>100</Value>\n  </Item>\n  \
             <Item>\n    <Name>Charlie &quot;The King&quot;</Name>\n    <Value>300</Value>\n  </Item>\n</Inventory>"
        );
    }

    #[test]
    fn test_indent_option() {
        let records = vec![record! { "a" => "1" }];
        let output = render(&records, &MarkupOptions::new().with_indent(0)).unwrap();
        assert_eq!(body(&output), "<root>\n<row>\n<a>1</a>\n</row>\n</root>");
    }

    #[test]
    fn test_keys_are_sanitized() {
        let records = vec![record! { "Value, Metric" => "1,000", "!!" => "x" }];
        let output = render(&records, &MarkupOptions::new()).unwrap();
        assert!(output.contains("<ValueMetric>1,000</ValueMetric>"));
        assert!(output.contains("<_>x</_>"));
    }

    #[test]
    fn test_leading_digit_keys() {
        let records = vec![record! { "1abc" => "x", "2 b" => "y" }];
        let output = render(&records, &MarkupOptions::new()).unwrap();
        assert!(output.contains("<_1abc>x</_1abc>"));
        assert!(output.contains("<_2b>y</_2b>"));

        let err = render(&records, &MarkupOptions::new().with_strict_names(true)).unwrap_err();
        assert_eq!(
            err,
            Error::invalid_element_name("1abc", "sanitized name must start with a letter or underscore")
        );
    }

    #[test]
    fn test_collisions_kept_by_default() {
        let records = vec![record! { "a-b" => "1", "ab" => "2" }];
        let output = render(&records, &MarkupOptions::new()).unwrap();
        assert!(output.contains("<ab>1</ab>\n    <ab>2</ab>"));
    }

    #[test]
    fn test_strict_names_reject_collisions() {
        let records = vec![record! { "a-b" => "1", "ab" => "2" }];
        let err = render(&records, &MarkupOptions::new().with_strict_names(true)).unwrap_err();
        assert_eq!(err, Error::element_name_collision("a-b", "ab", "ab"));

        let records = vec![record! { "%" => "1" }];
        let err = render(&records, &MarkupOptions::new().with_strict_names(true)).unwrap_err();
        assert!(matches!(err, Error::InvalidElementName { .. }));
    }

    #[test]
    fn test_invalid_root_and_row_names() {
        for name in ["", "1abc", "has space", "<x>"] {
            assert!(render(&[], &MarkupOptions::new().with_root_name(name)).is_err());
            assert!(render(&[], &MarkupOptions::new().with_row_name(name)).is_err());
        }
        assert!(render(&[], &MarkupOptions::new().with_root_name("ns.data-set_1")).is_ok());
    }
}
