//! Serde deserialization from records.
//!
//! A [`RecordDeserializer`] presents one [`Record`] to Serde as a map, so any
//! `#[derive(Deserialize)]` struct can be read from a row. Parsed cells are
//! text, and [`CellDeserializer`] converts that text on demand into whatever
//! scalar the target field asks for:
//!
//! - integers and floats are parsed from the trimmed cell
//! - `bool` accepts `true` and `false`
//! - an empty cell or a null (missing) cell is `None` for `Option` fields
//! - unit enum variants are matched by name
//!
//! A cell that does not convert produces [`Error::TypeMismatch`] naming the
//! column.
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_dsv::from_str;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Row { id: u32, name: String, score: Option<f64> }
//!
//! let rows: Vec<Row> = from_str("id,name,score\n1,Alice,9.5\n2,Bob,").unwrap();
//! assert_eq!(rows[1], Row { id: 2, name: "Bob".to_string(), score: None });
//! ```

use crate::{Error, Number, Record, Result, Value};
use serde::de::{self, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// Deserializes a Rust value from one record.
pub struct RecordDeserializer {
    record: Record,
}

impl RecordDeserializer {
    pub fn new(record: Record) -> Self {
        RecordDeserializer { record }
    }
}

impl<'de> de::Deserializer<'de> for RecordDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(MapDeserializer::new(self.record))
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    entry: Option<(String, Value)>,
}

impl MapDeserializer {
    fn new(record: Record) -> Self {
        MapDeserializer {
            iter: record.into_iter(),
            entry: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                let key_deserializer: de::value::StrDeserializer<'_, Error> =
                    key.as_str().into_deserializer();
                let parsed = seed.deserialize(key_deserializer)?;
                self.entry = Some((key, value));
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.entry.take() {
            Some((key, value)) => seed
                .deserialize(CellDeserializer::new(value))
                .map_err(|e| e.in_column(&key)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

/// Deserializes a scalar from one cell, parsing text cells as needed.
pub struct CellDeserializer {
    value: Value,
}

impl CellDeserializer {
    pub fn new(value: Value) -> Self {
        CellDeserializer { value }
    }

    fn mismatch(&self, expected: &str) -> Error {
        Error::type_mismatch("", expected, &self.value.to_string())
    }
}

macro_rules! deserialize_parsed {
    ($($method:ident => $visit:ident: $ty:ty),* $(,)?) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                match &self.value {
                    Value::String(s) => match s.trim().parse::<$ty>() {
                        Ok(n) => visitor.$visit(n),
                        Err(_) => Err(self.mismatch(stringify!($ty))),
                    },
                    _ => self.deserialize_any(visitor),
                }
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for CellDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(Number::Integer(i)) => visitor.visit_i64(i),
            Value::Number(Number::UInteger(u)) => visitor.visit_u64(u),
            Value::Number(Number::Float(f)) => visitor.visit_f64(f),
            Value::String(s) => visitor.visit_string(s),
        }
    }

    deserialize_parsed! {
        deserialize_i8 => visit_i8: i8,
        deserialize_i16 => visit_i16: i16,
        deserialize_i32 => visit_i32: i32,
        deserialize_i64 => visit_i64: i64,
        deserialize_i128 => visit_i128: i128,
        deserialize_u8 => visit_u8: u8,
        deserialize_u16 => visit_u16: u16,
        deserialize_u32 => visit_u32: u32,
        deserialize_u64 => visit_u64: u64,
        deserialize_u128 => visit_u128: u128,
        deserialize_f32 => visit_f32: f32,
        deserialize_f64 => visit_f64: f64,
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match &self.value {
            Value::String(s) => match s.trim() {
                "true" => visitor.visit_bool(true),
                "false" => visitor.visit_bool(false),
                _ => Err(self.mismatch("bool")),
            },
            _ => self.deserialize_any(visitor),
        }
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if let Value::String(s) = &self.value {
            let mut chars = s.chars();
            if let (Some(ch), None) = (chars.next(), chars.next()) {
                return visitor.visit_char(ch);
            }
            return Err(self.mismatch("char"));
        }
        self.deserialize_any(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match &self.value {
            Value::Null => visitor.visit_none(),
            Value::String(s) if s.is_empty() => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match &self.value {
            Value::Null => visitor.visit_unit(),
            Value::String(s) if s.is_empty() => visitor.visit_unit(),
            _ => Err(self.mismatch("empty cell")),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(s) => visitor.visit_enum(s.into_deserializer()),
            other => Err(Error::type_mismatch("", "enum variant name", &other.to_string())),
        }
    }

    forward_to_deserialize_any! {
        str string bytes byte_buf seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Row {
        id: u32,
        ratio: f64,
        active: bool,
        name: String,
        note: Option<String>,
        initial: char,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    enum Status {
        Active,
        Inactive,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Account {
        #[serde(rename = "Name")]
        name: String,
        #[serde(rename = "Status")]
        status: Status,
    }

    #[test]
    fn test_text_cells_convert() {
        let record = record! {
            "id" => " 7 ",
            "ratio" => "0.25",
            "active" => "true",
            "name" => "Alice",
            "note" => "",
            "initial" => "A",
        };
        let row = Row::deserialize(RecordDeserializer::new(record)).unwrap();
        assert_eq!(
            row,
            Row {
                id: 7,
                ratio: 0.25,
                active: true,
                name: "Alice".to_string(),
                note: None,
                initial: 'A',
            }
        );
    }

    #[test]
    fn test_typed_values_pass_through() {
        let record = record! {
            "id" => 3,
            "ratio" => 1,
            "active" => false,
            "name" => "Bob",
            "note" => null,
            "initial" => "B",
        };
        let row = Row::deserialize(RecordDeserializer::new(record)).unwrap();
        assert_eq!(row.id, 3);
        assert_eq!(row.ratio, 1.0);
        assert!(!row.active);
        assert_eq!(row.note, None);
    }

    #[test]
    fn test_unit_enum_by_name() {
        let record = record! { "Name" => "Alice", "Status" => "Inactive" };
        let account = Account::deserialize(RecordDeserializer::new(record)).unwrap();
        assert_eq!(account.status, Status::Inactive);
    }

    #[test]
    fn test_mismatch_names_column() {
        let record = record! {
            "id" => "seven",
            "ratio" => "0.25",
            "active" => "true",
            "name" => "Alice",
            "note" => "",
            "initial" => "A",
        };
        let err = Row::deserialize(RecordDeserializer::new(record)).unwrap_err();
        assert_eq!(err, Error::type_mismatch("id", "u32", "seven"));
    }

    #[allow(dead_code)]
    #[derive(Deserialize, Debug)]
    struct Gauge {
        label: String,
        level: u8,
    }

    #[test]
    fn test_missing_cell_for_required_field() {
        let record = record! { "Name" => "Alice", "Status" => null };
        let err = Account::deserialize(RecordDeserializer::new(record)).unwrap_err();
        assert_eq!(err, Error::type_mismatch("Status", "enum variant name", "null"));

        let record = record! { "label" => null, "level" => "1" };
        let err = Gauge::deserialize(RecordDeserializer::new(record)).unwrap_err();
        assert_eq!(err, Error::type_mismatch("label", "a string", "null"));
    }

    #[test]
    fn test_out_of_range_number_names_column() {
        let record = record! { "label" => "x", "level" => 300 };
        let err = Gauge::deserialize(RecordDeserializer::new(record)).unwrap_err();
        assert!(matches!(
            err,
            Error::TypeMismatch { ref column, ref found, .. } if column == "level" && found == "300"
        ));
    }

    #[test]
    fn test_unknown_variant_names_column() {
        let record = record! { "Name" => "Alice", "Status" => "Paused" };
        let err = Account::deserialize(RecordDeserializer::new(record)).unwrap_err();
        assert_eq!(
            err,
            Error::type_mismatch("Status", "one of Active, Inactive", "Paused")
        );
    }

    #[test]
    fn test_deserialize_into_record() {
        let original = record! { "a" => "1", "b" => null };
        let copy = Record::deserialize(RecordDeserializer::new(original.clone())).unwrap();
        assert_eq!(copy, original);
    }
}
