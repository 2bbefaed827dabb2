//! Serde serialization into records.
//!
//! [`ValueSerializer`] turns a scalar into a [`Value`], and
//! [`RecordSerializer`] turns a struct or a string-keyed map into a
//! [`Record`] whose columns follow the field order. Cells are flat, so a
//! field holding a sequence or a nested map is rejected with
//! [`Error::UnsupportedType`].
//!
//! Most users should go through the crate root:
//!
//! ```rust
//! use serde::Serialize;
//! use serde_dsv::to_string;
//!
//! #[derive(Serialize)]
//! struct Row { id: u32, name: String, note: Option<String> }
//!
//! let rows = vec![
//!     Row { id: 1, name: "Widget".to_string(), note: None },
//!     Row { id: 2, name: "Gadget, large".to_string(), note: Some("new".to_string()) },
//! ];
//! assert_eq!(to_string(&rows).unwrap(), "id,name,note\n1,Widget,\n2,\"Gadget, large\",new");
//! ```

use crate::{Error, Number, Record, Result, Value};
use serde::{ser, Serialize};

/// Serializes a scalar into a [`Value`].
pub struct ValueSerializer;

/// Serializes a struct or map into a [`Record`].
pub struct RecordSerializer;

/// Collects the fields of one record.
pub struct SerializeRecord {
    record: Record,
    current_key: Option<String>,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = ser::Impossible<Value, Error>;
    type SerializeTuple = ser::Impossible<Value, Error>;
    type SerializeTupleStruct = ser::Impossible<Value, Error>;
    type SerializeTupleVariant = ser::Impossible<Value, Error>;
    type SerializeMap = ser::Impossible<Value, Error>;
    type SerializeStruct = ser::Impossible<Value, Error>;
    type SerializeStructVariant = ser::Impossible<Value, Error>;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v)))
    }

    // Beyond the 64-bit range the decimal text is kept, which the
    // deserializer parses back into `i128`/`u128`.
    fn serialize_i128(self, v: i128) -> Result<Value> {
        if let Ok(i) = i64::try_from(v) {
            return Ok(Value::Number(Number::Integer(i)));
        }
        match u64::try_from(v) {
            Ok(u) => Ok(Value::Number(Number::UInteger(u))),
            Err(_) => Ok(Value::String(v.to_string())),
        }
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        match u64::try_from(v) {
            Ok(u) => Ok(Value::from(u)),
            Err(_) => Ok(Value::String(v.to_string())),
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Number(Number::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        match std::str::from_utf8(v) {
            Ok(s) => Ok(Value::String(s.to_string())),
            Err(_) => Err(Error::unsupported_type("non UTF-8 bytes in a cell")),
        }
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported_type("newtype variant in a cell"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Error::unsupported_type("sequence in a cell"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Error::unsupported_type("tuple in a cell"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Error::unsupported_type("tuple struct in a cell"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported_type("tuple variant in a cell"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Error::unsupported_type("map in a cell"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(Error::unsupported_type("struct in a cell"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::unsupported_type("struct variant in a cell"))
    }
}

fn not_a_record(what: &str) -> Error {
    Error::unsupported_type(&format!("{} cannot be a record, expected a struct or map", what))
}

impl ser::Serializer for RecordSerializer {
    type Ok = Record;
    type Error = Error;

    type SerializeSeq = ser::Impossible<Record, Error>;
    type SerializeTuple = ser::Impossible<Record, Error>;
    type SerializeTupleStruct = ser::Impossible<Record, Error>;
    type SerializeTupleVariant = ser::Impossible<Record, Error>;
    type SerializeMap = SerializeRecord;
    type SerializeStruct = SerializeRecord;
    type SerializeStructVariant = ser::Impossible<Record, Error>;

    fn serialize_bool(self, _v: bool) -> Result<Record> {
        Err(not_a_record("bool"))
    }

    fn serialize_i8(self, _v: i8) -> Result<Record> {
        Err(not_a_record("integer"))
    }

    fn serialize_i16(self, _v: i16) -> Result<Record> {
        Err(not_a_record("integer"))
    }

    fn serialize_i32(self, _v: i32) -> Result<Record> {
        Err(not_a_record("integer"))
    }

    fn serialize_i64(self, _v: i64) -> Result<Record> {
        Err(not_a_record("integer"))
    }

    fn serialize_u8(self, _v: u8) -> Result<Record> {
        Err(not_a_record("integer"))
    }

    fn serialize_u16(self, _v: u16) -> Result<Record> {
        Err(not_a_record("integer"))
    }

    fn serialize_u32(self, _v: u32) -> Result<Record> {
        Err(not_a_record("integer"))
    }

    fn serialize_u64(self, _v: u64) -> Result<Record> {
        Err(not_a_record("integer"))
    }

    fn serialize_f32(self, _v: f32) -> Result<Record> {
        Err(not_a_record("float"))
    }

    fn serialize_f64(self, _v: f64) -> Result<Record> {
        Err(not_a_record("float"))
    }

    fn serialize_char(self, _v: char) -> Result<Record> {
        Err(not_a_record("char"))
    }

    fn serialize_str(self, _v: &str) -> Result<Record> {
        Err(not_a_record("string"))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Record> {
        Err(not_a_record("bytes"))
    }

    fn serialize_none(self) -> Result<Record> {
        Err(not_a_record("none"))
    }

    fn serialize_some<T>(self, value: &T) -> Result<Record>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Record> {
        Err(not_a_record("unit"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Record> {
        Err(not_a_record("unit struct"))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Record> {
        Err(not_a_record("enum variant"))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Record>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Record>
    where
        T: ?Sized + Serialize,
    {
        Err(not_a_record("enum variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(not_a_record("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(not_a_record("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(not_a_record("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(not_a_record("enum variant"))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeRecord> {
        Ok(SerializeRecord::new(len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeRecord> {
        Ok(SerializeRecord::new(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(not_a_record("enum variant"))
    }
}

impl SerializeRecord {
    fn new(capacity: usize) -> Self {
        SerializeRecord {
            record: Record::with_capacity(capacity),
            current_key: None,
        }
    }

    fn insert_field<T>(&mut self, key: String, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let value = value.serialize(ValueSerializer).map_err(|e| match e {
            Error::UnsupportedType(msg) => {
                Error::UnsupportedType(format!("{} (column {:?})", msg, key))
            }
            other => other,
        })?;
        self.record.insert(key, value);
        Ok(())
    }
}

impl ser::SerializeMap for SerializeRecord {
    type Ok = Record;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        // Numeric and boolean keys become their text form, like in a header row.
        match key.serialize(ValueSerializer)?.to_text() {
            Some(text) => {
                self.current_key = Some(text.into_owned());
                Ok(())
            }
            None => Err(Error::custom("record keys cannot be null")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.insert_field(key, value)
    }

    fn end(self) -> Result<Record> {
        Ok(self.record)
    }
}

impl ser::SerializeStruct for SerializeRecord {
    type Ok = Record;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert_field(key.to_string(), value)
    }

    fn end(self) -> Result<Record> {
        Ok(self.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Item {
        sku: String,
        qty: u32,
        price: f64,
        tags: Option<String>,
        kind: Kind,
    }

    #[derive(Serialize)]
    enum Kind {
        Retail,
    }

    #[derive(Serialize)]
    struct Nested {
        id: u32,
        tags: Vec<String>,
    }

    #[test]
    fn test_struct_fields_in_order() {
        let item = Item {
            sku: "A-1".to_string(),
            qty: 3,
            price: 9.5,
            tags: None,
            kind: Kind::Retail,
        };
        let record = item.serialize(RecordSerializer).unwrap();
        assert_eq!(
            record,
            record! { "sku" => "A-1", "qty" => 3, "price" => 9.5, "tags" => null, "kind" => "Retail" }
        );
    }

    #[test]
    fn test_map_keys_become_text() {
        let mut map = BTreeMap::new();
        map.insert(2, "two");
        map.insert(1, "one");
        let record = map.serialize(RecordSerializer).unwrap();
        assert_eq!(record, record! { "1" => "one", "2" => "two" });
    }

    #[test]
    fn test_nested_field_is_rejected() {
        let nested = Nested {
            id: 1,
            tags: vec!["a".to_string()],
        };
        let err = nested.serialize(RecordSerializer).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType(ref msg) if msg.contains("\"tags\"")));
    }

    #[test]
    fn test_scalar_is_not_a_record() {
        assert!(matches!(
            42i32.serialize(RecordSerializer),
            Err(Error::UnsupportedType(_))
        ));
        assert_eq!(Some(7u64).serialize(ValueSerializer).unwrap(), Value::from(7));
        assert_eq!('x'.serialize(ValueSerializer).unwrap(), Value::from("x"));
    }

    #[test]
    fn test_wide_integers_stay_exact() {
        assert_eq!(
            u64::MAX.serialize(ValueSerializer).unwrap(),
            Value::Number(Number::UInteger(u64::MAX))
        );
        assert_eq!((-5i128).serialize(ValueSerializer).unwrap(), Value::from(-5));
        assert_eq!(
            i128::from(u64::MAX).serialize(ValueSerializer).unwrap(),
            Value::Number(Number::UInteger(u64::MAX))
        );
        assert_eq!(
            i128::MIN.serialize(ValueSerializer).unwrap(),
            Value::from(i128::MIN.to_string())
        );
        assert_eq!(
            u128::MAX.serialize(ValueSerializer).unwrap(),
            Value::from(u128::MAX.to_string())
        );
    }
}
