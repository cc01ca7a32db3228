//! A snapshot of a live instance in serde's data model.
//!
//! Binding defaults needs two distinctions that a JSON value folds away:
//! an option holding a zero value is set while `None` is not, and a record
//! recurses into nested properties while a map renders as text. Serializing
//! into [`LiveValue`] keeps both, along with record field order.

use serde::ser::{self, Serialize};
use std::fmt;

/// One value of a serialized live instance.
#[derive(Debug, Clone, PartialEq)]
pub enum LiveValue {
    /// `()`, unit structs and other valueless data.
    Unit,
    None,
    Some(Box<LiveValue>),
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    Char(char),
    String(String),
    Bytes(Vec<u8>),
    /// Sequences, tuples and tuple structs.
    Seq(Vec<LiveValue>),
    /// Maps, in serialization order.
    Map(Vec<(LiveValue, LiveValue)>),
    /// Records, in field declaration order.
    Struct(Vec<(String, LiveValue)>),
}

/// A live instance refused to serialize.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct SerializeError(String);

impl ser::Error for SerializeError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        SerializeError(msg.to_string())
    }
}

/// Serializes `value` into a [`LiveValue`].
pub fn to_live_value<T: Serialize + ?Sized>(value: &T) -> Result<LiveValue, SerializeError> {
    value.serialize(LiveValueSerializer)
}

impl LiveValue {
    /// Returns true for values that carry no default worth documenting.
    ///
    /// `Some` is never zero, whatever it holds. Records are zero when every
    /// field is zero.
    pub fn is_zero(&self) -> bool {
        match self {
            LiveValue::Unit | LiveValue::None => true,
            LiveValue::Some(_) => false,
            LiveValue::Bool(b) => !b,
            LiveValue::I64(n) => *n == 0,
            LiveValue::U64(n) => *n == 0,
            LiveValue::F64(n) => *n == 0.0,
            LiveValue::Char(c) => *c == '\0',
            LiveValue::String(s) => s.is_empty(),
            LiveValue::Bytes(b) => b.is_empty(),
            LiveValue::Seq(items) => items.is_empty(),
            LiveValue::Map(entries) => entries.is_empty(),
            LiveValue::Struct(fields) => fields.iter().all(|(_, v)| v.is_zero()),
        }
    }

    /// Strips one level of `Some`.
    pub fn unwrap_option(&self) -> &LiveValue {
        match self {
            LiveValue::Some(inner) => inner,
            other => other,
        }
    }

    /// Looks up a record field, or a map entry with a string key.
    pub fn field(&self, name: &str) -> Option<&LiveValue> {
        match self {
            LiveValue::Struct(fields) => fields.iter().find(|(k, _)| k == name).map(|(_, v)| v),
            LiveValue::Map(entries) => entries
                .iter()
                .find(|(k, _)| matches!(k, LiveValue::String(s) if s == name))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Returns true for values whose fields can be looked up by name.
    pub fn has_fields(&self) -> bool {
        matches!(self, LiveValue::Struct(_) | LiveValue::Map(_))
    }
}

/// Renders like Go's `%v`: lists as `[a b]`, records as `{a b}` and maps as
/// `map[k:v]` with entries sorted by key.
impl fmt::Display for LiveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiveValue::Unit | LiveValue::None => f.write_str("<nil>"),
            LiveValue::Some(inner) => write!(f, "{}", inner),
            LiveValue::Bool(b) => write!(f, "{}", b),
            LiveValue::I64(n) => write!(f, "{}", n),
            LiveValue::U64(n) => write!(f, "{}", n),
            LiveValue::F64(n) => write!(f, "{}", n),
            LiveValue::Char(c) => write!(f, "{}", c),
            LiveValue::String(s) => f.write_str(s),
            LiveValue::Bytes(bytes) => {
                let body: Vec<String> = bytes.iter().map(u8::to_string).collect();
                write!(f, "[{}]", body.join(" "))
            }
            LiveValue::Seq(items) => {
                let body: Vec<String> = items.iter().map(LiveValue::to_string).collect();
                write!(f, "[{}]", body.join(" "))
            }
            LiveValue::Struct(fields) => {
                let body: Vec<String> = fields.iter().map(|(_, v)| v.to_string()).collect();
                write!(f, "{{{}}}", body.join(" "))
            }
            LiveValue::Map(entries) => {
                let mut body: Vec<(String, String)> = entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                body.sort();
                let body: Vec<String> = body.into_iter().map(|(k, v)| format!("{}:{}", k, v)).collect();
                write!(f, "map[{}]", body.join(" "))
            }
        }
    }
}

#[derive(Clone, Copy)]
struct LiveValueSerializer;

impl ser::Serializer for LiveValueSerializer {
    type Ok = LiveValue;
    type Error = SerializeError;
    type SerializeSeq = SeqBuilder;
    type SerializeTuple = SeqBuilder;
    type SerializeTupleStruct = SeqBuilder;
    type SerializeTupleVariant = SeqBuilder;
    type SerializeMap = MapBuilder;
    type SerializeStruct = StructBuilder;
    type SerializeStructVariant = StructBuilder;

    fn serialize_bool(self, v: bool) -> Result<LiveValue, SerializeError> {
        Ok(LiveValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<LiveValue, SerializeError> {
        Ok(LiveValue::I64(v.into()))
    }

    fn serialize_i16(self, v: i16) -> Result<LiveValue, SerializeError> {
        Ok(LiveValue::I64(v.into()))
    }

    fn serialize_i32(self, v: i32) -> Result<LiveValue, SerializeError> {
        Ok(LiveValue::I64(v.into()))
    }

    fn serialize_i64(self, v: i64) -> Result<LiveValue, SerializeError> {
        Ok(LiveValue::I64(v))
    }

    fn serialize_u8(self, v: u8) -> Result<LiveValue, SerializeError> {
        Ok(LiveValue::U64(v.into()))
    }

    fn serialize_u16(self, v: u16) -> Result<LiveValue, SerializeError> {
        Ok(LiveValue::U64(v.into()))
    }

    fn serialize_u32(self, v: u32) -> Result<LiveValue, SerializeError> {
        Ok(LiveValue::U64(v.into()))
    }

    fn serialize_u64(self, v: u64) -> Result<LiveValue, SerializeError> {
        Ok(LiveValue::U64(v))
    }

    fn serialize_f32(self, v: f32) -> Result<LiveValue, SerializeError> {
        Ok(LiveValue::F64(v.into()))
    }

    fn serialize_f64(self, v: f64) -> Result<LiveValue, SerializeError> {
        Ok(LiveValue::F64(v))
    }

    fn serialize_char(self, v: char) -> Result<LiveValue, SerializeError> {
        Ok(LiveValue::Char(v))
    }

    fn serialize_str(self, v: &str) -> Result<LiveValue, SerializeError> {
        Ok(LiveValue::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<LiveValue, SerializeError> {
        Ok(LiveValue::Bytes(v.to_vec()))
    }

    fn serialize_none(self) -> Result<LiveValue, SerializeError> {
        Ok(LiveValue::None)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<LiveValue, SerializeError> {
        Ok(LiveValue::Some(Box::new(value.serialize(self)?)))
    }

    fn serialize_unit(self) -> Result<LiveValue, SerializeError> {
        Ok(LiveValue::Unit)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<LiveValue, SerializeError> {
        Ok(LiveValue::Unit)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<LiveValue, SerializeError> {
        Ok(LiveValue::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<LiveValue, SerializeError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Result<LiveValue, SerializeError> {
        value.serialize(self)
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqBuilder, SerializeError> {
        Ok(SeqBuilder::with_capacity(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqBuilder, SerializeError> {
        Ok(SeqBuilder::with_capacity(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SeqBuilder, SerializeError> {
        Ok(SeqBuilder::with_capacity(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        len: usize,
    ) -> Result<SeqBuilder, SerializeError> {
        Ok(SeqBuilder::with_capacity(len))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<MapBuilder, SerializeError> {
        Ok(MapBuilder {
            entries: Vec::with_capacity(len.unwrap_or(0)),
            pending_key: None,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<StructBuilder, SerializeError> {
        Ok(StructBuilder {
            fields: Vec::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        len: usize,
    ) -> Result<StructBuilder, SerializeError> {
        Ok(StructBuilder {
            fields: Vec::with_capacity(len),
        })
    }
}

struct SeqBuilder {
    items: Vec<LiveValue>,
}

impl SeqBuilder {
    fn with_capacity(len: usize) -> Self {
        Self {
            items: Vec::with_capacity(len),
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), SerializeError> {
        self.items.push(value.serialize(LiveValueSerializer)?);
        Ok(())
    }
}

impl ser::SerializeSeq for SeqBuilder {
    type Ok = LiveValue;
    type Error = SerializeError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), SerializeError> {
        self.push(value)
    }

    fn end(self) -> Result<LiveValue, SerializeError> {
        Ok(LiveValue::Seq(self.items))
    }
}

impl ser::SerializeTuple for SeqBuilder {
    type Ok = LiveValue;
    type Error = SerializeError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), SerializeError> {
        self.push(value)
    }

    fn end(self) -> Result<LiveValue, SerializeError> {
        Ok(LiveValue::Seq(self.items))
    }
}

impl ser::SerializeTupleStruct for SeqBuilder {
    type Ok = LiveValue;
    type Error = SerializeError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), SerializeError> {
        self.push(value)
    }

    fn end(self) -> Result<LiveValue, SerializeError> {
        Ok(LiveValue::Seq(self.items))
    }
}

impl ser::SerializeTupleVariant for SeqBuilder {
    type Ok = LiveValue;
    type Error = SerializeError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), SerializeError> {
        self.push(value)
    }

    fn end(self) -> Result<LiveValue, SerializeError> {
        Ok(LiveValue::Seq(self.items))
    }
}

struct MapBuilder {
    entries: Vec<(LiveValue, LiveValue)>,
    pending_key: Option<LiveValue>,
}

impl ser::SerializeMap for MapBuilder {
    type Ok = LiveValue;
    type Error = SerializeError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), SerializeError> {
        self.pending_key = Some(key.serialize(LiveValueSerializer)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), SerializeError> {
        let Some(key) = self.pending_key.take() else {
            return Err(ser::Error::custom("map value serialized before its key"));
        };
        self.entries.push((key, value.serialize(LiveValueSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<LiveValue, SerializeError> {
        Ok(LiveValue::Map(self.entries))
    }
}

struct StructBuilder {
    fields: Vec<(String, LiveValue)>,
}

impl ser::SerializeStruct for StructBuilder {
    type Ok = LiveValue;
    type Error = SerializeError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), SerializeError> {
        self.fields
            .push((key.to_string(), value.serialize(LiveValueSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<LiveValue, SerializeError> {
        Ok(LiveValue::Struct(self.fields))
    }
}

impl ser::SerializeStructVariant for StructBuilder {
    type Ok = LiveValue;
    type Error = SerializeError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), SerializeError> {
        self.fields
            .push((key.to_string(), value.serialize(LiveValueSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<LiveValue, SerializeError> {
        Ok(LiveValue::Struct(self.fields))
    }
}
