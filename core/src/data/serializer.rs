/*
 * serializer.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * This file is part of Segnaposto, a URI template and data-binding library.
 *
 * Segnaposto is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Segnaposto is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Segnaposto.  If not, see <http://www.gnu.org/licenses/>.
 */

//! serde `Serializer` that projects any `Serialize` type into a [`Value`].
//!
//! Structs become maps ordered by ascending field name (stable, so ties keep declaration
//! order); maps keep the order in which their entries were serialized. Null entries
//! (`None`, unit) are dropped from both.

use serde::ser::{self, Impossible, Serialize, Serializer};

use super::error::DataError;
use super::param_map::ParamMap;
use super::value::Value;

/// Serializer producing a [`Value`]. `depth` counts enclosing containers.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ValueSerializer {
    depth: usize,
    max_depth: usize,
}

impl ValueSerializer {
    pub(crate) fn new(max_depth: usize) -> Self {
        Self {
            depth: 0,
            max_depth,
        }
    }

    fn enter(self) -> Result<ValueSerializer, DataError> {
        if self.depth >= self.max_depth {
            return Err(DataError::DepthExceeded(self.max_depth));
        }
        Ok(ValueSerializer {
            depth: self.depth + 1,
            max_depth: self.max_depth,
        })
    }
}

fn single_entry(key: &str, value: Value) -> Value {
    let mut map = ParamMap::with_capacity(1);
    if !value.is_null() {
        map.insert(key, value);
    }
    Value::Map(map)
}

impl Serializer for ValueSerializer {
    type Ok = Value;
    type Error = DataError;
    type SerializeSeq = SeqSerializer;
    type SerializeTuple = SeqSerializer;
    type SerializeTupleStruct = SeqSerializer;
    type SerializeTupleVariant = TupleVariantSerializer;
    type SerializeMap = MapSerializer;
    type SerializeStruct = StructSerializer;
    type SerializeStructVariant = StructVariantSerializer;

    fn serialize_bool(self, v: bool) -> Result<Value, DataError> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, DataError> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<Value, DataError> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<Value, DataError> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<Value, DataError> {
        Ok(Value::Int(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value, DataError> {
        Ok(Value::UInt(u64::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<Value, DataError> {
        Ok(Value::UInt(u64::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<Value, DataError> {
        Ok(Value::UInt(u64::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<Value, DataError> {
        Ok(Value::UInt(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Value, DataError> {
        // Go through the f32 shortest form so 0.1f32 renders as "0.1", not its f64 widening.
        let widened = v.to_string().parse::<f64>().unwrap_or_else(|_| f64::from(v));
        Ok(Value::Float(widened))
    }

    fn serialize_f64(self, v: f64) -> Result<Value, DataError> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value, DataError> {
        Ok(Value::Char(v))
    }

    fn serialize_str(self, v: &str) -> Result<Value, DataError> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value, DataError> {
        self.enter()?;
        Ok(Value::List(v.iter().map(|b| Value::UInt(u64::from(*b))).collect()))
    }

    fn serialize_none(self) -> Result<Value, DataError> {
        Ok(Value::Null)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Value, DataError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value, DataError> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value, DataError> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value, DataError> {
        Ok(Value::Enum(variant.to_string()))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Value, DataError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value, DataError> {
        let inner = value.serialize(self.enter()?)?;
        Ok(single_entry(variant, inner))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqSerializer, DataError> {
        Ok(SeqSerializer {
            ser: self.enter()?,
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqSerializer, DataError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SeqSerializer, DataError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<TupleVariantSerializer, DataError> {
        Ok(TupleVariantSerializer {
            variant,
            seq: self.enter()?.serialize_seq(Some(len))?,
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<MapSerializer, DataError> {
        Ok(MapSerializer {
            ser: self.enter()?,
            map: ParamMap::with_capacity(len.unwrap_or(0)),
            next_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<StructSerializer, DataError> {
        Ok(StructSerializer {
            ser: self.enter()?,
            map: ParamMap::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<StructVariantSerializer, DataError> {
        Ok(StructVariantSerializer {
            variant,
            inner: self.enter()?.serialize_struct(variant, len)?,
        })
    }
}

pub(crate) struct SeqSerializer {
    ser: ValueSerializer,
    items: Vec<Value>,
}

impl SeqSerializer {
    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), DataError> {
        self.items.push(value.serialize(self.ser)?);
        Ok(())
    }
}

impl ser::SerializeSeq for SeqSerializer {
    type Ok = Value;
    type Error = DataError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), DataError> {
        self.push(value)
    }

    fn end(self) -> Result<Value, DataError> {
        Ok(Value::List(self.items))
    }
}

impl ser::SerializeTuple for SeqSerializer {
    type Ok = Value;
    type Error = DataError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), DataError> {
        self.push(value)
    }

    fn end(self) -> Result<Value, DataError> {
        Ok(Value::List(self.items))
    }
}

impl ser::SerializeTupleStruct for SeqSerializer {
    type Ok = Value;
    type Error = DataError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), DataError> {
        self.push(value)
    }

    fn end(self) -> Result<Value, DataError> {
        Ok(Value::List(self.items))
    }
}

pub(crate) struct TupleVariantSerializer {
    variant: &'static str,
    seq: SeqSerializer,
}

impl ser::SerializeTupleVariant for TupleVariantSerializer {
    type Ok = Value;
    type Error = DataError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), DataError> {
        self.seq.push(value)
    }

    fn end(self) -> Result<Value, DataError> {
        Ok(single_entry(self.variant, Value::List(self.seq.items)))
    }
}

pub(crate) struct MapSerializer {
    ser: ValueSerializer,
    map: ParamMap,
    next_key: Option<String>,
}

impl ser::SerializeMap for MapSerializer {
    type Ok = Value;
    type Error = DataError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), DataError> {
        self.next_key = Some(key.serialize(MapKeySerializer)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), DataError> {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| DataError::Custom("map value serialized before its key".into()))?;
        let value = value.serialize(self.ser)?;
        if !value.is_null() {
            self.map.insert(key, value);
        }
        Ok(())
    }

    fn end(self) -> Result<Value, DataError> {
        Ok(Value::Map(self.map))
    }
}

pub(crate) struct StructSerializer {
    ser: ValueSerializer,
    map: ParamMap,
}

impl ser::SerializeStruct for StructSerializer {
    type Ok = Value;
    type Error = DataError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), DataError> {
        let value = value.serialize(self.ser)?;
        if !value.is_null() {
            self.map.insert(key, value);
        }
        Ok(())
    }

    fn end(mut self) -> Result<Value, DataError> {
        self.map.sort_by_key();
        Ok(Value::Map(self.map))
    }
}

pub(crate) struct StructVariantSerializer {
    variant: &'static str,
    inner: StructSerializer,
}

impl ser::SerializeStructVariant for StructVariantSerializer {
    type Ok = Value;
    type Error = DataError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), DataError> {
        ser::SerializeStruct::serialize_field(&mut self.inner, key, value)
    }

    fn end(self) -> Result<Value, DataError> {
        let fields = ser::SerializeStruct::end(self.inner)?;
        Ok(single_entry(self.variant, fields))
    }
}

/// Map keys must render as plain strings.
struct MapKeySerializer;

impl Serializer for MapKeySerializer {
    type Ok = String;
    type Error = DataError;
    type SerializeSeq = Impossible<String, DataError>;
    type SerializeTuple = Impossible<String, DataError>;
    type SerializeTupleStruct = Impossible<String, DataError>;
    type SerializeTupleVariant = Impossible<String, DataError>;
    type SerializeMap = Impossible<String, DataError>;
    type SerializeStruct = Impossible<String, DataError>;
    type SerializeStructVariant = Impossible<String, DataError>;

    fn serialize_bool(self, v: bool) -> Result<String, DataError> {
        Ok(v.to_string())
    }

    fn serialize_i8(self, v: i8) -> Result<String, DataError> {
        Ok(v.to_string())
    }

    fn serialize_i16(self, v: i16) -> Result<String, DataError> {
        Ok(v.to_string())
    }

    fn serialize_i32(self, v: i32) -> Result<String, DataError> {
        Ok(v.to_string())
    }

    fn serialize_i64(self, v: i64) -> Result<String, DataError> {
        Ok(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<String, DataError> {
        Ok(v.to_string())
    }

    fn serialize_u16(self, v: u16) -> Result<String, DataError> {
        Ok(v.to_string())
    }

    fn serialize_u32(self, v: u32) -> Result<String, DataError> {
        Ok(v.to_string())
    }

    fn serialize_u64(self, v: u64) -> Result<String, DataError> {
        Ok(v.to_string())
    }

    fn serialize_f32(self, v: f32) -> Result<String, DataError> {
        Ok(v.to_string())
    }

    fn serialize_f64(self, v: f64) -> Result<String, DataError> {
        Ok(v.to_string())
    }

    fn serialize_char(self, v: char) -> Result<String, DataError> {
        Ok(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<String, DataError> {
        Ok(v.to_string())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String, DataError> {
        Err(DataError::KeyMustBeScalar)
    }

    fn serialize_none(self) -> Result<String, DataError> {
        Err(DataError::KeyMustBeScalar)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<String, DataError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<String, DataError> {
        Err(DataError::KeyMustBeScalar)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String, DataError> {
        Err(DataError::KeyMustBeScalar)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String, DataError> {
        Ok(variant.to_string())
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<String, DataError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String, DataError> {
        Err(DataError::KeyMustBeScalar)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, DataError> {
        Err(DataError::KeyMustBeScalar)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, DataError> {
        Err(DataError::KeyMustBeScalar)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, DataError> {
        Err(DataError::KeyMustBeScalar)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, DataError> {
        Err(DataError::KeyMustBeScalar)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, DataError> {
        Err(DataError::KeyMustBeScalar)
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, DataError> {
        Err(DataError::KeyMustBeScalar)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, DataError> {
        Err(DataError::KeyMustBeScalar)
    }
}
