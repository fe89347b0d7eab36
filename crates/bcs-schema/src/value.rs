//! Move values normalised against a [`FieldType`].
//!
//! JSON coming from callers or from Sui RPC responses is loosely typed:
//! `u64` arrives as a number or a decimal string, nested structs may be
//! wrapped in `{ "type", "fields" }`, a `UID` may be a bare hex string.
//! [`MoveValue::from_json`] folds all of that into one exact shape, and the
//! `bcs` crate does the actual encoding through the `Serialize` impl below.
//! Decoding goes the other way through [`TypedSeed`].

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use num_bigint::BigUint;
use serde::de::{self, DeserializeSeed, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, SerializeTuple};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::address::{format_address, parse_address};
use crate::error::{Result, SchemaError};
use crate::field_type::{FieldType, Layout};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveValue {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    /// Little-endian bytes.
    U256([u8; 32]),
    Address([u8; 32]),
    String(String),
    Vector(Vec<MoveValue>),
    Option(Option<Box<MoveValue>>),
    Struct(Vec<(String, MoveValue)>),
}

impl MoveValue {
    pub fn from_json(ty: &FieldType, value: &Value) -> Result<Self> {
        Self::from_json_at(ty, value, "")
    }

    /// Same as [`MoveValue::from_json`], reporting errors relative to `path`.
    pub fn from_json_at(ty: &FieldType, value: &Value, path: &str) -> Result<Self> {
        let mismatch = || SchemaError::TypeMismatch {
            path: path.to_string(),
            expected: ty.to_string(),
        };

        match ty {
            FieldType::Bool => match value {
                Value::Bool(b) => Ok(MoveValue::Bool(*b)),
                Value::String(s) if s == "true" || s == "false" => {
                    Ok(MoveValue::Bool(s == "true"))
                }
                _ => Err(mismatch()),
            },
            FieldType::U8 => narrow(value, path, ty, u8::MAX as u128).map(|v| MoveValue::U8(v as u8)),
            FieldType::U16 => {
                narrow(value, path, ty, u16::MAX as u128).map(|v| MoveValue::U16(v as u16))
            }
            FieldType::U32 => {
                narrow(value, path, ty, u32::MAX as u128).map(|v| MoveValue::U32(v as u32))
            }
            FieldType::U64 => {
                narrow(value, path, ty, u64::MAX as u128).map(|v| MoveValue::U64(v as u64))
            }
            FieldType::U128 => narrow(value, path, ty, u128::MAX).map(MoveValue::U128),
            FieldType::U256 => {
                let big = big_uint(value).ok_or_else(mismatch)?;
                if big.bits() > 256 {
                    return Err(SchemaError::OutOfRange {
                        path: path.to_string(),
                        ty: ty.to_string(),
                    });
                }
                let mut bytes = [0u8; 32];
                let le = big.to_bytes_le();
                bytes[..le.len()].copy_from_slice(&le);
                Ok(MoveValue::U256(bytes))
            }
            FieldType::Address => match value {
                Value::String(s) => parse_address(s).map(MoveValue::Address),
                _ => Err(mismatch()),
            },
            FieldType::String => match value {
                Value::String(s) => Ok(MoveValue::String(s.clone())),
                _ => Err(mismatch()),
            },
            FieldType::Vector(inner) => match value {
                Value::Array(items) => items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| Self::from_json_at(inner, item, &format!("{}[{}]", path, i)))
                    .collect::<Result<Vec<_>>>()
                    .map(MoveValue::Vector),
                Value::String(s) if **inner == FieldType::U8 => {
                    let bytes = decode_byte_string(s).ok_or_else(mismatch)?;
                    Ok(MoveValue::Vector(bytes.into_iter().map(MoveValue::U8).collect()))
                }
                _ => Err(mismatch()),
            },
            FieldType::Option(inner) => match value {
                Value::Null => Ok(MoveValue::Option(None)),
                Value::Object(map) if map.len() == 1 && map.contains_key("vec") => {
                    match map.get("vec") {
                        Some(Value::Array(items)) if items.is_empty() => Ok(MoveValue::Option(None)),
                        Some(Value::Array(items)) if items.len() == 1 => {
                            let v = Self::from_json_at(inner, &items[0], path)?;
                            Ok(MoveValue::Option(Some(Box::new(v))))
                        }
                        _ => Err(mismatch()),
                    }
                }
                other => {
                    let v = Self::from_json_at(inner, other, path)?;
                    Ok(MoveValue::Option(Some(Box::new(v))))
                }
            },
            FieldType::Struct(layout) => struct_from_json(layout, value, path),
        }
    }

    /// JSON view of the value. Integers that do not fit a JSON number
    /// safely (`u64` and wider) are rendered as decimal strings.
    pub fn to_json(&self) -> Value {
        match self {
            MoveValue::Bool(b) => Value::Bool(*b),
            MoveValue::U8(v) => Value::from(*v),
            MoveValue::U16(v) => Value::from(*v),
            MoveValue::U32(v) => Value::from(*v),
            MoveValue::U64(v) => Value::String(v.to_string()),
            MoveValue::U128(v) => Value::String(v.to_string()),
            MoveValue::U256(bytes) => Value::String(BigUint::from_bytes_le(bytes).to_string()),
            MoveValue::Address(bytes) => Value::String(format_address(bytes)),
            MoveValue::String(s) => Value::String(s.clone()),
            MoveValue::Vector(items) => Value::Array(items.iter().map(|i| i.to_json()).collect()),
            MoveValue::Option(None) => Value::Null,
            MoveValue::Option(Some(v)) => v.to_json(),
            MoveValue::Struct(fields) => {
                let mut map = Map::new();
                for (name, v) in fields {
                    map.insert(name.clone(), v.to_json());
                }
                Value::Object(map)
            }
        }
    }
}

fn struct_from_json(layout: &Layout, value: &Value, path: &str) -> Result<MoveValue> {
    let join = |name: &str| {
        if path.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", path, name)
        }
    };

    // JSON-RPC wraps nested structs as { "type": ..., "fields": { ... } }.
    let value = match value {
        Value::Object(map) if map.contains_key("fields") && layout.get("fields").is_none() => {
            &map["fields"]
        }
        other => other,
    };

    match value {
        Value::Object(map) => {
            let mut fields = Vec::with_capacity(layout.fields.len());
            for (name, ty) in &layout.fields {
                let field_path = join(name);
                let field = map
                    .get(name)
                    .ok_or_else(|| SchemaError::MissingField(field_path.clone()))?;
                fields.push((name.clone(), MoveValue::from_json_at(ty, field, &field_path)?));
            }
            Ok(MoveValue::Struct(fields))
        }
        // Single-field wrappers (UID, ID, Balance, TypeName) are flattened by RPC.
        bare if layout.fields.len() == 1 => {
            let (name, ty) = &layout.fields[0];
            let inner = MoveValue::from_json_at(ty, bare, &join(name))?;
            Ok(MoveValue::Struct(vec![(name.clone(), inner)]))
        }
        _ => Err(SchemaError::TypeMismatch {
            path: path.to_string(),
            expected: layout.type_name.clone(),
        }),
    }
}

/// Read an unsigned integer from a number or decimal string and check it
/// against `max`.
fn narrow(value: &Value, path: &str, ty: &FieldType, max: u128) -> Result<u128> {
    let parsed = match value {
        Value::Number(n) => n.as_u64().map(u128::from),
        Value::String(s) => s.trim().parse::<u128>().ok(),
        _ => None,
    };
    let v = match parsed {
        Some(v) => v,
        None => {
            // A well-formed integer that overflowed u128 is a range error.
            if big_uint(value).is_some() {
                return Err(SchemaError::OutOfRange {
                    path: path.to_string(),
                    ty: ty.to_string(),
                });
            }
            return Err(SchemaError::TypeMismatch {
                path: path.to_string(),
                expected: ty.to_string(),
            });
        }
    };
    if v > max {
        return Err(SchemaError::OutOfRange {
            path: path.to_string(),
            ty: ty.to_string(),
        });
    }
    Ok(v)
}

fn big_uint(value: &Value) -> Option<BigUint> {
    match value {
        Value::Number(n) => n.as_u64().map(BigUint::from),
        Value::String(s) => s.trim().parse::<BigUint>().ok(),
        _ => None,
    }
}

/// `vector<u8>` may be given as `0x`-prefixed hex or as base64.
fn decode_byte_string(s: &str) -> Option<Vec<u8>> {
    match s.strip_prefix("0x") {
        Some(hex_str) => hex::decode(hex_str).ok(),
        None => STANDARD.decode(s).ok(),
    }
}

impl Serialize for MoveValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            MoveValue::Bool(b) => serializer.serialize_bool(*b),
            MoveValue::U8(v) => serializer.serialize_u8(*v),
            MoveValue::U16(v) => serializer.serialize_u16(*v),
            MoveValue::U32(v) => serializer.serialize_u32(*v),
            MoveValue::U64(v) => serializer.serialize_u64(*v),
            MoveValue::U128(v) => serializer.serialize_u128(*v),
            // Fixed-size arrays go out as tuples: no length prefix.
            MoveValue::U256(bytes) | MoveValue::Address(bytes) => bytes.serialize(serializer),
            MoveValue::String(s) => serializer.serialize_str(s),
            MoveValue::Vector(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            MoveValue::Option(None) => serializer.serialize_none(),
            MoveValue::Option(Some(v)) => serializer.serialize_some(v.as_ref()),
            MoveValue::Struct(fields) => {
                let mut tuple = serializer.serialize_tuple(fields.len())?;
                for (_, v) in fields {
                    tuple.serialize_element(v)?;
                }
                tuple.end()
            }
        }
    }
}

/// Deserialization seed that reads one value of a known [`FieldType`].
#[derive(Clone, Copy)]
pub struct TypedSeed<'a>(pub &'a FieldType);

impl<'de> DeserializeSeed<'de> for TypedSeed<'_> {
    type Value = MoveValue;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> std::result::Result<MoveValue, D::Error> {
        match self.0 {
            FieldType::Bool => bool::deserialize(deserializer).map(MoveValue::Bool),
            FieldType::U8 => u8::deserialize(deserializer).map(MoveValue::U8),
            FieldType::U16 => u16::deserialize(deserializer).map(MoveValue::U16),
            FieldType::U32 => u32::deserialize(deserializer).map(MoveValue::U32),
            FieldType::U64 => u64::deserialize(deserializer).map(MoveValue::U64),
            FieldType::U128 => u128::deserialize(deserializer).map(MoveValue::U128),
            FieldType::U256 => <[u8; 32]>::deserialize(deserializer).map(MoveValue::U256),
            FieldType::Address => <[u8; 32]>::deserialize(deserializer).map(MoveValue::Address),
            FieldType::String => String::deserialize(deserializer).map(MoveValue::String),
            FieldType::Vector(inner) => deserializer.deserialize_seq(VectorVisitor(inner)),
            FieldType::Option(inner) => deserializer.deserialize_option(OptionVisitor(inner)),
            FieldType::Struct(layout) => {
                deserializer.deserialize_tuple(layout.fields.len(), StructVisitor(layout))
            }
        }
    }
}

const MAX_PREALLOC: usize = 4096;

struct VectorVisitor<'a>(&'a FieldType);

impl<'de> Visitor<'de> for VectorVisitor<'_> {
    type Value = MoveValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vector<{}>", self.0)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<MoveValue, A::Error> {
        // The hint is the length prefix read from the input.
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(MAX_PREALLOC));
        while let Some(item) = seq.next_element_seed(TypedSeed(self.0))? {
            items.push(item);
        }
        Ok(MoveValue::Vector(items))
    }
}

struct OptionVisitor<'a>(&'a FieldType);

impl<'de> Visitor<'de> for OptionVisitor<'_> {
    type Value = MoveValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "option<{}>", self.0)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<MoveValue, E> {
        Ok(MoveValue::Option(None))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> std::result::Result<MoveValue, D::Error> {
        let inner = TypedSeed(self.0).deserialize(deserializer)?;
        Ok(MoveValue::Option(Some(Box::new(inner))))
    }
}

struct StructVisitor<'a>(&'a Layout);

impl<'de> Visitor<'de> for StructVisitor<'_> {
    type Value = MoveValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "struct {}", self.0.type_name)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<MoveValue, A::Error> {
        let mut fields = Vec::with_capacity(self.0.fields.len());
        for (i, (name, ty)) in self.0.fields.iter().enumerate() {
            let v = seq
                .next_element_seed(TypedSeed(ty))?
                .ok_or_else(|| de::Error::invalid_length(i, &self))?;
            fields.push((name.clone(), v));
        }
        Ok(MoveValue::Struct(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn uid_layout() -> Layout {
        let id = Layout::new("0x2::object::ID").field("bytes", FieldType::Address);
        Layout::new("0x2::object::UID").field("id", id.into_type())
    }

    #[test]
    fn test_huge_length_prefix_is_an_error() {
        // ULEB128 for 2^31 - 1 followed by no elements.
        let bytes = [0xff, 0xff, 0xff, 0xff, 0x07];
        let err = bcs::from_bytes_seed(TypedSeed(&FieldType::bytes()), &bytes).unwrap_err();
        assert!(!err.to_string().is_empty());
        let err = bcs::from_bytes_seed(
            TypedSeed(&FieldType::vector(FieldType::String)),
            &bytes,
        )
        .unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_numbers_accept_strings() {
        assert_eq!(
            MoveValue::from_json(&FieldType::U64, &json!("18446744073709551615")).unwrap(),
            MoveValue::U64(u64::MAX)
        );
        assert_eq!(
            MoveValue::from_json(&FieldType::U16, &json!(513)).unwrap(),
            MoveValue::U16(513)
        );
    }

    #[test]
    fn test_range_errors() {
        let err = MoveValue::from_json_at(&FieldType::U8, &json!(256), "age").unwrap_err();
        assert!(matches!(err, SchemaError::OutOfRange { ref path, .. } if path == "age"));
        let err = MoveValue::from_json(&FieldType::U128, &json!("340282366920938463463374607431768211456"))
            .unwrap_err();
        assert!(matches!(err, SchemaError::OutOfRange { .. }));
        let err = MoveValue::from_json(&FieldType::U32, &json!(-1)).unwrap_err();
        assert!(matches!(err, SchemaError::TypeMismatch { .. }));
    }

    #[test]
    fn test_bare_uid_is_unwrapped() {
        let value = MoveValue::from_json(&uid_layout().into_type(), &json!("0x5")).unwrap();
        let bytes = bcs::to_bytes(&value).unwrap();
        assert_eq!(bytes.len(), 32);
        assert_eq!(bytes[31], 5);
    }

    #[test]
    fn test_rpc_wrapped_struct() {
        let layout = Layout::new("0x2::balance::Balance").field("value", FieldType::U64);
        let wrapped = json!({ "type": "0x2::balance::Balance<0x2::sui::SUI>", "fields": { "value": "7" } });
        assert_eq!(
            MoveValue::from_json(&layout.into_type(), &wrapped).unwrap(),
            MoveValue::Struct(vec![("value".to_string(), MoveValue::U64(7))])
        );
    }

    #[test]
    fn test_option_vec_shape() {
        let ty = FieldType::option(FieldType::U8);
        assert_eq!(
            MoveValue::from_json(&ty, &json!({ "vec": [] })).unwrap(),
            MoveValue::Option(None)
        );
        assert_eq!(
            MoveValue::from_json(&ty, &json!({ "vec": [3] })).unwrap(),
            MoveValue::Option(Some(Box::new(MoveValue::U8(3))))
        );
    }

    #[test]
    fn test_byte_vector_from_hex_and_base64() {
        let ty = FieldType::bytes();
        let from_hex = MoveValue::from_json(&ty, &json!("0x0102")).unwrap();
        let from_b64 = MoveValue::from_json(&ty, &json!("AQI=")).unwrap();
        assert_eq!(from_hex, from_b64);
        assert_eq!(bcs::to_bytes(&from_hex).unwrap(), vec![2, 1, 2]);
    }

    #[test]
    fn test_struct_decodes_through_seed() {
        let layout = Layout::new("0x0::m::Pair")
            .field("a", FieldType::U8)
            .field("b", FieldType::option(FieldType::String));
        let ty = layout.into_type();
        let value = bcs::from_bytes_seed(TypedSeed(&ty), &[9, 1, 2, b'h', b'i']).unwrap();
        assert_eq!(value.to_json(), json!({ "a": 9, "b": "hi" }));
    }
}
