use prost_types::value::Kind;
use serde_json::{Map, Number, Value};

/// Convert a protobuf `Value` (the gRPC rendering of Move JSON) to serde JSON.
/// Integral numbers are kept as integers.
pub fn proto_to_json(value: &prost_types::Value) -> Value {
    match &value.kind {
        Some(Kind::StringValue(s)) => Value::String(s.clone()),
        Some(Kind::NumberValue(n)) => number_to_json(*n),
        Some(Kind::BoolValue(b)) => Value::Bool(*b),
        Some(Kind::NullValue(_)) | None => Value::Null,
        Some(Kind::ListValue(list)) => Value::Array(list.values.iter().map(proto_to_json).collect()),
        Some(Kind::StructValue(s)) => proto_struct_to_json(s),
    }
}

pub fn proto_struct_to_json(s: &prost_types::Struct) -> Value {
    let map: Map<String, Value> = s
        .fields
        .iter()
        .map(|(k, v)| (k.clone(), proto_to_json(v)))
        .collect();
    Value::Object(map)
}

fn number_to_json(n: f64) -> Value {
    if n.fract() == 0.0 && n >= 0.0 && n <= u64::MAX as f64 {
        Value::Number(Number::from(n as u64))
    } else if n.fract() == 0.0 && n >= i64::MIN as f64 && n < 0.0 {
        Value::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn string(s: &str) -> prost_types::Value {
        prost_types::Value {
            kind: Some(Kind::StringValue(s.to_string())),
        }
    }

    #[test]
    fn test_nested_struct() {
        let mut fields = BTreeMap::new();
        fields.insert("name".to_string(), string("Billy"));
        fields.insert(
            "power_level".to_string(),
            prost_types::Value {
                kind: Some(Kind::NumberValue(9.0)),
            },
        );
        fields.insert(
            "tags".to_string(),
            prost_types::Value {
                kind: Some(Kind::ListValue(prost_types::ListValue {
                    values: vec![string("a")],
                })),
            },
        );
        let value = prost_types::Value {
            kind: Some(Kind::StructValue(prost_types::Struct { fields })),
        };

        assert_eq!(
            proto_to_json(&value),
            json!({ "name": "Billy", "power_level": 9, "tags": ["a"] })
        );
    }

    #[test]
    fn test_fractional_number() {
        let value = prost_types::Value {
            kind: Some(Kind::NumberValue(1.5)),
        };
        assert_eq!(proto_to_json(&value), json!(1.5));
    }
}
