use serde_json::Value;

use crate::error::{Result, SchemaError};
use crate::field_type::Layout;
use crate::schema::Schema;
use crate::value::MoveValue;

/// Check that `value` is an object that can be constructed as `schema`:
/// every field present, no extra keys, each value fitting its tag.
pub fn move_struct_validator(value: &Value, schema: &Schema) -> Result<()> {
    let object = value.as_object().ok_or(SchemaError::NotAnObject)?;

    if let Some(extra) = object.keys().find(|k| !schema.contains(k)) {
        return Err(SchemaError::UnexpectedField(extra.clone()));
    }
    for (name, ty) in schema.iter() {
        let field = object
            .get(name)
            .ok_or_else(|| SchemaError::MissingField(name.to_string()))?;
        MoveValue::from_json_at(ty, field, name)?;
    }
    Ok(())
}

/// Same check against a struct layout, recursing into nested structs.
pub fn validate_layout(value: &Value, layout: &Layout) -> Result<()> {
    let object = value.as_object().ok_or(SchemaError::NotAnObject)?;
    if let Some(extra) = object.keys().find(|k| layout.get(k).is_none()) {
        return Err(SchemaError::UnexpectedField(extra.clone()));
    }
    MoveValue::from_json(&layout.clone().into_type(), value).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_type::FieldType;
    use serde_json::json;

    #[test]
    fn test_valid_object() {
        let schema: Schema = "name:string,age:u8,friends:vector<address>".parse().unwrap();
        let value = json!({ "name": "Bob", "age": 41, "friends": ["0x1", "0x2"] });
        move_struct_validator(&value, &schema).unwrap();
    }

    #[test]
    fn test_extra_key_rejected() {
        let schema: Schema = "name:string".parse().unwrap();
        let err = move_struct_validator(&json!({ "name": "Bob", "x": 1 }), &schema).unwrap_err();
        assert!(matches!(err, SchemaError::UnexpectedField(k) if k == "x"));
    }

    #[test]
    fn test_nested_layout_path() {
        let inner = Layout::new("0x0::m::Inner").field("v", FieldType::U8);
        let outer = Layout::new("0x0::m::Outer").field("inner", inner.into_type());
        let err = validate_layout(&json!({ "inner": { "v": 300 } }), &outer).unwrap_err();
        assert!(matches!(err, SchemaError::OutOfRange { ref path, .. } if path == "inner.v"));
    }
}
