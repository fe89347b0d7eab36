//! Field-by-field codec over a flat [`Schema`].

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::field_type::FieldType;
use crate::schema::Schema;
use crate::value::{MoveValue, TypedSeed};

/// Encode the selected fields of `value`, one byte array per field, in schema
/// order. With `keys == None` every schema field is selected.
///
/// Keys in `value` that the schema does not know are ignored; a selected key
/// the schema does not know is an error.
pub fn serialize_by_field(
    value: &Value,
    schema: &Schema,
    keys: Option<&[&str]>,
) -> Result<Vec<Vec<u8>>> {
    Ok(serialize_named_fields(value, schema, keys)?
        .into_iter()
        .map(|(_, bytes)| bytes)
        .collect())
}

/// Same as [`serialize_by_field`], with each byte array paired with its field
/// name.
pub fn serialize_named_fields<'a>(
    value: &Value,
    schema: &'a Schema,
    keys: Option<&[&str]>,
) -> Result<Vec<(&'a str, Vec<u8>)>> {
    let object = value.as_object().ok_or(SchemaError::NotAnObject)?;
    check_keys(schema, keys)?;

    let mut out = Vec::new();
    for (name, ty) in selected_fields(schema, keys) {
        let field = object
            .get(name)
            .ok_or_else(|| SchemaError::MissingField(name.to_string()))?;
        let bytes = bcs::to_bytes(&MoveValue::from_json_at(ty, field, name)?)?;
        debug!("Encoded field {} ({}) to {} bytes", name, ty, bytes.len());
        out.push((name, bytes));
    }
    Ok(out)
}

/// Inverse of [`serialize_by_field`]: `fields` must hold exactly one byte array
/// per selected schema field, in schema order.
pub fn deserialize_by_field(
    fields: &[Vec<u8>],
    schema: &Schema,
    keys: Option<&[&str]>,
) -> Result<Map<String, Value>> {
    check_keys(schema, keys)?;
    let selected: Vec<_> = selected_fields(schema, keys).collect();
    if selected.len() != fields.len() {
        return Err(SchemaError::FieldCountMismatch {
            expected: selected.len(),
            found: fields.len(),
        });
    }

    let mut map = Map::new();
    for ((name, ty), bytes) in selected.into_iter().zip(fields) {
        map.insert(name.to_string(), decode_value(ty, bytes)?);
    }
    Ok(map)
}

/// Encode a single JSON value against `ty`.
pub fn encode_value(ty: &FieldType, value: &Value) -> Result<Vec<u8>> {
    Ok(bcs::to_bytes(&MoveValue::from_json(ty, value)?)?)
}

/// Decode a single value of type `ty`. Trailing bytes are rejected.
pub fn decode_value(ty: &FieldType, bytes: &[u8]) -> Result<Value> {
    decode_move_value(ty, bytes).map(|v| v.to_json())
}

pub fn decode_move_value(ty: &FieldType, bytes: &[u8]) -> Result<MoveValue> {
    Ok(bcs::from_bytes_seed(TypedSeed(ty), bytes)?)
}

fn check_keys(schema: &Schema, keys: Option<&[&str]>) -> Result<()> {
    if let Some(keys) = keys {
        if let Some(unknown) = keys.iter().find(|k| !schema.contains(k)) {
            return Err(SchemaError::UnexpectedField(unknown.to_string()));
        }
    }
    Ok(())
}

/// Fields picked by `keys`, in schema order. `None` selects every field.
/// Keys the schema does not know are skipped here and rejected by the codec.
pub fn selected_fields<'a, 'k>(
    schema: &'a Schema,
    keys: Option<&'k [&'k str]>,
) -> impl Iterator<Item = (&'a str, &'a FieldType)> {
    schema
        .iter()
        .filter(move |(name, _)| keys.is_none_or(|keys| keys.iter().any(|k| k == name)))
}
