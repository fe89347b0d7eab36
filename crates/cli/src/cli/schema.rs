//! Offline commands around the schema-driven serializer.

use bcs_schema::{Schema, deserialize_by_field, move_struct_validator, serialize_named_fields};
use serde_json::Value;

use crate::error::{CliError, Result};

fn parse_schema(schema: &str) -> Result<Schema> {
    Ok(schema.parse()?)
}

fn parse_value(value: &str) -> Result<Value> {
    serde_json::from_str(value)
        .map_err(|e| CliError::InvalidInput(format!("value is not valid JSON: {}", e)))
}

fn key_refs(keys: &Option<Vec<String>>) -> Option<Vec<&str>> {
    keys.as_ref()
        .map(|keys| keys.iter().map(|k| k.trim()).collect())
}

/// `name: 0x..` lines for the selected fields, in schema order.
fn encode_lines(schema: &Schema, value: &Value, keys: Option<&[&str]>) -> Result<Vec<String>> {
    Ok(serialize_named_fields(value, schema, keys)?
        .into_iter()
        .map(|(name, bytes)| format!("{}: 0x{}", name, hex::encode(bytes)))
        .collect())
}

pub fn handle_encode_command(schema: String, value: String, keys: Option<Vec<String>>) -> Result<()> {
    let schema = parse_schema(&schema)?;
    let value = parse_value(&value)?;
    let keys = key_refs(&keys);

    for line in encode_lines(&schema, &value, keys.as_deref())? {
        println!("{}", line);
    }
    Ok(())
}

pub fn handle_decode_command(
    schema: String,
    fields: Vec<String>,
    keys: Option<Vec<String>>,
) -> Result<()> {
    let schema = parse_schema(&schema)?;
    let keys = key_refs(&keys);
    let fields = fields
        .iter()
        .map(|f| {
            let f = f.trim();
            hex::decode(f.strip_prefix("0x").unwrap_or(f))
                .map_err(|e| CliError::InvalidInput(format!("bad hex '{}': {}", f, e)))
        })
        .collect::<Result<Vec<_>>>()?;

    let decoded = deserialize_by_field(&fields, &schema, keys.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&Value::Object(decoded))?);
    Ok(())
}

pub fn handle_validate_command(schema: String, value: String) -> Result<()> {
    let schema = parse_schema(&schema)?;
    let value = parse_value(&value)?;
    move_struct_validator(&value, &schema)?;
    println!("valid");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_lines_label_each_selected_field() {
        let schema: Schema = "name:string,age:u8,balance:u64".parse().unwrap();
        let value = serde_json::json!({"name": "Bo", "age": 7, "balance": "1"});
        assert_eq!(
            encode_lines(&schema, &value, Some(&["balance", "name"])).unwrap(),
            vec!["name: 0x02426f", "balance: 0x0100000000000000"]
        );
        assert_eq!(encode_lines(&schema, &value, None).unwrap().len(), 3);
        let err = encode_lines(&schema, &value, Some(&["nope"])).unwrap_err();
        assert!(matches!(err, CliError::Schema(_)));
    }

    #[test]
    fn test_encode_rejects_bad_json() {
        let err = handle_encode_command("a:u8".into(), "{not json".into(), None).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }
}
