use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SchemaError};
use crate::field_type::FieldType;

/// Flat record schema: field names mapped to type tags, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<(String, FieldType)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form. A name that is already present keeps its position and
    /// takes the new type.
    pub fn field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = ty,
            None => self.fields.push((name, ty)),
        }
        self
    }

    /// Append a field, rejecting a name that is already present.
    pub fn try_field(mut self, name: impl Into<String>, ty: FieldType) -> Result<Self> {
        let name = name.into();
        if self.contains(&name) {
            return Err(SchemaError::DuplicateField(name));
        }
        self.fields.push((name, ty));
        Ok(self)
    }

    /// Build from `(name, tag)` pairs, e.g. `[("name", "string"), ("age", "u8")]`.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut schema = Schema::new();
        for (name, tag) in pairs {
            schema = schema.try_field(name, tag.parse()?)?;
        }
        Ok(schema)
    }

    pub fn get(&self, name: &str) -> Option<&FieldType> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldType)> {
        self.fields.iter().map(|(n, t)| (n.as_str(), t))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Parses `name:tag,name:tag`. Commas nested in `<...>` belong to the tag.
impl FromStr for Schema {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self> {
        let mut schema = Schema::new();
        for entry in split_top_level(s) {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let (name, tag) = entry
                .split_once(':')
                .ok_or_else(|| SchemaError::UnknownType(entry.to_string()))?;
            schema = schema.try_field(name.trim(), tag.parse()?)?;
        }
        Ok(schema)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<String> = self
            .fields
            .iter()
            .map(|(n, t)| format!("{}:{}", n, t))
            .collect();
        write!(f, "{}", entries.join(","))
    }
}

fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_schema_string() {
        let schema: Schema = "name:string, age:u8, tags:vector<string>".parse().unwrap();
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["name", "age", "tags"]);
        assert_eq!(schema.get("tags"), Some(&FieldType::vector(FieldType::String)));
        assert_eq!(schema.to_string(), "name:string,age:u8,tags:vector<string>");
    }

    #[test]
    fn test_from_pairs_keeps_order() {
        let schema = Schema::from_pairs([("b", "u64"), ("a", "bool")]).unwrap();
        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert!(schema.contains("a"));
        assert!(!schema.contains("c"));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let err = "a:u8,a:u16".parse::<Schema>().unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateField(ref n) if n == "a"));
        let err = Schema::from_pairs([("a", "u8"), ("b", "bool"), ("a", "u8")]).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateField(ref n) if n == "a"));
        let schema = Schema::new().try_field("x", FieldType::U8).unwrap();
        assert!(schema.try_field("x", FieldType::U8).is_err());
    }

    #[test]
    fn test_builder_field_replaces_in_place() {
        let schema = Schema::new()
            .field("a", FieldType::U8)
            .field("b", FieldType::Bool)
            .field("a", FieldType::U16);
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(schema.get("a"), Some(&FieldType::U16));
    }

    #[test]
    fn test_rejects_malformed_entries() {
        assert!("name".parse::<Schema>().is_err());
        assert!("name:u9".parse::<Schema>().is_err());
    }
}
