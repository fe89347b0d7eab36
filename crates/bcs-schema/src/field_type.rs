//! Type tags understood by the schema codec.
//!
//! The textual form follows the Move spelling used in generated bindings:
//! `u8`, `u64`, `address`, `string`, `vector<T>`, `option<T>`. The fully
//! qualified std spellings (`0x1::string::String`, `0x1::option::Option<T>`)
//! are accepted as aliases.

use std::fmt;
use std::str::FromStr;

use crate::address::normalize_address;
use crate::error::{Result, SchemaError};

const STD_ADDRESS: &str = "0x0000000000000000000000000000000000000000000000000000000000000001";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Bool,
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
    Address,
    String,
    Vector(Box<FieldType>),
    Option(Box<FieldType>),
    Struct(Layout),
}

impl FieldType {
    pub fn vector(inner: FieldType) -> Self {
        FieldType::Vector(Box::new(inner))
    }

    pub fn option(inner: FieldType) -> Self {
        FieldType::Option(Box::new(inner))
    }

    /// Byte vector, the most common `vector<T>` instantiation.
    pub fn bytes() -> Self {
        FieldType::vector(FieldType::U8)
    }

    /// True for everything except struct layouts.
    pub fn is_primitive(&self) -> bool {
        match self {
            FieldType::Struct(_) => false,
            FieldType::Vector(inner) | FieldType::Option(inner) => inner.is_primitive(),
            _ => true,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Bool => write!(f, "bool"),
            FieldType::U8 => write!(f, "u8"),
            FieldType::U16 => write!(f, "u16"),
            FieldType::U32 => write!(f, "u32"),
            FieldType::U64 => write!(f, "u64"),
            FieldType::U128 => write!(f, "u128"),
            FieldType::U256 => write!(f, "u256"),
            FieldType::Address => write!(f, "address"),
            FieldType::String => write!(f, "string"),
            FieldType::Vector(inner) => write!(f, "vector<{}>", inner),
            FieldType::Option(inner) => write!(f, "option<{}>", inner),
            FieldType::Struct(layout) => write!(f, "{}", layout.type_name),
        }
    }
}

impl FromStr for FieldType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim();
        let unknown = || SchemaError::UnknownType(s.to_string());

        if let Some((head, inner)) = split_generic(tag) {
            let inner: FieldType = inner.parse().map_err(|_| unknown())?;
            return match canonical_head(head).as_deref() {
                Some("vector") => Ok(FieldType::vector(inner)),
                Some("option") => Ok(FieldType::option(inner)),
                _ => Err(unknown()),
            };
        }

        match canonical_head(tag).as_deref() {
            Some("bool") => Ok(FieldType::Bool),
            Some("u8") => Ok(FieldType::U8),
            Some("u16") => Ok(FieldType::U16),
            Some("u32") => Ok(FieldType::U32),
            Some("u64") => Ok(FieldType::U64),
            Some("u128") => Ok(FieldType::U128),
            Some("u256") => Ok(FieldType::U256),
            Some("address") => Ok(FieldType::Address),
            Some("string") => Ok(FieldType::String),
            _ => Err(unknown()),
        }
    }
}

/// Split `head<inner>` into its parts. The inner part may itself be generic.
fn split_generic(tag: &str) -> Option<(&str, &str)> {
    let open = tag.find('<')?;
    let inner = tag[open + 1..].strip_suffix('>')?;
    Some((tag[..open].trim(), inner.trim()))
}

/// Map a type head to the short tag. Std-qualified names resolve only when
/// their address is `0x1`.
fn canonical_head(head: &str) -> Option<String> {
    let parts: Vec<&str> = head.split("::").collect();
    match parts.as_slice() {
        [single] => Some(single.to_ascii_lowercase()),
        [address, module, name] => {
            let address = normalize_address(address).ok()?;
            if address != STD_ADDRESS {
                return None;
            }
            match (*module, *name) {
                ("string", "String") | ("ascii", "String") => Some("string".to_string()),
                ("option", "Option") => Some("option".to_string()),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Ordered field layout of a Move struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub type_name: String,
    pub fields: Vec<(String, FieldType)>,
}

impl Layout {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.fields.push((name.into(), ty));
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldType> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    pub fn into_type(self) -> FieldType {
        FieldType::Struct(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_primitives() {
        assert_eq!("u8".parse::<FieldType>().unwrap(), FieldType::U8);
        assert_eq!(" u256 ".parse::<FieldType>().unwrap(), FieldType::U256);
        assert_eq!("Address".parse::<FieldType>().unwrap(), FieldType::Address);
        assert_eq!("string".parse::<FieldType>().unwrap(), FieldType::String);
    }

    #[test]
    fn test_parse_combinators() {
        assert_eq!(
            "vector<option<u64>>".parse::<FieldType>().unwrap(),
            FieldType::vector(FieldType::option(FieldType::U64))
        );
        assert_eq!(
            "0x1::option::Option<0x1::string::String>"
                .parse::<FieldType>()
                .unwrap(),
            FieldType::option(FieldType::String)
        );
        assert_eq!(
            "0x1::ascii::String".parse::<FieldType>().unwrap(),
            FieldType::String
        );
    }

    #[test]
    fn test_rejects_unknown_tags() {
        assert!("u7".parse::<FieldType>().is_err());
        assert!("vector<u7>".parse::<FieldType>().is_err());
        assert!("map<u8>".parse::<FieldType>().is_err());
        assert!("0x2::string::String".parse::<FieldType>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for tag in ["bool", "u128", "vector<vector<u8>>", "option<address>"] {
            assert_eq!(tag.parse::<FieldType>().unwrap().to_string(), tag);
        }
    }
}
