//! Parser and printer for on-chain type strings such as
//! `0x2::coin::Coin<0x2::sui::SUI>` or `0xabc::vec_map::VecMap<address, vector<u8>>`.
//!
//! Addresses are normalised to 64 hex digits so two spellings of the same
//! type compare equal.

use std::fmt;
use std::str::FromStr;

use bcs_schema::normalize_address;

use crate::error::{BindingsError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MoveType {
    Bool,
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
    Address,
    Signer,
    Vector(Box<MoveType>),
    Struct(MoveTypeName),
}

/// A fully qualified struct type with its type arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MoveTypeName {
    pub address: String,
    pub module: String,
    pub name: String,
    pub type_args: Vec<MoveType>,
}

impl MoveTypeName {
    pub fn new(address: &str, module: &str, name: &str, type_args: Vec<MoveType>) -> Result<Self> {
        Ok(Self {
            address: normalize_address(address)
                .map_err(|_| BindingsError::InvalidTypeName(address.to_string()))?,
            module: module.to_string(),
            name: name.to_string(),
            type_args,
        })
    }

    /// `address::module::Name` without type arguments.
    pub fn base(&self) -> String {
        format!("{}::{}::{}", self.address, self.module, self.name)
    }

    pub fn arity(&self) -> usize {
        self.type_args.len()
    }
}

impl fmt::Display for MoveTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base())?;
        if !self.type_args.is_empty() {
            let args: Vec<String> = self.type_args.iter().map(|a| a.to_string()).collect();
            write!(f, "<{}>", args.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for MoveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveType::Bool => write!(f, "bool"),
            MoveType::U8 => write!(f, "u8"),
            MoveType::U16 => write!(f, "u16"),
            MoveType::U32 => write!(f, "u32"),
            MoveType::U64 => write!(f, "u64"),
            MoveType::U128 => write!(f, "u128"),
            MoveType::U256 => write!(f, "u256"),
            MoveType::Address => write!(f, "address"),
            MoveType::Signer => write!(f, "signer"),
            MoveType::Vector(inner) => write!(f, "vector<{}>", inner),
            MoveType::Struct(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for MoveTypeName {
    type Err = BindingsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.parse::<MoveType>()? {
            MoveType::Struct(name) => Ok(name),
            _ => Err(BindingsError::InvalidTypeName(s.to_string())),
        }
    }
}

impl FromStr for MoveType {
    type Err = BindingsError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || BindingsError::InvalidTypeName(s.to_string());
        let s = s.trim();

        let (head, args) = match s.find('<') {
            Some(open) => {
                let inner = s[open + 1..].strip_suffix('>').ok_or_else(invalid)?;
                (s[..open].trim(), split_type_args(inner).ok_or_else(invalid)?)
            }
            None => (s, Vec::new()),
        };

        let primitive = match head {
            "bool" => Some(MoveType::Bool),
            "u8" => Some(MoveType::U8),
            "u16" => Some(MoveType::U16),
            "u32" => Some(MoveType::U32),
            "u64" => Some(MoveType::U64),
            "u128" => Some(MoveType::U128),
            "u256" => Some(MoveType::U256),
            "address" => Some(MoveType::Address),
            "signer" => Some(MoveType::Signer),
            _ => None,
        };
        if let Some(primitive) = primitive {
            return if args.is_empty() { Ok(primitive) } else { Err(invalid()) };
        }

        if head == "vector" {
            return match args.as_slice() {
                [inner] => Ok(MoveType::Vector(Box::new(inner.parse()?))),
                _ => Err(invalid()),
            };
        }

        let parts: Vec<&str> = head.split("::").collect();
        let [address, module, name] = parts.as_slice() else {
            return Err(invalid());
        };
        if !is_identifier(module) || !is_identifier(name) {
            return Err(invalid());
        }
        let type_args = args
            .iter()
            .map(|a| a.parse())
            .collect::<Result<Vec<MoveType>>>()?;
        MoveTypeName::new(address, module, name, type_args)
            .map(MoveType::Struct)
            .map_err(|_| invalid())
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Split a type argument list on commas at nesting depth 0.
fn split_type_args(inner: &str) -> Option<Vec<&str>> {
    if inner.trim().is_empty() {
        return None;
    }
    let mut args = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in inner.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth < 0 {
                    return None;
                }
            }
            ',' if depth == 0 => {
                args.push(inner[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    args.push(inner[start..].trim());
    if args.iter().any(|a| a.is_empty()) {
        return None;
    }
    Some(args)
}
