//! Traits shared by every struct mirror.

use std::fmt::Debug;

use bcs_schema::{FieldType, Layout, decode_value, encode_value};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::address::Address;
use crate::error::{BindingsError, Result};
use crate::type_name::MoveTypeName;

/// A Rust type with a known BCS field type.
pub trait MoveField {
    fn field_type() -> FieldType;
}

macro_rules! primitive_field {
    ($($ty:ty => $tag:expr),* $(,)?) => {
        $(impl MoveField for $ty {
            fn field_type() -> FieldType {
                $tag
            }
        })*
    };
}

primitive_field! {
    bool => FieldType::Bool,
    u8 => FieldType::U8,
    u16 => FieldType::U16,
    u32 => FieldType::U32,
    u64 => FieldType::U64,
    u128 => FieldType::U128,
    String => FieldType::String,
    Address => FieldType::Address,
}

impl<T: MoveField> MoveField for Vec<T> {
    fn field_type() -> FieldType {
        FieldType::vector(T::field_type())
    }
}

impl<T: MoveField> MoveField for Option<T> {
    fn field_type() -> FieldType {
        FieldType::option(T::field_type())
    }
}

/// Mirror of an on-chain Move struct.
///
/// Implementors give the struct's identity and its BCS layout. Field order
/// of the Rust struct must match the Move declaration.
pub trait MoveStruct:
    MoveField + Serialize + DeserializeOwned + Debug + Send + Sync + 'static
{
    /// Type origin address of the defining package.
    const ADDRESS: &'static str;
    const MODULE: &'static str;
    const NAME: &'static str;
    const TYPE_ARITY: usize = 0;

    fn layout() -> Layout;

    /// Normalised `address::module::Name`.
    fn base_type() -> String {
        match MoveTypeName::new(Self::ADDRESS, Self::MODULE, Self::NAME, Vec::new()) {
            Ok(name) => name.base(),
            Err(_) => format!("{}::{}::{}", Self::ADDRESS, Self::MODULE, Self::NAME),
        }
    }

    /// True when `type_str` names this struct with the right number of type
    /// arguments.
    fn is_type(type_str: &str) -> bool {
        Self::check_type(type_str).is_ok()
    }

    fn check_type(type_str: &str) -> Result<MoveTypeName> {
        let name: MoveTypeName = type_str.parse()?;
        if name.base() != Self::base_type() {
            return Err(BindingsError::TypeMismatch {
                expected: Self::base_type(),
                found: type_str.to_string(),
            });
        }
        if name.arity() != Self::TYPE_ARITY {
            return Err(BindingsError::ArityMismatch {
                type_name: Self::base_type(),
                expected: Self::TYPE_ARITY,
                found: name.arity(),
            });
        }
        Ok(name)
    }

    fn from_bcs(bytes: &[u8]) -> Result<Self> {
        Ok(bcs::from_bytes(bytes)?)
    }

    /// Decode from parsed JSON fields as returned by Sui RPC.
    fn from_fields(fields: &Value) -> Result<Self> {
        let bytes = encode_value(&Self::field_type(), fields)?;
        Self::from_bcs(&bytes)
    }

    /// Decode from a `{ dataType, type, fields }` object content.
    fn from_sui_parsed_data(content: &Value) -> Result<Self> {
        let type_str = parsed_data_type(content)?;
        Self::check_type(type_str)?;
        Self::from_fields(&content["fields"])
    }

    fn to_bcs(&self) -> Result<Vec<u8>> {
        Ok(bcs::to_bytes(self)?)
    }

    /// JSON view in the Sui convention: `u64` and wider as strings,
    /// addresses as hex.
    fn to_json(&self) -> Result<Value> {
        Ok(decode_value(&Self::field_type(), &self.to_bcs()?)?)
    }
}

/// The `type` of a parsed Move object, after checking `dataType`.
pub fn parsed_data_type(content: &Value) -> Result<&str> {
    match content.get("dataType").and_then(Value::as_str) {
        Some("moveObject") => {}
        other => {
            return Err(BindingsError::NotMoveObject(
                other.unwrap_or("missing").to_string(),
            ));
        }
    }
    content
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| BindingsError::InvalidTypeName("missing type".to_string()))
}

/// Declare a zero-data witness or capability struct. The Move compiler gives
/// such structs a single `dummy_field: bool`.
#[macro_export]
macro_rules! witness_struct {
    ($(#[$meta:meta])* $name:ident, $address:expr, $module:literal) => {
        $(#[$meta])*
        #[allow(non_camel_case_types)]
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $name {
            pub dummy_field: bool,
        }

        impl $crate::reified::MoveField for $name {
            fn field_type() -> ::bcs_schema::FieldType {
                <Self as $crate::reified::MoveStruct>::layout().into_type()
            }
        }

        impl $crate::reified::MoveStruct for $name {
            const ADDRESS: &'static str = $address;
            const MODULE: &'static str = $module;
            const NAME: &'static str = stringify!($name);

            fn layout() -> ::bcs_schema::Layout {
                ::bcs_schema::Layout::new(<Self as $crate::reified::MoveStruct>::base_type())
                    .field("dummy_field", ::bcs_schema::FieldType::Bool)
            }
        }
    };
}

/// Full type string of a struct without type arguments, for use as a type
/// argument of a move call.
pub fn type_arg<T: MoveStruct>() -> String {
    T::base_type()
}
