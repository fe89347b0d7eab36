//! Schema-driven BCS helpers.
//!
//! A [`Schema`] maps field names to Move type tags. [`serialize_by_field`]
//! encodes a JSON record into one BCS byte array per field and
//! [`move_struct_validator`] checks a record before it is used to build a
//! Move object. Struct mirrors use the recursive [`Layout`] through
//! [`encode_value`] / [`decode_value`].

pub mod address;
pub mod error;
pub mod field_type;
pub mod schema;
pub mod serialize;
pub mod validate;
pub mod value;

pub use address::{ADDRESS_LENGTH, format_address, normalize_address, parse_address};
pub use error::{Result, SchemaError};
pub use field_type::{FieldType, Layout};
pub use schema::Schema;
pub use serialize::{
    decode_move_value, decode_value, deserialize_by_field, encode_value, selected_fields,
    serialize_by_field, serialize_named_fields,
};
pub use validate::{move_struct_validator, validate_layout};
pub use value::{MoveValue, TypedSeed};
