use bcs_schema::{FieldType, Layout};
use serde::{Deserialize, Serialize};

use super::MOVE_STDLIB;
use crate::reified::{MoveField, MoveStruct};

/// `0x1::type_name::TypeName`. The name is the fully qualified type without
/// the `0x` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeName {
    pub name: String,
}

impl TypeName {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl MoveField for TypeName {
    fn field_type() -> FieldType {
        Self::layout().into_type()
    }
}

impl MoveStruct for TypeName {
    const ADDRESS: &'static str = MOVE_STDLIB;
    const MODULE: &'static str = "type_name";
    const NAME: &'static str = "TypeName";

    fn layout() -> Layout {
        Layout::new(Self::base_type()).field("name", FieldType::String)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_bare_string() {
        let name = "0000000000000000000000000000000000000000000000000000000000000002::sui::SUI";
        let parsed = TypeName::from_fields(&json!(name)).unwrap();
        assert_eq!(parsed, TypeName::new(name));
        let parsed = TypeName::from_fields(&json!({ "name": name })).unwrap();
        assert_eq!(parsed.name, name);
    }
}
