use bcs_schema::{FieldType, Layout};
use serde::{Deserialize, Serialize};

use super::SUI_FRAMEWORK;
use super::object::UID;
use crate::reified::{MoveField, MoveStruct};

/// `0x2::table::Table<K, V>`. Entries live in dynamic fields under `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub id: UID,
    pub size: u64,
}

impl MoveField for Table {
    fn field_type() -> FieldType {
        Self::layout().into_type()
    }
}

impl MoveStruct for Table {
    const ADDRESS: &'static str = SUI_FRAMEWORK;
    const MODULE: &'static str = "table";
    const NAME: &'static str = "Table";
    const TYPE_ARITY: usize = 2;

    fn layout() -> Layout {
        Layout::new(Self::base_type())
            .field("id", UID::field_type())
            .field("size", FieldType::U64)
    }
}
