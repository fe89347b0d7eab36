use bcs_schema::{FieldType, Layout};
use serde::{Deserialize, Serialize};

use super::SUI_FRAMEWORK;
use crate::reified::{MoveField, MoveStruct};

/// `0x2::balance::Balance<T>`. The coin type is phantom and carries no data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub value: u64,
}

impl MoveField for Balance {
    fn field_type() -> FieldType {
        Self::layout().into_type()
    }
}

impl MoveStruct for Balance {
    const ADDRESS: &'static str = SUI_FRAMEWORK;
    const MODULE: &'static str = "balance";
    const NAME: &'static str = "Balance";
    const TYPE_ARITY: usize = 1;

    fn layout() -> Layout {
        Layout::new(Self::base_type()).field("value", FieldType::U64)
    }
}
