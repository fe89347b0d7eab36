use bcs_schema::{FieldType, Layout};
use serde::{Deserialize, Serialize};

use super::SUI_FRAMEWORK;
use crate::address::Address;
use crate::reified::{MoveField, MoveStruct};

/// `0x2::object::ID`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ID {
    pub bytes: Address,
}

/// `0x2::object::UID`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UID {
    pub id: ID,
}

impl ID {
    pub fn new(bytes: Address) -> Self {
        Self { bytes }
    }
}

impl UID {
    pub fn new(bytes: Address) -> Self {
        Self { id: ID::new(bytes) }
    }

    pub fn address(&self) -> Address {
        self.id.bytes
    }
}

impl MoveField for ID {
    fn field_type() -> FieldType {
        Self::layout().into_type()
    }
}

impl MoveStruct for ID {
    const ADDRESS: &'static str = SUI_FRAMEWORK;
    const MODULE: &'static str = "object";
    const NAME: &'static str = "ID";

    fn layout() -> Layout {
        Layout::new(Self::base_type()).field("bytes", FieldType::Address)
    }
}

impl MoveField for UID {
    fn field_type() -> FieldType {
        Self::layout().into_type()
    }
}

impl MoveStruct for UID {
    const ADDRESS: &'static str = SUI_FRAMEWORK;
    const MODULE: &'static str = "object";
    const NAME: &'static str = "UID";

    fn layout() -> Layout {
        Layout::new(Self::base_type()).field("id", ID::field_type())
    }
}
