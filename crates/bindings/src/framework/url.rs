use bcs_schema::{FieldType, Layout};
use serde::{Deserialize, Serialize};

use super::SUI_FRAMEWORK;
use crate::reified::{MoveField, MoveStruct};

/// `0x2::url::Url`, stored as an ASCII string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Url {
    pub url: String,
}

impl MoveField for Url {
    fn field_type() -> FieldType {
        Self::layout().into_type()
    }
}

impl MoveStruct for Url {
    const ADDRESS: &'static str = SUI_FRAMEWORK;
    const MODULE: &'static str = "url";
    const NAME: &'static str = "Url";

    fn layout() -> Layout {
        Layout::new(Self::base_type()).field("url", FieldType::String)
    }
}
