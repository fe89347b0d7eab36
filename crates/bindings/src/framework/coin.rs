use bcs_schema::{FieldType, Layout};
use serde::{Deserialize, Serialize};

use super::SUI_FRAMEWORK;
use super::balance::Balance;
use super::object::UID;
use crate::reified::{MoveField, MoveStruct};

/// `0x2::coin::Coin<T>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub id: UID,
    pub balance: Balance,
}

impl MoveField for Coin {
    fn field_type() -> FieldType {
        Self::layout().into_type()
    }
}

impl MoveStruct for Coin {
    const ADDRESS: &'static str = SUI_FRAMEWORK;
    const MODULE: &'static str = "coin";
    const NAME: &'static str = "Coin";
    const TYPE_ARITY: usize = 1;

    fn layout() -> Layout {
        Layout::new(Self::base_type())
            .field("id", UID::field_type())
            .field("balance", Balance::field_type())
    }
}
