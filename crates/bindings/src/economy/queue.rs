use bcs_schema::{FieldType, Layout};
use serde::{Deserialize, Serialize};

use super::PKG_V1;
use crate::address::Address;
use crate::framework::balance::Balance;
use crate::framework::vec_map::VecMap;
use crate::reified::{MoveField, MoveStruct};

/// `queue::Queue<T>`: deposits and withdrawals waiting for the next fund
/// crank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Queue {
    pub deposits: Balance,
    pub deposit_queue: VecMap<Address, u64>,
    pub withdraw_queue: VecMap<Address, u64>,
}

impl MoveField for Queue {
    fn field_type() -> FieldType {
        Self::layout().into_type()
    }
}

impl MoveStruct for Queue {
    const ADDRESS: &'static str = PKG_V1;
    const MODULE: &'static str = "queue";
    const NAME: &'static str = "Queue";
    const TYPE_ARITY: usize = 1;

    fn layout() -> Layout {
        Layout::new(Self::base_type())
            .field("deposits", Balance::field_type())
            .field("deposit_queue", VecMap::<Address, u64>::field_type())
            .field("withdraw_queue", VecMap::<Address, u64>::field_type())
    }
}
