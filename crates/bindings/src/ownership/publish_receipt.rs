use bcs_schema::{FieldType, Layout};
use serde::{Deserialize, Serialize};
use sui_sdk_types::Argument;
use sui_transaction_builder::TransactionBuilder;

use super::{PKG_V1, PUBLISHED_AT};
use crate::args;
use crate::error::Result;
use crate::framework::object::{ID, UID};
use crate::reified::{MoveField, MoveStruct};

/// Proof that the holder published `package`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishReceipt {
    pub id: UID,
    pub package: ID,
}

impl MoveField for PublishReceipt {
    fn field_type() -> FieldType {
        Self::layout().into_type()
    }
}

impl MoveStruct for PublishReceipt {
    const ADDRESS: &'static str = PKG_V1;
    const MODULE: &'static str = "publish_receipt";
    const NAME: &'static str = "PublishReceipt";

    fn layout() -> Layout {
        Layout::new(Self::base_type())
            .field("id", UID::field_type())
            .field("package", ID::field_type())
    }
}

/// `publish_receipt::claim<GENESIS>(genesis, ctx): PublishReceipt`
pub fn claim(
    tb: &mut TransactionBuilder,
    genesis_type: &str,
    genesis: Argument,
) -> Result<Argument> {
    args::call(
        tb,
        PUBLISHED_AT,
        "publish_receipt",
        "claim",
        &[genesis_type],
        vec![genesis],
    )
}
