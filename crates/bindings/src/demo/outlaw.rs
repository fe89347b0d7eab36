use bcs_schema::{FieldType, Layout};
use serde::{Deserialize, Serialize};
use sui_sdk_types::Argument;
use sui_transaction_builder::TransactionBuilder;

use super::{PKG_V1, PUBLISHED_AT};
use crate::args;
use crate::error::Result;
use crate::framework::object::UID;
use crate::framework::url::Url;
use crate::framework::vec_map::VecMap;
use crate::reified::{MoveField, MoveStruct};
use crate::witness_struct;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outlaw {
    pub id: UID,
    pub name: String,
    pub image: Url,
    pub power_level: u64,
    pub attributes: VecMap<String, String>,
}

impl MoveField for Outlaw {
    fn field_type() -> FieldType {
        Self::layout().into_type()
    }
}

impl MoveStruct for Outlaw {
    const ADDRESS: &'static str = PKG_V1;
    const MODULE: &'static str = "outlaw";
    const NAME: &'static str = "Outlaw";

    fn layout() -> Layout {
        Layout::new(Self::base_type())
            .field("id", UID::field_type())
            .field("name", FieldType::String)
            .field("image", Url::field_type())
            .field("power_level", FieldType::U64)
            .field("attributes", VecMap::<String, String>::field_type())
    }
}

witness_struct!(
    /// Permission to edit an outlaw's metadata.
    EDITOR,
    PKG_V1,
    "outlaw"
);

witness_struct!(Witness, PKG_V1, "outlaw");

pub struct CreateArgs {
    pub name: String,
    pub image_url: String,
    pub auth: Argument,
}

/// `outlaw::create(name, image_url, auth, ctx): Outlaw`
pub fn create(tb: &mut TransactionBuilder, args: CreateArgs) -> Result<Argument> {
    let name = args::pure(tb, &args.name);
    let image_url = args::pure(tb, &args.image_url);
    args::call(
        tb,
        PUBLISHED_AT,
        "outlaw",
        "create",
        &[],
        vec![name, image_url, args.auth],
    )
}

pub fn return_and_share(tb: &mut TransactionBuilder, outlaw: Argument) -> Result<Argument> {
    args::call(tb, PUBLISHED_AT, "outlaw", "return_and_share", &[], vec![outlaw])
}

pub struct RenameArgs {
    pub outlaw: Argument,
    pub new_name: String,
    pub auth: Argument,
}

/// `outlaw::rename(outlaw, new_name, auth)`. Requires `EDITOR` from the
/// outlaw's owner.
pub fn rename(tb: &mut TransactionBuilder, args: RenameArgs) -> Result<Argument> {
    let new_name = args::pure(tb, &args.new_name);
    args::call(
        tb,
        PUBLISHED_AT,
        "outlaw",
        "rename",
        &[],
        vec![args.outlaw, new_name, args.auth],
    )
}

pub struct EditPowerLevelArgs {
    pub outlaw: Argument,
    pub power_level: u64,
    pub auth: Argument,
}

pub fn edit_power_level(tb: &mut TransactionBuilder, args: EditPowerLevelArgs) -> Result<Argument> {
    let power_level = args::pure(tb, &args.power_level);
    args::call(
        tb,
        PUBLISHED_AT,
        "outlaw",
        "edit_power_level",
        &[],
        vec![args.outlaw, power_level, args.auth],
    )
}

pub struct SetAttributeArgs {
    pub outlaw: Argument,
    pub key: String,
    pub value: String,
    pub auth: Argument,
}

pub fn set_attribute(tb: &mut TransactionBuilder, args: SetAttributeArgs) -> Result<Argument> {
    let key = args::pure(tb, &args.key);
    let value = args::pure(tb, &args.value);
    args::call(
        tb,
        PUBLISHED_AT,
        "outlaw",
        "set_attribute",
        &[],
        vec![args.outlaw, key, value, args.auth],
    )
}

pub struct RemoveAttributeArgs {
    pub outlaw: Argument,
    pub key: String,
    pub auth: Argument,
}

pub fn remove_attribute(tb: &mut TransactionBuilder, args: RemoveAttributeArgs) -> Result<Argument> {
    let key = args::pure(tb, &args.key);
    args::call(
        tb,
        PUBLISHED_AT,
        "outlaw",
        "remove_attribute",
        &[],
        vec![args.outlaw, key, args.auth],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outlaw_bcs_layout() {
        let outlaw = Outlaw {
            id: UID::new("0x1".parse().unwrap()),
            name: "Kyrie".to_string(),
            image: Url {
                url: "https://x.io/k.png".to_string(),
            },
            power_level: 9000,
            attributes: VecMap::default(),
        };
        let bytes = outlaw.to_bcs().unwrap();
        assert_eq!(bytes[32], 5);
        assert_eq!(&bytes[33..38], b"Kyrie");
        let power_at = 38 + 1 + outlaw.image.url.len();
        assert_eq!(&bytes[power_at..power_at + 8], &9000u64.to_le_bytes());
        assert_eq!(*bytes.last().unwrap(), 0);
    }

    #[test]
    fn test_outlaw_from_rpc_json() {
        let fields = json!({
            "id": { "id": "0x0b" },
            "name": "Kyrie",
            "image": "https://x.io/k.png",
            "power_level": "42",
            "attributes": {
                "type": "0x2::vec_map::VecMap<0x1::string::String, 0x1::string::String>",
                "fields": { "contents": [{ "type": "0x2::vec_map::Entry", "fields": { "key": "hat", "value": "black" } }] }
            }
        });
        let outlaw = Outlaw::from_fields(&fields).unwrap();
        assert_eq!(outlaw.power_level, 42);
        assert_eq!(outlaw.image.url, "https://x.io/k.png");
        assert_eq!(outlaw.attributes.get(&"hat".to_string()).map(String::as_str), Some("black"));
    }
}
