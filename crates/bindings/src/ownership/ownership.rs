use bcs_schema::{FieldType, Layout};
use serde::{Deserialize, Serialize};

use super::PKG_V1;
use crate::address::Address;
use crate::framework::object::ID;
use crate::framework::type_name::TypeName;
use crate::reified::{MoveField, MoveStruct};
use crate::witness_struct;

witness_struct!(
    /// Dynamic field key under which an object's `Ownership` is stored.
    Key,
    PKG_V1,
    "ownership"
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownership {
    pub creator: ID,
    pub owner: Option<Address>,
    pub transfer_auth: Option<Address>,
    #[serde(rename = "type")]
    pub type_: TypeName,
}

impl MoveField for Ownership {
    fn field_type() -> FieldType {
        Self::layout().into_type()
    }
}

impl MoveStruct for Ownership {
    const ADDRESS: &'static str = PKG_V1;
    const MODULE: &'static str = "ownership";
    const NAME: &'static str = "Ownership";

    fn layout() -> Layout {
        Layout::new(Self::base_type())
            .field("creator", ID::field_type())
            .field("owner", FieldType::option(FieldType::Address))
            .field("transfer_auth", FieldType::option(FieldType::Address))
            .field("type", TypeName::field_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ownership_from_rpc_fields() {
        let fields = json!({
            "creator": "0x77",
            "owner": { "vec": ["0xa11ce"] },
            "transfer_auth": null,
            "type": {
                "type": "0x1::type_name::TypeName",
                "fields": { "name": "0000000000000000000000000000000000000000000000000000000000000002::coin::Coin" }
            }
        });
        let ownership = Ownership::from_fields(&fields).unwrap();
        assert_eq!(ownership.creator, ID::new("0x77".parse().unwrap()));
        assert_eq!(ownership.owner, Some("0xa11ce".parse().unwrap()));
        assert_eq!(ownership.transfer_auth, None);
        assert!(ownership.type_.name.ends_with("::coin::Coin"));
    }

    #[test]
    fn test_key_is_single_bool() {
        assert_eq!(Key::default().to_bcs().unwrap(), vec![0]);
        assert!(Key::is_type(&format!("{}::ownership::Key", PKG_V1)));
    }
}
