use bcs_schema::{FieldType, Layout};
use serde::{Deserialize, Serialize};
use sui_sdk_types::Argument;
use sui_transaction_builder::TransactionBuilder;

use super::{PKG_V1, PUBLISHED_AT};
use super::permission::Permission;
use crate::address::Address;
use crate::args;
use crate::error::Result;
use crate::framework::vec_map::VecMap;
use crate::reified::{MoveField, MoveStruct};

/// Authority of the current transaction: every principal it acts for and the
/// permissions held for each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxAuthority {
    pub principals: VecMap<Address, Vec<Permission>>,
}

impl MoveField for TxAuthority {
    fn field_type() -> FieldType {
        Self::layout().into_type()
    }
}

impl MoveStruct for TxAuthority {
    const ADDRESS: &'static str = PKG_V1;
    const MODULE: &'static str = "tx_authority";
    const NAME: &'static str = "TxAuthority";

    fn layout() -> Layout {
        Layout::new(Self::base_type()).field(
            "principals",
            VecMap::<Address, Vec<Permission>>::field_type(),
        )
    }
}

/// `tx_authority::begin(ctx): TxAuthority`, authority of the sender.
pub fn begin(tb: &mut TransactionBuilder) -> Result<Argument> {
    args::call(tb, PUBLISHED_AT, "tx_authority", "begin", &[], vec![])
}

pub struct BeginWithPackageWitnessArgs {
    pub witness: Argument,
}

/// `tx_authority::begin_with_package_witness<W>(witness, ctx)`
pub fn begin_with_package_witness(
    tb: &mut TransactionBuilder,
    witness_type: &str,
    args: BeginWithPackageWitnessArgs,
) -> Result<Argument> {
    args::call(
        tb,
        PUBLISHED_AT,
        "tx_authority",
        "begin_with_package_witness",
        &[witness_type],
        vec![args.witness],
    )
}

pub struct HasPermissionArgs {
    pub principal: Address,
    pub auth: Argument,
}

/// `tx_authority::has_permission<P>(principal, auth): bool`
pub fn has_permission(
    tb: &mut TransactionBuilder,
    permission_type: &str,
    args: HasPermissionArgs,
) -> Result<Argument> {
    let principal = args::pure(tb, &args.principal);
    args::call(
        tb,
        PUBLISHED_AT,
        "tx_authority",
        "has_permission",
        &[permission_type],
        vec![principal, args.auth],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ownership::permission::ADMIN;
    use crate::reified::type_arg;
    use serde_json::json;

    #[test]
    fn test_builders_chain_results() {
        let mut tb = TransactionBuilder::new();
        let auth = begin(&mut tb).unwrap();
        assert_eq!(auth, Argument::Result(0));
        let check = has_permission(
            &mut tb,
            &type_arg::<ADMIN>(),
            HasPermissionArgs {
                principal: "0xa11ce".parse().unwrap(),
                auth,
            },
        )
        .unwrap();
        assert_eq!(check, Argument::Result(1));
    }

    #[test]
    fn test_from_fields_with_permissions() {
        let admin = format!("{}::permission::ADMIN", &PKG_V1[2..]);
        let fields = json!({
            "principals": {
                "type": "0x2::vec_map::VecMap<address, vector<0x1e3a::permission::Permission>>",
                "fields": {
                    "contents": [{
                        "key": "0xa11ce",
                        "value": [{ "inner": { "name": admin } }]
                    }]
                }
            }
        });
        let authority = TxAuthority::from_fields(&fields).unwrap();
        let perms = authority.principals.get(&"0xa11ce".parse().unwrap()).unwrap();
        assert_eq!(perms.len(), 1);
        assert_eq!(perms[0].inner.name, admin);
    }
}
