use bcs_schema::{FieldType, Layout};
use serde::{Deserialize, Serialize};
use sui_sdk_types::Argument;
use sui_transaction_builder::TransactionBuilder;

use super::rbac::RBAC;
use super::{PKG_V1, PUBLISHED_AT};
use crate::address::Address;
use crate::args;
use crate::error::Result;
use crate::framework::object::{ID, UID};
use crate::reified::{MoveField, MoveStruct};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub package_id: ID,
    pub version: u64,
}

impl MoveField for Package {
    fn field_type() -> FieldType {
        Self::layout().into_type()
    }
}

impl MoveStruct for Package {
    const ADDRESS: &'static str = PKG_V1;
    const MODULE: &'static str = "organization";
    const NAME: &'static str = "Package";

    fn layout() -> Layout {
        Layout::new(Self::base_type())
            .field("package_id", ID::field_type())
            .field("version", FieldType::U64)
    }
}

/// An organization owns packages and assigns roles to agents over them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: UID,
    pub packages: Vec<Package>,
    pub rbac: RBAC,
}

impl MoveField for Organization {
    fn field_type() -> FieldType {
        Self::layout().into_type()
    }
}

impl MoveStruct for Organization {
    const ADDRESS: &'static str = PKG_V1;
    const MODULE: &'static str = "organization";
    const NAME: &'static str = "Organization";

    fn layout() -> Layout {
        Layout::new(Self::base_type())
            .field("id", UID::field_type())
            .field("packages", FieldType::vector(Package::field_type()))
            .field("rbac", RBAC::field_type())
    }
}

pub struct CreateFromReceiptArgs {
    pub receipt: Argument,
    pub auth: Argument,
}

/// `organization::create_from_receipt(receipt, auth, ctx): Organization`
pub fn create_from_receipt(
    tb: &mut TransactionBuilder,
    args: CreateFromReceiptArgs,
) -> Result<Argument> {
    args::call(
        tb,
        PUBLISHED_AT,
        "organization",
        "create_from_receipt",
        &[],
        vec![args.receipt, args.auth],
    )
}

pub fn return_and_share(tb: &mut TransactionBuilder, organization: Argument) -> Result<Argument> {
    args::call(
        tb,
        PUBLISHED_AT,
        "organization",
        "return_and_share",
        &[],
        vec![organization],
    )
}

pub struct AddPackageArgs {
    pub receipt: Argument,
    pub organization: Argument,
    pub auth: Argument,
}

pub fn add_package(tb: &mut TransactionBuilder, args: AddPackageArgs) -> Result<Argument> {
    args::call(
        tb,
        PUBLISHED_AT,
        "organization",
        "add_package",
        &[],
        vec![args.receipt, args.organization, args.auth],
    )
}

pub struct SetRoleForAgentArgs {
    pub organization: Argument,
    pub agent: Address,
    pub role: String,
    pub auth: Argument,
}

pub fn set_role_for_agent(
    tb: &mut TransactionBuilder,
    args: SetRoleForAgentArgs,
) -> Result<Argument> {
    let agent = args::pure(tb, &args.agent);
    let role = args::pure(tb, &args.role);
    args::call(
        tb,
        PUBLISHED_AT,
        "organization",
        "set_role_for_agent",
        &[],
        vec![args.organization, agent, role, args.auth],
    )
}

pub struct RolePermissionArgs {
    pub organization: Argument,
    pub role: String,
    pub auth: Argument,
}

/// `organization::grant_permission_to_role<P>(organization, role, auth)`
pub fn grant_permission_to_role(
    tb: &mut TransactionBuilder,
    permission_type: &str,
    args: RolePermissionArgs,
) -> Result<Argument> {
    let role = args::pure(tb, &args.role);
    args::call(
        tb,
        PUBLISHED_AT,
        "organization",
        "grant_permission_to_role",
        &[permission_type],
        vec![args.organization, role, args.auth],
    )
}

/// `organization::revoke_permission_from_role<P>(organization, role, auth)`
pub fn revoke_permission_from_role(
    tb: &mut TransactionBuilder,
    permission_type: &str,
    args: RolePermissionArgs,
) -> Result<Argument> {
    let role = args::pure(tb, &args.role);
    args::call(
        tb,
        PUBLISHED_AT,
        "organization",
        "revoke_permission_from_role",
        &[permission_type],
        vec![args.organization, role, args.auth],
    )
}

pub struct DeleteAgentArgs {
    pub organization: Argument,
    pub agent: Address,
    pub auth: Argument,
}

pub fn delete_agent(tb: &mut TransactionBuilder, args: DeleteAgentArgs) -> Result<Argument> {
    let agent = args::pure(tb, &args.agent);
    args::call(
        tb,
        PUBLISHED_AT,
        "organization",
        "delete_agent",
        &[],
        vec![args.organization, agent, args.auth],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_organization_nested_layout() {
        let fields = json!({
            "id": { "id": "0xa0" },
            "packages": [
                { "type": format!("{}::organization::Package", PKG_V1), "fields": { "package_id": "0x5d", "version": "2" } }
            ],
            "rbac": {
                "type": format!("{}::rbac::RBAC", PKG_V1),
                "fields": {
                    "principal": "0xa0",
                    "agent_role": { "contents": [] },
                    "role_permissions": { "contents": [] }
                }
            }
        });
        let org = Organization::from_fields(&fields).unwrap();
        assert_eq!(org.packages[0].version, 2);
        assert_eq!(org.rbac.principal, "0xa0".parse().unwrap());

        let json = org.to_json().unwrap();
        assert_eq!(json["packages"][0]["version"], "2");
        assert_eq!(Organization::from_fields(&json).unwrap(), org);
    }
}
