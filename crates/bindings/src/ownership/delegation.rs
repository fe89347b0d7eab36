use bcs_schema::{FieldType, Layout};
use serde::{Deserialize, Serialize};
use sui_sdk_types::Argument;
use sui_transaction_builder::TransactionBuilder;

use super::permission::Permission;
use super::{PKG_V1, PUBLISHED_AT};
use crate::address::Address;
use crate::args;
use crate::error::Result;
use crate::framework::object::UID;
use crate::framework::vec_map::VecMap;
use crate::reified::{MoveField, MoveStruct};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationKey {
    pub principal: Address,
}

impl MoveField for DelegationKey {
    fn field_type() -> FieldType {
        Self::layout().into_type()
    }
}

impl MoveStruct for DelegationKey {
    const ADDRESS: &'static str = PKG_V1;
    const MODULE: &'static str = "delegation";
    const NAME: &'static str = "DelegationKey";

    fn layout() -> Layout {
        Layout::new(Self::base_type()).field("principal", FieldType::Address)
    }
}

/// Shared object through which a principal lends permissions to agents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationStore {
    pub id: UID,
    pub principal: Address,
    pub agent_permissions: VecMap<Address, Vec<Permission>>,
}

impl DelegationStore {
    pub fn permissions_of(&self, agent: &Address) -> &[Permission] {
        self.agent_permissions
            .get(agent)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl MoveField for DelegationStore {
    fn field_type() -> FieldType {
        Self::layout().into_type()
    }
}

impl MoveStruct for DelegationStore {
    const ADDRESS: &'static str = PKG_V1;
    const MODULE: &'static str = "delegation";
    const NAME: &'static str = "DelegationStore";

    fn layout() -> Layout {
        Layout::new(Self::base_type())
            .field("id", UID::field_type())
            .field("principal", FieldType::Address)
            .field(
                "agent_permissions",
                VecMap::<Address, Vec<Permission>>::field_type(),
            )
    }
}

/// `delegation::create(auth, ctx): DelegationStore`
pub fn create(tb: &mut TransactionBuilder, auth: Argument) -> Result<Argument> {
    args::call(tb, PUBLISHED_AT, "delegation", "create", &[], vec![auth])
}

/// `delegation::return_and_share(store)`
pub fn return_and_share(tb: &mut TransactionBuilder, store: Argument) -> Result<Argument> {
    args::call(tb, PUBLISHED_AT, "delegation", "return_and_share", &[], vec![store])
}

pub struct AddPermissionArgs {
    pub store: Argument,
    pub agent: Address,
    pub auth: Argument,
}

/// `delegation::add_permission<P>(store, agent, auth)`
pub fn add_permission(
    tb: &mut TransactionBuilder,
    permission_type: &str,
    args: AddPermissionArgs,
) -> Result<Argument> {
    let agent = args::pure(tb, &args.agent);
    args::call(
        tb,
        PUBLISHED_AT,
        "delegation",
        "add_permission",
        &[permission_type],
        vec![args.store, agent, args.auth],
    )
}

pub type RemovePermissionArgs = AddPermissionArgs;

/// `delegation::remove_permission<P>(store, agent, auth)`
pub fn remove_permission(
    tb: &mut TransactionBuilder,
    permission_type: &str,
    args: RemovePermissionArgs,
) -> Result<Argument> {
    let agent = args::pure(tb, &args.agent);
    args::call(
        tb,
        PUBLISHED_AT,
        "delegation",
        "remove_permission",
        &[permission_type],
        vec![args.store, agent, args.auth],
    )
}

pub struct RemoveAgentArgs {
    pub store: Argument,
    pub agent: Address,
    pub auth: Argument,
}

/// `delegation::remove_agent(store, agent, auth)`
pub fn remove_agent(tb: &mut TransactionBuilder, args: RemoveAgentArgs) -> Result<Argument> {
    let agent = args::pure(tb, &args.agent);
    args::call(
        tb,
        PUBLISHED_AT,
        "delegation",
        "remove_agent",
        &[],
        vec![args.store, agent, args.auth],
    )
}

/// `delegation::claim_delegation(store, ctx): TxAuthority`. The sender acts
/// for the store's principal with the permissions delegated to it.
pub fn claim_delegation(tb: &mut TransactionBuilder, store: Argument) -> Result<Argument> {
    args::call(tb, PUBLISHED_AT, "delegation", "claim_delegation", &[], vec![store])
}
