//! Bindings for the `ownership` package: object ownership records, RBAC,
//! delegation and organizations.

pub mod delegation;
pub mod organization;
#[allow(clippy::module_inception)]
pub mod ownership;
pub mod permission;
pub mod publish_receipt;
pub mod rbac;
pub mod tx_authority;

use crate::loader::StructClassLoader;

/// Type origin of every struct in the package.
pub const PKG_V1: &str = "0x1e3a2ea4b8c8d5dbf2b3bb1ccbfa0c4d1b83e0f5a29f34acb0c7a8e6f0d2b914";
/// Latest published version; move calls target this address.
pub const PUBLISHED_AT: &str = "0x9b0e4f72c1d85a36e2f7b04c9a1d63e8f5b27c40d9e1a86f3c5b72e0a4d918c6";

pub fn register_classes(loader: &mut StructClassLoader) {
    loader.register::<ownership::Key>();
    loader.register::<ownership::Ownership>();
    loader.register::<permission::Permission>();
    loader.register::<permission::ADMIN>();
    loader.register::<permission::MANAGER>();
    loader.register::<tx_authority::TxAuthority>();
    loader.register::<rbac::RBAC>();
    loader.register::<delegation::DelegationKey>();
    loader.register::<delegation::DelegationStore>();
    loader.register::<organization::Package>();
    loader.register::<organization::Organization>();
    loader.register::<publish_receipt::PublishReceipt>();
}
