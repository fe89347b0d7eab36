use bcs_schema::{FieldType, Layout};
use serde::{Deserialize, Serialize};

use super::PKG_V1;
use crate::framework::type_name::TypeName;
use crate::reified::{MoveField, MoveStruct};
use crate::witness_struct;

/// A permission granted to an agent, named by its witness type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub inner: TypeName,
}

impl MoveField for Permission {
    fn field_type() -> FieldType {
        Self::layout().into_type()
    }
}

impl MoveStruct for Permission {
    const ADDRESS: &'static str = PKG_V1;
    const MODULE: &'static str = "permission";
    const NAME: &'static str = "Permission";

    fn layout() -> Layout {
        Layout::new(Self::base_type()).field("inner", TypeName::field_type())
    }
}

witness_struct!(
    /// Full control over every function of a package.
    ADMIN,
    PKG_V1,
    "permission"
);

witness_struct!(
    /// Everything except granting or revoking permissions.
    MANAGER,
    PKG_V1,
    "permission"
);
