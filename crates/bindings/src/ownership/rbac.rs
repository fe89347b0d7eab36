use bcs_schema::{FieldType, Layout};
use serde::{Deserialize, Serialize};

use super::PKG_V1;
use super::permission::Permission;
use crate::address::Address;
use crate::framework::vec_map::VecMap;
use crate::reified::{MoveField, MoveStruct};

/// Role table of an organization. Agents map to a role name; roles map to
/// permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RBAC {
    pub principal: Address,
    pub agent_role: VecMap<Address, String>,
    pub role_permissions: VecMap<String, Vec<Permission>>,
}

impl RBAC {
    /// Permissions an agent holds through its role.
    pub fn agent_permissions(&self, agent: &Address) -> &[Permission] {
        self.agent_role
            .get(agent)
            .and_then(|role| self.role_permissions.get(role))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl MoveField for RBAC {
    fn field_type() -> FieldType {
        Self::layout().into_type()
    }
}

impl MoveStruct for RBAC {
    const ADDRESS: &'static str = PKG_V1;
    const MODULE: &'static str = "rbac";
    const NAME: &'static str = "RBAC";

    fn layout() -> Layout {
        Layout::new(Self::base_type())
            .field("principal", FieldType::Address)
            .field("agent_role", VecMap::<Address, String>::field_type())
            .field(
                "role_permissions",
                VecMap::<String, Vec<Permission>>::field_type(),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_agent_permissions_through_role() {
        let fields = json!({
            "principal": "0x1",
            "agent_role": { "contents": [{ "key": "0xbeef", "value": "editor" }] },
            "role_permissions": {
                "contents": [{ "key": "editor", "value": [{ "inner": "0xabc::outlaw::EDITOR" }] }]
            }
        });
        let rbac = RBAC::from_fields(&fields).unwrap();
        assert_eq!(rbac.agent_permissions(&"0xbeef".parse().unwrap()).len(), 1);
        assert!(rbac.agent_permissions(&"0xdead".parse().unwrap()).is_empty());
    }
}
