//! Roles and permissions.
//!
//! Roles are a closed enumeration and the role → permission mapping is
//! a pure function; there is no runtime group-membership mutation.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    /// Full access to every operation.
    Administrator,
    /// Read-only access.
    Operator,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Permission {
    ViewAssets,
    CreateAssets,
    EditAssets,
    DeleteAssets,
    ImportAssets,
    ExportAssets,
    ManageUsers,
}

impl Role {
    /// The static permission set granted by this role.
    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            Role::Administrator => &[
                Permission::ViewAssets,
                Permission::CreateAssets,
                Permission::EditAssets,
                Permission::DeleteAssets,
                Permission::ImportAssets,
                Permission::ExportAssets,
                Permission::ManageUsers,
            ],
            Role::Operator => &[Permission::ViewAssets, Permission::ExportAssets],
        }
    }

    pub fn allows(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn administrator_has_full_access() {
        for p in [
            Permission::ViewAssets,
            Permission::CreateAssets,
            Permission::EditAssets,
            Permission::DeleteAssets,
            Permission::ImportAssets,
            Permission::ExportAssets,
            Permission::ManageUsers,
        ] {
            assert!(Role::Administrator.allows(p));
        }
    }

    #[test]
    fn operator_is_read_only() {
        assert!(Role::Operator.allows(Permission::ViewAssets));
        assert!(!Role::Operator.allows(Permission::CreateAssets));
        assert!(!Role::Operator.allows(Permission::EditAssets));
        assert!(!Role::Operator.allows(Permission::DeleteAssets));
        assert!(!Role::Operator.allows(Permission::ImportAssets));
        assert!(!Role::Operator.allows(Permission::ManageUsers));
    }
}
