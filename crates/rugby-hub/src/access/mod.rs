//! Static role-based access control.
//!
//! Roles and permissions are closed enumerations; the role → permission table and the role
//! hierarchy are fixed for the lifetime of the process and safe to read from any thread.
//! Protected operations call [`require`] before doing any work.

mod permission;
mod role;
mod table;

pub use permission::Permission;
pub use role::Role;
pub use table::{permissions_for, rank, PermissionSet};

use tracing::warn;

/// Authorization failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("unknown role '{0}'")]
    InvalidRole(String),
    #[error("unknown permission '{0}'")]
    InvalidPermission(String),
    #[error("role {role} lacks permission {permission}")]
    Forbidden { role: Role, permission: Permission },
}

pub fn has_permission(role: Role, permission: Permission) -> bool {
    permissions_for(role).contains(&permission)
}

/// Rank comparison only: a higher-ranked role satisfies checks written for a lower one.
/// Permissions are not composed.
pub fn can_act_as(acting: Role, target: Role) -> bool {
    rank(acting) >= rank(target)
}

/// Guard placed at the top of protected operations.
pub fn require(role: Role, permission: Permission) -> Result<(), AccessError> {
    if has_permission(role, permission) {
        Ok(())
    } else {
        Err(AccessError::Forbidden { role, permission })
    }
}

/// Authorization check over raw labels, e.g. values read from headers or stored records.
pub fn check_labels(role: &str, permission: &str) -> Result<bool, AccessError> {
    let role: Role = role.parse()?;
    let permission: Permission = permission.parse()?;
    Ok(has_permission(role, permission))
}

/// Fail-closed variant of [`check_labels`]: unrecognized input is logged and denied.
pub fn is_allowed(role: &str, permission: &str) -> bool {
    match check_labels(role, permission) {
        Ok(granted) => granted,
        Err(error) => {
            warn!(%error, "denying access check with unrecognized input");
            false
        }
    }
}

pub(crate) fn label_key(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}
