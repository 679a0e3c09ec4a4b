use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque id the store binds to an account. Resolved once from
/// the target email and passed unchanged through the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionIdentity(String);

impl PermissionIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PermissionIdentity {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PermissionIdentity {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for PermissionIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Owner,
    Organizer,
    FileOrganizer,
    Writer,
    Reader,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionType {
    User,
    Group,
    Domain,
    Anyone,
}

/// A permission record on a node, as read back from the store.
/// Written back whole on update, so optional fields we don't
/// touch are carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub id: PermissionIdentity,
    pub role: Role,
    #[serde(rename = "type")]
    pub permission_type: PermissionType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Permission {
    /// The same record with its role raised to owner
    pub fn into_owner(mut self) -> Self {
        self.role = Role::Owner;
        self
    }
}

/// Body of a permission insert call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPermission {
    pub role: Role,
    #[serde(rename = "type")]
    pub permission_type: PermissionType,
    pub id: PermissionIdentity,
}

impl NewPermission {
    /// A user-typed owner permission for `id`
    pub fn owner(id: PermissionIdentity) -> Self {
        Self {
            role: Role::Owner,
            permission_type: PermissionType::User,
            id,
        }
    }
}
