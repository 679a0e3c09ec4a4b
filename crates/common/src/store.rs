use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::node::Node;
use crate::permission::{NewPermission, Permission, PermissionIdentity};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The requested record does not exist. Expected when asking
    ///  for a permission the target doesn't hold yet
    #[error("not found: {0}")]
    NotFound(String),
    /// The store answered with a non success status
    #[error("status {0}: {1}")]
    Status(u16, String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Reference to a child entry, as returned by the listing call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildRef {
    pub id: String,
}

/// One page of a folder listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildPage {
    #[serde(default)]
    pub items: Vec<ChildRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl ChildPage {
    /// Token for the following page, if there is one. An empty
    ///  token ends the listing the same way a missing one does.
    pub fn next_token(&self) -> Option<&str> {
        self.next_page_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Everything the walk needs from the remote store. Calls are made
/// one at a time and awaited before the next is issued.
#[async_trait]
pub trait DriveStore: Send + Sync {
    /// List one page of a folder's children
    ///
    /// # Arguments
    /// * `folder_id` - The folder to list, `root` for the store root
    /// * `page_token` - Token from the previous page, `None` for the first
    async fn list_children(
        &self,
        folder_id: &str,
        page_token: Option<&str>,
    ) -> Result<ChildPage, StoreError>;

    /// Fetch a node's full metadata, owners included
    async fn get_node(&self, node_id: &str) -> Result<Node, StoreError>;

    /// Map an email address to the id used in permission records
    async fn permission_id_for_email(&self, email: &str) -> Result<PermissionIdentity, StoreError>;

    /// Read the permission `permission_id` holds on `node_id`.
    /// Fails with `StoreError::NotFound` if it holds none.
    async fn get_permission(
        &self,
        node_id: &str,
        permission_id: &PermissionIdentity,
    ) -> Result<Permission, StoreError>;

    /// Write back a permission, transferring ownership of `node_id`
    ///  to it when its role is owner
    async fn update_permission(
        &self,
        node_id: &str,
        permission: &Permission,
    ) -> Result<Permission, StoreError>;

    /// Create a new permission on `node_id`
    ///
    /// # Arguments
    /// * `email_message` - Notification text sent to the new grantee
    async fn insert_permission(
        &self,
        node_id: &str,
        permission: &NewPermission,
        email_message: &str,
    ) -> Result<Permission, StoreError>;
}
