use async_trait::async_trait;

use common::node::Node;
use common::permission::{NewPermission, Permission, PermissionIdentity};
use common::store::{ChildPage, DriveStore, StoreError};

use super::client::DriveClient;
use super::v2::{
    GetFileRequest, GetPermissionRequest, InsertPermissionRequest, ListChildrenRequest,
    PermissionIdForEmailRequest, UpdatePermissionRequest,
};

#[async_trait]
impl DriveStore for DriveClient {
    async fn list_children(
        &self,
        folder_id: &str,
        page_token: Option<&str>,
    ) -> Result<ChildPage, StoreError> {
        let request = ListChildrenRequest {
            folder_id: folder_id.to_string(),
            page_token: page_token.map(str::to_string),
        };
        Ok(self.call(request).await?)
    }

    async fn get_node(&self, node_id: &str) -> Result<Node, StoreError> {
        let request = GetFileRequest {
            file_id: node_id.to_string(),
        };
        Ok(self.call(request).await?)
    }

    async fn permission_id_for_email(&self, email: &str) -> Result<PermissionIdentity, StoreError> {
        let request = PermissionIdForEmailRequest {
            email: email.to_string(),
        };
        let response = self.call(request).await?;
        Ok(response.id)
    }

    async fn get_permission(
        &self,
        node_id: &str,
        permission_id: &PermissionIdentity,
    ) -> Result<Permission, StoreError> {
        let request = GetPermissionRequest {
            file_id: node_id.to_string(),
            permission_id: permission_id.clone(),
        };
        Ok(self.call(request).await?)
    }

    async fn update_permission(
        &self,
        node_id: &str,
        permission: &Permission,
    ) -> Result<Permission, StoreError> {
        let request = UpdatePermissionRequest {
            file_id: node_id.to_string(),
            permission: permission.clone(),
            transfer_ownership: true,
        };
        Ok(self.call(request).await?)
    }

    async fn insert_permission(
        &self,
        node_id: &str,
        permission: &NewPermission,
        email_message: &str,
    ) -> Result<Permission, StoreError> {
        let request = InsertPermissionRequest {
            file_id: node_id.to_string(),
            permission: permission.clone(),
            email_message: Some(email_message.to_string()).filter(|m| !m.is_empty()),
        };
        Ok(self.call(request).await?)
    }
}
