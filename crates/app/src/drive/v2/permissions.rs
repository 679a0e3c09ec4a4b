use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::permission::{NewPermission, Permission, PermissionIdentity};

use crate::drive::client::{endpoint, ApiError, ApiRequest};

/// `GET permissionIds/{email}`
#[derive(Debug, Clone)]
pub struct PermissionIdForEmailRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionIdResponse {
    pub id: PermissionIdentity,
}

impl ApiRequest for PermissionIdForEmailRequest {
    type Response = PermissionIdResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let url = endpoint(base_url, &["permissionIds", &self.email])?;
        Ok(client.get(url))
    }
}

/// `GET files/{fileId}/permissions/{permissionId}`
#[derive(Debug, Clone)]
pub struct GetPermissionRequest {
    pub file_id: String,
    pub permission_id: PermissionIdentity,
}

impl ApiRequest for GetPermissionRequest {
    type Response = Permission;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let url = endpoint(
            base_url,
            &[
                "files",
                &self.file_id,
                "permissions",
                self.permission_id.as_str(),
            ],
        )?;
        Ok(client.get(url))
    }
}

/// `PUT files/{fileId}/permissions/{permissionId}`
///
/// The store refuses to make a permission the owner unless
/// `transfer_ownership` is set.
#[derive(Debug, Clone)]
pub struct UpdatePermissionRequest {
    pub file_id: String,
    pub permission: Permission,
    pub transfer_ownership: bool,
}

impl ApiRequest for UpdatePermissionRequest {
    type Response = Permission;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let url = endpoint(
            base_url,
            &[
                "files",
                &self.file_id,
                "permissions",
                self.permission.id.as_str(),
            ],
        )?;
        let mut request = client.put(url).json(&self.permission);
        if self.transfer_ownership {
            request = request.query(&[("transferOwnership", "true")]);
        }
        Ok(request)
    }
}

/// `POST files/{fileId}/permissions`
#[derive(Debug, Clone)]
pub struct InsertPermissionRequest {
    pub file_id: String,
    pub permission: NewPermission,
    /// Notification text sent to the grantee
    pub email_message: Option<String>,
}

impl ApiRequest for InsertPermissionRequest {
    type Response = Permission;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let url = endpoint(base_url, &["files", &self.file_id, "permissions"])?;
        let mut request = client.post(url).json(&self.permission);
        if let Some(message) = &self.email_message {
            request = request.query(&[("emailMessage", message)]);
        }
        Ok(request)
    }
}
