pub mod children;
pub mod files;
pub mod permissions;

pub use children::ListChildrenRequest;
pub use files::GetFileRequest;
pub use permissions::{
    GetPermissionRequest, InsertPermissionRequest, PermissionIdForEmailRequest,
    PermissionIdResponse, UpdatePermissionRequest,
};
