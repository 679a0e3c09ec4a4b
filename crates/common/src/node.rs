use serde::{Deserialize, Serialize};

use crate::permission::PermissionIdentity;
use crate::prefix::TraversalPrefix;

/// Id of the synthetic folder at the top of the store ("My Drive").
pub const ROOT_FOLDER_ID: &str = "root";

/// MIME type the store uses to mark an entry as a folder.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Resource kind carried by every file or folder record.
pub const FILE_RESOURCE_KIND: &str = "drive#file";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Folder,
}

/// An owner relation recorded on a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub permission_id: PermissionIdentity,
    /// Set when this owner is the account the session is authenticated as
    #[serde(default)]
    pub is_authenticated_user: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
}

/// A file or folder entry, as returned by the item fetch call.
///
/// `title` is optional: the store has been seen to return records
/// without one, and those have to be handled rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(default = "default_resource_kind")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub owners: Vec<Owner>,
}

fn default_resource_kind() -> String {
    FILE_RESOURCE_KIND.to_string()
}

impl Node {
    pub fn node_kind(&self) -> NodeKind {
        if self.mime_type == FOLDER_MIME_TYPE {
            NodeKind::Folder
        } else {
            NodeKind::File
        }
    }

    pub fn is_folder(&self) -> bool {
        self.node_kind() == NodeKind::Folder
    }

    /// Whether the record describes a file or folder at all. Anything
    /// else the listing hands back is ignored by the walker.
    pub fn is_file_resource(&self) -> bool {
        self.kind == FILE_RESOURCE_KIND
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Human readable name, falling back to the id for untitled entries
    pub fn display_name(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => format!("<untitled:{}>", self.id),
        }
    }

    /// Full path of this node given the prefix of its parent folder
    pub fn display_path(&self, parent: &TraversalPrefix) -> String {
        let mut segments: Vec<String> = parent.segments().to_vec();
        segments.push(self.display_name());
        segments.join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_file_record() {
        let json = r#"{
            "id": "abc",
            "kind": "drive#file",
            "title": "report.pdf",
            "mimeType": "application/pdf",
            "owners": [
                {"permissionId": "111", "isAuthenticatedUser": true, "displayName": "Me"}
            ]
        }"#;

        let node: Node = serde_json::from_str(json).unwrap();
        assert_eq!(node.id, "abc");
        assert_eq!(node.title(), Some("report.pdf"));
        assert_eq!(node.node_kind(), NodeKind::File);
        assert!(node.is_file_resource());
        assert_eq!(node.owners.len(), 1);
        assert!(node.owners[0].is_authenticated_user);
        assert_eq!(node.owners[0].permission_id, PermissionIdentity::from("111"));
    }

    #[test]
    fn test_deserialize_untitled_folder() {
        let json = r#"{"id": "f1", "mimeType": "application/vnd.google-apps.folder"}"#;

        let node: Node = serde_json::from_str(json).unwrap();
        assert!(node.is_folder());
        assert_eq!(node.title(), None);
        assert!(node.owners.is_empty());
        assert_eq!(node.display_name(), "<untitled:f1>");
    }

    #[test]
    fn test_display_path() {
        let node = Node {
            id: "x".to_string(),
            kind: FILE_RESOURCE_KIND.to_string(),
            title: Some("c.txt".to_string()),
            mime_type: "text/plain".to_string(),
            owners: vec![],
        };

        assert_eq!(node.display_path(&TraversalPrefix::root()), "c.txt");

        let parent = TraversalPrefix::root().child("a").child("b");
        assert_eq!(node.display_path(&parent), "a/b/c.txt");
    }
}
