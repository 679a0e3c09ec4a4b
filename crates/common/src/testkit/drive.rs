use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::node::{Node, Owner, FILE_RESOURCE_KIND, FOLDER_MIME_TYPE, ROOT_FOLDER_ID};
use crate::permission::{NewPermission, Permission, PermissionIdentity, PermissionType, Role};
use crate::store::{ChildPage, ChildRef, DriveStore, StoreError};

/// A store call, as seen by the memory drive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListChildren {
        folder_id: String,
        page_token: Option<String>,
    },
    GetNode(String),
    PermissionIdForEmail(String),
    GetPermission {
        node_id: String,
        permission_id: PermissionIdentity,
    },
    UpdatePermission {
        node_id: String,
        permission: Permission,
    },
    InsertPermission {
        node_id: String,
        permission: NewPermission,
        email_message: String,
    },
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Call::UpdatePermission { .. } | Call::InsertPermission { .. }
        )
    }
}

#[derive(Debug, Clone)]
pub struct MemoryDrive {
    inner: Arc<Mutex<MemoryDriveInner>>,
}

#[derive(Debug)]
struct MemoryDriveInner {
    /// The account the "session" is authenticated as
    caller: PermissionIdentity,
    nodes: HashMap<String, Node>,
    /// folder id -> child ids, in listing order
    children: HashMap<String, Vec<String>>,
    /// node id -> permission id -> permission
    permissions: HashMap<String, HashMap<PermissionIdentity, Permission>>,
    emails: HashMap<String, PermissionIdentity>,
    page_size: usize,
    next_id: usize,
    calls: Vec<Call>,
    failing_listings: HashSet<String>,
    failing_fetches: HashSet<String>,
    failing_reads: HashMap<String, StoreError>,
    failing_writes: HashMap<String, StoreError>,
    failing_inserts: HashSet<String>,
}

impl MemoryDrive {
    /// An empty drive whose session is authenticated as `caller`
    pub fn new(caller: impl Into<PermissionIdentity>) -> Self {
        let mut children = HashMap::new();
        children.insert(ROOT_FOLDER_ID.to_string(), Vec::new());

        Self {
            inner: Arc::new(Mutex::new(MemoryDriveInner {
                caller: caller.into(),
                nodes: HashMap::new(),
                children,
                permissions: HashMap::new(),
                emails: HashMap::new(),
                page_size: 100,
                next_id: 0,
                calls: Vec::new(),
                failing_listings: HashSet::new(),
                failing_fetches: HashSet::new(),
                failing_reads: HashMap::new(),
                failing_writes: HashMap::new(),
                failing_inserts: HashSet::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MemoryDriveInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Number of children returned per listing page
    pub fn set_page_size(&self, page_size: usize) {
        self.lock().page_size = page_size.max(1);
    }

    /// Add a folder owned by the caller under `parent_id`, returning its id
    pub fn add_folder(&self, parent_id: &str, title: &str) -> String {
        self.add_node(parent_id, Some(title), FOLDER_MIME_TYPE)
    }

    /// Add a file owned by the caller under `parent_id`, returning its id
    pub fn add_file(&self, parent_id: &str, title: &str) -> String {
        self.add_node(parent_id, Some(title), "text/plain")
    }

    /// Add an entry with the given title (or none) and MIME type
    pub fn add_node(&self, parent_id: &str, title: Option<&str>, mime_type: &str) -> String {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = format!("node-{}", inner.next_id);

        let caller = inner.caller.clone();
        let node = Node {
            id: id.clone(),
            kind: FILE_RESOURCE_KIND.to_string(),
            title: title.map(str::to_string),
            mime_type: mime_type.to_string(),
            owners: vec![Owner {
                permission_id: caller.clone(),
                is_authenticated_user: true,
                display_name: None,
                email_address: None,
            }],
        };

        if mime_type == FOLDER_MIME_TYPE {
            inner.children.entry(id.clone()).or_default();
        }
        inner
            .children
            .entry(parent_id.to_string())
            .or_default()
            .push(id.clone());
        inner.nodes.insert(id.clone(), node);
        inner
            .permissions
            .entry(id.clone())
            .or_default()
            .insert(caller.clone(), owner_permission(caller));

        id
    }

    /// Replace the raw record of an existing node
    pub fn set_node(&self, node: Node) {
        self.lock().nodes.insert(node.id.clone(), node);
    }

    pub fn node(&self, node_id: &str) -> Option<Node> {
        self.lock().nodes.get(node_id).cloned()
    }

    /// Replace a node's owners with a single owner that is not the caller
    pub fn set_foreign_owner(&self, node_id: &str, owner: impl Into<PermissionIdentity>) {
        let owner = owner.into();
        if let Some(node) = self.lock().nodes.get_mut(node_id) {
            node.owners = vec![Owner {
                permission_id: owner,
                is_authenticated_user: false,
                display_name: None,
                email_address: None,
            }];
        }
    }

    /// Give `identity` a non owner permission on a node
    pub fn grant(&self, node_id: &str, identity: impl Into<PermissionIdentity>, role: Role) {
        let identity = identity.into();
        let permission = Permission {
            id: identity.clone(),
            role,
            permission_type: PermissionType::User,
            additional_roles: Vec::new(),
            email_address: None,
            name: None,
        };
        self.lock()
            .permissions
            .entry(node_id.to_string())
            .or_default()
            .insert(identity, permission);
    }

    pub fn register_email(&self, email: &str, identity: impl Into<PermissionIdentity>) {
        self.lock().emails.insert(email.to_string(), identity.into());
    }

    pub fn fail_listing(&self, folder_id: &str) {
        self.lock().failing_listings.insert(folder_id.to_string());
    }

    pub fn fail_fetch(&self, node_id: &str) {
        self.lock().failing_fetches.insert(node_id.to_string());
    }

    /// Make reading a permission on `node_id` fail with `error`
    pub fn fail_permission_read(&self, node_id: &str, error: StoreError) {
        self.lock().failing_reads.insert(node_id.to_string(), error);
    }

    /// Make writing back a permission on `node_id` fail with `error`
    pub fn fail_permission_write(&self, node_id: &str, error: StoreError) {
        self.lock().failing_writes.insert(node_id.to_string(), error);
    }

    pub fn fail_insert(&self, node_id: &str) {
        self.lock().failing_inserts.insert(node_id.to_string());
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Only the calls that would change something remotely
    pub fn mutations(&self) -> Vec<Call> {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.is_mutation())
            .cloned()
            .collect()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Ids of nodes currently owned by `identity`
    pub fn owned_by(&self, identity: &PermissionIdentity) -> HashSet<String> {
        self.lock()
            .nodes
            .values()
            .filter(|n| n.owners.iter().any(|o| &o.permission_id == identity))
            .map(|n| n.id.clone())
            .collect()
    }
}

fn owner_permission(id: PermissionIdentity) -> Permission {
    Permission {
        id,
        role: Role::Owner,
        permission_type: PermissionType::User,
        additional_roles: Vec::new(),
        email_address: None,
        name: None,
    }
}

impl MemoryDriveInner {
    /// Make `identity` the sole owner of a node, demoting the previous owners
    fn hand_over(&mut self, node_id: &str, identity: &PermissionIdentity) {
        if let Some(node) = self.nodes.get_mut(node_id) {
            node.owners = vec![Owner {
                permission_id: identity.clone(),
                is_authenticated_user: *identity == self.caller,
                display_name: None,
                email_address: None,
            }];
        }
        if let Some(permissions) = self.permissions.get_mut(node_id) {
            for (id, permission) in permissions.iter_mut() {
                if id != identity && permission.role == Role::Owner {
                    permission.role = Role::Writer;
                }
            }
        }
    }
}

#[async_trait]
impl DriveStore for MemoryDrive {
    async fn list_children(
        &self,
        folder_id: &str,
        page_token: Option<&str>,
    ) -> Result<ChildPage, StoreError> {
        let mut inner = self.lock();
        inner.calls.push(Call::ListChildren {
            folder_id: folder_id.to_string(),
            page_token: page_token.map(str::to_string),
        });

        if inner.failing_listings.contains(folder_id) {
            return Err(StoreError::Status(500, "listing failed".to_string()));
        }

        let children = inner
            .children
            .get(folder_id)
            .ok_or_else(|| StoreError::NotFound(format!("folder {}", folder_id)))?;

        let start = match page_token {
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| StoreError::Status(400, format!("bad page token {}", token)))?,
            None => 0,
        };
        let end = (start + inner.page_size).min(children.len());
        let items = children
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .map(|id| ChildRef { id: id.clone() })
            .collect();
        let next_page_token = (end < children.len()).then(|| end.to_string());

        Ok(ChildPage {
            items,
            next_page_token,
        })
    }

    async fn get_node(&self, node_id: &str) -> Result<Node, StoreError> {
        let mut inner = self.lock();
        inner.calls.push(Call::GetNode(node_id.to_string()));

        if inner.failing_fetches.contains(node_id) {
            return Err(StoreError::Transport("connection reset".to_string()));
        }

        inner
            .nodes
            .get(node_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("file {}", node_id)))
    }

    async fn permission_id_for_email(&self, email: &str) -> Result<PermissionIdentity, StoreError> {
        let mut inner = self.lock();
        inner
            .calls
            .push(Call::PermissionIdForEmail(email.to_string()));

        inner
            .emails
            .get(email)
            .cloned()
            .ok_or_else(|| StoreError::Status(400, format!("unknown user {}", email)))
    }

    async fn get_permission(
        &self,
        node_id: &str,
        permission_id: &PermissionIdentity,
    ) -> Result<Permission, StoreError> {
        let mut inner = self.lock();
        inner.calls.push(Call::GetPermission {
            node_id: node_id.to_string(),
            permission_id: permission_id.clone(),
        });

        if let Some(error) = inner.failing_reads.get(node_id) {
            return Err(error.clone());
        }

        inner
            .permissions
            .get(node_id)
            .and_then(|p| p.get(permission_id))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("permission {}", permission_id)))
    }

    async fn update_permission(
        &self,
        node_id: &str,
        permission: &Permission,
    ) -> Result<Permission, StoreError> {
        let mut inner = self.lock();
        inner.calls.push(Call::UpdatePermission {
            node_id: node_id.to_string(),
            permission: permission.clone(),
        });

        if let Some(error) = inner.failing_writes.get(node_id) {
            return Err(error.clone());
        }

        let existing = inner
            .permissions
            .get_mut(node_id)
            .and_then(|p| p.get_mut(&permission.id))
            .ok_or_else(|| StoreError::NotFound(format!("permission {}", permission.id)))?;
        *existing = permission.clone();

        if permission.role == Role::Owner {
            inner.hand_over(node_id, &permission.id);
        }
        Ok(permission.clone())
    }

    async fn insert_permission(
        &self,
        node_id: &str,
        permission: &NewPermission,
        email_message: &str,
    ) -> Result<Permission, StoreError> {
        let mut inner = self.lock();
        inner.calls.push(Call::InsertPermission {
            node_id: node_id.to_string(),
            permission: permission.clone(),
            email_message: email_message.to_string(),
        });

        if inner.failing_inserts.contains(node_id) {
            return Err(StoreError::Status(403, "insufficient permissions".to_string()));
        }
        if !inner.nodes.contains_key(node_id) {
            return Err(StoreError::NotFound(format!("file {}", node_id)));
        }

        let created = Permission {
            id: permission.id.clone(),
            role: permission.role,
            permission_type: permission.permission_type,
            additional_roles: Vec::new(),
            email_address: None,
            name: None,
        };
        inner
            .permissions
            .entry(node_id.to_string())
            .or_default()
            .insert(created.id.clone(), created.clone());

        if created.role == Role::Owner {
            inner.hand_over(node_id, &created.id);
        }
        Ok(created)
    }
}
