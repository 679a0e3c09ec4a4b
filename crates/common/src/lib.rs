/**
 * Identity resolution: target email address to
 *  the permission id used for every ownership check.
 */
pub mod identity;
/**
 * Dry-run visitor that reports what an ownership
 *  transfer would touch, without mutating anything.
 */
pub mod inspect;
/**
 * Remote entries as returned by the store's item
 *  fetch call, plus the owner records on them.
 */
pub mod node;
/**
 * Permission records and the opaque permission
 *  identity they bind to.
 */
pub mod permission;
/**
 * Path scoping: the caller's requested prefix and
 *  the prefix of the walk's current position.
 */
pub mod prefix;
/**
 * The remote store capability. Everything the walker
 *  and the transferor need from the network sits
 *  behind this trait.
 */
pub mod store;
/**
 * In-memory store used by the integration tests.
 */
pub mod testkit;
/**
 * The ownership state machine run once per visited node.
 */
pub mod transfer;
/**
 * Depth first traversal over the store's folder graph.
 */
pub mod walker;

pub mod prelude {
    pub use crate::identity::{resolve_identity, IdentityError};
    pub use crate::inspect::Inspector;
    pub use crate::node::{Node, NodeKind, Owner, FOLDER_MIME_TYPE, ROOT_FOLDER_ID};
    pub use crate::permission::{NewPermission, Permission, PermissionIdentity, PermissionType, Role};
    pub use crate::prefix::{PathPrefix, PrefixError, TraversalPrefix};
    pub use crate::store::{ChildPage, ChildRef, DriveStore, StoreError};
    pub use crate::transfer::{TransferOutcome, TransferReport, Transferor};
    pub use crate::walker::{Visitor, WalkStats, Walker};
}
