use std::fmt;
use std::ops::ControlFlow;

use async_trait::async_trait;

use crate::node::Node;
use crate::permission::{NewPermission, PermissionIdentity};
use crate::prefix::TraversalPrefix;
use crate::store::{DriveStore, StoreError};
use crate::walker::Visitor;

/// Notification sent along with a newly inserted owner permission
pub const DEFAULT_EMAIL_MESSAGE: &str = "Automated recursive transfer of ownership.";

/// Terminal state of one node after a transfer attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    /// The target already owns the node; nothing was written
    AlreadyOwned,
    /// The authenticated account doesn't own the node, so it can't hand it over
    Skipped,
    /// The target's existing permission was raised to owner
    Done,
    /// The target had no permission; a new owner permission was inserted
    Created,
    /// A store call failed; the node is left as it was
    Failed,
}

/// Tally of outcomes over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferReport {
    pub already_owned: usize,
    pub skipped: usize,
    pub done: usize,
    pub created: usize,
    pub failed: usize,
    /// Set when the run ended early after changing a top level node
    pub stopped_at_root: bool,
}

impl TransferReport {
    pub fn record(&mut self, outcome: TransferOutcome) {
        match outcome {
            TransferOutcome::AlreadyOwned => self.already_owned += 1,
            TransferOutcome::Skipped => self.skipped += 1,
            TransferOutcome::Done => self.done += 1,
            TransferOutcome::Created => self.created += 1,
            TransferOutcome::Failed => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.already_owned + self.skipped + self.done + self.created + self.failed
    }

    /// Nodes whose owner was actually changed
    pub fn changed(&self) -> usize {
        self.done + self.created
    }
}

impl fmt::Display for TransferReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} changed ({} updated, {} created), {} already owned, {} skipped, {} failed",
            self.changed(),
            self.done,
            self.created,
            self.already_owned,
            self.skipped,
            self.failed
        )
    }
}

/// Hands ownership of every visited node to a target identity.
///
/// Per node: if any owner is already the target, nothing happens.
/// Otherwise, if the authenticated account is among the owners, the
/// target's permission is fetched and raised to owner; if the target
/// holds no permission on the node, a new owner permission is inserted
/// instead. Every store failure is final for that node and the run
/// moves on.
///
/// Top level nodes are visited last, after their whole subtree. Once
/// one of them has been updated the visitor stops the walk.
pub struct Transferor<'a, S: DriveStore + ?Sized> {
    store: &'a S,
    target: PermissionIdentity,
    show_already_owned: bool,
    email_message: String,
    report: TransferReport,
}

impl<'a, S: DriveStore + ?Sized> Transferor<'a, S> {
    pub fn new(store: &'a S, target: PermissionIdentity) -> Self {
        Self {
            store,
            target,
            show_already_owned: true,
            email_message: DEFAULT_EMAIL_MESSAGE.to_string(),
            report: TransferReport::default(),
        }
    }

    /// Whether to report nodes the target already owns (on by default)
    pub fn show_already_owned(mut self, show: bool) -> Self {
        self.show_already_owned = show;
        self
    }

    pub fn email_message(mut self, message: impl Into<String>) -> Self {
        self.email_message = message.into();
        self
    }

    pub fn report(&self) -> TransferReport {
        self.report
    }

    /// Run the ownership state machine on one node and record the outcome
    pub async fn transfer(&mut self, node: &Node, parent: &TraversalPrefix) -> TransferOutcome {
        let path = node.display_path(parent);
        let outcome = self.apply(node, &path).await;
        self.report.record(outcome);
        outcome
    }

    async fn apply(&self, node: &Node, path: &str) -> TransferOutcome {
        let mut caller_owns = false;
        for owner in &node.owners {
            if owner.permission_id == self.target {
                if self.show_already_owned {
                    tracing::info!(path, "ownership already correct");
                }
                return TransferOutcome::AlreadyOwned;
            }
            if owner.is_authenticated_user {
                caller_owns = true;
            }
        }

        if !caller_owns {
            tracing::info!(path, "skipped: not owned by current user");
            return TransferOutcome::Skipped;
        }

        match self.update_existing(node).await {
            Ok(()) => {
                tracing::info!(path, owner = %self.target, "ownership changed");
                return TransferOutcome::Done;
            }
            Err(e) if e.is_not_found() => {
                tracing::info!(path, "no permission to update, creating new ownership permission");
            }
            Err(e) => {
                tracing::warn!(path, error = %e, "changing ownership failed");
                return TransferOutcome::Failed;
            }
        }

        let permission = NewPermission::owner(self.target.clone());
        match self
            .store
            .insert_permission(&node.id, &permission, &self.email_message)
            .await
        {
            Ok(_) => {
                tracing::info!(path, owner = %self.target, "ownership permission created");
                TransferOutcome::Created
            }
            Err(e) => {
                tracing::warn!(path, error = %e, "inserting ownership permission failed");
                TransferOutcome::Failed
            }
        }
    }

    async fn update_existing(&self, node: &Node) -> Result<(), StoreError> {
        let permission = self.store.get_permission(&node.id, &self.target).await?;
        self.store
            .update_permission(&node.id, &permission.into_owner())
            .await?;
        Ok(())
    }
}

#[async_trait]
impl<S: DriveStore + ?Sized> Visitor for Transferor<'_, S> {
    async fn visit(&mut self, node: &Node, parent: &TraversalPrefix) -> ControlFlow<()> {
        let outcome = self.transfer(node, parent).await;
        if outcome == TransferOutcome::Done && parent.is_root() {
            tracing::info!(path = %node.display_name(), "top level folder changed, stopping");
            self.report.stopped_at_root = true;
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    }
}
