use std::ops::ControlFlow;

use async_trait::async_trait;

use crate::node::Node;
use crate::permission::PermissionIdentity;
use crate::prefix::TraversalPrefix;
use crate::walker::Visitor;

/// Dry run visitor: reports each node a transfer would touch
/// and the owner it would get. Makes no store calls.
#[derive(Debug)]
pub struct Inspector {
    target: PermissionIdentity,
    visited: usize,
    untitled: usize,
}

impl Inspector {
    pub fn new(target: PermissionIdentity) -> Self {
        Self {
            target,
            visited: 0,
            untitled: 0,
        }
    }

    /// Number of visits seen, folders count twice
    pub fn visited(&self) -> usize {
        self.visited
    }

    pub fn untitled(&self) -> usize {
        self.untitled
    }
}

#[async_trait]
impl Visitor for Inspector {
    async fn visit(&mut self, node: &Node, parent: &TraversalPrefix) -> ControlFlow<()> {
        self.visited += 1;
        if node.title().is_none() {
            self.untitled += 1;
            tracing::warn!(?node, "no title for this item");
        }
        tracing::info!(
            path = %node.display_path(parent),
            owner = %self.target,
            "would set new owner"
        );
        ControlFlow::Continue(())
    }
}
