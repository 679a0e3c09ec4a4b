use std::ops::ControlFlow;

use async_trait::async_trait;

use crate::node::{Node, ROOT_FOLDER_ID};
use crate::prefix::{PathPrefix, TraversalPrefix};
use crate::store::DriveStore;

/// Callback the walker invokes on every in-scope node.
///
/// Returning `ControlFlow::Break` stops the walk: no further
/// store calls are made and the break is handed back to the
/// caller of [`Walker::walk`].
#[async_trait]
pub trait Visitor: Send {
    /// # Arguments
    /// * `node` - The node being visited
    /// * `parent` - Prefix of the folder the node was listed in
    async fn visit(&mut self, node: &Node, parent: &TraversalPrefix) -> ControlFlow<()>;
}

/// Counters collected over one walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Folders whose listing was started
    pub folders_listed: usize,
    /// Child records fetched in full
    pub items_fetched: usize,
    /// Folders whose listing was cut short by a store error
    pub listings_aborted: usize,
    /// Entries left out because their name can't lead to the requested path
    pub pruned: usize,
}

/// Depth first walk of the store's folder graph, scoped to a path.
///
/// For each child of a folder the walker:
///  1. fetches its full record;
///  2. at the store root, drops it unless its title is the first
///     segment of the path;
///  3. visits it if the folder's prefix is at or below the path;
///  4. if it is a folder whose name agrees with the path, walks it,
///     then visits it a second time once its subtree is done.
///
/// A listing or fetch error ends the listing of the folder it
/// happened in; the walk carries on with that folder's parent.
pub struct Walker<'a, S: DriveStore + ?Sized> {
    store: &'a S,
    path_prefix: &'a PathPrefix,
    stats: WalkStats,
}

impl<'a, S: DriveStore + ?Sized> Walker<'a, S> {
    pub fn new(store: &'a S, path_prefix: &'a PathPrefix) -> Self {
        Self {
            store,
            path_prefix,
            stats: WalkStats::default(),
        }
    }

    pub fn stats(&self) -> WalkStats {
        self.stats
    }

    /// Walk from the store root. Returns `Break` if a visitor stopped the walk.
    pub async fn walk<V: Visitor + ?Sized>(&mut self, visitor: &mut V) -> ControlFlow<()> {
        self.walk_folder(ROOT_FOLDER_ID, &TraversalPrefix::root(), visitor)
            .await
    }

    async fn walk_folder<V: Visitor + ?Sized>(
        &mut self,
        folder_id: &str,
        current: &TraversalPrefix,
        visitor: &mut V,
    ) -> ControlFlow<()> {
        tracing::info!(prefix = %current, "gathering file listings");
        self.stats.folders_listed += 1;

        let mut page_token: Option<String> = None;
        loop {
            let page = match self
                .store
                .list_children(folder_id, page_token.as_deref())
                .await
            {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!(prefix = %current, error = %e, "listing failed");
                    self.stats.listings_aborted += 1;
                    return ControlFlow::Continue(());
                }
            };

            for child in &page.items {
                let node = match self.store.get_node(&child.id).await {
                    Ok(node) => node,
                    Err(e) => {
                        tracing::warn!(
                            prefix = %current,
                            id = %child.id,
                            error = %e,
                            "fetching item failed"
                        );
                        self.stats.listings_aborted += 1;
                        return ControlFlow::Continue(());
                    }
                };
                self.stats.items_fetched += 1;

                self.process_child(folder_id, &node, current, visitor)
                    .await?;
            }

            match page.next_token() {
                Some(token) => page_token = Some(token.to_string()),
                None => break,
            }
        }

        ControlFlow::Continue(())
    }

    async fn process_child<V: Visitor + ?Sized>(
        &mut self,
        folder_id: &str,
        node: &Node,
        current: &TraversalPrefix,
        visitor: &mut V,
    ) -> ControlFlow<()> {
        if !node.is_file_resource() {
            tracing::debug!(id = %node.id, kind = %node.kind, "ignoring non-file record");
            return ControlFlow::Continue(());
        }

        if folder_id == ROOT_FOLDER_ID && node.title() != Some(self.path_prefix.first()) {
            tracing::debug!(name = %node.display_name(), "skipping top level entry");
            self.stats.pruned += 1;
            return ControlFlow::Continue(());
        }

        if self.path_prefix.covers(current) {
            visitor.visit(node, current).await?;
        }

        if !node.is_folder() {
            return ControlFlow::Continue(());
        }

        let Some(title) = node.title() else {
            tracing::debug!(id = %node.id, "not descending into untitled folder");
            return ControlFlow::Continue(());
        };

        let next = current.child(title);
        if !self.path_prefix.may_contain(&next) {
            self.stats.pruned += 1;
            return ControlFlow::Continue(());
        }

        Box::pin(self.walk_folder(&node.id, &next, visitor)).await?;
        visitor.visit(node, current).await
    }
}
