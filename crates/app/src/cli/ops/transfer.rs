use clap::Args;

use common::identity::{resolve_identity, IdentityError};
use common::inspect::Inspector;
use common::permission::PermissionIdentity;
use common::prefix::{PathPrefix, PrefixError};
use common::transfer::{TransferReport, Transferor};
use common::walker::{WalkStats, Walker};

use crate::cli::op::ContextError;

#[derive(Args, Debug, Clone)]
pub struct Transfer {
    /// Folder to hand over, relative to My Drive (e.g. "Projects/2024")
    pub path: String,

    /// Email address of the new owner
    pub email: String,

    /// Don't report entries the new owner already owns
    #[arg(long)]
    pub hide_already_owned: bool,

    /// Only report what would change, without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("invalid path: {0}")]
    Path(#[from] PrefixError),
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Identity(#[from] IdentityError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Transfer {
    type Error = TransferError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let prefix = PathPrefix::parse(&self.path)?;
        let client = ctx.client()?;

        tracing::info!(path = %prefix, owner = %self.email, "changing ownership");

        // nothing to hand over to without an identity, so this is fatal
        let identity = resolve_identity(&client, &self.email).await?;

        let mut walker = Walker::new(&client, &prefix);

        if self.dry_run {
            let mut inspector = Inspector::new(identity.clone());
            let flow = walker.walk(&mut inspector).await;
            tracing::debug!(stopped = flow.is_break(), "dry run finished");
            return Ok(dry_run_summary(
                &prefix,
                &self.email,
                &identity,
                inspector.visited(),
                walker.stats(),
            ));
        }

        let mut transferor = Transferor::new(&client, identity.clone())
            .show_already_owned(!self.hide_already_owned)
            .email_message(ctx.state.config.email_message.clone());
        let flow = walker.walk(&mut transferor).await;
        tracing::debug!(stopped = flow.is_break(), "walk finished");

        Ok(summary(
            &prefix,
            &self.email,
            &identity,
            transferor.report(),
            walker.stats(),
        ))
    }
}

fn summary(
    prefix: &PathPrefix,
    email: &str,
    identity: &PermissionIdentity,
    report: TransferReport,
    stats: WalkStats,
) -> String {
    let mut lines = vec![
        format!(
            "Changed ownership under \"{}\" to {} ({})",
            prefix, email, identity
        ),
        format!("  {}", report),
        walk_line(stats),
    ];
    if report.stopped_at_root {
        lines.push("  stopped after changing the top level folder".to_string());
    }
    lines.join("\n")
}

fn dry_run_summary(
    prefix: &PathPrefix,
    email: &str,
    identity: &PermissionIdentity,
    visited: usize,
    stats: WalkStats,
) -> String {
    [
        format!(
            "Dry run: would set owner of \"{}\" to {} ({})",
            prefix, email, identity
        ),
        format!("  {} visits, nothing changed", visited),
        walk_line(stats),
    ]
    .join("\n")
}

fn walk_line(stats: WalkStats) -> String {
    format!(
        "  listed {} folders, fetched {} items, {} listings aborted",
        stats.folders_listed, stats.items_fetched, stats.listings_aborted
    )
}
