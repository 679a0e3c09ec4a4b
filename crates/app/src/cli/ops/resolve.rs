use clap::Args;

use common::identity::{resolve_identity, IdentityError};

use crate::cli::op::ContextError;

#[derive(Args, Debug, Clone)]
pub struct Resolve {
    /// Email address to look up
    pub email: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Identity(#[from] IdentityError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Resolve {
    type Error = ResolveError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let client = ctx.client()?;
        let identity = resolve_identity(&client, &self.email).await?;
        Ok(format!("User {} is permission ID {}.", self.email.trim(), identity))
    }
}
