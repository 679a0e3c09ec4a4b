use clap::Args;

use reown::state::{AppConfig, AppState, StateError};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Message sent to new owners when a permission has to be created
    #[arg(long)]
    pub email_message: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            api_url: ctx.api_url.clone(),
            access_token: None,
            email_message: self
                .email_message
                .clone()
                .unwrap_or(defaults.email_message),
        };

        let state = AppState::init(ctx.config_path.clone(), Some(config))?;

        let output = format!(
            "Initialized reown directory at: {}\n\
             - Config: {}\n\
             - API url: {}\n\
             - Email message: {}",
            state.reown_dir.display(),
            state.config_path.display(),
            state.config.api_url,
            state.config.email_message,
        );

        Ok(output)
    }
}
