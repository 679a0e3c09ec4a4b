use std::error::Error;
use std::path::PathBuf;

use url::Url;

use reown::drive::{ApiError, DriveClient};
use reown::state::{AppState, StateError};

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("no access token: pass --access-token, set REOWN_ACCESS_TOKEN or add access_token to config.toml")]
    MissingAccessToken,
    #[error("failed to create API client: {0}")]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone)]
pub struct OpContext {
    /// Optional custom config path (defaults to ~/.reown)
    pub config_path: Option<PathBuf>,
    /// Loaded state, defaults if nothing is on disk yet
    pub state: AppState,
    /// Drive API base, flag first then config
    pub api_url: Url,
    access_token: Option<String>,
}

impl OpContext {
    /// Load config and settle which API url and token to use.
    ///
    /// Priority: explicit flag (or env) > config file > built in default.
    pub fn new(
        config_path: Option<PathBuf>,
        api_url: Option<Url>,
        access_token: Option<String>,
    ) -> Result<Self, StateError> {
        let state = AppState::load(config_path.clone())?;
        let api_url = api_url.unwrap_or_else(|| state.config.api_url.clone());
        let access_token = access_token
            .or_else(|| state.config.access_token.clone())
            .filter(|t| !t.trim().is_empty());

        Ok(Self {
            config_path,
            state,
            api_url,
            access_token,
        })
    }

    /// A Drive client authenticated with the resolved access token
    pub fn client(&self) -> Result<DriveClient, ContextError> {
        let token = self
            .access_token
            .as_deref()
            .ok_or(ContextError::MissingAccessToken)?;
        Ok(DriveClient::new(&self.api_url, token)?)
    }
}

#[async_trait::async_trait]
pub trait Op: Send + Sync {
    type Error: Error + Send + Sync + 'static;
    type Output;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}

#[macro_export]
macro_rules! command_enum {
    ($(($variant:ident, $type:ty)),* $(,)?) => {
        #[derive(Subcommand, Debug, Clone)]
        pub enum Command {
            $($variant($type),)*
        }

        #[derive(Debug)]
        pub enum OpOutput {
            $($variant(<$type as $crate::cli::op::Op>::Output),)*
        }

        #[derive(Debug, thiserror::Error)]
        pub enum OpError {
            $(
                #[error(transparent)]
                $variant(<$type as $crate::cli::op::Op>::Error),
            )*
        }

        #[async_trait::async_trait]
        impl $crate::cli::op::Op for Command {
            type Output = OpOutput;
            type Error = OpError;

            async fn execute(&self, ctx: &$crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
                match self {
                    $(
                        Command::$variant(op) => {
                            op.execute(ctx).await
                                .map(OpOutput::$variant)
                                .map_err(OpError::$variant)
                        },
                    )*
                }
            }
        }

        impl std::fmt::Display for OpOutput {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        OpOutput::$variant(output) => write!(f, "{}", output),
                    )*
                }
            }
        }
    };
}
