use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use common::transfer::DEFAULT_EMAIL_MESSAGE;

use crate::drive::client::DEFAULT_API_URL;

pub const APP_NAME: &str = "reown";
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the Drive v2 REST API
    #[serde(default = "default_api_url")]
    pub api_url: Url,
    /// OAuth access token for the account whose files are handed over.
    /// Usually passed per run instead of stored here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Message sent to the new owner when a permission has to be created
    #[serde(default = "default_email_message")]
    pub email_message: String,
}

fn default_api_url() -> Url {
    Url::parse(DEFAULT_API_URL).expect("hardcoded URL must parse")
}

fn default_email_message() -> String {
    DEFAULT_EMAIL_MESSAGE.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            access_token: None,
            email_message: default_email_message(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the reown directory (~/.reown)
    pub reown_dir: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration, defaults if there is no config file
    pub config: AppConfig,
}

impl AppState {
    /// Get the reown directory path (custom or default ~/.reown)
    pub fn reown_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new reown directory with a config file
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let reown_dir = Self::reown_dir(custom_path)?;

        if reown_dir.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&reown_dir)?;

        let config = config.unwrap_or_default();
        let config_path = reown_dir.join(CONFIG_FILE_NAME);
        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        Ok(Self {
            reown_dir,
            config_path,
            config,
        })
    }

    /// Load state from the reown directory. A missing directory or
    ///  config file is not an error: defaults are used instead.
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let reown_dir = Self::reown_dir(custom_path)?;
        let config_path = reown_dir.join(CONFIG_FILE_NAME);

        let config = if config_path.exists() {
            let config_toml = fs::read_to_string(&config_path)?;
            toml::from_str(&config_toml)?
        } else {
            AppConfig::default()
        };

        Ok(Self {
            reown_dir,
            config_path,
            config,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("reown directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_without_directory_uses_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let state = AppState::load(Some(temp.path().join("missing"))).unwrap();

        assert_eq!(state.config, AppConfig::default());
        assert_eq!(state.config.api_url.as_str(), DEFAULT_API_URL);
        assert_eq!(state.config.email_message, DEFAULT_EMAIL_MESSAGE);
    }

    #[test]
    fn test_init_then_load() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join("reown");

        let config = AppConfig {
            email_message: "You own these now.".to_string(),
            ..AppConfig::default()
        };
        let initialized = AppState::init(Some(dir.clone()), Some(config.clone())).unwrap();
        assert!(initialized.config_path.exists());

        let loaded = AppState::load(Some(dir)).unwrap();
        assert_eq!(loaded.config, config);
    }

    #[test]
    fn test_init_twice_fails() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join("reown");

        AppState::init(Some(dir.clone()), None).unwrap();
        assert!(matches!(
            AppState::init(Some(dir), None),
            Err(StateError::AlreadyInitialized)
        ));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "access_token = \"ya29.token\"\n",
        )
        .unwrap();

        let state = AppState::load(Some(temp.path().to_path_buf())).unwrap();
        assert_eq!(state.config.access_token.as_deref(), Some("ya29.token"));
        assert_eq!(state.config.api_url.as_str(), DEFAULT_API_URL);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "api_url = 12").unwrap();

        assert!(matches!(
            AppState::load(Some(temp.path().to_path_buf())),
            Err(StateError::TomlDe(_))
        ));
    }
}
