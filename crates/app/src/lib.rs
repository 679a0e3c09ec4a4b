// Drive v2 REST client and its DriveStore binding
pub mod drive;

// App state (configuration, paths)
pub mod state;

pub mod logging;

pub use drive::{ApiError, DriveClient};
pub use state::{AppConfig, AppState, StateError};
