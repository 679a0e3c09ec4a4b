pub mod client;
mod store;
pub mod v2;

pub use client::{ApiError, ApiRequest, DriveClient};
