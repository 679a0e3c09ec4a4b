use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use url::Url;

use super::error::ApiError;
use super::ApiRequest;

/// Default Drive v2 REST base
pub const DEFAULT_API_URL: &str = "https://www.googleapis.com/drive/v2/";

#[derive(Debug, Clone)]
pub struct DriveClient {
    remote: Url,
    client: Client,
}

impl DriveClient {
    /// Build a client whose every request carries `access_token` as a bearer token
    pub fn new(remote: &Url, access_token: &str) -> Result<Self, ApiError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", access_token))?;
        auth.set_sensitive(true);

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(default_headers)
            .user_agent(concat!("reown/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            remote: remote.clone(),
            client,
        })
    }

    pub async fn call<T: ApiRequest>(&self, request: T) -> Result<T::Response, ApiError> {
        let request_builder = request.build_request(&self.remote, &self.client)?;
        let response = request_builder.send().await?;

        if response.status().is_success() {
            Ok(response.json::<T::Response>().await?)
        } else {
            Err(ApiError::HttpStatus(
                response.status(),
                response.text().await?,
            ))
        }
    }
}
