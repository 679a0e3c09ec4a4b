#[allow(clippy::module_inception)]
mod client;
mod error;

pub use client::{DriveClient, DEFAULT_API_URL};
pub use error::ApiError;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

/// One Drive API endpoint: knows how to turn itself into a request
/// and what the response body decodes to.
pub trait ApiRequest {
    type Response: DeserializeOwned;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError>;
}

/// Append path segments to the API base, percent-encoding each one.
///
/// `endpoint("https://host/drive/v2/", &["files", "a b"])` gives
/// `https://host/drive/v2/files/a%20b`.
pub fn endpoint(base_url: &Url, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|_| ApiError::InvalidBase(base_url.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_with_trailing_slash() {
        let base = Url::parse("https://www.googleapis.com/drive/v2/").unwrap();
        let url = endpoint(&base, &["files", "abc", "children"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/drive/v2/files/abc/children"
        );
    }

    #[test]
    fn test_endpoint_without_trailing_slash() {
        let base = Url::parse("http://localhost:8080/drive/v2").unwrap();
        let url = endpoint(&base, &["permissionIds", "user@example.com"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/drive/v2/permissionIds/user@example.com"
        );
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let base = Url::parse("http://localhost/").unwrap();
        let url = endpoint(&base, &["files", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost/files/a%2Fb%20c");
    }

    #[test]
    fn test_endpoint_rejects_cannot_be_a_base() {
        let base = Url::parse("mailto:someone@example.com").unwrap();
        assert!(matches!(
            endpoint(&base, &["files"]),
            Err(ApiError::InvalidBase(_))
        ));
    }
}
