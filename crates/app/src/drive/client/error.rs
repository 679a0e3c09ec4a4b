use reqwest::StatusCode;

use common::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("API base URL cannot take a path: {0}")]
    InvalidBase(String),
    #[error("access token is not a valid header value")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),
    #[error("HTTP status {0}: {1}")]
    HttpStatus(StatusCode, String),
}

impl From<ApiError> for StoreError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::HttpStatus(StatusCode::NOT_FOUND, body) => StoreError::NotFound(body),
            ApiError::HttpStatus(status, body) => StoreError::Status(status.as_u16(), body),
            ApiError::Reqwest(e) if e.is_decode() => StoreError::Decode(e.to_string()),
            other => StoreError::Transport(other.to_string()),
        }
    }
}
