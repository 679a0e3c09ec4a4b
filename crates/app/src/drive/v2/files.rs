use reqwest::{Client, RequestBuilder, Url};

use common::node::Node;

use crate::drive::client::{endpoint, ApiError, ApiRequest};

/// `GET files/{fileId}`
#[derive(Debug, Clone)]
pub struct GetFileRequest {
    pub file_id: String,
}

impl ApiRequest for GetFileRequest {
    type Response = Node;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let url = endpoint(base_url, &["files", &self.file_id])?;
        Ok(client.get(url))
    }
}
