use reqwest::{Client, RequestBuilder, Url};

use common::store::ChildPage;

use crate::drive::client::{endpoint, ApiError, ApiRequest};

/// `GET files/{folderId}/children`
#[derive(Debug, Clone)]
pub struct ListChildrenRequest {
    pub folder_id: String,
    /// Token from the previous page, if any
    pub page_token: Option<String>,
}

impl ApiRequest for ListChildrenRequest {
    type Response = ChildPage;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let url = endpoint(base_url, &["files", &self.folder_id, "children"])?;
        let mut request = client.get(url);
        if let Some(token) = &self.page_token {
            request = request.query(&[("pageToken", token)]);
        }
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.googleapis.com/drive/v2/").unwrap()
    }

    #[test]
    fn test_first_page_has_no_token() {
        let request = ListChildrenRequest {
            folder_id: "root".to_string(),
            page_token: None,
        }
        .build_request(&base(), &Client::new())
        .unwrap()
        .build()
        .unwrap();

        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(
            request.url().as_str(),
            "https://www.googleapis.com/drive/v2/files/root/children"
        );
    }

    #[test]
    fn test_next_page_carries_token() {
        let request = ListChildrenRequest {
            folder_id: "abc".to_string(),
            page_token: Some("tok/en".to_string()),
        }
        .build_request(&base(), &Client::new())
        .unwrap()
        .build()
        .unwrap();

        assert_eq!(request.url().query(), Some("pageToken=tok%2Fen"));
    }

    #[test]
    fn test_decode_listing_page() {
        let json = r#"{
            "kind": "drive#childList",
            "items": [{"kind": "drive#childReference", "id": "c1"}, {"id": "c2"}],
            "nextPageToken": "next"
        }"#;
        let page: ChildPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.next_token(), Some("next"));

        let last: ChildPage = serde_json::from_str(r#"{"items": [], "nextPageToken": ""}"#).unwrap();
        assert_eq!(last.next_token(), None);
    }
}
