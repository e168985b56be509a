// API client module: a small blocking HTTP client for the two Notion
// endpoints the uploader needs. Headers and credentials are fixed when the
// client is built and never change afterwards.

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::blocks::ContentItem;
use crate::error::ApiError;
use crate::upload::MAX_ITEMS_PER_CALL;

/// Default Notion REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";

/// API version pinned in the `Notion-Version` header.
pub const NOTION_VERSION: &str = "2022-06-28";

/// The remote page that anchors all uploaded items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub id: String,
    pub url: Option<String>,
}

/// The two calls the bulk uploader makes against a document store.
///
/// Implementations must not truncate: a call with more items than the
/// store accepts is an error, not a partial write.
pub trait DocumentApi {
    /// Create a page titled `title` seeded with `items`.
    fn create_container(&self, title: &str, items: &[ContentItem]) -> Result<Container, ApiError>;

    /// Append `items` after the existing children of `container_id`.
    fn append_items(&self, container_id: &str, items: &[ContentItem]) -> Result<(), ApiError>;
}

impl<T: DocumentApi + ?Sized> DocumentApi for &T {
    fn create_container(&self, title: &str, items: &[ContentItem]) -> Result<Container, ApiError> {
        (**self).create_container(title, items)
    }

    fn append_items(&self, container_id: &str, items: &[ContentItem]) -> Result<(), ApiError> {
        (**self).append_items(container_id, items)
    }
}

/// Blocking Notion client holding the HTTP client, base URL and the parent
/// page under which new pages are created.
#[derive(Clone)]
pub struct NotionClient {
    client: Client,
    base_url: String,
    parent_page_id: String,
}

// --- Request / response payloads -------------------------------------------

#[derive(Serialize)]
struct ParentRef<'a> {
    page_id: &'a str,
}

#[derive(Serialize)]
struct TitleText<'a> {
    content: &'a str,
}

#[derive(Serialize)]
struct TitleFragment<'a> {
    text: TitleText<'a>,
}

#[derive(Serialize)]
struct TitleProperty<'a> {
    title: [TitleFragment<'a>; 1],
}

#[derive(Serialize)]
struct PageProperties<'a> {
    title: TitleProperty<'a>,
}

/// Body of `POST /pages`.
#[derive(Serialize)]
pub struct CreatePageRequest<'a> {
    parent: ParentRef<'a>,
    properties: PageProperties<'a>,
    children: &'a [ContentItem],
}

impl<'a> CreatePageRequest<'a> {
    pub fn new(parent_page_id: &'a str, title: &'a str, children: &'a [ContentItem]) -> Self {
        CreatePageRequest {
            parent: ParentRef {
                page_id: parent_page_id,
            },
            properties: PageProperties {
                title: TitleProperty {
                    title: [TitleFragment {
                        text: TitleText { content: title },
                    }],
                },
            },
            children,
        }
    }
}

/// Body of `PATCH /blocks/{id}/children`.
#[derive(Serialize)]
pub struct AppendChildrenRequest<'a> {
    pub children: &'a [ContentItem],
}

#[derive(Deserialize)]
struct PageResponse {
    id: Option<String>,
    url: Option<String>,
}

/// Notion's error envelope. Every field is optional so a partial body still
/// yields whatever it carries.
#[derive(Deserialize)]
struct ErrorResponse {
    code: Option<String>,
    message: Option<String>,
}

impl NotionClient {
    /// Build a client for `base_url` authenticated with `api_key`.
    pub fn new(
        api_key: &str,
        parent_page_id: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .default_headers(default_headers(api_key)?)
            .build()?;
        Ok(NotionClient {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            parent_page_id: parent_page_id.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn parent_page_id(&self) -> &str {
        &self.parent_page_id
    }
}

fn default_headers(api_key: &str) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    let mut bearer = HeaderValue::from_str(&format!("Bearer {}", api_key))
        .map_err(|_| ApiError::InvalidApiKey)?;
    bearer.set_sensitive(true);
    headers.insert(AUTHORIZATION, bearer);
    headers.insert("Notion-Version", HeaderValue::from_static(NOTION_VERSION));
    Ok(headers)
}

fn check_item_count(items: &[ContentItem]) -> Result<(), ApiError> {
    if items.len() > MAX_ITEMS_PER_CALL {
        return Err(ApiError::TooManyItems {
            count: items.len(),
            limit: MAX_ITEMS_PER_CALL,
        });
    }
    Ok(())
}

/// Turn a non-success response into `ApiError::Status`, keeping Notion's
/// `code` and `message` when the body is its JSON error envelope.
fn error_from_response(res: Response) -> ApiError {
    let status = res.status().as_u16();
    let text = res.text().unwrap_or_default();
    match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(body) => ApiError::Status {
            status,
            code: body.code,
            message: body.message.unwrap_or(text),
        },
        Err(_) => ApiError::Status {
            status,
            code: None,
            message: text,
        },
    }
}

impl DocumentApi for NotionClient {
    fn create_container(&self, title: &str, items: &[ContentItem]) -> Result<Container, ApiError> {
        check_item_count(items)?;
        let url = format!("{}/pages", self.base_url);
        debug!(%url, items = items.len(), "creating page");

        let res = self
            .client
            .post(&url)
            .json(&CreatePageRequest::new(&self.parent_page_id, title, items))
            .send()?;
        if !res.status().is_success() {
            return Err(error_from_response(res));
        }

        let text = res.text()?;
        let page: PageResponse = serde_json::from_str(&text)
            .map_err(|e| ApiError::MalformedResponse(format!("page response is not valid JSON: {}", e)))?;
        match page.id {
            Some(id) if !id.is_empty() => Ok(Container { id, url: page.url }),
            _ => Err(ApiError::MalformedResponse("page response has no `id`".into())),
        }
    }

    fn append_items(&self, container_id: &str, items: &[ContentItem]) -> Result<(), ApiError> {
        check_item_count(items)?;
        let url = format!("{}/blocks/{}/children", self.base_url, container_id);
        debug!(%url, items = items.len(), "appending children");

        let res = self
            .client
            .patch(&url)
            .json(&AppendChildrenRequest { children: items })
            .send()?;
        if !res.status().is_success() {
            return Err(error_from_response(res));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{divider, paragraph};
    use serde_json::json;

    #[test]
    fn create_request_matches_notion_shape() {
        let children = vec![paragraph("hello"), divider()];
        let body = serde_json::to_value(CreatePageRequest::new("parent-1", "My Page", &children)).unwrap();
        assert_eq!(body["parent"], json!({"page_id": "parent-1"}));
        assert_eq!(
            body["properties"],
            json!({"title": {"title": [{"text": {"content": "My Page"}}]}})
        );
        assert_eq!(body["children"].as_array().unwrap().len(), 2);
        assert_eq!(body["children"][1]["type"], "divider");
    }

    #[test]
    fn create_request_keeps_empty_children_list() {
        let body = serde_json::to_value(CreatePageRequest::new("p", "t", &[])).unwrap();
        assert_eq!(body["children"], json!([]));
    }

    #[test]
    fn oversized_calls_are_rejected_before_sending() {
        // Unroutable base URL: the guard must fire before any request.
        let client = NotionClient::new("secret", "parent", "http://127.0.0.1:9").unwrap();
        let items = vec![paragraph("x"); MAX_ITEMS_PER_CALL + 1];
        assert_eq!(
            client.create_container("t", &items),
            Err(ApiError::TooManyItems { count: 101, limit: 100 })
        );
        assert_eq!(
            client.append_items("page", &items),
            Err(ApiError::TooManyItems { count: 101, limit: 100 })
        );
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let client = NotionClient::new("secret", "parent", "http://localhost:1234/v1/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234/v1");
        assert_eq!(client.parent_page_id(), "parent");
    }

    #[test]
    fn api_key_with_newline_is_refused() {
        assert!(matches!(
            NotionClient::new("bad\nkey", "parent", DEFAULT_BASE_URL),
            Err(ApiError::InvalidApiKey)
        ));
    }
}
