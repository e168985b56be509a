// Error types for talking to Notion and for the upload job.
//
// Library code returns these `thiserror` enums. The binary wraps them in
// `anyhow` for context.

use std::path::PathBuf;

/// Failure of a single call against the document API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, TLS, connection reset...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("remote returned {status}: {message}")]
    Status {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// The server answered 2xx but the body was not what we expect.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The API key cannot be sent in an `Authorization` header. No request
    /// was made.
    #[error("API key may only contain visible ASCII characters")]
    InvalidApiKey,

    /// Caller tried to send more items than one call accepts.
    #[error("{count} items exceed the per-call limit of {limit}")]
    TooManyItems { count: usize, limit: usize },
}

impl ApiError {
    /// HTTP status, when the server got far enough to send one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

/// Fatal outcome of an upload job. When this is returned no page exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("document title must not be empty")]
    EmptyTitle,

    #[error("create call failed, no page was created: {source}")]
    CreateFailed {
        #[source]
        source: ApiError,
    },
}

/// Problems resolving credentials and settings before any call is made.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no Notion API key: pass --api-key, set NOTION_API_KEY, or create one at https://www.notion.so/my-integrations")]
    MissingApiKey,

    #[error("no parent page id: pass --parent-page-id or set NOTION_PARENT_PAGE_ID (the last part of the page URL)")]
    MissingParentPage,

    #[error("API key may only contain visible ASCII characters")]
    InvalidApiKey,

    #[error("`{0}` does not look like a Notion page id or page URL")]
    InvalidPageId(String),

    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("prompt failed: {0}")]
    Prompt(#[from] std::io::Error),
}
