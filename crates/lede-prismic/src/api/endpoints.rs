//! REST API v2 request/response types.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// Response of the API entry point (`/api/v2`).
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub refs: Vec<RefEntry>,
}

impl ApiResponse {
    /// The ref of the published content.
    pub fn master_ref(&self) -> Option<&str> {
        self.refs
            .iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.content_ref.as_str())
    }
}

/// One content release ref.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefEntry {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "ref")]
    pub content_ref: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub is_master_ref: bool,
}

/// Query parameters of `/api/v2/documents/search`.
#[derive(Debug, Serialize)]
pub struct SearchQuery<'a> {
    #[serde(rename = "ref")]
    pub content_ref: &'a str,
    pub q: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<&'a str>,
}

/// Response of `/api/v2/documents/search`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub total_results_size: Option<u64>,
}

/// Error body sent with non-success statuses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorResponse {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}
