//! Raw documents as returned by a content service.
//!
//! These mirror the search API's JSON. Every field is optional here;
//! required fields are enforced by [`crate::normalize`], so a bad record
//! is reported as `MalformedRecord` rather than as a decode failure.

use serde::{Deserialize, Serialize};

use crate::types::Cursor;

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPage {
    /// Records in service order.
    #[serde(default)]
    pub results: Vec<RawPostRecord>,

    /// Cursor for the next page, or the end marker.
    #[serde(default)]
    pub next_page: Cursor,

    /// Total number of matching documents, when the service reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_results_size: Option<u64>,
}

impl RawPage {
    /// Build a page from records and a cursor.
    pub fn new(results: Vec<RawPostRecord>, next_page: Cursor) -> Self {
        Self {
            results,
            next_page,
            total_results_size: None,
        }
    }
}

/// A post as listed by a search query, restricted to listing fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPostRecord {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub uid: Option<String>,

    #[serde(default)]
    pub first_publication_date: Option<String>,

    #[serde(default)]
    pub data: RawPostData,
}

/// Listing fields of a post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPostData {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub subtitle: Option<String>,

    #[serde(default)]
    pub author: Option<String>,
}

/// A full post document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPostDocument {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub uid: Option<String>,

    #[serde(default)]
    pub first_publication_date: Option<String>,

    #[serde(default)]
    pub data: RawPostBody,
}

/// Body fields of a full post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPostBody {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub subtitle: Option<String>,

    #[serde(default)]
    pub banner: Option<RawImage>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub content: Vec<RawSection>,
}

/// An image field. Unset images arrive as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawImage {
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub alt: Option<String>,
}

/// One content group: an optional heading and a rich text body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSection {
    #[serde(default)]
    pub heading: Option<String>,

    #[serde(default)]
    pub body: Vec<RichTextBlock>,
}

/// A rich text block. Spans are ignored; only the plain text is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichTextBlock {
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub text: String,
}

impl RichTextBlock {
    /// A paragraph block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            kind: "paragraph".to_string(),
            text: text.into(),
        }
    }
}
