//! Content service trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::Result;
use crate::content::{RawPage, RawPostDocument};
use crate::types::{ContentRef, Cursor, DocumentType, Uid};

/// Page size of the post listing.
pub const LISTING_PAGE_SIZE: u32 = 2;

/// Page size used when enumerating every post path.
pub const PATHS_PAGE_SIZE: u32 = 5;

/// Page size used when collecting posts for prev/next navigation.
pub const NAVIGATION_PAGE_SIZE: u32 = 100;

/// Fields projected by the post listing.
pub const LISTING_FIELDS: [&str; 3] = ["title", "subtitle", "author"];

/// Options of a type query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    /// Maximum number of records per page.
    pub page_size: u32,

    /// Page to fetch; the end marker selects the first page.
    pub cursor: Cursor,

    /// Data fields to project, without the type prefix. Empty means all.
    pub fetch: Vec<String>,

    /// Content version; `None` selects the published content.
    pub content_ref: Option<ContentRef>,
}

impl QueryOptions {
    /// First page of `page_size` records, all fields.
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            cursor: Cursor::END,
            fetch: Vec::new(),
            content_ref: None,
        }
    }

    /// The post listing query: two posts per page, listing fields only.
    pub fn listing() -> Self {
        Self::new(LISTING_PAGE_SIZE).with_fetch(LISTING_FIELDS)
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn with_fetch<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fetch = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_ref(mut self, content_ref: Option<ContentRef>) -> Self {
        self.content_ref = content_ref;
        self
    }
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self::listing()
    }
}

/// A headless content service.
///
/// Implementations fetch pages of documents by custom type and single
/// documents by uid. Callers treat them as black boxes: no retries, and
/// cursors are passed back exactly as received.
#[async_trait]
pub trait ContentService: Send + Sync {
    /// Fetch one page of documents of the given type.
    async fn query_by_type(
        &self,
        document_type: &DocumentType,
        options: &QueryOptions,
    ) -> Result<RawPage>;

    /// Fetch a single document by uid, optionally from a preview ref.
    async fn get_by_uid(
        &self,
        document_type: &DocumentType,
        uid: &Uid,
        content_ref: Option<&ContentRef>,
    ) -> Result<RawPostDocument>;
}

#[async_trait]
impl<T> ContentService for Arc<T>
where
    T: ContentService + ?Sized,
{
    async fn query_by_type(
        &self,
        document_type: &DocumentType,
        options: &QueryOptions,
    ) -> Result<RawPage> {
        (**self).query_by_type(document_type, options).await
    }

    async fn get_by_uid(
        &self,
        document_type: &DocumentType,
        uid: &Uid,
        content_ref: Option<&ContentRef>,
    ) -> Result<RawPostDocument> {
        (**self).get_by_uid(document_type, uid, content_ref).await
    }
}
