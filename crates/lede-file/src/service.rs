//! File-backed content service implementation.

use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, warn};

use lede_core::error::{Error, InvalidInputError};
use lede_core::{
    ContentRef, ContentService, DocumentType, QueryOptions, RawPage, RawPostDocument, RepoUrl,
    Result, Uid,
};

use crate::store::FileStore;

/// Content service reading a local directory of JSON documents.
///
/// Preview refs are ignored: the directory holds a single version of
/// every document.
#[derive(Debug, Clone)]
pub struct FileContentService {
    store: FileStore,
}

impl FileContentService {
    /// Create a service reading from `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            store: FileStore::new(root),
        }
    }

    /// Create a service from a `file://` repository URL.
    pub fn from_url(url: &RepoUrl) -> Result<Self> {
        let root = url.to_file_path().ok_or_else(|| {
            Error::from(InvalidInputError::RepoUrl {
                value: url.to_string(),
                reason: "not a local file:// URL".to_string(),
            })
        })?;
        Ok(Self::new(root))
    }

    /// Access the underlying file store.
    pub fn store(&self) -> &FileStore {
        &self.store
    }
}

#[async_trait]
impl ContentService for FileContentService {
    async fn query_by_type(
        &self,
        document_type: &DocumentType,
        options: &QueryOptions,
    ) -> Result<RawPage> {
        if options.content_ref.is_some() {
            debug!("Ignoring content ref for file source");
        }

        self.store
            .list_documents(document_type, options.page_size, &options.cursor)
            .await
    }

    async fn get_by_uid(
        &self,
        document_type: &DocumentType,
        uid: &Uid,
        content_ref: Option<&ContentRef>,
    ) -> Result<RawPostDocument> {
        if content_ref.is_some() {
            warn!(uid = %uid, "File source has no previews, serving the stored document");
        }

        self.store.get_document(document_type, uid).await
    }
}
