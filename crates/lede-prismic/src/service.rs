//! Prismic content service.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use lede_core::error::{Error, FetchError, ProtocolError};
use lede_core::{
    ContentRef, ContentService, Cursor, DocumentType, QueryOptions, RawPage, RawPostDocument,
    RawPostRecord, RepoUrl, Result, Uid,
};

use crate::api::{ApiClient, DEFAULT_TIMEOUT, SearchQuery, SearchResponse};
use crate::predicates::{self, Predicate};

/// Options for connecting to a repository.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Token for private repositories.
    pub access_token: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            access_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Content service backed by a Prismic repository.
///
/// Cheap to clone. The master ref is fetched on first use and cached.
#[derive(Debug, Clone)]
pub struct PrismicService {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    client: ApiClient,
    master_ref: RwLock<Option<ContentRef>>,
}

impl PrismicService {
    /// Create a service for `repo`.
    ///
    /// No request is made until the first query.
    pub fn new(repo: RepoUrl, options: ClientOptions) -> Result<Self> {
        let client = ApiClient::new(repo, options.access_token, options.timeout)?;
        Ok(Self {
            inner: Arc::new(Inner {
                client,
                master_ref: RwLock::new(None),
            }),
        })
    }

    /// Returns the repository this service reads from.
    pub fn repo(&self) -> &RepoUrl {
        self.inner.client.repo()
    }

    /// The ref of the published content.
    pub async fn master_ref(&self) -> Result<ContentRef> {
        if let Some(cached) = self.inner.master_ref.read().await.as_ref() {
            return Ok(cached.clone());
        }
        self.refresh_master_ref().await
    }

    /// Re-read the master ref from the API entry point.
    #[instrument(skip(self), fields(repo = %self.repo()))]
    pub async fn refresh_master_ref(&self) -> Result<ContentRef> {
        let api = self.inner.client.api().await?;
        let raw = api.master_ref().ok_or_else(|| {
            Error::FetchFailed(FetchError::Decode {
                message: "API response lists no master ref".to_string(),
            })
        })?;
        let master = ContentRef::new(raw)?;

        debug!(content_ref = ?master, "Master ref");
        *self.inner.master_ref.write().await = Some(master.clone());
        Ok(master)
    }

    async fn resolve_ref(&self, content_ref: Option<&ContentRef>) -> Result<ContentRef> {
        match content_ref {
            Some(r) => Ok(r.clone()),
            None => self.master_ref().await,
        }
    }

    async fn search<T>(
        &self,
        predicate: &Predicate,
        page_size: u32,
        fetch: Option<String>,
        content_ref: Option<&ContentRef>,
    ) -> Result<SearchResponse<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let content_ref = self.resolve_ref(content_ref).await?;
        let query = SearchQuery {
            content_ref: content_ref.as_str(),
            q: predicates::query([predicate]),
            fetch,
            page_size,
            access_token: self.inner.client.access_token(),
        };
        self.inner.client.search(&query).await
    }
}

#[async_trait]
impl ContentService for PrismicService {
    async fn query_by_type(
        &self,
        document_type: &DocumentType,
        options: &QueryOptions,
    ) -> Result<RawPage> {
        let response: SearchResponse<RawPostRecord> = match options.cursor.token() {
            Some(next_page) => self.inner.client.follow(next_page).await?,
            None => {
                let fetch = predicates::fetch_fields(document_type, &options.fetch);
                self.search(
                    &Predicate::document_type(document_type),
                    options.page_size,
                    fetch,
                    options.content_ref.as_ref(),
                )
                .await?
            }
        };

        Ok(RawPage {
            results: response.results,
            next_page: Cursor::from(response.next_page),
            total_results_size: response.total_results_size,
        })
    }

    async fn get_by_uid(
        &self,
        document_type: &DocumentType,
        uid: &Uid,
        content_ref: Option<&ContentRef>,
    ) -> Result<RawPostDocument> {
        let response: SearchResponse<RawPostDocument> = self
            .search(&Predicate::uid(document_type, uid), 1, None, content_ref)
            .await
            .map_err(|e| match e {
                Error::FetchFailed(FetchError::Protocol(ProtocolError { status: 404, .. })) => {
                    not_found(document_type, uid)
                }
                other => other,
            })?;

        match response.results.into_iter().next() {
            Some(document) => Ok(document),
            None => {
                info!(document_type = %document_type, uid = %uid, "Document not found");
                Err(not_found(document_type, uid))
            }
        }
    }
}

fn not_found(document_type: &DocumentType, uid: &Uid) -> Error {
    Error::FetchFailed(FetchError::NotFound {
        document_type: document_type.to_string(),
        uid: uid.to_string(),
    })
}
