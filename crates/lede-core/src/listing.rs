//! Post listing aggregation.
//!
//! A listing starts from one page of posts and grows by "load more"
//! steps that follow the service's cursor. [`ListingState`] is the value
//! side: explicit, pure transitions from one state to the next.
//! [`PostListing`] owns a state and a content service and guarantees that
//! at most one load runs at a time, so two loads never extend the same
//! stale state.

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::Result;
use crate::content::{PostSummary, RawPage};
use crate::error::Error;
use crate::normalize::normalize_page;
use crate::traits::{ContentService, QueryOptions};
use crate::types::{Cursor, DocumentType, Uid};

/// The posts loaded so far and the cursor of the next page.
///
/// Items keep page arrival order and, within a page, service order. No
/// two items share a uid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListingState {
    cursor: Cursor,
    items: Vec<PostSummary>,
}

impl ListingState {
    /// Build the state of a listing's first page.
    pub fn initialize(first_page: RawPage) -> Result<Self> {
        Self::default().advance(first_page)
    }

    /// The state after appending `page`.
    ///
    /// Records already in the listing are skipped. On error `self` is
    /// untouched and nothing is appended.
    pub fn advance(&self, page: RawPage) -> Result<Self> {
        let incoming = normalize_page(page.results)?;

        let mut seen: HashSet<Uid> = self.items.iter().map(|p| p.uid().clone()).collect();
        let mut items = Vec::with_capacity(self.items.len() + incoming.len());
        items.extend(self.items.iter().cloned());

        for post in incoming {
            if seen.insert(post.uid().clone()) {
                items.push(post);
            } else {
                warn!(uid = %post.uid(), "Skipping post already in listing");
            }
        }

        Ok(Self {
            cursor: page.next_page,
            items,
        })
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn items(&self) -> &[PostSummary] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true if a further page can be loaded.
    pub fn has_more(&self) -> bool {
        self.cursor.has_more()
    }

    pub fn into_items(self) -> Vec<PostSummary> {
        self.items
    }
}

/// Fetch the page after `state` and return the extended state.
///
/// A state at the end of the results is returned unchanged without a
/// fetch. This is the unguarded transition; [`PostListing`] wraps it.
pub async fn fetch_next<S>(
    service: &S,
    document_type: &DocumentType,
    options: &QueryOptions,
    state: &ListingState,
) -> Result<ListingState>
where
    S: ContentService + ?Sized,
{
    if state.cursor.is_end() {
        debug!("Listing exhausted, nothing to load");
        return Ok(state.clone());
    }

    let query = options.clone().with_cursor(state.cursor.clone());
    let page = service.query_by_type(document_type, &query).await?;
    state.advance(page)
}

/// What a load does while another load of the same listing is running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InFlightPolicy {
    /// Fail at once with [`Error::ConcurrentLoadInProgress`].
    #[default]
    Reject,
    /// Wait for the running load, then load from its result.
    Defer,
}

/// A post listing bound to its content service.
///
/// # Example
///
/// ```no_run
/// use lede_core::{ContentService, PostListing};
///
/// # async fn example(service: impl ContentService) -> lede_core::Result<()> {
/// let listing = PostListing::open(service).await?;
/// while listing.has_more() {
///     listing.load_next().await?;
/// }
/// for post in listing.snapshot().items() {
///     println!("{}", post.title());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PostListing<S> {
    service: S,
    document_type: DocumentType,
    options: QueryOptions,
    policy: InFlightPolicy,
    state: RwLock<ListingState>,
    loading: Mutex<()>,
}

impl<S: ContentService> PostListing<S> {
    /// Bind an already fetched first page to `service`.
    pub fn new(service: S, first_page: RawPage) -> Result<Self> {
        Ok(Self::with_state(service, ListingState::initialize(first_page)?))
    }

    /// Resume a listing from a known state.
    pub fn with_state(service: S, state: ListingState) -> Self {
        Self {
            service,
            document_type: DocumentType::post(),
            options: QueryOptions::listing(),
            policy: InFlightPolicy::default(),
            state: RwLock::new(state),
            loading: Mutex::new(()),
        }
    }

    /// Fetch the first page of the post listing.
    pub async fn open(service: S) -> Result<Self> {
        Self::open_with(service, DocumentType::post(), QueryOptions::listing()).await
    }

    /// Fetch the first page of a custom query.
    ///
    /// `options.cursor` is ignored; the listing starts at the first page.
    #[instrument(skip_all, fields(document_type = %document_type))]
    pub async fn open_with(
        service: S,
        document_type: DocumentType,
        options: QueryOptions,
    ) -> Result<Self> {
        let options = options.with_cursor(Cursor::END);
        let first_page = service.query_by_type(&document_type, &options).await?;
        let state = ListingState::initialize(first_page)?;
        info!(posts = state.len(), more = state.has_more(), "Opened listing");

        Ok(Self {
            document_type,
            options,
            ..Self::with_state(service, state)
        })
    }

    /// Set the query used for later pages.
    pub fn with_query(mut self, document_type: DocumentType, options: QueryOptions) -> Self {
        self.document_type = document_type;
        self.options = options.with_cursor(Cursor::END);
        self
    }

    pub fn with_policy(mut self, policy: InFlightPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> ListingState {
        self.read_state().clone()
    }

    /// Returns true if a further page can be loaded.
    pub fn has_more(&self) -> bool {
        self.read_state().has_more()
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Load the next page and return the new state.
    ///
    /// At the end of the results this is a no-op returning the current
    /// state. On failure the state is left as it was, so the call can be
    /// retried. Dropping the returned future before it completes also
    /// leaves the state unchanged.
    ///
    /// # Errors
    ///
    /// - [`Error::ConcurrentLoadInProgress`] if another load is running
    ///   and the policy is [`InFlightPolicy::Reject`]
    /// - [`Error::FetchFailed`] if the service call fails
    /// - [`Error::MalformedRecord`] if the page holds an invalid record
    #[instrument(skip(self), fields(document_type = %self.document_type))]
    pub async fn load_next(&self) -> Result<ListingState> {
        let _loading = match self.policy {
            InFlightPolicy::Reject => self
                .loading
                .try_lock()
                .map_err(|_| Error::ConcurrentLoadInProgress)?,
            InFlightPolicy::Defer => self.loading.lock().await,
        };

        let current = self.snapshot();
        let next = fetch_next(&self.service, &self.document_type, &self.options, &current)
            .await
            .inspect_err(|e| warn!(error = %e, "Load failed, listing unchanged"))?;

        if next.len() != current.len() || next.cursor() != current.cursor() {
            debug!(
                added = next.len() - current.len(),
                total = next.len(),
                more = next.has_more(),
                "Loaded page"
            );
        }

        *self.write_state() = next.clone();
        Ok(next)
    }

    /// Consume the listing, keeping its state.
    pub fn into_state(self) -> ListingState {
        self.state.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_state(&self) -> RwLockReadGuard<'_, ListingState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, ListingState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
