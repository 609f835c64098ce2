//! HTTP client for the Prismic REST API.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace};
use url::Url;

use lede_core::error::{Error, FetchError, InvalidInputError, ProtocolError};
use lede_core::{RepoUrl, Result};

use super::endpoints::{ApiErrorResponse, ApiResponse, SearchQuery, SearchResponse};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Map a reqwest failure into a fetch error.
pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    let fetch = if err.is_timeout() {
        FetchError::Timeout
    } else if err.is_decode() {
        FetchError::Decode {
            message: err.to_string(),
        }
    } else {
        FetchError::Transport {
            message: err.to_string(),
        }
    };
    Error::FetchFailed(fetch)
}

/// HTTP client bound to one content repository.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    repo: RepoUrl,
    access_token: Option<String>,
}

impl ApiClient {
    /// Create a client for `repo`.
    pub fn new(repo: RepoUrl, access_token: Option<String>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .user_agent(concat!("lede/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(transport_error)?;

        Ok(Self {
            client,
            repo,
            access_token,
        })
    }

    /// Returns the repository this client is configured for.
    pub fn repo(&self) -> &RepoUrl {
        &self.repo
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Fetch the API entry point, which lists the content refs.
    #[instrument(skip(self), fields(repo = %self.repo))]
    pub async fn api(&self) -> Result<ApiResponse> {
        let url = self.repo.api_url();
        debug!("Fetching API entry point");

        let mut request = self.client.get(&url);
        if let Some(token) = &self.access_token {
            request = request.query(&[("access_token", token)]);
        }

        let response = request.send().await.map_err(transport_error)?;
        self.handle_response(response).await
    }

    /// Run a document search.
    #[instrument(skip(self, query), fields(repo = %self.repo))]
    pub async fn search<T>(&self, query: &SearchQuery<'_>) -> Result<SearchResponse<T>>
    where
        T: DeserializeOwned,
    {
        let url = self.repo.search_url();
        debug!(q = %query.q, page_size = query.page_size, "Searching documents");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(transport_error)?;

        self.handle_response(response).await
    }

    /// Fetch a `next_page` URL exactly as the API returned it.
    ///
    /// The URL must point at this client's repository. The access token is
    /// appended when the URL does not already carry one.
    #[instrument(skip(self, next_page), fields(repo = %self.repo))]
    pub async fn follow<T>(&self, next_page: &str) -> Result<SearchResponse<T>>
    where
        T: DeserializeOwned,
    {
        let url = self.next_page_url(next_page)?;
        debug!("Following next page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(transport_error)?;

        self.handle_response(response).await
    }

    fn next_page_url(&self, next_page: &str) -> Result<Url> {
        let invalid = |reason: &str| {
            Error::from(InvalidInputError::Cursor {
                value: next_page.to_string(),
                reason: reason.to_string(),
            })
        };

        let mut url = Url::parse(next_page).map_err(|e| invalid(&e.to_string()))?;
        if !self.repo.same_origin(&url) {
            return Err(invalid("points outside the configured repository"));
        }

        if let Some(token) = &self.access_token {
            let has_token = url.query_pairs().any(|(k, _)| k == "access_token");
            if !has_token {
                url.query_pairs_mut().append_pair("access_token", token);
            }
        }

        Ok(url)
    }

    /// Handle an API response, parsing the body or error.
    async fn handle_response<R: DeserializeOwned>(&self, response: reqwest::Response) -> Result<R> {
        let status = response.status();
        trace!(status = %status, "API response");

        if status.is_success() {
            response.json::<R>().await.map_err(transport_error)
        } else {
            let error = self.parse_error_response(response).await;
            Err(Error::FetchFailed(FetchError::Protocol(error)))
        }
    }

    /// Parse an API error response.
    async fn parse_error_response(&self, response: reqwest::Response) -> ProtocolError {
        let status = response.status().as_u16();

        match response.json::<ApiErrorResponse>().await {
            Ok(body) => ProtocolError::new(status, body.into_message()),
            Err(_) => ProtocolError::new(status, None),
        }
    }
}
