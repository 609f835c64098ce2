//! Error types for lede.
//!
//! One error type covers the whole core, with explicit variants for
//! malformed content, failed fetches, listing misuse and input validation.

use std::fmt;
use thiserror::Error;

/// The unified error type for lede operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A record returned by the content service violates the record invariants.
    #[error("malformed record: {0}")]
    MalformedRecord(#[from] MalformedRecordError),

    /// The content service could not be reached or answered with an error.
    #[error("fetch failed: {0}")]
    FetchFailed(#[from] FetchError),

    /// A listing load was requested while another one is still running.
    #[error("a load is already in progress for this listing")]
    ConcurrentLoadInProgress,

    /// Input validation errors (invalid uid, type name, ref or URL).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns true if retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::FetchFailed(err) => err.is_retryable(),
            Error::ConcurrentLoadInProgress => true,
            Error::MalformedRecord(_) | Error::InvalidInput(_) => false,
        }
    }
}

/// Record invariant violations found during normalization.
///
/// `record` identifies the offending record by uid, then id, when present.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedRecordError {
    /// The record has no uid or an empty one.
    #[error("record {record} has no uid")]
    MissingUid { record: String },

    /// The record has no first publication date.
    #[error("record {record} has no publication date")]
    MissingPublicationDate { record: String },

    /// The first publication date is not a recognizable timestamp.
    #[error("record {record} has an unparseable publication date '{value}'")]
    InvalidPublicationDate { record: String, value: String },
}

/// Failures while fetching content from a content service.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Transport { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// The service answered with a non-success status.
    #[error("service error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The response body could not be decoded.
    #[error("undecodable response: {message}")]
    Decode { message: String },

    /// No document of the given type has the given uid.
    #[error("no {document_type} document with uid '{uid}'")]
    NotFound { document_type: String, uid: String },

    /// Local storage could not be read.
    #[error("IO error: {message}")]
    Io { message: String },
}

impl FetchError {
    /// Returns true if the failure is transient.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transport { .. } | FetchError::Timeout | FetchError::Io { .. } => true,
            FetchError::Protocol(err) => err.status >= 500 || err.status == 429,
            FetchError::Decode { .. } | FetchError::NotFound { .. } => false,
        }
    }
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        FetchError::Io {
            message: err.to_string(),
        }
    }
}

/// Non-success answer from the content service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Error message from the service, if it sent one.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// Check if the service rejected the credentials or ref.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401 || self.status == 403
    }
}

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    /// Invalid document uid.
    #[error("invalid uid '{value}': {reason}")]
    Uid { value: String, reason: String },

    /// Invalid custom type name.
    #[error("invalid document type '{value}': {reason}")]
    DocumentType { value: String, reason: String },

    /// Invalid content ref.
    #[error("invalid ref '{value}': {reason}")]
    ContentRef { value: String, reason: String },

    /// Invalid repository URL or name.
    #[error("invalid repository '{value}': {reason}")]
    RepoUrl { value: String, reason: String },

    /// A cursor the service cannot follow.
    #[error("invalid cursor '{value}': {reason}")]
    Cursor { value: String, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
