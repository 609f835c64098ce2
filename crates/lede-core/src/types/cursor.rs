//! Pagination cursor.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque pagination token, or the end marker.
///
/// Content services hand out cursors and take them back; nothing else
/// looks inside. An empty token is the same as the end marker, and the
/// marker serializes as `null`.
///
/// # Example
///
/// ```
/// use lede_core::Cursor;
///
/// let next = Cursor::new("https://repo.cdn.prismic.io/api/v2/documents/search?page=2");
/// assert!(next.has_more());
/// assert!(Cursor::end().is_end());
/// assert!(Cursor::new("").is_end());
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub struct Cursor(Option<String>);

impl Cursor {
    /// The end-of-results marker.
    pub const END: Cursor = Cursor(None);

    /// Wrap a service-issued token.
    pub fn new(token: impl Into<String>) -> Self {
        Self::from(Some(token.into()))
    }

    /// The end-of-results marker.
    pub fn end() -> Self {
        Self::END
    }

    /// Returns true if no further pages exist.
    pub fn is_end(&self) -> bool {
        self.0.is_none()
    }

    /// Returns true if another page can be fetched.
    pub fn has_more(&self) -> bool {
        self.0.is_some()
    }

    /// Returns the token, if any.
    pub fn token(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl From<Option<String>> for Cursor {
    fn from(token: Option<String>) -> Self {
        Self(token.filter(|t| !t.is_empty()))
    }
}

impl From<Cursor> for Option<String> {
    fn from(cursor: Cursor) -> Self {
        cursor.0
    }
}

impl fmt::Debug for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(token) => write!(f, "Cursor({:?})", token),
            None => write!(f, "Cursor::END"),
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(token) => write!(f, "{}", token),
            None => write!(f, "<end>"),
        }
    }
}
