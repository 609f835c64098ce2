//! Content release ref.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, InvalidInputError};

/// An opaque content version token.
///
/// The repository's master ref selects published content; preview refs
/// select draft releases. Refs are never interpreted, only passed back.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentRef(String);

impl ContentRef {
    /// Create a ref, rejecting empty or whitespace-bearing tokens.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        if s.is_empty() {
            return Err(InvalidInputError::ContentRef {
                value: s,
                reason: "cannot be empty".to_string(),
            }
            .into());
        }
        if s.chars().any(char::is_whitespace) {
            return Err(InvalidInputError::ContentRef {
                value: s,
                reason: "cannot contain whitespace".to_string(),
            }
            .into());
        }
        Ok(Self(s))
    }

    /// Returns the ref token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Preview refs grant draft access, so keep them out of logs.
impl fmt::Debug for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(6).collect();
        write!(f, "ContentRef({}…)", prefix)
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ContentRef {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ContentRef> for String {
    fn from(r: ContentRef) -> Self {
        r.0
    }
}
