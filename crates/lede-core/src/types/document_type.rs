//! Custom type name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// The custom type name of blog posts.
pub const POST: &str = "post";

/// A validated custom type name, used as the type filter of queries.
///
/// # Example
///
/// ```
/// use lede_core::DocumentType;
///
/// let post = DocumentType::post();
/// assert_eq!(post.as_str(), "post");
/// assert!(DocumentType::new("Blog Post").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentType(String);

impl DocumentType {
    /// Create a new type name, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error unless the name is non-empty and made of ASCII
    /// lowercase letters, digits, `_` or `-`.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// The `post` custom type.
    pub fn post() -> Self {
        Self(POST.to_string())
    }

    /// Returns the type name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the `post` custom type.
    pub fn is_post(&self) -> bool {
        self.0 == POST
    }

    fn validate(s: &str) -> Result<(), Error> {
        if s.is_empty() {
            return Err(InvalidInputError::DocumentType {
                value: s.to_string(),
                reason: "cannot be empty".to_string(),
            }
            .into());
        }

        if !s.starts_with(|c: char| c.is_ascii_lowercase()) {
            return Err(InvalidInputError::DocumentType {
                value: s.to_string(),
                reason: "must start with a lowercase letter".to_string(),
            }
            .into());
        }

        for c in s.chars() {
            if !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '_' && c != '-' {
                return Err(InvalidInputError::DocumentType {
                    value: s.to_string(),
                    reason: format!("contains invalid character '{}'", c),
                }
                .into());
            }
        }

        Ok(())
    }
}

impl Default for DocumentType {
    fn default() -> Self {
        Self::post()
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocumentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for DocumentType {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<DocumentType> for String {
    fn from(t: DocumentType) -> Self {
        t.0
    }
}
