//! Document uid type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A validated document uid (the slug a post is addressed by).
///
/// Uids identify a document within its custom type and appear in paths
/// such as `/post/<uid>`.
///
/// # Example
///
/// ```
/// use lede_core::Uid;
///
/// let uid = Uid::new("como-utilizar-hooks").unwrap();
/// assert_eq!(uid.as_str(), "como-utilizar-hooks");
/// assert!(Uid::new("").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Uid(String);

impl Uid {
    /// Create a new uid from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is empty.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        if s.is_empty() {
            return Err(InvalidInputError::Uid {
                value: s,
                reason: "cannot be empty".to_string(),
            }
            .into());
        }
        Ok(Self(s))
    }

    /// Returns the uid string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check that the uid can name a file without leaving its directory.
    ///
    /// Rejects `.` and `..`, path separators, and control characters.
    pub fn ensure_path_safe(&self) -> Result<(), Error> {
        let unsafe_reason = if self.0 == "." || self.0 == ".." {
            Some("cannot be '.' or '..'".to_string())
        } else {
            self.0
                .chars()
                .find(|c| c.is_control() || *c == '/' || *c == '\\')
                .map(|c| format!("contains invalid character '{}'", c.escape_default()))
        };

        match unsafe_reason {
            Some(reason) => Err(InvalidInputError::Uid {
                value: self.0.clone(),
                reason,
            }
            .into()),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Uid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Uid {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Uid> for String {
    fn from(uid: Uid) -> Self {
        uid.0
    }
}

impl AsRef<str> for Uid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_slug() {
        let uid = Uid::new("criando-um-app-cra-do-zero").unwrap();
        assert_eq!(uid.to_string(), "criando-um-app-cra-do-zero");
    }

    #[test]
    fn invalid_empty() {
        assert!(Uid::new("").is_err());
    }

    #[test]
    fn any_non_empty_text_is_a_uid() {
        assert_eq!(Uid::new("two words").unwrap().as_str(), "two words");
        assert!(Uid::new("a/b").is_ok());
    }

    #[test]
    fn path_safety() {
        assert!(Uid::new("my post").unwrap().ensure_path_safe().is_ok());
        assert!(Uid::new("../etc/passwd").unwrap().ensure_path_safe().is_err());
        assert!(Uid::new("a\\b").unwrap().ensure_path_safe().is_err());
        assert!(Uid::new("..").unwrap().ensure_path_safe().is_err());
        assert!(Uid::new("nul\0").unwrap().ensure_path_safe().is_err());
    }

    #[test]
    fn deserialize_validates() {
        let ok: Uid = serde_json::from_str("\"hello\"").unwrap();
        assert_eq!(ok.as_str(), "hello");
        assert!(serde_json::from_str::<Uid>("\"\"").is_err());
    }
}
