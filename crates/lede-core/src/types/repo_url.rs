//! Content repository URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated content repository URL.
///
/// This type supports both hosted repositories (HTTPS/HTTP) and local
/// content directories (`file://`).
///
/// # Network URLs
///
/// Network URLs must use HTTPS (or HTTP for localhost). A bare repository
/// name expands to its CDN host.
///
/// # File URLs
///
/// File URLs (`file:///path/to/content`) point at a directory of JSON
/// documents, for offline builds and tests.
///
/// # Example
///
/// ```
/// use lede_core::RepoUrl;
///
/// let repo = RepoUrl::from_repo_name("my-blog-ignite").unwrap();
/// assert_eq!(repo.api_url(), "https://my-blog-ignite.cdn.prismic.io/api/v2");
///
/// let local = RepoUrl::new("file:///tmp/content").unwrap();
/// assert!(local.is_local());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepoUrl(Url);

impl RepoUrl {
    /// Create a new repository URL from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not an absolute URL, uses plain
    /// HTTP away from localhost, or is a `file://` URL without a path.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let invalid = |reason: String| {
            Error::from(InvalidInputError::RepoUrl {
                value: s.to_string(),
                reason,
            })
        };

        let url = Url::parse(s).map_err(|e| invalid(e.to_string()))?;
        match rejection(&url) {
            Some(reason) => Err(invalid(reason.to_string())),
            None => Ok(Self(url)),
        }
    }

    /// Expand a repository name into its CDN URL.
    pub fn from_repo_name(name: &str) -> Result<Self, Error> {
        let valid = !name.is_empty()
            && !name.starts_with('-')
            && !name.ends_with('-')
            && name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

        if !valid {
            return Err(InvalidInputError::RepoUrl {
                value: name.to_string(),
                reason: "repository names use lowercase letters, digits and '-'".to_string(),
            }
            .into());
        }

        Self::new(format!("https://{}.cdn.prismic.io", name))
    }

    /// Accept either a full URL or a bare repository name.
    pub fn from_source(source: &str) -> Result<Self, Error> {
        if source.contains("://") {
            Self::new(source)
        } else {
            Self::from_repo_name(source)
        }
    }

    /// Returns the API entry point.
    pub fn api_url(&self) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/api/v2", base)
    }

    /// Returns the document search endpoint.
    pub fn search_url(&self) -> String {
        format!("{}/documents/search", self.api_url())
    }

    /// Returns true if `url` is served by the same scheme, host and port.
    pub fn same_origin(&self, url: &Url) -> bool {
        self.0.scheme() == url.scheme()
            && self.0.host_str() == url.host_str()
            && self.0.port_or_known_default() == url.port_or_known_default()
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns true for a local content directory.
    pub fn is_local(&self) -> bool {
        self.0.scheme() == "file"
    }

    /// Returns the content directory of a `file://` source.
    pub fn to_file_path(&self) -> Option<PathBuf> {
        self.is_local()
            .then(|| self.0.to_file_path().ok())
            .flatten()
    }
}

/// Why `url` cannot name a content repository, if it cannot.
fn rejection(url: &Url) -> Option<&'static str> {
    if url.cannot_be_a_base() {
        return Some("must be an absolute URL");
    }

    match url.scheme() {
        "file" if url.path().is_empty() => Some("file:// URL must have a path"),
        "file" => None,
        _ if url.host_str().is_none() => Some("must have a host"),
        "https" => None,
        "http" if is_loopback(url) => None,
        _ => Some("must use HTTPS (HTTP allowed only for localhost)"),
    }
}

fn is_loopback(url: &Url) -> bool {
    matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "[::1]"))
}

impl fmt::Display for RepoUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl TryFrom<String> for RepoUrl {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RepoUrl> for String {
    fn from(repo: RepoUrl) -> Self {
        repo.0.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_name_expands_to_cdn() {
        let repo = RepoUrl::from_repo_name("my-blog-ignite").unwrap();
        assert_eq!(repo.as_str(), "https://my-blog-ignite.cdn.prismic.io/");
        assert_eq!(
            repo.search_url(),
            "https://my-blog-ignite.cdn.prismic.io/api/v2/documents/search"
        );
    }

    #[test]
    fn invalid_repo_names() {
        assert!(RepoUrl::from_repo_name("").is_err());
        assert!(RepoUrl::from_repo_name("My Blog").is_err());
        assert!(RepoUrl::from_repo_name("-blog").is_err());
    }

    #[test]
    fn from_source_accepts_both_forms() {
        let named = RepoUrl::from_source("blog").unwrap();
        assert!(!named.is_local());

        let url = RepoUrl::from_source("http://localhost:8080").unwrap();
        assert_eq!(url.api_url(), "http://localhost:8080/api/v2");
    }

    #[test]
    fn normalizes_trailing_slash_in_api_url() {
        let repo = RepoUrl::new("https://blog.cdn.prismic.io/").unwrap();
        assert_eq!(repo.api_url(), "https://blog.cdn.prismic.io/api/v2");
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(RepoUrl::new("http://blog.cdn.prismic.io").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(RepoUrl::new("/api/v2").is_err());
    }

    #[test]
    fn same_origin_compares_host_and_port() {
        let repo = RepoUrl::new("http://127.0.0.1:4000").unwrap();
        let same = Url::parse("http://127.0.0.1:4000/api/v2/documents/search?page=2").unwrap();
        let other_port = Url::parse("http://127.0.0.1:4001/api/v2/documents/search").unwrap();
        let other_host = Url::parse("https://evil.example/api/v2").unwrap();

        assert!(repo.same_origin(&same));
        assert!(!repo.same_origin(&other_port));
        assert!(!repo.same_origin(&other_host));
    }

    #[test]
    fn file_url_to_path() {
        #[cfg(unix)]
        {
            let repo = RepoUrl::new("file:///tmp/content").unwrap();
            assert!(repo.is_local());
            assert_eq!(
                repo.to_file_path().unwrap(),
                std::path::PathBuf::from("/tmp/content")
            );
        }
    }

    #[test]
    fn serde_round_trip_validates() {
        let repo = RepoUrl::from_repo_name("blog").unwrap();
        let json = serde_json::to_string(&repo).unwrap();
        assert_eq!(json, "\"https://blog.cdn.prismic.io/\"");
        assert_eq!(serde_json::from_str::<RepoUrl>(&json).unwrap(), repo);
        assert!(serde_json::from_str::<RepoUrl>("\"http://blog.example\"").is_err());
    }

    #[test]
    fn network_url_not_local() {
        let repo = RepoUrl::new("https://blog.cdn.prismic.io").unwrap();
        assert!(!repo.is_local());
        assert!(repo.to_file_path().is_none());
    }
}
