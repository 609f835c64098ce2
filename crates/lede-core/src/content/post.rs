//! Normalized, display-ready posts.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::types::Uid;

/// Listing metadata of one post.
///
/// Built by [`crate::normalize::normalize`]; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    uid: Uid,
    published_at: DateTime<FixedOffset>,
    title: String,
    subtitle: String,
    author: String,
}

impl PostSummary {
    pub fn new(
        uid: Uid,
        published_at: DateTime<FixedOffset>,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            uid,
            published_at,
            title: title.into(),
            subtitle: subtitle.into(),
            author: author.into(),
        }
    }

    pub fn uid(&self) -> &Uid {
        &self.uid
    }

    /// First publication instant, in the offset the service reported.
    pub fn published_at(&self) -> &DateTime<FixedOffset> {
        &self.published_at
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn author(&self) -> &str {
        &self.author
    }
}

/// A full post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Option<String>,
    pub uid: Uid,
    pub published_at: DateTime<FixedOffset>,
    pub title: String,
    pub banner: Option<Banner>,
    pub author: String,
    pub sections: Vec<Section>,
}

/// The post's header image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub url: String,
    pub alt: Option<String>,
}

/// A content group of a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub heading: Option<String>,
    /// Plain text of each rich text block, in order.
    pub blocks: Vec<String>,
}

impl Section {
    /// The body as plain text, blocks joined by a single space.
    pub fn text(&self) -> String {
        self.blocks.join(" ")
    }
}

/// A link to another post, as shown in prev/next navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostLink {
    pub uid: Uid,
    pub title: String,
}
