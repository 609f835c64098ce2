//! lede-core - Content types, traits and listing aggregation for a
//! headless-CMS blog.
//!
//! Raw records come from a [`ContentService`]; [`normalize()`] turns them
//! into display-ready posts; [`PostListing`] aggregates cursor-paginated
//! "load more" pages.

pub mod content;
pub mod error;
pub mod format;
pub mod links;
pub mod listing;
pub mod navigation;
pub mod normalize;
pub mod reading;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use content::{
    Banner, Post, PostLink, PostSummary, RawPage, RawPostDocument, RawPostRecord, Section,
};
pub use error::Error;
pub use listing::{InFlightPolicy, ListingState, PostListing};
pub use navigation::Neighbors;
pub use normalize::{normalize, normalize_page, normalize_post};
pub use traits::{ContentService, PageStream, QueryOptions, paginate};
pub use types::{ContentRef, Cursor, DocumentType, RepoUrl, Uid};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
