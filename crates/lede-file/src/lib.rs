//! lede-file - Filesystem-backed content service.
//!
//! Serves documents from `<root>/<type>/<uid>.json`, for offline builds
//! and tests.

mod service;
mod store;

pub use service::FileContentService;
pub use store::{FileStore, listing_record};
