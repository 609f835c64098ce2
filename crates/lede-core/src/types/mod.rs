//! Core content types.
//!
//! These types enforce their invariants at construction time,
//! ensuring invalid states are unrepresentable.

mod content_ref;
mod cursor;
mod document_type;
mod repo_url;
mod uid;

pub use content_ref::ContentRef;
pub use cursor::Cursor;
pub use document_type::{DocumentType, POST};
pub use repo_url::RepoUrl;
pub use uid::Uid;
