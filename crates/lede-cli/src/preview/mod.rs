//! Preview mode state.

pub mod storage;

pub use storage::StoredPreview;
