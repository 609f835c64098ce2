//! Link resolution.

use crate::types::{DocumentType, Uid};

/// Site path of a document: `/post/<uid>` for posts, the home page otherwise.
pub fn resolve(document_type: &DocumentType, uid: &Uid) -> String {
    if document_type.is_post() {
        post_path(uid)
    } else {
        "/".to_string()
    }
}

/// Site path of a post.
pub fn post_path(uid: &Uid) -> String {
    format!("/post/{}", uid)
}
